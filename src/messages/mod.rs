/// User-facing text: wait-screen status lines and report summaries
pub mod glossary;

pub use glossary::{build_review_notes, summary_for_band, STATUS_MESSAGES};
