/// Session-scoped result storage
pub mod session;

pub use session::{SessionStore, RESULT_KEY};
