use crate::result::{IndicatorKind, NormalizedQuestion};
use crate::risk::RiskBand;
use std::collections::HashSet;

/// Status lines cycled while an analysis request is in flight.
pub const STATUS_MESSAGES: [&str; 5] = [
    "Uploading interview recording...",
    "Transcribing the conversation...",
    "Analyzing response patterns...",
    "Scoring each answer for authenticity...",
    "Preparing the fraud report...",
];

// One-line reading of an aggregate band for the report header
pub fn summary_for_band(band: RiskBand) -> &'static str {
    match band {
        RiskBand::Low => "Responses appear authentic; no meaningful fraud signals were found.",
        RiskBand::Medium => "Some answers show fraud signals; review the flagged questions before deciding.",
        RiskBand::High => "Strong fraud signals across the interview; verify the candidate independently.",
    }
}

// Follow-up advice for a detected indicator
pub fn note_for_indicator(kind: IndicatorKind) -> &'static str {
    match kind {
        IndicatorKind::ReadingAloud => "Reading aloud suspected: ask an unscripted follow-up and compare delivery.",
        IndicatorKind::ExternalHelp => "External help suspected: probe the same topic live at a deeper level.",
        IndicatorKind::ScriptedContent => "Scripted content suspected: ask for a concrete example from their own work.",
    }
}

// Unique reviewer notes (by indicator) across all questions, capped and clipped
pub fn build_review_notes<'a, I>(questions: I, max_notes: usize, max_line_chars: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a NormalizedQuestion>,
{
    let mut seen: HashSet<IndicatorKind> = HashSet::new();
    let mut out: Vec<String> = Vec::new();
    for q in questions {
        for kind in q.detected_indicators() {
            if out.len() >= max_notes { return out; }
            if seen.insert(kind) {
                out.push(crate::truncate_utf8_safe(note_for_indicator(kind), max_line_chars));
            }
        }
    }
    out
}
