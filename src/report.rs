//! Plain-text rendering of a [`ResultsView`].
use chrono::{DateTime, Local, NaiveDateTime};

use crate::messages::{build_review_notes, summary_for_band};
use crate::view::ResultsView;

const MAX_NOTES: usize = 3;
const MAX_NOTE_CHARS: usize = 120;

pub fn render_text(view: &ResultsView) -> String {
    let mut out = String::new();
    out.push_str("Interview Analysis Results\n");
    out.push_str("==========================\n");
    out.push_str(&format!("Candidate: {}\n", or_placeholder(&view.candidate_name)));
    out.push_str(&format!("Role: {}\n", or_placeholder(&view.role)));
    if let Some(name) = &view.file_name {
        out.push_str(&format!("Recording: {}\n", name));
    }
    if let Some(at) = &view.processed_at {
        out.push_str(&format!("Processed: {}\n", format_timestamp(at)));
    }

    out.push_str(&format!(
        "\nOverall Fraud Score: {} [{}]\n",
        view.fraud_score, view.risk
    ));
    out.push_str(summary_for_band(view.risk));
    out.push('\n');

    if view.questions.is_empty() {
        out.push_str("\nNo per-question analysis available.\n");
        return out;
    }

    out.push_str("\nQuestion-by-Question Analysis\n");
    out.push_str("-----------------------------\n");
    for q in &view.questions {
        let nq = &q.question;
        out.push_str(&format!("\nQ{}: {}\n", q.number, nq.question));
        out.push_str(&format!(
            "  Fraud score: {} [{}] ({})\n",
            nq.fraud_score,
            q.risk,
            nq.confidence_level.label()
        ));
        out.push_str(&format!("  Candidate response: \"{}\"\n", nq.answer));
        let detected: Vec<&str> = nq.detected_indicators().map(|k| k.name()).collect();
        out.push_str(&format!(
            "  Indicators: {}\n",
            if detected.is_empty() { "none detected".to_string() } else { detected.join(", ") }
        ));
        if !nq.details.is_empty() {
            out.push_str(&format!("  Analysis: {}\n", nq.details));
        }
    }

    let notes = build_review_notes(view.questions.iter().map(|q| &q.question), MAX_NOTES, MAX_NOTE_CHARS);
    if !notes.is_empty() {
        out.push_str("\nReviewer Notes\n");
        for note in notes {
            out.push_str(&format!("- {}\n", note));
        }
    }
    out
}

fn or_placeholder(s: &str) -> &str {
    if s.trim().is_empty() { "(not provided)" } else { s }
}

/// Local-time rendering of a stored timestamp; unparsable input is echoed.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::fixture;
    use crate::result::normalize_value;
    use serde_json::json;

    fn fixture_report() -> String {
        let mut result = normalize_value(fixture());
        result.file_name = Some("harry.m4a".to_string());
        result.processed_at = Some("2025-07-27T22:58:06".to_string());
        render_text(&ResultsView::from_result(result))
    }

    #[test]
    fn header_shows_identity_recording_and_processed_time() {
        let out = fixture_report();
        assert!(out.starts_with("Interview Analysis Results\n"));
        assert!(out.contains("Candidate: Harry\n"));
        assert!(out.contains("Role: Software Engineer\n"));
        assert!(out.contains("Recording: harry.m4a\n"));
        assert!(out.contains("Processed: 2025-07-27 22:58:06\n"));
        assert!(out.contains("Overall Fraud Score: 29 [Medium Risk]\n"));
        assert!(out.contains(summary_for_band(crate::risk::RiskBand::Medium)));
    }

    #[test]
    fn question_cards_carry_score_band_confidence_and_indicators() {
        let out = fixture_report();
        assert!(out.contains("\nQ1: Could you walk me through"));
        assert!(out.contains("  Fraud score: 15 [Medium Risk] (Low confidence)\n"));
        assert!(out.contains("  Candidate response: \"Well, I'm pretty new"));
        assert!(out.contains("  Indicators: none detected\n"));
        assert!(out.contains("  Analysis: The response is informal"));

        assert!(out.contains("  Fraud score: 45 [Medium Risk] (Medium confidence)\n"));
        assert!(out.contains("  Indicators: Reading Aloud, Scripted Content\n"));
        assert!(out.contains("  Fraud score: 55 [High Risk] (Medium confidence)\n"));
        assert!(out.contains("\nQ8: "));
    }

    #[test]
    fn reviewer_notes_list_each_detected_indicator_once() {
        let out = fixture_report();
        let notes = out.split("\nReviewer Notes\n").nth(1).unwrap_or_default();
        let lines: Vec<&str> = notes.lines().collect();
        assert_eq!(lines.len(), 3, "notes: {lines:?}");
        assert!(lines[0].starts_with("- Reading aloud suspected"));
        assert!(lines[1].starts_with("- Scripted content suspected"));
        assert!(lines[2].starts_with("- External help suspected"));
    }

    #[test]
    fn empty_result_renders_placeholders_without_cards() {
        let out = render_text(&ResultsView::from_result(normalize_value(&json!({}))));
        assert!(out.contains("Candidate: (not provided)\n"));
        assert!(out.contains("Overall Fraud Score: 0 [Low Risk]\n"));
        assert!(out.contains("No per-question analysis available."));
        assert!(!out.contains("Processed:"));
        assert!(!out.contains("Reviewer Notes"));
    }

    #[test]
    fn naive_timestamps_are_accepted() {
        assert_eq!(format_timestamp("2025-07-27T22:58:06.871737"), "2025-07-27 22:58:06");
    }

    #[test]
    fn garbage_timestamps_pass_through() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
