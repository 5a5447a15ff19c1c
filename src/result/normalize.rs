//! Canonical view model for an analysis result.
//!
//! Every fallback rule for missing or legacy fields lives here so that render
//! sites never re-derive defaults on their own.
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::raw::{RawQuestion, RawResult, ScoreSource};

/// Upper bound of the 0-100 score scale; legacy quality scores are mirrored on it.
pub const SCORE_SCALE_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low confidence",
            Self::Medium => "Medium confidence",
            Self::High => "High confidence",
        }
    }
}

/// The fixed set of boolean fraud signals reported per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    #[serde(rename = "Reading Aloud")]
    ReadingAloud,
    #[serde(rename = "External Help")]
    ExternalHelp,
    #[serde(rename = "Scripted Content")]
    ScriptedContent,
}

impl IndicatorKind {
    /// Display order of indicators in every question.
    pub const ALL: [IndicatorKind; 3] = [
        IndicatorKind::ReadingAloud,
        IndicatorKind::ExternalHelp,
        IndicatorKind::ScriptedContent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ReadingAloud => "Reading Aloud",
            Self::ExternalHelp => "External Help",
            Self::ScriptedContent => "Scripted Content",
        }
    }

    fn wire_key(&self) -> &'static str {
        match self {
            Self::ReadingAloud => "reading_aloud",
            Self::ExternalHelp => "external_help",
            Self::ScriptedContent => "scripted_content",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub name: IndicatorKind,
    pub detected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuestion {
    pub question: String,
    pub answer: String,
    pub fraud_score: f64,
    pub indicators: Vec<Indicator>,
    pub confidence_level: ConfidenceLevel,
    pub details: String,
}

impl NormalizedQuestion {
    pub fn detected_indicators(&self) -> impl Iterator<Item = IndicatorKind> + '_ {
        self.indicators.iter().filter(|i| i.detected).map(|i| i.name)
    }

    fn is_detected(&self, kind: IndicatorKind) -> bool {
        self.indicators.iter().any(|i| i.name == kind && i.detected)
    }
}

/// Canonical result. `fraud_score` is always on the "higher = more suspicious" scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub candidate_name: String,
    pub role: String,
    pub fraud_score: f64,
    pub questions: Vec<NormalizedQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,
}

impl NormalizedResult {
    /// Serialize back to the persisted (current-variant) payload shape.
    pub fn to_raw_value(&self) -> Value {
        let questions: Vec<Value> = self
            .questions
            .iter()
            .map(|q| {
                let mut insights = Map::new();
                for kind in IndicatorKind::ALL {
                    insights.insert(kind.wire_key().to_string(), Value::Bool(q.is_detected(kind)));
                }
                insights.insert("confidence_level".into(), json!(q.confidence_level.as_str()));
                insights.insert("details".into(), json!(q.details));
                json!({
                    "question": q.question,
                    "answer": q.answer,
                    "fraud_score": q.fraud_score,
                    "insights": insights,
                })
            })
            .collect();

        let mut out = Map::new();
        out.insert("candidate".into(), json!(self.candidate_name));
        out.insert("role".into(), json!(self.role));
        out.insert("final_fraud_score".into(), json!(self.fraud_score));
        out.insert("questions".into(), Value::Array(questions));
        if let Some(name) = &self.file_name {
            out.insert("fileName".into(), json!(name));
        }
        if let Some(at) = &self.processed_at {
            out.insert("processedAt".into(), json!(at));
        }
        Value::Object(out)
    }
}

/// Derive the canonical result from a decoded payload. Total and deterministic.
pub fn normalize(raw: &RawResult) -> NormalizedResult {
    let (fraud_score, questions) = match raw.score {
        ScoreSource::Fraud(score) => (score, normalize_questions(raw)),
        ScoreSource::Quality(quality) => (SCORE_SCALE_MAX - quality, normalize_questions(raw)),
        ScoreSource::Absent => {
            tracing::debug!("result carries no aggregate score; rendering empty state");
            (0.0, Vec::new())
        }
    };

    let candidate_name = raw
        .candidate
        .clone()
        .or_else(|| raw.candidate_name.clone())
        .unwrap_or_default();

    NormalizedResult {
        candidate_name,
        role: raw.role.clone().unwrap_or_default(),
        fraud_score,
        questions,
        file_name: raw.file_name.clone(),
        processed_at: raw.processed_at.clone(),
    }
}

/// Decode and normalize in one step.
pub fn normalize_value(value: &Value) -> NormalizedResult {
    normalize(&RawResult::from_value(value))
}

fn normalize_questions(raw: &RawResult) -> Vec<NormalizedQuestion> {
    raw.questions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(normalize_question)
        .collect()
}

fn normalize_question(q: &RawQuestion) -> NormalizedQuestion {
    let ins = &q.insights;
    let indicators = IndicatorKind::ALL
        .iter()
        .map(|&kind| Indicator {
            name: kind,
            detected: match kind {
                IndicatorKind::ReadingAloud => ins.reading_aloud,
                IndicatorKind::ExternalHelp => ins.external_help,
                IndicatorKind::ScriptedContent => ins.scripted_content,
            },
        })
        .collect();

    NormalizedQuestion {
        question: q.question.clone().unwrap_or_default(),
        answer: q.answer.clone().unwrap_or_default(),
        fraud_score: q.fraud_score.unwrap_or(0.0),
        indicators,
        confidence_level: ins
            .confidence_level
            .as_deref()
            .and_then(ConfidenceLevel::parse)
            .unwrap_or(ConfidenceLevel::Low),
        details: ins.details.clone().unwrap_or_default(),
    }
}
