//! Decoding of stored analysis payloads.
//!
//! Two payload generations exist: the legacy quality-score shape
//! (`candidateName`, `final_score`) and the fraud-score shape returned by the
//! current analysis service (`candidate`, `final_fraud_score`, `questions`).
//! Decoding never fails; a field with the wrong JSON type is read as absent.
use serde_json::{Map, Value};

/// Aggregate score as found in the payload, tagged by its scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScoreSource {
    /// `final_fraud_score`: higher means more suspicious.
    Fraud(f64),
    /// Legacy `final_score`: higher means better quality.
    Quality(f64),
    #[default]
    Absent,
}

/// Which historical payload shape a raw result resembles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadVariant {
    Current,
    Legacy,
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawInsights {
    pub reading_aloud: bool,
    pub external_help: bool,
    pub scripted_content: bool,
    pub confidence_level: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub fraud_score: Option<f64>,
    pub insights: RawInsights,
}

/// Untrusted result payload after the decode step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawResult {
    pub candidate: Option<String>,
    pub candidate_name: Option<String>,
    pub role: Option<String>,
    pub score: ScoreSource,
    pub questions: Option<Vec<RawQuestion>>,
    pub file_name: Option<String>,
    pub processed_at: Option<String>,
}

impl RawResult {
    /// Decode any JSON value. Non-object input decodes to the empty result.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            tracing::debug!("stored result is not a JSON object; using empty result");
            return Self::default();
        };

        // final_fraud_score wins over the legacy quality score when both exist
        let score = match (number(obj, "final_fraud_score"), number(obj, "final_score")) {
            (Some(fraud), _) => ScoreSource::Fraud(fraud),
            (None, Some(quality)) => ScoreSource::Quality(quality),
            (None, None) => ScoreSource::Absent,
        };

        let questions = obj.get("questions").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(|item| match item.as_object() {
                    Some(q) => Some(RawQuestion::from_object(q)),
                    None => {
                        tracing::debug!("skipping non-object question entry");
                        None
                    }
                })
                .collect()
        });

        Self {
            candidate: string(obj, "candidate"),
            candidate_name: string(obj, "candidateName"),
            role: string(obj, "role"),
            score,
            questions,
            file_name: string(obj, "fileName"),
            processed_at: string(obj, "processedAt"),
        }
    }

    pub fn variant(&self) -> PayloadVariant {
        match self.score {
            ScoreSource::Fraud(_) => PayloadVariant::Current,
            ScoreSource::Quality(_) => PayloadVariant::Legacy,
            ScoreSource::Absent => PayloadVariant::Unrecognized,
        }
    }
}

impl RawQuestion {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let insights = obj
            .get("insights")
            .and_then(Value::as_object)
            .map(|ins| RawInsights {
                reading_aloud: flag(ins, "reading_aloud"),
                external_help: flag(ins, "external_help"),
                scripted_content: flag(ins, "scripted_content"),
                confidence_level: string(ins, "confidence_level"),
                details: string(ins, "details"),
            })
            .unwrap_or_default();

        Self {
            question: string(obj, "question"),
            answer: string(obj, "answer"),
            fraud_score: number(obj, "fraud_score"),
            insights,
        }
    }
}

fn string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}
