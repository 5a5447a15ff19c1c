//! Results view model: a normalized result with a risk band attached to the
//! aggregate score and to each question, all from [`classify`].
use serde::Serialize;

use crate::cache::SessionStore;
use crate::result::{normalize_value, NormalizedQuestion, NormalizedResult};
use crate::risk::{classify, RiskBand};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub number: usize,
    #[serde(flatten)]
    pub question: NormalizedQuestion,
    pub risk: RiskBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    pub candidate_name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,
    pub fraud_score: f64,
    pub risk: RiskBand,
    pub questions: Vec<QuestionView>,
}

impl ResultsView {
    pub fn from_result(result: NormalizedResult) -> Self {
        let questions = result
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, question)| QuestionView {
                number: i + 1,
                risk: classify(question.fraud_score),
                question,
            })
            .collect();

        Self {
            risk: classify(result.fraud_score),
            candidate_name: result.candidate_name,
            role: result.role,
            file_name: result.file_name,
            processed_at: result.processed_at,
            fraud_score: result.fraud_score,
            questions,
        }
    }

    /// Initialise from the session store. `None` means there is nothing to
    /// show and the user belongs back at the submission step.
    pub fn load(store: &SessionStore) -> Option<Self> {
        let raw = store.read_once()?;
        Some(Self::from_result(normalize_value(&raw)))
    }

    /// Highest band among the questions, if any.
    pub fn worst_question_band(&self) -> Option<RiskBand> {
        self.questions.iter().map(|q| q.risk).max()
    }
}
