use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// One participant's journey through an assessment.
///
/// Independent of the assessment document: the assessment name and every
/// answered question are copied in at the time they happen, so later edits
/// to the assessment never rewrite a participant's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Participation {
    pub id: Uuid,
    pub email: String,
    pub started: jiff::Timestamp,
    #[serde(default)]
    pub completed: bool,
    pub assessment_id: Uuid,
    pub assessment_name: String,
    #[serde(default)]
    pub questions_answered: Vec<QuestionAnswered>,
}

/// Snapshot of a question and the answer chosen for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuestionAnswered {
    pub question_id: Uuid,
    pub question_text: String,
    pub answer_id: Uuid,
    pub answer_text: String,
    #[serde(default)]
    pub result_description: String,
    #[serde(default)]
    pub result_image: String,
}

impl Participation {
    pub fn new(
        email: &str,
        assessment_id: Uuid,
        assessment_name: &str,
        started: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            started,
            completed: false,
            assessment_id,
            assessment_name: assessment_name.to_string(),
            questions_answered: Vec::new(),
        }
    }

    /// Append an answered question. A participation never goes back from
    /// completed to in progress.
    pub fn record_answer(&mut self, answered: QuestionAnswered, completed: bool) {
        self.questions_answered.push(answered);
        if completed {
            self.completed = true;
        }
    }
}
