use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::slug;

/// An assessment quiz and everything it owns.
///
/// This is the aggregate root: questions and answers are embedded and are
/// only ever reached, mutated and persisted through it. Question order is
/// display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Assessment {
    pub id: Uuid,
    pub text_id: String,
    pub short_url: String,
    pub name: String,
    pub description: String,
    pub call_to_action: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub result_call_to_action: Option<ResultCallToAction>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub started_count: u32,
    #[serde(default)]
    pub completed_count: u32,
    pub created: jiff::Timestamp,
    pub created_by: String,
    #[serde(default)]
    pub last_modified: Option<jiff::Timestamp>,
    #[serde(default)]
    pub last_modified_by: Option<String>,
}

/// Optional prompt shown on the results screen after completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResultCallToAction {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub copy: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    pub id: Uuid,
    pub text_id: String,
    pub display_text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub shown_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Answer {
    pub id: Uuid,
    pub text_id: String,
    pub display_text: String,
    #[serde(default)]
    pub result_description: String,
    #[serde(default)]
    pub result_image: String,
    #[serde(default)]
    pub selected_count: u32,
}

/// Outcome of looking up an answer through its parent question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerLookup<'a> {
    Found {
        question: &'a Question,
        answer: &'a Answer,
    },
    AnswerNotFound {
        question: &'a Question,
    },
    QuestionNotFound,
}

impl<'a> AnswerLookup<'a> {
    /// The question and answer pair, if both exist.
    pub fn found(self) -> Option<(&'a Question, &'a Answer)> {
        match self {
            AnswerLookup::Found { question, answer } => Some((question, answer)),
            _ => None,
        }
    }
}

impl Assessment {
    /// Set the name and regenerate the slugs derived from it.
    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        self.text_id = slug::generate(name);
        self.short_url = self.text_id.clone();
    }

    pub fn question(&self, question_id: Uuid) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn question_mut(&mut self, question_id: Uuid) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id == question_id)
    }

    /// Append a question at the end of the display order. Returns its id.
    pub fn push_question(&mut self, question: Question) -> Uuid {
        let id = question.id;
        self.questions.push(question);
        id
    }

    pub fn remove_question(&mut self, question_id: Uuid) -> Option<Question> {
        let index = self.questions.iter().position(|q| q.id == question_id)?;
        Some(self.questions.remove(index))
    }

    pub fn answer(&self, question_id: Uuid, answer_id: Uuid) -> AnswerLookup<'_> {
        match self.question(question_id) {
            None => AnswerLookup::QuestionNotFound,
            Some(question) => match question.answer(answer_id) {
                Some(answer) => AnswerLookup::Found { question, answer },
                None => AnswerLookup::AnswerNotFound { question },
            },
        }
    }

    /// Bump the shown/selected counters for an answered question.
    ///
    /// Returns `false` when the question or answer no longer exists; the
    /// counters that could be found are still updated.
    pub fn record_answer_selected(&mut self, question_id: Uuid, answer_id: Uuid) -> bool {
        let Some(question) = self.question_mut(question_id) else {
            return false;
        };
        question.shown_count = question.shown_count.saturating_add(1);
        match question.answer_mut(answer_id) {
            Some(answer) => {
                answer.selected_count = answer.selected_count.saturating_add(1);
                true
            }
            None => false,
        }
    }
}

impl Question {
    /// A fresh question with a new id and no answers.
    pub fn new(display_text: &str, description: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            text_id: slug::generate(display_text),
            display_text: display_text.to_string(),
            description: description.to_string(),
            answers: Vec::new(),
            shown_count: 0,
        }
    }

    pub fn set_display_text(&mut self, display_text: &str) {
        self.display_text = display_text.to_string();
        self.text_id = slug::generate(display_text);
    }

    pub fn answer(&self, answer_id: Uuid) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == answer_id)
    }

    pub fn answer_mut(&mut self, answer_id: Uuid) -> Option<&mut Answer> {
        self.answers.iter_mut().find(|a| a.id == answer_id)
    }

    pub fn push_answer(&mut self, answer: Answer) -> Uuid {
        let id = answer.id;
        self.answers.push(answer);
        id
    }

    pub fn remove_answer(&mut self, answer_id: Uuid) -> Option<Answer> {
        let index = self.answers.iter().position(|a| a.id == answer_id)?;
        Some(self.answers.remove(index))
    }
}

impl Answer {
    pub fn new(display_text: &str, result_description: &str, result_image: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            text_id: slug::generate(display_text),
            display_text: display_text.to_string(),
            result_description: result_description.to_string(),
            result_image: result_image.to_string(),
            selected_count: 0,
        }
    }

    pub fn set_display_text(&mut self, display_text: &str) {
        self.display_text = display_text.to_string();
        self.text_id = slug::generate(display_text);
    }
}
