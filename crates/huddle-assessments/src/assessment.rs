use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use huddle_core::error::parse_id;
use huddle_core::models::assessment::{Answer, Assessment, Question, ResultCallToAction};
use huddle_core::store_keys;
use huddle_storage::documents::{load_document, load_documents, save_document};
use huddle_storage::store::DocumentStore;

use crate::error::ServiceError;

/// Input for creating an assessment. Assumed already validated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssessment {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub call_to_action: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub result_call_to_action: ResultCallToAction,
}

/// Input for editing an assessment. A missing or blank `image_url` keeps
/// the current image.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentEdit {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub call_to_action: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub result_call_to_action: ResultCallToAction,
}

/// Reads and writes of assessment aggregates.
///
/// Every mutation works on an owned aggregate, applies the change through
/// the aggregate's own methods and then saves the whole document. The saved
/// aggregate is handed back to the caller.
#[derive(Clone)]
pub struct AssessmentService {
    store: Arc<dyn DocumentStore>,
}

impl AssessmentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All assessments, sorted by name (case-sensitive, ascending).
    pub async fn get_all_assessments(&self) -> Result<Vec<Assessment>, ServiceError> {
        let mut assessments: Vec<Assessment> =
            load_documents(self.store.as_ref(), store_keys::ASSESSMENTS_PREFIX).await?;
        assessments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(assessments)
    }

    /// Fetch an assessment by its textual id. A malformed id is a storage
    /// error; a well-formed id with no document is `None`.
    pub async fn get_assessment_by_id(&self, id: &str) -> Result<Option<Assessment>, ServiceError> {
        let id = parse_id("assessment", id)?;
        self.find(id).await
    }

    async fn find(&self, id: Uuid) -> Result<Option<Assessment>, ServiceError> {
        Ok(load_document(self.store.as_ref(), &store_keys::assessment(id)).await?)
    }

    async fn save(&self, assessment: &Assessment) -> Result<(), ServiceError> {
        save_document(
            self.store.as_ref(),
            &store_keys::assessment(assessment.id),
            assessment,
        )
        .await?;
        Ok(())
    }

    pub async fn create_new_assessment(
        &self,
        new: NewAssessment,
        user_id: &str,
    ) -> Result<Assessment, ServiceError> {
        let mut assessment = Assessment {
            id: Uuid::new_v4(),
            text_id: String::new(),
            short_url: String::new(),
            name: String::new(),
            description: new.description,
            call_to_action: new.call_to_action,
            image_url: new.image_url,
            result_call_to_action: Some(new.result_call_to_action),
            questions: Vec::new(),
            started_count: 0,
            completed_count: 0,
            created: jiff::Timestamp::now(),
            created_by: user_id.to_string(),
            last_modified: None,
            last_modified_by: None,
        };
        assessment.rename(&new.name);

        self.save(&assessment).await?;
        info!(assessment_id = %assessment.id, user_id, "assessment created");
        Ok(assessment)
    }

    pub async fn edit_assessment(
        &self,
        mut assessment: Assessment,
        edit: AssessmentEdit,
        user_id: &str,
    ) -> Result<Assessment, ServiceError> {
        assessment.rename(&edit.name);
        assessment.description = edit.description;
        assessment.call_to_action = edit.call_to_action;
        if let Some(image_url) = edit.image_url.filter(|url| !url.trim().is_empty()) {
            assessment.image_url = image_url;
        }
        assessment.last_modified = Some(jiff::Timestamp::now());
        assessment.last_modified_by = Some(user_id.to_string());

        let cta = edit.result_call_to_action;
        match assessment.result_call_to_action.as_mut() {
            Some(existing) => {
                existing.heading = cta.heading;
                existing.copy = cta.copy;
                existing.button_text = cta.button_text;
                existing.url = cta.url;
            }
            None => assessment.result_call_to_action = Some(cta),
        }

        self.save(&assessment).await?;
        info!(assessment_id = %assessment.id, user_id, "assessment edited");
        Ok(assessment)
    }

    /// Delete an assessment and everything nested in it. Returns the removed
    /// document, or `None` if there was nothing to delete.
    pub async fn delete_assessment(&self, id: &str) -> Result<Option<Assessment>, ServiceError> {
        let id = parse_id("assessment", id)?;
        let Some(assessment) = self.find(id).await? else {
            return Ok(None);
        };

        self.store.delete(&store_keys::assessment(id)).await?;
        info!(assessment_id = %id, "assessment deleted");
        Ok(Some(assessment))
    }

    pub async fn add_question_to_assessment(
        &self,
        mut assessment: Assessment,
        question_text: &str,
        description: &str,
    ) -> Result<Assessment, ServiceError> {
        let question_id = assessment.push_question(Question::new(question_text, description));
        self.save(&assessment).await?;
        info!(assessment_id = %assessment.id, %question_id, "question added");
        Ok(assessment)
    }

    pub async fn edit_question_of_assessment(
        &self,
        mut assessment: Assessment,
        question_id: Uuid,
        question_text: &str,
        description: &str,
    ) -> Result<Assessment, ServiceError> {
        let question = assessment
            .question_mut(question_id)
            .ok_or_else(|| ServiceError::not_found("question", question_id))?;
        question.set_display_text(question_text);
        question.description = description.to_string();

        self.save(&assessment).await?;
        Ok(assessment)
    }

    pub async fn delete_question_of_assessment(
        &self,
        mut assessment: Assessment,
        question_id: Uuid,
    ) -> Result<Assessment, ServiceError> {
        assessment
            .remove_question(question_id)
            .ok_or_else(|| ServiceError::not_found("question", question_id))?;

        self.save(&assessment).await?;
        info!(assessment_id = %assessment.id, %question_id, "question deleted");
        Ok(assessment)
    }

    pub async fn add_answer_to_question(
        &self,
        mut assessment: Assessment,
        question_id: Uuid,
        answer_text: &str,
        description: &str,
        image_url: &str,
    ) -> Result<Assessment, ServiceError> {
        let question = assessment
            .question_mut(question_id)
            .ok_or_else(|| ServiceError::not_found("question", question_id))?;
        let answer_id = question.push_answer(Answer::new(answer_text, description, image_url));

        self.save(&assessment).await?;
        info!(assessment_id = %assessment.id, %question_id, %answer_id, "answer added");
        Ok(assessment)
    }

    pub async fn edit_answer_of_question_of_assessment(
        &self,
        mut assessment: Assessment,
        question_id: Uuid,
        answer_id: Uuid,
        answer_text: &str,
        description: &str,
        image_url: Option<&str>,
    ) -> Result<Assessment, ServiceError> {
        let answer = assessment
            .question_mut(question_id)
            .ok_or_else(|| ServiceError::not_found("question", question_id))?
            .answer_mut(answer_id)
            .ok_or_else(|| ServiceError::not_found("answer", answer_id))?;
        answer.set_display_text(answer_text);
        answer.result_description = description.to_string();
        if let Some(image_url) = image_url.filter(|url| !url.trim().is_empty()) {
            answer.result_image = image_url.to_string();
        }

        self.save(&assessment).await?;
        Ok(assessment)
    }

    pub async fn delete_answer_of_question_of_assessment(
        &self,
        mut assessment: Assessment,
        question_id: Uuid,
        answer_id: Uuid,
    ) -> Result<Assessment, ServiceError> {
        assessment
            .question_mut(question_id)
            .ok_or_else(|| ServiceError::not_found("question", question_id))?
            .remove_answer(answer_id)
            .ok_or_else(|| ServiceError::not_found("answer", answer_id))?;

        self.save(&assessment).await?;
        info!(assessment_id = %assessment.id, %question_id, %answer_id, "answer deleted");
        Ok(assessment)
    }

    /// Count a participant starting the assessment.
    ///
    /// Load-modify-save with no locking: concurrent participants can lose
    /// increments. Callers treat failures as non-fatal.
    pub async fn record_participation_started(&self, assessment_id: Uuid) -> Result<(), ServiceError> {
        let mut assessment = self
            .find(assessment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("assessment", assessment_id))?;
        assessment.started_count = assessment.started_count.saturating_add(1);
        self.save(&assessment).await
    }

    /// Count a question being answered, and the assessment being completed
    /// when `completed` is set. Same consistency caveats as
    /// [`Self::record_participation_started`].
    pub async fn record_question_answered(
        &self,
        assessment_id: Uuid,
        question_id: Uuid,
        answer_id: Uuid,
        completed: bool,
    ) -> Result<(), ServiceError> {
        let mut assessment = self
            .find(assessment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("assessment", assessment_id))?;

        if !assessment.record_answer_selected(question_id, answer_id) {
            tracing::debug!(%assessment_id, %question_id, %answer_id, "answered question no longer in assessment");
        }
        if completed {
            assessment.completed_count = assessment.completed_count.saturating_add(1);
        }
        self.save(&assessment).await
    }
}
