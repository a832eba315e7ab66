use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use huddle_core::error::parse_id;
use huddle_core::models::assessment::Assessment;
use huddle_core::models::participation::{Participation, QuestionAnswered};
use huddle_core::store_keys;
use huddle_storage::documents::{load_document, save_document};
use huddle_storage::store::DocumentStore;

use crate::error::ServiceError;
use crate::results::{render_results, ResultsFormat};

/// Records participants' journeys through assessments.
#[derive(Clone)]
pub struct ParticipationService {
    store: Arc<dyn DocumentStore>,
    root_url: String,
}

impl ParticipationService {
    /// `root_url` is the public base URL used to build result permalinks.
    pub fn new(store: Arc<dyn DocumentStore>, root_url: impl Into<String>) -> Self {
        Self {
            store,
            root_url: root_url.into(),
        }
    }

    async fn save(&self, participation: &Participation) -> Result<(), ServiceError> {
        save_document(
            self.store.as_ref(),
            &store_keys::participation(participation.id),
            participation,
        )
        .await?;
        Ok(())
    }

    pub async fn create_new_participation(
        &self,
        email: &str,
        assessment_id: Uuid,
        assessment_name: &str,
    ) -> Result<Participation, ServiceError> {
        let participation =
            Participation::new(email, assessment_id, assessment_name, jiff::Timestamp::now());
        self.save(&participation).await?;
        info!(participation_id = %participation.id, %assessment_id, "participation started");
        Ok(participation)
    }

    /// Append an answered question and persist. Marks the participation
    /// completed when `completed` is set.
    pub async fn answer_question(
        &self,
        mut participation: Participation,
        answered: QuestionAnswered,
        completed: bool,
    ) -> Result<Participation, ServiceError> {
        participation.record_answer(answered, completed);
        self.save(&participation).await?;
        if completed {
            info!(participation_id = %participation.id, "participation completed");
        }
        Ok(participation)
    }

    pub async fn get_participation_by_id(
        &self,
        id: &str,
    ) -> Result<Option<Participation>, ServiceError> {
        let id = parse_id("participation", id)?;
        Ok(load_document(self.store.as_ref(), &store_keys::participation(id)).await?)
    }

    /// Public link a participant can use to revisit their results.
    pub fn participation_permalink(&self, id: Uuid) -> String {
        format!("{}/participation/{id}", self.root_url.trim_end_matches('/'))
    }

    pub fn plain_text_results(
        &self,
        participation: &Participation,
        assessment: Option<&Assessment>,
    ) -> Result<String, ServiceError> {
        let permalink = self.participation_permalink(participation.id);
        render_results(ResultsFormat::PlainText, participation, assessment, &permalink)
    }

    pub fn html_results(
        &self,
        participation: &Participation,
        assessment: Option<&Assessment>,
    ) -> Result<String, ServiceError> {
        let permalink = self.participation_permalink(participation.id);
        render_results(ResultsFormat::Html, participation, assessment, &permalink)
    }
}
