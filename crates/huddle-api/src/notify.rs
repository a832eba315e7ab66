use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use huddle_core::models::participation::Participation;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
    PlainText,
    Html,
}

/// Everything the outside world needs to know about a completed
/// participation: who to thank, what to send them, and who else to tell.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionNotice {
    pub participation_id: Uuid,
    pub email: String,
    pub assessment_name: String,
    pub permalink: String,
    pub thanks_body: String,
    pub body_format: BodyFormat,
    /// Set when admins asked to be told about every completion.
    pub admin_address: Option<String>,
}

/// Delivery of completion notices (participant email, admin email, alert
/// channel, results spreadsheet). Delivery is best-effort: implementations
/// log their own failures and never retry.
#[async_trait]
pub trait CompletionNotifier: Send + Sync {
    async fn participation_completed(&self, notice: CompletionNotice);
}

/// Notifier that records each notice in the structured log.
pub struct TracingNotifier;

#[async_trait]
impl CompletionNotifier for TracingNotifier {
    async fn participation_completed(&self, notice: CompletionNotice) {
        tracing::info!(
            participation_id = %notice.participation_id,
            email = %notice.email,
            assessment = %notice.assessment_name,
            permalink = %notice.permalink,
            admin_address = notice.admin_address.as_deref().unwrap_or("-"),
            body_bytes = notice.thanks_body.len(),
            "participation_completed"
        );
    }
}

/// Build the completion notice for `participation` and deliver it.
///
/// Must complete before the response is sent; the Lambda sandbox is frozen
/// once a response is posted. Failures are logged and swallowed.
pub async fn notify_completion(state: &AppState, participation: &Participation) {
    match build_notice(state, participation).await {
        Ok(notice) => state.notifier.participation_completed(notice).await,
        Err(e) => tracing::warn!(
            participation_id = %participation.id,
            error = %e,
            "failed to build completion notice"
        ),
    }
}

async fn build_notice(
    state: &AppState,
    participation: &Participation,
) -> Result<CompletionNotice, huddle_assessments::error::ServiceError> {
    // The assessment may have been deleted since; the participation's own
    // snapshot is enough to thank the participant.
    let assessment = match state
        .assessments
        .get_assessment_by_id(&participation.assessment_id.to_string())
        .await
    {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(assessment_id = %participation.assessment_id, error = %e, "assessment lookup failed");
            None
        }
    };

    let (thanks_body, body_format) = if state.config.completed_assessment_html_emails {
        (
            state.participations.html_results(participation, assessment.as_ref())?,
            BodyFormat::Html,
        )
    } else {
        (
            state.participations.plain_text_results(participation, assessment.as_ref())?,
            BodyFormat::PlainText,
        )
    };

    let admin_address = state
        .config
        .send_emails_to_admins_on_completed_assessment
        .then(|| state.config.completed_assessment_address.clone())
        .filter(|address| !address.is_empty());

    Ok(CompletionNotice {
        participation_id: participation.id,
        email: participation.email.clone(),
        assessment_name: participation.assessment_name.clone(),
        permalink: state.participations.participation_permalink(participation.id),
        thanks_body,
        body_format,
        admin_address,
    })
}
