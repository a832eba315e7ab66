use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use huddle_core::models::participation::{Participation, QuestionAnswered};

use crate::error::ApiError;
use crate::notify::notify_completion;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipation {
    pub email: String,
    pub assessment_id: Uuid,
    #[serde(default)]
    pub assessment_name: String,
}

/// One answered question, as posted by the client while a participant
/// works through an assessment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub question_id: Uuid,
    #[serde(default)]
    pub question_text: String,
    pub answer_id: Uuid,
    #[serde(default)]
    pub answer_text: String,
    #[serde(default)]
    pub result_description: String,
    #[serde(default)]
    pub result_image: String,
    #[serde(default)]
    pub completed: bool,
}

pub async fn create_participation(
    State(state): State<AppState>,
    Json(req): Json<NewParticipation>,
) -> Result<Json<Participation>, ApiError> {
    let participation = state
        .participations
        .create_new_participation(&req.email, req.assessment_id, &req.assessment_name)
        .await?;

    if let Err(e) = state
        .assessments
        .record_participation_started(req.assessment_id)
        .await
    {
        tracing::warn!(assessment_id = %req.assessment_id, error = %e, "failed to count participation start");
    }

    Ok(Json(participation))
}

pub async fn answer_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AnswerSubmission>,
) -> Result<Json<Participation>, ApiError> {
    let participation = state
        .participations
        .get_participation_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("participation not found: {id}")))?;

    let answered = QuestionAnswered {
        question_id: req.question_id,
        question_text: req.question_text,
        answer_id: req.answer_id,
        answer_text: req.answer_text,
        result_description: req.result_description,
        result_image: req.result_image,
    };
    let updated = state
        .participations
        .answer_question(participation, answered, req.completed)
        .await?;

    if let Err(e) = state
        .assessments
        .record_question_answered(
            updated.assessment_id,
            req.question_id,
            req.answer_id,
            req.completed,
        )
        .await
    {
        tracing::warn!(assessment_id = %updated.assessment_id, error = %e, "failed to count answer");
    }

    if req.completed {
        notify_completion(&state, &updated).await;
    }

    Ok(Json(updated))
}

pub async fn get_participation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Participation>, ApiError> {
    let participation = state
        .participations
        .get_participation_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("participation not found: {id}")))?;
    Ok(Json(participation))
}
