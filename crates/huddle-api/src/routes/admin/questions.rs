use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use huddle_assessments::validation::validate_question;
use huddle_core::error::parse_id;
use huddle_core::models::assessment::{Assessment, Question};

use super::load_assessment;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionForm {
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub description: String,
}

pub async fn get_question(
    State(state): State<AppState>,
    Path((id, question_id)): Path<(String, String)>,
) -> Result<Json<Question>, ApiError> {
    let question_id = parse_id("question", &question_id)?;
    let assessment = load_assessment(&state, &id).await?;
    let question = assessment
        .question(question_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("question not found: {question_id}")))?;
    Ok(Json(question))
}

pub async fn create_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<QuestionForm>,
) -> Result<(StatusCode, Json<Assessment>), ApiError> {
    let errors = validate_question(&req.question_text);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let assessment = load_assessment(&state, &id).await?;
    let assessment = state
        .assessments
        .add_question_to_assessment(assessment, &req.question_text, &req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

pub async fn update_question(
    State(state): State<AppState>,
    Path((id, question_id)): Path<(String, String)>,
    Json(req): Json<QuestionForm>,
) -> Result<Json<Assessment>, ApiError> {
    let question_id = parse_id("question", &question_id)?;
    let errors = validate_question(&req.question_text);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let assessment = load_assessment(&state, &id).await?;
    let assessment = state
        .assessments
        .edit_question_of_assessment(assessment, question_id, &req.question_text, &req.description)
        .await?;
    Ok(Json(assessment))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path((id, question_id)): Path<(String, String)>,
) -> Result<Json<Assessment>, ApiError> {
    let question_id = parse_id("question", &question_id)?;
    let assessment = load_assessment(&state, &id).await?;
    let assessment = state
        .assessments
        .delete_question_of_assessment(assessment, question_id)
        .await?;
    Ok(Json(assessment))
}
