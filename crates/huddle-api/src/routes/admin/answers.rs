use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use huddle_assessments::validation::validate_answer;
use huddle_core::error::parse_id;
use huddle_core::models::assessment::{Answer, AnswerLookup, Assessment};

use super::load_assessment;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerForm {
    #[serde(default)]
    pub answer_text: String,
    #[serde(default)]
    pub description: String,
    /// URL of the already-hosted result image; omitted on edit to keep the
    /// current one.
    #[serde(default)]
    pub image_url: Option<String>,
}

fn parse_answer_path(question_id: &str, answer_id: &str) -> Result<(Uuid, Uuid), ApiError> {
    Ok((
        parse_id("question", question_id)?,
        parse_id("answer", answer_id)?,
    ))
}

fn not_found(lookup: &AnswerLookup<'_>, question_id: Uuid, answer_id: Uuid) -> ApiError {
    match lookup {
        AnswerLookup::QuestionNotFound => {
            ApiError::NotFound(format!("question not found: {question_id}"))
        }
        _ => ApiError::NotFound(format!("answer not found: {answer_id}")),
    }
}

pub async fn get_answer(
    State(state): State<AppState>,
    Path((id, question_id, answer_id)): Path<(String, String, String)>,
) -> Result<Json<Answer>, ApiError> {
    let (question_id, answer_id) = parse_answer_path(&question_id, &answer_id)?;
    let assessment = load_assessment(&state, &id).await?;
    let lookup = assessment.answer(question_id, answer_id);
    let (_, answer) = lookup
        .found()
        .ok_or_else(|| not_found(&lookup, question_id, answer_id))?;
    Ok(Json(answer.clone()))
}

pub async fn create_answer(
    State(state): State<AppState>,
    Path((id, question_id)): Path<(String, String)>,
    Json(req): Json<AnswerForm>,
) -> Result<(StatusCode, Json<Assessment>), ApiError> {
    let question_id = parse_id("question", &question_id)?;
    let image_url = req.image_url.unwrap_or_default();
    let errors = validate_answer(None, &req.answer_text, &req.description, &image_url);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let assessment = load_assessment(&state, &id).await?;
    let assessment = state
        .assessments
        .add_answer_to_question(
            assessment,
            question_id,
            &req.answer_text,
            &req.description,
            &image_url,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

pub async fn update_answer(
    State(state): State<AppState>,
    Path((id, question_id, answer_id)): Path<(String, String, String)>,
    Json(req): Json<AnswerForm>,
) -> Result<Json<Assessment>, ApiError> {
    let (question_id, answer_id) = parse_answer_path(&question_id, &answer_id)?;
    let assessment = load_assessment(&state, &id).await?;

    let lookup = assessment.answer(question_id, answer_id);
    let AnswerLookup::Found { answer: existing, .. } = lookup else {
        return Err(not_found(&lookup, question_id, answer_id));
    };
    let errors = validate_answer(
        Some(existing),
        &req.answer_text,
        &req.description,
        req.image_url.as_deref().unwrap_or_default(),
    );
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let assessment = state
        .assessments
        .edit_answer_of_question_of_assessment(
            assessment,
            question_id,
            answer_id,
            &req.answer_text,
            &req.description,
            req.image_url.as_deref(),
        )
        .await?;
    Ok(Json(assessment))
}

pub async fn delete_answer(
    State(state): State<AppState>,
    Path((id, question_id, answer_id)): Path<(String, String, String)>,
) -> Result<Json<Assessment>, ApiError> {
    let (question_id, answer_id) = parse_answer_path(&question_id, &answer_id)?;
    let assessment = load_assessment(&state, &id).await?;
    let assessment = state
        .assessments
        .delete_answer_of_question_of_assessment(assessment, question_id, answer_id)
        .await?;
    Ok(Json(assessment))
}
