use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use huddle_assessments::assessment::{AssessmentEdit, NewAssessment};
use huddle_assessments::pagination::paginate;
use huddle_assessments::validation::validate_assessment;
use huddle_core::models::assessment::Assessment;

use super::load_assessment;
use crate::error::ApiError;
use crate::middleware::acting_user::ActingUser;
use crate::state::AppState;

/// The admin assessment list, split into pages of the configured size.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPages {
    pub page_size: usize,
    pub pages: Vec<Vec<Assessment>>,
}

pub async fn list_assessments(
    State(state): State<AppState>,
) -> Result<Json<AssessmentPages>, ApiError> {
    let assessments = state.assessments.get_all_assessments().await?;
    let page_size = state.config.assessment_admin_list_page_size;
    Ok(Json(AssessmentPages {
        page_size,
        pages: paginate(&assessments, page_size),
    }))
}

pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Assessment>, ApiError> {
    Ok(Json(load_assessment(&state, &id).await?))
}

pub async fn create_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<ActingUser>,
    Json(req): Json<NewAssessment>,
) -> Result<(StatusCode, Json<Assessment>), ApiError> {
    let errors = validate_assessment(
        None,
        &req.name,
        &req.description,
        &req.call_to_action,
        &req.image_url,
        &req.result_call_to_action.url,
    );
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let assessment = state.assessments.create_new_assessment(req, &user.id).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

pub async fn update_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<ActingUser>,
    Path(id): Path<String>,
    Json(req): Json<AssessmentEdit>,
) -> Result<Json<Assessment>, ApiError> {
    let existing = load_assessment(&state, &id).await?;

    let errors = validate_assessment(
        Some(&existing),
        &req.name,
        &req.description,
        &req.call_to_action,
        req.image_url.as_deref().unwrap_or_default(),
        &req.result_call_to_action.url,
    );
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let assessment = state
        .assessments
        .edit_assessment(existing, req, &user.id)
        .await?;
    Ok(Json(assessment))
}

pub async fn delete_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Assessment>, ApiError> {
    let removed = state
        .assessments
        .delete_assessment(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("assessment not found: {id}")))?;
    Ok(Json(removed))
}
