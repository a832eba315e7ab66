//! Read-only assessment endpoints for the participation client.

use axum::extract::{Path, State};
use axum::Json;

use huddle_core::models::assessment::Assessment;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_assessments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Assessment>>, ApiError> {
    let assessments = state.assessments.get_all_assessments().await?;
    Ok(Json(assessments))
}

pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Assessment>, ApiError> {
    let assessment = state
        .assessments
        .get_assessment_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("assessment not found: {id}")))?;
    Ok(Json(assessment))
}
