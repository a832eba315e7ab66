//! Admin authoring endpoints.
//!
//! Each write follows the same shape: validate the submission, return every
//! field error at once (422) if it is invalid, otherwise mutate the
//! aggregate and return it.

pub mod answers;
pub mod assessments;
pub mod questions;

use huddle_core::models::assessment::Assessment;

use crate::error::ApiError;
use crate::state::AppState;

/// Load an assessment for an admin route, treating absence as 404.
async fn load_assessment(state: &AppState, id: &str) -> Result<Assessment, ApiError> {
    state
        .assessments
        .get_assessment_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("assessment not found: {id}")))
}
