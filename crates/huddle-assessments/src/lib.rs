//! huddle-assessments
//!
//! The service layer: authoring assessments (with their nested questions and
//! answers), recording participations, validation, pagination and the result
//! summaries sent to participants on completion.

pub mod assessment;
pub mod error;
pub mod pagination;
pub mod participation;
pub mod results;
pub mod validation;
