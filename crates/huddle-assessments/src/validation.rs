//! Form validation for assessments, questions and answers.
//!
//! Each validator returns every problem it finds, in field order, so the
//! admin form can be redisplayed with all messages at once. An empty list
//! means the input is valid.

use serde::{Deserialize, Serialize};

use huddle_core::models::assessment::{Answer, Assessment};

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate the creation (`existing` is `None`) or edit of an assessment.
///
/// `image_file_name` is the uploaded image's name, or empty when no image
/// accompanies the submission. An edit may omit the image if the assessment
/// already has one.
pub fn validate_assessment(
    existing: Option<&Assessment>,
    name: &str,
    description: &str,
    call_to_action: &str,
    image_file_name: &str,
    result_cta_url: &str,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if is_blank(name) {
        errors.push(FieldError::new("name", "Please specify a name"));
    }
    if is_blank(description) {
        errors.push(FieldError::new("description", "Please specify a description"));
    }
    if is_blank(call_to_action) {
        errors.push(FieldError::new(
            "callToAction",
            "Please specify a call to action",
        ));
    }

    let has_image = existing.is_some_and(|a| !is_blank(&a.image_url));
    if !has_image && is_blank(image_file_name) {
        errors.push(FieldError::new(
            "assessmentImage",
            "Please select an image to upload",
        ));
    }

    if !result_cta_url.is_empty()
        && !result_cta_url.starts_with("http://")
        && !result_cta_url.starts_with("https://")
    {
        errors.push(FieldError::new(
            "resultCtaUrl",
            "Result CTA Url must start with either http:// or https://",
        ));
    }

    errors
}

pub fn validate_question(question_text: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if is_blank(question_text) {
        errors.push(FieldError::new(
            "displayText",
            "Please specify the question text",
        ));
    }
    errors
}

/// Validate the creation (`existing` is `None`) or edit of an answer.
pub fn validate_answer(
    existing: Option<&Answer>,
    answer_text: &str,
    description: &str,
    image_file_name: &str,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if is_blank(answer_text) {
        errors.push(FieldError::new("displayText", "Please specify the answer text"));
    }
    if is_blank(description) {
        errors.push(FieldError::new(
            "description",
            "Please specify a description for the results screen",
        ));
    }

    let has_image = existing.is_some_and(|a| !is_blank(&a.result_image));
    if !has_image && is_blank(image_file_name) {
        errors.push(FieldError::new(
            "answerImage",
            "Please select an image to upload",
        ));
    }

    errors
}
