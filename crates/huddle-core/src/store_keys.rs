//! Document key conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the
//! canonical layout of documents in the bucket: one JSON object per
//! aggregate root, nested questions and answers live inside their
//! assessment's document.

use uuid::Uuid;

pub const ASSESSMENTS_PREFIX: &str = "assessments/";

pub const PARTICIPATIONS_PREFIX: &str = "participations/";

pub fn assessment(id: Uuid) -> String {
    format!("{ASSESSMENTS_PREFIX}{id}.json")
}

pub fn participation(id: Uuid) -> String {
    format!("{PARTICIPATIONS_PREFIX}{id}.json")
}
