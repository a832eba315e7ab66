use thiserror::Error;
use uuid::Uuid;

use huddle_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("results rendering failed: {0}")]
    Render(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        ServiceError::NotFound { entity, id }
    }
}

impl From<huddle_core::error::CoreError> for ServiceError {
    fn from(e: huddle_core::error::CoreError) -> Self {
        ServiceError::Storage(StorageError::InvalidIdentifier(e))
    }
}

impl From<tera::Error> for ServiceError {
    fn from(e: tera::Error) -> Self {
        ServiceError::Render(e.to_string())
    }
}
