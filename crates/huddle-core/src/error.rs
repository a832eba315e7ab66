use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {entity} id '{value}': {source}")]
    InvalidId {
        entity: &'static str,
        value: String,
        #[source]
        source: uuid::Error,
    },
}

/// Parse a document identifier supplied as text (path segment, form field).
pub fn parse_id(entity: &'static str, value: &str) -> Result<uuid::Uuid, CoreError> {
    uuid::Uuid::parse_str(value.trim()).map_err(|source| CoreError::InvalidId {
        entity,
        value: value.to_string(),
        source,
    })
}
