use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::store::DocumentStore;

/// Load a JSON document. Returns `None` when the key does not exist.
pub async fn load_document<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key).await? {
        Some(body) => Ok(Some(serde_json::from_slice(&body)?)),
        None => Ok(None),
    }
}

/// Save a JSON document, replacing any previous version in full.
pub async fn save_document<T: Serialize + Sync>(
    store: &dyn DocumentStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put(key, body).await?;
    tracing::debug!(key, "document saved");
    Ok(())
}

/// Load every `.json` document under `prefix`, in key order.
pub async fn load_documents<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = store.list(prefix).await?;

    let mut documents = Vec::with_capacity(keys.len());
    for key in keys.iter().filter(|k| k.ends_with(".json")) {
        // A key listed a moment ago may have been deleted since.
        if let Some(document) = load_document(store, key).await? {
            documents.push(document);
        }
    }

    Ok(documents)
}
