use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::property::{Property, PropertyInput};

/// Errors from a property store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Collection-style access to property documents.
///
/// `update_owned` and `delete_owned` only apply when the stored owner still
/// equals `owner`, so a record removed or reassigned after the handler loaded
/// it is reported as absent instead of being overwritten.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, StoreError>;

    /// Create a property owned by `owner` with a freshly assigned id
    async fn insert(&self, owner: &str, input: PropertyInput) -> Result<Property, StoreError>;

    /// Replace every editable field. Returns the stored record after the write.
    async fn update_owned(
        &self,
        id: &str,
        owner: &str,
        input: PropertyInput,
    ) -> Result<Option<Property>, StoreError>;

    /// Returns whether a record was removed
    async fn delete_owned(&self, id: &str, owner: &str) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Release pooled resources on shutdown
    async fn close(&self) {}
}

/// Fresh opaque document id
pub(crate) fn new_property_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
