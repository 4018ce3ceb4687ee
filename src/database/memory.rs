use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::models::property::{Property, PropertyFields, PropertyInput};
use crate::database::store::{new_property_id, PropertyStore, StoreError};

/// In-process property collection, used by tests and `STORE_BACKEND=memory`
#[derive(Debug, Clone, Default)]
pub struct MemoryPropertyStore {
    documents: Arc<RwLock<HashMap<String, Property>>>,
}

impl MemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fully-formed record as-is, replacing any record with the same id
    pub async fn put(&self, property: Property) {
        let mut documents = self.documents.write().await;
        documents.insert(property.id.clone(), property);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PropertyStore for MemoryPropertyStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.get(id).cloned())
    }

    async fn insert(&self, owner: &str, input: PropertyInput) -> Result<Property, StoreError> {
        let fields = PropertyFields::try_from(input)?;
        let now = Utc::now();
        let property = Property {
            id: new_property_id(),
            owner: owner.to_string(),
            fields,
            images: Vec::new(),
            is_featured: false,
            created_at: now,
            updated_at: now,
        };

        self.put(property.clone()).await;
        Ok(property)
    }

    async fn update_owned(
        &self,
        id: &str,
        owner: &str,
        input: PropertyInput,
    ) -> Result<Option<Property>, StoreError> {
        let fields = PropertyFields::try_from(input)?;

        let mut documents = self.documents.write().await;
        match documents.get_mut(id) {
            Some(existing) if existing.is_owned_by(owner) => {
                existing.fields = fields;
                existing.updated_at = Utc::now();
                Ok(Some(existing.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_owned(&self, id: &str, owner: &str) -> Result<bool, StoreError> {
        let mut documents = self.documents.write().await;
        match documents.get(id) {
            Some(existing) if existing.is_owned_by(owner) => {
                documents.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
