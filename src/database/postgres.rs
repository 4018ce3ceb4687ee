use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::models::property::{Property, PropertyFields, PropertyInput};
use crate::database::store::{new_property_id, PropertyStore, StoreError};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS properties (
        id          TEXT PRIMARY KEY,
        owner       TEXT NOT NULL,
        document    JSONB NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const OWNER_INDEX: &str = "CREATE INDEX IF NOT EXISTS properties_owner_idx ON properties (owner)";

/// JSONB payload of a property row. Editable fields are top-level keys so
/// an update can merge over them without disturbing `images`/`is_featured`.
#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument {
    #[serde(flatten)]
    fields: PropertyFields,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    is_featured: bool,
}

#[derive(Debug, FromRow)]
struct PropertyRow {
    id: String,
    owner: String,
    document: Json<StoredDocument>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        let Json(document) = row.document;
        Property {
            id: row.id,
            owner: row.owner,
            fields: document.fields,
            images: document.images,
            is_featured: document.is_featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL-backed property collection. One pool per process.
#[derive(Debug, Clone)]
pub struct PgPropertyStore {
    pool: PgPool,
}

impl PgPropertyStore {
    /// Open the connection pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "Created database pool for properties"
        );
        Ok(Self { pool })
    }

    /// Create the properties table and its indexes if absent
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        sqlx::query(OWNER_INDEX).execute(&self.pool).await?;
        info!("Properties schema is up to date");
        Ok(())
    }
}

#[async_trait]
impl PropertyStore for PgPropertyStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, StoreError> {
        let row = sqlx::query_as::<_, PropertyRow>(
            "SELECT id, owner, document, created_at, updated_at
             FROM properties
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Property::from))
    }

    async fn insert(&self, owner: &str, input: PropertyInput) -> Result<Property, StoreError> {
        let document = StoredDocument {
            fields: PropertyFields::try_from(input)?,
            images: Vec::new(),
            is_featured: false,
        };

        let row = sqlx::query_as::<_, PropertyRow>(
            "INSERT INTO properties (id, owner, document)
             VALUES ($1, $2, $3)
             RETURNING id, owner, document, created_at, updated_at",
        )
        .bind(new_property_id())
        .bind(owner)
        .bind(Json(&document))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_owned(
        &self,
        id: &str,
        owner: &str,
        input: PropertyInput,
    ) -> Result<Option<Property>, StoreError> {
        let fields = serde_json::to_value(PropertyFields::try_from(input)?)?;

        let row = sqlx::query_as::<_, PropertyRow>(
            "UPDATE properties
             SET document = document || $3, updated_at = now()
             WHERE id = $1 AND owner = $2
             RETURNING id, owner, document, created_at, updated_at",
        )
        .bind(id)
        .bind(owner)
        .bind(Json(fields))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Property::from))
    }

    async fn delete_owned(&self, id: &str, owner: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1 AND owner = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool for properties");
    }
}
