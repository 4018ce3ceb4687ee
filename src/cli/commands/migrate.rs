use anyhow::Context;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::{AppConfig, StoreBackend};
use crate::database::{PgPropertyStore, PropertyStore};

pub async fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    if config.database.backend == StoreBackend::Memory {
        return output_success(output_format, "In-memory store needs no migration", None);
    }

    let store = PgPropertyStore::connect(&config.database)
        .await
        .context("failed to connect to the property database")?;
    let migrated = store.migrate().await;
    store.close().await;
    migrated.context("failed to prepare the properties schema")?;

    output_success(output_format, "Properties schema is up to date", None)
}
