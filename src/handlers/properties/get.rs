// handlers/properties/get.rs - GET /properties/:id handler

use axum::extract::{Path, State};

use crate::database::{Property, PropertyStore};
use crate::error::{ApiError, MSG_PROPERTY_NOT_FOUND, MSG_SOMETHING_WENT_WRONG};
use crate::middleware::response::Envelope;
use crate::state::AppState;

/// Load a property for display. No session or ownership check.
pub async fn show_property(store: &dyn PropertyStore, id: &str) -> Result<Property, ApiError> {
    super::load(store, id, MSG_PROPERTY_NOT_FOUND, MSG_SOMETHING_WENT_WRONG).await
}

/// GET /properties/:id - the stored record as JSON
pub async fn property_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope, ApiError> {
    let property = show_property(state.store.as_ref(), &id).await?;
    Ok(Envelope::ok_json(&property))
}
