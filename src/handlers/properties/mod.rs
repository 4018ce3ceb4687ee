// handlers/properties/mod.rs - Property record endpoints
//
// Mutating requests run the same guarded sequence and stop at the first
// failing step:
//
//   Start -> Authenticated -> Loaded -> Authorized -> Applied -> Responded
//
// GET only loads. The steps live here so the verb handlers stay thin and the
// sequence can be exercised without HTTP.

pub mod delete; // DELETE /properties/:id
pub mod get; // GET /properties/:id
pub mod options; // OPTIONS /properties/:id
pub mod put; // PUT /properties/:id

pub use delete::{delete_property, property_delete};
pub use get::{property_get, show_property};
pub use options::property_options;
pub use put::{property_put, update_property};

use crate::database::{Property, PropertyStore};
use crate::error::ApiError;
use crate::middleware::session::SessionUser;

/// Start -> Authenticated
pub(crate) fn authenticate(session: Option<&SessionUser>) -> Result<&SessionUser, ApiError> {
    match session {
        Some(user) if !user.user_id.is_empty() => Ok(user),
        _ => Err(ApiError::Unauthenticated),
    }
}

/// Authenticated -> Loaded (GET enters here directly)
pub(crate) async fn load(
    store: &dyn PropertyStore,
    id: &str,
    not_found: &'static str,
    failure: &'static str,
) -> Result<Property, ApiError> {
    match store.find_by_id(id).await {
        Ok(Some(property)) => Ok(property),
        Ok(None) => {
            tracing::debug!(property_id = %id, "Property not found");
            Err(ApiError::NotFound(not_found))
        }
        Err(e) => Err(ApiError::internal(e, failure)),
    }
}

/// Loaded -> Authorized
pub(crate) fn authorize(property: &Property, user: &SessionUser) -> Result<(), ApiError> {
    if property.is_owned_by(&user.user_id) {
        Ok(())
    } else {
        tracing::warn!(
            property_id = %property.id,
            user_id = %user.user_id,
            "Rejected mutation by non-owner"
        );
        Err(ApiError::Forbidden)
    }
}
