// handlers/properties/put.rs - PUT /properties/:id handler
//
// Full replace of the editable fields from a submitted form. The owner is
// never taken from the form: the update is written under the session
// identity, which the ownership check has already proven equal to the
// stored owner.

use axum::extract::{Path, State};

use crate::database::{Property, PropertyStore};
use crate::error::{ApiError, MSG_PROPERTY_MISSING, MSG_UPDATE_FAILED};
use crate::forms::{map_property_input, FormData, FormRejection};
use crate::middleware::response::Envelope;
use crate::middleware::session::{Session, SessionUser};
use crate::state::AppState;

/// Apply a submitted form to a property owned by the session user.
///
/// The body is only inspected once the requester is known to own the record,
/// so a bad body never masks a 401/404.
pub async fn update_property(
    store: &dyn PropertyStore,
    session: Option<&SessionUser>,
    id: &str,
    form: Result<FormData, FormRejection>,
) -> Result<Property, ApiError> {
    let user = super::authenticate(session)?;
    let existing = super::load(store, id, MSG_PROPERTY_MISSING, MSG_UPDATE_FAILED).await?;
    super::authorize(&existing, user)?;

    let form = form.map_err(|e| ApiError::internal(e, MSG_UPDATE_FAILED))?;
    let input = map_property_input(&form);

    let updated = store
        .update_owned(&existing.id, &user.user_id, input)
        .await
        .map_err(|e| ApiError::internal(e, MSG_UPDATE_FAILED))?
        .ok_or(ApiError::NotFound(MSG_PROPERTY_MISSING))?;

    tracing::info!(property_id = %updated.id, user_id = %user.user_id, "Property updated");
    Ok(updated)
}

/// PUT /properties/:id - the updated record as JSON
pub async fn property_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Session(session): Session,
    form: Result<FormData, FormRejection>,
) -> Result<Envelope, ApiError> {
    let updated = update_property(state.store.as_ref(), session.as_ref(), &id, form).await?;
    Ok(Envelope::ok_json(&updated))
}
