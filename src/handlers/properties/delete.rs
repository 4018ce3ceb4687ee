// handlers/properties/delete.rs - DELETE /properties/:id handler

use axum::extract::{Path, State};

use crate::database::PropertyStore;
use crate::error::{ApiError, MSG_PROPERTY_NOT_FOUND, MSG_SOMETHING_WENT_WRONG};
use crate::middleware::response::Envelope;
use crate::middleware::session::{Session, SessionUser};
use crate::state::AppState;

pub const MSG_PROPERTY_DELETED: &str = "Property Deleted";

/// Remove a property on behalf of its owner
pub async fn delete_property(
    store: &dyn PropertyStore,
    session: Option<&SessionUser>,
    id: &str,
) -> Result<(), ApiError> {
    let user = super::authenticate(session)?;
    let property = super::load(store, id, MSG_PROPERTY_NOT_FOUND, MSG_SOMETHING_WENT_WRONG).await?;
    super::authorize(&property, user)?;

    let removed = store
        .delete_owned(&property.id, &user.user_id)
        .await
        .map_err(|e| ApiError::internal(e, MSG_SOMETHING_WENT_WRONG))?;

    if !removed {
        // Deleted (or reassigned) between the load and the write
        return Err(ApiError::NotFound(MSG_PROPERTY_NOT_FOUND));
    }

    tracing::info!(property_id = %property.id, user_id = %user.user_id, "Property deleted");
    Ok(())
}

/// DELETE /properties/:id - plain-text confirmation
pub async fn property_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Session(session): Session,
) -> Result<Envelope, ApiError> {
    delete_property(state.store.as_ref(), session.as_ref(), &id).await?;
    Ok(Envelope::ok_text(MSG_PROPERTY_DELETED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{MemoryPropertyStore, Property, PropertyInput};

    async fn seeded() -> (MemoryPropertyStore, Property) {
        let store = MemoryPropertyStore::new();
        let created = store.insert("u1", PropertyInput::default()).await.unwrap();
        (store, created)
    }

    #[tokio::test]
    async fn owner_deletes() {
        let (store, created) = seeded().await;
        delete_property(&store, Some(&SessionUser::new("u1")), &created.id)
            .await
            .unwrap();
        assert!(store.find_by_id(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn anonymous_is_unauthenticated_before_lookup() {
        let (store, _) = seeded().await;
        let err = delete_property(&store, None, "does-not-exist").await.unwrap_err();
        assert_eq!(err, ApiError::Unauthenticated);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_and_record_survives() {
        let (store, created) = seeded().await;
        let err = delete_property(&store, Some(&SessionUser::new("u2")), &created.id)
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Forbidden);
        assert_eq!(store.find_by_id(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let (store, _) = seeded().await;
        let err = delete_property(&store, Some(&SessionUser::new("u1")), "abc")
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::NotFound("Property Not Found"));
    }
}
