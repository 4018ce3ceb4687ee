use std::sync::Arc;

use crate::database::PropertyStore;
use crate::middleware::session::SessionResolver;

/// Collaborators injected into every handler. Built once at startup; the
/// store handle is shared, not re-acquired per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PropertyStore>,
    pub sessions: Arc<dyn SessionResolver>,
}

impl AppState {
    pub fn new(store: Arc<dyn PropertyStore>, sessions: Arc<dyn SessionResolver>) -> Self {
        Self { store, sessions }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
