//! Shared application state.

use std::sync::Arc;

use smartkart_core::WeightValidator;
use smartkart_store::{CatalogProvider, SessionHandle, SessionStore};

use crate::session::SessionId;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Read-only product catalog
    pub catalog: Arc<dyn CatalogProvider>,

    /// Per-shopper carts and invoices
    pub sessions: Arc<dyn SessionStore>,

    /// Weight check applied to every scan
    pub validator: WeightValidator,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        sessions: Arc<dyn SessionStore>,
        validator: WeightValidator,
    ) -> Self {
        AppState {
            catalog,
            sessions,
            validator,
        }
    }

    /// The session for `id`, created on first use.
    pub fn session(&self, id: &SessionId) -> SessionHandle {
        self.sessions.session(id.as_str())
    }

    /// The session for `id` if one was already created.
    pub fn existing_session(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.find(id.as_str())
    }
}
