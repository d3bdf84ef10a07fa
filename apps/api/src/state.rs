use std::sync::Arc;

use tokio::sync::Mutex;

use crate::editor::actions::{missing_target, reduce, Action};
use crate::editor::session::Session;
use crate::errors::AppError;
use crate::export::pipeline::ExportPipeline;
use crate::storage::persistence;
use crate::storage::KeyValueStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single editor session. Every mutation goes through `dispatch`.
    pub session: Arc<Mutex<Session>>,
    pub store: Arc<dyn KeyValueStore>,
    pub export: Arc<ExportPipeline>,
}

impl AppState {
    pub fn new(
        session: Session,
        store: Arc<dyn KeyValueStore>,
        export: ExportPipeline,
    ) -> Self {
        AppState {
            session: Arc::new(Mutex::new(session)),
            store,
            export: Arc::new(export),
        }
    }

    /// Reduces `action` into the session and persists the result. Saves run
    /// under the session lock so stored snapshots land in order.
    pub async fn dispatch(&self, action: Action) -> Result<Session, AppError> {
        let mut session = self.session.lock().await;
        if let Some(missing) = missing_target(&session, &action) {
            return Err(AppError::NotFound(missing));
        }
        let next = reduce(session.clone(), action);
        persistence::save(self.store.as_ref(), &next).await;
        *session = next.clone();
        Ok(next)
    }

    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }
}
