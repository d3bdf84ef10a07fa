//! Best-effort persistence of the editor session.
//!
//! Five independent keys, written one after another. A crash between writes
//! can leave them mutually inconsistent; loading tolerates that because each
//! key falls back on its own. Nothing here returns an error: reads yield
//! `Stored::{Found, Absent, Corrupt}` and write failures are logged and dropped.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::editor::session::Session;
use crate::export::gating::GatingState;
use crate::models::resume::{LinkItem, ResumeDocument};
use crate::models::template::TemplateId;
use crate::storage::KeyValueStore;

pub const KEY_RESUME: &str = "cvb:resume";
pub const KEY_TEMPLATE: &str = "cvb:template";
pub const KEY_PRO: &str = "cvb:pro";
pub const KEY_FREE: &str = "cvb:free";
pub const KEY_LINKS: &str = "cvb:links";

/// Outcome of reading one stored field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stored<T> {
    Found(T),
    /// Nothing stored (or an empty value).
    Absent,
    /// Something stored that could not be read back; the store failed or the
    /// value did not parse.
    Corrupt,
}

impl<T> Stored<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Stored::Found(value) => Some(value),
            Stored::Absent | Stored::Corrupt => None,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Stored::Corrupt)
    }
}

/// Every persisted field as read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedState {
    pub document: Stored<ResumeDocument>,
    pub template: Stored<TemplateId>,
    pub subscription: Stored<bool>,
    pub free_exports: Stored<u32>,
    pub links: Stored<Vec<LinkItem>>,
}

impl PersistedState {
    /// Overlays what was found onto `base`. A stored link list replaces the
    /// document's links.
    pub fn apply(self, base: Session) -> Session {
        let mut document = self.document.found().unwrap_or(base.document);
        if let Some(links) = self.links.found() {
            document.links = links;
        }
        Session {
            document,
            template: self.template.found().unwrap_or(base.template),
            gating: GatingState {
                subscription_active: self
                    .subscription
                    .found()
                    .unwrap_or(base.gating.subscription_active),
                free_exports_remaining: self
                    .free_exports
                    .found()
                    .unwrap_or(base.gating.free_exports_remaining),
            },
        }
    }
}

async fn read_raw(store: &dyn KeyValueStore, key: &str) -> Stored<String> {
    match store.get(key).await {
        Ok(Some(raw)) if !raw.trim().is_empty() => Stored::Found(raw),
        Ok(_) => Stored::Absent,
        Err(e) => {
            warn!(key, error = %e, "storage read failed; using default");
            Stored::Corrupt
        }
    }
}

fn parse_with<T>(key: &str, raw: Stored<String>, parse: impl FnOnce(&str) -> Option<T>) -> Stored<T> {
    match raw {
        Stored::Found(raw) => match parse(raw.trim()) {
            Some(value) => Stored::Found(value),
            None => {
                warn!(key, "stored value is unreadable; using default");
                Stored::Corrupt
            }
        },
        Stored::Absent => Stored::Absent,
        Stored::Corrupt => Stored::Corrupt,
    }
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str(raw).ok()
}

pub fn parse_subscription(raw: &str) -> Option<bool> {
    match raw {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

/// Reads every persisted field. Never fails.
pub async fn load(store: &dyn KeyValueStore) -> PersistedState {
    let state = PersistedState {
        document: parse_with(KEY_RESUME, read_raw(store, KEY_RESUME).await, parse_json),
        template: parse_with(KEY_TEMPLATE, read_raw(store, KEY_TEMPLATE).await, TemplateId::parse),
        subscription: parse_with(KEY_PRO, read_raw(store, KEY_PRO).await, parse_subscription),
        free_exports: parse_with(KEY_FREE, read_raw(store, KEY_FREE).await, |s| s.parse().ok()),
        links: parse_with(KEY_LINKS, read_raw(store, KEY_LINKS).await, parse_json),
    };
    debug!(
        template = ?state.template,
        subscription = ?state.subscription,
        free_exports = ?state.free_exports,
        "persisted state loaded"
    );
    state
}

async fn write(store: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value).await {
        warn!(key, error = %e, "storage write failed; change kept in memory only");
    }
}

/// Writes every field of `session`. Failures are logged and swallowed.
pub async fn save(store: &dyn KeyValueStore, session: &Session) {
    match serde_json::to_string(&session.document) {
        Ok(json) => write(store, KEY_RESUME, &json).await,
        Err(e) => warn!(error = %e, "could not encode document"),
    }
    write(store, KEY_TEMPLATE, session.template.as_str()).await;
    let pro = if session.gating.subscription_active { "1" } else { "0" };
    write(store, KEY_PRO, pro).await;
    write(
        store,
        KEY_FREE,
        &session.gating.free_exports_remaining.to_string(),
    )
    .await;
    match serde_json::to_string(&session.document.links) {
        Ok(json) => write(store, KEY_LINKS, &json).await,
        Err(e) => warn!(error = %e, "could not encode links"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::editor::actions::{reduce, Action};
    use crate::models::resume::EntryId;
    use crate::storage::memory::MemoryStore;
    use crate::storage::StorageError;

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::InvalidKey("broken".into()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey("broken".into()))
        }
    }

    fn edited_session() -> Session {
        let mut session = Session::fresh(1);
        session = reduce(session, Action::AddExperience(EntryId::from("new1")));
        session = reduce(session, Action::AddSkill("Tableau".into()));
        session = reduce(session, Action::SelectTemplate(TemplateId::Cards));
        session = reduce(session, Action::SetSubscription(true));
        session = reduce(session, Action::ExportSaved(TemplateId::Cards));
        session
    }

    #[tokio::test]
    async fn test_empty_store_loads_all_absent() {
        let store = MemoryStore::new();
        let loaded = load(&store).await;
        assert_eq!(loaded.document, Stored::Absent);
        assert_eq!(loaded.template, Stored::Absent);
        assert_eq!(loaded.subscription, Stored::Absent);
        assert_eq!(loaded.free_exports, Stored::Absent);
        assert_eq!(loaded.links, Stored::Absent);
        assert_eq!(loaded.apply(Session::fresh(1)), Session::fresh(1));
    }

    #[tokio::test]
    async fn test_round_trip_is_idempotent() {
        let store = MemoryStore::new();
        let session = edited_session();
        save(&store, &session).await;

        let first = load(&store).await.apply(Session::fresh(1));
        assert_eq!(first, session, "load after save must reproduce the session");

        save(&store, &first).await;
        let second = load(&store).await.apply(Session::fresh(1));
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_corrupt_values_fall_back_per_field() {
        let store = MemoryStore::new();
        store.set(KEY_RESUME, "{not json").await.unwrap();
        store.set(KEY_TEMPLATE, "fancy").await.unwrap();
        store.set(KEY_PRO, "yes").await.unwrap();
        store.set(KEY_FREE, "NaN").await.unwrap();
        store.set(KEY_LINKS, "[1,2]").await.unwrap();

        let loaded = load(&store).await;
        assert!(loaded.document.is_corrupt());
        assert!(loaded.template.is_corrupt());
        assert!(loaded.subscription.is_corrupt());
        assert!(loaded.free_exports.is_corrupt());
        assert!(loaded.links.is_corrupt());
        assert_eq!(loaded.apply(Session::fresh(1)), Session::fresh(1));
    }

    #[tokio::test]
    async fn test_valid_fields_survive_corrupt_neighbours() {
        let store = MemoryStore::new();
        store.set(KEY_RESUME, "garbage").await.unwrap();
        store.set(KEY_TEMPLATE, "elegant").await.unwrap();
        store.set(KEY_FREE, "0").await.unwrap();

        let session = load(&store).await.apply(Session::fresh(1));
        assert_eq!(session.document, ResumeDocument::seed());
        assert_eq!(session.template, TemplateId::Elegant);
        assert_eq!(session.gating.free_exports_remaining, 0);
    }

    #[tokio::test]
    async fn test_stored_links_override_document_links() {
        let store = MemoryStore::new();
        let doc = ResumeDocument::seed();
        store
            .set(KEY_RESUME, &serde_json::to_string(&doc).unwrap())
            .await
            .unwrap();
        store
            .set(KEY_LINKS, r#"[{"label":"GitHub","url":"https://github.com/me"}]"#)
            .await
            .unwrap();

        let session = load(&store).await.apply(Session::fresh(1));
        assert_eq!(
            session.document.links,
            vec![LinkItem::new("GitHub", "https://github.com/me")]
        );
    }

    #[tokio::test]
    async fn test_broken_store_never_fails() {
        let store = BrokenStore;
        save(&store, &Session::fresh(1)).await;
        let loaded = load(&store).await;
        assert!(loaded.document.is_corrupt());
        assert_eq!(loaded.apply(Session::fresh(3)), Session::fresh(3));
    }

    #[test]
    fn test_parse_subscription() {
        assert_eq!(parse_subscription("1"), Some(true));
        assert_eq!(parse_subscription("0"), Some(false));
        assert_eq!(parse_subscription("true"), None);
    }
}
