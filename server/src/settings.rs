//! In-memory dashboard settings.
//!
//! Settings live for the process lifetime only; durable storage is an
//! explicit non-goal. The store hands out cloned snapshots and replaces
//! the record wholesale on save, so concurrent saves are last-write-wins
//! and a reader never observes a half-written record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// The dashboard's remote-service configuration.
///
/// Field names on the wire are the camelCase names the dashboard UI
/// posts. Missing fields deserialize to empty strings: saving a partial
/// body discards whatever the omitted fields held before.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Personal access token for the remote service.
    #[serde(default)]
    pub asana_token: String,
    /// Workspace scoping all project and task reads.
    #[serde(default)]
    pub asana_workspace: String,
    /// Project new tasks land in when the request names none.
    #[serde(default)]
    pub asana_project: String,
}

impl Settings {
    /// Seeds settings from `ASANA_TOKEN` / `ASANA_WORKSPACE` /
    /// `ASANA_PROJECT`. Unset variables become empty strings.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            asana_token: var("ASANA_TOKEN"),
            asana_workspace: var("ASANA_WORKSPACE"),
            asana_project: var("ASANA_PROJECT"),
        }
    }

    /// True iff both the token and the workspace are set. Gates the
    /// dashboard views in the UI.
    pub fn configured(&self) -> bool {
        !self.asana_token.is_empty() && !self.asana_workspace.is_empty()
    }
}

/// Shared handle to the process-wide settings record.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    inner: Arc<RwLock<Settings>>,
}

impl SettingsStore {
    pub fn new(initial: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Returns a snapshot of the current settings.
    pub async fn snapshot(&self) -> Settings {
        self.inner.read().await.clone()
    }

    /// Replaces the settings wholesale. No field-level merge.
    pub async fn replace(&self, next: Settings) {
        *self.inner.write().await = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(token: &str, workspace: &str, project: &str) -> Settings {
        Settings {
            asana_token: token.to_string(),
            asana_workspace: workspace.to_string(),
            asana_project: project.to_string(),
        }
    }

    #[test]
    fn test_configured_requires_token_and_workspace() {
        assert!(settings("tok", "ws", "").configured());
        assert!(settings("tok", "ws", "proj").configured());
        assert!(!settings("", "ws", "proj").configured());
        assert!(!settings("tok", "", "proj").configured());
        assert!(!settings("", "", "").configured());
    }

    #[test]
    fn test_missing_fields_deserialize_empty() {
        let parsed: Settings =
            serde_json::from_str(r#"{"asanaToken":"tok","asanaWorkspace":"ws"}"#).unwrap();
        assert_eq!(parsed, settings("tok", "ws", ""));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let value = serde_json::to_value(settings("t", "w", "p")).unwrap();
        assert_eq!(value["asanaToken"], "t");
        assert_eq!(value["asanaWorkspace"], "w");
        assert_eq!(value["asanaProject"], "p");
    }

    #[tokio::test]
    async fn test_replace_is_wholesale() {
        let store = SettingsStore::new(settings("old-token", "old-ws", "old-proj"));

        // A save that omits the project must not preserve the old one.
        store.replace(settings("new-token", "new-ws", "")).await;

        let current = store.snapshot().await;
        assert_eq!(current, settings("new-token", "new-ws", ""));
    }

    #[tokio::test]
    async fn test_snapshot_is_isolated_from_later_writes() {
        let store = SettingsStore::new(settings("a", "w", ""));
        let before = store.snapshot().await;
        store.replace(Settings::default()).await;
        assert_eq!(before.asana_token, "a");
        assert!(!store.snapshot().await.configured());
    }
}
