//! Session-scoped analysis history
//!
//! Histories live in memory only and are lost when the process stops. Each
//! dashboard session owns an isolated history. Submissions within one session
//! queue behind a per-session guard held across the backend call; the history
//! itself is locked only long enough to append or copy entries, so reads never
//! wait on an in-flight analysis.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard, RwLock};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::{AnalysisResult, EvidenceProfile};

/// One completed analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub claim: String,
    pub profile: EvidenceProfile,
    pub result: AnalysisResult,
    pub analyzed_at: DateTime<Utc>,
}

/// Ordered, unbounded list of analyses for a single session
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A dashboard session: its history plus the guard that orders submissions
#[derive(Debug, Default)]
pub struct Session {
    submissions: Mutex<()>,
    history: Mutex<SessionHistory>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for earlier submissions in this session to finish
    pub async fn begin_submission(&self) -> MutexGuard<'_, ()> {
        self.submissions.lock().await
    }

    pub async fn record(&self, entry: HistoryEntry) {
        self.history.lock().await.push(entry);
    }

    /// Snapshot of the history, oldest first
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.history.lock().await.entries().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.history.lock().await.len()
    }
}

pub type SharedSession = Arc<Session>;

/// Maps session ids to isolated sessions
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new, empty session
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Session::new()));

        tracing::debug!(session_id = %id, "Session created");
        id
    }

    /// Existing session for `id`; never inserts
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).map(Arc::clone)
    }

    /// Session for `id`, created empty on first use
    pub async fn session(&self, id: Uuid) -> SharedSession {
        if let Some(session) = self.get(id).await {
            return session;
        }

        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(id).or_insert_with(|| {
            tracing::debug!(session_id = %id, "Session created on first use");
            Arc::new(Session::new())
        });
        Arc::clone(session)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::AnalysisResponse;

    fn entry(claim: &str) -> HistoryEntry {
        HistoryEntry {
            claim: claim.to_string(),
            profile: EvidenceProfile::default(),
            result: AnalysisResult::from(AnalysisResponse::default()),
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_history_preserves_insertion_order() {
        let mut history = SessionHistory::new();
        assert_eq!(history.len(), 0);

        history.push(entry("A"));
        history.push(entry("B"));
        history.push(entry("C"));

        let claims: Vec<&str> = history.entries().iter().map(|e| e.claim.as_str()).collect();
        assert_eq!(claims, vec!["A", "B", "C"]);
        assert_eq!(history.len(), 3);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let first = store.create().await;
        let second = store.create().await;
        assert_ne!(first, second);

        store.session(first).await.record(entry("only in first")).await;

        assert_eq!(store.session(first).await.len().await, 1);
        assert_eq!(store.session(second).await.len().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_session_is_created_on_first_use() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();

        store.session(id).await.record(entry("A")).await;

        assert_eq!(store.len().await, 1);
        assert_eq!(store.session(id).await.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_does_not_create_sessions() {
        let store = SessionStore::new();

        assert!(store.get(Uuid::new_v4()).await.is_none());
        assert_eq!(store.len().await, 0);

        let id = store.create().await;
        assert!(store.get(id).await.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_history_readable_during_submission() {
        let session = Session::new();
        session.record(entry("A")).await;

        let _in_flight = session.begin_submission().await;

        let entries = tokio::time::timeout(Duration::from_millis(100), session.entries())
            .await
            .expect("history read must not wait for the submission");
        assert_eq!(entries.len(), 1);

        tokio::time::timeout(Duration::from_millis(100), session.record(entry("B")))
            .await
            .expect("recording must not wait for the submission guard");
        assert_eq!(session.len().await, 2);
    }

    #[tokio::test]
    async fn test_submissions_queue_within_a_session() {
        let session = Session::new();
        let _first = session.begin_submission().await;

        let second = tokio::time::timeout(Duration::from_millis(50), session.begin_submission()).await;
        assert!(second.is_err());
    }
}
