//! Ledger of optimistic changes.
//!
//! A store applies its local change first, then runs the request through
//! [`MutationLedger::track`]. The entry ends up `Committed` or `RolledBack`;
//! restoring the local state on rollback stays with the store, which knows
//! what it changed.

use std::collections::VecDeque;
use std::future::Future;

use clinicdesk_core::errors::ClinicResult;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

/// Finished entries kept for inspection.
const LEDGER_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    Pending,
    Committed,
    RolledBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub id: Uuid,
    /// What was attempted, e.g. `"delete_custom_schedule"`.
    pub action: &'static str,
    pub target: i64,
    pub state: MutationState,
    /// User-facing reason of a rollback.
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct MutationLedger {
    entries: RwLock<VecDeque<Mutation>>,
}

impl MutationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn begin(&self, action: &'static str, target: i64) -> Uuid {
        let id = Uuid::new_v4();
        let mut entries = self.entries.write().await;
        entries.push_back(Mutation {
            id,
            action,
            target,
            state: MutationState::Pending,
            error: None,
        });
        while entries.len() > LEDGER_CAPACITY {
            match entries.iter().position(|m| m.state != MutationState::Pending) {
                Some(index) => {
                    entries.remove(index);
                }
                None => break,
            }
        }
        id
    }

    pub async fn commit(&self, id: Uuid) {
        if let Some(entry) = self.entries.write().await.iter_mut().find(|m| m.id == id) {
            entry.state = MutationState::Committed;
            info!(action = entry.action, target = entry.target, "Mutation committed");
        }
    }

    pub async fn roll_back(&self, id: Uuid, reason: String) {
        if let Some(entry) = self.entries.write().await.iter_mut().find(|m| m.id == id) {
            warn!(
                action = entry.action,
                target = entry.target,
                %reason,
                "Mutation rolled back"
            );
            entry.state = MutationState::RolledBack;
            entry.error = Some(reason);
        }
    }

    /// Records `request` as a pending mutation and settles the entry with
    /// its outcome.
    pub async fn track<T, F>(&self, action: &'static str, target: i64, request: F) -> ClinicResult<T>
    where
        F: Future<Output = ClinicResult<T>>,
    {
        let id = self.begin(action, target).await;
        match request.await {
            Ok(value) => {
                self.commit(id).await;
                Ok(value)
            }
            Err(err) => {
                self.roll_back(id, err.user_message()).await;
                Err(err)
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<Mutation> {
        self.entries.read().await.iter().find(|m| m.id == id).cloned()
    }

    pub async fn entries(&self) -> Vec<Mutation> {
        self.entries.read().await.iter().cloned().collect()
    }

    pub async fn last(&self) -> Option<Mutation> {
        self.entries.read().await.back().cloned()
    }

    pub async fn pending(&self) -> usize {
        self.entries
            .read()
            .await
            .iter()
            .filter(|m| m.state == MutationState::Pending)
            .count()
    }
}
