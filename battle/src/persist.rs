//! Asynchronous persistence outbox
//!
//! [`PersistOutbox`] wraps a local store. Reads go straight to it; writes are
//! applied locally and queued for a background worker, so the engine never
//! waits on a backend. [`run_persistence`] drains the queue into an
//! [`AsyncPersistence`] backend and logs failures without retrying.

use anyhow::Result;
use async_trait::async_trait;
use pokecard_cards::{Card, Catalog};
use tokio::sync::mpsc;

use crate::engine::{BattleResult, BattleSummary, PlayerProfile, RewardDelta};
use crate::error::StoreError;
use crate::store::PlayerDataStore;

/// A write waiting to reach the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistRequest {
    BattleResult {
        result: BattleResult,
        summary: BattleSummary,
    },
    Rewards(RewardDelta),
}

/// Remote side of player data persistence
#[async_trait]
pub trait AsyncPersistence: Send {
    async fn save_battle_result(
        &mut self,
        result: BattleResult,
        summary: &BattleSummary,
    ) -> Result<()>;

    async fn save_rewards(&mut self, delta: &RewardDelta) -> Result<()>;
}

/// Store wrapper that queues writes for a background worker
pub struct PersistOutbox<S> {
    local: S,
    outgoing: mpsc::UnboundedSender<PersistRequest>,
}

impl<S: PlayerDataStore> PersistOutbox<S> {
    /// Wrap `local` and return the receiving end of the queue
    pub fn new(local: S) -> (Self, mpsc::UnboundedReceiver<PersistRequest>) {
        let (outgoing, incoming) = mpsc::unbounded_channel();
        (Self { local, outgoing }, incoming)
    }

    pub fn local(&self) -> &S {
        &self.local
    }

    fn enqueue(&self, request: PersistRequest) -> Result<(), StoreError> {
        self.outgoing
            .send(request)
            .map_err(|_| StoreError::Closed)
    }
}

impl<S: PlayerDataStore> PlayerDataStore for PersistOutbox<S> {
    fn active_deck_cards(&self) -> Vec<Card> {
        self.local.active_deck_cards()
    }

    fn collection(&self) -> Vec<Card> {
        self.local.collection()
    }

    fn catalog(&self) -> Catalog {
        self.local.catalog()
    }

    fn profile(&self) -> PlayerProfile {
        self.local.profile()
    }

    fn report_battle_result(
        &mut self,
        result: BattleResult,
        summary: &BattleSummary,
    ) -> Result<(), StoreError> {
        self.local.report_battle_result(result, summary)?;
        self.enqueue(PersistRequest::BattleResult {
            result,
            summary: summary.clone(),
        })
    }

    fn apply_rewards(&mut self, delta: &RewardDelta) -> Result<(), StoreError> {
        self.local.apply_rewards(delta)?;
        self.enqueue(PersistRequest::Rewards(delta.clone()))
    }
}

/// Counts from a persistence worker run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistStats {
    pub saved: usize,
    pub failed: usize,
}

/// Drain queued writes into `backend` until every sender is dropped.
///
/// Failures are logged and skipped.
pub async fn run_persistence<B: AsyncPersistence>(
    mut incoming: mpsc::UnboundedReceiver<PersistRequest>,
    mut backend: B,
) -> PersistStats {
    let mut stats = PersistStats::default();

    while let Some(request) = incoming.recv().await {
        let outcome = match &request {
            PersistRequest::BattleResult { result, summary } => {
                backend.save_battle_result(*result, summary).await
            }
            PersistRequest::Rewards(delta) => backend.save_rewards(delta).await,
        };

        match outcome {
            Ok(()) => {
                stats.saved += 1;
                tracing::debug!(?request, "persisted");
            }
            Err(e) => {
                stats.failed += 1;
                tracing::warn!(error = %e, ?request, "failed to persist, dropping");
            }
        }
    }

    stats
}
