use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

use crate::core::{ConfigError, GameConfig, GameSnapshot, SelectOutcome};
use crate::runtime::Command;
use crate::types::CardId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("engine task has stopped")]
    Closed,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Cloneable handle to a running engine.
///
/// Every call is processed in order by the engine task. The returned future
/// resolves once the command has been applied and its snapshot published.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Command>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
}

impl EngineHandle {
    pub(crate) fn new(
        cmd_tx: mpsc::Sender<Command>,
        snapshot_rx: watch::Receiver<GameSnapshot>,
    ) -> Self {
        Self {
            cmd_tx,
            snapshot_rx,
        }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| EngineError::Closed)?;
        rx.await.map_err(|_| EngineError::Closed)
    }

    /// Flip the card with the given id
    pub async fn select(&self, id: CardId) -> Result<SelectOutcome, EngineError> {
        self.request(|reply| Command::Select(id, reply)).await
    }

    pub async fn start(&self) -> Result<(), EngineError> {
        self.request(Command::Start).await
    }

    /// Advance the countdown by one second (for externally driven timers)
    pub async fn tick(&self) -> Result<bool, EngineError> {
        self.request(Command::Tick).await
    }

    pub async fn end_game(&self) -> Result<(), EngineError> {
        self.request(Command::EndGame).await
    }

    /// Re-deal with the current configuration
    pub async fn reset(&self) -> Result<(), EngineError> {
        self.request(Command::Reset).await
    }

    pub async fn reset_with(&self, config: GameConfig) -> Result<(), EngineError> {
        self.request(|reply| Command::ResetWith(config, reply))
            .await?
            .map_err(EngineError::from)
    }

    /// Apply new settings, discarding current progress
    pub async fn update_settings(&self, config: GameConfig) -> Result<(), EngineError> {
        self.request(|reply| Command::UpdateSettings(config, reply))
            .await?
            .map_err(EngineError::from)
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot, EngineError> {
        self.request(Command::Snapshot).await
    }

    /// Receiver updated after every transition
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Most recently published snapshot, without a round trip
    pub fn latest(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Stop the engine task and its timers
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.request(Command::Shutdown).await
    }

    pub fn is_closed(&self) -> bool {
        self.cmd_tx.is_closed()
    }
}
