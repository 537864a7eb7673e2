//! Engine runtime.
//!
//! One tokio task owns the [`GameState`]. Player commands, countdown ticks and
//! deferred unflips all arrive as messages, so each one runs to completion
//! before the next is looked at.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::core::{
    ConfigError, GameConfig, GameSnapshot, GameState, NullSoundPlayer, SelectOutcome,
    SoundPlayer, UnflipToken,
};
use crate::handle::EngineHandle;
use crate::types::{CardId, TICK_INTERVAL_MS};

/// Runtime knobs that are not part of the game rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Run the countdown from an internal one-second timer. When false the
    /// caller drives it with [`EngineHandle::tick`].
    pub drive_timer: bool,
    pub tick_interval: Duration,
    /// Capacity of the command queue.
    pub max_pending_commands: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            drive_timer: true,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            max_pending_commands: 32,
        }
    }
}

/// Command delivered to the engine task.
pub(crate) enum Command {
    Select(CardId, oneshot::Sender<SelectOutcome>),
    Start(oneshot::Sender<()>),
    Tick(oneshot::Sender<bool>),
    EndGame(oneshot::Sender<()>),
    Reset(oneshot::Sender<()>),
    ResetWith(GameConfig, oneshot::Sender<Result<(), ConfigError>>),
    UpdateSettings(GameConfig, oneshot::Sender<Result<(), ConfigError>>),
    Snapshot(oneshot::Sender<GameSnapshot>),
    Shutdown(oneshot::Sender<()>),
}

/// Messages from the engine's own timer and unflip tasks.
#[derive(Debug, Clone, Copy)]
enum Internal {
    Tick { episode_id: u32 },
    Unflip(UnflipToken),
}

/// Builder for a running engine
pub struct Engine {
    state: GameState,
    player: Box<dyn SoundPlayer + Send>,
    options: EngineOptions,
}

impl Engine {
    /// Deal a shuffled session
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Ok(Self::from_state(GameState::new(config, seed)?))
    }

    /// Wrap an already dealt session
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            player: Box::new(NullSoundPlayer),
            options: EngineOptions::default(),
        }
    }

    pub fn with_sound_player(mut self, player: impl SoundPlayer + Send + 'static) -> Self {
        self.player = Box::new(player);
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Spawn the engine task on the current tokio runtime.
    ///
    /// The task stops on [`EngineHandle::shutdown`] or once every handle is
    /// dropped; its timer and unflip tasks are aborted with it.
    pub fn spawn(self) -> EngineHandle {
        let Engine {
            state,
            mut player,
            options,
        } = self;

        player.set_enabled(state.config().sound_enabled);

        let (cmd_tx, cmd_rx) = mpsc::channel(options.max_pending_commands.max(1));
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());

        let actor = Actor {
            state,
            player,
            options,
            snapshot_tx,
            internal_tx,
            ticker: None,
            unflips: Vec::new(),
        };
        tokio::spawn(actor.run(cmd_rx, internal_rx));

        EngineHandle::new(cmd_tx, snapshot_rx)
    }
}

struct Ticker {
    episode_id: u32,
    task: JoinHandle<()>,
}

struct Actor {
    state: GameState,
    player: Box<dyn SoundPlayer + Send>,
    options: EngineOptions,
    snapshot_tx: watch::Sender<GameSnapshot>,
    internal_tx: mpsc::UnboundedSender<Internal>,
    ticker: Option<Ticker>,
    unflips: Vec<JoinHandle<()>>,
}

impl Actor {
    async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<Command>,
        mut internal_rx: mpsc::UnboundedReceiver<Internal>,
    ) {
        tracing::debug!(episode = self.state.episode_id(), "engine started");

        let shutdown_reply = loop {
            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(cmd) => {
                        if let Some(reply) = self.handle_command(cmd) {
                            break Some(reply);
                        }
                    }
                    None => break None,
                },
                Some(msg) = internal_rx.recv() => {
                    self.handle_internal(msg);
                    self.after_transition();
                }
            }
        };

        drop(cmd_rx);
        self.stop_ticker();
        self.cancel_unflips();
        tracing::debug!(episode = self.state.episode_id(), "engine stopped");

        if let Some(reply) = shutdown_reply {
            let _ = reply.send(());
        }
    }

    /// Apply one command. The snapshot is published before the caller is
    /// answered. Returns the reply channel when the command asks the engine
    /// to stop.
    fn handle_command(&mut self, cmd: Command) -> Option<oneshot::Sender<()>> {
        match cmd {
            Command::Select(id, reply) => {
                let outcome = self.state.select(id);
                if let SelectOutcome::Mismatched(token) = outcome {
                    self.schedule_unflip(token);
                }
                self.after_transition();
                let _ = reply.send(outcome);
            }
            Command::Start(reply) => {
                self.state.start();
                self.after_transition();
                let _ = reply.send(());
            }
            Command::Tick(reply) => {
                let advanced = self.state.tick();
                self.after_transition();
                let _ = reply.send(advanced);
            }
            Command::EndGame(reply) => {
                self.state.end_game();
                self.cancel_unflips();
                self.after_transition();
                let _ = reply.send(());
            }
            Command::Reset(reply) => {
                self.cancel_unflips();
                self.state.reset();
                self.after_transition();
                let _ = reply.send(());
            }
            Command::ResetWith(config, reply) => {
                let result = self.apply_config(config, false);
                self.after_transition();
                let _ = reply.send(result);
            }
            Command::UpdateSettings(config, reply) => {
                let result = self.apply_config(config, true);
                self.after_transition();
                let _ = reply.send(result);
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.state.snapshot());
            }
            Command::Shutdown(reply) => return Some(reply),
        }
        None
    }

    fn apply_config(&mut self, config: GameConfig, settings: bool) -> Result<(), ConfigError> {
        let sound_enabled = config.sound_enabled;
        let result = if settings {
            self.state.update_settings(config)
        } else {
            self.state.reset_with(config)
        };
        if result.is_ok() {
            self.cancel_unflips();
            self.player.set_enabled(sound_enabled);
        }
        result
    }

    fn handle_internal(&mut self, msg: Internal) {
        match msg {
            Internal::Tick { episode_id } => {
                if episode_id == self.state.episode_id() {
                    self.state.tick();
                }
            }
            Internal::Unflip(token) => {
                self.state.resolve_unflip(token);
            }
        }
    }

    /// Forward cues, reconcile the timer and publish a snapshot
    fn after_transition(&mut self) {
        for kind in self.state.take_sounds() {
            self.player.play_sound(kind);
        }
        self.sync_ticker();

        let state = &self.state;
        self.snapshot_tx.send_modify(|snap| state.snapshot_into(snap));
    }

    fn sync_ticker(&mut self) {
        let want = self.options.drive_timer && self.state.timer_running();
        let episode_id = self.state.episode_id();

        match &self.ticker {
            Some(t) if want && t.episode_id == episode_id => return,
            Some(_) => self.stop_ticker(),
            None => {}
        }
        if !want {
            return;
        }

        let tx = self.internal_tx.clone();
        let period = self.options.tick_interval;
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Internal::Tick { episode_id }).is_err() {
                    break;
                }
            }
        });
        tracing::debug!(episode = episode_id, "countdown started");
        self.ticker = Some(Ticker { episode_id, task });
    }

    fn stop_ticker(&mut self) {
        if let Some(t) = self.ticker.take() {
            t.task.abort();
            tracing::debug!(episode = t.episode_id, "countdown stopped");
        }
    }

    fn schedule_unflip(&mut self, token: UnflipToken) {
        self.unflips.retain(|task| !task.is_finished());

        let tx = self.internal_tx.clone();
        let delay = Duration::from_millis(self.state.config().unflip_delay_ms);
        self.unflips.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Internal::Unflip(token));
        }));
    }

    fn cancel_unflips(&mut self) {
        for task in self.unflips.drain(..) {
            task.abort();
        }
    }
}
