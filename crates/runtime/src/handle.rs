use arena_core::{RegisterValue, Team};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::{Result, RuntimeError};
use crate::events::MatchEvent;
use crate::scheduler::{Match, MatchSummary, TickSummary};
use crate::worker::{Command, MatchWorker};

/// Channel capacities for a spawned match worker.
#[derive(Clone, Copy, Debug)]
pub struct ChannelConfig {
    pub command_buffer: usize,
    pub event_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            command_buffer: 32,
            event_buffer: 256,
        }
    }
}

/// Client-facing handle to a match running on its own task.
#[derive(Clone)]
pub struct MatchHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<MatchEvent>,
}

impl MatchHandle {
    /// Spawns the worker onto the current tokio runtime.
    pub fn spawn(arena: Match, channels: ChannelConfig) -> (Self, JoinHandle<Match>) {
        let (command_tx, command_rx) = mpsc::channel(channels.command_buffer);
        let (event_tx, _) = broadcast::channel(channels.event_buffer);
        let worker = MatchWorker::new(arena, command_rx, event_tx.clone());
        let join = tokio::spawn(worker.run());
        (
            Self {
                command_tx,
                event_tx,
            },
            join,
        )
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MatchEvent> {
        self.event_tx.subscribe()
    }

    /// Advance the match by one tick.
    pub async fn step(&self) -> Result<TickSummary> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Step { reply }).await?;
        rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    pub async fn register(&self, team: Team) -> Result<RegisterValue> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::QueryRegister { team, reply }).await?;
        rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub async fn summary(&self) -> Result<MatchSummary> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::QuerySummary { reply }).await?;
        rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Drops this handle and waits for the worker to hand back the match.
    ///
    /// The worker only stops once every clone of the handle is gone.
    pub async fn shutdown(self, join: JoinHandle<Match>) -> Result<Match> {
        drop(self);
        join.await.map_err(RuntimeError::WorkerJoin)
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
