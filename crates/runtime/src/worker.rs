//! Match worker that owns the authoritative [`Match`].
//!
//! Receives commands from [`MatchHandle`](crate::MatchHandle), advances the
//! match one tick at a time, and publishes [`MatchEvent`]s.
use arena_core::{RegisterValue, Team};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::{Result, RuntimeError};
use crate::events::MatchEvent;
use crate::scheduler::{Match, MatchSummary, TickSummary};

/// Commands accepted by the match worker.
pub enum Command {
    /// Advance the match by one tick.
    Step {
        reply: oneshot::Sender<Result<TickSummary>>,
    },
    /// Read a team's decoded target register.
    QueryRegister {
        team: Team,
        reply: oneshot::Sender<RegisterValue>,
    },
    QuerySummary {
        reply: oneshot::Sender<MatchSummary>,
    },
}

pub struct MatchWorker {
    arena: Match,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<MatchEvent>,
}

impl MatchWorker {
    pub fn new(
        arena: Match,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<MatchEvent>,
    ) -> Self {
        Self {
            arena,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop. Returns the match once every handle is dropped.
    pub async fn run(mut self) -> Match {
        info!(target: "runtime::worker", "Match worker started");
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        info!(
            target: "runtime::worker",
            round = self.arena.world().round(),
            "Match worker stopped"
        );
        self.arena
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Step { reply } => {
                let result = self.step();
                let _ = reply.send(result);
            }
            Command::QueryRegister { team, reply } => {
                let _ = reply.send(self.arena.world().register(team));
            }
            Command::QuerySummary { reply } => {
                let _ = reply.send(self.arena.summary());
            }
        }
    }

    fn step(&mut self) -> Result<TickSummary> {
        if self.arena.is_finished() {
            let round = self.arena.world().round();
            debug!(target: "runtime::worker", round, "Step rejected, match finished");
            return Err(RuntimeError::MatchFinished { round });
        }

        let before = self.arena.world().registers();
        let summary = self.arena.tick();

        for team in [Team::A, Team::B] {
            let (old, new) = (*before.get(team), *summary.registers.get(team));
            if old != new {
                debug!(
                    target: "runtime::worker",
                    round = summary.round,
                    %team,
                    ?old,
                    ?new,
                    "Register changed"
                );
                self.publish(MatchEvent::RegisterChanged {
                    round: summary.round,
                    team,
                    before: old,
                    after: new,
                });
            }
        }
        for fault in &summary.faults {
            warn!(
                target: "runtime::worker",
                round = fault.round,
                agent = %fault.unit,
                code = %fault.code,
                "Agent faulted"
            );
            self.publish(MatchEvent::AgentFaulted(fault.clone()));
        }
        self.publish(MatchEvent::TickCompleted(summary.clone()));

        Ok(summary)
    }

    fn publish(&self, event: MatchEvent) {
        // No subscribers is not an error.
        let _ = self.event_tx.send(event);
    }
}
