//! The per-agent turn boundary.
//!
//! [`Agent::take_turn`] is the only entry point the scheduler calls. It counts
//! the turn, runs first-turn initialisation and the role behavior, contains any
//! fault (including panics), logs it, and always yields back to the scheduler.
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use arena_core::coordination::register;
use arena_core::{
    ActionError, AgentContext, AgentRng, ArenaError, ArenaEnv, RandomSource,
    RoleProfile, Team, UnitId, UnitKind,
};
use tracing::{debug, error, warn};

use crate::behaviors::{self, BehaviorReport};
use crate::error::TurnFault;

/// What a turn produced when it ran to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// Shared cells reset, on the agent's first turn only.
    pub initialized: Option<usize>,
    pub behavior: BehaviorReport,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Completed(TurnReport),
    Faulted(TurnFault),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    pub unit: UnitId,
    pub kind: UnitKind,
    pub team: Team,
    /// The agent's own 1-based turn count.
    pub turn: u32,
    /// Arena round the turn ran in.
    pub round: u32,
    pub outcome: TurnOutcome,
}

impl TurnRecord {
    pub fn fault(&self) -> Option<&TurnFault> {
        match &self.outcome {
            TurnOutcome::Faulted(fault) => Some(fault),
            TurnOutcome::Completed(_) => None,
        }
    }

    pub fn report(&self) -> Option<&TurnReport> {
        match &self.outcome {
            TurnOutcome::Completed(report) => Some(report),
            TurnOutcome::Faulted(_) => None,
        }
    }
}

/// One autonomous unit's decision process.
pub struct Agent<R = AgentRng> {
    context: AgentContext<R>,
}

impl Agent<AgentRng> {
    pub fn seeded(id: UnitId, kind: UnitKind, team: Team, profile: RoleProfile, game_seed: u64) -> Self {
        Self::new(AgentContext::seeded(id, kind, team, profile, game_seed))
    }
}

impl<R: RandomSource> Agent<R> {
    pub fn new(context: AgentContext<R>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AgentContext<R> {
        &self.context
    }

    pub fn take_turn(&mut self, env: &mut dyn ArenaEnv) -> TurnRecord {
        let turn = self.context.begin_turn();
        let round = env.turn_number();
        let unit = self.context.id();
        let kind = self.context.kind();

        let context = &mut self.context;
        let result = panic::catch_unwind(AssertUnwindSafe(|| decide(context, &mut *env)));

        let outcome = match result {
            Ok(Ok(report)) => {
                log_report(unit, round, &report);
                TurnOutcome::Completed(report)
            }
            Ok(Err(error)) => {
                let fault = TurnFault::from(error);
                warn!(
                    target: "runtime::turn",
                    agent = %unit,
                    role = %kind,
                    turn,
                    round,
                    code = fault.error_code(),
                    severity = fault.severity().as_str(),
                    error = %fault,
                    "Turn ended early"
                );
                TurnOutcome::Faulted(fault)
            }
            Err(payload) => {
                let fault = TurnFault::UnexpectedFault(panic_message(payload.as_ref()));
                error!(
                    target: "runtime::turn",
                    agent = %unit,
                    role = %kind,
                    turn,
                    round,
                    error = %fault,
                    "Turn faulted"
                );
                TurnOutcome::Faulted(fault)
            }
        };

        env.end_turn();

        TurnRecord {
            unit,
            kind,
            team: self.context.team(),
            turn,
            round,
            outcome,
        }
    }
}

fn decide<R: RandomSource>(
    ctx: &mut AgentContext<R>,
    env: &mut dyn ArenaEnv,
) -> Result<TurnReport, ActionError> {
    let initialized = if ctx.is_first_turn() {
        Some(register::initialize(env)?)
    } else {
        None
    };
    let behavior = behaviors::dispatch(ctx, env)?;
    Ok(TurnReport {
        initialized,
        behavior,
    })
}

fn log_report(unit: UnitId, round: u32, report: &TurnReport) {
    if let Some(cells) = report.initialized {
        debug!(target: "runtime::turn", agent = %unit, round, cells, "Shared array initialised");
    }
    if let BehaviorReport::Engagement(engagement) = &report.behavior
        && engagement.register_changed()
    {
        debug!(
            target: "runtime::turn",
            agent = %unit,
            round,
            before = ?engagement.register_before,
            after = ?engagement.register_after,
            validation = ?engagement.validation,
            "Target register updated"
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
