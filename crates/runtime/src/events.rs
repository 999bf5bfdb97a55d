//! Events published by the match worker.
use arena_core::{ArenaError, RegisterValue, Team, UnitId, UnitKind};
use serde::Serialize;

use crate::agent::TurnRecord;
use crate::scheduler::TickSummary;

/// A contained turn fault, flattened for logs and subscribers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FaultRecord {
    pub round: u32,
    pub unit: UnitId,
    pub kind: UnitKind,
    pub code: String,
    pub severity: String,
    pub message: String,
}

impl FaultRecord {
    pub fn from_turn(record: &TurnRecord) -> Option<Self> {
        let fault = record.fault()?;
        Some(Self {
            round: record.round,
            unit: record.unit,
            kind: record.kind,
            code: fault.error_code().to_string(),
            severity: fault.severity().as_str().to_string(),
            message: fault.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    TickCompleted(TickSummary),
    RegisterChanged {
        round: u32,
        team: Team,
        before: RegisterValue,
        after: RegisterValue,
    },
    AgentFaulted(FaultRecord),
}
