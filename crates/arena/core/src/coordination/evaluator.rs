//! Target priorities.
//!
//! Priority depends on the sensed unit's kind only, never on distance or
//! health, so the comparison stays cheap and identical on every agent.

use super::register::SENTINEL;
use crate::types::{Position, SensedUnit, UnitKind};

/// Urgency of a registered target. Lower values are more urgent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priority(u16);

impl Priority {
    /// Written when a stale target is cleared. Any real tier beats it.
    pub const FLOOR: Self = Self(10);

    /// Priority cell contents after the array is first initialised.
    pub const UNSET: Self = Self(SENTINEL);

    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Whether a priority cell holds a value some agent could have written.
    pub fn is_well_formed(self) -> bool {
        self == Self::FLOOR || self == Self::UNSET || TargetTier::from_priority(self).is_some()
    }
}

/// The five target classes, most urgent first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum TargetTier {
    /// Stationary high-value structures.
    Fortification = 1,
    Elite = 2,
    Combatant = 3,
    /// High-value mobile command units.
    Command = 4,
    Other = 5,
}

impl TargetTier {
    pub const fn priority(self) -> Priority {
        Priority(self as u16)
    }

    pub fn from_priority(priority: Priority) -> Option<Self> {
        match priority.0 {
            1 => Some(Self::Fortification),
            2 => Some(Self::Elite),
            3 => Some(Self::Combatant),
            4 => Some(Self::Command),
            5 => Some(Self::Other),
            _ => None,
        }
    }
}

pub fn classify(kind: UnitKind) -> TargetTier {
    match kind {
        UnitKind::Watchtower => TargetTier::Fortification,
        UnitKind::Sage => TargetTier::Elite,
        UnitKind::Soldier => TargetTier::Combatant,
        UnitKind::Archon => TargetTier::Command,
        UnitKind::Laboratory | UnitKind::Miner | UnitKind::Builder => TargetTier::Other,
    }
}

/// Strict improvement. Ties keep the incumbent.
pub fn is_better(candidate: Priority, current: Priority) -> bool {
    candidate < current
}

/// A hostile worth broadcasting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub position: Position,
    pub kind: UnitKind,
    pub priority: Priority,
}

impl Candidate {
    pub fn of(unit: &SensedUnit) -> Self {
        Self {
            position: unit.position,
            kind: unit.kind,
            priority: classify(unit.kind).priority(),
        }
    }
}

/// Best hostile in `hostiles` that strictly improves on `current`.
///
/// Each hostile is compared against the best seen so far in this pass, so the
/// result is the minimum over the whole scan; among equals the first one
/// sensed wins.
pub fn best_candidate(current: Priority, hostiles: &[SensedUnit]) -> Option<Candidate> {
    let mut threshold = current;
    let mut best = None;
    for unit in hostiles {
        let candidate = Candidate::of(unit);
        if is_better(candidate.priority, threshold) {
            threshold = candidate.priority;
            best = Some(candidate);
        }
    }
    best
}
