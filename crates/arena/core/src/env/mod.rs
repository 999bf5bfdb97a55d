//! The environment facade agents act through.
//!
//! Hosts implement [`ArenaEnv`] once per acting unit. All sensing is bounded by
//! a squared radius and returns at most [`MAX_SENSED`] units, so no scan an
//! agent performs can grow with the size of the arena.
mod rng;

#[cfg(test)]
pub(crate) mod fake;

use arrayvec::ArrayVec;

pub use rng::{AgentRng, RandomSource, SequenceRng, compute_seed};

use crate::error::ActionError;
use crate::types::{Direction, Position, SensedUnit, Team, UnitId, UnitKind};

/// Upper bound on units returned by a single sensing call.
pub const MAX_SENSED: usize = 128;

pub type SensedUnits = ArrayVec<SensedUnit, MAX_SENSED>;

/// Sense/act primitives exposed by the host arena to one unit.
///
/// Every mutating call has a matching `can_*` predicate. Callers are expected
/// to check the predicate first; the mutating call still refuses with an
/// [`ActionError`] when its rule does not hold.
pub trait ArenaEnv {
    fn self_id(&self) -> UnitId;

    /// Role tag of the acting unit.
    fn self_kind(&self) -> UnitKind;

    fn self_team(&self) -> Team;

    fn self_position(&self) -> Position;

    /// Round the arena is currently processing, starting at 1.
    fn turn_number(&self) -> u32;

    /// Opposing units within `radius_squared` of the acting unit.
    fn sense_hostiles(&self, radius_squared: u32) -> SensedUnits;

    /// Whatever unit (of either team) occupies `position`, if it can be sensed.
    fn sense_unit_at(&self, position: Position) -> Option<SensedUnit>;

    fn is_within_bounds(&self, position: Position) -> bool;

    fn can_move(&self, direction: Direction) -> bool;

    fn move_to(&mut self, direction: Direction) -> Result<(), ActionError>;

    fn can_attack(&self, target: Position) -> bool;

    fn attack(&mut self, target: Position) -> Result<(), ActionError>;

    /// Number of cells in the team's shared array.
    fn shared_array_len(&self) -> usize;

    fn read_shared(&self, index: usize) -> Result<u16, ActionError>;

    fn write_shared(&mut self, index: usize, value: u16) -> Result<(), ActionError>;

    fn can_build(&self, kind: UnitKind, direction: Direction) -> bool;

    fn build(&mut self, kind: UnitKind, direction: Direction) -> Result<(), ActionError>;

    fn can_mine_gold(&self, position: Position) -> bool;

    fn mine_gold(&mut self, position: Position) -> Result<(), ActionError>;

    fn can_mine_lead(&self, position: Position) -> bool;

    fn mine_lead(&mut self, position: Position) -> Result<(), ActionError>;

    /// Free-form status line shown by hosts that visualise agents.
    fn set_indicator(&mut self, _message: &str) {}

    /// Yields control back to the scheduler. Must be called exactly once per turn.
    fn end_turn(&mut self);
}
