//! The shared target register.
//!
//! Three cells of the team's shared array hold `(x, y, priority)` of the
//! current engagement target. Cell indices and the sentinel are fixed at build
//! time and must agree across every agent of a team.
//!
//! Writes are issued cell by cell with no atomicity; a reader racing another
//! agent's write may observe a mix of two triples. The engagement logic
//! tolerates this by re-validating any target it is able to see.

use super::evaluator::Priority;
use crate::env::ArenaEnv;
use crate::error::ActionError;
use crate::types::Position;

pub const TARGET_X_INDEX: usize = 0;
pub const TARGET_Y_INDEX: usize = 1;
pub const PRIORITY_INDEX: usize = 2;

/// Cell value meaning "unset". Outside every legal coordinate.
pub const SENTINEL: u16 = 65535;

/// Cells in a team's shared array.
pub const SHARED_ARRAY_LEN: usize = 64;

/// Decoded register contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegisterValue {
    pub x: u16,
    pub y: u16,
    pub priority: Priority,
}

impl RegisterValue {
    /// State after first initialisation: every cell holds the sentinel.
    pub const UNSET: Self = Self {
        x: SENTINEL,
        y: SENTINEL,
        priority: Priority::UNSET,
    };

    /// State after a stale target was cleared.
    pub const CLEARED: Self = Self {
        x: SENTINEL,
        y: SENTINEL,
        priority: Priority::FLOOR,
    };

    pub fn targeting(position: Position, priority: Priority) -> Result<Self, ActionError> {
        Ok(Self {
            x: encode_coordinate(position.x)?,
            y: encode_coordinate(position.y)?,
            priority,
        })
    }

    /// A target needs both coordinates; a half-written pair counts as empty.
    pub fn is_empty(&self) -> bool {
        self.x == SENTINEL || self.y == SENTINEL
    }

    pub fn target(&self) -> Option<Position> {
        if self.is_empty() {
            return None;
        }
        Some(Position::new(i32::from(self.x), i32::from(self.y)))
    }

    /// Whether the cells hold a state some agent could have written.
    pub fn is_well_formed(&self) -> bool {
        self.priority.is_well_formed() && (self.x == SENTINEL) == (self.y == SENTINEL)
    }
}

fn encode_coordinate(value: i32) -> Result<u16, ActionError> {
    match u16::try_from(value) {
        Ok(cell) if cell != SENTINEL => Ok(cell),
        _ => Err(ActionError::UnencodableValue { value }),
    }
}

fn guard(env: &(impl ArenaEnv + ?Sized), index: usize) -> Result<(), ActionError> {
    let len = env.shared_array_len();
    if index >= len {
        return Err(ActionError::SharedIndexOutOfBounds { index, len });
    }
    Ok(())
}

fn read_cell(env: &(impl ArenaEnv + ?Sized), index: usize) -> Result<u16, ActionError> {
    guard(env, index)?;
    env.read_shared(index)
}

fn write_cell(env: &mut (impl ArenaEnv + ?Sized), index: usize, value: u16) -> Result<(), ActionError> {
    guard(env, index)?;
    env.write_shared(index, value)
}

pub fn read(env: &(impl ArenaEnv + ?Sized)) -> Result<RegisterValue, ActionError> {
    Ok(RegisterValue {
        x: read_cell(env, TARGET_X_INDEX)?,
        y: read_cell(env, TARGET_Y_INDEX)?,
        priority: Priority::new(read_cell(env, PRIORITY_INDEX)?),
    })
}

/// Writes the full triple. Each cell is bounds-checked before it is written.
pub fn write(env: &mut (impl ArenaEnv + ?Sized), value: RegisterValue) -> Result<(), ActionError> {
    write_cell(env, TARGET_X_INDEX, value.x)?;
    write_cell(env, TARGET_Y_INDEX, value.y)?;
    write_cell(env, PRIORITY_INDEX, value.priority.value())
}

pub fn clear(env: &mut (impl ArenaEnv + ?Sized)) -> Result<(), ActionError> {
    write(env, RegisterValue::CLEARED)
}

/// Writes the sentinel into every cell of the shared array.
///
/// Idempotent: any number of calls from any number of agents, in any order,
/// leave the array in the same state.
pub fn reset(env: &mut (impl ArenaEnv + ?Sized)) -> Result<usize, ActionError> {
    let len = env.shared_array_len();
    for index in 0..len {
        env.write_shared(index, SENTINEL)?;
    }
    Ok(len)
}

/// First-turn initialisation: every agent resets the whole array on its
/// first turn, whatever the register holds.
pub fn initialize(env: &mut (impl ArenaEnv + ?Sized)) -> Result<usize, ActionError> {
    reset(env)
}
