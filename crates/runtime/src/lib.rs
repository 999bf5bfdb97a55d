//! Match runtime for the arena agents.
//!
//! This crate hosts the simulated arena that implements
//! [`arena_core::ArenaEnv`], the per-agent turn boundary, role dispatch, and
//! a cooperative tick scheduler that can run inline or on a worker task.
//!
//! Modules are organized by responsibility:
//! - [`sim`] owns the grid, units, deposits, and both teams' shared arrays
//! - [`agent`] contains faults and guarantees every turn yields
//! - [`behaviors`] routes a turn to its role routine
//! - [`scheduler`] runs ticks; [`MatchHandle`] drives them from async code
pub mod agent;
pub mod behaviors;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod sim;

mod handle;
mod worker;

pub use agent::{Agent, TurnOutcome, TurnRecord, TurnReport};
pub use behaviors::{BehaviorReport, BuildReport, MineReport, dispatch};
pub use error::{Result, RuntimeError, TurnFault};
pub use events::{FaultRecord, MatchEvent};
pub use handle::{ChannelConfig, MatchHandle};
pub use scheduler::{Match, MatchSummary, TickSummary};
pub use sim::{AgentView, Resources, SimWorld, TeamPair, Unit};
