//! Per-agent decision logic for teams competing in a turn-based grid arena.
//!
//! `arena-core` defines the coordination protocol agents run over their team's
//! shared integer array and the engagement logic built on top of it. Every
//! operation is expressed against the [`ArenaEnv`] facade, so the same code runs
//! inside any host that can sense, act and expose the shared array.
//!
//! - [`coordination::register`]: the three-cell shared target register
//! - [`coordination::evaluator`]: target priorities and the replacement rule
//! - [`engagement`]: validate, improve, then approach/attack/patrol
//! - [`patrol`]: heading persistence when no target is registered
//! - [`context`]: per-agent state carried across turns
pub mod config;
pub mod context;
pub mod coordination;
pub mod engagement;
pub mod env;
pub mod error;
pub mod patrol;
pub mod types;

pub use config::{ArenaConfig, RoleProfile};
pub use context::AgentContext;
pub use coordination::evaluator::{Candidate, Priority, TargetTier};
pub use coordination::register::{RegisterValue, SENTINEL, SHARED_ARRAY_LEN};
pub use engagement::{ActionTaken, Engagement, EngagementReport, EngagementState, TargetValidation};
pub use env::{AgentRng, ArenaEnv, MAX_SENSED, RandomSource, SensedUnits, SequenceRng, compute_seed};
pub use error::{ActionError, ArenaError, ErrorSeverity};
pub use patrol::{PatrolOutcome, PatrolState};
pub use types::{Direction, Position, SensedUnit, Team, UnitId, UnitKind};
