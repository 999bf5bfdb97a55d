//! Arena content: scenario descriptions and configuration files.
//!
//! Scenarios are written in RON and describe the arena a match is played in;
//! configuration is written in TOML and tunes [`arena_core::ArenaConfig`].
pub mod loaders;
pub mod scenario;

pub use loaders::{ConfigLoader, LoadResult, ScenarioLoader};
pub use scenario::{DepositSpec, Scenario, ScenarioError, UnitSpec};
