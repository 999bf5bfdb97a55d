//! In-memory reference arena.
//!
//! [`SimWorld`] owns every unit, the per-team shared arrays and resources, and
//! hands out one [`AgentView`] at a time so that exactly one unit acts against
//! the world while its turn runs.
mod view;
mod world;

pub use view::AgentView;
pub use world::{COOLDOWN_DECAY, COOLDOWN_LIMIT, Resources, SimWorld, TeamPair, Unit};
