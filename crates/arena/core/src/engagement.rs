//! Target acquisition and engagement.
//!
//! Runs once per turn for combat agents, in three steps:
//!
//! 1. **Validate** the registered target if it lies within sensing range. A
//!    target cell that is empty or held by a friendly unit is stale and the
//!    register is cleared.
//! 2. **Improve**: scan every sensed hostile and write the best one that
//!    strictly beats the (possibly just cleared) registered priority.
//! 3. **Act**: re-read the register and approach, attack, or patrol.
//!
//! No engagement state is stored between turns. The register is the only input
//! that outlives a turn, so a skipped or faulted turn leaves nothing to repair.

use crate::config::RoleProfile;
use crate::coordination::evaluator::{self, Candidate, Priority};
use crate::coordination::register::{self, RegisterValue};
use crate::env::{ArenaEnv, RandomSource};
use crate::error::ActionError;
use crate::patrol::{PatrolOutcome, PatrolState};
use crate::types::{Direction, Position};

/// Outcome of checking the registered target against local sensing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetValidation {
    /// Nothing registered.
    Empty,
    /// Registered target lies beyond sensing range and cannot be checked.
    OutOfValidation { target: Position },
    /// A hostile still occupies the registered cell.
    Confirmed { target: Position },
    /// The registered cell was empty or friendly; the register was cleared.
    Cleared { target: Position },
}

/// What the agent is doing about the registered target this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngagementState {
    NoTarget,
    Approaching { target: Position },
    Attacking { target: Position },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionTaken {
    Moved(Direction),
    Attacked(Position),
    Patrolled(PatrolOutcome),
    /// The chosen action's precondition did not hold; nothing was attempted.
    Held,
}

/// Full account of one engagement turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngagementReport {
    pub register_before: RegisterValue,
    pub validation: TargetValidation,
    pub proposal: Option<Candidate>,
    pub register_after: RegisterValue,
    pub state: EngagementState,
    pub action: ActionTaken,
}

impl EngagementReport {
    pub fn register_changed(&self) -> bool {
        self.register_before != self.register_after
    }
}

/// Engagement parameters for one agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Engagement {
    pub vision_radius_squared: u32,
    pub action_radius_squared: u32,
}

impl Engagement {
    pub const fn new(vision_radius_squared: u32, action_radius_squared: u32) -> Self {
        Self {
            vision_radius_squared,
            action_radius_squared,
        }
    }

    pub fn from_profile(profile: &RoleProfile) -> Self {
        Self::new(profile.vision_radius_squared, profile.action_radius_squared)
    }

    pub fn run<E, R>(
        &self,
        env: &mut E,
        patrol: &mut PatrolState,
        rng: &mut R,
    ) -> Result<EngagementReport, ActionError>
    where
        E: ArenaEnv + ?Sized,
        R: RandomSource,
    {
        let register_before = register::read(&*env)?;
        let validation = self.validate(env, register_before)?;

        let current = match validation {
            TargetValidation::Cleared { .. } => Priority::FLOOR,
            _ => register_before.priority,
        };
        let hostiles = env.sense_hostiles(self.vision_radius_squared);
        let proposal = evaluator::best_candidate(current, &hostiles);
        if let Some(candidate) = proposal {
            register::write(
                env,
                RegisterValue::targeting(candidate.position, candidate.priority)?,
            )?;
        }

        let register_after = register::read(&*env)?;
        let me = env.self_position();
        let state = decide(me, register_after.target(), self.action_radius_squared);
        let action = match state {
            EngagementState::NoTarget => ActionTaken::Patrolled(patrol.advance(env, rng)?),
            EngagementState::Approaching { target } => {
                let direction = me.direction_to(target);
                if env.can_move(direction) {
                    env.move_to(direction)?;
                    ActionTaken::Moved(direction)
                } else {
                    ActionTaken::Held
                }
            }
            EngagementState::Attacking { target } => {
                if env.can_attack(target) {
                    env.attack(target)?;
                    ActionTaken::Attacked(target)
                } else {
                    ActionTaken::Held
                }
            }
        };

        Ok(EngagementReport {
            register_before,
            validation,
            proposal,
            register_after,
            state,
            action,
        })
    }

    fn validate<E>(&self, env: &mut E, current: RegisterValue) -> Result<TargetValidation, ActionError>
    where
        E: ArenaEnv + ?Sized,
    {
        let Some(target) = current.target() else {
            return Ok(TargetValidation::Empty);
        };

        if env.self_position().distance_squared_to(target) > self.vision_radius_squared {
            return Ok(TargetValidation::OutOfValidation { target });
        }

        let team = env.self_team();
        match env.sense_unit_at(target) {
            Some(unit) if unit.team != team => Ok(TargetValidation::Confirmed { target }),
            _ => {
                register::clear(env)?;
                Ok(TargetValidation::Cleared { target })
            }
        }
    }
}

/// Chooses between patrolling, approaching and attacking from the register
/// contents alone.
pub fn decide(me: Position, target: Option<Position>, action_radius_squared: u32) -> EngagementState {
    match target {
        None => EngagementState::NoTarget,
        Some(target) if me.distance_squared_to(target) > action_radius_squared => {
            EngagementState::Approaching { target }
        }
        Some(target) => EngagementState::Attacking { target },
    }
}
