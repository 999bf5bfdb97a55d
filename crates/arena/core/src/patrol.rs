//! Straight-line wandering used while the team has no registered target.

use crate::env::{ArenaEnv, RandomSource};
use crate::error::ActionError;
use crate::types::Direction;

/// What a patrol step did this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatrolOutcome {
    Advanced(Direction),
    /// The heading led off the arena; a fresh heading was drawn.
    Redirected { from: Direction, to: Direction },
    /// Momentarily blocked (cooldown or occupant); heading kept.
    Held(Direction),
}

/// Heading persisted across turns. Never shared with other agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatrolState {
    heading: Direction,
}

impl PatrolState {
    /// Draws the initial heading uniformly over the compass.
    pub fn new(rng: &mut impl RandomSource) -> Self {
        Self {
            heading: rng.compass_direction(),
        }
    }

    pub fn with_heading(heading: Direction) -> Self {
        Self { heading }
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Attempts exactly one move along the current heading.
    pub fn advance<E, R>(&mut self, env: &mut E, rng: &mut R) -> Result<PatrolOutcome, ActionError>
    where
        E: ArenaEnv + ?Sized,
        R: RandomSource,
    {
        let heading = self.heading;
        if env.can_move(heading) {
            env.move_to(heading)?;
            return Ok(PatrolOutcome::Advanced(heading));
        }

        let destination = env.self_position().step(heading);
        if env.is_within_bounds(destination) {
            return Ok(PatrolOutcome::Held(heading));
        }

        self.heading = rng.compass_direction();
        Ok(PatrolOutcome::Redirected {
            from: heading,
            to: self.heading,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequenceRng;
    use crate::env::fake::{Call, FakeArena};
    use crate::types::{Position, Team, UnitKind};

    #[test]
    fn keeps_heading_while_moves_succeed() {
        let mut arena = FakeArena::soldier_at(Position::new(5, 5));
        let mut rng = SequenceRng::headings(&[Direction::South]);
        let mut patrol = PatrolState::with_heading(Direction::East);

        for _ in 0..3 {
            assert_eq!(
                patrol.advance(&mut arena, &mut rng).unwrap(),
                PatrolOutcome::Advanced(Direction::East)
            );
        }

        assert_eq!(arena.position, Position::new(8, 5));
        assert_eq!(arena.moves(), vec![Direction::East; 3]);
    }

    #[test]
    fn redraws_heading_at_arena_edge() {
        let mut arena = FakeArena::soldier_at(Position::new(29, 5));
        let mut rng = SequenceRng::headings(&[Direction::West]);
        let mut patrol = PatrolState::with_heading(Direction::East);

        let outcome = patrol.advance(&mut arena, &mut rng).unwrap();

        assert_eq!(
            outcome,
            PatrolOutcome::Redirected {
                from: Direction::East,
                to: Direction::West
            }
        );
        assert!(arena.moves().is_empty());

        patrol.advance(&mut arena, &mut rng).unwrap();
        assert_eq!(arena.position, Position::new(28, 5));
    }

    #[test]
    fn obstruction_keeps_heading_without_redraw() {
        let mut arena = FakeArena::soldier_at(Position::new(5, 5)).with_unit(
            UnitKind::Miner,
            Team::A,
            Position::new(5, 6),
        );
        let mut rng = SequenceRng::headings(&[Direction::West]);
        let mut patrol = PatrolState::with_heading(Direction::North);

        let outcome = patrol.advance(&mut arena, &mut rng).unwrap();

        assert_eq!(outcome, PatrolOutcome::Held(Direction::North));
        assert_eq!(patrol.heading(), Direction::North);
        assert!(arena.violations.is_empty());
    }

    #[test]
    fn cooldown_holds_heading() {
        let mut arena = FakeArena::soldier_at(Position::new(5, 5));
        arena.move_ready = false;
        let mut rng = SequenceRng::headings(&[Direction::West]);
        let mut patrol = PatrolState::with_heading(Direction::North);

        assert_eq!(
            patrol.advance(&mut arena, &mut rng).unwrap(),
            PatrolOutcome::Held(Direction::North)
        );
        assert_eq!(
            arena.calls(),
            vec![Call::CanMove(Direction::North, false)]
        );
    }
}
