//! Per-agent state carried from one turn to the next.
use crate::config::RoleProfile;
use crate::env::{AgentRng, RandomSource, compute_seed};
use crate::patrol::PatrolState;
use crate::types::{Team, UnitId, UnitKind};

/// Everything an agent remembers between turns.
///
/// Engagement decisions are re-derived from the shared register and fresh
/// sensing every turn; only the patrol heading, the turn counter and the random
/// source persist here.
#[derive(Clone, Debug)]
pub struct AgentContext<R = AgentRng> {
    id: UnitId,
    kind: UnitKind,
    team: Team,
    profile: RoleProfile,
    turn_count: u32,
    pub rng: R,
    pub patrol: PatrolState,
}

impl AgentContext<AgentRng> {
    /// Context whose generator is derived from the match seed and unit id.
    pub fn seeded(id: UnitId, kind: UnitKind, team: Team, profile: RoleProfile, game_seed: u64) -> Self {
        Self::new(
            id,
            kind,
            team,
            profile,
            AgentRng::seeded(compute_seed(game_seed, id.0, 0)),
        )
    }
}

impl<R: RandomSource> AgentContext<R> {
    /// Creates the context and draws the initial patrol heading from `rng`.
    pub fn new(id: UnitId, kind: UnitKind, team: Team, profile: RoleProfile, mut rng: R) -> Self {
        let patrol = PatrolState::new(&mut rng);
        Self {
            id,
            kind,
            team,
            profile,
            turn_count: 0,
            rng,
            patrol,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Counts a new turn and returns its 1-based number.
    pub fn begin_turn(&mut self) -> u32 {
        self.turn_count = self.turn_count.saturating_add(1);
        self.turn_count
    }

    pub fn is_first_turn(&self) -> bool {
        self.turn_count == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequenceRng;
    use crate::types::Direction;

    #[test]
    fn initial_heading_comes_from_supplied_source() {
        let ctx = AgentContext::new(
            UnitId(3),
            UnitKind::Soldier,
            Team::B,
            RoleProfile::for_kind(UnitKind::Soldier),
            SequenceRng::headings(&[Direction::SouthWest]),
        );
        assert_eq!(ctx.patrol.heading(), Direction::SouthWest);
        assert_eq!(ctx.turn_count(), 0);
    }

    #[test]
    fn seeded_contexts_are_reproducible() {
        let profile = RoleProfile::for_kind(UnitKind::Soldier);
        let a = AgentContext::seeded(UnitId(9), UnitKind::Soldier, Team::A, profile, 11);
        let b = AgentContext::seeded(UnitId(9), UnitKind::Soldier, Team::A, profile, 11);
        assert_eq!(a.patrol, b.patrol);
        assert_eq!(a.rng, b.rng);
    }

    #[test]
    fn turn_counter_starts_at_one() {
        let mut ctx = AgentContext::new(
            UnitId(1),
            UnitKind::Miner,
            Team::A,
            RoleProfile::for_kind(UnitKind::Miner),
            SequenceRng::new(vec![0]),
        );
        assert_eq!(ctx.begin_turn(), 1);
        assert!(ctx.is_first_turn());
        assert_eq!(ctx.begin_turn(), 2);
        assert!(!ctx.is_first_turn());
    }
}
