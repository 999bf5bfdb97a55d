//! Cooperative tick scheduler.
//!
//! Each tick runs every live agent once, to completion, in ascending unit id
//! order. Agents never interleave within a tick; the only cross-agent effect
//! is what one agent leaves in its team's shared array for the next.
use std::collections::BTreeMap;

use arena_core::{RegisterValue, Team, UnitId};
use serde::Serialize;
use tracing::{debug, info};

use crate::agent::{Agent, TurnRecord};
use crate::events::FaultRecord;
use crate::sim::{Resources, SimWorld, TeamPair};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    pub round: u32,
    pub turns: usize,
    pub live_units: TeamPair<usize>,
    pub registers: TeamPair<RegisterValue>,
    pub spawned: Vec<UnitId>,
    pub faults: Vec<FaultRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub round: u32,
    pub finished: bool,
    pub winner: Option<Team>,
    pub live_units: TeamPair<usize>,
    pub registers: TeamPair<RegisterValue>,
    pub stock: TeamPair<Resources>,
}

/// A match in progress: the arena plus one agent per live unit.
pub struct Match {
    world: SimWorld,
    agents: BTreeMap<UnitId, Agent>,
    records: Vec<TurnRecord>,
}

impl Match {
    pub fn new(mut world: SimWorld) -> Self {
        world.take_spawned();
        let mut arena = Self {
            world,
            agents: BTreeMap::new(),
            records: Vec::new(),
        };
        let ids: Vec<UnitId> = arena.world.units().map(|unit| unit.id).collect();
        arena.adopt(ids);
        arena
    }

    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut SimWorld {
        &mut self.world
    }

    pub fn agent(&self, id: UnitId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Turn records of the most recent tick.
    pub fn last_records(&self) -> &[TurnRecord] {
        &self.records
    }

    pub fn winner(&self) -> Option<Team> {
        match (self.world.live_units(Team::A), self.world.live_units(Team::B)) {
            (0, 0) => None,
            (_, 0) => Some(Team::A),
            (0, _) => Some(Team::B),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.world.round() >= self.world.config().max_ticks
            || self.world.live_units(Team::A) == 0
            || self.world.live_units(Team::B) == 0
    }

    pub fn tick(&mut self) -> TickSummary {
        let round = self.world.begin_round();
        let order: Vec<UnitId> = self.agents.keys().copied().collect();
        self.records.clear();

        for id in order {
            // Destroyed earlier this tick.
            let Some(mut view) = self.world.view(id) else {
                continue;
            };
            let Some(agent) = self.agents.get_mut(&id) else {
                continue;
            };
            self.records.push(agent.take_turn(&mut view));
        }

        let world = &self.world;
        self.agents.retain(|id, _| world.unit(*id).is_some());
        let spawned = self.world.take_spawned();
        self.adopt(spawned.clone());

        let faults: Vec<FaultRecord> = self
            .records
            .iter()
            .filter_map(FaultRecord::from_turn)
            .collect();
        let summary = TickSummary {
            round,
            turns: self.records.len(),
            live_units: TeamPair::new(
                self.world.live_units(Team::A),
                self.world.live_units(Team::B),
            ),
            registers: self.world.registers(),
            spawned,
            faults,
        };
        debug!(
            target: "runtime::match",
            round,
            turns = summary.turns,
            team_a = summary.live_units.a,
            team_b = summary.live_units.b,
            faults = summary.faults.len(),
            "Tick completed"
        );
        summary
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            round: self.world.round(),
            finished: self.is_finished(),
            winner: self.winner(),
            live_units: TeamPair::new(
                self.world.live_units(Team::A),
                self.world.live_units(Team::B),
            ),
            registers: self.world.registers(),
            stock: TeamPair::new(self.world.stock(Team::A), self.world.stock(Team::B)),
        }
    }

    fn adopt(&mut self, ids: Vec<UnitId>) {
        let seed = self.world.config().game_seed;
        for id in ids {
            let Some(unit) = self.world.unit(id) else {
                continue;
            };
            let profile = self.world.config().profile(unit.kind);
            let agent = Agent::seeded(id, unit.kind, unit.team, profile, seed);
            if self.agents.insert(id, agent).is_none() {
                info!(
                    target: "runtime::match",
                    agent = %id,
                    role = %unit.kind,
                    team = %unit.team,
                    "Agent created"
                );
            }
        }
    }
}
