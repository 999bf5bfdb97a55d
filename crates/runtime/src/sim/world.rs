use std::collections::BTreeMap;

use arena_content::Scenario;
use arena_core::coordination::register::{PRIORITY_INDEX, TARGET_X_INDEX, TARGET_Y_INDEX};
use arena_core::{
    ArenaConfig, Position, Priority, RegisterValue, SHARED_ARRAY_LEN, Team, UnitId, UnitKind,
};
use serde::Serialize;

use super::AgentView;
use crate::error::{Result, RuntimeError};

/// A unit may act while the matching cooldown counter is below this value.
pub const COOLDOWN_LIMIT: u32 = 10;

/// Amount every cooldown counter drops at the start of each round.
pub const COOLDOWN_DECAY: u32 = 10;

/// One value per team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TeamPair<T> {
    pub a: T,
    pub b: T,
}

impl<T> TeamPair<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn get(&self, team: Team) -> &T {
        match team {
            Team::A => &self.a,
            Team::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, team: Team) -> &mut T {
        match team {
            Team::A => &mut self.a,
            Team::B => &mut self.b,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Resources {
    pub lead: u32,
    pub gold: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub team: Team,
    pub position: Position,
    pub health: u32,
    pub move_cooldown: u32,
    pub action_cooldown: u32,
    /// Number of times this unit has yielded back to the scheduler.
    pub turns_ended: u32,
}

pub struct SimWorld {
    width: u32,
    height: u32,
    round: u32,
    config: ArenaConfig,
    units: BTreeMap<UnitId, Unit>,
    occupancy: BTreeMap<Position, UnitId>,
    next_id: u32,
    shared: TeamPair<Vec<u16>>,
    stock: TeamPair<Resources>,
    deposits: BTreeMap<Position, Resources>,
    spawned: Vec<UnitId>,
    indicators: BTreeMap<UnitId, String>,
}

impl SimWorld {
    /// Empty arena. Shared arrays start zeroed, as an unprepared host would
    /// leave them.
    pub fn new(width: u32, height: u32, config: ArenaConfig) -> Self {
        Self {
            width,
            height,
            round: 0,
            config,
            units: BTreeMap::new(),
            occupancy: BTreeMap::new(),
            next_id: 1,
            shared: TeamPair::new(vec![0; SHARED_ARRAY_LEN], vec![0; SHARED_ARRAY_LEN]),
            stock: TeamPair::default(),
            deposits: BTreeMap::new(),
            spawned: Vec::new(),
            indicators: BTreeMap::new(),
        }
    }

    pub fn from_scenario(scenario: &Scenario, mut config: ArenaConfig) -> Result<Self> {
        scenario.validate()?;
        if let Some(seed) = scenario.seed {
            config.game_seed = seed;
        }

        let mut world = Self::new(scenario.width, scenario.height, config);
        for team in [Team::A, Team::B] {
            world.stock.get_mut(team).lead = scenario.starting_lead;
        }
        for unit in &scenario.units {
            world
                .spawn(unit.kind, unit.team, unit.position())
                .ok_or(RuntimeError::PlacementFailed {
                    position: unit.position(),
                })?;
        }
        for deposit in &scenario.deposits {
            world.add_deposit(deposit.position(), deposit.lead, deposit.gold);
        }
        // Scenario units are not spawns; they get agents when the match is built.
        world.spawned.clear();
        Ok(world)
    }

    /// Places a unit at full health. Returns `None` if the cell is off the
    /// arena or taken.
    pub fn spawn(&mut self, kind: UnitKind, team: Team, position: Position) -> Option<UnitId> {
        if !self.contains(position) || self.occupancy.contains_key(&position) {
            return None;
        }
        let id = UnitId(self.next_id);
        self.next_id += 1;
        let unit = Unit {
            id,
            kind,
            team,
            position,
            health: self.config.profile(kind).health,
            move_cooldown: 0,
            action_cooldown: 0,
            turns_ended: 0,
        };
        self.units.insert(id, unit);
        self.occupancy.insert(position, id);
        self.spawned.push(id);
        Some(id)
    }

    pub fn add_deposit(&mut self, position: Position, lead: u32, gold: u32) {
        let deposit = self.deposits.entry(position).or_default();
        deposit.lead += lead;
        deposit.gold += gold;
    }

    pub fn set_stock(&mut self, team: Team, resources: Resources) {
        *self.stock.get_mut(team) = resources;
    }

    /// Advances the round counter and lets cooldowns recover.
    pub fn begin_round(&mut self) -> u32 {
        self.round += 1;
        for unit in self.units.values_mut() {
            unit.move_cooldown = unit.move_cooldown.saturating_sub(COOLDOWN_DECAY);
            unit.action_cooldown = unit.action_cooldown.saturating_sub(COOLDOWN_DECAY);
        }
        self.round
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_at(&self, position: Position) -> Option<&Unit> {
        self.occupancy
            .get(&position)
            .and_then(|id| self.units.get(id))
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn live_units(&self, team: Team) -> usize {
        self.units.values().filter(|unit| unit.team == team).count()
    }

    pub fn shared_array(&self, team: Team) -> &[u16] {
        self.shared.get(team)
    }

    /// Decodes the team's register cells without going through an agent.
    pub fn register(&self, team: Team) -> RegisterValue {
        let cells = self.shared.get(team);
        RegisterValue {
            x: cells[TARGET_X_INDEX],
            y: cells[TARGET_Y_INDEX],
            priority: Priority::new(cells[PRIORITY_INDEX]),
        }
    }

    pub fn registers(&self) -> TeamPair<RegisterValue> {
        TeamPair::new(self.register(Team::A), self.register(Team::B))
    }

    pub fn stock(&self, team: Team) -> Resources {
        *self.stock.get(team)
    }

    pub fn deposit(&self, position: Position) -> Option<Resources> {
        self.deposits.get(&position).copied()
    }

    pub fn indicator(&self, id: UnitId) -> Option<&str> {
        self.indicators.get(&id).map(String::as_str)
    }

    /// Units created since the last call.
    pub fn take_spawned(&mut self) -> Vec<UnitId> {
        std::mem::take(&mut self.spawned)
    }

    /// Binds the facade to one live unit for the duration of its turn.
    pub fn view(&mut self, id: UnitId) -> Option<AgentView<'_>> {
        let unit = self.units.get(&id)?.clone();
        let profile = self.config.profile(unit.kind);
        Some(AgentView::new(self, &unit, profile))
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub(crate) fn relocate(&mut self, id: UnitId, destination: Position) {
        let Some(unit) = self.units.get_mut(&id) else {
            return;
        };
        self.occupancy.remove(&unit.position);
        unit.position = destination;
        self.occupancy.insert(destination, id);
    }

    pub(crate) fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let unit = self.units.remove(&id)?;
        self.occupancy.remove(&unit.position);
        self.indicators.remove(&id);
        Some(unit)
    }

    pub(crate) fn shared_mut(&mut self, team: Team) -> &mut Vec<u16> {
        self.shared.get_mut(team)
    }

    pub(crate) fn stock_mut(&mut self, team: Team) -> &mut Resources {
        self.stock.get_mut(team)
    }

    pub(crate) fn deposit_mut(&mut self, position: Position) -> Option<&mut Resources> {
        self.deposits.get_mut(&position)
    }

    pub(crate) fn set_indicator(&mut self, id: UnitId, message: &str) {
        self.indicators.insert(id, message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_rejects_taken_and_outside_cells() {
        let mut world = SimWorld::new(5, 5, ArenaConfig::default());
        assert!(world.spawn(UnitKind::Soldier, Team::A, Position::new(1, 1)).is_some());
        assert!(world.spawn(UnitKind::Soldier, Team::B, Position::new(1, 1)).is_none());
        assert!(world.spawn(UnitKind::Soldier, Team::B, Position::new(5, 0)).is_none());
    }

    #[test]
    fn cooldowns_recover_each_round() {
        let mut world = SimWorld::new(5, 5, ArenaConfig::default());
        let id = world.spawn(UnitKind::Soldier, Team::A, Position::new(1, 1)).unwrap();
        world.unit_mut(id).unwrap().move_cooldown = 25;

        world.begin_round();
        assert_eq!(world.unit(id).unwrap().move_cooldown, 15);
        world.begin_round();
        world.begin_round();
        assert_eq!(world.unit(id).unwrap().move_cooldown, 0);
    }

    #[test]
    fn scenario_seed_overrides_config() {
        let mut scenario = Scenario::skirmish();
        scenario.seed = Some(99);
        let world = SimWorld::from_scenario(&scenario, ArenaConfig::default()).unwrap();

        assert_eq!(world.config().game_seed, 99);
        assert_eq!(world.live_units(Team::A), 5);
        assert_eq!(world.stock(Team::B).lead, scenario.starting_lead);
    }

    #[test]
    fn fresh_shared_arrays_are_zeroed() {
        let world = SimWorld::new(5, 5, ArenaConfig::default());
        let register = world.register(Team::A);
        assert_eq!((register.x, register.y, register.priority.value()), (0, 0, 0));
    }
}
