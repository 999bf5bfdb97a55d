use arena_core::{
    ActionError, ArenaEnv, Direction, MAX_SENSED, Position, RoleProfile, SensedUnit, SensedUnits,
    Team, UnitId, UnitKind,
};

use super::world::{COOLDOWN_LIMIT, SimWorld, Unit};

/// [`ArenaEnv`] for a single unit of a [`SimWorld`].
///
/// Every mutating call re-checks the rule its `can_*` predicate reports, so a
/// caller that skips the predicate is refused rather than trusted.
///
/// Identity and position are captured when the view is bound. If the unit
/// leaves the world mid-turn it keeps reporting them but can no longer act.
pub struct AgentView<'w> {
    world: &'w mut SimWorld,
    id: UnitId,
    kind: UnitKind,
    team: Team,
    position: Position,
    profile: RoleProfile,
}

impl<'w> AgentView<'w> {
    pub(super) fn new(world: &'w mut SimWorld, unit: &Unit, profile: RoleProfile) -> Self {
        Self {
            world,
            id: unit.id,
            kind: unit.kind,
            team: unit.team,
            position: unit.position,
            profile,
        }
    }

    /// Current cooldowns; a unit no longer in the world is saturated.
    fn cooldowns(&self) -> (u32, u32) {
        self.world
            .unit(self.id)
            .map_or((COOLDOWN_LIMIT, COOLDOWN_LIMIT), |unit| {
                (unit.move_cooldown, unit.action_cooldown)
            })
    }

    fn move_ready(&self) -> bool {
        self.cooldowns().0 < COOLDOWN_LIMIT
    }

    fn action_ready(&self) -> bool {
        self.cooldowns().1 < COOLDOWN_LIMIT
    }

    fn sensed(unit: &Unit) -> SensedUnit {
        SensedUnit {
            id: unit.id,
            position: unit.position,
            kind: unit.kind,
            team: unit.team,
        }
    }

    fn check_move(&self, direction: Direction) -> Result<Position, ActionError> {
        if !self.profile.is_mobile() || direction == Direction::Center {
            return Err(ActionError::Immobile { direction });
        }
        if !self.move_ready() {
            return Err(ActionError::MovementCooldown);
        }
        let destination = self.position.step(direction);
        if !self.world.contains(destination) {
            return Err(ActionError::OutOfBounds { destination });
        }
        if self.world.unit_at(destination).is_some() {
            return Err(ActionError::Occupied { destination });
        }
        Ok(destination)
    }

    fn check_attack(&self, target: Position) -> Result<UnitId, ActionError> {
        if !self.action_ready() {
            return Err(ActionError::ActionCooldown);
        }
        // Units without damage have no attack range.
        if self.profile.damage == 0
            || self.position.distance_squared_to(target) > self.profile.action_radius_squared
        {
            return Err(ActionError::OutOfRange { target });
        }
        match self.world.unit_at(target) {
            Some(unit) if unit.team != self.team => Ok(unit.id),
            _ => Err(ActionError::NoTarget { target }),
        }
    }

    fn check_build(&self, kind: UnitKind, direction: Direction) -> Result<Position, ActionError> {
        if self.kind != UnitKind::Archon || direction == Direction::Center {
            return Err(ActionError::CannotBuild { kind });
        }
        if !self.action_ready() {
            return Err(ActionError::ActionCooldown);
        }
        let destination = self.position.step(direction);
        if !self.world.contains(destination) {
            return Err(ActionError::OutOfBounds { destination });
        }
        if self.world.unit_at(destination).is_some() {
            return Err(ActionError::Occupied { destination });
        }
        let required = self.world.config().profile(kind).build_cost;
        let available = self.world.stock(self.team).lead;
        if available < required {
            return Err(ActionError::InsufficientResources {
                required,
                available,
            });
        }
        Ok(destination)
    }

    fn check_mine(&self, position: Position, gold: bool) -> Result<(), ActionError> {
        if self.kind != UnitKind::Miner {
            return Err(ActionError::NoDeposit { position });
        }
        if !self.action_ready() {
            return Err(ActionError::ActionCooldown);
        }
        if self.position.distance_squared_to(position) > self.profile.action_radius_squared {
            return Err(ActionError::OutOfRange { target: position });
        }
        let remaining = self
            .world
            .deposit(position)
            .map(|deposit| if gold { deposit.gold } else { deposit.lead })
            .unwrap_or(0);
        if remaining == 0 {
            return Err(ActionError::NoDeposit { position });
        }
        Ok(())
    }

    fn mine(&mut self, position: Position, gold: bool) -> Result<(), ActionError> {
        self.check_mine(position, gold)?;
        let team = self.team;
        if let Some(deposit) = self.world.deposit_mut(position) {
            if gold {
                deposit.gold -= 1;
            } else {
                deposit.lead -= 1;
            }
        }
        let stock = self.world.stock_mut(team);
        if gold {
            stock.gold += 1;
        } else {
            stock.lead += 1;
        }
        self.spend_action();
        Ok(())
    }

    fn spend_action(&mut self) {
        let cost = self.profile.action_cooldown;
        if let Some(unit) = self.world.unit_mut(self.id) {
            unit.action_cooldown += cost;
        }
    }
}

impl ArenaEnv for AgentView<'_> {
    fn self_id(&self) -> UnitId {
        self.id
    }

    fn self_kind(&self) -> UnitKind {
        self.kind
    }

    fn self_team(&self) -> Team {
        self.team
    }

    fn self_position(&self) -> Position {
        self.position
    }

    fn turn_number(&self) -> u32 {
        self.world.round()
    }

    fn sense_hostiles(&self, radius_squared: u32) -> SensedUnits {
        let radius_squared = radius_squared.min(self.profile.vision_radius_squared);
        self.world
            .units()
            .filter(|unit| unit.team != self.team)
            .filter(|unit| self.position.distance_squared_to(unit.position) <= radius_squared)
            .take(MAX_SENSED)
            .map(Self::sensed)
            .collect()
    }

    fn sense_unit_at(&self, position: Position) -> Option<SensedUnit> {
        if self.position.distance_squared_to(position) > self.profile.vision_radius_squared {
            return None;
        }
        self.world.unit_at(position).map(Self::sensed)
    }

    fn is_within_bounds(&self, position: Position) -> bool {
        self.world.contains(position)
    }

    fn can_move(&self, direction: Direction) -> bool {
        self.check_move(direction).is_ok()
    }

    fn move_to(&mut self, direction: Direction) -> Result<(), ActionError> {
        let destination = self.check_move(direction)?;
        self.world.relocate(self.id, destination);
        self.position = destination;
        let cost = self.profile.move_cooldown;
        if let Some(unit) = self.world.unit_mut(self.id) {
            unit.move_cooldown += cost;
        }
        Ok(())
    }

    fn can_attack(&self, target: Position) -> bool {
        self.check_attack(target).is_ok()
    }

    fn attack(&mut self, target: Position) -> Result<(), ActionError> {
        let victim = self.check_attack(target)?;
        let damage = self.profile.damage;
        let destroyed = match self.world.unit_mut(victim) {
            Some(unit) => {
                unit.health = unit.health.saturating_sub(damage);
                unit.health == 0
            }
            None => false,
        };
        if destroyed {
            self.world.remove_unit(victim);
        }
        self.spend_action();
        Ok(())
    }

    fn shared_array_len(&self) -> usize {
        self.world.shared_array(self.team).len()
    }

    fn read_shared(&self, index: usize) -> Result<u16, ActionError> {
        let cells = self.world.shared_array(self.team);
        cells
            .get(index)
            .copied()
            .ok_or(ActionError::SharedIndexOutOfBounds {
                index,
                len: cells.len(),
            })
    }

    fn write_shared(&mut self, index: usize, value: u16) -> Result<(), ActionError> {
        let cells = self.world.shared_mut(self.team);
        let len = cells.len();
        let cell = cells
            .get_mut(index)
            .ok_or(ActionError::SharedIndexOutOfBounds { index, len })?;
        *cell = value;
        Ok(())
    }

    fn can_build(&self, kind: UnitKind, direction: Direction) -> bool {
        self.check_build(kind, direction).is_ok()
    }

    fn build(&mut self, kind: UnitKind, direction: Direction) -> Result<(), ActionError> {
        let destination = self.check_build(kind, direction)?;
        let team = self.team;
        let cost = self.world.config().profile(kind).build_cost;
        self.world.stock_mut(team).lead -= cost;
        self.world.spawn(kind, team, destination);
        self.spend_action();
        Ok(())
    }

    fn can_mine_gold(&self, position: Position) -> bool {
        self.check_mine(position, true).is_ok()
    }

    fn mine_gold(&mut self, position: Position) -> Result<(), ActionError> {
        self.mine(position, true)
    }

    fn can_mine_lead(&self, position: Position) -> bool {
        self.check_mine(position, false).is_ok()
    }

    fn mine_lead(&mut self, position: Position) -> Result<(), ActionError> {
        self.mine(position, false)
    }

    fn set_indicator(&mut self, message: &str) {
        self.world.set_indicator(self.id, message);
    }

    fn end_turn(&mut self) {
        if let Some(unit) = self.world.unit_mut(self.id) {
            unit.turns_ended += 1;
        }
    }
}
