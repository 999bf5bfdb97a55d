//! Scripted in-memory facade for unit tests.
//!
//! Records every call and flags any mutating call issued while its rule does
//! not hold, so tests can assert that the decision logic never leaks an illegal
//! action into the environment.
use std::cell::RefCell;

use super::{ArenaEnv, SensedUnits};
use crate::coordination::register::SHARED_ARRAY_LEN;
use crate::error::ActionError;
use crate::types::{Direction, Position, SensedUnit, Team, UnitId, UnitKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    CanMove(Direction, bool),
    Move(Direction),
    CanAttack(Position, bool),
    Attack(Position),
    Read(usize),
    Write(usize, u16),
    SenseAt(Position),
    SenseHostiles(u32),
    EndTurn,
}

pub(crate) struct FakeArena {
    pub id: UnitId,
    pub kind: UnitKind,
    pub team: Team,
    pub position: Position,
    pub width: i32,
    pub height: i32,
    pub units: Vec<SensedUnit>,
    pub shared: Vec<u16>,
    pub move_ready: bool,
    pub action_ready: bool,
    pub action_radius_squared: u32,
    pub calls: RefCell<Vec<Call>>,
    pub violations: Vec<String>,
}

impl FakeArena {
    pub fn soldier_at(position: Position) -> Self {
        Self {
            id: UnitId(1),
            kind: UnitKind::Soldier,
            team: Team::A,
            position,
            width: 30,
            height: 30,
            units: Vec::new(),
            shared: vec![0; SHARED_ARRAY_LEN],
            move_ready: true,
            action_ready: true,
            action_radius_squared: 13,
            calls: RefCell::new(Vec::new()),
            violations: Vec::new(),
        }
    }

    pub fn with_unit(mut self, kind: UnitKind, team: Team, position: Position) -> Self {
        let id = UnitId(100 + self.units.len() as u32);
        self.units.push(SensedUnit {
            id,
            position,
            kind,
            team,
        });
        self
    }

    pub fn with_register(mut self, x: u16, y: u16, priority: u16) -> Self {
        self.shared[0] = x;
        self.shared[1] = y;
        self.shared[2] = priority;
        self
    }

    pub fn remove_unit_at(&mut self, position: Position) {
        self.units.retain(|unit| unit.position != position);
    }

    pub fn register_cells(&self) -> (u16, u16, u16) {
        (self.shared[0], self.shared[1], self.shared[2])
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn moves(&self) -> Vec<Direction> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Move(direction) => Some(direction),
                _ => None,
            })
            .collect()
    }

    pub fn attacks(&self) -> Vec<Position> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Attack(target) => Some(target),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    fn move_allowed(&self, direction: Direction) -> bool {
        let destination = self.position.step(direction);
        self.move_ready
            && direction != Direction::Center
            && self.in_bounds(destination)
            && self.units.iter().all(|unit| unit.position != destination)
    }

    fn attack_allowed(&self, target: Position) -> bool {
        self.action_ready
            && self.position.distance_squared_to(target) <= self.action_radius_squared
            && self
                .units
                .iter()
                .any(|unit| unit.position == target && unit.team != self.team)
    }
}

impl ArenaEnv for FakeArena {
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
        1
    }

    fn sense_hostiles(&self, radius_squared: u32) -> SensedUnits {
        self.record(Call::SenseHostiles(radius_squared));
        self.units
            .iter()
            .filter(|unit| unit.team != self.team)
            .filter(|unit| self.position.distance_squared_to(unit.position) <= radius_squared)
            .copied()
            .collect()
    }

    fn sense_unit_at(&self, position: Position) -> Option<SensedUnit> {
        self.record(Call::SenseAt(position));
        self.units.iter().copied().find(|unit| unit.position == position)
    }

    fn is_within_bounds(&self, position: Position) -> bool {
        self.in_bounds(position)
    }

    fn can_move(&self, direction: Direction) -> bool {
        let allowed = self.move_allowed(direction);
        self.record(Call::CanMove(direction, allowed));
        allowed
    }

    fn move_to(&mut self, direction: Direction) -> Result<(), ActionError> {
        self.record(Call::Move(direction));
        if !self.move_allowed(direction) {
            self.violations.push(format!("move {direction} while illegal"));
            return Err(ActionError::MovementCooldown);
        }
        self.position = self.position.step(direction);
        Ok(())
    }

    fn can_attack(&self, target: Position) -> bool {
        let allowed = self.attack_allowed(target);
        self.record(Call::CanAttack(target, allowed));
        allowed
    }

    fn attack(&mut self, target: Position) -> Result<(), ActionError> {
        self.record(Call::Attack(target));
        if !self.attack_allowed(target) {
            self.violations.push(format!("attack {target:?} while illegal"));
            return Err(ActionError::NoTarget { target });
        }
        Ok(())
    }

    fn shared_array_len(&self) -> usize {
        self.shared.len()
    }

    fn read_shared(&self, index: usize) -> Result<u16, ActionError> {
        self.record(Call::Read(index));
        self.shared
            .get(index)
            .copied()
            .ok_or(ActionError::SharedIndexOutOfBounds {
                index,
                len: self.shared.len(),
            })
    }

    fn write_shared(&mut self, index: usize, value: u16) -> Result<(), ActionError> {
        self.record(Call::Write(index, value));
        let len = self.shared.len();
        match self.shared.get_mut(index) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => {
                self.violations.push(format!("write to index {index} past {len}"));
                Err(ActionError::SharedIndexOutOfBounds { index, len })
            }
        }
    }

    fn can_build(&self, _kind: UnitKind, _direction: Direction) -> bool {
        false
    }

    fn build(&mut self, kind: UnitKind, _direction: Direction) -> Result<(), ActionError> {
        self.violations.push(format!("build {kind} while illegal"));
        Err(ActionError::CannotBuild { kind })
    }

    fn can_mine_gold(&self, _position: Position) -> bool {
        false
    }

    fn mine_gold(&mut self, position: Position) -> Result<(), ActionError> {
        self.violations.push("mine gold while illegal".to_string());
        Err(ActionError::NoDeposit { position })
    }

    fn can_mine_lead(&self, _position: Position) -> bool {
        false
    }

    fn mine_lead(&mut self, position: Position) -> Result<(), ActionError> {
        self.violations.push("mine lead while illegal".to_string());
        Err(ActionError::NoDeposit { position })
    }

    fn end_turn(&mut self) {
        self.record(Call::EndTurn);
    }
}
