//! Scenario description format.
use std::collections::BTreeSet;

use arena_core::{Position, SENTINEL, Team, UnitKind};
use serde::{Deserialize, Serialize};

/// Starting layout of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Overrides the configured game seed when present.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "Scenario::default_starting_lead")]
    pub starting_lead: u32,
    pub units: Vec<UnitSpec>,
    #[serde(default)]
    pub deposits: Vec<DepositSpec>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub kind: UnitKind,
    pub team: Team,
    pub x: i32,
    pub y: i32,
}

impl UnitSpec {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositSpec {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub lead: u32,
    #[serde(default)]
    pub gold: u32,
}

impl DepositSpec {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    #[error("arena must be at least 1x1, got {width}x{height}")]
    Empty { width: u32, height: u32 },

    /// Every coordinate must fit a shared cell without colliding with the sentinel.
    #[error("arena {width}x{height} exceeds the largest encodable size {max}")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("unit {index} at ({x}, {y}) lies outside the arena")]
    UnitOutOfBounds { index: usize, x: i32, y: i32 },

    #[error("more than one unit placed at ({x}, {y})")]
    Overlap { x: i32, y: i32 },

    #[error("deposit at ({x}, {y}) lies outside the arena")]
    DepositOutOfBounds { x: i32, y: i32 },
}

impl Scenario {
    const MAX_SIDE: u32 = SENTINEL as u32;

    fn default_starting_lead() -> u32 {
        200
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.width == 0 || self.height == 0 {
            return Err(ScenarioError::Empty {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > Self::MAX_SIDE || self.height > Self::MAX_SIDE {
            return Err(ScenarioError::TooLarge {
                width: self.width,
                height: self.height,
                max: Self::MAX_SIDE,
            });
        }

        let mut occupied = BTreeSet::new();
        for (index, unit) in self.units.iter().enumerate() {
            if !self.contains(unit.position()) {
                return Err(ScenarioError::UnitOutOfBounds {
                    index,
                    x: unit.x,
                    y: unit.y,
                });
            }
            if !occupied.insert(unit.position()) {
                return Err(ScenarioError::Overlap {
                    x: unit.x,
                    y: unit.y,
                });
            }
        }

        if let Some(deposit) = self.deposits.iter().find(|d| !self.contains(d.position())) {
            return Err(ScenarioError::DepositOutOfBounds {
                x: deposit.x,
                y: deposit.y,
            });
        }
        Ok(())
    }

    /// Mirrored two-team opening used when no scenario file is supplied.
    pub fn skirmish() -> Self {
        let mut units = Vec::new();
        for (team, archon_x, front_x) in [(Team::A, 2, 6), (Team::B, 27, 23)] {
            units.push(UnitSpec {
                kind: UnitKind::Archon,
                team,
                x: archon_x,
                y: 15,
            });
            for y in [12, 15, 18] {
                units.push(UnitSpec {
                    kind: UnitKind::Soldier,
                    team,
                    x: front_x,
                    y,
                });
            }
            units.push(UnitSpec {
                kind: UnitKind::Miner,
                team,
                x: archon_x,
                y: 13,
            });
        }
        units.push(UnitSpec {
            kind: UnitKind::Watchtower,
            team: Team::B,
            x: 20,
            y: 15,
        });

        let deposits = [(3, 12), (26, 12), (15, 5), (15, 25)]
            .into_iter()
            .map(|(x, y)| DepositSpec {
                x,
                y,
                lead: 60,
                gold: 5,
            })
            .collect();

        Self {
            name: "skirmish".to_string(),
            width: 30,
            height: 30,
            seed: None,
            starting_lead: Self::default_starting_lead(),
            units,
            deposits,
        }
    }
}
