//! Arena tunables and per-role capabilities.
use std::collections::BTreeMap;

use crate::types::UnitKind;

/// Capabilities of one unit kind.
///
/// Radii are squared distances. Cooldown costs are added to a unit's cooldown
/// counter by the host arena each time it acts; a cost of zero for movement
/// marks the kind as immobile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleProfile {
    pub vision_radius_squared: u32,
    pub action_radius_squared: u32,
    pub move_cooldown: u32,
    pub action_cooldown: u32,
    pub health: u32,
    pub damage: u32,
    pub build_cost: u32,
}

impl RoleProfile {
    pub const fn for_kind(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Archon => Self::new(34, 20, 0, 10, 1000, 0, 0),
            UnitKind::Laboratory => Self::new(53, 0, 0, 10, 100, 0, 180),
            UnitKind::Watchtower => Self::new(34, 20, 0, 10, 150, 4, 150),
            UnitKind::Miner => Self::new(20, 2, 10, 2, 40, 0, 50),
            UnitKind::Builder => Self::new(20, 5, 10, 10, 30, 0, 40),
            UnitKind::Soldier => Self::new(20, 13, 10, 10, 50, 3, 75),
            UnitKind::Sage => Self::new(34, 25, 10, 20, 100, 45, 0),
        }
    }

    const fn new(
        vision_radius_squared: u32,
        action_radius_squared: u32,
        move_cooldown: u32,
        action_cooldown: u32,
        health: u32,
        damage: u32,
        build_cost: u32,
    ) -> Self {
        Self {
            vision_radius_squared,
            action_radius_squared,
            move_cooldown,
            action_cooldown,
            health,
            damage,
            build_cost,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.move_cooldown > 0
    }
}

/// Match-wide configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArenaConfig {
    /// Base seed every agent generator is derived from.
    pub game_seed: u64,
    /// Upper bound on ticks a match runs for.
    pub max_ticks: u32,
    /// Per-kind overrides of [`RoleProfile::for_kind`].
    pub roles: BTreeMap<UnitKind, RoleProfile>,
}

impl ArenaConfig {
    pub const DEFAULT_GAME_SEED: u64 = 6147;
    pub const DEFAULT_MAX_TICKS: u32 = 2000;

    pub fn new() -> Self {
        Self {
            game_seed: Self::DEFAULT_GAME_SEED,
            max_ticks: Self::DEFAULT_MAX_TICKS,
            roles: BTreeMap::new(),
        }
    }

    pub fn with_seed(mut self, game_seed: u64) -> Self {
        self.game_seed = game_seed;
        self
    }

    pub fn with_profile(mut self, kind: UnitKind, profile: RoleProfile) -> Self {
        self.roles.insert(kind, profile);
        self
    }

    pub fn profile(&self, kind: UnitKind) -> RoleProfile {
        self.roles
            .get(&kind)
            .copied()
            .unwrap_or_else(|| RoleProfile::for_kind(kind))
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_defaults_for_one_kind() {
        let mut sharp = RoleProfile::for_kind(UnitKind::Soldier);
        sharp.action_radius_squared = 2;
        let config = ArenaConfig::new().with_profile(UnitKind::Soldier, sharp);

        assert_eq!(config.profile(UnitKind::Soldier).action_radius_squared, 2);
        assert_eq!(
            config.profile(UnitKind::Miner),
            RoleProfile::for_kind(UnitKind::Miner)
        );
    }

    #[test]
    fn structures_are_immobile() {
        assert!(!RoleProfile::for_kind(UnitKind::Watchtower).is_mobile());
        assert!(RoleProfile::for_kind(UnitKind::Soldier).is_mobile());
    }
}
