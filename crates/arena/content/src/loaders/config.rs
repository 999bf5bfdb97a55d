//! Arena configuration loader.

use std::path::Path;

use arena_core::ArenaConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`ArenaConfig`] from TOML files.
///
/// Omitted keys keep their defaults; role profiles are given per kind under a
/// `[roles.<kind>]` table and replace that kind's defaults entirely.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<ArenaConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ArenaConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arena_core::{RoleProfile, UnitKind};

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), ArenaConfig::default());
    }

    #[test]
    fn role_table_overrides_one_kind() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
game_seed = 99
max_ticks = 50

[roles.soldier]
vision_radius_squared = 25
action_radius_squared = 9
move_cooldown = 10
action_cooldown = 10
health = 60
damage = 5
build_cost = 80
"#
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();

        assert_eq!(config.game_seed, 99);
        assert_eq!(config.max_ticks, 50);
        assert_eq!(config.profile(UnitKind::Soldier).action_radius_squared, 9);
        assert_eq!(
            config.profile(UnitKind::Sage),
            RoleProfile::for_kind(UnitKind::Sage)
        );
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let error = ConfigLoader::parse("game_seed = \"six\"").unwrap_err();
        assert!(error.to_string().contains("Failed to parse config TOML"));
    }
}
