//! Scenario loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::Scenario;

/// Loader for [`Scenario`] descriptions from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Reads, parses and validates a scenario file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        scenario.validate()?;
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arena_core::{Team, UnitKind};

    use super::*;

    const DUEL: &str = r#"(
        name: "duel",
        width: 12,
        height: 8,
        seed: Some(7),
        units: [
            (kind: soldier, team: A, x: 1, y: 4),
            (kind: watchtower, team: B, x: 10, y: 4),
        ],
        deposits: [(x: 5, y: 5, lead: 20)],
    )"#;

    #[test]
    fn parses_units_and_defaults() {
        let scenario = ScenarioLoader::parse(DUEL).unwrap();

        assert_eq!(scenario.name, "duel");
        assert_eq!(scenario.seed, Some(7));
        assert_eq!(scenario.starting_lead, 200);
        assert_eq!(scenario.units[1].kind, UnitKind::Watchtower);
        assert_eq!(scenario.units[1].team, Team::B);
        assert_eq!(scenario.deposits[0].gold, 0);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{DUEL}").unwrap();

        let scenario = ScenarioLoader::load(file.path()).unwrap();
        assert_eq!(scenario.units.len(), 2);
    }

    #[test]
    fn invalid_layout_is_rejected_after_parsing() {
        let broken = DUEL.replace("x: 10, y: 4", "x: 12, y: 4");
        let error = ScenarioLoader::parse(&broken).unwrap_err();
        assert!(error.to_string().contains("outside the arena"));
    }
}
