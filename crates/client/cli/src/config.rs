//! Match runner configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

/// How match progress is written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// RON scenario; the built-in skirmish when unset.
    pub scenario: Option<PathBuf>,
    /// TOML arena configuration; defaults when unset.
    pub config: Option<PathBuf>,
    pub ticks: Option<u32>,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub output: OutputFormat,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_SCENARIO` - Scenario file (default: built-in skirmish)
    /// - `ARENA_CONFIG` - Arena configuration file (default: built-in profiles)
    /// - `ARENA_TICKS` - Ticks to run, capped by the configured maximum
    /// - `ARENA_SEED` - Game seed override
    /// - `ARENA_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `ARENA_OUTPUT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        Self {
            scenario: env::var_os("ARENA_SCENARIO").map(PathBuf::from),
            config: env::var_os("ARENA_CONFIG").map(PathBuf::from),
            ticks: read_env("ARENA_TICKS"),
            seed: read_env("ARENA_SEED"),
            log_dir: env::var_os("ARENA_LOG_DIR").map(PathBuf::from),
            output: read_env("ARENA_OUTPUT").unwrap_or_default(),
        }
    }

    /// Configured log directory, else the platform cache directory.
    pub fn log_directory(&self) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "arena")
            .map(|dirs| dirs.cache_dir().join("logs"))
            .unwrap_or_else(|| env::temp_dir().join("arena").join("logs"))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
