//! Headless match runner.
//!
//! Loads a scenario and arena configuration, runs the match on a worker task,
//! and prints one line per tick plus a final summary.
mod config;
mod report;

use anyhow::{Context, Result};
use arena_content::{ConfigLoader, Scenario, ScenarioLoader};
use arena_core::ArenaConfig;
use runtime::{ChannelConfig, Match, MatchHandle, SimWorld};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::CliConfig;
use crate::report::Reporter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config);

    let (scenario, arena_config) = load_inputs(&config)?;
    tracing::info!(
        target: "runtime::match",
        scenario = %scenario.name,
        width = scenario.width,
        height = scenario.height,
        units = scenario.units.len(),
        seed = arena_config.game_seed,
        "Starting match"
    );

    let ticks = config
        .ticks
        .unwrap_or(arena_config.max_ticks)
        .min(arena_config.max_ticks);
    let world = SimWorld::from_scenario(&scenario, arena_config)?;
    let (handle, join) = MatchHandle::spawn(Match::new(world), ChannelConfig::default());

    let reporter = Reporter::new(config.output);
    for _ in 0..ticks {
        let summary = handle.step().await?;
        reporter.tick(&summary)?;
        if summary.live_units.a == 0 || summary.live_units.b == 0 {
            break;
        }
    }

    let summary = handle.summary().await?;
    reporter.finish(&summary)?;
    tracing::info!(
        target: "runtime::match",
        round = summary.round,
        winner = ?summary.winner,
        "Match stopped"
    );

    handle.shutdown(join).await?;
    Ok(())
}

fn load_inputs(config: &CliConfig) -> Result<(Scenario, ArenaConfig)> {
    let mut arena_config = match &config.config {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("loading arena config {}", path.display()))?,
        None => ArenaConfig::default(),
    };
    let mut scenario = match &config.scenario {
        Some(path) => ScenarioLoader::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::skirmish(),
    };
    if let Some(seed) = config.seed {
        arena_config.game_seed = seed;
        // The command line outranks the scenario file.
        scenario.seed = None;
    }
    Ok((scenario, arena_config))
}

/// Setup logging to stderr and, when possible, a log file.
///
/// Stdout is reserved for match output.
fn setup_logging(config: &CliConfig) -> Option<WorkerGuard> {
    let log_dir = config.log_directory();
    let file = match std::fs::create_dir_all(&log_dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::never(&log_dir, "arena.log");
            Some(tracing_appender::non_blocking(file_appender))
        }
        Err(error) => {
            eprintln!("log directory {} unavailable: {error}", log_dir.display());
            None
        }
    };
    let (writer, guard) = file.unzip();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let file_layer = writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if guard.is_some() {
        tracing::info!("Log file: {}/arena.log", log_dir.display());
    }
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_inputs_parse() {
        let scenario = ScenarioLoader::parse(include_str!("../scenarios/skirmish.ron")).unwrap();
        let config = ConfigLoader::parse(include_str!("../scenarios/arena.toml")).unwrap();

        assert_eq!(scenario.units.len(), 11);
        assert_eq!(config.max_ticks, 500);
        assert!(SimWorld::from_scenario(&scenario, config).is_ok());
    }

    #[test]
    fn seed_override_beats_scenario_seed() {
        let config = CliConfig {
            seed: Some(42),
            ..CliConfig::default()
        };

        let (scenario, arena_config) = load_inputs(&config).unwrap();

        assert_eq!(scenario.seed, None);
        assert_eq!(arena_config.game_seed, 42);
    }
}
