use std::io::{self, Write};

use anyhow::Result;
use arena_core::{RegisterValue, Team};
use runtime::{MatchSummary, TickSummary};

use crate::config::OutputFormat;

/// Writes match progress to stdout in the configured format.
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn tick(&self, summary: &TickSummary) -> Result<()> {
        let mut out = io::stdout().lock();
        match self.format {
            OutputFormat::Json => serde_json::to_writer(&mut out, summary)?,
            OutputFormat::Text => write!(
                out,
                "round {:>5}  A {:>3} [{}]  B {:>3} [{}]  faults {}",
                summary.round,
                summary.live_units.a,
                describe(&summary.registers.a),
                summary.live_units.b,
                describe(&summary.registers.b),
                summary.faults.len(),
            )?,
        }
        writeln!(out)?;
        Ok(())
    }

    pub fn finish(&self, summary: &MatchSummary) -> Result<()> {
        let mut out = io::stdout().lock();
        match self.format {
            OutputFormat::Json => serde_json::to_writer(&mut out, summary)?,
            OutputFormat::Text => {
                let winner = match summary.winner {
                    Some(Team::A) => "team A",
                    Some(Team::B) => "team B",
                    None => "none",
                };
                write!(
                    out,
                    "finished after {} rounds, winner: {winner}, lead A {} / B {}",
                    summary.round, summary.stock.a.lead, summary.stock.b.lead,
                )?;
            }
        }
        writeln!(out)?;
        Ok(())
    }
}

fn describe(register: &RegisterValue) -> String {
    match register.target() {
        Some(position) => format!(
            "target ({}, {}) p{}",
            position.x,
            position.y,
            register.priority.value()
        ),
        None => format!("no target p{}", register.priority.value()),
    }
}
