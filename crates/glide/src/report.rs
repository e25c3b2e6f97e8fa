//! Rendering of simulation outcomes as a table, CSV, or JSON.

use anyhow::{Context, Result};
use glide_core::{Outcome, Sample};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Aligned columns followed by a one-line summary
    #[default]
    Table,
    /// One row per sample with a header line
    Csv,
    /// A single document with the summary and all samples
    Json,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Row {
    pub tick: u64,
    pub target: f64,
    pub position: f64,
    pub speed: f64,
    pub accel: f64,
    pub phase: &'static str,
}

impl From<&Sample> for Row {
    fn from(sample: &Sample) -> Self {
        Self {
            tick: sample.tick,
            target: sample.target,
            position: sample.position,
            speed: sample.speed,
            accel: sample.accel,
            phase: sample.phase.as_str(),
        }
    }
}

/// A trace built while the simulation runs: every `every`-th sample is kept
/// as it arrives, and [`Report::finish`] adds the final one and the summary.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub max_accel: f64,
    pub ticks: u64,
    pub settled: bool,
    pub settled_at: Option<u64>,
    pub final_position: Option<f64>,
    pub final_speed: Option<f64>,
    pub samples: Vec<Row>,
    #[serde(skip)]
    every: u64,
}

impl Report {
    pub fn new(max_accel: f64, every: u64) -> Self {
        Self {
            max_accel,
            ticks: 0,
            settled: false,
            settled_at: None,
            final_position: None,
            final_speed: None,
            samples: Vec::new(),
            every: every.max(1),
        }
    }

    pub fn record(&mut self, sample: &Sample) {
        if sample.tick % self.every == 0 {
            self.samples.push(Row::from(sample));
        }
    }

    pub fn finish(&mut self, outcome: &Outcome) {
        self.ticks = outcome.ticks;
        self.settled = outcome.is_settled();
        self.settled_at = outcome.settled_at;
        if let Some(last) = outcome.last() {
            if self.samples.last().map(|r| r.tick) != Some(last.tick) {
                self.samples.push(Row::from(last));
            }
            self.final_position = Some(last.position);
            self.final_speed = Some(last.speed);
        }
    }

    pub fn write<W: Write>(&self, format: Format, out: W) -> Result<()> {
        match format {
            Format::Table => self.write_table(out),
            Format::Csv => self.write_csv(out),
            Format::Json => self.write_json(out),
        }
    }

    fn write_table<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(
            out,
            "{:>8}  {:>14}  {:>14}  {:>12}  {:>12}  phase",
            "tick", "target", "position", "speed", "accel"
        )?;
        for row in &self.samples {
            writeln!(
                out,
                "{:>8}  {:>14.6}  {:>14.6}  {:>12.6}  {:>12.6}  {}",
                row.tick, row.target, row.position, row.speed, row.accel, row.phase
            )?;
        }
        match self.settled_at {
            Some(tick) => writeln!(out, "settled at tick {tick} after {} ticks", self.ticks)?,
            None => writeln!(out, "not settled after {} ticks", self.ticks)?,
        }
        Ok(())
    }

    fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        for row in &self.samples {
            writer.serialize(row).context("failed to write CSV row")?;
        }
        writer.flush().context("failed to flush CSV output")?;
        Ok(())
    }

    fn write_json<W: Write>(&self, mut out: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut out, self).context("failed to write JSON report")?;
        writeln!(out)?;
        Ok(())
    }
}
