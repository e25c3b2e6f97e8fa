use crate::report::Format;
use anyhow::{Context, Result};
use glide_core::{Axis, MaxAccel, SettleLimits, TargetSchedule, Waypoint};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// A single-axis scenario: where the object starts, where the target goes,
/// and how the run is bounded and reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Symmetric acceleration bound, in position units per tick squared
    #[serde(default = "default_max_accel")]
    pub max_accel: f64,

    /// Initial state of the axis
    #[serde(default)]
    pub start: StartConfig,

    /// Target positions over time; the first entry applies from tick 0
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetConfig>,

    /// Termination settings
    #[serde(default)]
    pub run: RunConfig,

    /// Trace output settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartConfig {
    #[serde(default)]
    pub position: f64,

    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Tick at which the target moves here
    #[serde(default)]
    pub tick: u64,

    pub position: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Give up after this many ticks
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Allowed distance from the target and residual speed when settled
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Consecutive settled ticks before the run stops
    #[serde(default = "default_hold_ticks")]
    pub hold_ticks: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            tolerance: default_tolerance(),
            hold_ticks: default_hold_ticks(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Format,

    /// Emit every n-th sample; the final sample is always emitted
    #[serde(default = "default_every")]
    pub every: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            every: default_every(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_accel: default_max_accel(),
            start: StartConfig::default(),
            targets: default_targets(),
            run: RunConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_max_accel() -> f64 {
    0.001
}

fn default_targets() -> Vec<TargetConfig> {
    vec![TargetConfig {
        tick: 0,
        position: 50.0,
    }]
}

fn default_max_ticks() -> u64 {
    SettleLimits::default().max_ticks
}

fn default_tolerance() -> f64 {
    SettleLimits::default().tolerance
}

fn default_hold_ticks() -> u64 {
    SettleLimits::default().hold_ticks
}

fn default_every() -> u64 {
    1
}

impl Config {
    /// Load configuration from a file, auto-detecting TOML or JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content).or_else(|_| Self::from_json(&content)),
        }
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse scenario as TOML")
    }

    /// Parse configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse scenario as JSON")
    }

    /// Replace the whole target schedule with a single fixed target.
    pub fn set_fixed_target(&mut self, position: f64) {
        self.targets = vec![TargetConfig { tick: 0, position }];
    }

    pub fn max_accel(&self) -> Result<MaxAccel> {
        MaxAccel::new(self.max_accel).context("invalid max_accel")
    }

    pub fn axis(&self) -> Result<Axis> {
        Axis::checked(self.start.position, self.start.speed).context("invalid start state")
    }

    pub fn schedule(&self) -> Result<TargetSchedule> {
        let waypoints = self
            .targets
            .iter()
            .map(|t| Waypoint {
                tick: t.tick,
                position: t.position,
            })
            .collect();
        TargetSchedule::new(waypoints).context("invalid targets")
    }

    pub fn limits(&self) -> SettleLimits {
        SettleLimits {
            max_ticks: self.run.max_ticks,
            tolerance: self.run.tolerance,
            hold_ticks: self.run.hold_ticks,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.max_accel()?;
        self.axis()?;
        self.schedule()?;

        if self.run.max_ticks == 0 {
            anyhow::bail!("run.max_ticks must be at least 1");
        }
        if !(self.run.tolerance >= 0.0 && self.run.tolerance.is_finite()) {
            anyhow::bail!(
                "run.tolerance must be a non-negative number, got {}",
                self.run.tolerance
            );
        }
        if self.run.hold_ticks == 0 {
            anyhow::bail!("run.hold_ticks must be at least 1");
        }
        if self.output.every == 0 {
            anyhow::bail!("output.every must be at least 1");
        }

        Ok(())
    }
}
