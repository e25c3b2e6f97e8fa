use anyhow::{Context, Result};
use clap::Args;
use glide::{config::Config, report::Format, runner};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

#[derive(Args)]
pub struct SimulateArgs {
    /// Path to a scenario file (TOML or JSON). The built-in demo scenario is
    /// used when omitted.
    pub scenario: Option<PathBuf>,

    /// Override the acceleration bound.
    #[arg(long)]
    pub max_accel: Option<f64>,

    /// Replace the target schedule with a single fixed target.
    #[arg(long, allow_negative_numbers = true)]
    pub target: Option<f64>,

    /// Override the starting position.
    #[arg(long, allow_negative_numbers = true)]
    pub position: Option<f64>,

    /// Override the starting speed.
    #[arg(long, allow_negative_numbers = true)]
    pub speed: Option<f64>,

    /// Override the tick limit.
    #[arg(long)]
    pub max_ticks: Option<u64>,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Emit only every n-th sample.
    #[arg(long)]
    pub every: Option<u64>,

    /// Write the trace here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl SimulateArgs {
    pub fn run(&self) -> Result<()> {
        let mut config = match &self.scenario {
            Some(path) => {
                tracing::info!("Loading scenario from {}", path.display());
                Config::from_file(path)?
            }
            None => Config::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;

        tracing::info!(
            max_accel = config.max_accel,
            position = config.start.position,
            speed = config.start.speed,
            targets = config.targets.len(),
            "running scenario"
        );

        let report = runner::run(&config)?;

        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                let mut out = BufWriter::new(file);
                report.write(config.output.format, &mut out)?;
                out.flush()
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("Wrote trace to {}", path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut out = BufWriter::new(stdout.lock());
                report.write(config.output.format, &mut out)?;
                out.flush().context("failed to write trace")?;
            }
        }

        Ok(())
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(max_accel) = self.max_accel {
            config.max_accel = max_accel;
        }
        if let Some(target) = self.target {
            config.set_fixed_target(target);
        }
        if let Some(position) = self.position {
            config.start.position = position;
        }
        if let Some(speed) = self.speed {
            config.start.speed = speed;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.run.max_ticks = max_ticks;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(every) = self.every {
            config.output.every = every;
        }
    }
}
