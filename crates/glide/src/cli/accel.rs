use anyhow::{Context, Result};
use clap::Args;
use glide_core::{Axis, MaxAccel};
use serde_json::json;

#[derive(Args)]
pub struct AccelArgs {
    /// Current position.
    #[arg(long, allow_negative_numbers = true)]
    pub position: f64,

    /// Target position.
    #[arg(long, allow_negative_numbers = true)]
    pub target: f64,

    /// Current speed, in position units per tick.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub speed: f64,

    /// Acceleration bound, in position units per tick squared.
    #[arg(long)]
    pub max_accel: f64,

    /// Print a JSON object instead of `<accel>\t<phase>`.
    #[arg(long)]
    pub json: bool,
}

impl AccelArgs {
    pub fn run(&self) -> Result<()> {
        let max_accel = MaxAccel::new(self.max_accel).context("invalid --max-accel")?;
        let axis = Axis::checked(self.position, self.speed).context("invalid input")?;
        let command = axis
            .try_command_toward(self.target, max_accel)
            .context("invalid input")?;
        tracing::debug!(?axis, target = self.target, ?command, "computed acceleration");

        if self.json {
            let value = json!({
                "accel": command.accel,
                "phase": command.phase.as_str(),
            });
            println!("{value}");
        } else {
            println!("{}\t{}", command.accel, command.phase);
        }
        Ok(())
    }
}
