use anyhow::Result;
use clap::Subcommand;
use xshell::Shell;

pub mod bench;
pub mod ci;
pub mod common;
pub mod scenarios;

#[derive(Subcommand)]
pub enum Command {
    /// Run the control law benchmarks
    Bench(bench::Bench),
    /// Run CI checks (fmt, clippy, test, scenarios). Runs all if no subcommand specified.
    Ci(ci::Ci),
    /// Apply rustfmt to all files
    Fmt,
    /// Check formatting and run clippy before committing
    Precommit,
    /// Simulate every scenario under `scenarios/` and fail if one does not settle
    Scenarios(scenarios::Scenarios),
    /// Run tests
    Test(test::Test),
}

impl Command {
    pub fn run(self, sh: &Shell) -> Result<()> {
        match self {
            Command::Bench(cmd) => cmd.run(sh),
            Command::Ci(cmd) => cmd.run(sh),
            Command::Fmt => common::run_fmt(sh),
            Command::Precommit => {
                common::run_fmt_check(sh)?;
                common::run_clippy(sh)?;
                eprintln!("Precommit checks passed!");
                Ok(())
            }
            Command::Scenarios(cmd) => cmd.run(sh),
            Command::Test(cmd) => cmd.run(sh),
        }
    }
}
