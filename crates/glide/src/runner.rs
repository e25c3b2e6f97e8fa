use crate::{config::Config, report::Report};
use anyhow::Result;
use glide_core::Simulation;

/// Run a validated scenario to completion, logging each tick at debug level.
///
/// Only the samples selected by `output.every` are kept, so memory stays
/// bounded by the trace length rather than the run length.
pub fn run(config: &Config) -> Result<Report> {
    let max_accel = config.max_accel()?;
    let mut simulation = Simulation::new(config.axis()?, config.schedule()?, max_accel);
    let mut report = Report::new(max_accel.get(), config.output.every);

    let outcome = simulation.run_until_settled_with(config.limits(), |sample| {
        tracing::debug!(
            tick = sample.tick,
            target = sample.target,
            position = sample.position,
            speed = sample.speed,
            accel = sample.accel,
            phase = %sample.phase,
            "tick"
        );
        report.record(sample);
    });
    report.finish(&outcome);

    match outcome.settled_at {
        Some(tick) => tracing::info!(
            tick,
            position = simulation.axis().position,
            "settled on final target"
        ),
        None => tracing::warn!(
            ticks = outcome.ticks,
            position = simulation.axis().position,
            speed = simulation.axis().speed,
            "did not settle within the tick limit"
        ),
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_default_scenario() {
        let report = run(&Config::default()).unwrap();
        assert!(report.settled);
        assert_eq!(report.final_position, Some(50.0));
        assert_eq!(report.samples.last().unwrap().position, 50.0);
    }

    #[test]
    fn honours_tick_limit() {
        let mut config = Config::default();
        config.run.max_ticks = 25;
        let report = run(&config).unwrap();
        assert!(!report.settled);
        assert_eq!(report.ticks, 25);
        assert_eq!(report.samples.len(), 25);
    }

    #[test]
    fn long_run_keeps_only_sampled_rows() {
        let mut config = Config {
            max_accel: 1e-6,
            ..Config::default()
        };
        config.set_fixed_target(1e12);
        config.run.max_ticks = 1_000_000;
        config.output.every = 100_000;
        let report = run(&config).unwrap();

        assert!(!report.settled);
        assert_eq!(report.ticks, 1_000_000);
        let ticks: Vec<u64> = report.samples.iter().map(|r| r.tick).collect();
        let mut expected: Vec<u64> = (0..10).map(|i| i * 100_000).collect();
        expected.push(999_999);
        assert_eq!(ticks, expected);
    }

    #[test]
    fn rejects_invalid_scenario() {
        let mut config = Config::default();
        config.start.speed = f64::NAN;
        assert!(run(&config).is_err());
    }
}
