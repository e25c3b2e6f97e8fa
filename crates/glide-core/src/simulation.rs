//! Fixed-step tick loop driving one [`Axis`] toward a scheduled target.
//!
//! This is the caller side of the control law: it owns the state, asks for an
//! acceleration once per tick and integrates it. The target may jump at
//! scheduled ticks, which is how a user dragging a target around is replayed.

use crate::{
    axis::{Axis, MaxAccel},
    control::Phase,
    error::{Error, Result, ensure_finite},
};

/// From `tick` onward the target sits at `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    pub tick: u64,
    pub position: f64,
}

/// Piecewise-constant target position over time.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetSchedule {
    waypoints: Vec<Waypoint>,
}

impl TargetSchedule {
    pub fn constant(position: f64) -> Self {
        Self {
            waypoints: vec![Waypoint { tick: 0, position }],
        }
    }

    /// Waypoints must be non-empty, finite, and strictly increasing in tick.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(Error::EmptySchedule);
        }
        for w in &waypoints {
            ensure_finite("target position", w.position)?;
        }
        for pair in waypoints.windows(2) {
            if pair[1].tick <= pair[0].tick {
                return Err(Error::UnorderedWaypoints {
                    previous: pair[0].tick,
                    tick: pair[1].tick,
                });
            }
        }
        Ok(Self { waypoints })
    }

    /// Target in effect at `tick`. Ticks before the first waypoint use it too.
    pub fn target_at(&self, tick: u64) -> f64 {
        let idx = self.waypoints.partition_point(|w| w.tick <= tick);
        self.waypoints[idx.saturating_sub(1)].position
    }

    /// Tick of the final target change.
    pub fn last_change(&self) -> u64 {
        self.waypoints.last().map_or(0, |w| w.tick)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }
}

/// State after one tick of integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub tick: u64,
    pub target: f64,
    pub position: f64,
    pub speed: f64,
    pub accel: f64,
    pub phase: Phase,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleLimits {
    pub max_ticks: u64,
    /// Allowed distance from the target and residual speed.
    pub tolerance: f64,
    /// Consecutive settled ticks required before the run stops.
    pub hold_ticks: u64,
}

impl Default for SettleLimits {
    fn default() -> Self {
        Self {
            max_ticks: 1_000_000,
            tolerance: 1e-9,
            hold_ticks: 3,
        }
    }
}

/// Summary of a finished run. Per-tick samples are only handed to the
/// observer passed to [`Simulation::run_until_settled_with`]; none are kept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    /// Ticks simulated during this run.
    pub ticks: u64,
    /// Tick at which the hold period completed, if it did.
    pub settled_at: Option<u64>,
    pub last: Option<Sample>,
}

impl Outcome {
    pub fn is_settled(&self) -> bool {
        self.settled_at.is_some()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.last.as_ref()
    }
}

pub struct Simulation {
    axis: Axis,
    schedule: TargetSchedule,
    max_accel: MaxAccel,
    tick: u64,
}

impl Simulation {
    pub fn new(axis: Axis, schedule: TargetSchedule, max_accel: MaxAccel) -> Self {
        Self {
            axis,
            schedule,
            max_accel,
            tick: 0,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of ticks already simulated.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn schedule(&self) -> &TargetSchedule {
        &self.schedule
    }

    pub fn step(&mut self) -> Sample {
        let tick = self.tick;
        let target = self.schedule.target_at(tick);
        let command = self.axis.step(target, self.max_accel);
        self.tick += 1;
        Sample {
            tick,
            target,
            position: self.axis.position,
            speed: self.axis.speed,
            accel: command.accel,
            phase: command.phase,
        }
    }

    /// Run until the axis has held the final target for `hold_ticks` ticks,
    /// or until `max_ticks` ticks have been simulated.
    pub fn run_until_settled(&mut self, limits: SettleLimits) -> Outcome {
        self.run_until_settled_with(limits, |_| {})
    }

    /// [`Simulation::run_until_settled`], calling `observe` after every tick.
    pub fn run_until_settled_with<F>(&mut self, limits: SettleLimits, mut observe: F) -> Outcome
    where
        F: FnMut(&Sample),
    {
        let mut outcome = Outcome {
            ticks: 0,
            settled_at: None,
            last: None,
        };
        let mut held = 0u64;
        let last_change = self.schedule.last_change();

        while self.tick < limits.max_ticks {
            let sample = self.step();
            observe(&sample);
            outcome.ticks += 1;
            outcome.last = Some(sample);

            let settled = self.axis.is_settled_at(sample.target, limits.tolerance);
            if sample.tick >= last_change && settled {
                held += 1;
            } else {
                held = 0;
            }
            if held >= limits.hold_ticks.max(1) {
                outcome.settled_at = Some(sample.tick);
                break;
            }
        }

        outcome
    }
}

impl Iterator for Simulation {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        Some(self.step())
    }
}
