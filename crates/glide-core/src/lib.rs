//! Time-optimal convergence of a single axis onto a (possibly moving) target.
//!
//! The control law in [`control`] is a pure function of the current state:
//! each tick it returns the acceleration that reaches the target in minimum
//! time under a symmetric acceleration bound, without overshooting when that
//! is avoidable and without settling into an oscillation around the target.
//! [`axis`] and [`simulation`] provide the caller-side bookkeeping: state that
//! persists between ticks and a fixed-step loop to drive it.
//!
//! This crate intentionally performs no I/O and no logging.

pub mod axis;
pub mod control;
pub mod error;
pub mod simulation;

pub use axis::{Axis, MaxAccel};
pub use control::{Command, Phase, acceleration_for, plan, rest_position};
pub use error::{Error, Result};
pub use simulation::{Outcome, Sample, SettleLimits, Simulation, TargetSchedule, Waypoint};
