//! Caller-side state for a single axis.

use crate::{
    control::{Command, plan},
    error::{Error, Result, ensure_finite},
};

/// A validated acceleration bound: finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct MaxAccel(f64);

impl MaxAccel {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidMaxAccel { value })
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for MaxAccel {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

/// Position and speed of one axis, carried from tick to tick by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Axis {
    pub position: f64,
    pub speed: f64,
}

impl Axis {
    pub const fn new(position: f64, speed: f64) -> Self {
        Self { position, speed }
    }

    pub const fn at_rest(position: f64) -> Self {
        Self::new(position, 0.0)
    }

    /// Build an axis from untrusted input, rejecting NaN and infinities.
    pub fn checked(position: f64, speed: f64) -> Result<Self> {
        Ok(Self::new(
            ensure_finite("position", position)?,
            ensure_finite("speed", speed)?,
        ))
    }

    /// The command for this tick without advancing the axis.
    pub fn command_toward(&self, target: f64, max_accel: MaxAccel) -> Command {
        plan(self.position, target, self.speed, max_accel.get())
    }

    /// [`Axis::command_toward`] for an untrusted target, rejecting NaN and
    /// infinities.
    pub fn try_command_toward(&self, target: f64, max_accel: MaxAccel) -> Result<Command> {
        let target = ensure_finite("target", target)?;
        Ok(self.command_toward(target, max_accel))
    }

    /// Advance one tick: apply the command to the speed, then the speed to
    /// the position.
    pub fn step(&mut self, target: f64, max_accel: MaxAccel) -> Command {
        let command = self.command_toward(target, max_accel);
        self.speed += command.accel;
        self.position += self.speed;
        command
    }

    pub fn is_settled_at(&self, target: f64, tolerance: f64) -> bool {
        (self.position - target).abs() <= tolerance && self.speed.abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Phase;

    #[test]
    fn max_accel_rejects_non_positive() {
        assert_eq!(MaxAccel::new(0.0), Err(Error::InvalidMaxAccel { value: 0.0 }));
        assert!(MaxAccel::new(-0.5).is_err());
        assert!(MaxAccel::new(f64::INFINITY).is_err());
        assert!(MaxAccel::try_from(f64::NAN).is_err());
        assert_eq!(MaxAccel::new(0.25).unwrap().get(), 0.25);
    }

    #[test]
    fn checked_rejects_non_finite_state() {
        assert_eq!(
            Axis::checked(f64::NAN, 0.0).unwrap_err().to_string(),
            "position must be finite, got NaN"
        );
        assert!(Axis::checked(0.0, f64::NEG_INFINITY).is_err());
        assert_eq!(Axis::checked(1.0, -2.0).unwrap(), Axis::new(1.0, -2.0));
    }

    #[test]
    fn try_command_toward_rejects_non_finite_target() {
        let axis = Axis::at_rest(0.0);
        let max_accel = MaxAccel::new(0.1).unwrap();
        assert_eq!(
            axis.try_command_toward(f64::INFINITY, max_accel),
            Err(Error::NonFinite {
                field: "target",
                value: f64::INFINITY
            })
        );
        assert!(axis.try_command_toward(f64::NAN, max_accel).is_err());
        assert_eq!(
            axis.try_command_toward(1.0, max_accel).unwrap(),
            axis.command_toward(1.0, max_accel)
        );
    }

    #[test]
    fn step_integrates_speed_then_position() {
        let mut axis = Axis::at_rest(0.0);
        let max_accel = MaxAccel::new(0.1).unwrap();

        let cmd = axis.step(1.0, max_accel);
        assert_eq!(cmd.phase, Phase::Accelerate);
        assert_eq!(axis, Axis::new(0.1, 0.1));

        axis.step(1.0, max_accel);
        assert_eq!(axis.speed, 0.2);
    }

    #[test]
    fn command_toward_does_not_mutate() {
        let axis = Axis::new(4.0, 0.5);
        let max_accel = MaxAccel::new(0.1).unwrap();
        let _ = axis.command_toward(0.0, max_accel);
        assert_eq!(axis, Axis::new(4.0, 0.5));
    }

    #[test]
    fn reaches_stationary_target_from_rest() {
        let mut axis = Axis::at_rest(0.0);
        let max_accel = MaxAccel::new(0.1).unwrap();
        let mut ticks = 0;
        while !axis.is_settled_at(1.0, 0.0) {
            axis.step(1.0, max_accel);
            assert!(axis.position <= 1.0);
            ticks += 1;
            assert!(ticks < 100, "did not settle: {axis:?}");
        }
        assert_eq!(axis, Axis::new(1.0, 0.0));
    }
}
