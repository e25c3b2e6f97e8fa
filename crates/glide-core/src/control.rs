//! Bang-bang convergence with one tick of lookahead.
//!
//! Every call answers one question: given where the object is, how fast it
//! moves and where the target sits *this* tick, what acceleration should be
//! applied? The caller owns the integration (`speed += accel` followed by
//! `position += speed`) and feeds the updated state back on the next tick.
//!
//! Units are implicit: speed is position change per tick and acceleration is
//! speed change per tick. `max_accel` must be strictly positive; this is not
//! checked here (see [`crate::axis::MaxAccel`] for a validated bound).

/// Fraction of `max_accel` used to nudge a stalled object toward the target.
const TRICKLE_RATIO: f64 = 0.1;

/// Which branch of the control law produced an acceleration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The target is reachable this tick; the exact required change is applied.
    Arrive,
    /// Moving away from the target; reverse at the cap.
    AboutTurn,
    /// Full braking to avoid overshooting.
    Brake,
    /// Hold the current speed.
    Coast,
    /// Creeping too slowly to finish; add a small nudge.
    Trickle,
    /// Full acceleration toward the target.
    Accelerate,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Arrive => "arrive",
            Phase::AboutTurn => "about-turn",
            Phase::Brake => "brake",
            Phase::Coast => "coast",
            Phase::Trickle => "trickle",
            Phase::Accelerate => "accelerate",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acceleration for a single tick along with the reason it was chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Command {
    pub accel: f64,
    pub phase: Phase,
}

impl Command {
    const fn new(accel: f64, phase: Phase) -> Self {
        Self { accel, phase }
    }

    fn reflected(self) -> Self {
        Self {
            accel: -self.accel,
            ..self
        }
    }
}

/// Acceleration to apply this tick to converge on `final_pos` in minimum time.
///
/// The result never exceeds `max_accel` in magnitude.
#[inline]
pub fn acceleration_for(
    initial_pos: f64,
    final_pos: f64,
    initial_speed: f64,
    max_accel: f64,
) -> f64 {
    plan(initial_pos, final_pos, initial_speed, max_accel).accel
}

/// Like [`acceleration_for`], but also reports which [`Phase`] was taken.
pub fn plan(initial_pos: f64, final_pos: f64, initial_speed: f64, max_accel: f64) -> Command {
    if let Some(accel) = one_tick_arrival(initial_pos, final_pos, initial_speed, max_accel) {
        return Command::new(accel, Phase::Arrive);
    }

    // Reflect through the origin so the target always lies ahead.
    if initial_pos > final_pos {
        plan_forward(-initial_pos, -final_pos, -initial_speed, max_accel).reflected()
    } else {
        plan_forward(initial_pos, final_pos, initial_speed, max_accel)
    }
}

/// The exact acceleration that lands on the target next tick, if it is within
/// reach without exceeding `max_accel` anywhere along the way.
fn one_tick_arrival(
    initial_pos: f64,
    final_pos: f64,
    initial_speed: f64,
    max_accel: f64,
) -> Option<f64> {
    if initial_speed.abs() > max_accel {
        return None;
    }
    let required_speed = final_pos - initial_pos;
    if required_speed.abs() > max_accel {
        return None;
    }
    let required_accel = required_speed - initial_speed;
    (required_accel.abs() <= max_accel).then_some(required_accel)
}

/// Control law for `initial_pos <= final_pos`.
fn plan_forward(initial_pos: f64, final_pos: f64, initial_speed: f64, max_accel: f64) -> Command {
    if initial_speed < 0.0 {
        return Command::new(max_accel, Phase::AboutTurn);
    }

    // Braking right now would stop at or past the target (or close enough).
    let rest_now = rest_position(initial_pos, initial_speed, max_accel);
    let shortfall_now = final_pos - rest_now;
    if shortfall_now < max_accel {
        return Command::new(-max_accel, Phase::Brake);
    }

    // Accelerating now and braking from next tick would overshoot.
    let rest_next = rest_position(
        initial_pos + initial_speed + max_accel,
        initial_speed + max_accel + max_accel,
        max_accel,
    );
    if final_pos < rest_next {
        if initial_speed > shortfall_now {
            return Command::new(-max_accel, Phase::Brake);
        }
        let trickle = max_accel * TRICKLE_RATIO;
        if initial_speed < trickle {
            return Command::new(trickle, Phase::Trickle);
        }
        return Command::new(0.0, Phase::Coast);
    }

    Command::new(max_accel, Phase::Accelerate)
}

/// Where an object at `pos` moving at `speed` comes to rest when braking at
/// `max_accel` from this tick on.
///
/// Braking happens in whole ticks, so the stopping distance is a triangular
/// series. When `speed` is not a whole multiple of `max_accel` the series is
/// rounded up to the next tick and the unused part of the last braking step
/// is added back, which keeps the result continuous and monotonic in `speed`.
/// Any `speed` up to `max_accel` is absorbed within one tick and stops at
/// `pos`.
pub fn rest_position(pos: f64, speed: f64, max_accel: f64) -> f64 {
    if speed == 0.0 {
        return pos;
    }
    if speed < 0.0 {
        return -rest_position(-pos, -speed, max_accel);
    }

    let mut ticks = speed / max_accel;
    let fraction = ticks.fract();
    let correction = if fraction > 0.0 { 1.0 - fraction } else { 0.0 };
    ticks += correction;

    // Sum of 1..=ticks acceleration units removed while braking.
    let accel_units = (ticks * (ticks * 0.5 + 0.5)).trunc();
    let braking_distance = ticks * speed - accel_units * max_accel;

    pos + braking_distance + correction * max_accel
}
