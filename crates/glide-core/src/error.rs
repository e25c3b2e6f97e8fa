use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("max acceleration must be positive and finite, got {value}")]
    InvalidMaxAccel { value: f64 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("target schedule needs at least one waypoint")]
    EmptySchedule,

    #[error("waypoint ticks must strictly increase: {tick} follows {previous}")]
    UnorderedWaypoints { previous: u64, tick: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject NaN and infinities for a named input.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFinite { field, value })
    }
}
