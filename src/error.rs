use thiserror::Error;

use crate::time::SimTime;

/// The crate's closed error taxonomy (`spec.md` §7).
///
/// Guard failures inside events are *not* represented here: an event whose
/// preconditions no longer hold returns `Ok(())` having done nothing
/// ("soft skip"). Only the three hard failure modes below are errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// Malformed configuration object, raised by `EconomyConfig::from_value`.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Programmatic contract violation: `add_relationship` called with no
    /// `start_time`. Raised synchronously, never recovered from.
    #[error("relationship edge requires a start_time")]
    MissingStartTime,

    /// An event raised while executing. The scheduler halts the run and
    /// surfaces the current time, the failing event's name, and the cause.
    #[error("event execution failed at {time} in {event}: {cause}")]
    EventExecutionFailure {
        time: SimTime,
        event: String,
        cause: String,
    },
}

pub type SimResult<T> = Result<T, SimError>;
