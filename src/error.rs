use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::StepId;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("invalid interval `{id}`: end {end} must be after start {start}")]
    InvalidInterval {
        id: StepId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("degenerate viewport: start {start} must be before end {end}")]
    DegenerateViewport {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("invalid viewport width: {pixel_width}")]
    InvalidViewport { pixel_width: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown step `{0}`")]
    UnknownStep(StepId),

    #[error("failed to persist step `{id}`: {reason}")]
    PersistenceFailure { id: StepId, reason: String },
}
