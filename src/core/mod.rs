pub mod axis_markers;
pub mod primitives;
pub mod scale;
pub mod steps;
pub mod time_scale;
pub mod types;
pub mod viewport;

pub use axis_markers::{AxisMarker, MarkerGranularity, generate_markers};
pub use primitives::{MILLIS_PER_DAY, parse_instant};
pub use scale::LinearScale;
pub use steps::{ReplaceSummary, StepCollection};
pub use time_scale::TimeScale;
pub use types::{Rect, Step, StepId, StepSpan, Viewport};
pub use viewport::{ViewportController, ViewportTuning};
