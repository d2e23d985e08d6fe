use chrono::{DateTime, Datelike, Duration, Months, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::{TimeScale, Viewport};

const MAX_MARKERS: usize = 1024;

/// Calendar cadence used to walk the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerGranularity {
    Monthly,
    Weekly,
    ThreeDay,
    Daily,
}

impl MarkerGranularity {
    /// Picks the cadence for a window spanning `span_days`.
    #[must_use]
    pub fn for_span_days(span_days: f64) -> Self {
        if span_days > 365.0 {
            Self::Monthly
        } else if span_days > 90.0 {
            Self::Weekly
        } else if span_days > 30.0 {
            Self::ThreeDay
        } else {
            Self::Daily
        }
    }

    #[must_use]
    pub fn is_major(self, date: DateTime<Utc>) -> bool {
        match self {
            Self::Monthly => date.month() == 1 && date.day() == 1,
            Self::Weekly => date.day() == 1,
            Self::ThreeDay | Self::Daily => date.weekday() == Weekday::Mon,
        }
    }

    fn label(self, date: DateTime<Utc>) -> String {
        match self {
            Self::Monthly => date.format("%b %Y").to_string(),
            Self::Weekly | Self::ThreeDay | Self::Daily => date.format("%b %-d").to_string(),
        }
    }

    fn advance(self, date: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Monthly => date.checked_add_months(Months::new(1)),
            Self::Weekly => date.checked_add_signed(Duration::days(7)),
            Self::ThreeDay => date.checked_add_signed(Duration::days(3)),
            Self::Daily => date.checked_add_signed(Duration::days(1)),
        }
    }
}

/// One tick on the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisMarker {
    pub date: DateTime<Utc>,
    pub label: String,
    pub x: f64,
    pub is_major: bool,
}

/// Walks the viewport from its start at the cadence its span calls for,
/// returning markers in ascending date order.
#[must_use]
pub fn generate_markers(viewport: Viewport) -> Vec<AxisMarker> {
    let granularity = MarkerGranularity::for_span_days(viewport.span_days());
    let scale = TimeScale::new(viewport);
    let mut markers = Vec::new();

    let mut cursor = Some(viewport.start);
    while let Some(date) = cursor {
        if date > viewport.end || markers.len() >= MAX_MARKERS {
            break;
        }
        markers.push(AxisMarker {
            date,
            label: granularity.label(date),
            x: scale.forward(date),
            is_major: granularity.is_major(date),
        });
        cursor = granularity.advance(date);
    }

    markers
}
