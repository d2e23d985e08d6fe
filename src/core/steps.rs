use indexmap::IndexMap;
use tracing::debug;

use crate::core::{Step, StepId, StepSpan};
use crate::error::{TimelineError, TimelineResult};

/// Local, insertion-ordered copy of the collaborator's steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepCollection {
    steps: IndexMap<StepId, Step>,
}

/// What changed when a collection was replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceSummary {
    pub count: usize,
    pub geometry_changed: bool,
}

impl StepCollection {
    pub fn new(steps: Vec<Step>) -> TimelineResult<Self> {
        let mut collection = Self::default();
        collection.replace_all(steps)?;
        Ok(collection)
    }

    /// Parses a JSON array of steps and validates every interval.
    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let steps: Vec<Step> = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse steps json payload: {e}"))
        })?;
        Self::new(steps)
    }

    /// Replaces every step. Nothing is replaced when any step is invalid.
    pub fn replace_all(&mut self, steps: Vec<Step>) -> TimelineResult<ReplaceSummary> {
        let mut next = IndexMap::with_capacity(steps.len());
        for step in steps {
            step.validate()?;
            if next.contains_key(&step.id) {
                return Err(TimelineError::InvalidData(format!(
                    "duplicate step id `{}`",
                    step.id
                )));
            }
            next.insert(step.id.clone(), step);
        }

        let geometry_changed = next.len() != self.steps.len()
            || next.iter().any(|(id, step)| {
                self.steps
                    .get(id)
                    .is_none_or(|previous| previous.span() != step.span())
            });
        self.steps = next;
        debug!(count = self.steps.len(), geometry_changed, "replace steps");
        Ok(ReplaceSummary {
            count: self.steps.len(),
            geometry_changed,
        })
    }

    /// Overwrites one step's time range and returns the previous one.
    pub fn apply_span(&mut self, id: &StepId, span: StepSpan) -> TimelineResult<StepSpan> {
        if span.end <= span.start {
            return Err(TimelineError::InvalidInterval {
                id: id.clone(),
                start: span.start,
                end: span.end,
            });
        }
        let step = self
            .steps
            .get_mut(id)
            .ok_or_else(|| TimelineError::UnknownStep(id.clone()))?;
        let previous = step.span();
        step.set_span(span);
        Ok(previous)
    }

    #[must_use]
    pub fn get(&self, id: &StepId) -> Option<&Step> {
        self.steps.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Step> {
        self.steps.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::StepCollection;
    use crate::core::{Step, StepId, StepSpan};
    use crate::error::TimelineError;

    fn step(id: &str, start_day: i64, end_day: i64) -> Step {
        let origin = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Step::new(
            id,
            origin + Duration::days(start_day),
            origin + Duration::days(end_day),
        )
    }

    #[test]
    fn failed_replace_keeps_previous_contents() {
        let mut steps = StepCollection::new(vec![step("a", 0, 2)]).expect("steps");
        let err = steps
            .replace_all(vec![step("b", 0, 1), step("b", 3, 4)])
            .expect_err("duplicate id");
        assert!(matches!(err, TimelineError::InvalidData(_)));
        assert!(steps.get(&StepId::new("a")).is_some());
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn removal_counts_as_geometry_change() {
        let mut steps = StepCollection::new(vec![step("a", 0, 2), step("b", 1, 3)]).expect("steps");
        let summary = steps.replace_all(vec![step("a", 0, 2)]).expect("replace");
        assert!(summary.geometry_changed);
    }

    #[test]
    fn apply_span_rejects_inverted_range() {
        let mut steps = StepCollection::new(vec![step("a", 0, 2)]).expect("steps");
        let inverted = StepSpan::new(step("x", 5, 6).start, step("x", 4, 5).start);
        assert!(steps.apply_span(&StepId::new("a"), inverted).is_err());
        assert!(matches!(
            steps.apply_span(&StepId::new("zz"), step("x", 1, 2).span()),
            Err(TimelineError::UnknownStep(_))
        ));
    }
}
