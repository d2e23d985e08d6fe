use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Rect, Step, StepId, StepSpan, TimeScale, Viewport};
use crate::error::TimelineResult;

use super::{LayoutConfig, TrackCache};

type TrackMembers = SmallVec<[StepSpan; 8]>;

/// Track index per step, in layout (start, id) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackAssignment {
    pub tracks: IndexMap<StepId, usize>,
    pub track_count: usize,
}

impl TrackAssignment {
    #[must_use]
    pub fn track_of(&self, id: &StepId) -> Option<usize> {
        self.tracks.get(id).copied()
    }
}

/// Output of one layout pass: rects for the steps that intersect the
/// viewport plus the full track assignment they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub rects: IndexMap<StepId, Rect>,
    pub assignment: TrackAssignment,
    pub content_height: f64,
}

/// Online interval-graph coloring: each step goes to the lowest track whose
/// members it does not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackAssigner;

impl TrackAssigner {
    /// Assigns tracks to every step, reusing cached tracks verbatim.
    ///
    /// Cached steps are seeded into their tracks before any uncached step is
    /// placed, so a step that arrives without a cache entry never lands on a
    /// track already claimed by an overlapping cached step. A cached index
    /// at or past the step count cannot come from a previous pass and is
    /// treated as a miss.
    pub fn assign<'a, I>(steps: I, cache: &mut TrackCache) -> TimelineResult<TrackAssignment>
    where
        I: IntoIterator<Item = &'a Step>,
    {
        let mut ordered: Vec<&Step> = Vec::new();
        for step in steps {
            step.validate()?;
            ordered.push(step);
        }
        ordered.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

        let track_limit = ordered.len();
        let cached_track =
            |cache: &TrackCache, id: &StepId| cache.get(id).filter(|track| *track < track_limit);

        let mut tracks: Vec<TrackMembers> = Vec::new();
        let mut cached_hits = 0_usize;
        for step in &ordered {
            if let Some(track) = cached_track(cache, &step.id) {
                if tracks.len() <= track {
                    tracks.resize_with(track + 1, TrackMembers::new);
                }
                tracks[track].push(step.span());
                cached_hits += 1;
            }
        }

        let mut assignment = IndexMap::with_capacity(ordered.len());
        for step in &ordered {
            let track = match cached_track(cache, &step.id) {
                Some(track) => track,
                None => {
                    let span = step.span();
                    let track = first_free_track(&tracks, span).unwrap_or(tracks.len());
                    if track == tracks.len() {
                        tracks.push(TrackMembers::new());
                    }
                    tracks[track].push(span);
                    cache.insert(step.id.clone(), track);
                    track
                }
            };
            assignment.insert(step.id.clone(), track);
        }

        trace!(
            steps = ordered.len(),
            cached_hits,
            track_count = tracks.len(),
            "assign tracks"
        );
        Ok(TrackAssignment {
            tracks: assignment,
            track_count: tracks.len(),
        })
    }
}

fn first_free_track(tracks: &[TrackMembers], span: StepSpan) -> Option<usize> {
    tracks
        .iter()
        .position(|members| members.iter().all(|member| !member.overlaps(span)))
}

/// Pixel rect of a step on a given track.
#[must_use]
pub fn step_rect(step: &Step, scale: TimeScale, track: usize, config: LayoutConfig) -> Rect {
    let left = scale.forward(step.start);
    let right = scale.forward(step.end);
    Rect::new(
        left,
        (right - left).max(config.min_width),
        config.track_top(track),
        config.item_height,
    )
}

/// Assigns tracks across all steps and lays out those visible in `viewport`.
pub fn compute_layout<'a, I>(
    steps: I,
    viewport: Viewport,
    cache: &mut TrackCache,
    config: LayoutConfig,
) -> TimelineResult<TimelineLayout>
where
    I: IntoIterator<Item = &'a Step>,
{
    viewport.validate()?;
    let steps: Vec<&Step> = steps.into_iter().collect();
    let assignment = TrackAssigner::assign(steps.iter().copied(), cache)?;
    let scale = TimeScale::new(viewport);
    let by_id: IndexMap<&StepId, &Step> = steps.iter().map(|step| (&step.id, *step)).collect();

    let mut rects = IndexMap::new();
    for (id, track) in &assignment.tracks {
        let Some(step) = by_id.get(id) else {
            continue;
        };
        if !viewport.contains_span(step.span()) {
            continue;
        }
        rects.insert(id.clone(), step_rect(step, scale, *track, config));
    }

    Ok(TimelineLayout {
        rects,
        content_height: config.content_height(assignment.track_count),
        assignment,
    })
}
