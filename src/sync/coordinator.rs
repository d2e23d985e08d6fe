use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::core::{ReplaceSummary, Step, StepCollection, StepId, StepSpan};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::EditCommit;
use crate::layout::TrackCache;

/// Backing store for steps. Implementations own retry policy.
pub trait StepStore {
    fn mutate(&self, id: &StepId, span: StepSpan) -> LocalBoxFuture<'static, TimelineResult<Step>>;
}

/// Sink for errors the engine cannot resolve itself.
pub trait ErrorReporter {
    fn report(&self, error: &TimelineError);
}

/// Reports through `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, err: &TimelineError) {
        error!(error = %err, "step persistence failed");
    }
}

/// What to do with the local overwrite when persistence fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollbackPolicy {
    /// Keep the optimistic value until authoritative data is refetched.
    #[default]
    KeepLocal,
    /// Restore the previous range when the outcome is applied.
    RevertOnFailure,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Confirmed(Step),
    Failed {
        id: StepId,
        previous: StepSpan,
        attempted: StepSpan,
        error: TimelineError,
    },
}

impl SyncOutcome {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

/// Persistence call in flight; the host drives it on its local executor.
pub type PendingSync = LocalBoxFuture<'static, SyncOutcome>;

/// Counts one persistence call until its future completes or is dropped.
struct InFlightGuard(Rc<Cell<usize>>);

impl InFlightGuard {
    fn enter(counter: &Rc<Cell<usize>>) -> Self {
        counter.set(counter.get() + 1);
        Self(Rc::clone(counter))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Applies committed edits locally, then forwards them to the store.
#[derive(Clone)]
pub struct OptimisticSyncCoordinator {
    store: Rc<dyn StepStore>,
    reporter: Rc<dyn ErrorReporter>,
    policy: RollbackPolicy,
    in_flight: Rc<Cell<usize>>,
}

impl fmt::Debug for OptimisticSyncCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimisticSyncCoordinator")
            .field("policy", &self.policy)
            .field("in_flight", &self.in_flight.get())
            .finish_non_exhaustive()
    }
}

impl OptimisticSyncCoordinator {
    #[must_use]
    pub fn new(store: Rc<dyn StepStore>) -> Self {
        Self {
            store,
            reporter: Rc::new(TracingErrorReporter),
            policy: RollbackPolicy::default(),
            in_flight: Rc::new(Cell::new(0)),
        }
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: Rc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RollbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> RollbackPolicy {
        self.policy
    }

    /// Persistence calls issued but not yet resolved.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    /// Writes `commit` into `steps`, clears `cache`, and starts the store call.
    ///
    /// Local state is updated before this returns; the returned future only
    /// carries the store round-trip and never touches local state.
    pub fn commit(
        &self,
        steps: &mut StepCollection,
        cache: &mut TrackCache,
        commit: &EditCommit,
    ) -> TimelineResult<PendingSync> {
        let previous = steps.apply_span(&commit.step_id, commit.span)?;
        cache.invalidate();
        debug!(
            id = %commit.step_id,
            start = %commit.span.start,
            end = %commit.span.end,
            "apply optimistic edit"
        );

        let request = self.store.mutate(&commit.step_id, commit.span);
        let guard = InFlightGuard::enter(&self.in_flight);

        let reporter = Rc::clone(&self.reporter);
        let id = commit.step_id.clone();
        let attempted = commit.span;
        Ok(async move {
            let result = request.await;
            drop(guard);
            match result {
                Ok(step) => {
                    debug!(id = %step.id, "step persisted");
                    SyncOutcome::Confirmed(step)
                }
                Err(err) => {
                    let err = match err {
                        failure @ TimelineError::PersistenceFailure { .. } => failure,
                        other => TimelineError::PersistenceFailure {
                            id: id.clone(),
                            reason: other.to_string(),
                        },
                    };
                    reporter.report(&err);
                    SyncOutcome::Failed {
                        id,
                        previous,
                        attempted,
                        error: err,
                    }
                }
            }
        }
        .boxed_local())
    }

    /// Replaces `steps` with authoritative data; clears `cache` only when a
    /// time range changed or steps appeared or disappeared.
    pub fn reconcile(
        &self,
        steps: &mut StepCollection,
        cache: &mut TrackCache,
        incoming: Vec<Step>,
    ) -> TimelineResult<ReplaceSummary> {
        let summary = steps.replace_all(incoming)?;
        if summary.geometry_changed {
            cache.invalidate();
        }
        Ok(summary)
    }

    /// Undoes a failed optimistic write under [`RollbackPolicy::RevertOnFailure`].
    ///
    /// Nothing is reverted when the step has moved on since the attempt, so a
    /// newer edit is never clobbered by an older failure. Returns `true` when
    /// local state changed.
    pub fn revert(
        &self,
        steps: &mut StepCollection,
        cache: &mut TrackCache,
        outcome: &SyncOutcome,
    ) -> TimelineResult<bool> {
        let SyncOutcome::Failed {
            id,
            previous,
            attempted,
            ..
        } = outcome
        else {
            return Ok(false);
        };
        if self.policy != RollbackPolicy::RevertOnFailure {
            return Ok(false);
        }
        let Some(current) = steps.get(id).map(Step::span) else {
            return Ok(false);
        };
        if current != *attempted {
            debug!(%id, "skip revert, step changed since failed attempt");
            return Ok(false);
        }
        steps.apply_span(id, *previous)?;
        cache.invalidate();
        debug!(%id, "reverted failed optimistic edit");
        Ok(true)
    }
}
