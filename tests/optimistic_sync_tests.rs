use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::{LocalPool, block_on};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use timeline_rs::core::{Step, StepCollection, StepId, StepSpan};
use timeline_rs::error::{TimelineError, TimelineResult};
use timeline_rs::interaction::{EditCommit, EditMode};
use timeline_rs::layout::TrackCache;
use timeline_rs::render::NullRenderer;
use timeline_rs::sync::{
    ErrorReporter, OptimisticSyncCoordinator, RollbackPolicy, StepStore, SyncOutcome,
};
use timeline_rs::{TimelineEngine, TimelineEngineConfig};

type Reply = oneshot::Sender<TimelineResult<Step>>;

/// Store whose calls stay pending until the test answers them.
#[derive(Default)]
struct DeferredStore {
    calls: RefCell<Vec<(StepId, StepSpan)>>,
    replies: RefCell<Vec<Reply>>,
}

impl DeferredStore {
    fn answer(&self, index: usize, result: TimelineResult<Step>) {
        let reply = self.replies.borrow_mut().remove(index);
        let _ = reply.send(result);
    }
}

impl StepStore for DeferredStore {
    fn mutate(&self, id: &StepId, span: StepSpan) -> LocalBoxFuture<'static, TimelineResult<Step>> {
        self.calls.borrow_mut().push((id.clone(), span));
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push(tx);
        async move {
            rx.await
                .unwrap_or_else(|_| Err(TimelineError::InvalidData("store dropped".to_owned())))
        }
        .boxed_local()
    }
}

#[derive(Default)]
struct RecordingReporter {
    errors: RefCell<Vec<TimelineError>>,
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, error: &TimelineError) {
        self.errors.borrow_mut().push(error.clone());
    }
}

fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::days(offset)
}

fn id() -> StepId {
    StepId::new("review")
}

fn original() -> StepSpan {
    StepSpan::new(day(0), day(3))
}

struct Harness {
    engine: TimelineEngine<NullRenderer>,
    store: Rc<DeferredStore>,
    reporter: Rc<RecordingReporter>,
}

fn harness(policy: RollbackPolicy) -> Harness {
    let store = Rc::new(DeferredStore::default());
    let reporter = Rc::new(RecordingReporter::default());
    let config = TimelineEngineConfig::new(1200.0, day(0)).with_rollback_policy(policy);
    let mut engine = TimelineEngine::new(NullRenderer::default(), config, store.clone())
        .expect("engine init")
        .with_error_reporter(reporter.clone());
    engine
        .replace_steps(vec![
            Step::new(id(), original().start, original().end),
            Step::new("other", day(1), day(2)),
        ])
        .expect("replace");
    Harness {
        engine,
        store,
        reporter,
    }
}

/// Drags the step by `days` at the default 10 px/day and releases.
fn drag_by(engine: &mut TimelineEngine<NullRenderer>, days: i64) -> LocalBoxFuture<'static, SyncOutcome> {
    engine.start_drag(&id(), 605.0).expect("start drag");
    engine.move_interaction(605.0 + days as f64 * 10.0);
    engine
        .release_interaction()
        .expect("release")
        .expect("commit issued")
}

fn span(engine: &TimelineEngine<NullRenderer>) -> StepSpan {
    engine.steps().get(&id()).expect("step").span()
}

#[test]
fn local_state_changes_before_persistence_resolves() {
    let mut h = harness(RollbackPolicy::KeepLocal);
    engine_layout(&mut h.engine);
    let generation = h.engine.track_cache().generation();

    let _pending = drag_by(&mut h.engine, 4);

    let moved = StepSpan::new(day(4), day(7));
    assert_eq!(span(&h.engine), moved);
    assert_eq!(h.engine.track_cache().generation(), generation + 1);
    assert_eq!(h.engine.pending_syncs(), 1);
    assert_eq!(*h.store.calls.borrow(), vec![(id(), moved)]);

    let layout = h.engine.compute_layout().expect("layout");
    assert_eq!(layout.assignment.track_of(&id()), Some(0));
    assert_eq!(layout.assignment.track_count, 1);
}

fn engine_layout(engine: &mut TimelineEngine<NullRenderer>) {
    let layout = engine.compute_layout().expect("layout");
    assert_eq!(layout.assignment.track_count, 2);
}

#[test]
fn confirmed_outcome_changes_nothing_further() {
    let mut h = harness(RollbackPolicy::RevertOnFailure);
    let pending = drag_by(&mut h.engine, 2);
    let moved = span(&h.engine);
    h.store
        .answer(0, Ok(Step::new(id(), moved.start, moved.end)));

    let outcome = block_on(pending);
    assert!(outcome.is_confirmed());
    assert!(!h.engine.apply_sync_outcome(&outcome).expect("apply"));
    assert_eq!(span(&h.engine), moved);
    assert_eq!(h.engine.pending_syncs(), 0);
    assert!(h.reporter.errors.borrow().is_empty());
}

#[test]
fn failure_is_reported_and_local_value_kept_by_default() {
    let mut h = harness(RollbackPolicy::KeepLocal);
    let pending = drag_by(&mut h.engine, 2);
    let moved = span(&h.engine);
    h.store.answer(
        0,
        Err(TimelineError::InvalidData("503 service unavailable".to_owned())),
    );

    let outcome = block_on(pending);
    let SyncOutcome::Failed {
        previous,
        attempted,
        ref error,
        ..
    } = outcome
    else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(previous, original());
    assert_eq!(attempted, moved);
    assert!(matches!(error, TimelineError::PersistenceFailure { .. }));
    assert_eq!(h.reporter.errors.borrow().len(), 1);

    assert!(!h.engine.apply_sync_outcome(&outcome).expect("apply"));
    assert_eq!(span(&h.engine), moved);
    assert_eq!(h.engine.pending_syncs(), 0);
}

#[test]
fn revert_policy_restores_previous_range() {
    let mut h = harness(RollbackPolicy::RevertOnFailure);
    let pending = drag_by(&mut h.engine, -3);
    let generation = h.engine.track_cache().generation();
    h.store.answer(
        0,
        Err(TimelineError::PersistenceFailure {
            id: id(),
            reason: "conflict".to_owned(),
        }),
    );

    let outcome = block_on(pending);
    assert!(h.engine.apply_sync_outcome(&outcome).expect("apply"));
    assert_eq!(span(&h.engine), original());
    assert_eq!(h.engine.track_cache().generation(), generation + 1);
    assert_eq!(
        h.reporter.errors.borrow().as_slice(),
        [TimelineError::PersistenceFailure {
            id: id(),
            reason: "conflict".to_owned(),
        }]
    );
}

#[test]
fn stale_failure_does_not_clobber_newer_edit() {
    let mut h = harness(RollbackPolicy::RevertOnFailure);
    let first = drag_by(&mut h.engine, 2);
    let second = drag_by(&mut h.engine, 3);
    let latest = span(&h.engine);
    assert_eq!(latest, StepSpan::new(day(5), day(8)));
    assert_eq!(h.engine.pending_syncs(), 2);

    h.store.answer(0, Err(TimelineError::InvalidData("timeout".to_owned())));
    let outcome = block_on(first);
    assert!(!h.engine.apply_sync_outcome(&outcome).expect("apply"));
    assert_eq!(span(&h.engine), latest);

    h.store.answer(0, Ok(Step::new(id(), latest.start, latest.end)));
    assert!(block_on(second).is_confirmed());
    assert_eq!(h.engine.pending_syncs(), 0);
}

#[test]
fn spawned_sync_does_not_block_next_interaction() {
    let mut h = harness(RollbackPolicy::KeepLocal);
    let mut pool = LocalPool::new();
    let resolved: Rc<RefCell<Option<SyncOutcome>>> = Rc::new(RefCell::new(None));

    let pending = drag_by(&mut h.engine, 2);
    let slot = resolved.clone();
    pool.spawner()
        .spawn_local(async move {
            *slot.borrow_mut() = Some(pending.await);
        })
        .expect("spawn");
    pool.run_until_stalled();
    assert!(resolved.borrow().is_none());

    assert!(h.engine.start_pan(0.0).expect("pan while syncing"));
    h.engine.move_pan(45.0);
    h.engine.end_pan().expect("end pan");
    assert_eq!(h.engine.pending_syncs(), 1);

    let moved = span(&h.engine);
    h.store.answer(0, Ok(Step::new(id(), moved.start, moved.end)));
    pool.run_until_stalled();
    assert!(resolved.borrow().as_ref().is_some_and(SyncOutcome::is_confirmed));
    assert_eq!(h.engine.pending_syncs(), 0);
}

#[test]
fn abandoned_sync_no_longer_counts_as_pending() {
    let mut h = harness(RollbackPolicy::KeepLocal);
    let unpolled = drag_by(&mut h.engine, 1);
    assert_eq!(h.engine.pending_syncs(), 1);
    drop(unpolled);
    assert_eq!(h.engine.pending_syncs(), 0);

    let mut pool = LocalPool::new();
    let started = drag_by(&mut h.engine, 2);
    pool.spawner()
        .spawn_local(async move {
            started.await;
        })
        .expect("spawn");
    pool.run_until_stalled();
    assert_eq!(h.engine.pending_syncs(), 1);

    drop(pool);
    assert_eq!(h.engine.pending_syncs(), 0);
    assert_eq!(span(&h.engine), StepSpan::new(day(3), day(6)));
}

#[test]
fn dropped_store_reply_surfaces_as_failure() {
    let mut h = harness(RollbackPolicy::KeepLocal);
    let pending = drag_by(&mut h.engine, 1);
    h.store.replies.borrow_mut().clear();

    let outcome = block_on(pending);
    assert!(!outcome.is_confirmed());
    assert_eq!(h.reporter.errors.borrow().len(), 1);
}

#[test]
fn reconcile_keeps_cache_when_geometry_is_unchanged() {
    let mut h = harness(RollbackPolicy::KeepLocal);
    h.engine.compute_layout().expect("layout");
    let generation = h.engine.track_cache().generation();

    let relabelled = vec![
        Step::new(id(), original().start, original().end).with_label("Review v2"),
        Step::new("other", day(1), day(2)),
    ];
    let summary = h.engine.replace_steps(relabelled).expect("replace");
    assert!(!summary.geometry_changed);
    assert_eq!(h.engine.track_cache().generation(), generation);
    assert_eq!(h.engine.track_cache().len(), 2);

    let moved = vec![
        Step::new(id(), day(10), day(12)),
        Step::new("other", day(1), day(2)),
    ];
    assert!(h.engine.replace_steps(moved).expect("replace").geometry_changed);
    assert_eq!(h.engine.track_cache().generation(), generation + 1);
}

#[test]
fn invalid_refetch_leaves_local_state_untouched() {
    let mut h = harness(RollbackPolicy::KeepLocal);
    let before = h.engine.steps().clone();

    let err = h
        .engine
        .replace_steps(vec![Step::new("bad", day(5), day(1))])
        .expect_err("inverted interval");
    assert!(matches!(err, TimelineError::InvalidInterval { .. }));
    assert_eq!(h.engine.steps(), &before);
}

#[test]
fn coordinator_commit_is_usable_without_engine() {
    let store = Rc::new(DeferredStore::default());
    let coordinator = OptimisticSyncCoordinator::new(store.clone());
    let mut steps =
        StepCollection::new(vec![Step::new(id(), original().start, original().end)]).expect("steps");
    let mut cache = TrackCache::new();
    cache.insert(id(), 0);

    let commit = EditCommit {
        step_id: id(),
        mode: EditMode::ResizingRight,
        span: StepSpan::new(day(0), day(9)),
        previous: original(),
    };
    let pending = coordinator
        .commit(&mut steps, &mut cache, &commit)
        .expect("commit");

    assert!(cache.is_empty());
    assert_eq!(steps.get(&id()).map(Step::span), Some(commit.span));
    assert_eq!(coordinator.in_flight(), 1);

    store.answer(0, Ok(Step::new(id(), day(0), day(9))));
    assert!(block_on(pending).is_confirmed());
    assert_eq!(coordinator.in_flight(), 0);
}

#[test]
fn commit_for_unknown_step_fails_without_calling_store() {
    let store = Rc::new(DeferredStore::default());
    let coordinator = OptimisticSyncCoordinator::new(store.clone());
    let mut steps = StepCollection::default();
    let mut cache = TrackCache::new();
    let commit = EditCommit {
        step_id: id(),
        mode: EditMode::Dragging,
        span: original(),
        previous: original(),
    };

    assert!(coordinator.commit(&mut steps, &mut cache, &commit).is_err());
    assert!(store.calls.borrow().is_empty());
    assert_eq!(coordinator.in_flight(), 0);
}
