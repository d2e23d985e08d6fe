//! Optimistic write-through of committed edits.

mod coordinator;

pub use coordinator::{
    ErrorReporter, OptimisticSyncCoordinator, PendingSync, RollbackPolicy, StepStore,
    SyncOutcome, TracingErrorReporter,
};
