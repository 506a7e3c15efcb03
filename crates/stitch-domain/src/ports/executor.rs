//! Coordinating Execution Context Port
//!
//! All registry writes, bridge rebinds and change deliveries happen on a
//! single owning thread. Work that must not run inline (the deferred half of
//! a change-about-to-happen signal) is posted to that thread's executor and
//! runs on a later turn.
//!
//! ```text
//! object_will_change ──► post(task) ──► [ FIFO queue ] ──► task() on next turn
//! ```
//!
//! Implementations must run tasks in posting order.

/// A unit of work bound to the coordinating thread
pub type Task = Box<dyn FnOnce() + 'static>;

/// Executor owning the coordinating thread's task queue
pub trait MainExecutor {
    /// Enqueue `task` to run on a later turn of the coordinating context
    fn post(&self, task: Task);

    /// Number of tasks posted but not yet run
    fn pending(&self) -> usize;

    /// Executor name for diagnostics
    fn name(&self) -> &'static str;
}

impl std::fmt::Debug for dyn MainExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainExecutor")
            .field("name", &self.name())
            .field("pending", &self.pending())
            .finish()
    }
}
