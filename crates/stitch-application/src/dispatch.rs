//! Coordinating Execution Context
//!
//! Every thread that owns a dependency map also owns a main executor. The
//! observation bridge never forwards a change signal inline; it posts the
//! delivery here so it runs on a later turn, after the mutation completed.
//!
//! ## Pattern
//!
//! ```text
//! object_will_change ──► dispatch::post(task) ──► current executor
//!                                                    │
//!                          TaskQueue (default) ◄─────┤
//!                          MainLoop  (tokio)   ◄─────┘
//! ```
//!
//! Without an explicitly installed executor, tasks go to this thread's
//! default [`TaskQueue`], which is drained with [`drain_main_queue`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use stitch_domain::ports::{MainExecutor, Task};
use tracing::trace;

// ============================================================================
// Task Queue (default executor)
// ============================================================================

/// FIFO task queue drained explicitly by its owner
///
/// Tasks posted while the queue is draining join the back of the queue and
/// run during the same drain.
#[derive(Default)]
pub struct TaskQueue {
    tasks: RefCell<VecDeque<Task>>,
}

impl TaskQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create as Rc for installing as the current executor
    pub fn new_shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Run the oldest pending task, if any
    ///
    /// Returns `false` when the queue was empty.
    pub fn run_next(&self) -> bool {
        // The borrow must end before the task runs; tasks may post more work.
        let task = self.tasks.borrow_mut().pop_front();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run tasks until the queue is empty, returning how many ran
    pub fn drain(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        if ran > 0 {
            trace!(ran, "drained main queue");
        }
        ran
    }

    /// Run at most `limit` tasks, returning how many ran
    pub fn drain_at_most(&self, limit: usize) -> usize {
        let mut ran = 0;
        while ran < limit && self.run_next() {
            ran += 1;
        }
        ran
    }

    /// Drop every pending task without running it
    pub fn clear(&self) -> usize {
        let mut tasks = self.tasks.borrow_mut();
        let dropped = tasks.len();
        tasks.clear();
        dropped
    }
}

impl MainExecutor for TaskQueue {
    fn post(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }

    fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    fn name(&self) -> &'static str {
        "task-queue"
    }
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

// ============================================================================
// Thread-local current executor
// ============================================================================

thread_local! {
    static MAIN_QUEUE: Rc<TaskQueue> = TaskQueue::new_shared();
    static CURRENT: RefCell<Option<Rc<dyn MainExecutor>>> = const { RefCell::new(None) };
}

/// This thread's default task queue
pub fn main_queue() -> Rc<TaskQueue> {
    MAIN_QUEUE.with(Rc::clone)
}

/// Executor that deferred work is currently posted to on this thread
pub fn current() -> Rc<dyn MainExecutor> {
    match CURRENT.with(|current| current.borrow().clone()) {
        Some(executor) => executor,
        None => main_queue(),
    }
}

/// Install `executor` as this thread's main executor
///
/// Returns the previously installed executor, if any.
pub fn install(executor: Rc<dyn MainExecutor>) -> Option<Rc<dyn MainExecutor>> {
    trace!(executor = executor.name(), "installing main executor");
    CURRENT.with(|current| current.borrow_mut().replace(executor))
}

/// Fall back to the default task queue, returning the removed executor
pub fn uninstall() -> Option<Rc<dyn MainExecutor>> {
    CURRENT.with(|current| current.borrow_mut().take())
}

/// Post `task` to run on a later turn of this thread's main executor
pub fn post(task: impl FnOnce() + 'static) {
    let executor = current();
    executor.post(Box::new(task));
}

/// Drain this thread's default task queue
pub fn drain_main_queue() -> usize {
    main_queue().drain()
}
