//! Unit tests for the executor port

use std::cell::RefCell;
use std::collections::VecDeque;

use stitch_domain::{MainExecutor, Task};

#[derive(Default)]
struct Fifo {
    tasks: RefCell<VecDeque<Task>>,
}

impl MainExecutor for Fifo {
    fn post(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }

    fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    fn name(&self) -> &'static str {
        "fifo"
    }
}

#[test]
fn test_executor_is_object_safe_and_debuggable() {
    let fifo = Fifo::default();
    let executor: &dyn MainExecutor = &fifo;

    executor.post(Box::new(|| {}));

    assert_eq!(executor.pending(), 1);
    assert_eq!(
        format!("{executor:?}"),
        "MainExecutor { name: \"fifo\", pending: 1 }"
    );
}
