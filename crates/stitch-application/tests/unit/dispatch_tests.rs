//! Tests for the main task queue and the thread's current executor

use std::cell::RefCell;
use std::rc::Rc;

use stitch_application::dispatch::{self, TaskQueue};
use stitch_domain::MainExecutor;

fn push_to(log: &Rc<RefCell<Vec<u32>>>, value: u32) -> impl FnOnce() + 'static {
    let log = Rc::clone(log);
    move || log.borrow_mut().push(value)
}

#[test]
fn test_posted_tasks_do_not_run_inline() {
    let queue = TaskQueue::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    queue.post(Box::new(push_to(&log, 1)));

    assert!(log.borrow().is_empty());
    assert_eq!(queue.pending(), 1);
    assert_eq!(queue.drain(), 1);
    assert_eq!(*log.borrow(), vec![1]);
}

#[test]
fn test_tasks_run_in_posting_order() {
    let queue = TaskQueue::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    for value in 1..=4 {
        queue.post(Box::new(push_to(&log, value)));
    }
    queue.drain();

    assert_eq!(*log.borrow(), vec![1, 2, 3, 4]);
}

#[test]
fn test_tasks_posted_while_draining_run_in_the_same_drain() {
    let queue = TaskQueue::new_shared();
    let log = Rc::new(RefCell::new(Vec::new()));

    let inner_queue = Rc::clone(&queue);
    let inner_log = Rc::clone(&log);
    queue.post(Box::new(move || {
        inner_log.borrow_mut().push(1);
        inner_queue.post(Box::new(push_to(&inner_log, 3)));
    }));
    queue.post(Box::new(push_to(&log, 2)));

    assert_eq!(queue.drain(), 3);
    assert_eq!(*log.borrow(), vec![1, 2, 3]);
}

#[test]
fn test_drain_at_most_leaves_the_rest_pending() {
    let queue = TaskQueue::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    for value in 1..=3 {
        queue.post(Box::new(push_to(&log, value)));
    }

    assert_eq!(queue.drain_at_most(2), 2);
    assert_eq!(queue.pending(), 1);
    assert!(queue.run_next());
    assert!(!queue.run_next());
    assert_eq!(*log.borrow(), vec![1, 2, 3]);
}

#[test]
fn test_clear_drops_pending_tasks_without_running_them() {
    let queue = TaskQueue::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    queue.post(Box::new(push_to(&log, 1)));
    queue.post(Box::new(push_to(&log, 2)));

    assert_eq!(queue.clear(), 2);
    assert_eq!(queue.drain(), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_post_defaults_to_the_thread_main_queue() {
    let log = Rc::new(RefCell::new(Vec::new()));

    dispatch::post(push_to(&log, 5));

    assert_eq!(dispatch::main_queue().pending(), 1);
    assert_eq!(dispatch::current().name(), "task-queue");
    assert_eq!(dispatch::drain_main_queue(), 1);
    assert_eq!(*log.borrow(), vec![5]);
}

#[test]
fn test_installed_executor_receives_posts_until_uninstalled() {
    let custom = TaskQueue::new_shared();
    let log = Rc::new(RefCell::new(Vec::new()));

    let previous = dispatch::install(Rc::clone(&custom) as Rc<dyn MainExecutor>);
    assert!(previous.is_none());
    dispatch::post(push_to(&log, 1));
    assert_eq!(custom.pending(), 1);
    assert_eq!(dispatch::main_queue().pending(), 0);

    assert!(dispatch::uninstall().is_some());
    dispatch::post(push_to(&log, 2));
    assert_eq!(dispatch::main_queue().pending(), 1);

    custom.drain();
    dispatch::drain_main_queue();
    assert_eq!(*log.borrow(), vec![1, 2]);
}

#[test]
fn test_task_queue_debug_reports_pending() {
    let queue = TaskQueue::new();
    queue.post(Box::new(|| {}));

    assert_eq!(format!("{queue:?}"), "TaskQueue { pending: 1 }");
}
