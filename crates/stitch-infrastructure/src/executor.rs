//! Tokio Main Loop
//!
//! A [`MainExecutor`] backed by tokio channels, driven on the coordinating
//! thread by a current-thread runtime.
//!
//! ## Channels
//!
//! ```text
//! same thread ── post(Task) ─────────► local  (UnboundedReceiver<Task>)  ─┐
//!                                                                          ├─► run() / run_until_idle()
//! other threads ─ MainLoopHandle ────► remote (UnboundedReceiver<Message>)─┘
//!                 post / register_with / shutdown
//! ```
//!
//! Local tasks are `!Send` and keep FIFO order among themselves. Remote
//! messages carry `Send` closures, so other threads can hand registry writes
//! and rebinds to the thread that owns the registry.
//!
//! ## Usage
//!
//! ```ignore
//! let main_loop = MainLoop::new_shared(0);
//! dispatch::install(main_loop.clone());
//! let handle = main_loop.handle();
//!
//! std::thread::spawn(move || {
//!     handle.post(|| println!("on the coordinating thread"))?;
//!     handle.shutdown()
//! });
//!
//! main_loop.run().await?;
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use stitch_application::registry::{DependencyKey, lifecycle};
use stitch_domain::error::{Error, Result};
use stitch_domain::ports::{MainExecutor, Task};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace, warn};

use crate::constants::MAIN_LOOP_EXECUTOR_NAME;

type RemoteTask = Box<dyn FnOnce() + Send + 'static>;

enum Message {
    Run(RemoteTask),
    Shutdown,
}

struct Receivers {
    local: UnboundedReceiver<Task>,
    remote: UnboundedReceiver<Message>,
}

/// Channel-backed executor for the coordinating thread
pub struct MainLoop {
    local_tx: UnboundedSender<Task>,
    remote_tx: UnboundedSender<Message>,
    receivers: RefCell<Option<Receivers>>,
    pending: Cell<usize>,
    max_drain: usize,
    shutdown_requested: Cell<bool>,
}

impl MainLoop {
    /// Create a main loop
    ///
    /// `max_drain` bounds how many tasks run back to back before the loop
    /// yields to the runtime (0 = never yield between tasks).
    pub fn new(max_drain: usize) -> Self {
        let (local_tx, local) = mpsc::unbounded_channel();
        let (remote_tx, remote) = mpsc::unbounded_channel();
        Self {
            local_tx,
            remote_tx,
            receivers: RefCell::new(Some(Receivers { local, remote })),
            pending: Cell::new(0),
            max_drain,
            shutdown_requested: Cell::new(false),
        }
    }

    /// Create as Rc for installing with `dispatch::install`
    pub fn new_shared(max_drain: usize) -> Rc<Self> {
        Rc::new(Self::new(max_drain))
    }

    /// `Send` handle for posting from other threads
    pub fn handle(&self) -> MainLoopHandle {
        MainLoopHandle {
            remote_tx: self.remote_tx.clone(),
        }
    }

    /// Whether a shutdown message has been received
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.get()
    }

    fn take_receivers(&self) -> Result<Receivers> {
        self.receivers
            .borrow_mut()
            .take()
            .ok_or_else(|| Error::dispatch("main loop is already running"))
    }

    fn run_local(&self, task: Task) {
        self.pending.set(self.pending.get().saturating_sub(1));
        task();
    }

    /// Returns `false` when the message asks the loop to stop.
    fn handle_message(&self, message: Message) -> bool {
        match message {
            Message::Run(task) => {
                task();
                true
            }
            Message::Shutdown => {
                debug!("main loop received shutdown");
                self.shutdown_requested.set(true);
                false
            }
        }
    }

    fn drain_limit_reached(&self, ran: usize) -> bool {
        self.max_drain != 0 && ran >= self.max_drain
    }

    /// Run ready tasks without waiting, returning how many ran
    ///
    /// Local tasks run before remote messages. Stops early at `max_drain`
    /// tasks or on a shutdown message. Returns 0 when called re-entrantly
    /// from a task or while [`MainLoop::run`] is active.
    pub fn run_until_idle(&self) -> usize {
        let Ok(mut receivers) = self.take_receivers() else {
            return 0;
        };
        let mut ran = 0;
        while !self.drain_limit_reached(ran) {
            if let Ok(task) = receivers.local.try_recv() {
                self.run_local(task);
            } else if let Ok(message) = receivers.remote.try_recv() {
                if !self.handle_message(message) {
                    break;
                }
            } else {
                break;
            }
            ran += 1;
        }
        *self.receivers.borrow_mut() = Some(receivers);
        if ran > 0 {
            trace!(ran, "main loop ran until idle");
        }
        ran
    }

    /// Run tasks as they arrive until a shutdown message is received
    ///
    /// Must be awaited on the coordinating thread (current-thread runtime or
    /// `LocalSet`); the returned future is `!Send`.
    pub async fn run(&self) -> Result<()> {
        let mut receivers = self.take_receivers()?;
        debug!(max_drain = self.max_drain, "main loop started");
        let mut ran = 0;
        loop {
            tokio::select! {
                biased;
                Some(task) = receivers.local.recv() => self.run_local(task),
                message = receivers.remote.recv() => match message {
                    Some(message) => {
                        if !self.handle_message(message) {
                            break;
                        }
                    }
                    None => break,
                },
            }
            ran += 1;
            if self.drain_limit_reached(ran) {
                ran = 0;
                tokio::task::yield_now().await;
            }
        }
        *self.receivers.borrow_mut() = Some(receivers);
        debug!("main loop stopped");
        Ok(())
    }
}

impl MainExecutor for MainLoop {
    fn post(&self, task: Task) {
        if self.local_tx.send(task).is_err() {
            warn!("main loop receiver dropped; task discarded");
            return;
        }
        self.pending.set(self.pending.get() + 1);
    }

    fn pending(&self) -> usize {
        self.pending.get()
    }

    fn name(&self) -> &'static str {
        MAIN_LOOP_EXECUTOR_NAME
    }
}

impl fmt::Debug for MainLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainLoop")
            .field("pending", &self.pending.get())
            .field("max_drain", &self.max_drain)
            .field("running", &self.receivers.borrow().is_none())
            .finish()
    }
}

/// Cross-thread handle to a [`MainLoop`]
#[derive(Clone)]
pub struct MainLoopHandle {
    remote_tx: UnboundedSender<Message>,
}

impl MainLoopHandle {
    fn send(&self, message: Message) -> Result<()> {
        self.remote_tx
            .send(message)
            .map_err(|_| Error::dispatch("main loop is gone"))
    }

    /// Run `task` on the coordinating thread
    pub fn post(&self, task: impl FnOnce() + Send + 'static) -> Result<()> {
        self.send(Message::Run(Box::new(task)))
    }

    /// Register the value built by `make` for `key` on the coordinating thread
    ///
    /// Values are built on the coordinating thread, so `!Send` dependencies
    /// such as `Rc<dyn Store>` can be registered from anywhere.
    pub fn register_with<T: 'static>(
        &self,
        key: &'static DependencyKey<T>,
        make: impl FnOnce() -> T + Send + 'static,
    ) -> Result<()> {
        self.post(move || lifecycle::register(key, make()))
    }

    /// Ask the loop to stop after the messages already queued
    pub fn shutdown(&self) -> Result<()> {
        self.send(Message::Shutdown)
    }

    /// Whether the loop has been dropped
    pub fn is_closed(&self) -> bool {
        self.remote_tx.is_closed()
    }
}

impl fmt::Debug for MainLoopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainLoopHandle")
            .field("closed", &self.is_closed())
            .finish()
    }
}
