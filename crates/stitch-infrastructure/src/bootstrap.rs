//! Coordinating Thread Bootstrap
//!
//! Prepares the current thread to own a dependency registry: installs the
//! precondition hook and the main executor chosen by configuration, and
//! reports the declared stitchables.
//!
//! ```text
//! AppConfig ─► init() ─► precondition hook (fatal | logging)
//!                    ├─► main executor     (TaskQueue | MainLoop)
//!                    └─► STITCHABLES listing
//!                          │
//!                          ▼
//!                    StitchContext  (restores previous state on drop)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = bootstrap::init(config)?;
//! let store = StitchPublished::<Rc<dyn SomeStore>>::of::<Store>();
//! // ... mutate ...
//! context.drain();
//! ```

use std::fmt;
use std::rc::Rc;

use crate::config::loader::validate_app_config;
use crate::config::{AppConfig, ExecutorKind};
use crate::executor::{MainLoop, MainLoopHandle};
use stitch_application::dispatch::{self, TaskQueue};
use stitch_application::preconditions::{self, PreconditionHook};
use stitch_application::stitchify::list_stitchables;
use stitch_domain::error::Result;
use stitch_domain::ports::MainExecutor;
use tracing::{debug, info};

/// Executor installed by [`init`]
enum InstalledExecutor {
    Queue(Rc<TaskQueue>),
    MainLoop(Rc<MainLoop>),
}

/// Per-thread Stitch runtime state
///
/// Dropping the context reinstalls whatever executor and hook were active
/// before [`init`].
pub struct StitchContext {
    config: AppConfig,
    executor: InstalledExecutor,
    previous_executor: Option<Rc<dyn MainExecutor>>,
    previous_hook: Option<Option<PreconditionHook>>,
}

/// Initialize Stitch on the current thread
pub fn init(config: AppConfig) -> Result<StitchContext> {
    validate_app_config(&config)?;

    let previous_hook = if config.preconditions.fatal {
        preconditions::reset_hook()
    } else {
        preconditions::set_hook(preconditions::logging_hook)
    };

    let (executor, installed): (InstalledExecutor, Rc<dyn MainExecutor>) =
        match config.dispatch.executor {
            ExecutorKind::Queue => {
                let queue = TaskQueue::new_shared();
                (
                    InstalledExecutor::Queue(Rc::clone(&queue)),
                    queue as Rc<dyn MainExecutor>,
                )
            }
            ExecutorKind::Tokio => {
                let main_loop = MainLoop::new_shared(config.dispatch.max_drain);
                (
                    InstalledExecutor::MainLoop(Rc::clone(&main_loop)),
                    main_loop as Rc<dyn MainExecutor>,
                )
            }
        };
    let executor_name = installed.name();
    let previous_executor = dispatch::install(installed);

    let stitchables = list_stitchables();
    for (name, scope) in &stitchables {
        debug!(stitchable = name, %scope, "declared stitchable");
    }
    info!(
        executor = executor_name,
        fatal_preconditions = config.preconditions.fatal,
        stitchables = stitchables.len(),
        "Stitch initialized"
    );

    Ok(StitchContext {
        config,
        executor,
        previous_executor,
        previous_hook: Some(previous_hook),
    })
}

impl StitchContext {
    /// Configuration the context was built from
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Name of the installed executor
    pub fn executor_name(&self) -> &'static str {
        match &self.executor {
            InstalledExecutor::Queue(queue) => queue.name(),
            InstalledExecutor::MainLoop(main_loop) => main_loop.name(),
        }
    }

    /// Run pending deliveries, returning how many ran
    ///
    /// Honors `dispatch.max_drain` (0 = until empty).
    pub fn drain(&self) -> usize {
        match &self.executor {
            InstalledExecutor::Queue(queue) => match self.config.dispatch.max_drain {
                0 => queue.drain(),
                limit => queue.drain_at_most(limit),
            },
            InstalledExecutor::MainLoop(main_loop) => main_loop.run_until_idle(),
        }
    }

    /// Tasks waiting on the installed executor
    pub fn pending(&self) -> usize {
        match &self.executor {
            InstalledExecutor::Queue(queue) => queue.pending(),
            InstalledExecutor::MainLoop(main_loop) => main_loop.pending(),
        }
    }

    /// The tokio main loop, when configured
    pub fn main_loop(&self) -> Option<Rc<MainLoop>> {
        match &self.executor {
            InstalledExecutor::MainLoop(main_loop) => Some(Rc::clone(main_loop)),
            InstalledExecutor::Queue(_) => None,
        }
    }

    /// Cross-thread handle to the main loop, when configured
    pub fn handle(&self) -> Option<MainLoopHandle> {
        self.main_loop().map(|main_loop| main_loop.handle())
    }
}

impl Drop for StitchContext {
    fn drop(&mut self) {
        match self.previous_executor.take() {
            Some(previous) => {
                dispatch::install(previous);
            }
            None => {
                dispatch::uninstall();
            }
        }
        if let Some(previous_hook) = self.previous_hook.take() {
            preconditions::replace_hook(previous_hook);
        }
        debug!("Stitch context released");
    }
}

impl fmt::Debug for StitchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StitchContext")
            .field("executor", &self.executor_name())
            .field("pending", &self.pending())
            .field("config", &self.config)
            .finish()
    }
}
