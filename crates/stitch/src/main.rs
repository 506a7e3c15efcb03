//! Stitch - Demo Entry Point
//!
//! Runs the demo client against a Stitch runtime configured from
//! `stitch.toml` and the environment.
//!
//! ## Executors
//!
//! | Executor | Command | Description |
//! |----------|---------|-------------|
//! | **Tokio** | `stitch` | Deliveries run on the tokio main loop |
//! | **Queue** | `stitch --executor queue` | Deliveries run when the demo drains the queue |

mod client;

use clap::Parser;
use stitch_infrastructure::bootstrap;
use stitch_infrastructure::config::{ConfigLoader, ExecutorKind};
use stitch_infrastructure::logging::init_logging;

/// Command line interface for the Stitch demo client
#[derive(Parser, Debug)]
#[command(name = "stitch")]
#[command(about = "Stitch - dependency registry and per-field change observation demo")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Executor that runs deferred deliveries (queue or tokio)
    #[arg(long, default_value = "tokio")]
    pub executor: ExecutorKind,

    /// Also show unique vs. application scope resolution
    #[arg(long)]
    pub scope_demo: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load()?;
    config.dispatch.executor = cli.executor;

    init_logging(&config.logging)?;
    let context = bootstrap::init(config)?;

    match context.main_loop() {
        Some(main_loop) => {
            let handle = main_loop.handle();
            let demo = async {
                client::run(&context, cli.scope_demo).await;
                handle.shutdown()
            };
            let (ran, shutdown) = tokio::join!(main_loop.run(), demo);
            shutdown?;
            ran?;
        }
        None => client::run(&context, cli.scope_demo).await,
    }

    Ok(())
}
