use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workbench::db::Database;
use workbench::service::ProjectService;
use workbench::shell::Shell;

#[derive(Parser)]
#[command(name = "wbench")]
#[command(about = "Console tracker for do-it-yourself projects")]
struct Cli {
    /// Path to the database file (defaults to the platform data directory)
    #[arg(long)]
    db: Option<PathBuf>,
}

/// Logs go to stderr so stdout stays clean for the menu.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "workbench=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let db = match cli.db {
        Some(path) => Database::open(path)?,
        None => Database::open_default()?,
    };
    db.migrate()?;

    let service = ProjectService::new(db);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(service, stdin.lock(), stdout.lock());
    shell.run()?;

    Ok(())
}
