use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::{debug, error};

use issuewatch::checkpoint::{CheckpointFile, CheckpointStore};
use issuewatch::poll;
use issuewatch::search::GithubTransport;

/// Poll GitHub issue search for new bug reports and print distinct reporters
#[derive(Parser)]
#[command(name = "issuewatch")]
#[command(about = "Incrementally poll GitHub issue search and aggregate distinct reporters", long_about = None)]
struct Cli {
    /// Path to the checkpoint file for the computation
    #[arg(long)]
    config_file: PathBuf,

    /// Path to the file holding the personal access token
    #[arg(long, default_value = "PERSONAL_ACCESS_TOKEN.txt")]
    token_file: PathBuf,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    if let Err(e) = run(cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let token = fs::read_to_string(&cli.token_file)
        .with_context(|| format!("Failed to read token file '{}'", cli.token_file.display()))?;
    let token = token.lines().next().unwrap_or_default().trim().to_string();

    let store = CheckpointStore::new(&cli.config_file);
    let checkpoint_file = store.load_or_init()?;
    debug!("Starting poll from checkpoint {:?}", checkpoint_file.last_queried);

    let transport = GithubTransport::new(token)?;
    let (next, aggregate) = poll::run(&transport, &checkpoint_file.last_queried, Utc::now())
        .await
        .context("Poll failed, checkpoint left unchanged")?;

    for login in &aggregate.users {
        println!("{login}");
    }

    // Persist only after a fully successful run.
    store.commit(&CheckpointFile { last_queried: next })?;
    Ok(())
}
