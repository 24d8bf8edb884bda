use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use fit_intent::classify;
use fit_intent::config::{DEFAULT_LOG_FILTER, LogConfig, ServerConfig};
use fit_intent::{api, repl};

#[derive(Parser)]
#[command(name = "fit-intent", version, about = "Turn fitness utterances into proposed actions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the parse API over HTTP (default).
    Serve,
    /// Classify one utterance and print the proposed action.
    Classify {
        /// The utterance; multiple words are joined with spaces.
        #[arg(required = true)]
        text: Vec<String>,
        /// Print the action as JSON instead of the confirmation prompt.
        #[arg(long)]
        json: bool,
    },
    /// Classify utterances read from stdin, one per line.
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_tracing(&LogConfig::from_env());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = ServerConfig::from_env().context("Failed to load server configuration")?;
            eprintln!("🏋️ fit-intent v{}", env!("CARGO_PKG_VERSION"));
            eprintln!("   Parse API: http://{}:{}/api/ai/parse", config.host, config.port);
            eprintln!("   Health:    http://{}:{}/health", config.host, config.port);
            eprintln!("   Tokens:    {} configured", config.api_tokens.len());
            api::serve(config).await.context("Parse API failed")?;
        }
        Command::Classify { text, json } => {
            let action = classify(&text.join(" "));
            if json {
                println!("{}", repl::render_json(&action)?);
            } else {
                println!("{}", repl::render(&action));
            }
        }
        Command::Repl => {
            eprintln!("Type an utterance and press Enter. /quit to exit.");
            let stdin = BufReader::new(tokio::io::stdin());
            repl::run(stdin, tokio::io::stdout())
                .await
                .context("Failed to read from stdin")?;
        }
    }

    Ok(())
}

/// Log to stderr, and to a daily-rolling file when a log directory is set.
fn init_tracing(config: &LogConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let stderr = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "fit-intent.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .init();
            None
        }
    }
}
