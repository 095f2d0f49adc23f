//! recall CLI - chat with a local model, with memory.

use clap::{Args, Parser, Subcommand};
use recall::cli::{self, TurnOverrides};
use recall::core::session::DEFAULT_SESSION;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "recall")]
#[command(author, version, about = "Chat with a local model, with memory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that run turns.
#[derive(Args)]
struct TurnArgs {
    /// Session name.
    #[arg(short, long, default_value = DEFAULT_SESSION)]
    session: String,

    /// Model to use instead of the configured one.
    #[arg(long)]
    model: Option<String>,

    /// Agent preset to use instead of the configured one ("none" disables it).
    #[arg(long)]
    agent: Option<String>,
}

impl TurnArgs {
    fn overrides(&self) -> TurnOverrides {
        TurnOverrides {
            model: self.model.clone(),
            agent: self.agent.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Send one message and print the reply.
    Send {
        /// Message text.
        message: String,

        /// Text files to append to the message.
        #[arg(short, long = "attach")]
        attach: Vec<PathBuf>,

        #[command(flatten)]
        turn: TurnArgs,
    },

    /// Chat interactively, one message per line.
    Chat {
        #[command(flatten)]
        turn: TurnArgs,
    },

    /// Show a session's transcript.
    History {
        /// Session name.
        #[arg(default_value = DEFAULT_SESSION)]
        session: String,
    },

    /// List sessions.
    List,

    /// Delete a session.
    Delete {
        /// Session name.
        session: String,
    },

    /// Rename a session.
    Rename {
        /// Current name.
        from: String,

        /// New name.
        to: String,
    },

    /// List agent presets.
    Prompts,
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Send {
            message,
            attach,
            turn,
        } => cli::send::run(&message, &turn.session, &attach, &turn.overrides()),
        Commands::Chat { turn } => cli::chat::run(&turn.session, &turn.overrides()),
        Commands::History { session } => cli::history::run(&session),
        Commands::List => cli::list::run(),
        Commands::Delete { session } => cli::delete::run(&session),
        Commands::Rename { from, to } => cli::rename::run(&from, &to),
        Commands::Prompts => cli::prompts::run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("recall: error: {e}");
            ExitCode::FAILURE
        }
    }
}
