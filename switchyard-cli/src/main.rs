//! switchyard: routes chat messages to the todo / analysis / echo agents.
//!
//! Usage:
//!   switchyard                              → MCP server on stdio
//!   switchyard chat -m "todo: milk, eggs"   → one turn, printed
//!   switchyard interactive -t demo          → REPL against one thread
//!   switchyard kyc --document "..."         → KYC ingest + risk over Groq

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "switchyard",
    about = "Keyword-routed agent graph served over MCP",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the agent_chat tool over MCP stdio (default)
    Serve,
    /// Send one message and print the reply
    Chat {
        /// Message to route
        #[arg(short, long)]
        message: String,
        /// Conversation thread (default: "default")
        #[arg(short, long)]
        thread: Option<String>,
    },
    /// Chat in a loop; type quit, exit or q to leave
    Interactive {
        /// Conversation thread (default: "default")
        #[arg(short, long)]
        thread: Option<String>,
    },
    /// Run document ingestion and risk analysis over Groq
    Kyc(KycArgs),
}

#[derive(Args, Debug)]
struct KycArgs {
    /// Document text to analyse
    #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
    document: Option<String>,
    /// Read the document text from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: String,
    /// OpenAI-compatible base URL
    #[arg(long, env = "GROQ_BASE_URL", default_value = switchyard_llm::GROQ_BASE_URL)]
    base_url: String,
    /// Chat model
    #[arg(long, env = "SWITCHYARD_MODEL", default_value = switchyard_llm::GROQ_DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve().await?,
        Commands::Chat { message, thread } => commands::chat(&message, thread.as_deref()).await?,
        Commands::Interactive { thread } => commands::interactive(thread.as_deref()).await?,
        Commands::Kyc(args) => commands::kyc(args).await?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays a clean JSON-RPC channel.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "switchyard=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
