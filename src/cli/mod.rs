use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// BuyEuropean desktop client
#[derive(Parser)]
#[command(name = "buyeuropean")]
#[command(about = "Identify a product from a photo and find European alternatives")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyse a product image
    Analyse(commands::analyse::AnalyseCommand),
    /// Submit feedback for a previous analysis
    Feedback(commands::feedback::FeedbackCommand),
    /// Show the approximate location sent with analyses
    Locate(commands::locate::LocateCommand),
    /// Normalise an image to the JPEG that would be uploaded
    Encode(commands::encode::EncodeCommand),
}

pub async fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyse(command) => command.run().await,
        Commands::Feedback(command) => command.run().await,
        Commands::Locate(command) => command.run().await,
        Commands::Encode(command) => command.run(),
    }
}
