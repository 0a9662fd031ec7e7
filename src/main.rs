use clap::Parser;
use lexmint::api::AiClient;
use lexmint::commands;
use lexmint::config::ApiConfig;
use lexmint::error::{ApiResult, AppError};
use std::path::PathBuf;

/// lexmint - LexMint Legal Assistant
///
/// Query the legal-assistant API, analyze documents and check service
/// health. Answers are general legal information, not legal advice.
///
/// The API key is read from the LEXMINT_API_KEY environment variable
/// unless passed via --api-key.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (defaults to https://api.example.com; also via LEXMINT_API_URL)
    #[arg(long = "api-url", env = "LEXMINT_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// API key, 32 lowercase hexadecimal characters (also via LEXMINT_API_KEY)
    #[arg(
        long = "api-key",
        env = "LEXMINT_API_KEY",
        value_name = "KEY",
        hide_env_values = true,
        global = true
    )]
    pub api_key: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Ask the legal assistant a question
    Ask(AskArgs),

    /// Analyze a legal document
    Analyze(AnalyzeArgs),

    /// Check API health/connectivity
    Health,
}

#[derive(clap::Args, Debug)]
pub struct AskArgs {
    /// The question to ask
    #[arg(value_name = "QUESTION")]
    pub question: String,

    /// Conversation context to carry along
    #[arg(long)]
    pub context: Option<String>,

    /// Maximum completion tokens (default 1000)
    #[arg(long = "max-tokens", value_name = "N")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (default 0.7)
    #[arg(long, value_name = "T")]
    pub temperature: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the document (plain-text files are read directly)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

async fn run(cli: Cli) -> ApiResult<String> {
    let api_key = cli
        .api_key
        .ok_or_else(|| {
            AppError::validation("Missing API key")
                .with_details("Pass --api-key or set LEXMINT_API_KEY")
        })?;

    let config = ApiConfig::new(cli.api_url, api_key);
    config.validate()?;
    let client = AiClient::new(reqwest::Client::new(), config);

    match cli.command {
        Commands::Ask(args) => {
            commands::ask(
                &client,
                &args.question,
                args.context.as_deref(),
                args.max_tokens,
                args.temperature,
            )
            .await
        }
        Commands::Analyze(args) => commands::analyze(&client, &args.file).await,
        Commands::Health => commands::health(&client).await,
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => println!("{}", output),
        Err(error) => {
            log::debug!("{}", error);
            eprintln!("Error: {}", error.user_message());
            for suggestion in error.recovery_suggestions() {
                eprintln!("  - {}", suggestion);
            }
            std::process::exit(1);
        }
    }
}
