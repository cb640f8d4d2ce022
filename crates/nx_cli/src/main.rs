use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use nx_core::Result;
use nx_extractors::ExtractionService;
use nx_inference::{create_model, CompletionConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract structured article records from supported news sites", long_about = None)]
struct Cli {
    /// Completion model used for OCR headline/byline recovery.
    /// Available models: dummy (default, offline), openai
    #[arg(long, default_value = "dummy")]
    model: String,
    /// API key for the completion endpoint (falls back to
    /// OPENAI_EXTRACTOR_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
    /// Base URL of an OpenAI-compatible completion endpoint
    #[arg(long)]
    model_url: Option<String>,
    /// Model identifier passed to the completion endpoint
    #[arg(long)]
    model_id: Option<String>,
    /// Completion request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch a page and print the extracted article record as JSON
    Extract { url: String },
    /// Extract from a saved HTML file, routing by the original URL
    ExtractFile {
        path: PathBuf,
        #[arg(long)]
        url: String,
    },
    /// List the hostnames the service can extract from
    Domains,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = CompletionConfig::default();
    config.api_key = cli
        .api_key
        .or_else(|| std::env::var("OPENAI_EXTRACTOR_API_KEY").ok());
    if let Some(url) = cli.model_url {
        config.base_url = url;
    }
    if let Some(model_id) = cli.model_id {
        config.model_id = model_id;
    }
    config.timeout = Duration::from_secs(cli.timeout_secs);

    let model = create_model(&cli.model, config)?;
    info!("🧠 Completion model initialized ({})", model.name());

    let service = ExtractionService::new(model)?;

    match cli.command {
        Commands::Extract { url } => {
            let content = service.extract_article_content(&url).await?;
            info!("✨ Extraction succeeded: {}", content.title());
            println!("{}", serde_json::to_string_pretty(&content)?);
        }
        Commands::ExtractFile { path, url } => {
            let html = std::fs::read_to_string(&path)?;
            let content = service.extract_from_html(&html, &url).await?;
            info!("✨ Extraction succeeded: {}", content.title());
            println!("{}", serde_json::to_string_pretty(&content)?);
        }
        Commands::Domains => {
            for domain in service.supported_domains() {
                println!("{}", domain);
            }
        }
    }

    Ok(())
}
