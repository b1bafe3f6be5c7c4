//! Command-line interface for stock-lookup
//!
//! # Usage
//!
//! ```bash
//! stock-lookup suggest micro
//! stock-lookup --format table quote AAPL
//!
//! # Finnhub needs an API key
//! export FINNHUB_API_KEY="..."
//! stock-lookup --provider finnhub interactive
//! ```

use clap::{Parser, Subcommand};
use lookup_core::{
    Catalog, DataProvider, FormatterFactory, LookupConfig, LookupSession, OutputStyle, Reply,
    SegmentTable, SessionConfig, SuggestionEngine, provider,
};
use lookup_utils::Settings;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stock-lookup")]
#[command(about = "Ticker suggestions and company profiles", long_about = None)]
struct Cli {
    /// Market data provider (yahoo, finnhub)
    #[arg(long, global = true, default_value = "yahoo")]
    provider: DataProvider,

    /// JSON catalog to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// JSON segment table to use instead of the built-in one
    #[arg(long, global = true)]
    segments: Option<PathBuf>,

    /// Output format (plain, table)
    #[arg(long, global = true, default_value = "plain")]
    format: OutputStyle,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Suggest symbols for a partial symbol or company name
    Suggest {
        query: String,

        /// Maximum number of suggestions
        #[arg(short, long)]
        limit: Option<usize>,

        /// Do not ask the provider when nothing matches locally
        #[arg(long)]
        no_fallback: bool,
    },
    /// Show the profile of a symbol
    Quote { symbol: String },
    /// Start an interactive session
    Interactive,
}

impl Cli {
    fn lookup_config(&self) -> lookup_core::Result<LookupConfig> {
        let mut builder = LookupConfig::builder()
            .default_provider(self.provider)
            .with_env_api_key();

        if let Some(path) = &self.catalog {
            builder = builder.catalog_path(path.clone());
        }
        if let Some(path) = &self.segments {
            builder = builder.segments_path(path.clone());
        }
        if let Commands::Suggest {
            limit, no_fallback, ..
        } = &self.command
        {
            if let Some(limit) = limit {
                builder = builder.suggestion_limit(*limit);
            }
            builder = builder.fallback_enabled(!no_fallback);
        }

        builder.build()
    }
}

fn load_catalog(config: &LookupConfig) -> lookup_core::Result<Arc<Catalog>> {
    match &config.catalog_path {
        Some(path) => Ok(Arc::new(Catalog::from_path(path)?)),
        None => Ok(Catalog::shared()),
    }
}

fn load_segments(config: &LookupConfig) -> lookup_core::Result<SegmentTable> {
    match &config.segments_path {
        Some(path) => SegmentTable::from_path(path),
        None => Ok(SegmentTable::builtin()),
    }
}

async fn run_repl(session: &mut LookupSession) -> anyhow::Result<()> {
    println!("{}\n", session.welcome());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", session.prompt());
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match session.process_input(input).await {
            Ok(Reply::Text(text)) => println!("{text}\n"),
            Ok(Reply::Exit) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => eprintln!("Error: {e}\n"),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    lookup_utils::init_tracing(&settings);

    let cli = Cli::parse();
    let config = cli.lookup_config()?;

    info!(
        "Starting {} ({}) with {} provider",
        settings.app_name, settings.environment, config.default_provider
    );

    let catalog = load_catalog(&config)?;
    let segments = Arc::new(load_segments(&config)?);
    let provider = provider::from_config(&config)?;
    let engine = SuggestionEngine::from_config(catalog, provider, &config);
    let formatter = FormatterFactory::create(cli.format);

    match cli.command {
        Commands::Suggest { query, .. } => {
            let entries = engine.suggest(&query).await;
            println!("{}", formatter.format_suggestions(&entries));
        }
        Commands::Quote { symbol } => {
            let mut session =
                LookupSession::new(engine, formatter, segments, SessionConfig::default());
            println!("{}", session.render_profile(&symbol.to_uppercase()).await);
        }
        Commands::Interactive => {
            let mut session =
                LookupSession::new(engine, formatter, segments, SessionConfig::default());
            run_repl(&mut session).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_flags_reach_config() {
        let cli = Cli::try_parse_from([
            "stock-lookup",
            "suggest",
            "micro",
            "--limit",
            "3",
            "--no-fallback",
        ])
        .unwrap();
        let config = cli.lookup_config().unwrap();
        assert_eq!(config.suggestion_limit, 3);
        assert!(!config.fallback_enabled);
        assert_eq!(config.default_provider, DataProvider::Yahoo);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["stock-lookup", "quote", "aapl", "--format", "table"]).unwrap();
        assert_eq!(cli.format, OutputStyle::Table);
        assert!(matches!(cli.command, Commands::Quote { ref symbol } if symbol == "aapl"));
    }

    #[test]
    fn test_rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["stock-lookup", "--provider", "bloomberg", "interactive"]).is_err());
    }
}
