// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use legal_search::utils::logging::{format_error, format_rank, format_success, format_warning};
use legal_search::{
    Config, HealthStatus, InstitutionCache, MemoryStore, RawParams, SearchEngine, Validator,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "legal_search")]
#[command(version)]
#[command(about = "Search and autocomplete over institution-tagged legal documents", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Corpus file or directory, overrides the configured path
    #[arg(long, value_name = "PATH", env = "LEGAL_SEARCH_CORPUS")]
    corpus: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked search over metadata and body text
    Search {
        query: String,

        /// Institution name filter (case-insensitive substring)
        #[arg(short, long)]
        institution: Option<String>,

        /// Institution id filter, wins over --institution
        #[arg(long)]
        institution_id: Option<String>,

        #[arg(short, long)]
        limit: Option<String>,

        #[arg(short, long)]
        offset: Option<String>,

        /// Print the raw JSON page
        #[arg(long)]
        json: bool,
    },

    /// Suggestions for a partial query
    Autocomplete {
        query: String,

        #[arg(short, long)]
        institution: Option<String>,

        #[arg(short, long)]
        limit: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Score one document against a query and show the matching passage
    Show {
        document_id: String,
        query: String,
    },

    Stats,

    Verify,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    legal_search::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let mut config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    if let Some(corpus) = cli.corpus {
        config.database.corpus_path = corpus;
    }

    let engine = build_engine(config).await?;

    match cli.command {
        Commands::Search {
            query,
            institution,
            institution_id,
            limit,
            offset,
            json,
        } => {
            let params = RawParams {
                q: Some(query),
                kurum: institution,
                kurum_id: institution_id,
                limit,
                offset,
            };
            cmd_search(&engine, &params, json).await?;
        }
        Commands::Autocomplete {
            query,
            institution,
            limit,
            json,
        } => {
            let params = RawParams {
                q: Some(query),
                kurum: institution,
                limit,
                ..RawParams::default()
            };
            cmd_autocomplete(&engine, &params, json).await?;
        }
        Commands::Show { document_id, query } => {
            cmd_show(&engine, &document_id, &query).await?;
        }
        Commands::Stats => {
            cmd_stats(&engine).await?;
        }
        Commands::Verify => {
            cmd_verify(&engine).await?;
        }
    }

    Ok(())
}

async fn build_engine(config: Config) -> Result<SearchEngine<MemoryStore>> {
    let corpus_path = config.database.corpus_path.clone();
    Validator::validate_corpus_path(&corpus_path).context("Invalid corpus path")?;

    let store = MemoryStore::open(&corpus_path)
        .with_context(|| format!("Failed to open corpus at {}", corpus_path.display()))?;

    let engine = SearchEngine::new(Arc::new(store), InstitutionCache::new(), Arc::new(config));
    engine
        .refresh_institutions()
        .await
        .context("Failed to load institutions")?;

    Ok(engine)
}

async fn cmd_search(
    engine: &SearchEngine<MemoryStore>,
    params: &RawParams,
    json: bool,
) -> Result<()> {
    let page = engine.search(params).await.context("Search failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    let query = params.q.as_deref().unwrap_or_default();
    if page.items.is_empty() {
        println!("\n{}\n", format_warning(&format!("No results for \"{query}\"")));
        if page.total > 0 {
            println!("Offset {} is past the last of {} result(s)", page.offset, page.total);
        }
        return Ok(());
    }

    println!("\nSearch Results for: \"{query}\"\n");
    println!(
        "Showing {} of {} result(s), offset {}\n",
        page.items.len(),
        page.total,
        page.offset
    );
    println!("{}", "=".repeat(80));

    for (idx, result) in page.items.iter().enumerate() {
        println!(
            "\n{}",
            format_rank(page.offset + idx + 1, &result.format_summary(300))
        );
    }

    println!("{}", "=".repeat(80));
    Ok(())
}

async fn cmd_autocomplete(
    engine: &SearchEngine<MemoryStore>,
    params: &RawParams,
    json: bool,
) -> Result<()> {
    let suggestions = engine
        .autocomplete(params)
        .await
        .context("Autocomplete failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("{}", format_warning("No suggestions"));
        return Ok(());
    }

    for (idx, item) in suggestions.iter().enumerate() {
        let line = format!("{} ({}, {:?})", item.text, item.count, item.kind);
        println!("{}", format_rank(idx + 1, &line));
    }

    Ok(())
}

async fn cmd_show(
    engine: &SearchEngine<MemoryStore>,
    document_id: &str,
    query: &str,
) -> Result<()> {
    let result = engine
        .highlight(document_id, query)
        .await
        .with_context(|| format!("Failed to load document {document_id}"))?;

    println!("{}", result.format_summary(usize::MAX));
    if !result.url_slug.is_empty() {
        println!("slug: {}", result.url_slug);
    }
    Ok(())
}

async fn cmd_stats(engine: &SearchEngine<MemoryStore>) -> Result<()> {
    info!("Gathering statistics");

    let stats = engine.stats().await.context("Failed to gather statistics")?;
    println!("Institutions: {}", stats.institutions);
    println!("Active documents: {}", stats.active_documents);

    println!("\nDocuments by type:");
    for group in &stats.document_types {
        println!("  {:>6}  {}", group.count, group.document_type);
    }

    println!("\nInstitutions:");

    let status = engine.institutions().status().await;
    for entry in status.institutions {
        println!("  {} {}", entry.id, entry.name);
    }

    Ok(())
}

async fn cmd_verify(engine: &SearchEngine<MemoryStore>) -> Result<()> {
    let report = engine.verify().await;
    println!("{}", report.format());

    match report.overall_status {
        HealthStatus::Healthy => println!("{}", format_success("All checks passed")),
        HealthStatus::Degraded => println!("{}", format_warning("Some checks degraded")),
        HealthStatus::Unhealthy => {
            println!("{}", format_error("Health check failed"));
            return Err(anyhow::anyhow!("Health check failed"));
        }
    }

    Ok(())
}
