use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use pawsearch::api::{AppState, create_router};
use pawsearch::config::CONFIG;
use pawsearch::corpus::Corpus;
use pawsearch::db::InMemoryRepo;
use pawsearch::query_engine::QueryEngine;
use pawsearch::suggestions::SuggestionGenerator;
use pawsearch::{FilterValue, SearchSession, SessionOptions};

#[derive(Debug, Parser)]
#[command(name = "pawsearch", about = "Search pets, people, experts and services")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the search API over HTTP
    Serve {
        /// Address to bind, overrides SEARCH_BIND_ADDR
        #[arg(long)]
        addr: Option<String>,
    },
    /// Run a single search and print the results as JSON
    Query {
        text: String,
        #[arg(long, default_value = "all")]
        filter: FilterValue,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let corpus =
        Corpus::from_config(CONFIG.corpus_path.as_deref()).context("Failed to load corpus")?;

    match cli.command {
        Command::Serve { addr } => serve(&corpus, addr).await,
        Command::Query { text, filter } => query_once(&corpus, &text, filter).await,
    }
}

async fn serve(corpus: &Corpus, addr: Option<String>) -> anyhow::Result<()> {
    let repo = Arc::new(InMemoryRepo::from_corpus(corpus));
    let state = AppState {
        query_engine: Arc::new(QueryEngine::new(repo, CONFIG.match_timeout())),
        suggestions: SuggestionGenerator::new(corpus.popular_searches()),
    };

    let addr = addr.unwrap_or_else(|| CONFIG.bind_addr.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Search API listening on {addr}");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

async fn query_once(corpus: &Corpus, text: &str, filter: FilterValue) -> anyhow::Result<()> {
    if text.is_empty() {
        println!("[]");
        return Ok(());
    }

    let session = SearchSession::from_corpus(corpus, SessionOptions::from(&*CONFIG));
    let mut updates = session.subscribe();
    session.set_active_filter(filter);
    session.submit(text);

    let snapshot = updates
        .wait_for(|s| s.phase.is_idle())
        .await
        .context("Search session closed")?
        .clone();

    if let Some(e) = snapshot.error {
        anyhow::bail!(e);
    }
    println!("{}", serde_json::to_string_pretty(&snapshot.results)?);
    Ok(())
}
