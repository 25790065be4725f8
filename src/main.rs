use clap::Parser;
use persona_crawl::config::{CrawlerConfig, ScoringConfig, ServerConfig};
use persona_crawl::results::CrawlResponse;
use persona_crawl::server::{self, AppState};
use persona_crawl::{Crawl, HttpFetcher};
use std::error::Error;
use std::path::PathBuf;
use std::process;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    let scoring = match load_scoring(args.personas.as_ref()) {
        Ok(scoring) => scoring,
        Err(e) => {
            ::log::error!("Failed to load persona tables: {}", e);
            process::exit(1);
        }
    };

    let result = match args.command {
        Command::Crawl {
            url,
            max_pages,
            concurrency,
            config,
            pretty,
        } => run_crawl(url, max_pages, concurrency, config, pretty, &scoring).await,
        Command::Serve {
            bind,
            api_keys,
            concurrency,
        } => run_server(bind, api_keys, concurrency, scoring).await,
    };

    if let Err(e) = result {
        ::log::error!("{}", e);
        process::exit(1);
    }
}

fn load_scoring(path: Option<&PathBuf>) -> Result<ScoringConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            ::log::info!("Loading persona tables from {}", path.display());
            Ok(ScoringConfig::from_file(path)?)
        }
        None => Ok(ScoringConfig::default()),
    }
}

async fn run_crawl(
    url: String,
    max_pages: Option<usize>,
    concurrency: Option<usize>,
    config: Option<PathBuf>,
    pretty: bool,
    scoring: &ScoringConfig,
) -> Result<(), Box<dyn Error>> {
    let mut crawl = match config {
        Some(path) => Crawl::from_config_file(path)?.with_start_url(&url),
        None => Crawl::from_config(CrawlerConfig::new(&url)),
    };
    if let Some(max_pages) = max_pages {
        crawl = crawl.with_max_pages(max_pages);
    }
    if let Some(concurrency) = concurrency {
        crawl = crawl.with_max_concurrency(concurrency);
    }

    let max_pages = crawl.config().max_pages;
    let start_time = std::time::Instant::now();
    let pages = crawl.run(scoring).await?;
    ::log::info!(
        "Crawling complete - scored {} pages in {:.2} seconds",
        pages.len(),
        start_time.elapsed().as_secs_f64()
    );

    let response = CrawlResponse {
        start_url: url,
        max_pages,
        pages,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", json);

    Ok(())
}

async fn run_server(
    bind: Option<String>,
    api_keys: Option<Vec<String>>,
    concurrency: usize,
    scoring: ScoringConfig,
) -> Result<(), Box<dyn Error>> {
    let mut config = ServerConfig::from_env();
    if let Some(bind) = bind {
        config.bind_address = bind;
    }
    if let Some(keys) = api_keys {
        config.api_keys = persona_crawl::config::parse_api_keys(&keys.join(","));
    }

    let fetcher = HttpFetcher::with_defaults()?;
    let state = AppState::new(scoring, fetcher, config.api_keys.clone())
        .with_max_concurrency(concurrency);

    server::serve(&config, state).await?;
    Ok(())
}
