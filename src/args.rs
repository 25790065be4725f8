use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "persona-crawl")]
#[command(about = "Crawls a website and scores every page against buyer personas")]
#[command(version)]
pub struct Args {
    /// Log level (RUST_LOG takes precedence)
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// JSON file with persona profiles and recommendations (built-in tables if omitted)
    #[arg(long, global = true)]
    pub personas: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crawl a site and print the scored pages as JSON
    Crawl {
        /// URL to start crawling from
        url: String,

        /// Maximum number of pages to score [default: 25]
        #[arg(short, long)]
        max_pages: Option<usize>,

        /// Number of concurrent fetches; 1 keeps breadth-first order [default: 1]
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// JSON crawler configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Serve crawls over HTTP
    Serve {
        /// Address to listen on [env: BIND_ADDRESS, default: 127.0.0.1:8000]
        #[arg(long)]
        bind: Option<String>,

        /// Comma-separated API keys [env: API_KEYS]
        #[arg(long, value_delimiter = ',')]
        api_keys: Option<Vec<String>>,

        /// Number of concurrent fetches per crawl request
        #[arg(short, long, default_value_t = 1)]
        concurrency: usize,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
