use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

pub const DEFAULT_LOG_FILTER: &str = "bookstore=debug,tower_http=info";

/// Where the book collection lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Snapshot(PathBuf),
}

#[derive(Debug, Clone, Parser)]
#[command(name = "bookstore")]
#[command(about = "Bookstore REST service with author and year aggregations")]
pub struct AppConfig {
    /// Address to bind
    #[arg(long, env = "BOOKSTORE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "BOOKSTORE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory for the collection snapshot. Without it the collection is
    /// kept in memory only.
    #[arg(long, env = "BOOKSTORE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Skip inserting the sample books into an empty collection
    #[arg(long, env = "BOOKSTORE_NO_SEED")]
    pub no_seed: bool,

    /// Tracing filter directives, used when `RUST_LOG` is unset
    #[arg(long, env = "BOOKSTORE_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

impl AppConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Filter built from `log_filter`; fails on malformed directives.
    pub fn env_filter(&self) -> Result<EnvFilter, ParseError> {
        EnvFilter::try_new(&self.log_filter)
    }

    pub fn backend(&self) -> StoreBackend {
        match &self.data_dir {
            Some(dir) => StoreBackend::Snapshot(dir.clone()),
            None => StoreBackend::Memory,
        }
    }
}
