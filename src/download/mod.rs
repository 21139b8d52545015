pub mod arena;
pub mod config;
pub mod downloader;
pub mod error;
pub mod fallback;
pub mod logger;
pub mod merger;
pub mod orchestrator;
pub mod part_fetcher;
pub mod part_range;
pub mod probe;
pub mod util;

pub use config::{DownloadConfig, DEFAULT_PART_COUNT};
pub use downloader::HttpDownloader;
pub use error::DownloadError;
