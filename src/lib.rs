//! # parget
//!
//! Parallel, range-based HTTP downloader. Given a URL, `parget` probes the
//! origin for byte-range support, splits the resource into a fixed count of
//! ranges, fetches them concurrently and reassembles them into one output
//! file identical to a sequential whole-file download. Origins without range
//! support (or with an unknown size) are fetched in one plain GET instead.

pub mod download;

pub use download::{DownloadConfig, DownloadError, HttpDownloader, DEFAULT_PART_COUNT};
