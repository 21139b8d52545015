use reqwest::StatusCode;
use thiserror::Error;
use tokio::io;

use crate::download::part_range::PartRange;

/// Probe failures are fatal to the whole operation: no retry, no fallback.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Probe request failed: {:?}", .0)]
    Request(#[from] reqwest::Error),

    #[error("Probe returned status {0}")]
    Status(StatusCode),
}

/// Failure of a single range fetch, reported to the orchestrator.
#[derive(Error, Debug)]
pub enum PartFetchError {
    #[error("Range request failed: {:?}", .0)]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(StatusCode),

    #[error("Server answered range {returned} for requested range {requested}")]
    RangeMismatch {
        requested: PartRange,
        returned: String,
    },

    #[error("Part fetch cancelled")]
    Cancelled,

    #[error("IOError: {:?}", .0)]
    Io(#[from] io::Error),
}

/// Failure of the whole-resource fallback download.
#[derive(Error, Debug)]
pub enum FallbackError {
    #[error("Request failed: {:?}", .0)]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(StatusCode),

    #[error("Download cancelled")]
    Cancelled,

    #[error("IOError: {:?}", .0)]
    Io(#[from] io::Error),
}

/// Top-level download error surfaced to the caller. Exactly one of these is
/// produced per failed download; concurrent part failures past the first are
/// discarded by the orchestrator.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Probe failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("Part {index} failed: {source}")]
    Part {
        index: usize,
        #[source]
        source: PartFetchError,
    },

    #[error("Download cancelled")]
    Cancelled,

    #[error("Merge failed: {:?}", .0)]
    Merge(#[source] io::Error),

    #[error("Fallback download failed: {0}")]
    Fallback(#[from] FallbackError),

    #[error("IOError: {:?}", .0)]
    Io(#[from] io::Error),
}
