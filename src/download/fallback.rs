use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::StreamExt;
use reqwest::{Client, Request};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::select;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::download::error::FallbackError;

/// Single unconditional GET of the whole resource, streamed straight to the
/// destination. No temporary files, no concurrency. Used whenever the origin
/// does not support ranges or the size is unknown.
pub async fn fetch_whole(
    client: &Client,
    request: Request,
    dest: &Path,
    progress_sender: watch::Sender<u64>,
    cancel_token: CancellationToken,
) -> Result<(), FallbackError> {
    select! {
        result = transfer(client, request, dest, progress_sender) => result,
        _ = cancel_token.cancelled() => Err(FallbackError::Cancelled),
    }
}

async fn transfer(
    client: &Client,
    request: Request,
    dest: &Path,
    progress_sender: watch::Sender<u64>,
) -> Result<(), FallbackError> {
    let response = client.execute(request).await?;
    if !response.status().is_success() {
        return Err(FallbackError::Status(response.status()));
    }

    let downloaded = AtomicU64::new(0);
    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    while let Some(bytes) = stream.next().await {
        let bytes = bytes.map_err(FallbackError::Request)?;
        file.write_all(&bytes).await?;

        let total = downloaded.fetch_add(bytes.len() as u64, Ordering::Relaxed) + bytes.len() as u64;
        let _ = progress_sender.send(total);
    }
    file.flush().await?;

    Ok(())
}
