use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::StreamExt;
use headers::HeaderMapExt;
use reqwest::header::CONTENT_RANGE;
use reqwest::{Client, Request, Response, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::select;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::download::error::PartFetchError;
use crate::download::part_range::PartSpec;

/// Fetches one planned range into a private slot of the part arena.
pub struct PartFetcher {
    client: Client,
    spec: PartSpec,
    path: PathBuf,
    downloaded: Arc<AtomicU64>,
    progress_sender: watch::Sender<u64>,
}

impl PartFetcher {
    pub fn new(
        client: Client,
        spec: PartSpec,
        path: PathBuf,
        downloaded: Arc<AtomicU64>,
        progress_sender: watch::Sender<u64>,
    ) -> Self {
        Self {
            client,
            spec,
            path,
            downloaded,
            progress_sender,
        }
    }

    /// Issues a single range request and streams the body to the part file.
    /// Not retried; a failure is reported to the orchestrator as is. When the
    /// token fires mid-transfer the partial write is abandoned and the part
    /// fails with a cancellation indication instead of a transport error.
    pub async fn fetch(&self, request: Request, cancel_token: CancellationToken) -> Result<(), PartFetchError> {
        if self.spec.range.is_empty() {
            File::create(&self.path).await?;
            return Ok(());
        }

        select! {
            result = self.transfer(request) => result,
            _ = cancel_token.cancelled() => Err(PartFetchError::Cancelled),
        }
    }

    async fn transfer(&self, mut request: Request) -> Result<(), PartFetchError> {
        request
            .headers_mut()
            .typed_insert(self.spec.range.to_range_header());

        let response = self.client.execute(request).await?;
        self.check_response(&response)?;

        let mut file = File::create(&self.path).await?;
        let mut stream = response.bytes_stream();
        while let Some(bytes) = stream.next().await {
            let bytes = bytes.map_err(PartFetchError::Request)?;
            file.write_all(&bytes).await?;

            self.downloaded
                .fetch_add(bytes.len() as u64, Ordering::Relaxed);
            let total = self.downloaded.load(Ordering::Relaxed);
            // Concurrent fetchers publish through one channel; keep the
            // published total from ever going backwards.
            self.progress_sender
                .send_modify(|len| *len = (*len).max(total));
        }
        file.flush().await?;

        Ok(())
    }

    /// Partial content and full content are both acceptable; some origins
    /// ignore range hints and answer with the whole body. A 206 that declares
    /// a Content-Range diverging from the requested range fails the part.
    fn check_response(&self, response: &Response) -> Result<(), PartFetchError> {
        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::PARTIAL_CONTENT => {
                let requested = self.spec.range;
                let declared = response
                    .headers()
                    .typed_get::<headers::ContentRange>()
                    .and_then(|content_range| content_range.bytes_range());

                match declared {
                    Some(returned) if returned != (requested.start, requested.last_byte()) => {
                        let returned = response
                            .headers()
                            .get(CONTENT_RANGE)
                            .and_then(|value| value.to_str().ok())
                            .unwrap_or("")
                            .to_string();

                        Err(PartFetchError::RangeMismatch {
                            requested,
                            returned,
                        })
                    }
                    _ => Ok(()),
                }
            }
            status => Err(PartFetchError::Status(status)),
        }
    }
}
