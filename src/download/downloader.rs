use std::path::PathBuf;
use std::sync::Arc;

use futures_util::Stream;
use log::info;
use reqwest::Client;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::download::arena::PartArena;
use crate::download::config::DownloadConfig;
use crate::download::error::{DownloadError, FallbackError};
use crate::download::fallback::fetch_whole;
use crate::download::merger::merge_parts;
use crate::download::orchestrator::FetchOrchestrator;
use crate::download::part_range::plan_parts;
use crate::download::probe::probe;

pub struct HttpDownloader {
    config: Arc<DownloadConfig>,
    client: Client,
    cancel_token: CancellationToken,
    progress_sender: watch::Sender<u64>,
    progress_receiver: watch::Receiver<u64>,
}

impl HttpDownloader {
    pub fn new(client: Client, config: DownloadConfig) -> Self {
        let (progress_sender, progress_receiver) = watch::channel(0);

        Self {
            client,
            progress_sender,
            progress_receiver,
            cancel_token: CancellationToken::new(),
            config: Arc::new(config),
        }
    }

    /// Cumulative downloaded byte count, updated as response bodies stream in.
    pub fn progress_stream(&self) -> impl Stream<Item = u64> + 'static {
        let mut receiver = self.progress_receiver.clone();

        async_stream::stream! {
            let len = *receiver.borrow();
            yield len;

            while receiver.changed().await.is_ok() {
                let len = *receiver.borrow();
                yield len;
            }
        }
    }

    /// Triggers the shared cancellation token. Idempotent; every in-flight
    /// fetch observes it and terminates.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Probes the resource, then either fetches it as concurrent ranges and
    /// merges them, or falls back to one whole-resource GET. Returns the
    /// output path. Temporary part storage is released on every exit path.
    pub async fn download(&self) -> Result<PathBuf, DownloadError> {
        let info = probe(&self.client, self.config.url.clone()).await?;
        let dest = self.config.file_path();
        let part_count = self.config.part_count;

        if info.range_capable && info.total_size >= part_count.get() as u64 {
            info!(
                "downloading {} bytes in {} parts to {:?}",
                info.total_size, part_count, dest
            );
            let plan = plan_parts(info.total_size, part_count);
            let arena = match self.config.temp_dir.as_ref() {
                Some(parent) => PartArena::new_in(parent)?,
                None => PartArena::new()?,
            };

            let orchestrator =
                FetchOrchestrator::new(self.client.clone(), self.cancel_token.clone());
            orchestrator
                .run(
                    &plan,
                    &arena,
                    &self.config.create_http_request(),
                    self.progress_sender.clone(),
                )
                .await?;

            merge_parts(&arena, plan.len(), &dest)
                .await
                .map_err(DownloadError::Merge)?;
        } else {
            info!(
                "range download unavailable (capable: {}, size: {}), falling back to whole-resource fetch",
                info.range_capable, info.total_size
            );
            fetch_whole(
                &self.client,
                self.config.create_http_request(),
                &dest,
                self.progress_sender.clone(),
                self.cancel_token.clone(),
            )
            .await
            .map_err(|err| match err {
                FallbackError::Cancelled => DownloadError::Cancelled,
                other => DownloadError::Fallback(other),
            })?;
        }

        Ok(dest)
    }
}
