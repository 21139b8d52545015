use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use log::debug;
use reqwest::{Client, Request};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::download::arena::PartArena;
use crate::download::error::{DownloadError, PartFetchError};
use crate::download::part_fetcher::PartFetcher;
use crate::download::part_range::PartSpec;
use crate::download::util::clone_request;

/// Runs one fetcher per planned part, all launched immediately, and joins
/// them all before returning.
pub struct FetchOrchestrator {
    client: Client,
    cancel_token: CancellationToken,
}

impl FetchOrchestrator {
    pub fn new(client: Client, cancel_token: CancellationToken) -> Self {
        Self {
            client,
            cancel_token,
        }
    }

    /// First-failure-wins: the first part to fail cancels the shared token
    /// and claims the single error slot; every other in-flight fetch observes
    /// the token and terminates, and their results are drained and discarded.
    pub async fn run(
        &self,
        plan: &[PartSpec],
        arena: &PartArena,
        request: &Request,
        progress_sender: watch::Sender<u64>,
    ) -> Result<(), DownloadError> {
        let downloaded = Arc::new(AtomicU64::new(0));
        let mut futures_unordered = FuturesUnordered::new();

        for spec in plan {
            let fetcher = PartFetcher::new(
                self.client.clone(),
                spec.clone(),
                arena.part_path(spec.index),
                downloaded.clone(),
                progress_sender.clone(),
            );
            let request = clone_request(request);
            let cancel_token = self.cancel_token.clone();
            let index = spec.index;

            futures_unordered.push(async move {
                let result = fetcher.fetch(request, cancel_token).await;
                (index, result)
            });
        }

        let mut first_error: Option<DownloadError> = None;
        while let Some((index, result)) = futures_unordered.next().await {
            match result {
                Ok(()) => {
                    debug!("part {} complete", index);
                }
                Err(PartFetchError::Cancelled) => {
                    debug!("part {} cancelled", index);
                }
                Err(source) => {
                    if first_error.is_none() {
                        self.cancel_token.cancel();
                        first_error = Some(DownloadError::Part { index, source });
                    }
                }
            }
        }

        match first_error {
            Some(error) => Err(error),
            // All parts reported cancelled without a failing part: the token
            // was triggered from outside the fan-out.
            None if self.cancel_token.is_cancelled() => Err(DownloadError::Cancelled),
            None => Ok(()),
        }
    }
}
