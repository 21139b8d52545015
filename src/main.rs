use std::num::NonZeroUsize;

use anyhow::{Context, Result};
use clap::Parser;
use futures_util::{pin_mut, StreamExt};
use log::debug;
use url::Url;

use parget::download::logger::setup_logger;
use parget::{DownloadConfig, HttpDownloader};

mod cli;

#[tokio::main]
async fn main() {
    let args = cli::CliArgs::parse();

    if let Err(err) = run(args).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(args: cli::CliArgs) -> Result<()> {
    setup_logger(args.log_file.as_deref())?;

    let url = Url::parse(&args.url)?;
    let parts = NonZeroUsize::new(args.parts).context("parts must be >= 1")?;
    let save_dir = std::env::current_dir()?;
    let config = DownloadConfig::new(url, save_dir, parts);
    let downloader = HttpDownloader::new(reqwest::Client::new(), config);

    let progress = downloader.progress_stream();
    tokio::spawn(async move {
        pin_mut!(progress);
        while let Some(len) = progress.next().await {
            debug!("downloaded {} bytes", len);
        }
    });

    let path = downloader.download().await?;
    println!("Downloaded: {}", path.display());

    Ok(())
}
