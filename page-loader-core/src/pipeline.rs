//! The page pipeline: fetch the index, rewrite it, download its assets, save it.
//!
//! Every stage runs after the previous one has succeeded and the first error
//! ends the run. The index file is written last, so a failed asset download
//! never leaves a half-mirrored page behind.

use crate::download::download_all;
use crate::options::LoaderOptions;
use crate::report::{AssetRecord, PageReport};
use indicatif::MultiProgress;
use page_loader_scanner::naming;
use page_loader_scanner::{Fetch, FsOp, HttpFetcher, LoadError, PageAssets, Result, process};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

pub struct PageLoader {
    fetcher: Arc<dyn Fetch>,
    show_progress_bars: bool,
}

impl PageLoader {
    pub fn new(options: &LoaderOptions) -> Result<Self> {
        let fetcher = HttpFetcher::with_settings(options.timeout_secs, &options.user_agent)?;
        Ok(Self::with_fetcher(Arc::new(fetcher)).with_progress_bars(options.show_progress_bars))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            fetcher,
            show_progress_bars: false,
        }
    }

    pub fn with_progress_bars(mut self, show: bool) -> Self {
        self.show_progress_bars = show;
        self
    }

    pub async fn load(&self, url: &str, output_dir: &Path) -> Result<PageReport> {
        let page_url = naming::parse_page_url(url)?;
        info!(url = %page_url, output = %output_dir.display(), "Start loading page");

        let body = self.fetcher.fetch(&page_url).await?;
        info!(stage = "fetch-index", bytes = body.len(), "Loaded page");

        let PageAssets { html, assets } = process(&page_url, &String::from_utf8_lossy(&body))?;
        info!(stage = "rewrite", assets = assets.len(), "Rewrote local references");

        let progress = self.show_progress_bars.then(MultiProgress::new);
        let downloaded = download_all(
            self.fetcher.clone(),
            &page_url,
            output_dir,
            &assets,
            progress.as_ref(),
        )
        .await?;
        info!(stage = "download-assets", files = downloaded.len(), "Downloaded assets");

        let index_path = naming::index_file_path(output_dir, &page_url);
        let contents = if assets.is_empty() { body } else { html.into_bytes() };
        fs::write(&index_path, &contents)
            .await
            .map_err(|e| LoadError::filesystem(FsOp::WriteFile, &index_path, e))?;
        info!(stage = "persist-index", path = %index_path.display(), "Saved page");

        Ok(PageReport {
            url: page_url.to_string(),
            index_file: naming::index_file_name(&page_url),
            index_path,
            assets_dir: (!assets.is_empty())
                .then(|| output_dir.join(naming::assets_dir_name(&page_url))),
            assets: downloaded.iter().map(AssetRecord::from).collect(),
        })
    }
}

/// Mirror `url` into `output_dir` with default options and return the success message.
pub async fn load_page(url: &str, output_dir: impl AsRef<Path>) -> Result<String> {
    let loader = PageLoader::new(&LoaderOptions::default())?;
    let report = loader.load(url, output_dir.as_ref()).await?;
    Ok(report.message())
}
