use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use page_loader_scanner::naming;
use page_loader_scanner::{AssetReference, Fetch, FsOp, LoadError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct DownloadedAsset {
    pub url: Url,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Download every asset into `output_dir/<assets dir>`.
///
/// Nothing touches the filesystem when `assets` is empty. Otherwise the asset
/// directory is created first and must not exist yet. Each distinct target
/// file is fetched by its own task, from the first URL that maps to it; the first failure is returned and the remaining
/// tasks are dropped with the task set.
pub async fn download_all(
    fetcher: Arc<dyn Fetch>,
    page_url: &Url,
    output_dir: &Path,
    assets: &[AssetReference],
    progress: Option<&MultiProgress>,
) -> Result<Vec<DownloadedAsset>> {
    if assets.is_empty() {
        debug!(page = %page_url, "No local assets to download");
        return Ok(Vec::new());
    }

    let assets_dir = output_dir.join(naming::assets_dir_name(page_url));
    fs::create_dir(&assets_dir)
        .await
        .map_err(|e| LoadError::filesystem(FsOp::CreateDir, &assets_dir, e))?;
    info!(dir = %assets_dir.display(), "Created assets directory");

    let targets = unique_targets(assets);
    info!(
        references = assets.len(),
        downloads = targets.len(),
        "Starting asset downloads"
    );

    let mut tasks = JoinSet::new();
    for (index, url) in targets.into_iter().enumerate() {
        let fetcher = fetcher.clone();
        let file_name = naming::resolved_file_name(&url);
        let path = assets_dir.join(&file_name);
        let bar = progress.map(|multi| task_bar(multi, &file_name));

        tasks.spawn(async move {
            let result = download_one(fetcher.as_ref(), &url, &path).await;
            if let Some(bar) = bar {
                match &result {
                    Ok(_) => bar.finish_with_message(format!("✓ {file_name}")),
                    Err(_) => bar.abandon_with_message(format!("✗ {file_name}")),
                }
            }
            result.map(|bytes| (index, DownloadedAsset { url, path, bytes }))
        });
    }

    let mut downloaded = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined? {
            Ok(item) => downloaded.push(item),
            Err(e) => {
                warn!(error = %e, pending = tasks.len(), "Asset download failed");
                tasks.abort_all();
                return Err(e);
            }
        }
    }

    downloaded.sort_by_key(|(index, _)| *index);
    Ok(downloaded.into_iter().map(|(_, asset)| asset).collect())
}

async fn download_one(fetcher: &dyn Fetch, url: &Url, path: &Path) -> Result<usize> {
    let body = fetcher.fetch(url).await?;
    fs::write(path, &body)
        .await
        .map_err(|e| LoadError::filesystem(FsOp::WriteFile, path, e))?;
    debug!(%url, path = %path.display(), bytes = body.len(), "Saved asset");
    Ok(body.len())
}

/// One URL per local file name, first seen wins.
///
/// Names drop the query string, so `/app.css?v=1` and `/app.css?v=2` share a
/// file and must not be written by two tasks.
fn unique_targets(assets: &[AssetReference]) -> Vec<Url> {
    let mut seen = HashSet::new();
    assets
        .iter()
        .filter(|asset| seen.insert(asset.resolved.relative_path.as_str()))
        .map(|asset| asset.resolved.url.clone())
        .collect()
}

fn task_bar(multi: &MultiProgress, file_name: &str) -> ProgressBar {
    let bar = multi.add(ProgressBar::new_spinner());
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_message(file_name.to_string());
    bar
}
