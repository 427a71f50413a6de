// Run reports for a mirrored page

use crate::download::DownloadedAsset;
use page_loader_scanner::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub url: String,
    pub index_file: String,
    pub index_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,
    pub assets: Vec<AssetRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetRecord {
    pub url: String,
    pub file_name: String,
    pub bytes: usize,
}

impl From<&DownloadedAsset> for AssetRecord {
    fn from(asset: &DownloadedAsset) -> Self {
        Self {
            url: asset.url.to_string(),
            file_name: asset
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            bytes: asset.bytes,
        }
    }
}

impl PageReport {
    pub fn message(&self) -> String {
        format!("Page was successfully downloaded into {}", self.index_file)
    }
}

pub fn render_report(report: &PageReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(report.message()),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}
