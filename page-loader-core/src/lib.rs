pub mod download;
pub mod options;
pub mod pipeline;
pub mod report;

pub use download::{DownloadedAsset, download_all};
pub use options::LoaderOptions;
pub use pipeline::{PageLoader, load_page};
pub use report::{AssetRecord, PageReport, ReportFormat, render_report};

pub use page_loader_scanner::{LoadError, Result};
