pub mod error;
pub mod fetch;
pub mod naming;
pub mod rewriter;

pub use error::{FsOp, LoadError, Result};
pub use fetch::{Fetch, HttpFetcher};
pub use rewriter::{AssetKind, AssetReference, PageAssets, ResolvedAsset, process};
