//! Deterministic, filesystem-safe names derived from URLs.
//!
//! Every name starts from the URL's host (plus an explicit port) and path, with
//! query and fragment ignored. Runs of characters outside `[A-Za-z0-9]` collapse
//! into a single `-` and a trailing `-` is removed:
//!
//! - `https://ru.hexlet.io/courses` → `ru-hexlet-io-courses.html`
//! - `https://ru.hexlet.io/courses` → `ru-hexlet-io-courses_files` (asset directory)
//! - `/assets/application.css` on that page → `ru-hexlet-io-assets-application.css`

use crate::error::{LoadError, Result};
use std::path::{Path, PathBuf};
use url::Url;

const SEPARATOR: char = '-';
const PAGE_EXTENSION: &str = ".html";
const ASSETS_DIR_SUFFIX: &str = "_files";

/// Parse the page URL a run starts from. Only absolute `http`/`https` URLs are accepted.
pub fn parse_page_url(input: &str) -> Result<Url> {
    let url = Url::parse(input).map_err(|_| LoadError::InvalidUrl(input.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(LoadError::InvalidUrl(input.to_string())),
    }
}

/// Resolve a (possibly relative) reference against the page URL, dropping any fragment.
pub fn resolve(page_url: &Url, reference: &str) -> Result<Url> {
    let mut resolved = page_url
        .join(reference)
        .map_err(|e| LoadError::InvalidUrl(format!("{reference} ({e})")))?;
    resolved.set_fragment(None);
    Ok(resolved)
}

pub fn index_file_name(page_url: &Url) -> String {
    format!("{}{}", slug(&host_and_path(page_url)), PAGE_EXTENSION)
}

pub fn assets_dir_name(page_url: &Url) -> String {
    format!("{}{}", slug(&host_and_path(page_url)), ASSETS_DIR_SUFFIX)
}

/// File name for an asset referenced from `page_url`.
///
/// The extension of the asset's last path segment is preserved; extensionless
/// paths (`/courses`, `/`) are treated as pages and get `.html`.
pub fn asset_file_name(page_url: &Url, asset_url: &str) -> Result<String> {
    Ok(resolved_file_name(&resolve(page_url, asset_url)?))
}

/// Same as [`asset_file_name`] for a URL that is already absolute.
pub fn resolved_file_name(asset_url: &Url) -> String {
    let location = host_and_path(asset_url);
    match split_extension(&location) {
        Some((stem, extension)) => format!("{}{}", slug(stem), extension),
        None => format!("{}{}", slug(&location), PAGE_EXTENSION),
    }
}

/// Path relative to the index file that a rewritten reference points at.
pub fn asset_relative_path(page_url: &Url, asset_url: &Url) -> String {
    format!("{}/{}", assets_dir_name(page_url), resolved_file_name(asset_url))
}

pub fn asset_file_path(output_dir: &Path, page_url: &Url, asset_url: &str) -> Result<PathBuf> {
    Ok(output_dir
        .join(assets_dir_name(page_url))
        .join(asset_file_name(page_url, asset_url)?))
}

pub fn index_file_path(output_dir: &Path, page_url: &Url) -> PathBuf {
    output_dir.join(index_file_name(page_url))
}

fn host_and_path(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}{}", url.path()),
        None => format!("{host}{}", url.path()),
    }
}

fn split_extension(location: &str) -> Option<(&str, &str)> {
    let segment_start = location.rfind('/').map_or(0, |i| i + 1);
    let segment = &location[segment_start..];
    let dot = segment.rfind('.')?;
    let extension = &segment[dot + 1..];
    if dot == 0 || extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let split_at = segment_start + dot;
    Some((&location[..split_at], &location[split_at..]))
}

fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.ends_with(SEPARATOR) {
            out.push(SEPARATOR);
        }
    }
    while out.ends_with(SEPARATOR) {
        out.pop();
    }
    out
}
