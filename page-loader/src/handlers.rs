use anyhow::{Context, anyhow};
use clap::ArgMatches;
use page_loader_core::{LoaderOptions, PageLoader, ReportFormat, render_report};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Expand `~` in the output directory argument
pub fn resolve_output_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Log filter used when `-v` is given or `RUST_LOG` is unset
pub fn default_log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Logs go to stderr so stdout only carries the result.
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_log_filter(0))),
        v => EnvFilter::new(default_log_filter(v)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}

pub fn loader_options(matches: &ArgMatches) -> LoaderOptions {
    let defaults = LoaderOptions::default();
    LoaderOptions {
        timeout_secs: matches
            .get_one::<u64>("timeout")
            .copied()
            .unwrap_or(defaults.timeout_secs),
        show_progress_bars: !matches.get_flag("quiet"),
        ..defaults
    }
}

pub fn report_format(matches: &ArgMatches) -> ReportFormat {
    matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text)
}

/// Run one page load from parsed arguments and render its report.
pub async fn handle_load(matches: &ArgMatches) -> anyhow::Result<String> {
    let url = matches
        .get_one::<String>("URL")
        .context("a URL to download is required")?;
    let output_dir = resolve_output_dir(
        matches
            .get_one::<String>("output")
            .map(String::as_str)
            .unwrap_or("."),
    );
    let options = loader_options(matches);
    debug!(?options, output = %output_dir.display(), "Parsed arguments");

    let loader = PageLoader::new(&options)?;
    let report = loader.load(url, &output_dir).await?;
    Ok(render_report(&report, report_format(matches))?)
}
