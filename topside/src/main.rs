//! topside: settings console for the ROV camera stream

mod app;
mod config;
mod window;

use anyhow::Result;
use app::SettingsApp;
use clap::Parser;
use config::{AppConfig, Args};
use rovcore::JsonPreferences;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Log filter from a `RUST_LOG`-style spec, `info` when the spec is empty.
fn log_filter(spec: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(spec)
}

fn main() -> Result<()> {
    let spec = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt().with_env_filter(log_filter(&spec)).init();

    let args = Args::parse();
    let config = AppConfig::load(&args)?;
    let prefs = JsonPreferences::open(&config.prefs_dir());
    tracing::info!(prefs = %prefs.path().display(), policy = ?config.stream_ip_policy, "starting topside");

    eframe::run_native(
        window::WINDOW_TITLE,
        window::native_options(),
        Box::new(move |cc| Box::new(SettingsApp::new(cc, Box::new(prefs), config))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter("").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honors_env_level() {
        assert_eq!(log_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter("rovcore=trace").max_level_hint(), Some(LevelFilter::TRACE));
    }
}
