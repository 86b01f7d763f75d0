//! Logger setup for the binary.
//!
//! Library code only uses the `log` macros; this is where `env_logger` gets
//! installed behind them.

/// Install `env_logger` as the global logger.
///
/// The filter is taken from `GameConfig::log_filter` when set, then from
/// `RUST_LOG`, and falls back to `info`. Returns false when a logger was
/// already installed, in which case nothing changes.
pub fn init_logging(log_filter: Option<&str>) -> bool {
    let mut builder = env_logger::Builder::new();

    match log_filter
        .map(str::to_owned)
        .or_else(|| std::env::var("RUST_LOG").ok())
    {
        Some(filter) => builder.parse_filters(&filter),
        None => builder.filter_level(log::LevelFilter::Info),
    };
    builder.format_timestamp_millis();

    let installed = builder.try_init().is_ok();
    if installed {
        log::debug!("logging initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_ignored() {
        init_logging(Some("frog_runner=debug"));
        assert!(!init_logging(None));
    }
}
