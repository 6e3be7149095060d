use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{self},
    prelude::*,
};

/// Log target shared by the library and the binary.
const CRATE_TARGET: &str = "iontrap";

fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::ERROR
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Verbosity applies to this project's targets; dependencies stay at WARN or
/// quieter.
fn target_filter(level: LevelFilter) -> Targets {
    Targets::new()
        .with_target(CRATE_TARGET, level)
        .with_default(level.min(LevelFilter::WARN))
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = target_filter(level_for(verbosity, quiet));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer);

    let init_result = if let Some(path) = log_file {
        let file = File::create(&path).map_err(|source| CliError::LogFile {
            path: path.clone(),
            source,
        })?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true);

        subscriber.with(file_layer).try_init()
    } else {
        subscriber.try_init()
    };

    init_result.map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{debug, error, info, trace, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0, false), LevelFilter::WARN);
        assert_eq!(level_for(1, false), LevelFilter::INFO);
        assert_eq!(level_for(2, false), LevelFilter::DEBUG);
        assert_eq!(level_for(7, false), LevelFilter::TRACE);
        assert_eq!(level_for(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn dependencies_are_capped_at_warn() {
        let filter = target_filter(LevelFilter::TRACE);
        assert!(filter.would_enable("iontrap::engine::sweep", &tracing::Level::TRACE));
        assert!(!filter.would_enable("rayon_core", &tracing::Level::INFO));
        assert!(filter.would_enable("rayon_core", &tracing::Level::WARN));

        let quiet = target_filter(LevelFilter::ERROR);
        assert!(!quiet.would_enable("iontrap", &tracing::Level::WARN));
        assert!(!quiet.would_enable("other", &tracing::Level::WARN));
    }

    #[test]
    #[serial]
    fn initialization_and_macros_work() {
        ensure_global_logger_is_set();

        error!("This is an error");
        warn!("This is a warning");
        info!("This is info");
        debug!("This is debug");
        trace!("This is trace");
    }

    #[test]
    #[serial]
    fn file_layer_records_sweep_messages() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let file = File::create(&log_path).unwrap();
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true);
        let subscriber = tracing_subscriber::registry()
            .with(target_filter(LevelFilter::DEBUG))
            .with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            debug!(target: "iontrap::engine::sweep", "Sweep message for file-only test.");
            debug!(target: "some_dependency", "Dependency chatter.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Sweep message for file-only test."));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
        assert!(!content.contains("Dependency chatter."));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(invalid_path));
            assert!(matches!(result, Err(CliError::LogFile { .. })));
        }
    }
}
