//! Runtime configuration for the watch loop.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Default polling interval (30 seconds).
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Environment variable to override the default polling interval.
pub const INTERVAL_ENV_VAR: &str = "COMMITWATCH_INTERVAL";

/// Configuration for the watch loop, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Working tree root being watched.
    pub workdir: PathBuf,
    /// Fixed pause between cycles.
    pub interval: Duration,
    /// Run a single cycle and return.
    pub once: bool,
    /// Synthesize and print the message without staging or committing.
    pub dry_run: bool,
}

impl WatchConfig {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            once: false,
            dry_run: false,
        }
    }
}

/// Resolve the polling interval.
///
/// Precedence: the CLI flag, then `COMMITWATCH_INTERVAL`, then the default of
/// 30 seconds. Zero or unparsable values are logged and ignored.
pub fn resolve_interval(flag: Option<u64>) -> Duration {
    match flag {
        Some(0) => warn!(
            "Interval must be at least 1 second, using default {}s",
            DEFAULT_INTERVAL_SECS
        ),
        Some(secs) => return Duration::from_secs(secs),
        None => {}
    }

    match env::var(INTERVAL_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    INTERVAL_ENV_VAR, v, DEFAULT_INTERVAL_SECS
                );
                Duration::from_secs(DEFAULT_INTERVAL_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_INTERVAL_SECS),
    }
}
