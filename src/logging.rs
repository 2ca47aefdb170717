//! Logging initialization
//!
//! Log lines go to stderr so command output on stdout stays clean.

use crate::config::LogSettings;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise the configured level is used and
/// each `-v` raises it one step. Repeated calls are ignored.
pub fn init(settings: &LogSettings, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(&settings.level, verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(settings.target)
        .with_ansi(std::io::stderr().is_terminal());

    // Already installed by an earlier call in this process
    let _ = if settings.timestamps {
        builder.try_init()
    } else {
        builder.without_time().try_init()
    };
}

/// Filter directive for a base level and a `-v` count
pub fn directive(level: &str, verbose: u8) -> String {
    match verbose {
        0 => level.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_follows_verbosity() {
        assert_eq!(directive("info", 0), "info");
        assert_eq!(directive("warn", 0), "warn");
        assert_eq!(directive("info", 1), "debug");
        assert_eq!(directive("info", 2), "trace");
        assert_eq!(directive("info", 7), "trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        let settings = LogSettings {
            level: "info".to_string(),
            target: false,
            timestamps: false,
        };
        init(&settings, 0);
        init(&settings, 1);
    }
}
