// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Process-wide tracing setup, driven by the configured SDK log level.

use tracing_subscriber::EnvFilter;

use pushbridge_core::types::LogLevel;

/// Filter directive for a configured log level.
pub fn filter_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Verbose => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warning => "warn",
        LogLevel::Error => "error",
        LogLevel::None => "off",
    }
}

/// Install the global fmt subscriber. `RUST_LOG` wins over `level`.
///
/// Only the first call in a process installs anything; later calls (a
/// second take off, or a host that set up tracing itself) return `false`.
pub fn init_logging(level: LogLevel) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_directives() {
        assert_eq!(filter_directive(LogLevel::Verbose), "trace");
        assert_eq!(filter_directive(LogLevel::Warning), "warn");
        assert_eq!(filter_directive(LogLevel::None), "off");
    }

    #[test]
    fn second_init_is_a_no_op() {
        init_logging(LogLevel::Error);
        assert!(!init_logging(LogLevel::Debug));
    }
}
