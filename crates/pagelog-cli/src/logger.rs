//! Logging setup for the pagelog CLI.
//!
//! Diagnostics go through `tracing` to stderr, next to the run summary, so a
//! CI log shows why a message was dropped or why a run failed.
//!
//! ```rust,no_run
//! use pagelog_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("starting capture");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "pagelog=debug,pagelog_cli=debug";
const QUIET_FILTER: &str = "pagelog=error,pagelog_cli=error";
const DEFAULT_FILTER: &str = "pagelog=info,pagelog_cli=info";

/// Picks the filter for the given flags.
///
/// `--verbose` and `--quiet` win over `RUST_LOG`; otherwise `RUST_LOG` is
/// used when it parses.
#[must_use]
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the global subscriber.
///
/// Call once, at the start of `main`, before any event is logged.
///
/// # Arguments
///
/// * `verbose` - Debug-level logging for the pagelog crates
/// * `quiet` - Errors only
/// * `no_color` - Plain output even on a terminal
///
/// # Examples
///
/// ```rust,no_run
/// use pagelog_cli::logger::init_logger;
///
/// // CI run where the log ends up in a file
/// init_logger(false, false, true);
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr) // Keep stdout clean for pipes
        .with_target(false) // Module paths add noise to CI logs
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}

/// Check if colored log output should be enabled.
///
/// `NO_COLOR` disables and `FORCE_COLOR` forces; otherwise the console crate
/// decides from stderr's terminal capabilities.
#[must_use]
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn static_filters_parse() {
        for directives in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }

    #[test]
    #[serial]
    fn no_color_beats_force_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!should_use_colors());
        unsafe {
            std::env::remove_var("NO_COLOR");
        }
        assert!(should_use_colors());
        unsafe {
            std::env::remove_var("FORCE_COLOR");
        }
    }
}
