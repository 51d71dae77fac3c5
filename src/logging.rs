use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps `-v` repetitions to a filter for this crate's targets.
pub fn level_for_verbosity(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }

    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Setup diagnostics logging on stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flags. The console
/// transcript goes to stdout, so the two never interleave in pipes.
pub fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(filter) if !filter.trim().is_empty() => EnvFilter::try_new(&filter)
            .with_context(|| format!("Invalid RUST_LOG filter: {}", filter))?,
        _ => EnvFilter::new(format!(
            "gbfr_extract={}",
            level_for_verbosity(verbose, quiet)
        )),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose >= 2)
                .with_line_number(verbose >= 3),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    tracing::debug!(
        "Logging initialized: verbose={}, quiet={}",
        verbose,
        quiet
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0, false), "warn");
        assert_eq!(level_for_verbosity(1, false), "info");
        assert_eq!(level_for_verbosity(2, false), "debug");
        assert_eq!(level_for_verbosity(5, false), "trace");
        assert_eq!(level_for_verbosity(3, true), "error");
    }

    #[test]
    #[allow(unused_must_use)]
    fn test_setup_logging_twice_does_not_panic() {
        // A second global subscriber is rejected, not a panic
        setup_logging(0, false);
        let second = setup_logging(1, false);
        assert!(second.is_err());
    }
}
