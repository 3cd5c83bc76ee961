//! Tracing subscriber setup for binaries and tests that want search diagnostics.

use crate::error::{GraphError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global `fmt` subscriber filtered by `level`
/// (any `EnvFilter` directive, e.g. `"sombra_route=trace"`).
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| GraphError::InvalidArgument(format!("Invalid log level: {e}")))?,
        )
        .with_target(true)
        .try_init()
        .map_err(|_| GraphError::InvalidArgument("Logging already initialized".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        let err = init_logging("sombra_route=bogus").unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
    }
}
