use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::types::Amount;

/// How the engine treats a vertex that is already expanded when a cheaper
/// route to it turns up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelaxationMode {
    /// Clear the vertex's visited flag and queue it again so the cheaper
    /// weight reaches its successors. Minimal for any non-negative graph.
    #[default]
    Reopen,
    /// Never relax an expanded vertex and queue each vertex at most once per
    /// run. Reproduces the classic FIFO visit-once behaviour, which can miss
    /// the minimum when a costly route is expanded first.
    VisitOnce,
}

/// Configuration of a [`super::PathFinder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteOptions {
    /// Amount attached to the source vertex at the start of every run.
    pub initial_amount: Amount,
    /// Treatment of expanded vertices.
    pub relaxation: RelaxationMode,
    /// Skip expanding vertices already costlier than the best known route
    /// to the destination.
    pub prune_past_destination: bool,
    /// Upper bound on vertex expansions per run. A run that hits it gives up
    /// and reports no path.
    pub max_expansions: Option<u64>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            initial_amount: 0,
            relaxation: RelaxationMode::Reopen,
            prune_past_destination: true,
            max_expansions: None,
        }
    }
}

impl RouteOptions {
    /// Sets the amount attached to the source vertex.
    pub fn initial_amount(mut self, amount: Amount) -> Self {
        self.initial_amount = amount;
        self
    }

    /// Sets the relaxation mode.
    pub fn relaxation(mut self, mode: RelaxationMode) -> Self {
        self.relaxation = mode;
        self
    }

    /// Enables or disables pruning past the destination.
    pub fn prune_past_destination(mut self, enabled: bool) -> Self {
        self.prune_past_destination = enabled;
        self
    }

    /// Bounds the number of expansions per run.
    pub fn max_expansions(mut self, limit: u64) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_expansions == Some(0) {
            return Err(GraphError::InvalidArgument(
                "max_expansions must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parses and validates options from a TOML document. Missing keys keep
    /// their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let options: Self = toml::from_str(contents)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RouteOptions::default();
        assert_eq!(options.relaxation, RelaxationMode::Reopen);
        assert!(options.prune_past_destination);
        assert_eq!(options.max_expansions, None);
        options.validate().unwrap();
    }

    #[test]
    fn parses_partial_toml() {
        let options = RouteOptions::from_toml_str(
            r#"
            initial_amount = 1000000
            relaxation = "visit_once"
            "#,
        )
        .unwrap();
        assert_eq!(options.initial_amount, 1_000_000);
        assert_eq!(options.relaxation, RelaxationMode::VisitOnce);
        assert!(options.prune_past_destination);
    }

    #[test]
    fn rejects_zero_expansion_bound() {
        let err = RouteOptions::from_toml_str("max_expansions = 0").unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = RouteOptions::from_toml_str("relax = true").unwrap_err();
        assert!(matches!(err, GraphError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.toml");
        fs::write(&path, "prune_past_destination = false\nmax_expansions = 64\n").unwrap();
        let options = RouteOptions::load(&path).unwrap();
        assert!(!options.prune_past_destination);
        assert_eq!(options.max_expansions, Some(64));

        let missing = RouteOptions::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, GraphError::Io(_)));
    }
}
