use std::io;
use thiserror::Error;

/// Result type used by the fallible construction and configuration surfaces.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors reported by graph construction, configuration and audits.
///
/// Legitimate misses during a search (absent edge, unreachable vertex) are
/// `Option`s and never show up here.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A configuration document could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
    /// The sparse edge index no longer agrees with its adjacency lists.
    #[error("corruption detected: {0}")]
    Corruption(String),
    /// A caller supplied an argument outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The selected representation does not support the operation.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(&'static str),
}
