//! Errors raised while resolving a build plan.
//!
//! Every variant aborts the whole resolution. Nothing here is retried: the
//! inputs are static configuration plus one local filesystem walk.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving the profile or assembling a descriptor
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Malformed debug build flag {value:?}: expected a boolean or numeric literal")]
    ConfigParseError { value: String },

    #[error("Invalid extension module name {name:?}: expected a dotted identifier")]
    InvalidModuleNameError { name: String },

    #[error("Extension module {module} has no source files")]
    NoSourcesError { module: String },

    #[error("Extension option {key:?} is managed by the build configuration")]
    ReservedOption { key: String },

    #[error("Failed to discover header files under {}: {source}", root.display())]
    DependencyDiscoveryError {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for resolution operations
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
