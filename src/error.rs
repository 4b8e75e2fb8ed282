//! Error types returned by the coloring engine and its readers.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ColoringError>;

/// Errors raised by the colorers and by the instance readers.
#[derive(Error, Debug)]
pub enum ColoringError {
    /// the genetic colorer needs at least one chromosome
    #[error("invalid population size: {size} (must be at least 1)")]
    InvalidPopulationSize {
        /// requested population size
        size: usize,
    },

    /// two vertices of the input graph share the same id
    #[error("duplicate vertex id: {id}")]
    DuplicateVertexId {
        /// offending id
        id: String,
    },

    /// the stopping criterion fired before the coloring was complete
    #[error("search stopped before completion")]
    Stopped,

    /// malformed instance file
    #[error("parse error: {message}")]
    Parse {
        /// description of the parse failure
        message: String,
    },

    /// unknown algorithm or instance type name
    #[error("unknown {kind}: {name}")]
    Unknown {
        /// what was being looked up (algorithm, instance type)
        kind: &'static str,
        /// the name that did not match
        name: String,
    },

    /// file system failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
