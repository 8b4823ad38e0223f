//! Error types for the lattice simulation.
//!
//! Every variant is a programmer-error class failure: nothing here is
//! transient, so callers should abort rather than retry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IsingError {
    #[error("invalid lattice dimension {0}: must be positive")]
    InvalidDimension(usize),

    #[error("lattice used before its spins were initialized")]
    UninitializedLattice,

    #[error("site ({i}, {j}) is outside a {dim}x{dim} lattice")]
    IndexOutOfBounds { i: usize, j: usize, dim: usize },

    #[error("invalid spin value {value} at site ({i}, {j}), expected -1 or +1")]
    InvalidSpinValue { i: usize, j: usize, value: i8 },

    #[error("parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("failed to read configuration `{path}`: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, IsingError>;
