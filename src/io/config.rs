//! YAML run configuration.
//!
//! ```yaml
//! params:
//!   coupling_const: 1.0
//!   beta: 0.44
//!   mag_field: 0.0
//! dimension: 32
//! steps: 100000
//! seed: 7
//! ```
//!
//! `params` and all three of its fields are required; the rest may be
//! omitted and fall back to the command line.

use serde::{Deserialize, Serialize};

use crate::error::{IsingError, Result};
use crate::params::Params;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub params: Params,
    #[serde(default)]
    pub dimension: Option<usize>,
    #[serde(default)]
    pub steps: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Parse and validate a configuration document.
pub fn parse_config(content: &str) -> Result<SimulationConfig> {
    let config: SimulationConfig = serde_yaml::from_str(content)?;
    config.params.validate()?;
    Ok(config)
}

pub fn read_config(filename: &str) -> Result<SimulationConfig> {
    let content = std::fs::read_to_string(filename).map_err(|source| IsingError::ConfigIo {
        path: filename.to_string(),
        source,
    })?;
    parse_config(&content)
}
