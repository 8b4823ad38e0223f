use serde::{Deserialize, Serialize};

use crate::error::{IsingError, Result};

/// Physical parameters of the model, fixed for the lifetime of an ensemble.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Nearest-neighbour coupling J. Negative values give an antiferromagnet.
    pub coupling_const: f64,
    /// Inverse temperature 1/kT.
    pub beta: f64,
    /// External field. Carried along but not part of the energy.
    pub mag_field: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            coupling_const: 1.0,
            beta: 1.0,
            mag_field: 0.0,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("coupling_const", self.coupling_const),
            ("beta", self.beta),
            ("mag_field", self.mag_field),
        ] {
            if !value.is_finite() {
                return Err(IsingError::NonFiniteParameter { name, value });
            }
        }
        Ok(())
    }
}
