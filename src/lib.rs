//! Ising MC - 2D Ising model Monte Carlo in Rust
//!
//! This crate provides a square spin lattice with periodic boundaries and a
//! single-spin-flip Metropolis sampler that drives it towards thermal
//! equilibrium at a given inverse temperature.

pub mod error;
pub mod params;
pub mod lattice;
pub mod energy;
pub mod sampling;
pub mod io;


// Re-export commonly used types at crate root
pub use error::{IsingError, Result};
pub use params::Params;
pub use lattice::{Lattice, SPIN_VALUES};
pub use energy::{EnergyCalculator, IsingEnergy};
pub use sampling::{
    acceptance_probability, metropolis_accept, Ensemble, MetropolisSampler, RunSummary, StepOutcome,
};
pub use io::{parse_config, read_config, render_lattice, SimulationConfig};
