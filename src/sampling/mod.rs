//! Sampling module - Metropolis Monte Carlo for the lattice.

mod ensemble;
mod metropolis;

pub use ensemble::{Ensemble, RunSummary};
pub use metropolis::{
    acceptance_probability, metropolis_accept, step, MetropolisSampler, StepOutcome,
};
