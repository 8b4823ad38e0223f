//! The simulation engine: one lattice, its parameters and its random source.

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::metropolis::{MetropolisSampler, StepOutcome};
use crate::energy::{EnergyCalculator, IsingEnergy};
use crate::error::Result;
use crate::lattice::Lattice;
use crate::params::Params;

/// Summary of a bounded run of Metropolis steps.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub n_steps: usize,
    pub accepted: usize,
    pub acceptance_rate: f64,
    pub energy: f64,
    pub magnetization: i64,
}

/// Owns the lattice exclusively. Not meant to be shared between threads;
/// independent ensembles (each with its own generator) can run in parallel.
#[derive(Debug)]
pub struct Ensemble<R: Rng = StdRng> {
    lattice: Lattice,
    params: Params,
    sampler: MetropolisSampler<IsingEnergy>,
    rng: R,
}

impl Ensemble<StdRng> {
    /// Create an ensemble seeded from system entropy.
    pub fn new(dim: usize, params: Params) -> Result<Self> {
        Self::with_rng(dim, params, StdRng::from_entropy())
    }

    /// Create an ensemble with a reproducible random stream.
    pub fn with_seed(dim: usize, params: Params, seed: u64) -> Result<Self> {
        Self::with_rng(dim, params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Ensemble<R> {
    /// The lattice starts as zero placeholders; call [`Ensemble::randomize`]
    /// before stepping.
    pub fn with_rng(dim: usize, params: Params, rng: R) -> Result<Self> {
        params.validate()?;
        let lattice = Lattice::new(dim)?;
        let sampler = MetropolisSampler::from_params(&params)?;
        Ok(Self { lattice, params, sampler, rng })
    }

    /// Assign every spin uniformly at random.
    pub fn randomize(&mut self) {
        self.lattice.randomize(&mut self.rng);
    }

    pub fn dim(&self) -> usize {
        self.lattice.dim()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Direct access for preparing a specific configuration.
    pub fn lattice_mut(&mut self) -> &mut Lattice {
        &mut self.lattice
    }

    /// Read-only copy of the grid for renderers.
    pub fn snapshot(&self) -> DMatrix<i8> {
        self.lattice.snapshot()
    }

    /// Advance by one Metropolis update.
    pub fn step(&mut self) -> Result<StepOutcome> {
        self.sampler.step(&mut self.lattice, &mut self.rng)
    }

    /// N^2 consecutive steps. Returns the number of accepted flips.
    pub fn sweep(&mut self) -> Result<usize> {
        let mut accepted = 0;
        for _ in 0..self.lattice.n_sites() {
            if self.step()?.accepted {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// Run `n_steps` single-spin updates.
    pub fn run(&mut self, n_steps: usize) -> Result<RunSummary> {
        let n_sites = self.lattice.n_sites();
        let mut accepted = 0;

        for step in 0..n_steps {
            if self.step()?.accepted {
                accepted += 1;
            }

            if (step + 1) % n_sites == 0 {
                debug!(
                    "sweep {}: accepted {}/{} so far, M = {}",
                    (step + 1) / n_sites,
                    accepted,
                    step + 1,
                    self.lattice.magnetization()
                );
            }
        }

        let acceptance_rate = if n_steps == 0 {
            0.0
        } else {
            accepted as f64 / n_steps as f64
        };
        let summary = RunSummary {
            n_steps,
            accepted,
            acceptance_rate,
            energy: self.total_state_energy()?,
            magnetization: self.lattice.magnetization(),
        };
        info!(
            "ran {} steps, acceptance {:.4}, E = {:.4}, M = {}",
            summary.n_steps, summary.acceptance_rate, summary.energy, summary.magnetization
        );
        Ok(summary)
    }

    pub fn site_energy(&self, i: usize, j: usize) -> Result<f64> {
        self.sampler.energy().site_energy(&self.lattice, i, j)
    }

    pub fn flip_energy_delta(&self, i: usize, j: usize) -> Result<f64> {
        self.sampler.energy().flip_energy_delta(&self.lattice, i, j)
    }

    /// Diagnostic total energy; not used by the sampler.
    pub fn total_state_energy(&self) -> Result<f64> {
        self.sampler.energy().total_state_energy(&self.lattice)
    }

    pub fn energy_per_site(&self) -> Result<f64> {
        Ok(self.total_state_energy()? / self.lattice.n_sites() as f64)
    }

    pub fn magnetization(&self) -> i64 {
        self.lattice.magnetization()
    }
}
