//! Nearest-neighbour Ising energy on a periodic square lattice.
//!
//! E(i,j) = -J * s(i,j) * sum of the four neighbour spins. The field term is
//! not included.

use crate::error::Result;
use crate::lattice::Lattice;

/// Energy of a spin configuration, evaluated site by site.
pub trait EnergyCalculator {
    /// Energy contribution of the site at (i, j).
    fn site_energy(&self, lattice: &Lattice, i: usize, j: usize) -> Result<f64>;

    /// Energy change if the spin at (i, j) were flipped. Does not mutate.
    fn flip_energy_delta(&self, lattice: &Lattice, i: usize, j: usize) -> Result<f64> {
        Ok(-2.0 * self.site_energy(lattice, i, j)?)
    }

    /// Unweighted sum of `site_energy` over every site, so each bond is
    /// counted from both ends.
    fn total_state_energy(&self, lattice: &Lattice) -> Result<f64> {
        lattice.check_initialized()?;
        let dim = lattice.dim();
        let mut total = 0.0;
        for i in 0..dim {
            for j in 0..dim {
                total += self.site_energy(lattice, i, j)?;
            }
        }
        Ok(total)
    }
}

/// Zero-field Ising coupling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IsingEnergy {
    pub coupling_const: f64,
}

impl IsingEnergy {
    pub fn new(coupling_const: f64) -> Self {
        Self { coupling_const }
    }
}

impl EnergyCalculator for IsingEnergy {
    fn site_energy(&self, lattice: &Lattice, i: usize, j: usize) -> Result<f64> {
        lattice.check_site(i, j)?;
        lattice.check_initialized()?;

        let s_k = lattice.spin_at(i, j) as f64;
        let neighbor_sum: f64 = lattice
            .neighbors(i, j)?
            .iter()
            .map(|&(x, y)| lattice.spin_at(x, y) as f64)
            .sum();

        Ok(-self.coupling_const * s_k * neighbor_sum)
    }
}
