//! Square spin lattice with periodic boundaries.
//!
//! Spins live in a flat row-major buffer of `i8`. A freshly created lattice
//! holds zeros, which are not valid spins; it has to be randomized (or
//! filled) before any energy or update operation will accept it.

use nalgebra::DMatrix;
use rand::Rng;

use crate::error::{IsingError, Result};

/// The two allowed spin values.
pub const SPIN_VALUES: [i8; 2] = [-1, 1];

/// An N x N grid of +/-1 spins.
#[derive(Clone, Debug)]
pub struct Lattice {
    dim: usize,
    spins: Vec<i8>,
    initialized: bool,
}

impl Lattice {
    /// Allocate a `dim` x `dim` lattice with every cell set to the zero placeholder.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(IsingError::InvalidDimension(dim));
        }
        Ok(Self {
            dim,
            spins: vec![0; dim * dim],
            initialized: false,
        })
    }

    /// Assign every cell independently and uniformly to -1 or +1.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for spin in self.spins.iter_mut() {
            *spin = if rng.gen_bool(0.5) { 1 } else { -1 };
        }
        self.initialized = true;
    }

    /// Set every cell to `spin`.
    pub fn fill(&mut self, spin: i8) -> Result<()> {
        Self::check_spin(0, 0, spin)?;
        self.spins.fill(spin);
        self.initialized = true;
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// (nrows, ncols); always (dim, dim).
    pub fn shape(&self) -> (usize, usize) {
        (self.dim, self.dim)
    }

    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Raw row-major view of the cells.
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        i * self.dim + j
    }

    pub(crate) fn check_site(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.dim || j >= self.dim {
            return Err(IsingError::IndexOutOfBounds { i, j, dim: self.dim });
        }
        Ok(())
    }

    pub(crate) fn check_initialized(&self) -> Result<()> {
        if !self.initialized {
            return Err(IsingError::UninitializedLattice);
        }
        Ok(())
    }

    fn check_spin(i: usize, j: usize, value: i8) -> Result<()> {
        if SPIN_VALUES.contains(&value) {
            Ok(())
        } else {
            Err(IsingError::InvalidSpinValue { i, j, value })
        }
    }

    /// Value stored at (i, j). The zero placeholder is returned as-is on an
    /// uninitialized lattice.
    pub fn spin(&self, i: usize, j: usize) -> Result<i8> {
        self.check_site(i, j)?;
        Ok(self.spins[self.index(i, j)])
    }

    /// Unchecked read for callers that already validated the site.
    #[inline]
    pub(crate) fn spin_at(&self, i: usize, j: usize) -> i8 {
        self.spins[self.index(i, j)]
    }

    pub fn set_spin(&mut self, i: usize, j: usize, spin: i8) -> Result<()> {
        self.check_site(i, j)?;
        Self::check_spin(i, j, spin)?;
        let idx = self.index(i, j);
        self.spins[idx] = spin;
        if !self.initialized && self.spins.iter().all(|s| *s != 0) {
            self.initialized = true;
        }
        Ok(())
    }

    /// Toggle -1 <-> +1 at (i, j).
    pub fn flip(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_site(i, j)?;
        let idx = self.index(i, j);
        self.spins[idx] = match self.spins[idx] {
            -1 => 1,
            1 => -1,
            value => return Err(IsingError::InvalidSpinValue { i, j, value }),
        };
        Ok(())
    }

    /// The four axis-aligned neighbours of (i, j): up, down, left, right.
    ///
    /// Both coordinates wrap modulo the row count.
    pub fn neighbors(&self, i: usize, j: usize) -> Result<[(usize, usize); 4]> {
        self.check_site(i, j)?;
        let nrows = self.dim;
        let up = (i + nrows - 1) % nrows;
        let down = (i + 1) % nrows;
        let left = (j + nrows - 1) % nrows;
        let right = (j + 1) % nrows;
        Ok([(up, j), (down, j), (i, left), (i, right)])
    }

    /// Sum of all spins.
    pub fn magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    /// Copy of the grid for renderers; row (i), column (j).
    pub fn snapshot(&self) -> DMatrix<i8> {
        DMatrix::from_row_slice(self.dim, self.dim, &self.spins)
    }
}
