//! Single-spin-flip Metropolis updates.
//!
//! One step picks a site uniformly at random, evaluates the energy change of
//! flipping it and accepts with probability min(1, exp(-beta * delta)).

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::energy::{EnergyCalculator, IsingEnergy};
use crate::error::{IsingError, Result};
use crate::lattice::Lattice;
use crate::params::Params;

/// What happened during one Metropolis step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub site: (usize, usize),
    pub delta: f64,
    pub accepted: bool,
}

/// Metropolis acceptance probability for an energy change `delta`.
#[inline]
pub fn acceptance_probability(delta: f64, beta: f64) -> f64 {
    if delta <= 0.0 {
        1.0
    } else {
        (-beta * delta).exp()
    }
}

/// Accept when the uniform draw `r` in [0, 1) falls below the acceptance probability.
#[inline]
pub fn metropolis_accept(delta: f64, beta: f64, r: f64) -> bool {
    r < acceptance_probability(delta, beta)
}

/// Stateless Metropolis update rule. Sites are drawn over whatever lattice
/// is passed to [`MetropolisSampler::step`].
#[derive(Clone, Debug)]
pub struct MetropolisSampler<E: EnergyCalculator> {
    energy: E,
    beta: f64,
}

impl<E: EnergyCalculator> MetropolisSampler<E> {
    pub fn new(energy: E, beta: f64) -> Result<Self> {
        if !beta.is_finite() {
            return Err(IsingError::NonFiniteParameter { name: "beta", value: beta });
        }
        Ok(Self { energy, beta })
    }

    pub fn energy(&self) -> &E {
        &self.energy
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Propose and possibly apply a flip at one random site.
    ///
    /// A rejected proposal still counts as a step taken.
    pub fn step<R: Rng + ?Sized>(
        &self,
        lattice: &mut Lattice,
        rng: &mut R,
    ) -> Result<StepOutcome> {
        let site_dist = Uniform::new(0, lattice.dim());
        let i = site_dist.sample(rng);
        let j = site_dist.sample(rng);
        let r: f64 = rng.gen();

        let delta = self.energy.flip_energy_delta(lattice, i, j)?;
        let accepted = metropolis_accept(delta, self.beta, r);
        if accepted {
            lattice.flip(i, j)?;
        }

        Ok(StepOutcome { site: (i, j), delta, accepted })
    }
}

impl MetropolisSampler<IsingEnergy> {
    pub fn from_params(params: &Params) -> Result<Self> {
        params.validate()?;
        Self::new(IsingEnergy::new(params.coupling_const), params.beta)
    }
}

/// One Metropolis step on `lattice` with the given parameters.
pub fn step<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    params: &Params,
    rng: &mut R,
) -> Result<StepOutcome> {
    MetropolisSampler::from_params(params)?.step(lattice, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn uniform_lattice(dim: usize, spin: i8) -> Lattice {
        let mut lat = Lattice::new(dim).unwrap();
        lat.fill(spin).unwrap();
        lat
    }

    fn count_down(lat: &Lattice) -> usize {
        lat.spins().iter().filter(|&&s| s == -1).count()
    }

    #[test]
    fn test_acceptance_probability() {
        assert_eq!(acceptance_probability(-8.0, 1.0), 1.0);
        assert_eq!(acceptance_probability(0.0, 1.0), 1.0);
        assert_relative_eq!(acceptance_probability(4.0, 0.5), (-2.0f64).exp());
        assert_eq!(acceptance_probability(8.0, 0.0), 1.0);
    }

    #[test]
    fn test_non_positive_delta_accepted_for_any_draw() {
        for r in [0.0, 0.25, 0.5, 0.999_999_999] {
            assert!(metropolis_accept(-4.0, 2.0, r));
            assert!(metropolis_accept(0.0, 2.0, r));
        }
    }

    #[test]
    fn test_energy_lowering_step_always_flips() {
        // Antiferromagnetic coupling on an aligned lattice: every flip has
        // delta = -8, so each step flips exactly the chosen site.
        let params = Params { coupling_const: -1.0, beta: 1.0, mag_field: 0.0 };
        let mut rng = StdRng::seed_from_u64(42);
        let mut lat = uniform_lattice(5, 1);

        let outcome = step(&mut lat, &params, &mut rng).unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.delta, -8.0);
        assert_eq!(count_down(&lat), 1);
        let (i, j) = outcome.site;
        assert_eq!(lat.spin(i, j).unwrap(), -1);
    }

    #[test]
    fn test_zero_beta_accepts_energy_raising_flips() {
        let params = Params { coupling_const: 1.0, beta: 0.0, mag_field: 0.0 };
        let sampler = MetropolisSampler::from_params(&params).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let mut lat = uniform_lattice(4, 1);
            let outcome = sampler.step(&mut lat, &mut rng).unwrap();
            assert_eq!(outcome.delta, 8.0);
            assert!(outcome.accepted);
            assert_eq!(count_down(&lat), 1);
        }
    }

    #[test]
    fn test_cold_lattice_rejects_energy_raising_flips() {
        let params = Params { coupling_const: 1.0, beta: 1000.0, mag_field: 0.0 };
        let sampler = MetropolisSampler::from_params(&params).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut lat = uniform_lattice(4, -1);
        for _ in 0..100 {
            let outcome = sampler.step(&mut lat, &mut rng).unwrap();
            assert!(!outcome.accepted);
        }
        assert_eq!(count_down(&lat), 16);
    }

    #[test]
    fn test_single_site_lattice() {
        let params = Params { coupling_const: 1.0, beta: 0.0, mag_field: 0.0 };
        let mut rng = StdRng::seed_from_u64(3);
        let mut lat = uniform_lattice(1, 1);
        let outcome = step(&mut lat, &params, &mut rng).unwrap();
        assert_eq!(outcome.site, (0, 0));
        assert!(outcome.accepted);
        assert_eq!(lat.spin(0, 0).unwrap(), -1);
    }

    #[test]
    fn test_sampler_covers_whole_lattice_it_is_given() {
        // The same sampler must reach every site of any lattice it steps.
        let params = Params { coupling_const: 1.0, beta: 0.0, mag_field: 0.0 };
        let sampler = MetropolisSampler::from_params(&params).unwrap();
        let mut rng = StdRng::seed_from_u64(10);

        let mut small = uniform_lattice(3, 1);
        for _ in 0..200 {
            let (i, j) = sampler.step(&mut small, &mut rng).unwrap().site;
            assert!(i < 3 && j < 3);
        }

        let mut lat = uniform_lattice(10, 1);
        let mut visited = vec![false; 100];
        for _ in 0..10_000 {
            let (i, j) = sampler.step(&mut lat, &mut rng).unwrap().site;
            visited[i * 10 + j] = true;
        }
        assert!(visited.iter().all(|&v| v));
    }

    #[test]
    fn test_non_finite_beta_rejected() {
        let params = Params { beta: f64::NAN, ..Params::default() };
        let mut rng = StdRng::seed_from_u64(0);
        let mut lat = uniform_lattice(3, 1);
        assert!(matches!(
            step(&mut lat, &params, &mut rng),
            Err(IsingError::NonFiniteParameter { name: "beta", .. })
        ));
        assert!(matches!(
            MetropolisSampler::new(IsingEnergy::new(1.0), f64::INFINITY),
            Err(IsingError::NonFiniteParameter { name: "beta", .. })
        ));
        assert_eq!(count_down(&lat), 0);
    }

    #[test]
    fn test_step_on_uninitialized_lattice_fails() {
        let params = Params::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut lat = Lattice::new(3).unwrap();
        assert!(matches!(
            step(&mut lat, &params, &mut rng),
            Err(IsingError::UninitializedLattice)
        ));
    }

    #[test]
    fn test_spin_invariant_after_many_steps() {
        let params = Params { coupling_const: 1.0, beta: 0.4, mag_field: 0.0 };
        let sampler = MetropolisSampler::from_params(&params).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut lat = Lattice::new(12).unwrap();
        lat.randomize(&mut rng);
        for _ in 0..5000 {
            sampler.step(&mut lat, &mut rng).unwrap();
        }
        assert!(lat.spins().iter().all(|&s| s == 1 || s == -1));
    }
}
