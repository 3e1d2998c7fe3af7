//! Random particle guns with flat or Gaussian coordinate distributions.

use hector_core::errors::{ErrorInfo, HectorError};
use hector_core::{BeamConfig, Particle, RngHandle, StateVector};
use rand::distributions::{Distribution, Uniform};
use rand_distr::Normal;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Shape of every coordinate distribution of a [`ParticleGun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Spread {
    /// Uniform between a lower and an upper limit.
    Flat,
    /// Normal with a mean and a standard deviation.
    Gaussian,
}

/// Coordinate sampled by a [`ParticleGun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GunAxis {
    /// Initial longitudinal position (m).
    S,
    /// Horizontal position (m).
    X,
    /// Vertical position (m).
    Y,
    /// Horizontal angle (rad).
    Tx,
    /// Vertical angle (rad).
    Ty,
    /// Energy (GeV).
    Energy,
}

impl GunAxis {
    const ALL: [GunAxis; 6] = [
        GunAxis::S,
        GunAxis::X,
        GunAxis::Y,
        GunAxis::Tx,
        GunAxis::Ty,
        GunAxis::Energy,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy)]
enum Sampler {
    Flat(Uniform<f64>),
    Gaussian(Normal<f64>),
}

impl Sampler {
    fn sample(&self, rng: &mut RngHandle) -> f64 {
        match self {
            Sampler::Flat(dist) => dist.sample(rng),
            Sampler::Gaussian(dist) => dist.sample(rng),
        }
    }
}

/// Generates particles with independently distributed `(s, x, y, x', y', E)`.
///
/// The two parameters of each coordinate are `(lower, upper)` limits for a
/// flat gun and `(mean, sigma)` for a Gaussian one. Every coordinate starts
/// fixed at zero, except the energy which is fixed at the beam energy.
/// Sampling order is `s, x, y, x', y', E`, so a gun built from the same
/// seed policy and gun number reproduces the same particles.
#[derive(Debug, Clone)]
pub struct ParticleGun {
    spread: Spread,
    params: [(f64, f64); 6],
    samplers: [Sampler; 6],
    mass: f64,
    charge: i32,
    kick: f64,
    beam_energy: f64,
    rng: RngHandle,
}

impl ParticleGun {
    /// Flat gun number `gun`, seeded from the configured seed policy.
    pub fn flat(config: &BeamConfig, gun: u64) -> Result<Self, HectorError> {
        Self::new(Spread::Flat, config, gun)
    }

    /// Gaussian gun number `gun`, seeded from the configured seed policy.
    pub fn gaussian(config: &BeamConfig, gun: u64) -> Result<Self, HectorError> {
        Self::new(Spread::Gaussian, config, gun)
    }

    /// Gun of the given spread, with mass and charge taken from `config`.
    pub fn new(spread: Spread, config: &BeamConfig, gun: u64) -> Result<Self, HectorError> {
        let mut params = [(0.0, 0.0); 6];
        params[GunAxis::Energy.index()] = match spread {
            Spread::Flat => (config.beam_energy, config.beam_energy),
            Spread::Gaussian => (config.beam_energy, 0.0),
        };
        let mut samplers = [Sampler::Flat(Uniform::new_inclusive(0.0, 0.0)); 6];
        for axis in GunAxis::ALL {
            let (a, b) = params[axis.index()];
            samplers[axis.index()] = build_sampler(spread, axis, a, b)?;
        }
        Ok(Self {
            spread,
            params,
            samplers,
            mass: config.particle_mass,
            charge: config.particle_charge,
            kick: 1.0,
            beam_energy: config.beam_energy,
            rng: RngHandle::for_gun(&config.seed_policy, gun),
        })
    }

    /// Distribution shape shared by all coordinates.
    pub fn spread(&self) -> Spread {
        self.spread
    }

    /// Raw distribution parameters of `axis`.
    pub fn params(&self, axis: GunAxis) -> (f64, f64) {
        self.params[axis.index()]
    }

    /// Sets the raw distribution parameters of `axis`.
    ///
    /// Fails with `invalid-distribution` on non-finite values, on a flat
    /// range with `a > b` or too wide to sample, or on a negative Gaussian
    /// width.
    pub fn set_params(&mut self, axis: GunAxis, a: f64, b: f64) -> Result<(), HectorError> {
        self.samplers[axis.index()] = build_sampler(self.spread, axis, a, b)?;
        self.params[axis.index()] = (a, b);
        Ok(())
    }

    /// Sets the distribution of `axis` from lower and upper limits.
    ///
    /// A Gaussian gun centres on the midpoint with the half range as width.
    pub fn set_limits(&mut self, axis: GunAxis, lower: f64, upper: f64) -> Result<(), HectorError> {
        match self.spread {
            Spread::Flat => self.set_params(axis, lower, upper),
            Spread::Gaussian => {
                self.set_params(axis, 0.5 * (lower + upper), 0.5 * (upper - lower))
            }
        }
    }

    /// Smears the energy around a mean relative energy loss.
    ///
    /// For a flat gun `(xi_mean ± xi_sigma)` bound the range instead.
    pub fn smear_xi(&mut self, xi_mean: f64, xi_sigma: f64) -> Result<(), HectorError> {
        let energy = self.beam_energy * (1.0 - xi_mean);
        let width = self.beam_energy * xi_sigma;
        match self.spread {
            Spread::Gaussian => self.set_params(GunAxis::Energy, energy, width),
            Spread::Flat => self.set_params(GunAxis::Energy, energy - width, energy + width),
        }
    }

    /// Mass given to the generated particles (GeV/c²).
    pub fn particle_mass(&self) -> f64 {
        self.mass
    }

    /// Sets the mass given to the generated particles.
    pub fn set_particle_mass(&mut self, mass: f64) {
        self.mass = mass;
    }

    /// Charge given to the generated particles (e).
    pub fn particle_charge(&self) -> i32 {
        self.charge
    }

    /// Sets the charge given to the generated particles.
    pub fn set_particle_charge(&mut self, charge: i32) {
        self.charge = charge;
    }

    /// Kick marker given to the generated states.
    pub fn kick(&self) -> f64 {
        self.kick
    }

    /// Sets the kick marker given to the generated states (1 by default).
    pub fn set_kick(&mut self, kick: f64) {
        self.kick = kick;
    }

    /// Generates one particle.
    pub fn shoot(&mut self) -> Particle {
        let mut values = [0.0; 6];
        for axis in GunAxis::ALL {
            values[axis.index()] = self.samplers[axis.index()].sample(&mut self.rng);
        }
        let [s, x, y, tx, ty, energy] = values;
        trace!(s, x, y, tx, ty, energy, "gun particle");

        let state = StateVector::from_components([x, tx, y, ty, energy, self.kick], self.mass);
        let mut particle = Particle::from_state(state, s);
        particle.set_charge(self.charge);
        particle
    }

    /// Generates `count` particles.
    pub fn shoot_many(&mut self, count: usize) -> Vec<Particle> {
        (0..count).map(|_| self.shoot()).collect()
    }
}

fn build_sampler(spread: Spread, axis: GunAxis, a: f64, b: f64) -> Result<Sampler, HectorError> {
    let invalid = |message: &str| {
        HectorError::Generator(
            ErrorInfo::new("invalid-distribution", message)
                .with_context("axis", format!("{axis:?}"))
                .with_context("first", a)
                .with_context("second", b),
        )
    };
    if !a.is_finite() || !b.is_finite() {
        return Err(invalid("distribution parameters must be finite"));
    }
    match spread {
        Spread::Flat => {
            if a > b {
                return Err(invalid("lower limit exceeds upper limit"));
            }
            if !uniform_span_is_finite(a, b) {
                return Err(invalid("range is too wide to sample"));
            }
            Ok(Sampler::Flat(Uniform::new_inclusive(a, b)))
        }
        Spread::Gaussian => Normal::new(a, b)
            .map(Sampler::Gaussian)
            .map_err(|_| invalid("width must not be negative")),
    }
}

// `Uniform` scales the span up by slightly more than one ulp
fn uniform_span_is_finite(lower: f64, upper: f64) -> bool {
    ((upper - lower) * (1.0 + f64::EPSILON)).is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_index_their_slot() {
        for (idx, axis) in GunAxis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), idx);
        }
    }

    #[test]
    fn rejected_parameters_leave_gun_untouched() {
        let mut gun = ParticleGun::flat(&BeamConfig::default(), 0).expect("gun");
        gun.set_params(GunAxis::X, -1.0, 1.0).expect("valid range");
        assert!(gun.set_params(GunAxis::X, 1.0, -1.0).is_err());
        assert_eq!(gun.params(GunAxis::X), (-1.0, 1.0));
    }
}
