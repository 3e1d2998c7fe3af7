//! Linear scans of one initial-state coordinate, used to map beamline optics.

use hector_core::errors::{ErrorInfo, HectorError};
use hector_core::{xi_to_e, BeamConfig, Particle, PlaneVector, StateVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generator_error;

/// Coordinate varied by a [`LinearScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanAxis {
    /// Horizontal position (m).
    X,
    /// Vertical position (m).
    Y,
    /// Horizontal angle (rad).
    Tx,
    /// Vertical angle (rad).
    Ty,
    /// Relative energy loss.
    Xi,
}

/// Produces `count` particles with one coordinate stepped evenly from `min`
/// to `max`, every other coordinate held fixed.
///
/// For the position and energy-loss axes the fixed transverse coordinates
/// are a position; for the angular axes they are angles. Every particle
/// carries the configured beam particle mass and charge.
#[derive(Debug, Clone)]
pub struct LinearScanner {
    axis: ScanAxis,
    count: u32,
    generated: u32,
    min: f64,
    max: f64,
    fixed: PlaneVector,
    energy: f64,
    kick: f64,
    s0: f64,
    config: BeamConfig,
}

impl LinearScanner {
    /// Creates a scan of `count` particles along `axis` over `[min, max]`.
    ///
    /// Particles start at `s = 0` with the beam energy, kick 1 and zero
    /// fixed coordinates.
    pub fn new(
        axis: ScanAxis,
        count: u32,
        min: f64,
        max: f64,
        config: &BeamConfig,
    ) -> Result<Self, HectorError> {
        if count < 1 {
            return Err(generator_error("invalid-scan", "a scan needs at least one particle")
                .with_axis(axis));
        }
        if !(max - min).is_finite() {
            return Err(
                generator_error("invalid-scan", "scan bounds and their span must be finite").with_axis(axis),
            );
        }
        Ok(Self {
            axis,
            count,
            generated: 0,
            min,
            max,
            fixed: PlaneVector::ZERO,
            energy: config.beam_energy,
            kick: 1.0,
            s0: 0.0,
            config: config.clone(),
        })
    }

    /// Sets the transverse coordinates kept fixed during the scan.
    pub fn with_fixed(mut self, fixed: PlaneVector) -> Self {
        self.fixed = fixed;
        self
    }

    /// Sets the energy of the scanned particles (GeV). Ignored by ξ scans.
    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    /// Sets the kick marker of the scanned states (1 by default).
    pub fn with_kick(mut self, kick: f64) -> Self {
        self.kick = kick;
        self
    }

    /// Sets the longitudinal position the particles start from (m).
    pub fn with_initial_s(mut self, s0: f64) -> Self {
        self.s0 = s0;
        self
    }

    /// Scanned coordinate.
    pub fn axis(&self) -> ScanAxis {
        self.axis
    }

    /// Number of particles in a full scan.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Number of particles already produced.
    pub fn generated(&self) -> u32 {
        self.generated
    }

    /// Particles left before the scan is exhausted.
    pub fn remaining(&self) -> u32 {
        self.count - self.generated
    }

    /// Restarts the scan from its first step.
    pub fn rewind(&mut self) {
        self.generated = 0;
    }

    /// Value of the scanned coordinate at step `index`.
    pub fn value_at(&self, index: u32) -> f64 {
        if self.count == 1 {
            return self.min;
        }
        self.min + f64::from(index) * (self.max - self.min) / f64::from(self.count - 1)
    }

    /// Produces the next particle of the scan.
    ///
    /// Fails with the `generator-exhausted` warning once `count` particles
    /// have been produced.
    pub fn shoot(&mut self) -> Result<Particle, HectorError> {
        if self.generated >= self.count {
            return Err(HectorError::Generator(
                ErrorInfo::warning(
                    "generator-exhausted",
                    "too many particles already generated",
                )
                .with_context("count", self.count),
            )
            .with_axis(self.axis));
        }
        let value = self.value_at(self.generated);
        self.generated += 1;

        let mut position = PlaneVector::ZERO;
        let mut angles = PlaneVector::ZERO;
        let mut energy = self.energy;
        match self.axis {
            ScanAxis::X => position = PlaneVector::new(value, self.fixed.y),
            ScanAxis::Y => position = PlaneVector::new(self.fixed.x, value),
            ScanAxis::Tx => angles = PlaneVector::new(value, self.fixed.y),
            ScanAxis::Ty => angles = PlaneVector::new(self.fixed.x, value),
            ScanAxis::Xi => {
                position = self.fixed;
                energy = xi_to_e(value, self.config.beam_energy);
            }
        }
        debug!(axis = ?self.axis, step = self.generated, value, "scan particle");

        let state = StateVector::from_components(
            [position.x, angles.x, position.y, angles.y, energy, self.kick],
            self.config.particle_mass,
        );
        let mut particle = Particle::from_state(state, self.s0);
        particle.set_charge(self.config.particle_charge);
        Ok(particle)
    }
}

impl Iterator for LinearScanner {
    type Item = Particle;

    fn next(&mut self) -> Option<Particle> {
        self.shoot().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}

trait AxisContext {
    fn with_axis(self, axis: ScanAxis) -> HectorError;
}

impl AxisContext for HectorError {
    fn with_axis(self, axis: ScanAxis) -> HectorError {
        match self {
            HectorError::Generator(info) => {
                HectorError::Generator(info.with_context("axis", format!("{axis:?}")))
            }
            other => other,
        }
    }
}
