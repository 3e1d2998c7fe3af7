//! Six-component transverse phase-space state of a particle.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::algebra::{FourMomentum, PlaneVector};
use crate::config::BeamConfig;
use crate::kinematics::{e_to_xi, xi_to_e};

/// Storage scale applied to transverse positions (m -> mm).
pub const POSITION_SCALE: f64 = 1.0e3;
/// Storage scale applied to transverse angles (rad -> µrad).
pub const ANGLE_SCALE: f64 = 1.0e6;

/// Sign given to the longitudinal momentum rebuilt by [`StateVector::set_mass`]
/// when the state carries no transverse momentum.
pub const LONGITUDINAL_SIGN: f64 = 1.0;

const X: usize = 0;
const TX: usize = 1;
const Y: usize = 2;
const TY: usize = 3;
const E: usize = 4;
const K: usize = 5;

/// Phase-space point `(x, x', y, y', E, kick)` with its rest mass.
///
/// Positions and angles are held internally in mm and µrad; every accessor
/// takes and returns SI units (m, rad). The mass is carried next to the
/// six-vector, not inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    values: [f64; 6],
    mass: f64,
}

impl Default for StateVector {
    /// Zero position and angles, zero energy, kick 1 and zero mass.
    fn default() -> Self {
        let mut values = [0.0; 6];
        values[K] = 1.0;
        Self { values, mass: 0.0 }
    }
}

impl StateVector {
    /// Blank state on the reference orbit, carrying the beam energy.
    pub fn blank(config: &BeamConfig) -> Self {
        let mut state = Self::default();
        state.set_energy(config.beam_energy);
        state
    }

    /// Builds a state from `[x, x', y, y', E, kick]` in SI units and a mass.
    pub fn from_components(components: [f64; 6], mass: f64) -> Self {
        let mut state = Self {
            values: [0.0; 6],
            mass,
        };
        state.set_position(PlaneVector::new(components[X], components[Y]));
        state.set_angles(PlaneVector::new(components[TX], components[TY]));
        state.set_energy(components[E]);
        state.set_kick(components[K]);
        state
    }

    /// Builds a physical state from a four-momentum and a transverse position.
    ///
    /// The mass is the invariant mass of `momentum` and the kick is set to 1.
    pub fn from_momentum(momentum: &FourMomentum, position: PlaneVector) -> Self {
        let mut state = Self {
            values: [0.0; 6],
            mass: momentum.mass(),
        };
        state.set_position(position);
        state.set_momentum(momentum);
        state.set_kick(1.0);
        state
    }

    /// Builds a synthetic state from position, angles, energy and kick marker.
    ///
    /// The mass is left at zero and is expected to be set by the caller.
    pub fn from_position_angles(
        position: PlaneVector,
        angles: PlaneVector,
        energy: f64,
        kick: f64,
    ) -> Self {
        let mut state = Self {
            values: [0.0; 6],
            mass: 0.0,
        };
        state.set_position(position);
        state.set_angles(angles);
        state.set_energy(energy);
        state.set_kick(kick);
        state
    }

    /// Components `[x, x', y, y', E, kick]` in SI units.
    pub fn components(&self) -> [f64; 6] {
        let position = self.position();
        let angles = self.angles();
        [
            position.x,
            angles.x,
            position.y,
            angles.y,
            self.energy(),
            self.kick(),
        ]
    }

    /// Sets the transverse position (m).
    pub fn set_position(&mut self, position: PlaneVector) {
        self.values[X] = position.x * POSITION_SCALE;
        self.values[Y] = position.y * POSITION_SCALE;
    }

    /// Transverse position (m).
    pub fn position(&self) -> PlaneVector {
        PlaneVector::new(
            self.values[X] / POSITION_SCALE,
            self.values[Y] / POSITION_SCALE,
        )
    }

    /// Horizontal position (m).
    pub fn x(&self) -> f64 {
        self.position().x
    }

    /// Vertical position (m).
    pub fn y(&self) -> f64 {
        self.position().y
    }

    /// Sets the transverse angles `(x', y')` (rad).
    pub fn set_angles(&mut self, angles: PlaneVector) {
        self.values[TX] = angles.x * ANGLE_SCALE;
        self.values[TY] = angles.y * ANGLE_SCALE;
    }

    /// Transverse angles `(x', y')` (rad).
    pub fn angles(&self) -> PlaneVector {
        PlaneVector::new(
            self.values[TX] / ANGLE_SCALE,
            self.values[TY] / ANGLE_SCALE,
        )
    }

    /// Horizontal angle (rad).
    pub fn tx(&self) -> f64 {
        self.angles().x
    }

    /// Vertical angle (rad).
    pub fn ty(&self) -> f64 {
        self.angles().y
    }

    /// Sets the total energy (GeV).
    pub fn set_energy(&mut self, energy: f64) {
        self.values[E] = energy;
    }

    /// Total energy (GeV).
    pub fn energy(&self) -> f64 {
        self.values[E]
    }

    /// Sets the kick marker.
    pub fn set_kick(&mut self, kick: f64) {
        self.values[K] = kick;
    }

    /// Kick marker; 1 for states built from a physical four-momentum.
    pub fn kick(&self) -> f64 {
        self.values[K]
    }

    /// Sets the energy from a relative energy loss with respect to the beam.
    pub fn set_xi(&mut self, xi: f64, config: &BeamConfig) {
        self.set_energy(xi_to_e(xi, config.beam_energy));
    }

    /// Relative energy loss with respect to the beam.
    pub fn xi(&self, config: &BeamConfig) -> f64 {
        e_to_xi(self.energy(), config.beam_energy)
    }

    /// Rest mass (GeV/c²).
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Takes angles, energy and mass from a four-momentum.
    pub fn set_momentum(&mut self, momentum: &FourMomentum) {
        self.set_angles(PlaneVector::new(
            momentum.px.atan2(momentum.pz),
            momentum.py.atan2(momentum.pz),
        ));
        self.set_energy(momentum.e);
        self.mass = momentum.mass();
    }

    /// Adds the angles of a four-momentum to the current ones and takes its
    /// energy and mass.
    pub fn add_momentum(&mut self, momentum: &FourMomentum) {
        let kick = PlaneVector::new(
            momentum.px.atan2(momentum.pz),
            momentum.py.atan2(momentum.pz),
        );
        self.set_angles(self.angles() + kick);
        self.set_energy(momentum.e);
        self.mass = momentum.mass();
    }

    /// Four-momentum rebuilt from the angles, energy and mass.
    pub fn momentum(&self) -> FourMomentum {
        let tan = self.angles().map(f64::tan);
        let energy = self.energy();
        let pz = ((energy * energy - self.mass * self.mass)
            / (1.0 + tan.x * tan.x + tan.y * tan.y))
            .sqrt();
        FourMomentum::new(pz * tan.x, pz * tan.y, pz, energy)
    }

    /// Changes the mass while keeping the kinematics consistent.
    ///
    /// With a non-zero transverse momentum the 3-momentum is kept and the
    /// energy follows. Otherwise the energy is kept and a purely longitudinal
    /// momentum of sign [`LONGITUDINAL_SIGN`] is rebuilt.
    pub fn set_mass(&mut self, mass: f64) {
        let momentum = self.momentum();
        if mass == momentum.mass() {
            self.mass = mass;
            return;
        }
        if momentum.pt() != 0.0 {
            self.mass = mass;
            self.set_energy(momentum.p().hypot(mass));
        } else {
            let energy = self.energy();
            let pz = LONGITUDINAL_SIGN * (energy * energy - mass * mass).sqrt();
            self.set_momentum(&FourMomentum::new(0.0, 0.0, pz, energy));
            self.mass = mass;
        }
    }
}

impl Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.position();
        let angles = self.angles();
        write!(
            f,
            "{{ x = {:+.4e} m, x' = {:+.3e} rad, y = {:+.4e} m, y' = {:+.3e} rad, k = {:.1}, E = {:.3e} GeV }}",
            position.x,
            angles.x,
            position.y,
            angles.y,
            self.kick(),
            self.energy()
        )
    }
}
