//! Particle trajectory: state vectors indexed by longitudinal position.

use std::fmt::{self, Display};

use rand::distributions::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::algebra::{FourMomentum, PlaneVector};
use crate::config::BeamConfig;
use crate::errors::{ErrorInfo, HectorError, Severity};
use crate::kinematics::{photon_recoil, PhotonEmission, PhotonRecoil};
use crate::rng::RngHandle;
use crate::state::StateVector;

/// A longitudinal position paired with the state recorded there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitudinal coordinate along the beamline (m).
    pub s: f64,
    /// Phase-space state at `s`.
    pub state: StateVector,
}

/// Result of a photon emission with non-zero virtuality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionOutcome {
    /// Recoil kinematics, including the clamped virtuality.
    pub recoil: PhotonRecoil,
    /// Sampled azimuthal angle (rad).
    pub phi: f64,
}

/// A particle and its trajectory through the beamline.
///
/// Positions are kept sorted by `s` with unique keys. Every recorded state
/// shares the mass of the first one. Deserialized trajectories are rebuilt
/// through [`Particle::add_position`], so these invariants hold for them too.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "StoredParticle")]
pub struct Particle {
    charge: i32,
    pdg_id: i32,
    stopped: bool,
    positions: Vec<Position>,
}

#[derive(Deserialize)]
struct StoredParticle {
    charge: i32,
    pdg_id: i32,
    stopped: bool,
    positions: Vec<Position>,
}

impl TryFrom<StoredParticle> for Particle {
    type Error = HectorError;

    fn try_from(stored: StoredParticle) -> Result<Self, Self::Error> {
        let mut particle = Particle {
            charge: stored.charge,
            pdg_id: stored.pdg_id,
            ..Particle::default()
        };
        for pos in stored.positions {
            if particle.locate(normalize_key(pos.s)).is_ok() {
                return Err(HectorError::Trajectory(
                    ErrorInfo::new("duplicate-position", "stored trajectory repeats a position")
                        .with_context("s", pos.s),
                ));
            }
            particle.add_position(pos.s, pos.state)?;
        }
        particle.stopped = stored.stopped;
        Ok(particle)
    }
}

impl Particle {
    /// Creates a particle with an empty trajectory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a particle seeded with one state at `s0`.
    pub fn from_state(state: StateVector, s0: f64) -> Self {
        Self {
            positions: vec![Position {
                s: normalize_key(s0),
                state,
            }],
            ..Self::default()
        }
    }

    /// Creates a particle at `s = 0` from its four-momentum and transverse position.
    pub fn from_momentum(
        momentum: &FourMomentum,
        position: PlaneVector,
        charge: i32,
        pdg_id: i32,
    ) -> Self {
        let mut particle = Self::from_state(StateVector::from_momentum(momentum, position), 0.0);
        particle.charge = charge;
        particle.pdg_id = pdg_id;
        particle
    }

    /// Creates a particle at rest at `s = 0` with the given mass and charge.
    pub fn from_mass_charge(mass: f64, charge: i32) -> Self {
        let mut particle = Self::from_state(StateVector::from_components([0.0; 6], mass), 0.0);
        particle.charge = charge;
        particle
    }

    /// Electric charge (e).
    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Sets the electric charge (e).
    pub fn set_charge(&mut self, charge: i32) {
        self.charge = charge;
    }

    /// PDG particle identifier.
    pub fn pdg_id(&self) -> i32 {
        self.pdg_id
    }

    /// Sets the PDG particle identifier.
    pub fn set_pdg_id(&mut self, pdg_id: i32) {
        self.pdg_id = pdg_id;
    }

    /// Whether the particle was stopped at its last recorded position.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Mass established by the first recorded state.
    pub fn mass(&self) -> Option<f64> {
        self.positions.first().map(|pos| pos.state.mass())
    }

    /// Number of recorded positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no position has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Recorded positions, ordered by `s`.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Iterates over the recorded positions in increasing `s`.
    pub fn iter(&self) -> impl Iterator<Item = &Position> + '_ {
        self.positions.iter()
    }

    /// First recorded position.
    pub fn first_position(&self) -> Option<&Position> {
        self.positions.first()
    }

    /// Last recorded position.
    pub fn last_position(&self) -> Option<&Position> {
        self.positions.last()
    }

    /// Longitudinal coordinate of the first recorded position.
    pub fn first_s(&self) -> Option<f64> {
        self.first_position().map(|pos| pos.s)
    }

    /// Longitudinal coordinate of the last recorded position.
    pub fn last_s(&self) -> Option<f64> {
        self.last_position().map(|pos| pos.s)
    }

    /// State at the first recorded position.
    pub fn first_state(&self) -> Option<&StateVector> {
        self.first_position().map(|pos| &pos.state)
    }

    /// State at the last recorded position.
    pub fn last_state(&self) -> Option<&StateVector> {
        self.last_position().map(|pos| &pos.state)
    }

    /// Drops every recorded position but the first one.
    pub fn clear(&mut self) {
        self.positions.truncate(1);
    }

    /// Records `state` at `s`, replacing any state already stored there.
    pub fn add_position(&mut self, s: f64, state: StateVector) -> Result<(), HectorError> {
        self.add_position_with_status(s, state, false)
    }

    /// Records `state` at `s` and flags whether the particle stopped there.
    ///
    /// Fails with `mass-not-conserved` when the trajectory is not empty and
    /// the state's mass differs from the established one.
    pub fn add_position_with_status(
        &mut self,
        s: f64,
        state: StateVector,
        stopped: bool,
    ) -> Result<(), HectorError> {
        if !s.is_finite() {
            return Err(HectorError::Trajectory(
                ErrorInfo::new("non-finite-position", "longitudinal position must be finite")
                    .with_context("s", s),
            ));
        }
        if let Some(mass) = self.mass() {
            if mass != state.mass() {
                return Err(HectorError::Trajectory(
                    ErrorInfo::new(
                        "mass-not-conserved",
                        "particle mass is not conserved in propagation",
                    )
                    .with_context("previous_mass", mass)
                    .with_context("new_mass", state.mass())
                    .with_context("s", s)
                    .with_hint("transport steps must not change the particle species"),
                ));
            }
        }
        let s = normalize_key(s);
        match self.locate(s) {
            Ok(idx) => self.positions[idx].state = state,
            Err(idx) => self.positions.insert(idx, Position { s, state }),
        }
        self.stopped = stopped;
        Ok(())
    }

    /// State at `s`, interpolated when `s` is not a recorded position.
    ///
    /// Only the transverse position is interpolated linearly between the
    /// neighbouring records; angles, energy, kick and mass are those of the
    /// lower neighbour. When no interpolation is possible a warning is
    /// logged and a default state is returned.
    pub fn state_vector_at(&self, s: f64) -> StateVector {
        self.try_state_vector_at(s).unwrap_or_else(|err| {
            warn!(s, code = err.code(), "{}", err.info().message);
            StateVector::default()
        })
    }

    /// Same as [`Particle::state_vector_at`], returning the warning as an error.
    pub fn try_state_vector_at(&self, s: f64) -> Result<StateVector, HectorError> {
        if self.positions.is_empty() {
            return Err(empty_trajectory("cannot look up a state in an empty trajectory"));
        }
        let idx = match self.locate(normalize_key(s)) {
            Ok(idx) => return Ok(self.positions[idx].state),
            Err(idx) => idx,
        };
        let lower = match idx.checked_sub(1) {
            Some(lower) => &self.positions[lower],
            None => return Err(interpolation_impossible(s, "no recorded position below s")),
        };
        let upper = self
            .positions
            .get(idx)
            .ok_or_else(|| interpolation_impossible(s, "no recorded position above s"))?;

        let drift_length = upper.s - lower.s;
        if drift_length == 0.0 {
            return Err(interpolation_impossible(s, "zero drift length between neighbours"));
        }

        let before = lower.state.position();
        let after = upper.state.position();
        let mut state = lower.state;
        state.set_position(before + ((s - lower.s) / drift_length) * (after - before));
        Ok(state)
    }

    /// Four-momentum at `s`.
    pub fn momentum_at(&self, s: f64) -> FourMomentum {
        self.state_vector_at(s).momentum()
    }

    /// Lets the particle emit a photon from its initial state.
    ///
    /// With a non-zero virtuality the initial angles receive the recoil and
    /// the whole trajectory is replaced by the updated initial state at the
    /// initial position. A zero virtuality only lowers the initial energy and
    /// leaves the rest of the trajectory alone; `Ok(None)` is returned then.
    ///
    /// A photon energy outside `(0, E - m]` fails with `invalid-photon-energy`
    /// and leaves the trajectory untouched.
    pub fn emit_gamma(
        &mut self,
        emission: &PhotonEmission,
        config: &BeamConfig,
        rng: &mut RngHandle,
    ) -> Result<Option<EmissionOutcome>, HectorError> {
        let initial = match self.positions.first() {
            Some(initial) => *initial,
            None => return Err(empty_trajectory("cannot emit a photon from an empty trajectory")),
        };

        emission.check_energy(initial.state.energy(), config.particle_mass)?;

        if emission.virtuality == 0.0 {
            info!(e_gamma = emission.energy, "virtuality is null: only energy has changed");
            let state = &mut self.positions[0].state;
            state.set_energy(state.energy() - emission.energy);
            return Ok(None);
        }
        emission.check_azimuth()?;

        let recoil = photon_recoil(
            initial.state.energy(),
            config.particle_mass,
            emission.energy,
            emission.virtuality,
            config.beam_energy,
        );
        let phi = Uniform::new_inclusive(emission.phi_min, emission.phi_max).sample(rng);

        let mut state = initial.state;
        state.set_energy(recoil.energy_after);
        state.set_angles(
            state.angles() + PlaneVector::new(recoil.theta * phi.cos(), -recoil.theta * phi.sin()),
        );
        debug!(
            q2 = recoil.q2,
            theta = recoil.theta,
            phi,
            s = initial.s,
            dropped = self.positions.len(),
            "photon emitted, trajectory reset"
        );

        self.positions.clear();
        self.positions.push(Position {
            s: initial.s,
            state,
        });
        Ok(Some(EmissionOutcome { recoil, phi }))
    }

    fn locate(&self, s: f64) -> Result<usize, usize> {
        self.positions.binary_search_by(|pos| pos.s.total_cmp(&s))
    }
}

impl Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Particle of charge {}", self.charge)?;
        if let Some(first) = self.first_state() {
            writeln!(f, " initial position: {first}")?;
        }
        if self.positions.len() <= 1 {
            return Ok(());
        }
        writeln!(f, " list of associated state vectors:")?;
        for pos in &self.positions {
            writeln!(f, "   s = {:8.3} m: {}", pos.s, pos.state)?;
        }
        Ok(())
    }
}

// -0.0 and 0.0 share one key
fn normalize_key(s: f64) -> f64 {
    s + 0.0
}

fn empty_trajectory(message: &str) -> HectorError {
    HectorError::Trajectory(ErrorInfo::warning("empty-trajectory", message))
}

fn interpolation_impossible(s: f64, reason: &str) -> HectorError {
    HectorError::Trajectory(
        ErrorInfo::new("interpolation-impossible", "impossible to interpolate the position")
            .with_severity(Severity::Warning)
            .with_context("s", s)
            .with_context("reason", reason),
    )
}
