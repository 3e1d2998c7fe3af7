//! Shared aperture state and the [`Aperture`] trait.

use std::fmt::{self, Debug, Display};

use hector_core::PlaneVector;
use serde::{Deserialize, Serialize};

use crate::kind::ApertureKind;

/// Largest number of shape parameters an aperture can carry.
pub const MAX_PARAMETERS: usize = 4;

/// Value returned by [`Aperture::parameter`] for an unused slot.
pub const UNUSED_PARAMETER: f64 = -1.0;

/// Type tag, barycentre and shape parameters shared by every aperture.
///
/// Parameter count and signs are not validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApertureBase {
    kind: ApertureKind,
    position: PlaneVector,
    parameters: [f64; MAX_PARAMETERS],
}

impl ApertureBase {
    /// Builds the shared state; slots beyond `kind.num_parameters()` stay at zero.
    pub(crate) fn new(kind: ApertureKind, position: PlaneVector, parameters: &[f64]) -> Self {
        let mut slots = [0.0; MAX_PARAMETERS];
        for (slot, value) in slots.iter_mut().zip(parameters) {
            *slot = *value;
        }
        Self {
            kind,
            position,
            parameters: slots,
        }
    }

    /// Shape family.
    pub fn kind(&self) -> ApertureKind {
        self.kind
    }

    /// Transverse position of the barycentre (m).
    pub fn position(&self) -> PlaneVector {
        self.position
    }

    /// Shape parameters in their canonical order.
    pub fn parameters(&self) -> &[f64] {
        &self.parameters[..self.kind.num_parameters()]
    }

    /// Shape parameter `index`, or [`UNUSED_PARAMETER`] past the last one.
    pub fn parameter(&self, index: usize) -> f64 {
        self.parameters()
            .get(index)
            .copied()
            .unwrap_or(UNUSED_PARAMETER)
    }

    /// `point` expressed relative to the barycentre.
    pub fn local(&self, point: PlaneVector) -> PlaneVector {
        point - self.position
    }
}

impl Display for ApertureBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (param. ({:.3}, {:.3}, {:.3}, {:.3}), center at {})",
            self.kind,
            self.parameter(0),
            self.parameter(1),
            self.parameter(2),
            self.parameter(3),
            self.position
        )
    }
}

/// Cross-sectional opening of a beamline element.
///
/// Containment uses strict inequalities: boundary points are outside.
pub trait Aperture: Debug + Send + Sync {
    /// Shared type tag, position and parameters.
    fn base(&self) -> &ApertureBase;

    /// Mutable access to the shared state.
    fn base_mut(&mut self) -> &mut ApertureBase;

    /// Whether `point` (m) lies strictly inside the opening.
    fn contains(&self, point: PlaneVector) -> bool;

    /// Half extents of the opening along x and y (m).
    fn limits(&self) -> PlaneVector;

    /// Independent copy of this aperture.
    fn clone_box(&self) -> Box<dyn Aperture>;

    /// Shape family.
    fn kind(&self) -> ApertureKind {
        self.base().kind()
    }

    /// Transverse position of the barycentre (m).
    fn position(&self) -> PlaneVector {
        self.base().position()
    }

    /// Moves the barycentre to `position`.
    fn set_position(&mut self, position: PlaneVector) {
        self.base_mut().position = position;
    }

    /// Shifts the barycentre by `offset`.
    fn offset(&mut self, offset: PlaneVector) {
        self.base_mut().position += offset;
    }

    /// Shape parameters in their canonical order.
    fn parameters(&self) -> &[f64] {
        self.base().parameters()
    }

    /// Shape parameter `index`, or [`UNUSED_PARAMETER`] past the last one.
    fn parameter(&self, index: usize) -> f64 {
        self.base().parameter(index)
    }
}

impl Clone for Box<dyn Aperture> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for dyn Aperture + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.base() == other.base()
    }
}

impl Display for dyn Aperture + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self.base(), f)
    }
}

pub(crate) fn inside_rectangle(local: PlaneVector, half_width: f64, half_height: f64) -> bool {
    local.x.abs() < half_width && local.y.abs() < half_height
}

pub(crate) fn inside_ellipse(local: PlaneVector, semi_x: f64, semi_y: f64) -> bool {
    let scaled = PlaneVector::new(local.x / semi_x, local.y / semi_y);
    scaled.norm2() < 1.0
}
