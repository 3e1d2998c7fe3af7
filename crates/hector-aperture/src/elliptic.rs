//! Axis-aligned elliptic aperture.

use hector_core::PlaneVector;

use crate::kind::ApertureKind;
use crate::shape::{inside_ellipse, Aperture, ApertureBase};

/// Axis-aligned elliptic opening.
#[derive(Debug, Clone, PartialEq)]
pub struct Elliptic {
    base: ApertureBase,
}

impl Elliptic {
    /// Builds an ellipse from its horizontal and vertical semi-axes (m).
    pub fn new(semi_x: f64, semi_y: f64, position: PlaneVector) -> Self {
        Self {
            base: ApertureBase::new(ApertureKind::Elliptic, position, &[semi_x, semi_y]),
        }
    }

    /// Horizontal semi-axis (m).
    pub fn semi_x(&self) -> f64 {
        self.base.parameter(0)
    }

    /// Vertical semi-axis (m).
    pub fn semi_y(&self) -> f64 {
        self.base.parameter(1)
    }
}

impl Aperture for Elliptic {
    fn base(&self) -> &ApertureBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApertureBase {
        &mut self.base
    }

    fn contains(&self, point: PlaneVector) -> bool {
        inside_ellipse(self.base.local(point), self.semi_x(), self.semi_y())
    }

    fn limits(&self) -> PlaneVector {
        PlaneVector::new(self.semi_x(), self.semi_y())
    }

    fn clone_box(&self) -> Box<dyn Aperture> {
        Box::new(self.clone())
    }
}
