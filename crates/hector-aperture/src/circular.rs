//! Circular aperture.

use hector_core::PlaneVector;

use crate::kind::ApertureKind;
use crate::shape::{inside_ellipse, Aperture, ApertureBase};

/// Circular opening, an ellipse with equal semi-axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Circular {
    base: ApertureBase,
}

impl Circular {
    /// Builds a circle from its radius (m).
    pub fn new(radius: f64, position: PlaneVector) -> Self {
        Self {
            base: ApertureBase::new(ApertureKind::Circular, position, &[radius, radius]),
        }
    }

    /// Radius (m).
    pub fn radius(&self) -> f64 {
        self.base.parameter(0)
    }
}

impl Aperture for Circular {
    fn base(&self) -> &ApertureBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApertureBase {
        &mut self.base
    }

    fn contains(&self, point: PlaneVector) -> bool {
        inside_ellipse(self.base.local(point), self.radius(), self.radius())
    }

    fn limits(&self) -> PlaneVector {
        PlaneVector::new(self.radius(), self.radius())
    }

    fn clone_box(&self) -> Box<dyn Aperture> {
        Box::new(self.clone())
    }
}
