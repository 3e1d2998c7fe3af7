//! Axis-aligned rectangular aperture.

use hector_core::PlaneVector;

use crate::kind::ApertureKind;
use crate::shape::{inside_rectangle, Aperture, ApertureBase};

/// Axis-aligned rectangular opening.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangular {
    base: ApertureBase,
}

impl Rectangular {
    /// Builds a rectangle from its half-width and half-height (m).
    pub fn new(half_width: f64, half_height: f64, position: PlaneVector) -> Self {
        Self {
            base: ApertureBase::new(
                ApertureKind::Rectangular,
                position,
                &[half_width, half_height],
            ),
        }
    }

    /// Half-width (m).
    pub fn half_width(&self) -> f64 {
        self.base.parameter(0)
    }

    /// Half-height (m).
    pub fn half_height(&self) -> f64 {
        self.base.parameter(1)
    }
}

impl Aperture for Rectangular {
    fn base(&self) -> &ApertureBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApertureBase {
        &mut self.base
    }

    fn contains(&self, point: PlaneVector) -> bool {
        inside_rectangle(self.base.local(point), self.half_width(), self.half_height())
    }

    fn limits(&self) -> PlaneVector {
        PlaneVector::new(self.half_width(), self.half_height())
    }

    fn clone_box(&self) -> Box<dyn Aperture> {
        Box::new(self.clone())
    }
}
