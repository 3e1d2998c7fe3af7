//! Intersection of a rectangular and an elliptic aperture.

use hector_core::PlaneVector;

use crate::kind::ApertureKind;
use crate::shape::{inside_ellipse, inside_rectangle, Aperture, ApertureBase};

/// Intersection of a rectangle and an ellipse sharing one barycentre.
///
/// Parameters are ordered `(rect half-width, rect half-height, ellipse
/// semi-x, ellipse semi-y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RectElliptic {
    base: ApertureBase,
}

impl RectElliptic {
    /// Builds the intersection of a rectangle and an ellipse (all in m).
    pub fn new(
        rect_half_width: f64,
        rect_half_height: f64,
        semi_x: f64,
        semi_y: f64,
        position: PlaneVector,
    ) -> Self {
        Self {
            base: ApertureBase::new(
                ApertureKind::RectElliptic,
                position,
                &[rect_half_width, rect_half_height, semi_x, semi_y],
            ),
        }
    }
}

impl Aperture for RectElliptic {
    fn base(&self) -> &ApertureBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApertureBase {
        &mut self.base
    }

    fn contains(&self, point: PlaneVector) -> bool {
        let local = self.base.local(point);
        let [w, h, a, b] = [0, 1, 2, 3].map(|idx| self.base.parameter(idx));
        inside_rectangle(local, w, h) && inside_ellipse(local, a, b)
    }

    /// Per-axis minimum of the two shapes.
    ///
    /// This bounds the intersection from above along each axis but is not
    /// the extent through the rectangle/ellipse crossing points.
    fn limits(&self) -> PlaneVector {
        PlaneVector::new(
            self.base.parameter(0).min(self.base.parameter(2)),
            self.base.parameter(1).min(self.base.parameter(3)),
        )
    }

    fn clone_box(&self) -> Box<dyn Aperture> {
        Box::new(self.clone())
    }
}
