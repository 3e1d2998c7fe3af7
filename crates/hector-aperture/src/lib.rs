#![deny(missing_docs)]

//! Aperture shapes attached to beamline elements.
//!
//! Every shape implements [`Aperture`]: a strict containment test in the
//! transverse plane, half extents, and cloning into an independent box.
//! Shapes compare equal when their kind, barycentre and parameters match.

mod acceptance;
mod circular;
mod descriptor;
mod elliptic;
mod kind;
mod rect_elliptic;
mod rectangular;
mod shape;

pub use acceptance::accepts;
pub use circular::Circular;
pub use descriptor::ApertureDescriptor;
pub use elliptic::Elliptic;
pub use kind::ApertureKind;
pub use rect_elliptic::RectElliptic;
pub use rectangular::Rectangular;
pub use shape::{Aperture, ApertureBase, MAX_PARAMETERS, UNUSED_PARAMETER};
