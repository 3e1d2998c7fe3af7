//! Aperture shape families.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Shape family of an aperture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApertureKind {
    /// Axis-aligned rectangle given by its half-width and half-height.
    Rectangular,
    /// Axis-aligned ellipse given by its two semi-axes.
    Elliptic,
    /// Circle given by its radius.
    Circular,
    /// Intersection of a rectangle and an ellipse sharing one barycentre.
    RectElliptic,
}

impl ApertureKind {
    /// Number of shape parameters carried by this kind.
    pub const fn num_parameters(&self) -> usize {
        match self {
            ApertureKind::Rectangular | ApertureKind::Elliptic | ApertureKind::Circular => 2,
            ApertureKind::RectElliptic => 4,
        }
    }
}

impl Display for ApertureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApertureKind::Rectangular => "rectangular",
            ApertureKind::Elliptic => "elliptic",
            ApertureKind::Circular => "circular",
            ApertureKind::RectElliptic => "rect-elliptic",
        };
        f.write_str(name)
    }
}
