//! Serializable aperture descriptions for element tables.

use hector_core::errors::{ErrorInfo, HectorError};
use hector_core::PlaneVector;
use serde::{Deserialize, Serialize};

use crate::circular::Circular;
use crate::elliptic::Elliptic;
use crate::kind::ApertureKind;
use crate::rect_elliptic::RectElliptic;
use crate::rectangular::Rectangular;
use crate::shape::Aperture;

/// Serializable description of an aperture, as found in element tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ApertureDescriptor {
    /// See [`crate::Rectangular`].
    Rectangular {
        /// Half-width (m).
        half_width: f64,
        /// Half-height (m).
        half_height: f64,
        /// Barycentre (m).
        #[serde(default)]
        position: PlaneVector,
    },
    /// See [`crate::Elliptic`].
    Elliptic {
        /// Horizontal semi-axis (m).
        semi_x: f64,
        /// Vertical semi-axis (m).
        semi_y: f64,
        /// Barycentre (m).
        #[serde(default)]
        position: PlaneVector,
    },
    /// See [`crate::Circular`].
    Circular {
        /// Radius (m).
        radius: f64,
        /// Barycentre (m).
        #[serde(default)]
        position: PlaneVector,
    },
    /// See [`crate::RectElliptic`].
    RectElliptic {
        /// Rectangle half-width (m).
        rect_half_width: f64,
        /// Rectangle half-height (m).
        rect_half_height: f64,
        /// Ellipse horizontal semi-axis (m).
        semi_x: f64,
        /// Ellipse vertical semi-axis (m).
        semi_y: f64,
        /// Barycentre (m).
        #[serde(default)]
        position: PlaneVector,
    },
}

impl ApertureDescriptor {
    /// Instantiates the described aperture.
    pub fn build(&self) -> Box<dyn Aperture> {
        match *self {
            ApertureDescriptor::Rectangular {
                half_width,
                half_height,
                position,
            } => Box::new(Rectangular::new(half_width, half_height, position)),
            ApertureDescriptor::Elliptic {
                semi_x,
                semi_y,
                position,
            } => Box::new(Elliptic::new(semi_x, semi_y, position)),
            ApertureDescriptor::Circular { radius, position } => {
                Box::new(Circular::new(radius, position))
            }
            ApertureDescriptor::RectElliptic {
                rect_half_width,
                rect_half_height,
                semi_x,
                semi_y,
                position,
            } => Box::new(RectElliptic::new(
                rect_half_width,
                rect_half_height,
                semi_x,
                semi_y,
                position,
            )),
        }
    }

    /// Describes an existing aperture.
    pub fn describe(aperture: &dyn Aperture) -> Self {
        let position = aperture.position();
        let p = |idx| aperture.parameter(idx);
        match aperture.kind() {
            ApertureKind::Rectangular => ApertureDescriptor::Rectangular {
                half_width: p(0),
                half_height: p(1),
                position,
            },
            ApertureKind::Elliptic => ApertureDescriptor::Elliptic {
                semi_x: p(0),
                semi_y: p(1),
                position,
            },
            ApertureKind::Circular => ApertureDescriptor::Circular {
                radius: p(0),
                position,
            },
            ApertureKind::RectElliptic => ApertureDescriptor::RectElliptic {
                rect_half_width: p(0),
                rect_half_height: p(1),
                semi_x: p(2),
                semi_y: p(3),
                position,
            },
        }
    }

    /// Parses a YAML list of descriptors.
    pub fn list_from_yaml_str(contents: &str) -> Result<Vec<Self>, HectorError> {
        serde_yaml::from_str(contents).map_err(|err| {
            HectorError::Serde(ErrorInfo::new("yaml-deserialize", err.to_string()))
        })
    }

    /// Serializes a list of descriptors to YAML.
    pub fn list_to_yaml_string(descriptors: &[Self]) -> Result<String, HectorError> {
        serde_yaml::to_string(descriptors)
            .map_err(|err| HectorError::Serde(ErrorInfo::new("yaml-serialize", err.to_string())))
    }
}
