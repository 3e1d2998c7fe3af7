//! Small value types for transverse coordinates and four-momenta.

use std::fmt::{self, Display};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Two-dimensional coordinate in the transverse plane.
///
/// Used both for positions (in m) and for angle pairs (in rad).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaneVector {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl PlaneVector {
    /// Origin of the transverse plane.
    pub const ZERO: PlaneVector = PlaneVector { x: 0.0, y: 0.0 };

    /// Builds a vector from its two components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Squared Euclidean norm.
    pub fn norm2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Applies `f` to both components.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.x), f(self.y))
    }
}

impl Add for PlaneVector {
    type Output = PlaneVector;

    fn add(self, rhs: Self) -> Self::Output {
        PlaneVector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for PlaneVector {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for PlaneVector {
    type Output = PlaneVector;

    fn sub(self, rhs: Self) -> Self::Output {
        PlaneVector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for PlaneVector {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for PlaneVector {
    type Output = PlaneVector;

    fn mul(self, rhs: f64) -> Self::Output {
        PlaneVector::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<PlaneVector> for f64 {
    type Output = PlaneVector;

    fn mul(self, rhs: PlaneVector) -> Self::Output {
        rhs * self
    }
}

impl Neg for PlaneVector {
    type Output = PlaneVector;

    fn neg(self) -> Self::Output {
        PlaneVector::new(-self.x, -self.y)
    }
}

impl Display for PlaneVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6e}, {:.6e})", self.x, self.y)
    }
}

/// Four-momentum `(px, py, pz, E)` in GeV.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourMomentum {
    /// Horizontal momentum component.
    pub px: f64,
    /// Vertical momentum component.
    pub py: f64,
    /// Longitudinal momentum component.
    pub pz: f64,
    /// Total energy.
    pub e: f64,
}

impl FourMomentum {
    /// Builds a four-momentum from its components.
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Squared norm of the 3-momentum.
    pub fn p2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    /// Norm of the 3-momentum.
    pub fn p(&self) -> f64 {
        self.p2().sqrt()
    }

    /// Norm of the transverse momentum.
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Squared invariant mass `E² - |p|²`.
    pub fn m2(&self) -> f64 {
        self.e * self.e - self.p2()
    }

    /// Invariant mass; negative for space-like vectors.
    pub fn mass(&self) -> f64 {
        let m2 = self.m2();
        if m2 < 0.0 {
            -(-m2).sqrt()
        } else {
            m2.sqrt()
        }
    }
}

impl Add for FourMomentum {
    type Output = FourMomentum;

    fn add(self, rhs: Self) -> Self::Output {
        FourMomentum::new(
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
            self.e + rhs.e,
        )
    }
}

impl Sub for FourMomentum {
    type Output = FourMomentum;

    fn sub(self, rhs: Self) -> Self::Output {
        FourMomentum::new(
            self.px - rhs.px,
            self.py - rhs.py,
            self.pz - rhs.pz,
            self.e - rhs.e,
        )
    }
}
