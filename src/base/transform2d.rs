// Copyright (c) 2023 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use core::ops;
use serde::{Deserialize, Serialize};

use super::vector2::Vector2;
use crate::error::{Error, ErrorKind};

/// The Transform2D struct specifies 2D affine transformations of a
/// coordinate system.
///
/// A transformation specifies how to translate, scale, shear or rotate the
/// coordinate system, and is typically used when rendering graphics.
///
/// The transform is stored as three columns: the basis vectors `x` and `y`
/// and the `origin`, forming the 2x3 matrix
///
/// ```text
/// | x.x  y.x  origin.x |
/// | x.y  y.y  origin.y |
/// ```
///
/// Mapping a point computes `x * p.x + y * p.y + origin`.
///
/// Transform2D supports matrix multiplication for composition, and the
/// `inverse()` function which reports singular matrices to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    x: Vector2,
    y: Vector2,
    origin: Vector2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        x: Vector2::from(1.0, 0.0),
        y: Vector2::from(0.0, 1.0),
        origin: Vector2::ZERO,
    };

    /// Constructs an identity transform.
    #[must_use]
    pub const fn new() -> Self {
        Self::IDENTITY
    }

    /// Constructs a transform from a `rotation` in radians and an `origin`.
    #[must_use]
    pub fn from_rotation_origin(rotation: f64, origin: Vector2) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self {
            x: Vector2::from(cos, sin),
            y: Vector2::from(-sin, cos),
            origin,
        }
    }

    /// Constructs a transform from the two basis vectors and the origin.
    #[must_use]
    pub const fn from_basis(x: Vector2, y: Vector2, origin: Vector2) -> Self {
        Self { x, y, origin }
    }

    /// Returns the x basis vector (first column).
    #[must_use]
    pub const fn x_basis(&self) -> Vector2 {
        self.x
    }

    /// Returns the y basis vector (second column).
    #[must_use]
    pub const fn y_basis(&self) -> Vector2 {
        self.y
    }

    /// Returns the origin (third column).
    #[must_use]
    pub const fn origin(&self) -> Vector2 {
        self.origin
    }

    /// Sets the origin of this transform.
    pub fn set_origin(&mut self, origin: Vector2) {
        self.origin = origin;
    }

    /// Returns the determinant of the 2x2 basis block.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.x.x() * self.y.y() - self.x.y() * self.y.x()
    }

    /// Maps the vector `v` by this transform.
    #[must_use]
    pub fn xform(&self, v: Vector2) -> Vector2 {
        self.x * v.x() + self.y * v.y() + self.origin
    }

    /// Maps the vector `v` by the basis block only, ignoring the origin.
    #[must_use]
    pub fn basis_xform(&self, v: Vector2) -> Vector2 {
        self.x * v.x() + self.y * v.y()
    }

    /// Maps every point in `points` by this transform.
    #[must_use]
    pub fn xform_points(&self, points: &[Vector2]) -> Vec<Vector2> {
        points.iter().map(|p| self.xform(*p)).collect()
    }

    /// Returns the inverse of this transform.
    ///
    /// A transform whose basis determinant is zero has no inverse and is
    /// reported as a `SingularMatrix` error.
    pub fn inverse(&self) -> Result<Self, Error> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(Error::from_string(
                ErrorKind::SingularMatrix,
                "Transform2D with zero determinant has no inverse".to_owned(),
            ));
        }
        let inv_det = 1.0 / det;
        let x = Vector2::from(self.y.y() * inv_det, -self.x.y() * inv_det);
        let y = Vector2::from(-self.y.x() * inv_det, self.x.x() * inv_det);
        let origin = -(x * self.origin.x() + y * self.origin.y());
        Ok(Self { x, y, origin })
    }

    /// Returns this transform translated by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector2) -> Self {
        Self {
            x: self.x,
            y: self.y,
            origin: self.origin + offset,
        }
    }

    /// Returns this transform scaled by `scale`.
    #[must_use]
    pub fn scaled(&self, scale: Vector2) -> Self {
        Self {
            x: Vector2::from(self.x.x() * scale.x(), self.x.y() * scale.y()),
            y: Vector2::from(self.y.x() * scale.x(), self.y.y() * scale.y()),
            origin: self.origin * scale,
        }
    }

    /// Returns this transform rotated by `angle` radians.
    #[must_use]
    pub fn rotated(&self, angle: f64) -> Self {
        Self::from_rotation_origin(angle, Vector2::ZERO) * *self
    }

    /// Returns the rotation of the x basis vector in radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.x.y().atan2(self.x.x())
    }

    /// Returns the lengths of the two basis vectors.
    #[must_use]
    pub fn scale(&self) -> Vector2 {
        Vector2::from(self.x.length(), self.y.length())
    }

    /// Returns true if this transform and `other` are approximately equal,
    /// by calling `is_equal_approx()` on each column.
    #[must_use]
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.x.is_equal_approx(other.x)
            && self.y.is_equal_approx(other.y)
            && self.origin.is_equal_approx(other.origin)
    }
}

impl ops::Mul for Transform2D {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            x: self.basis_xform(other.x),
            y: self.basis_xform(other.y),
            origin: self.xform(other.origin),
        }
    }
}

impl ops::Mul<Vector2> for Transform2D {
    type Output = Vector2;

    fn mul(self, v: Vector2) -> Vector2 {
        self.xform(v)
    }
}
