// Copyright (c) 2023 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use core::ops;
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// The Vector2 struct represents a vector or point in 2D space using
/// floating point precision.
///
/// A vector is specified by an x coordinate and an y coordinate which can be
/// accessed using the `x()` and `y()` functions.
///
/// Vector2 objects support addition, subtraction, negation and scalar or
/// componentwise multiplication through the usual operators. Division is only
/// available through the checked `divided()` and `divided_comp()` functions,
/// as dividing by zero is reported to the caller.
///
/// Equality through `==` compares coordinates exactly; use `is_equal_approx()`
/// for a tolerant comparison.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    x: f64,
    y: f64,
}

/// Tolerance used by `is_equal_approx()`.
const APPROX_EPSILON: f64 = 1e-5;

impl Vector2 {
    /// The null vector, i.e. with coordinates (0, 0).
    pub const ZERO: Self = Self::from(0.0, 0.0);

    /// The vector with both coordinates set to one.
    pub const ONE: Self = Self::from(1.0, 1.0);

    /// Constructs a null vector.
    #[must_use]
    pub const fn new() -> Self {
        Self::from(0.0, 0.0)
    }

    /// Constructs a vector with the given coordinates (`x`, `y`).
    #[must_use]
    pub const fn from(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate of this vector.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate of this vector.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Sets the x coordinate of this vector to the given `x` coordinate.
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Sets the y coordinate of this vector to the given `y` coordinate.
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Update x and y coordinates.
    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Returns the length of the vector from the origin.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns the squared length of the vector from the origin.
    ///
    /// This is equivalent to the dot product of the vector with itself.
    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Returns the dot product of self and `other`.
    #[must_use]
    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Returns the 2D analog of the cross product of self and `other`,
    /// i.e. the z component of the 3D cross product with z set to zero.
    #[must_use]
    pub fn cross(&self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Returns the normalized unit vector form of this vector.
    ///
    /// If this vector is null, a null vector is returned instead of
    /// an error.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let hypot = self.length_squared();
        if hypot == 0.0 {
            return Self::ZERO;
        }
        let inv = 1.0 / hypot.sqrt();
        Self::from(self.x * inv, self.y * inv)
    }

    /// Returns this vector rotated by `angle` radians.
    #[must_use]
    pub fn rotated(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
        )
    }

    /// Returns the linear interpolation between self and `other` by
    /// the amount `t`.
    ///
    /// The function returns self if t = 0, and `other` if t = 1.
    #[must_use]
    pub fn lerp(&self, other: Self, t: f64) -> Self {
        Self::from(
            (other.x - self.x).mul_add(t, self.x),
            (other.y - self.y).mul_add(t, self.y),
        )
    }

    /// Returns a vector perpendicular to this one, with the same length.
    #[must_use]
    pub const fn orthogonal(&self) -> Self {
        Self::from(self.y, -self.x)
    }

    /// Returns the normalized vector pointing from this vector to `other`.
    #[must_use]
    pub fn direction_to(&self, other: Self) -> Self {
        (other - *self).normalized()
    }

    /// Returns the distance between this vector and `other`.
    #[must_use]
    pub fn distance_to(&self, other: Self) -> f64 {
        (other - *self).length()
    }

    /// Returns the squared distance between this vector and `other`.
    #[must_use]
    pub fn distance_squared_to(&self, other: Self) -> f64 {
        (other - *self).length_squared()
    }

    /// Returns the angle of the vector in radians, measured from the
    /// positive x-axis.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Returns the signed angle to `other` in radians.
    #[must_use]
    pub fn angle_to(&self, other: Self) -> f64 {
        self.cross(other).atan2(self.dot(other))
    }

    /// Returns a vector with the absolute values of the coordinates.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::from(self.x.abs(), self.y.abs())
    }

    /// Returns true if this vector and `other` are approximately equal,
    /// within a fixed tolerance of 1e-5 per coordinate.
    #[must_use]
    pub fn is_equal_approx(&self, other: Self) -> bool {
        (self.x - other.x).abs() < APPROX_EPSILON && (self.y - other.y).abs() < APPROX_EPSILON
    }

    /// Returns this vector divided by the scalar `factor`.
    ///
    /// A zero `factor` is an `InvalidArgument` error.
    pub fn divided(&self, factor: f64) -> Result<Self, Error> {
        if factor == 0.0 {
            return Err(Error::from_string(
                ErrorKind::InvalidArgument,
                "Vector2 division by zero".to_owned(),
            ));
        }
        Ok(Self::from(self.x / factor, self.y / factor))
    }

    /// Returns this vector divided componentwise by `other`.
    ///
    /// A zero component in `other` is an `InvalidArgument` error.
    pub fn divided_comp(&self, other: Self) -> Result<Self, Error> {
        if other.x == 0.0 || other.y == 0.0 {
            return Err(Error::from_string(
                ErrorKind::InvalidArgument,
                "Vector2 division by zero".to_owned(),
            ));
        }
        Ok(Self::from(self.x / other.x, self.y / other.y))
    }
}

impl ops::Add for Vector2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl ops::AddAssign for Vector2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl ops::Sub for Vector2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl ops::SubAssign for Vector2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl ops::Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl ops::Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl ops::MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, factor: f64) {
        self.x *= factor;
        self.y *= factor;
    }
}

impl ops::Mul for Vector2 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }
}

impl ops::MulAssign for Vector2 {
    fn mul_assign(&mut self, other: Self) {
        self.x *= other.x;
        self.y *= other.y;
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use super::Vector2;
    use crate::error::ErrorKind;

    #[test]
    fn test_length() {
        let v = Vector2::from(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.length_squared(), 25.0);
    }

    #[test]
    fn test_normalized() {
        let v = Vector2::from(10.0, 0.0).normalized();
        assert_eq!(v, Vector2::from(1.0, 0.0));
        assert_eq!(Vector2::ZERO.normalized(), Vector2::ZERO);
    }

    #[test]
    fn test_rotated() {
        let v = Vector2::from(1.0, 0.0).rotated(FRAC_PI_2);
        assert!(v.is_equal_approx(Vector2::from(0.0, 1.0)));
    }

    #[test]
    fn test_orthogonal() {
        let v = Vector2::from(1.0, 2.0);
        assert_eq!(v.orthogonal(), Vector2::from(2.0, -1.0));
        assert_eq!(v.dot(v.orthogonal()), 0.0);
    }

    #[test]
    fn test_lerp() {
        let a = Vector2::from(0.0, 0.0);
        let b = Vector2::from(4.0, 8.0);
        assert_eq!(a.lerp(b, 0.5), Vector2::from(2.0, 4.0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_divided() {
        let v = Vector2::from(4.0, 8.0);
        assert_eq!(v.divided(2.0).unwrap(), Vector2::from(2.0, 4.0));
        let err = v.divided(0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = v.divided_comp(Vector2::from(1.0, 0.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_direction_and_distance() {
        let a = Vector2::from(1.0, 1.0);
        let b = Vector2::from(4.0, 5.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(a.distance_squared_to(b), 25.0);
        assert!(a
            .direction_to(b)
            .is_equal_approx(Vector2::from(0.6, 0.8)));
    }

    #[test]
    fn test_serde() {
        let v = Vector2::from(1.5, -2.5);
        let s = serde_json::to_string(&v).unwrap();
        let v2: Vector2 = serde_json::from_str(&s).unwrap();
        assert_eq!(v, v2);
    }
}
