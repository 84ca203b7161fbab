//! 3D vector value type
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use nalgebra::Vector3;

use crate::error::{FrameError, FrameResult};

/// An immutable 3D vector. Every operation returns a new value; the
/// components are read through [`x`](Self::x), [`y`](Self::y) and
/// [`z`](Self::z).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3f {
    x: f32,
    y: f32,
    z: f32,
}

impl Vector3f {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// World right axis
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    /// World up axis
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// World back axis; frames look down its negative
    pub const BACK: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_ints(x: i32, y: i32, z: i32) -> Self {
        Self::new(x as f32, y as f32, z as f32)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Sum of the components, each scaled by `s`
    pub fn dot_scalar(&self, s: f32) -> f32 {
        self.x * s + self.y * s + self.z * s
    }

    /// Right-handed cross product
    pub fn cross(&self, other: Self) -> Self {
        Self::new(
            self.y * other.z - other.y * self.z,
            self.z * other.x - other.z * self.x,
            self.x * other.y - other.x * self.y,
        )
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Euclidean length, computed with `hypot` so very large or very small
    /// components neither overflow nor flush to zero.
    pub fn magnitude(&self) -> f32 {
        if self.x == 0.0 && self.y == 0.0 && self.z == 0.0 {
            return 0.0;
        }
        self.x.hypot(self.y).hypot(self.z)
    }

    /// Unit vector in the same direction, or the zero vector when the
    /// magnitude is exactly zero. Use [`try_unit`](Self::try_unit) to detect
    /// that case.
    pub fn unit(&self) -> Self {
        self.try_unit().unwrap_or_else(|_| {
            tracing::trace!("unit() of zero-length Vector3f");
            Self::ZERO
        })
    }

    pub fn try_unit(&self) -> FrameResult<Self> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(FrameError::ZeroLength);
        }
        Ok(Self::new(self.x / mag, self.y / mag, self.z / mag))
    }

    /// `self * (1 - t) + other * t`
    pub fn lerp(&self, other: Self, t: f32) -> Self {
        *self * (1.0 - t) + other * t
    }

    /// Component-wise comparison within `epsilon`
    pub fn fuzzy_eq(&self, other: Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
    }

    /// Rotate `self` around `axis` by `theta` radians (Rodrigues).
    ///
    /// The axis is normalised first. A zero-length axis has no direction to
    /// turn about, so `self` comes back unchanged.
    pub fn rotate_about(&self, axis: Self, theta: f32) -> Self {
        let Ok(n) = axis.try_unit() else {
            tracing::trace!(vector = %self, "rotate_about a zero-length axis");
            return *self;
        };
        let (sin, cos) = theta.sin_cos();
        let along = n * n.dot(*self) * (1.0 - cos);
        let across = n.cross(*self) * sin;
        *self * cos + along + across
    }
}

impl Add for Vector3f {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Add<f32> for Vector3f {
    type Output = Self;

    fn add(self, rhs: f32) -> Self {
        Self::new(self.x + rhs, self.y + rhs, self.z + rhs)
    }
}

impl Sub for Vector3f {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<f32> for Vector3f {
    type Output = Self;

    fn sub(self, rhs: f32) -> Self {
        Self::new(self.x - rhs, self.y - rhs, self.z - rhs)
    }
}

impl Mul<f32> for Vector3f {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3f> for f32 {
    type Output = Vector3f;

    fn mul(self, rhs: Vector3f) -> Vector3f {
        rhs * self
    }
}

/// Dividing by exactly zero yields the zero vector.
impl Div<f32> for Vector3f {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        if rhs == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Component-wise; a zero divisor component gives a zero result component.
impl Div for Vector3f {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let guarded = |a: f32, b: f32| if b == 0.0 { 0.0 } else { a / b };
        Self::new(
            guarded(self.x, rhs.x),
            guarded(self.y, rhs.y),
            guarded(self.z, rhs.z),
        )
    }
}

impl Neg for Vector3f {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<Vector3f> for Vector3<f32> {
    fn from(v: Vector3f) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3<f32>> for Vector3f {
    fn from(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for Vector3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3f({}, {}, {})", self.x, self.y, self.z)
    }
}
