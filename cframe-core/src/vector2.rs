//! 2D vector value type
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use nalgebra::Vector2;

use crate::error::{FrameError, FrameResult};

/// An immutable 2D vector. Every operation returns a new value; the
/// components are read through [`x`](Self::x) and [`y`](Self::y).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2f {
    x: f32,
    y: f32,
}

impl Vector2f {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_ints(x: i32, y: i32) -> Self {
        Self::new(x as f32, y as f32)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Sum of the components, each scaled by `s`
    pub fn dot_scalar(&self, s: f32) -> f32 {
        self.x * s + self.y * s
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Euclidean length via `hypot`, safe for very large or small components
    pub fn magnitude(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or the zero vector when the
    /// magnitude is exactly zero.
    pub fn unit(&self) -> Self {
        self.try_unit().unwrap_or_else(|_| {
            tracing::trace!("unit() of zero-length Vector2f");
            Self::ZERO
        })
    }

    pub fn try_unit(&self) -> FrameResult<Self> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(FrameError::ZeroLength);
        }
        Ok(Self::new(self.x / mag, self.y / mag))
    }

    pub fn lerp(&self, other: Self, t: f32) -> Self {
        *self * (1.0 - t) + other * t
    }
}

impl Add for Vector2f {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<f32> for Vector2f {
    type Output = Self;

    fn add(self, rhs: f32) -> Self {
        Self::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub for Vector2f {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<f32> for Vector2f {
    type Output = Self;

    fn sub(self, rhs: f32) -> Self {
        Self::new(self.x - rhs, self.y - rhs)
    }
}

impl Mul<f32> for Vector2f {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2f> for f32 {
    type Output = Vector2f;

    fn mul(self, rhs: Vector2f) -> Vector2f {
        rhs * self
    }
}

/// Dividing by exactly zero yields the zero vector.
impl Div<f32> for Vector2f {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        if rhs == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// Component-wise; a zero divisor component gives a zero result component.
impl Div for Vector2f {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let guarded = |a: f32, b: f32| if b == 0.0 { 0.0 } else { a / b };
        Self::new(guarded(self.x, rhs.x), guarded(self.y, rhs.y))
    }
}

impl Neg for Vector2f {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<Vector2f> for Vector2<f32> {
    fn from(v: Vector2f) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl From<Vector2<f32>> for Vector2f {
    fn from(v: Vector2<f32>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl fmt::Display for Vector2f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector2f({}, {})", self.x, self.y)
    }
}
