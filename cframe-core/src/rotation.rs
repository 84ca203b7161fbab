//! Transient rotation values produced by [`CFrame`](crate::CFrame)
use std::fmt;

use crate::vector3::Vector3f;

/// Rotation quaternion, scalar part `w` and vector part `(i, j, k)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub i: f32,
    pub j: f32,
    pub k: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        w: 1.0,
        i: 0.0,
        j: 0.0,
        k: 0.0,
    };

    pub fn vector_part(&self) -> Vector3f {
        Vector3f::new(self.i, self.j, self.k)
    }

    /// Rotation angle, `2 * acos(w)` for a unit quaternion.
    ///
    /// Evaluated as `2 * atan2(|ijk|, w)`, which stays accurate for tiny
    /// angles where `acos` near 1 loses precision in f32.
    pub fn angle(&self) -> f32 {
        2.0 * self.vector_part().magnitude().atan2(self.w)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quaternion({}, {}, {}, {})", self.w, self.i, self.j, self.k)
    }
}

/// XYZ Euler decomposition in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerXYZ {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl fmt::Display for EulerXYZ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EulerXYZ({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Snapshot of a frame: translation followed by the row-major rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CFrameComponents {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub m11: f32,
    pub m12: f32,
    pub m13: f32,
    pub m21: f32,
    pub m22: f32,
    pub m23: f32,
    pub m31: f32,
    pub m32: f32,
    pub m33: f32,
}

impl CFrameComponents {
    pub fn to_array(&self) -> [f32; 12] {
        [
            self.x, self.y, self.z, self.m11, self.m12, self.m13, self.m21, self.m22, self.m23,
            self.m31, self.m32, self.m33,
        ]
    }
}
