//! Rigid coordinate frames: an orthonormal rotation basis plus a translation.
//!
//! A [`CFrame`] is the 4x4 homogeneous matrix
//!
//! ```text
//! | m11 m12 m13 x |
//! | m21 m22 m23 y |
//! | m31 m32 m33 z |
//! | M41 M42 M43 M44 |  = | 0 0 0 1 |
//! ```
//!
//! The rotation columns are the frame's right, up and back axes. The
//! rotation is assumed orthonormal; nothing enforces it, so frames built
//! from arbitrary components may invert or decompose unexpectedly.
//!
//! Operations that can hit a degenerate input come in two forms: a `try_*`
//! method returning [`FrameResult`], and an infallible one that substitutes
//! a fixed fallback value.
use std::fmt;
use std::ops::{Add, Mul, Sub};

use nalgebra::Matrix4;

use crate::error::{FrameError, FrameResult};
use crate::rotation::{CFrameComponents, EulerXYZ, Quaternion};
use crate::vector3::Vector3f;

/// Fixed last row of the homogeneous matrix
pub const M41: f32 = 0.0;
pub const M42: f32 = 0.0;
pub const M43: f32 = 0.0;
pub const M44: f32 = 1.0;

/// `|m13|` at or above `1 - GIMBAL_LOCK_EPSILON` is reported as gimbal lock.
pub const GIMBAL_LOCK_EPSILON: f32 = 1e-6;

/// Relative rotations smaller than this (radians) are treated as none by `lerp`.
pub const ANGLE_EPSILON: f32 = 1e-6;

/// Position and orientation in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CFrame {
    x: f32,
    y: f32,
    z: f32,
    m11: f32,
    m12: f32,
    m13: f32,
    m21: f32,
    m22: f32,
    m23: f32,
    m31: f32,
    m32: f32,
    m33: f32,
}

impl CFrame {
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Translation only, identity rotation
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self::from_components(x, y, z, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0)
    }

    pub fn from_position(position: Vector3f) -> Self {
        Self::new(position.x(), position.y(), position.z())
    }

    /// Position plus the nine rotation entries in row-major order. No
    /// validation is performed.
    #[allow(clippy::too_many_arguments)]
    pub fn from_components(
        x: f32,
        y: f32,
        z: f32,
        m11: f32,
        m12: f32,
        m13: f32,
        m21: f32,
        m22: f32,
        m23: f32,
        m31: f32,
        m32: f32,
        m33: f32,
    ) -> Self {
        Self {
            x,
            y,
            z,
            m11,
            m12,
            m13,
            m21,
            m22,
            m23,
            m31,
            m32,
            m33,
        }
    }

    /// Frame at `position` looking towards `target`.
    ///
    /// When the look direction is parallel to the world up axis, one of two
    /// fixed bases is substituted, picked by the sign of the back axis' y.
    pub fn look_at(position: Vector3f, target: Vector3f) -> Self {
        match Self::try_look_at(position, target) {
            Ok(cf) => cf,
            Err(err) => {
                let back = (position - target).unit();
                tracing::debug!(%err, %position, %target, "look_at fallback basis");
                Self::vertical_look_basis(position, back.y() < 0.0)
            }
        }
    }

    pub fn try_look_at(position: Vector3f, target: Vector3f) -> FrameResult<Self> {
        let back = (position - target).try_unit()?;
        let right = Vector3f::UP
            .cross(back)
            .try_unit()
            .map_err(|_| FrameError::ParallelLookAt)?;
        let up = back.cross(right);
        Ok(Self::from_basis(position, right, up, back))
    }

    fn vertical_look_basis(position: Vector3f, looking_up: bool) -> Self {
        let up = Vector3f::RIGHT;
        let (right, back) = if looking_up {
            (-Vector3f::BACK, -Vector3f::UP)
        } else {
            (Vector3f::BACK, Vector3f::UP)
        };
        Self::from_basis(position, right, up, back)
    }

    /// Frame from a position and its three rotation columns
    pub fn from_basis(position: Vector3f, right: Vector3f, up: Vector3f, back: Vector3f) -> Self {
        Self::from_components(
            position.x(),
            position.y(),
            position.z(),
            right.x(),
            up.x(),
            back.x(),
            right.y(),
            up.y(),
            back.y(),
            right.z(),
            up.z(),
            back.z(),
        )
    }

    /// Translation plus the rotation of the unit quaternion `w + ii + jj + kk`
    #[allow(clippy::too_many_arguments)]
    pub fn from_quaternion(x: f32, y: f32, z: f32, i: f32, j: f32, k: f32, w: f32) -> Self {
        Self::from_components(
            x,
            y,
            z,
            1.0 - 2.0 * j * j - 2.0 * k * k,
            2.0 * (i * j - k * w),
            2.0 * (i * k + j * w),
            2.0 * (i * j + k * w),
            1.0 - 2.0 * i * i - 2.0 * k * k,
            2.0 * (j * k - i * w),
            2.0 * (i * k - j * w),
            2.0 * (j * k + i * w),
            1.0 - 2.0 * i * i - 2.0 * j * j,
        )
    }

    /// Rotation of `theta` radians around `axis`, at the origin.
    ///
    /// Each world axis is rotated with Rodrigues' formula and the results
    /// become the rotation columns. A zero-length axis has no direction, so
    /// the result is the identity rotation for any `theta`.
    pub fn from_axis_angle(axis: Vector3f, theta: f32) -> Self {
        let right = Vector3f::RIGHT.rotate_about(axis, theta);
        let up = Vector3f::UP.rotate_about(axis, theta);
        let back = Vector3f::BACK.rotate_about(axis, theta);
        Self::from_basis(Vector3f::ZERO, right, up, back)
    }

    /// `Rx(x) * Ry(y) * Rz(z)`
    pub fn angles(x: f32, y: f32, z: f32) -> Self {
        Self::from_axis_angle(Vector3f::RIGHT, x)
            * Self::from_axis_angle(Vector3f::UP, y)
            * Self::from_axis_angle(Vector3f::BACK, z)
    }

    pub fn angles_f64(x: f64, y: f64, z: f64) -> Self {
        Self::angles(x as f32, y as f32, z as f32)
    }

    pub fn from_euler_angles_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::angles(x, y, z)
    }

    /// `Ry(ry) * Rx(rx) * Rz(rz)`
    pub fn from_euler_angles_yxz(rx: f32, ry: f32, rz: f32) -> Self {
        Self::from_axis_angle(Vector3f::UP, ry)
            * Self::from_axis_angle(Vector3f::RIGHT, rx)
            * Self::from_axis_angle(Vector3f::BACK, rz)
    }

    /// Build from a homogeneous matrix; the last row is ignored.
    pub fn from_matrix4(m: &Matrix4<f32>) -> Self {
        Self::from_components(
            m[(0, 3)],
            m[(1, 3)],
            m[(2, 3)],
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)],
        )
    }

    pub fn to_matrix4(&self) -> Matrix4<f32> {
        Matrix4::new(
            self.m11, self.m12, self.m13, self.x, self.m21, self.m22, self.m23, self.y, self.m31,
            self.m32, self.m33, self.z, M41, M42, M43, M44,
        )
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

    pub fn position(&self) -> Vector3f {
        Vector3f::new(self.x, self.y, self.z)
    }

    /// Negated back column
    pub fn look_vector(&self) -> Vector3f {
        -self.back_vector()
    }

    pub fn up_vector(&self) -> Vector3f {
        Vector3f::new(self.m12, self.m22, self.m32)
    }

    pub fn right_vector(&self) -> Vector3f {
        Vector3f::new(self.m11, self.m21, self.m31)
    }

    fn back_vector(&self) -> Vector3f {
        Vector3f::new(self.m13, self.m23, self.m33)
    }

    pub fn components(&self) -> CFrameComponents {
        CFrameComponents {
            x: self.x,
            y: self.y,
            z: self.z,
            m11: self.m11,
            m12: self.m12,
            m13: self.m13,
            m21: self.m21,
            m22: self.m22,
            m23: self.m23,
            m31: self.m31,
            m32: self.m32,
            m33: self.m33,
        }
    }

    /// Same rotation, translation zeroed
    pub fn rotation_only(&self) -> Self {
        *self - self.position()
    }

    /// Determinant of the full 4x4 matrix by cofactor expansion.
    pub fn determinant(&self) -> f32 {
        let c = self.components();
        let (a11, a12, a13, a14) = (c.m11, c.m12, c.m13, c.x);
        let (a21, a22, a23, a24) = (c.m21, c.m22, c.m23, c.y);
        let (a31, a32, a33, a34) = (c.m31, c.m32, c.m33, c.z);
        let (a41, a42, a43, a44) = (M41, M42, M43, M44);

        a11 * a22 * a33 * a44 + a11 * a23 * a34 * a42 + a11 * a24 * a32 * a43
            + a12 * a21 * a34 * a43 + a12 * a23 * a31 * a44 + a12 * a24 * a33 * a41
            + a13 * a21 * a32 * a44 + a13 * a22 * a34 * a41 + a13 * a24 * a31 * a42
            + a14 * a21 * a33 * a42 + a14 * a22 * a31 * a43 + a14 * a23 * a32 * a41
            - a11 * a22 * a34 * a43 - a11 * a23 * a32 * a44 - a11 * a24 * a33 * a42
            - a12 * a21 * a33 * a44 - a12 * a23 * a34 * a41 - a12 * a24 * a31 * a43
            - a13 * a21 * a34 * a42 - a13 * a22 * a31 * a44 - a13 * a24 * a32 * a41
            - a14 * a21 * a32 * a43 - a14 * a22 * a33 * a41 - a14 * a23 * a31 * a42
    }

    /// Inverse as adjugate over determinant. A singular frame is returned
    /// unchanged; use [`try_inverse`](Self::try_inverse) to detect that.
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or_else(|err| {
            tracing::debug!(%err, frame = %self, "inverse of singular frame");
            *self
        })
    }

    pub fn try_inverse(&self) -> FrameResult<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(FrameError::SingularMatrix { determinant: det });
        }

        let c = self.components();
        let (a11, a12, a13, a14) = (c.m11, c.m12, c.m13, c.x);
        let (a21, a22, a23, a24) = (c.m21, c.m22, c.m23, c.y);
        let (a31, a32, a33, a34) = (c.m31, c.m32, c.m33, c.z);
        let (a41, a42, a43, a44) = (M41, M42, M43, M44);

        let b11 = a22 * a33 * a44 + a23 * a34 * a42 + a24 * a32 * a43
            - a22 * a34 * a43 - a23 * a32 * a44 - a24 * a33 * a42;
        let b12 = a12 * a34 * a43 + a13 * a32 * a44 + a14 * a33 * a42
            - a12 * a33 * a44 - a13 * a34 * a42 - a14 * a32 * a43;
        let b13 = a12 * a23 * a44 + a13 * a24 * a42 + a14 * a22 * a43
            - a12 * a24 * a43 - a13 * a22 * a44 - a14 * a23 * a42;
        let b14 = a12 * a24 * a33 + a13 * a22 * a34 + a14 * a23 * a32
            - a12 * a23 * a34 - a13 * a24 * a32 - a14 * a22 * a33;
        let b21 = a21 * a34 * a43 + a23 * a31 * a44 + a24 * a33 * a41
            - a21 * a33 * a44 - a23 * a34 * a41 - a24 * a31 * a43;
        let b22 = a11 * a33 * a44 + a13 * a34 * a41 + a14 * a31 * a43
            - a11 * a34 * a43 - a13 * a31 * a44 - a14 * a33 * a41;
        let b23 = a11 * a24 * a43 + a13 * a21 * a44 + a14 * a23 * a41
            - a11 * a23 * a44 - a13 * a24 * a41 - a14 * a21 * a43;
        let b24 = a11 * a23 * a34 + a13 * a24 * a31 + a14 * a21 * a33
            - a11 * a24 * a33 - a13 * a21 * a34 - a14 * a23 * a31;
        let b31 = a21 * a32 * a44 + a22 * a34 * a41 + a24 * a31 * a42
            - a21 * a34 * a42 - a22 * a31 * a44 - a24 * a32 * a41;
        let b32 = a11 * a34 * a42 + a12 * a31 * a44 + a14 * a32 * a41
            - a11 * a32 * a44 - a12 * a34 * a41 - a14 * a31 * a42;
        let b33 = a11 * a22 * a44 + a12 * a24 * a41 + a14 * a21 * a42
            - a11 * a24 * a42 - a12 * a21 * a44 - a14 * a22 * a41;
        let b34 = a11 * a24 * a32 + a12 * a21 * a34 + a14 * a22 * a31
            - a11 * a22 * a34 - a12 * a24 * a31 - a14 * a21 * a32;

        Ok(Self::from_components(
            b14 / det,
            b24 / det,
            b34 / det,
            b11 / det,
            b12 / det,
            b13 / det,
            b21 / det,
            b22 / det,
            b23 / det,
            b31 / det,
            b32 / det,
            b33 / det,
        ))
    }

    /// `self * other`: `other` expressed in this frame's space
    pub fn to_world_space(&self, other: &CFrame) -> CFrame {
        *self * *other
    }

    pub fn to_object_space(&self, other: &CFrame) -> CFrame {
        self.inverse() * *other
    }

    pub fn point_to_world_space(&self, point: Vector3f) -> Vector3f {
        *self * point
    }

    pub fn point_to_object_space(&self, point: Vector3f) -> Vector3f {
        self.inverse() * point
    }

    /// Rotate a free vector into world space; translation is ignored.
    pub fn vector_to_world_space(&self, v: Vector3f) -> Vector3f {
        self.rotation_only() * v
    }

    /// Rotate a free vector into this frame's space; translation is ignored.
    pub fn vector_to_object_space(&self, v: Vector3f) -> Vector3f {
        self.inverse().rotation_only() * v
    }

    /// XYZ Euler angles such that `CFrame::angles(e.x, e.y, e.z)` rebuilds
    /// the rotation.
    ///
    /// Near `m13 = +/-1` the x and z angles are not unique; this form clamps
    /// `m13` and returns whatever `atan2` yields.
    pub fn to_euler_angles_xyz(&self) -> EulerXYZ {
        EulerXYZ {
            x: (-self.m23).atan2(self.m33),
            y: self.m13.clamp(-1.0, 1.0).asin(),
            z: (-self.m12).atan2(self.m11),
        }
    }

    pub fn try_to_euler_angles_xyz(&self) -> FrameResult<EulerXYZ> {
        if self.m13.abs() >= 1.0 - GIMBAL_LOCK_EPSILON {
            return Err(FrameError::GimbalLock { m13: self.m13 });
        }
        Ok(self.to_euler_angles_xyz())
    }

    /// Quaternion for the rotation part.
    ///
    /// Uses the trace when it is positive, otherwise the branch of the
    /// largest diagonal entry (ties prefer m11, then m22).
    pub fn to_quaternion(&self) -> Quaternion {
        let (m11, m12, m13) = (self.m11, self.m12, self.m13);
        let (m21, m22, m23) = (self.m21, self.m22, self.m23);
        let (m31, m32, m33) = (self.m31, self.m32, self.m33);

        let trace = m11 + m22 + m33;
        if trace > 0.0 {
            let s = (1.0 + trace).sqrt();
            let r = 0.5 / s;
            Quaternion {
                w: 0.5 * s,
                i: (m32 - m23) * r,
                j: (m13 - m31) * r,
                k: (m21 - m12) * r,
            }
        } else if m11 >= m22 && m11 >= m33 {
            let s = (1.0 + m11 - m22 - m33).sqrt();
            let r = 0.5 / s;
            Quaternion {
                w: (m32 - m23) * r,
                i: 0.5 * s,
                j: (m21 + m12) * r,
                k: (m13 + m31) * r,
            }
        } else if m22 >= m33 {
            let s = (1.0 - m11 + m22 - m33).sqrt();
            let r = 0.5 / s;
            Quaternion {
                w: (m13 - m31) * r,
                i: (m21 + m12) * r,
                j: 0.5 * s,
                k: (m32 + m23) * r,
            }
        } else {
            let s = (1.0 - m11 - m22 + m33).sqrt();
            let r = 0.5 / s;
            Quaternion {
                w: (m21 - m12) * r,
                i: (m13 + m31) * r,
                j: (m32 + m23) * r,
                k: 0.5 * s,
            }
        }
    }

    /// Interpolate towards `other`.
    ///
    /// Position is lerped linearly. Rotation turns by `t` of the relative
    /// rotation's angle about its axis. Rotation and translation are
    /// interpolated independently, not as a screw motion.
    pub fn lerp(&self, other: &CFrame, t: f32) -> CFrame {
        let position = self.position().lerp(other.position(), t);
        let q = (self.inverse() * *other).to_quaternion();
        let theta = q.angle();
        let axis = q.vector_part();

        if theta.abs() < ANGLE_EPSILON || axis.magnitude() == 0.0 {
            return self.rotation_only() + position;
        }

        let rotated = *self * Self::from_axis_angle(axis, theta * t);
        rotated.rotation_only() + position
    }

    /// Component-wise comparison within `epsilon`
    pub fn fuzzy_eq(&self, other: &CFrame, epsilon: f32) -> bool {
        self.components()
            .to_array()
            .iter()
            .zip(other.components().to_array().iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for CFrame {
    fn default() -> Self {
        Self::identity()
    }
}

/// Composition of the two homogeneous matrices.
impl Mul for CFrame {
    type Output = CFrame;

    fn mul(self, b: CFrame) -> CFrame {
        let a = self;

        let n11 = a.m11 * b.m11 + a.m12 * b.m21 + a.m13 * b.m31 + a.x * M41;
        let n12 = a.m11 * b.m12 + a.m12 * b.m22 + a.m13 * b.m32 + a.x * M42;
        let n13 = a.m11 * b.m13 + a.m12 * b.m23 + a.m13 * b.m33 + a.x * M43;
        let n14 = a.m11 * b.x + a.m12 * b.y + a.m13 * b.z + a.x * M44;

        let n21 = a.m21 * b.m11 + a.m22 * b.m21 + a.m23 * b.m31 + a.y * M41;
        let n22 = a.m21 * b.m12 + a.m22 * b.m22 + a.m23 * b.m32 + a.y * M42;
        let n23 = a.m21 * b.m13 + a.m22 * b.m23 + a.m23 * b.m33 + a.y * M43;
        let n24 = a.m21 * b.x + a.m22 * b.y + a.m23 * b.z + a.y * M44;

        let n31 = a.m31 * b.m11 + a.m32 * b.m21 + a.m33 * b.m31 + a.z * M41;
        let n32 = a.m31 * b.m12 + a.m32 * b.m22 + a.m33 * b.m32 + a.z * M42;
        let n33 = a.m31 * b.m13 + a.m32 * b.m23 + a.m33 * b.m33 + a.z * M43;
        let n34 = a.m31 * b.x + a.m32 * b.y + a.m33 * b.z + a.z * M44;

        CFrame::from_components(n14, n24, n34, n11, n12, n13, n21, n22, n23, n31, n32, n33)
    }
}

/// Transform a local point into this frame's space.
impl Mul<Vector3f> for CFrame {
    type Output = Vector3f;

    fn mul(self, v: Vector3f) -> Vector3f {
        self.position()
            + self.right_vector() * v.x()
            + self.up_vector() * v.y()
            + self.back_vector() * v.z()
    }
}

impl Add<Vector3f> for CFrame {
    type Output = CFrame;

    fn add(self, v: Vector3f) -> CFrame {
        CFrame {
            x: self.x + v.x(),
            y: self.y + v.y(),
            z: self.z + v.z(),
            ..self
        }
    }
}

impl Sub<Vector3f> for CFrame {
    type Output = CFrame;

    fn sub(self, v: Vector3f) -> CFrame {
        CFrame {
            x: self.x - v.x(),
            y: self.y - v.y(),
            z: self.z - v.z(),
            ..self
        }
    }
}

impl From<CFrame> for Matrix4<f32> {
    fn from(cf: CFrame) -> Self {
        cf.to_matrix4()
    }
}

impl fmt::Display for CFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CFrame({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {})",
            self.x,
            self.y,
            self.z,
            self.m11,
            self.m12,
            self.m13,
            self.m21,
            self.m22,
            self.m23,
            self.m31,
            self.m32,
            self.m33
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-5;

    fn assert_vec_eq(a: Vector3f, b: Vector3f) {
        assert!(a.fuzzy_eq(b, EPS), "{} != {}", a, b);
    }

    fn assert_orthonormal(cf: &CFrame) {
        let (r, u, l) = (cf.right_vector(), cf.up_vector(), cf.look_vector());
        assert!((r.magnitude() - 1.0).abs() < EPS);
        assert!((u.magnitude() - 1.0).abs() < EPS);
        assert!((l.magnitude() - 1.0).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
        assert!(r.dot(l).abs() < EPS);
        assert!(u.dot(l).abs() < EPS);
    }

    #[test]
    fn test_identity_accessors() {
        let cf = CFrame::identity();
        assert_eq!(cf.position(), Vector3f::ZERO);
        assert_eq!(cf.right_vector(), Vector3f::RIGHT);
        assert_eq!(cf.up_vector(), Vector3f::UP);
        assert_eq!(cf.look_vector(), Vector3f::new(0.0, 0.0, -1.0));
        assert_eq!(CFrame::default(), cf);
    }

    #[test]
    fn test_translation_constructors() {
        let cf = CFrame::new(1.0, 2.0, 3.0);
        assert_eq!(cf.position(), Vector3f::new(1.0, 2.0, 3.0));
        assert_eq!((cf.x(), cf.y(), cf.z()), (1.0, 2.0, 3.0));
        assert_eq!(CFrame::from_position(Vector3f::new(1.0, 2.0, 3.0)), cf);
    }

    #[test]
    fn test_look_at_points_at_target() {
        let target = Vector3f::new(2.0, 2.0, 2.0);
        let cf = CFrame::look_at(Vector3f::ZERO, target);
        assert_vec_eq(cf.look_vector(), target.unit());
        assert_orthonormal(&cf);
        // right axis stays horizontal
        assert!(cf.right_vector().y().abs() < EPS);
    }

    #[test]
    fn test_look_at_vertical_fallbacks() {
        let up = CFrame::look_at(Vector3f::ZERO, Vector3f::new(0.0, 5.0, 0.0));
        assert_vec_eq(up.look_vector(), Vector3f::UP);
        assert_vec_eq(up.right_vector(), Vector3f::new(0.0, 0.0, -1.0));
        assert_vec_eq(up.up_vector(), Vector3f::RIGHT);

        let down = CFrame::look_at(Vector3f::ZERO, Vector3f::new(0.0, -5.0, 0.0));
        assert_vec_eq(down.look_vector(), -Vector3f::UP);
        assert_vec_eq(down.right_vector(), Vector3f::BACK);
        assert_vec_eq(down.up_vector(), Vector3f::RIGHT);

        assert_eq!(
            CFrame::try_look_at(Vector3f::ZERO, Vector3f::new(0.0, 5.0, 0.0)),
            Err(FrameError::ParallelLookAt)
        );
        assert_eq!(
            CFrame::try_look_at(Vector3f::UP, Vector3f::UP),
            Err(FrameError::ZeroLength)
        );
    }

    #[test]
    fn test_point_transform() {
        let cf = CFrame::new(1.0, 2.0, 3.0) * CFrame::angles(0.0, FRAC_PI_2, 0.0);
        // local +x maps onto world -z after a quarter turn about y
        assert_vec_eq(cf * Vector3f::RIGHT, Vector3f::new(1.0, 2.0, 2.0));
        assert_vec_eq(cf.point_to_object_space(cf * Vector3f::RIGHT), Vector3f::RIGHT);
    }

    #[test]
    fn test_add_sub_keep_rotation() {
        let cf = CFrame::angles(0.1, 0.2, 0.3);
        let moved = cf + Vector3f::new(1.0, 1.0, 1.0);
        assert_eq!(moved.position(), Vector3f::new(1.0, 1.0, 1.0));
        assert_eq!(moved.right_vector(), cf.right_vector());
        assert_eq!((moved - Vector3f::new(1.0, 1.0, 1.0)).position(), Vector3f::ZERO);
    }

    #[test]
    fn test_composition_order() {
        let a = CFrame::new(0.0, 0.0, -5.0);
        let b = CFrame::angles(0.0, FRAC_PI_2, 0.0);
        // translate then rotate vs rotate then translate
        assert_vec_eq((a * b).position(), Vector3f::new(0.0, 0.0, -5.0));
        assert_vec_eq((b * a).position(), Vector3f::new(-5.0, 0.0, 0.0));
        assert_eq!(a.to_world_space(&b), a * b);
    }

    #[test]
    fn test_determinant() {
        assert!((CFrame::identity().determinant() - 1.0).abs() < EPS);
        assert!((CFrame::angles(0.3, -1.2, 2.0).determinant() - 1.0).abs() < EPS);
        let scaled = CFrame::from_components(0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0);
        assert!((scaled.determinant() - 24.0).abs() < EPS);
    }

    #[test]
    fn test_inverse_of_translation() {
        let inv = CFrame::new(1.0, -2.0, 3.0).inverse();
        assert_vec_eq(inv.position(), Vector3f::new(-1.0, 2.0, -3.0));
        assert_eq!(inv.right_vector(), Vector3f::RIGHT);
    }

    #[test]
    fn test_singular_inverse_falls_back() {
        let flat = CFrame::from_components(1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(flat.determinant(), 0.0);
        assert_eq!(flat.inverse(), flat);
        assert_eq!(
            flat.try_inverse(),
            Err(FrameError::SingularMatrix { determinant: 0.0 })
        );
    }

    #[test]
    fn test_object_space_roundtrip() {
        let a = CFrame::look_at(Vector3f::new(1.0, 2.0, 3.0), Vector3f::new(-4.0, 0.5, 2.0));
        let b = CFrame::new(3.0, 0.0, 1.0) * CFrame::angles(0.4, 0.1, -0.7);
        let local = a.to_object_space(&b);
        assert!(a.to_world_space(&local).fuzzy_eq(&b, EPS));
    }

    #[test]
    fn test_vector_spaces_ignore_translation() {
        let cf = CFrame::new(10.0, 20.0, 30.0) * CFrame::angles(0.0, 0.0, FRAC_PI_2);
        let world = cf.vector_to_world_space(Vector3f::RIGHT);
        assert_vec_eq(world, Vector3f::UP);
        assert_vec_eq(cf.vector_to_object_space(Vector3f::UP), Vector3f::RIGHT);
        assert_vec_eq(cf.vector_to_object_space(world), Vector3f::RIGHT);
    }

    #[test]
    fn test_quaternion_identity() {
        assert_eq!(CFrame::identity().to_quaternion(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_quaternion_half_turn_branches() {
        let qx = CFrame::from_axis_angle(Vector3f::RIGHT, PI).to_quaternion();
        assert!(qx.w.abs() < EPS && (qx.i - 1.0).abs() < EPS);
        let qy = CFrame::from_axis_angle(Vector3f::UP, PI).to_quaternion();
        assert!(qy.w.abs() < EPS && (qy.j - 1.0).abs() < EPS);
        let qz = CFrame::from_axis_angle(Vector3f::BACK, PI).to_quaternion();
        assert!(qz.w.abs() < EPS && (qz.k - 1.0).abs() < EPS);
    }

    #[test]
    fn test_quaternion_tie_prefers_m11() {
        let s = 0.5_f32.sqrt();
        // half turn about (1, 1, 0): m11 == m22 == 0, m33 == -1
        let cf = CFrame::from_components(0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, -1.0);
        let q = cf.to_quaternion();
        assert!(q.w.abs() < EPS && q.k.abs() < EPS);
        assert!((q.i - s).abs() < EPS && (q.j - s).abs() < EPS);

        let turned = CFrame::from_axis_angle(Vector3f::new(1.0, 1.0, 0.0), PI).to_quaternion();
        assert!(turned.w.abs() < EPS && turned.k.abs() < EPS);
        assert!((turned.i - s).abs() < EPS && (turned.j - s).abs() < EPS);
    }

    #[test]
    fn test_quaternion_tie_prefers_m22_over_m33() {
        let s = 0.5_f32.sqrt();
        // half turn about (0, 1, 1): m11 == -1, m22 == m33 == 0
        let cf = CFrame::from_components(0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0);
        let q = cf.to_quaternion();
        assert!(q.w.abs() < EPS && q.i.abs() < EPS);
        assert!((q.j - s).abs() < EPS && (q.k - s).abs() < EPS);
    }

    #[test]
    fn test_quaternion_three_way_tie() {
        // half turn about (1, 1, 1): every diagonal entry is -1/3
        let (d, o) = (-1.0 / 3.0, 2.0 / 3.0);
        let cf = CFrame::from_components(0.0, 0.0, 0.0, d, o, o, o, d, o, o, o, d);
        let q = cf.to_quaternion();
        let c = 1.0 / 3.0_f32.sqrt();
        assert!(q.w.abs() < EPS);
        assert!(q.vector_part().fuzzy_eq(Vector3f::new(c, c, c), EPS));
    }

    #[test]
    fn test_quaternion_constructor_roundtrip() {
        let half = 0.3_f32;
        let axis = Vector3f::new(1.0, 2.0, 2.0).unit() * half.sin();
        let cf = CFrame::from_quaternion(0.0, 0.0, 0.0, axis.x(), axis.y(), axis.z(), half.cos());
        assert_orthonormal(&cf);
        let q = cf.to_quaternion();
        assert!((q.w - half.cos()).abs() < EPS);
        assert_vec_eq(q.vector_part(), axis);
        assert!((q.angle() - 2.0 * half).abs() < 1e-4);
    }

    #[test]
    fn test_axis_angle_zero_is_identity() {
        let cf = CFrame::from_axis_angle(Vector3f::new(0.0, 0.6, 0.8), 0.0);
        assert!(cf.fuzzy_eq(&CFrame::identity(), EPS));
    }

    #[test]
    fn test_axis_angle_zero_axis_is_identity() {
        for theta in [0.5, 1.0, PI] {
            let cf = CFrame::from_axis_angle(Vector3f::ZERO, theta);
            assert_eq!(cf, CFrame::identity());
        }
    }

    #[test]
    fn test_angles_order() {
        let xyz = CFrame::angles(0.5, 0.5, 0.0);
        let manual = CFrame::from_axis_angle(Vector3f::RIGHT, 0.5)
            * CFrame::from_axis_angle(Vector3f::UP, 0.5);
        let reversed = CFrame::from_axis_angle(Vector3f::UP, 0.5)
            * CFrame::from_axis_angle(Vector3f::RIGHT, 0.5);
        assert!(xyz.fuzzy_eq(&manual, EPS));
        assert!(!xyz.fuzzy_eq(&reversed, EPS));
        assert!(CFrame::from_euler_angles_yxz(0.5, 0.5, 0.0).fuzzy_eq(&reversed, EPS));
        assert_eq!(CFrame::from_euler_angles_xyz(0.5, 0.5, 0.0), xyz);
        assert!(CFrame::angles_f64(0.5, 0.5, 0.0).fuzzy_eq(&xyz, EPS));
    }

    #[test]
    fn test_euler_roundtrip() {
        let e = CFrame::angles(0.3, -0.4, 0.5).to_euler_angles_xyz();
        assert!((e.x - 0.3).abs() < EPS);
        assert!((e.y + 0.4).abs() < EPS);
        assert!((e.z - 0.5).abs() < EPS);
    }

    #[test]
    fn test_euler_gimbal_lock() {
        let cf = CFrame::angles(0.0, FRAC_PI_2, 0.0);
        assert!(matches!(
            cf.try_to_euler_angles_xyz(),
            Err(FrameError::GimbalLock { .. })
        ));
        let e = cf.to_euler_angles_xyz();
        assert!((e.y - FRAC_PI_2).abs() < 1e-3);
        assert!(CFrame::angles(0.1, 0.2, 0.3).try_to_euler_angles_xyz().is_ok());
    }

    #[test]
    fn test_lerp_halfway() {
        let a = CFrame::identity();
        let b = CFrame::new(2.0, 0.0, 0.0) * CFrame::angles(0.0, FRAC_PI_2, 0.0);
        let mid = a.lerp(&b, 0.5);
        assert_vec_eq(mid.position(), Vector3f::new(1.0, 0.0, 0.0));
        let expected = CFrame::new(1.0, 0.0, 0.0) * CFrame::angles(0.0, FRAC_PI_2 / 2.0, 0.0);
        assert!(mid.fuzzy_eq(&expected, 1e-4));
    }

    #[test]
    fn test_lerp_without_rotation() {
        let a = CFrame::new(0.0, 0.0, 0.0);
        let b = CFrame::new(0.0, 4.0, 0.0);
        assert_eq!(a.lerp(&b, 0.25), CFrame::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_matrix4_interop() {
        let cf = CFrame::new(1.0, 2.0, 3.0) * CFrame::angles(0.2, 0.4, 0.6);
        let m: Matrix4<f32> = cf.into();
        assert_eq!(m[(3, 3)], 1.0);
        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(CFrame::from_matrix4(&m), cf);
        assert!((m.determinant() - cf.determinant()).abs() < EPS);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            CFrame::new(1.0, 2.0, 3.0).to_string(),
            "CFrame(1, 2, 3, 1, 0, 0, 0, 1, 0, 0, 0, 1)"
        );
    }
}
