//! Degenerate-result errors for the fallible frame and vector operations.
//!
//! Every `try_*` method reports one of these instead of substituting a
//! fallback value. The infallible counterparts keep returning the fallback.

use thiserror::Error;

/// A geometric input for which the closed-form result is undefined.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FrameError {
    /// Normalising a vector whose magnitude is exactly zero.
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    /// Inverting a frame whose 4x4 determinant is exactly zero.
    #[error("frame is singular (determinant {determinant})")]
    SingularMatrix { determinant: f32 },

    /// Look-at direction parallel to the world up axis.
    #[error("look direction is parallel to the world up axis")]
    ParallelLookAt,

    /// XYZ Euler extraction with `m13` at or near +/-1.
    #[error("gimbal lock: m13 = {m13}")]
    GimbalLock { m13: f32 },
}

pub type FrameResult<T> = Result<T, FrameError>;
