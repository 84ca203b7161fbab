//! CFrame Core Library - vectors and rigid coordinate frames
//!
//! Plain value types for 2D/3D vectors and rigid transforms: composition,
//! inversion, world/object-space conversion, quaternion extraction and
//! interpolation. Every operation returns a new value.

pub mod cframe;
pub mod error;
pub mod rotation;
pub mod vector2;
pub mod vector3;

// Re-export commonly used types
pub use cframe::CFrame;
pub use error::{FrameError, FrameResult};
pub use rotation::{CFrameComponents, EulerXYZ, Quaternion};
pub use vector2::Vector2f;
pub use vector3::Vector3f;
