//! 4D Mathematics Library
//!
//! This crate provides the vector and planar-rotation types used by the
//! sdf4d distance-field engine.
//!
//! ## Core Types
//!
//! - [`Vec4`] - 4D vector with x, y, z, w components
//! - [`Vec3`] - 3D vector, used for Euler angles, plane-rotation vectors and colors
//! - [`Rot2`] - 2x2 planar rotation applied to a pair of vector components
//!
//! In 4D there is no rotation "axis"; rotations happen in planes. The engine
//! composes shape orientations out of six planar rotations (xz, yz, xy and
//! xw, zw, yw), each expressed as a [`Rot2`].

mod vec3;
mod vec4;
mod rot2;

pub use vec3::Vec3;
pub use vec4::Vec4;
pub use rot2::Rot2;
