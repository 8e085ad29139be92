//! Planar 2D rotation
//!
//! A [`Rot2`] rotates a pair of components of a 4D point within one of the
//! six coordinate planes. Shape orientation and the global W slice are both
//! built from these, so the two matrix layouts here are a compatibility
//! contract: changing either sign convention moves every rotated surface.

use serde::{Serialize, Deserialize};

/// Precomputed cosine/sine pair for a planar rotation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rot2 {
    pub cos: f32,
    pub sin: f32,
}

impl Rot2 {
    /// No rotation
    pub const IDENTITY: Self = Self { cos: 1.0, sin: 0.0 };

    /// Create a rotation by `angle` radians
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        Self {
            cos: angle.cos(),
            sin: angle.sin(),
        }
    }

    /// Rotate the pair `(a, b)` as a row vector against `[[c, s], [-s, c]]`
    ///
    /// Result: `(a*c - b*s, a*s + b*c)`.
    #[inline]
    pub fn rotate(self, a: f32, b: f32) -> (f32, f32) {
        (a * self.cos - b * self.sin, a * self.sin + b * self.cos)
    }

    /// Rotate the pair `(a, b)` as a row vector against `[[c, -s], [s, c]]`
    ///
    /// The transpose (inverse) of [`Rot2::rotate`]:
    /// `(a*c + b*s, -a*s + b*c)`.
    #[inline]
    pub fn rotate_inv(self, a: f32, b: f32) -> (f32, f32) {
        (a * self.cos + b * self.sin, -a * self.sin + b * self.cos)
    }
}

impl Default for Rot2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
