//! Combination algebra
//!
//! Pairwise operators that merge two scalar distances into one. The same
//! function drives both merge sites in the scene fold: child-into-parent and
//! group-into-global. Subtract and Intersect are order-sensitive, so the
//! caller's operand order is part of the contract: `a` is the running
//! distance, `b` the incoming shape.

use serde::{Serialize, Deserialize};

/// How a shape merges into the running distance
///
/// Declaration order is load-bearing: the integer value of each operator is
/// the `operation` field of the wire record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    #[default]
    Union,
    Blend,
    Subtract,
    Intersect,
}

impl Operation {
    /// Integer value used in the shape parameter buffer
    #[inline]
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Decode a buffer integer back into an operation
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::Union),
            1 => Some(Self::Blend),
            2 => Some(Self::Subtract),
            3 => Some(Self::Intersect),
            _ => None,
        }
    }
}

/// Polynomial smooth minimum with smoothing radius `k`
///
/// `h = clamp(0.5 + 0.5*(b-a)/k, 0, 1); lerp(b, a, h) - k*h*(1-h)`.
/// `k <= 0` degenerates to a plain `min` instead of dividing by zero.
#[inline]
pub fn smooth_min(a: f32, b: f32, k: f32) -> f32 {
    if k <= 0.0 {
        return a.min(b);
    }
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    b + (a - b) * h - k * h * (1.0 - h)
}

/// Merge distance `b` into running distance `a`
#[inline]
pub fn combine(a: f32, b: f32, operation: Operation, k: f32) -> f32 {
    match operation {
        Operation::Union => a.min(b),
        Operation::Blend => smooth_min(a, b, k),
        Operation::Subtract => a.max(-b),
        Operation::Intersect => a.max(b),
    }
}

/// Merge `b` into `a`, also reporting the interpolation weight toward `a`
///
/// The weight is what a shading consumer uses to mix per-shape colors at the
/// merged surface: `1.0` keeps the running operand's color, `0.0` takes the
/// incoming shape's, and Blend returns its smooth `h` so color transitions
/// match the distance transition.
#[inline]
pub fn combine_weight(a: f32, b: f32, operation: Operation, k: f32) -> (f32, f32) {
    match operation {
        Operation::Union => {
            if b < a {
                (b, 0.0)
            } else {
                (a, 1.0)
            }
        }
        Operation::Blend => {
            if k <= 0.0 {
                return if b < a { (b, 0.0) } else { (a, 1.0) };
            }
            let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
            (b + (a - b) * h - k * h * (1.0 - h), h)
        }
        Operation::Subtract => {
            if -b > a {
                (-b, 0.0)
            } else {
                (a, 1.0)
            }
        }
        Operation::Intersect => {
            if b > a {
                (b, 0.0)
            } else {
                (a, 1.0)
            }
        }
    }
}
