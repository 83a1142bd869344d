//! Four-point spline interpolation between adjacent keyframes.
//!
//! `interpolate` synthesizes a pose `alpha` of the way from `first` to
//! `second`, using `prev` and `after` as tangent context so velocity stays
//! continuous across segment boundaries. Alpha is not validated: values
//! outside `[0, 1]` extrapolate along the same cubic.

pub mod functions;

use serde::{Deserialize, Serialize};

use self::functions::{catmull_rom_f32, catmull_rom_quat, catmull_rom_vec3};

/// Frame-level blend of four consecutive keys.
pub trait Spline: Sized {
    fn catmull_rom(prev: &Self, first: &Self, second: &Self, after: &Self, alpha: f32) -> Self;
}

impl Spline for f32 {
    #[inline]
    fn catmull_rom(prev: &Self, first: &Self, second: &Self, after: &Self, alpha: f32) -> Self {
        catmull_rom_f32(*prev, *first, *second, *after, alpha)
    }
}

impl Spline for [f32; 3] {
    #[inline]
    fn catmull_rom(prev: &Self, first: &Self, second: &Self, after: &Self, alpha: f32) -> Self {
        catmull_rom_vec3(*prev, *first, *second, *after, alpha)
    }
}

/// Unit quaternion (x, y, z, w).
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Quat(pub [f32; 4]);

impl Quat {
    pub const IDENTITY: Quat = Quat([0.0, 0.0, 0.0, 1.0]);

    pub fn from_axis_angle(axis: [f32; 3], angle: f32) -> Self {
        Quat(functions::quat_from_axis_angle(axis, angle))
    }

    /// True when both quaternions describe the same rotation (`q` and `-q` included).
    pub fn same_rotation(&self, other: &Quat, eps: f32) -> bool {
        let a = functions::normalize_quat(self.0);
        let b = functions::normalize_quat(other.0);
        let dot = a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3];
        (dot.abs() - 1.0).abs() <= eps
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Spline for Quat {
    #[inline]
    fn catmull_rom(prev: &Self, first: &Self, second: &Self, after: &Self, alpha: f32) -> Self {
        Quat(catmull_rom_quat(prev.0, first.0, second.0, after.0, alpha))
    }
}

/// The four frames surrounding the interval being animated.
#[derive(Debug)]
pub struct ContextFrames<'a, F> {
    pub prev: &'a F,
    pub first: &'a F,
    pub second: &'a F,
    pub after: &'a F,
}

// Manual impls: the derive would require `F: Clone`/`F: Copy`.
impl<F> Clone for ContextFrames<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for ContextFrames<'_, F> {}

/// Blend the context frames. Pure; none of the inputs is touched.
#[inline]
pub fn interpolate<F: Spline>(ctx: ContextFrames<'_, F>, alpha: f32) -> F {
    interpolate_frames(ctx.prev, ctx.first, ctx.second, ctx.after, alpha)
}

#[inline]
pub fn interpolate_frames<F: Spline>(prev: &F, first: &F, second: &F, after: &F, alpha: f32) -> F {
    F::catmull_rom(prev, first, second, after, alpha)
}
