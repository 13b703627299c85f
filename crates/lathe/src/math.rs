//! Math helpers and glam re-exports.
//!
//! We re-export the [glam](https://docs.rs/glam) vector types used by the
//! vertex views so callers don't need to depend on it directly. The two free
//! functions here are the only trigonometry the generators share.

pub use glam::{Vec2, Vec3};

use std::f32::consts::TAU;

/// Direction of step `i` out of `n` around a closed loop, as `(x, z)`.
///
/// The loop starts on the negative Z axis and turns counter-clockwise when
/// viewed from +Y, so step 0 is `(0, -1)` and a quarter turn is `(-1, 0)`.
/// Equivalently the result is `(-sin θ, -cos θ)` with `θ = 2π·i/n`.
///
/// `i == n` is the seam duplicate and yields exactly the same direction as
/// `i == 0`, so positions on both sides of a seam are bit-identical.
pub fn loop_direction(i: u32, n: u32) -> (f32, f32) {
    let theta = TAU * (i % n) as f32 / n as f32;
    (-theta.sin(), -theta.cos())
}

/// `i / n` as a float. Used for ring radii, stack heights and texcoords.
pub fn fraction(i: u32, n: u32) -> f32 {
    i as f32 / n as f32
}
