//! Cosmetic star jitter near black holes.
//!
//! Every frame, each star within twice a black hole's radius is nudged in a
//! fresh random direction. Nothing carries over between frames.

use std::f32::consts::TAU;

use rand::Rng;

use crate::entities::{black_hole::BlackHole, star::Star};

/// Displacement at the very center of a black hole.
pub const MAX_DISPLACEMENT: f32 = 10.0;

/// Displacement magnitude for a star `distance` away from a black hole of
/// the given radius. Falls off linearly to zero at `2 * radius`.
pub fn strength(distance: f32, radius: f32) -> f32 {
    let reach = radius * 2.0;
    if reach <= 0.0 || distance >= reach {
        return 0.0;
    }
    MAX_DISPLACEMENT * (1.0 - distance / reach)
}

/// Displacement vector for a given strength and direction.
pub fn displacement(strength: f32, direction: f32) -> (f32, f32) {
    (direction.sin() * strength, direction.cos() * strength)
}

/// Nudge every star close to a black hole.
pub fn apply<R: Rng + ?Sized>(black_holes: &[BlackHole], stars: &mut [Star], rng: &mut R) {
    for hole in black_holes {
        for star in stars.iter_mut() {
            let distance = ((star.x - hole.x).powi(2) + (star.y - hole.y).powi(2)).sqrt();
            let s = strength(distance, hole.radius);
            if s > 0.0 {
                let (dx, dy) = displacement(s, rng.gen_range(0.0..TAU));
                star.x += dx;
                star.y += dy;
            }
        }
    }
}
