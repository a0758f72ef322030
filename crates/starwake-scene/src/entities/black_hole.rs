//! Black holes with a swirling ring of glowing dots.

use std::f32::consts::TAU;

use rand::Rng;
use starwake_core::{Rgba, Surface};

use super::random_coord;
use crate::raster::Raster;

/// Number of dots in the swirl ring.
pub const RING_DOTS: usize = 50;
/// Radius added per ring dot index.
pub const RING_SPACING: f32 = 4.0;
/// Radius of a single ring dot.
pub const RING_DOT_RADIUS: f32 = 3.0;

/// A single black hole.
#[derive(Debug, Clone, PartialEq)]
pub struct BlackHole {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Core fill.
    pub color: Rgba,
    /// Ring dot fill.
    pub glow_color: Rgba,
    /// Radians added to `angle` each frame.
    pub swirl_speed: f32,
    /// Current swirl angle, never normalized.
    pub angle: f32,
}

impl BlackHole {
    /// Spawn a black hole at a random position.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, surface: Surface) -> Self {
        Self {
            x: random_coord(rng, surface.width),
            y: random_coord(rng, surface.height),
            radius: rng.gen_range(100.0..250.0),
            color: Rgba::BLACK,
            glow_color: Rgba::white(0.8),
            swirl_speed: rng.gen_range(0.05..0.15),
            angle: rng.gen_range(0.0..TAU),
        }
    }

    /// Centers of the ring dots for the current angle.
    pub fn ring_points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        (0..RING_DOTS).map(move |i| {
            let radius = self.radius + i as f32 * RING_SPACING;
            let angle = self.angle + i as f32 * self.swirl_speed;
            (self.x + angle.cos() * radius, self.y + angle.sin() * radius)
        })
    }
}

/// Draw each black hole's core and ring, then advance its swirl angle.
pub fn draw(black_holes: &mut [BlackHole], raster: &mut Raster) {
    for hole in black_holes {
        raster.fill_circle(hole.x, hole.y, hole.radius, hole.color);
        for (x, y) in hole.ring_points() {
            raster.fill_circle(x, y, RING_DOT_RADIUS, hole.glow_color);
        }
        hole.angle += hole.swirl_speed;
    }
}
