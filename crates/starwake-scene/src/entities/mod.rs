//! Entity pools: stars, meteors and black holes.

pub mod black_hole;
pub mod meteor;
pub mod star;

use rand::Rng;

/// Uniform coordinate in `[0, extent)`, or 0 on an empty axis.
pub(crate) fn random_coord<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}
