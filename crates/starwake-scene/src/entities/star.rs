//! Falling stars.

use rand::Rng;
use starwake_core::{Rgba, Surface};

use super::random_coord;
use crate::raster::Raster;

/// Fill used for every star regardless of its own opacity.
pub const STAR_FILL: Rgba = Rgba::white(0.9);

/// A single star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Pixels fallen per frame.
    pub speed: f32,
    pub opacity: f32,
}

impl Star {
    /// Spawn a star at a random position on the surface.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, surface: Surface) -> Self {
        Self {
            x: random_coord(rng, surface.width),
            y: random_coord(rng, surface.height),
            radius: rng.gen_range(1.0..2.5),
            speed: rng.gen_range(0.5..1.0),
            opacity: rng.gen_range(0.3..1.0),
        }
    }
}

/// Draw all stars as filled circles.
pub fn draw(stars: &[Star], raster: &mut Raster) {
    for star in stars {
        raster.fill_circle(star.x, star.y, star.radius, STAR_FILL);
    }
}

/// Move stars down, wrapping to the top with a new column once they fall
/// past the bottom edge.
pub fn update<R: Rng + ?Sized>(stars: &mut [Star], surface: Surface, rng: &mut R) {
    for star in stars {
        star.y += star.speed;
        if star.y > surface.height {
            star.y = 0.0;
            star.x = random_coord(rng, surface.width);
        } else if star.y < 0.0 {
            // Pushed above the top by lensing: pin to the edge, same column.
            star.y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_star_wraps_to_top() {
        let surface = Surface::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(7);
        let mut stars = vec![Star {
            x: 400.0,
            y: 590.0,
            radius: 1.0,
            speed: 20.0,
            opacity: 1.0,
        }];

        update(&mut stars, surface, &mut rng);

        assert_eq!(stars[0].y, 0.0);
        assert!((0.0..800.0).contains(&stars[0].x));
    }

    #[test]
    fn test_star_falls_by_speed() {
        let surface = Surface::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(7);
        let mut stars = vec![Star {
            x: 10.0,
            y: 100.0,
            radius: 1.0,
            speed: 0.75,
            opacity: 1.0,
        }];

        update(&mut stars, surface, &mut rng);

        assert_eq!(stars[0].x, 10.0);
        assert_eq!(stars[0].y, 100.75);
    }

    #[test]
    fn test_star_above_top_keeps_column() {
        let surface = Surface::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(7);
        let mut stars = vec![Star {
            x: 123.0,
            y: -4.0,
            radius: 1.0,
            speed: 1.0,
            opacity: 1.0,
        }];

        update(&mut stars, surface, &mut rng);

        assert_eq!(stars[0].y, 0.0);
        assert_eq!(stars[0].x, 123.0);
    }

    #[test]
    fn test_stars_stay_in_bounds() {
        let surface = Surface::new(320.0, 200.0);
        let mut rng = StdRng::seed_from_u64(42);
        let mut stars: Vec<Star> = (0..200).map(|_| Star::spawn(&mut rng, surface)).collect();
        stars[0].y = -4.0;

        for _ in 0..500 {
            update(&mut stars, surface, &mut rng);
            assert!(stars.iter().all(|s| (0.0..=surface.height).contains(&s.y)));
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let surface = Surface::new(640.0, 480.0);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let star = Star::spawn(&mut rng, surface);
            assert!((0.0..640.0).contains(&star.x));
            assert!((0.0..480.0).contains(&star.y));
            assert!((1.0..2.5).contains(&star.radius));
            assert!((0.5..1.0).contains(&star.speed));
            assert!((0.3..1.0).contains(&star.opacity));
        }
    }
}
