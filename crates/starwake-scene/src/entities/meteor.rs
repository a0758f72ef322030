//! Meteors with fading tails.

use std::f32::consts::TAU;

use rand::Rng;
use starwake_core::{Rgba, Surface};

use super::random_coord;
use crate::raster::Raster;

/// Stroke width of a meteor tail in pixels.
pub const TAIL_WIDTH: f32 = 3.0;

/// A single meteor.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    pub x: f32,
    pub y: f32,
    /// Pixels travelled per frame.
    pub speed: f32,
    /// Tail length in pixels.
    pub length: f32,
    /// Head alpha; values above 1 draw fully opaque.
    pub opacity: f32,
    /// Direction of travel in radians.
    pub angle: f32,
}

impl Meteor {
    /// Spawn a meteor at a random position with a random heading.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, surface: Surface) -> Self {
        Self {
            x: random_coord(rng, surface.width),
            y: random_coord(rng, surface.height),
            speed: rng.gen_range(3.0..6.0),
            length: rng.gen_range(15.0..40.0),
            opacity: rng.gen_range(0.3..1.1),
            angle: rng.gen_range(0.0..TAU),
        }
    }

    /// End of the tail, projected backward along the heading.
    pub fn tail(&self) -> (f32, f32) {
        (
            self.x - self.angle.cos() * self.length,
            self.y - self.angle.sin() * self.length,
        )
    }
}

/// Draw every meteor as a line fading from its head to its tail.
pub fn draw(meteors: &[Meteor], raster: &mut Raster) {
    for meteor in meteors {
        raster.stroke_gradient_line(
            (meteor.x, meteor.y),
            meteor.tail(),
            TAIL_WIDTH,
            Rgba::white(1.0).with_alpha(meteor.opacity),
            Rgba::white(0.0),
        );
    }
}

/// Advance meteors along their heading. A meteor that leaves the surface
/// reappears at a random position.
pub fn update<R: Rng + ?Sized>(meteors: &mut [Meteor], surface: Surface, rng: &mut R) {
    for meteor in meteors {
        meteor.x += meteor.angle.cos() * meteor.speed;
        meteor.y += meteor.angle.sin() * meteor.speed;

        if !surface.contains(meteor.x, meteor.y) {
            meteor.x = random_coord(rng, surface.width);
            meteor.y = random_coord(rng, surface.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn meteor(x: f32, y: f32, angle: f32, speed: f32) -> Meteor {
        Meteor {
            x,
            y,
            speed,
            length: 20.0,
            opacity: 0.8,
            angle,
        }
    }

    #[test]
    fn test_meteor_moves_along_angle() {
        let surface = Surface::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut meteors = vec![meteor(100.0, 100.0, 0.0, 5.0)];

        update(&mut meteors, surface, &mut rng);

        assert!((meteors[0].x - 105.0).abs() < 1e-4);
        assert!((meteors[0].y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_meteor_leaving_is_repositioned() {
        let surface = Surface::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut meteors = vec![
            meteor(798.0, 300.0, 0.0, 5.0),
            meteor(2.0, 300.0, std::f32::consts::PI, 5.0),
            meteor(400.0, 1.0, -std::f32::consts::FRAC_PI_2, 5.0),
            meteor(400.0, 598.0, std::f32::consts::FRAC_PI_2, 5.0),
        ];

        update(&mut meteors, surface, &mut rng);

        for m in &meteors {
            assert!((0.0..800.0).contains(&m.x));
            assert!((0.0..600.0).contains(&m.y));
        }
    }

    #[test]
    fn test_meteors_stay_in_bounds() {
        let surface = Surface::new(400.0, 240.0);
        let mut rng = StdRng::seed_from_u64(11);
        let mut meteors: Vec<Meteor> = (0..50).map(|_| Meteor::spawn(&mut rng, surface)).collect();

        for _ in 0..300 {
            update(&mut meteors, surface, &mut rng);
            assert!(meteors.iter().all(|m| surface.contains(m.x, m.y)));
        }
    }

    #[test]
    fn test_tail_points_backward() {
        let m = meteor(100.0, 50.0, 0.0, 4.0);
        let (tx, ty) = m.tail();
        assert!((tx - 80.0).abs() < 1e-4);
        assert!((ty - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_ranges() {
        let surface = Surface::new(640.0, 480.0);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let m = Meteor::spawn(&mut rng, surface);
            assert!((0.0..640.0).contains(&m.x));
            assert!((0.0..480.0).contains(&m.y));
            assert!((3.0..6.0).contains(&m.speed));
            assert!((15.0..40.0).contains(&m.length));
            assert!((0.3..1.1).contains(&m.opacity));
            assert!((0.0..TAU).contains(&m.angle));
        }
    }
}
