//! The per-frame draw and update sequence.

use rand::{SeedableRng, rngs::StdRng};
use starwake_core::Surface;

use crate::entities::{
    black_hole::{self, BlackHole},
    meteor::{self, Meteor},
    star::{self, Star},
};
use crate::lensing;
use crate::raster::Raster;

/// Pool sizes for a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneCounts {
    pub stars: usize,
    pub meteors: usize,
    pub black_holes: usize,
}

impl Default for SceneCounts {
    fn default() -> Self {
        Self {
            stars: 800,
            meteors: 15,
            black_holes: 2,
        }
    }
}

/// All animated entities plus the randomness that drives them.
#[derive(Debug)]
pub struct Scene {
    stars: Vec<Star>,
    meteors: Vec<Meteor>,
    black_holes: Vec<BlackHole>,
    surface: Surface,
    rng: StdRng,
    frames: u64,
}

impl Scene {
    /// Populate a scene with entropy-seeded randomness.
    pub fn new(surface: Surface, counts: SceneCounts) -> Self {
        Self::populate(surface, counts, StdRng::from_entropy())
    }

    /// Populate a scene deterministically.
    pub fn with_seed(surface: Surface, counts: SceneCounts, seed: u64) -> Self {
        Self::populate(surface, counts, StdRng::seed_from_u64(seed))
    }

    /// Build a scene from existing entities.
    pub fn from_entities(
        surface: Surface,
        stars: Vec<Star>,
        meteors: Vec<Meteor>,
        black_holes: Vec<BlackHole>,
        seed: u64,
    ) -> Self {
        Self {
            stars,
            meteors,
            black_holes,
            surface,
            rng: StdRng::seed_from_u64(seed),
            frames: 0,
        }
    }

    fn populate(surface: Surface, counts: SceneCounts, mut rng: StdRng) -> Self {
        let stars = (0..counts.stars)
            .map(|_| Star::spawn(&mut rng, surface))
            .collect();
        let meteors = (0..counts.meteors)
            .map(|_| Meteor::spawn(&mut rng, surface))
            .collect();
        let black_holes = (0..counts.black_holes)
            .map(|_| BlackHole::spawn(&mut rng, surface))
            .collect();

        log::debug!(
            "populated scene {}x{}: {} stars, {} meteors, {} black holes",
            surface.width,
            surface.height,
            counts.stars,
            counts.meteors,
            counts.black_holes
        );

        Self {
            stars,
            meteors,
            black_holes,
            surface,
            rng,
            frames: 0,
        }
    }

    /// Render and advance one frame.
    ///
    /// Ring dots are drawn with the angle from before this frame's swirl
    /// increment.
    pub fn frame(&mut self, raster: &mut Raster) {
        raster.clear();

        star::draw(&self.stars, raster);
        meteor::draw(&self.meteors, raster);
        black_hole::draw(&mut self.black_holes, raster);

        star::update(&mut self.stars, self.surface, &mut self.rng);
        meteor::update(&mut self.meteors, self.surface, &mut self.rng);
        lensing::apply(&self.black_holes, &mut self.stars, &mut self.rng);

        self.frames += 1;
    }

    /// Change the surface size. Entities keep their positions and settle
    /// into the new bounds through their normal update rules.
    pub fn resize(&mut self, surface: Surface) {
        log::debug!("scene resized to {}x{}", surface.width, surface.height);
        self.surface = surface;
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    pub fn black_holes(&self) -> &[BlackHole] {
        &self.black_holes
    }

    /// Frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
