//! Cosmic background animation for the starwake header.
//!
//! A [`Scene`] owns pools of stars, meteors and black holes and advances
//! them one frame at a time, drawing into a [`Raster`] that renders as
//! braille glyphs. [`BackgroundState`] ties both to a ratatui frame.

pub mod entities;
pub mod lensing;
mod raster;
mod scene;
mod state;

pub use entities::{black_hole::BlackHole, meteor::Meteor, star::Star};
pub use raster::Raster;
pub use scene::{Scene, SceneCounts};
pub use state::{BackgroundSettings, BackgroundState};
