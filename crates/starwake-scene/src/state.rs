//! Background animation state management.

use ratatui::{Frame, widgets::Paragraph};
use starwake_core::Surface;

use crate::raster::Raster;
use crate::scene::{Scene, SceneCounts};

/// Settings fixed for the lifetime of a background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundSettings {
    /// Entity pool sizes.
    pub counts: SceneCounts,
    /// Width of one terminal cell in surface pixels.
    pub cell_width: u16,
    /// Height of one terminal cell in surface pixels.
    pub cell_height: u16,
    /// Fixed seed for reproducible scenes.
    pub seed: Option<u64>,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            counts: SceneCounts::default(),
            cell_width: 8,
            cell_height: 16,
            seed: None,
        }
    }
}

/// Cosmic background state.
///
/// The scene is created on the first render, once the terminal size is
/// known, and kept across resizes.
#[derive(Debug)]
pub struct BackgroundState {
    settings: BackgroundSettings,
    scene: Option<Scene>,
    raster: Raster,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
}

impl Default for BackgroundState {
    fn default() -> Self {
        Self::new(BackgroundSettings::default())
    }
}

impl BackgroundState {
    /// Create a new background state.
    pub fn new(settings: BackgroundSettings) -> Self {
        Self {
            settings,
            scene: None,
            raster: Raster::new(0, 0, settings.cell_width, settings.cell_height),
            last_width: 0,
            last_height: 0,
        }
    }

    /// The scene, once the first frame has been rendered.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Surface for a terminal area of the given size.
    fn surface_for(&self, width: u16, height: u16) -> Surface {
        Surface::from_cells(
            width,
            height,
            self.settings.cell_width,
            self.settings.cell_height,
        )
    }

    /// Advance the scene by one frame and render it to the whole frame.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let width = area.width;
        let height = area.height;

        let dimensions_changed = width != self.last_width || height != self.last_height;
        if dimensions_changed {
            self.raster.resize(width, height);
            self.last_width = width;
            self.last_height = height;
        }

        let surface = self.surface_for(width, height);
        if let Some(scene) = self.scene.as_mut()
            && dimensions_changed
        {
            scene.resize(surface);
        }

        let settings = self.settings;
        let scene = self.scene.get_or_insert_with(|| match settings.seed {
            Some(seed) => Scene::with_seed(surface, settings.counts, seed),
            None => Scene::new(surface, settings.counts),
        });

        scene.frame(&mut self.raster);

        frame.render_widget(Paragraph::new(self.raster.to_lines()), area);
    }
}
