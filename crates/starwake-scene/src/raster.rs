//! Sub-cell pixel buffer rendered as braille glyphs.
//!
//! Every terminal cell holds a 2x4 grid of dots, matching the braille
//! pattern layout. Drawing happens in surface pixels; a dot covers
//! `cell_width / 2` by `cell_height / 4` pixels.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use starwake_core::{Rgba, Surface};

const DOTS_X: usize = 2;
const DOTS_Y: usize = 4;

/// Braille bit for the dot at `[row][column]` inside a cell.
const BRAILLE_BITS: [[u32; DOTS_X]; DOTS_Y] =
    [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

const BRAILLE_BASE: u32 = 0x2800;

/// Dots dimmer than this stay blank.
const LIT_THRESHOLD: f32 = 0.08;

/// RGBA pixel buffer covering the terminal.
#[derive(Debug, Clone)]
pub struct Raster {
    cols: u16,
    rows: u16,
    cell_width: u16,
    cell_height: u16,
    pixels: Vec<Rgba>,
}

impl Raster {
    /// Create a cleared raster for a `cols` x `rows` cell area.
    pub fn new(cols: u16, rows: u16, cell_width: u16, cell_height: u16) -> Self {
        let mut raster = Self {
            cols: 0,
            rows: 0,
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
            pixels: Vec::new(),
        };
        raster.resize(cols, rows);
        raster
    }

    /// Resize to a new cell area; the contents are cleared.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.pixels = vec![Rgba::TRANSPARENT; self.dots_wide() * self.dots_high()];
    }

    /// The surface covered by this raster, in pixels.
    pub fn surface(&self) -> Surface {
        Surface::from_cells(self.cols, self.rows, self.cell_width, self.cell_height)
    }

    fn dots_wide(&self) -> usize {
        self.cols as usize * DOTS_X
    }

    fn dots_high(&self) -> usize {
        self.rows as usize * DOTS_Y
    }

    fn dot_width(&self) -> f32 {
        self.cell_width as f32 / DOTS_X as f32
    }

    fn dot_height(&self) -> f32 {
        self.cell_height as f32 / DOTS_Y as f32
    }

    /// Color of the dot at the given dot coordinates.
    pub fn dot(&self, dx: usize, dy: usize) -> Option<Rgba> {
        if dx >= self.dots_wide() || dy >= self.dots_high() {
            return None;
        }
        self.pixels.get(dy * self.dots_wide() + dx).copied()
    }

    /// Color of the dot containing the surface point `(x, y)`.
    pub fn pixel_at(&self, x: f32, y: f32) -> Option<Rgba> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let dx = (x / self.dot_width()) as usize;
        let dy = (y / self.dot_height()) as usize;
        self.dot(dx, dy)
    }

    /// Reset every dot to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    fn blend(&mut self, dx: usize, dy: usize, color: Rgba) {
        let width = self.dots_wide();
        if let Some(px) = self.pixels.get_mut(dy * width + dx) {
            *px = color.over(*px);
        }
    }

    /// Dot index range covering `[lo, hi]` pixels on one axis, clipped.
    fn dot_span(lo: f32, hi: f32, dot_size: f32, dots: usize) -> Option<(usize, usize)> {
        if dots == 0 {
            return None;
        }
        let first = (lo / dot_size).floor() as i64;
        let last = (hi / dot_size).floor() as i64;
        if last < 0 || first >= dots as i64 {
            return None;
        }
        Some((first.max(0) as usize, last.min(dots as i64 - 1) as usize))
    }

    /// Fill a circle. Circles smaller than a dot still light the dot
    /// holding their center.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if color.a <= 0.0 {
            return;
        }
        let (dot_w, dot_h) = (self.dot_width(), self.dot_height());
        let Some((x0, x1)) = Self::dot_span(cx - radius, cx + radius, dot_w, self.dots_wide())
        else {
            return;
        };
        let Some((y0, y1)) = Self::dot_span(cy - radius, cy + radius, dot_h, self.dots_high())
        else {
            return;
        };

        let center_dot = ((cx / dot_w).floor() as i64, (cy / dot_h).floor() as i64);
        let r2 = radius * radius;

        for dy in y0..=y1 {
            for dx in x0..=x1 {
                let px = (dx as f32 + 0.5) * dot_w - cx;
                let py = (dy as f32 + 0.5) * dot_h - cy;
                let inside = px * px + py * py <= r2 || (dx as i64, dy as i64) == center_dot;
                if inside {
                    self.blend(dx, dy, color);
                }
            }
        }
    }

    /// Stroke a line whose color fades linearly from `head` at `from` to
    /// `tail` at `to`. Each dot is blended at most once.
    pub fn stroke_gradient_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        head: Rgba,
        tail: Rgba,
    ) {
        let (dot_w, dot_h) = (self.dot_width(), self.dot_height());
        let reach = (width / 2.0).max(dot_w.min(dot_h) / 2.0);

        let Some((x0, x1)) = Self::dot_span(
            from.0.min(to.0) - reach,
            from.0.max(to.0) + reach,
            dot_w,
            self.dots_wide(),
        ) else {
            return;
        };
        let Some((y0, y1)) = Self::dot_span(
            from.1.min(to.1) - reach,
            from.1.max(to.1) + reach,
            dot_h,
            self.dots_high(),
        ) else {
            return;
        };

        let (vx, vy) = (to.0 - from.0, to.1 - from.1);
        let len2 = vx * vx + vy * vy;

        for dy in y0..=y1 {
            for dx in x0..=x1 {
                let px = (dx as f32 + 0.5) * dot_w;
                let py = (dy as f32 + 0.5) * dot_h;
                let t = if len2 > 0.0 {
                    (((px - from.0) * vx + (py - from.1) * vy) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (nx, ny) = (from.0 + vx * t, from.1 + vy * t);
                let dist2 = (px - nx).powi(2) + (py - ny).powi(2);
                if dist2 <= reach * reach {
                    self.blend(dx, dy, head.lerp(tail, t));
                }
            }
        }
    }

    /// Convert the buffer into styled lines, one braille glyph per cell.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        (0..self.rows as usize)
            .map(|row| {
                let spans: Vec<Span> = (0..self.cols as usize)
                    .map(|col| self.cell_span(col, row))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn cell_span(&self, col: usize, row: usize) -> Span<'static> {
        let mut bits = 0u32;
        let mut lit = 0u32;
        let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);

        for (j, bit_row) in BRAILLE_BITS.iter().enumerate() {
            for (i, bit) in bit_row.iter().enumerate() {
                let Some(px) = self.dot(col * DOTS_X + i, row * DOTS_Y + j) else {
                    continue;
                };
                if px.luminance() > LIT_THRESHOLD {
                    bits |= bit;
                    lit += 1;
                    let a = px.a.clamp(0.0, 1.0);
                    r += px.r as f32 * a;
                    g += px.g as f32 * a;
                    b += px.b as f32 * a;
                }
            }
        }

        if lit == 0 {
            return Span::raw(" ");
        }

        let ch = char::from_u32(BRAILLE_BASE + bits).unwrap_or('.');
        let n = lit as f32;
        let color = Color::Rgb((r / n) as u8, (g / n) as u8, (b / n) as u8);
        Span::styled(ch.to_string(), Style::new().fg(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(raster: &Raster, x: f32, y: f32) -> bool {
        raster
            .pixel_at(x, y)
            .is_some_and(|px| px.luminance() > LIT_THRESHOLD)
    }

    #[test]
    fn test_surface_matches_cells() {
        let raster = Raster::new(10, 5, 8, 16);
        assert_eq!(raster.surface(), Surface::new(80.0, 80.0));
    }

    #[test]
    fn test_tiny_circle_lights_center_dot() {
        let mut raster = Raster::new(10, 5, 8, 16);
        raster.fill_circle(21.0, 33.0, 1.0, Rgba::white(0.9));
        assert!(lit(&raster, 21.0, 33.0));
        assert!(!lit(&raster, 40.0, 33.0));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut raster = Raster::new(4, 2, 8, 16);
        raster.fill_circle(10.0, 10.0, 30.0, Rgba::white(1.0));
        raster.clear();
        for dy in 0..8 {
            for dx in 0..8 {
                assert_eq!(raster.dot(dx, dy), Some(Rgba::TRANSPARENT));
            }
        }
    }

    #[test]
    fn test_opaque_black_hides_what_is_below() {
        let mut raster = Raster::new(10, 5, 8, 16);
        raster.fill_circle(40.0, 40.0, 2.0, Rgba::white(0.9));
        raster.fill_circle(40.0, 40.0, 20.0, Rgba::BLACK);
        assert!(!lit(&raster, 40.0, 40.0));
    }

    #[test]
    fn test_circle_outside_surface_is_clipped() {
        let mut raster = Raster::new(4, 2, 8, 16);
        raster.fill_circle(-100.0, -100.0, 5.0, Rgba::white(1.0));
        raster.fill_circle(500.0, 10.0, 5.0, Rgba::white(1.0));
        assert!(
            raster
                .to_lines()
                .iter()
                .all(|line| line.to_string().trim().is_empty())
        );
    }

    #[test]
    fn test_gradient_line_fades_toward_tail() {
        let mut raster = Raster::new(20, 2, 8, 16);
        raster.stroke_gradient_line(
            (150.0, 10.0),
            (10.0, 10.0),
            3.0,
            Rgba::white(1.0),
            Rgba::white(0.0),
        );
        let head = raster.pixel_at(148.0, 10.0).unwrap();
        let tail = raster.pixel_at(12.0, 10.0).unwrap();
        assert!(head.a > tail.a);
        assert!(lit(&raster, 80.0, 10.0));
    }

    #[test]
    fn test_to_lines_uses_braille() {
        let mut raster = Raster::new(2, 1, 8, 16);
        raster.fill_circle(2.0, 2.0, 1.0, Rgba::white(1.0));
        let lines = raster.to_lines();
        assert_eq!(lines.len(), 1);
        let text = lines[0].to_string();
        assert_eq!(text.chars().next(), Some('\u{2801}'));
        assert_eq!(text.chars().nth(1), Some(' '));
    }

    #[test]
    fn test_zero_sized_raster() {
        let mut raster = Raster::new(0, 0, 8, 16);
        raster.fill_circle(0.0, 0.0, 5.0, Rgba::white(1.0));
        raster.stroke_gradient_line(
            (0.0, 0.0),
            (5.0, 5.0),
            3.0,
            Rgba::white(1.0),
            Rgba::white(0.0),
        );
        assert!(raster.to_lines().is_empty());
    }
}
