//! Navigation bar with a single active link.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
};

const SEPARATOR: &str = "  ";

/// An in-page section link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    /// Section anchor, e.g. `#about`.
    pub anchor: String,
    pub active: bool,
}

impl NavLink {
    fn new(label: &str) -> Self {
        let slug: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        Self {
            label: label.to_string(),
            anchor: format!("#{slug}"),
            active: false,
        }
    }
}

/// Navigation links plus the screen areas they were last drawn in.
#[derive(Debug, Clone, Default)]
pub struct NavBar {
    links: Vec<NavLink>,
    /// Visible part of each drawn label, keyed by link index.
    hitboxes: Vec<(usize, Rect)>,
}

impl NavBar {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        Self {
            links: labels.iter().map(|l| NavLink::new(l.as_ref())).collect(),
            hitboxes: Vec::new(),
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Index of the active link.
    pub fn active(&self) -> Option<usize> {
        self.links.iter().position(|link| link.active)
    }

    /// Make `index` the only active link. Out of range indices are ignored.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.links.len() {
            return false;
        }
        for link in &mut self.links {
            link.active = false;
        }
        self.links[index].active = true;
        log::info!("activated link {}", self.links[index].anchor);
        true
    }

    /// Activate the link after the active one, wrapping around.
    pub fn select_next(&mut self) {
        if self.links.is_empty() {
            return;
        }
        let next = match self.active() {
            Some(i) => (i + 1) % self.links.len(),
            None => 0,
        };
        self.activate(next);
    }

    /// Activate the link before the active one, wrapping around.
    pub fn select_previous(&mut self) {
        if self.links.is_empty() {
            return;
        }
        let len = self.links.len();
        let previous = match self.active() {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        self.activate(previous);
    }

    /// Activate the link drawn at the given terminal cell.
    pub fn click(&mut self, column: u16, row: u16) -> Option<usize> {
        let (index, _) = self.hitboxes.iter().copied().find(|(_, r)| {
            row >= r.y && row < r.y + r.height && column >= r.x && column < r.x + r.width
        })?;
        self.activate(index).then_some(index)
    }

    fn link_style(link: &NavLink, color: Color) -> Style {
        if link.active {
            Style::new().fg(Color::Black).bg(color).bold()
        } else {
            Style::new().fg(color)
        }
    }

    /// Render the links centered in `area`, remembering where each landed.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, color: Color) {
        let labels: Vec<Span> = self
            .links()
            .iter()
            .map(|link| Span::styled(format!(" {} ", link.label), Self::link_style(link, color)))
            .collect();

        let separators = labels.len().saturating_sub(1) * SEPARATOR.len();
        let total = (labels.iter().map(Span::width).sum::<usize>() + separators) as i32;

        // A centered line wider than the area loses half the overflow on
        // the left, so the row can start before `area.x`.
        let left = area.x as i32;
        let right = left + area.width as i32;
        let mut x = left + (area.width as i32 - total) / 2;

        self.hitboxes.clear();
        let mut spans = Vec::with_capacity(labels.len() * 2);
        for (i, label) in labels.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(SEPARATOR));
                x += SEPARATOR.len() as i32;
            }
            let width = label.width() as i32;
            let start = x.max(left);
            let end = (x + width).min(right);
            if start < end {
                let hitbox = Rect::new(start as u16, area.y, (end - start) as u16, 1);
                self.hitboxes.push((i, hitbox));
            }
            x += width;
            spans.push(label);
        }

        frame.render_widget(Line::from(spans).centered(), area);
    }
}
