use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};
use starwake_config::Config;
use starwake_core::{AnimationSpeed, ColorTheme};
use starwake_scene::{BackgroundSettings, BackgroundState, SceneCounts};

mod logging;
mod nav;
mod ticker;
mod typing;

use nav::NavBar;
use ticker::{CancelHandle, FrameTicker};
use typing::TypingEffect;

/// Shown after the typed text until typing completes.
const TYPING_CURSOR: &str = "▌";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let (config, source) = Config::load()?;
    if let Some(path) = logging::init(&config.log_level) {
        log::info!("logging to {}", path.display());
    }
    log::info!("{source}");
    let config_path = source.path().map(PathBuf::from);

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .map_err(color_eyre::Report::from)
        .and_then(|()| App::new(config).with_config_path(config_path).run(terminal));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Animated cosmic background.
    background: BackgroundState,
    /// Welcome header typing effect.
    typing: TypingEffect,
    /// Section links.
    nav: NavBar,
    /// Frame scheduling; cancelled to quit.
    ticker: FrameTicker,
    /// Current animation speed.
    speed: AnimationSpeed,
    /// Current color theme.
    color_theme: ColorTheme,
    /// When the typing effect started.
    started: Instant,
    /// Configuration the app was started with.
    config: Config,
    /// Where `w` writes the current settings.
    config_path: Option<PathBuf>,
}

impl App {
    /// Construct a new instance of [`App`] from the loaded configuration.
    pub fn new(config: Config) -> Self {
        let settings = BackgroundSettings {
            counts: SceneCounts {
                stars: config.star_count,
                meteors: config.meteor_count,
                black_holes: config.black_hole_count,
            },
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            seed: None,
        };
        let now = Instant::now();

        Self {
            background: BackgroundState::new(settings),
            typing: TypingEffect::new(
                &config.welcome_text,
                Duration::from_millis(config.typing_interval_ms),
            ),
            nav: NavBar::new(config.links.as_slice()),
            ticker: FrameTicker::new(
                Duration::from_millis(config.speed.frame_interval_ms()),
                now,
            ),
            speed: config.speed,
            color_theme: config.color_theme,
            started: now,
            config,
            config_path: None,
        }
    }

    /// Set the file that `w` saves settings to.
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Handle that stops the animation loop.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.ticker.handle()
    }

    /// Run the application's main loop until cancelled.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        log::info!("starting animation at {} speed", self.speed.label());
        while self.ticker.is_running() {
            if self.ticker.poll_frame(Instant::now()) {
                self.typing.advance(self.started.elapsed());
                terminal.draw(|frame| self.render(frame))?;
            }
            let timeout = self.ticker.time_until_next(Instant::now());
            self.handle_crossterm_events(timeout)?;
        }
        log::info!("animation loop cancelled");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        self.background.render(frame);

        let color = self.color_theme.color();
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Header
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Navigation
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let mut header = self.typing.typed().to_string();
        if !self.typing.is_done() {
            header.push_str(TYPING_CURSOR);
        }
        let header = Paragraph::new(header)
            .style(Style::new().fg(color).bold())
            .alignment(Alignment::Center);
        frame.render_widget(header, chunks[1]);

        self.nav.render(frame, chunks[3], color);

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "1-9/tab".bold().fg(color),
            " select  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color  ".dark_gray(),
            "s".bold().fg(color),
            " speed  ".dark_gray(),
            "w".bold().fg(color),
            " save".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[5]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame is not delayed.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => {
                    log::info!("terminal resized to {width}x{height}");
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Tab) => self.nav.select_next(),
            (_, KeyCode::BackTab) => self.nav.select_previous(),
            (_, KeyCode::Char(c @ '1'..='9')) => {
                let index = c as usize - '1' as usize;
                self.nav.activate(index);
            }
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('w')) => self.save_settings(),
            _ => {}
        }
    }

    /// Activates a link on left click.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            self.nav.click(mouse.column, mouse.row);
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
    }

    /// Cycle through animation speeds.
    fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
        self.ticker
            .set_interval(Duration::from_millis(self.speed.frame_interval_ms()));
        log::info!(
            "animation speed set to {} ({:?} per frame)",
            self.speed.label(),
            self.ticker.interval()
        );
    }

    /// The start-up configuration with the current theme and speed.
    fn settings_snapshot(&self) -> Config {
        Config {
            speed: self.speed,
            color_theme: self.color_theme,
            ..self.config.clone()
        }
    }

    /// Write the current theme and speed to the config file. Failures are
    /// logged; the animation keeps running.
    fn save_settings(&mut self) {
        let Some(path) = self.config_path.as_deref() else {
            log::warn!("no config path, settings not saved");
            return;
        };
        let snapshot = self.settings_snapshot();
        match snapshot.save_to(path) {
            Ok(()) => {
                log::info!("saved settings to {}", path.display());
                self.config = snapshot;
            }
            Err(err) => log::error!("failed to save settings: {err:#}"),
        }
    }

    /// Cancel the frame loop to quit the application.
    fn quit(&mut self) {
        self.cancel_handle().cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App {
        App::new(Config {
            star_count: 50,
            welcome_text: "Hi there".to_string(),
            ..Default::default()
        })
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_quit_cancels_loop() {
        let mut app = app();
        let handle = app.cancel_handle();
        press(&mut app, KeyCode::Char('q'));
        assert!(handle.is_cancelled());
        assert!(!app.ticker.is_running());
    }

    #[test]
    fn test_ctrl_c_cancels_loop() {
        let mut app = app();
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.ticker.is_running());
        assert_eq!(app.color_theme, ColorTheme::default());
    }

    #[test]
    fn test_number_keys_select_links() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.nav.active(), Some(1));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.nav.active(), Some(2));
        assert!(!app.nav.links()[1].active);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.nav.active(), Some(2));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.nav.active(), Some(3));
    }

    #[test]
    fn test_speed_changes_frame_interval() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.speed, AnimationSpeed::Fast);
        assert_eq!(
            app.ticker.interval(),
            Duration::from_millis(AnimationSpeed::Fast.frame_interval_ms())
        );
    }

    #[test]
    fn test_snapshot_carries_current_settings() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('s'));

        let snapshot = app.settings_snapshot();
        assert_eq!(snapshot.color_theme, ColorTheme::default().next());
        assert_eq!(snapshot.speed, AnimationSpeed::Fast);
        assert_eq!(snapshot.star_count, 50);
        assert_eq!(snapshot.welcome_text, "Hi there");
    }

    #[test]
    fn test_save_key_writes_config() {
        let dir = std::env::temp_dir().join(format!("starwake-app-save-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut saving = app().with_config_path(Some(path.clone()));
        press(&mut saving, KeyCode::Char('c'));
        press(&mut saving, KeyCode::Char('w'));

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.color_theme, saving.color_theme);
        assert_eq!(saved.star_count, 50);
        let _ = std::fs::remove_dir_all(&dir);

        // Without a path the key is a no-op.
        let mut app = app();
        press(&mut app, KeyCode::Char('w'));
        assert!(app.ticker.is_running());
    }

    #[test]
    fn test_render_shows_header_and_links() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = app();

        app.typing.advance(Duration::from_millis(200));
        terminal.draw(|frame| app.render(frame)).unwrap();
        let partial = screen(&terminal);
        assert!(partial.contains("Hi"));
        assert!(partial.contains(TYPING_CURSOR));
        assert!(!partial.contains("Hi there"));

        app.typing.advance(Duration::from_secs(5));
        terminal.draw(|frame| app.render(frame)).unwrap();
        let done = screen(&terminal);
        assert!(done.contains("Hi there"));
        assert!(done.contains(" About "));
        assert!(done.contains("quit"));
    }

    #[test]
    fn test_click_activates_link() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = app();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let (column, row) = (0..24u16)
            .flat_map(|y| (0..80u16).map(move |x| (x, y)))
            .find(|&(x, y)| buffer[(x, y)].symbol() == "P")
            .unwrap();

        app.on_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.nav.active(), Some(2));
    }
}
