//! Configuration for starwake.
//!
//! Settings live in `config.toml` inside the platform configuration
//! directory. A missing file means defaults; unknown keys are ignored and
//! missing keys fall back to their default value.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{WrapErr, eyre};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use starwake_core::{AnimationSpeed, ColorTheme};

const CONFIG_FILE: &str = "config.toml";

/// Default header text typed out on start-up.
pub const DEFAULT_WELCOME_TEXT: &str = "Welcome to the Future of AI & Data Science!";

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing file.
    File(PathBuf),
    /// No file at this path; defaults were used.
    Defaults(PathBuf),
    /// No home directory to look in; defaults were used.
    NoHomeDir,
}

impl ConfigSource {
    /// Classify a candidate config path.
    pub fn detect(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if path.exists() => Self::File(path),
            Some(path) => Self::Defaults(path),
            None => Self::NoHomeDir,
        }
    }

    /// Path to write the configuration back to, if there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) | Self::Defaults(path) => Some(path),
            Self::NoHomeDir => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "loaded config from {}", path.display()),
            Self::Defaults(path) => {
                write!(f, "config file {} not found, using defaults", path.display())
            }
            Self::NoHomeDir => write!(f, "no home directory, using default configuration"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of stars in the field.
    pub star_count: usize,
    /// Number of meteors crossing the field.
    pub meteor_count: usize,
    /// Number of black holes.
    pub black_hole_count: usize,
    /// Header text revealed by the typing effect.
    pub welcome_text: String,
    /// Delay between two typed characters.
    pub typing_interval_ms: u64,
    /// Section links shown in the navigation bar.
    pub links: Vec<String>,
    /// Frame rate preset.
    pub speed: AnimationSpeed,
    /// Header and navigation color.
    pub color_theme: ColorTheme,
    /// Width of one terminal cell in surface pixels.
    pub cell_width: u16,
    /// Height of one terminal cell in surface pixels.
    pub cell_height: u16,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            star_count: 800,
            meteor_count: 15,
            black_hole_count: 2,
            welcome_text: DEFAULT_WELCOME_TEXT.to_string(),
            typing_interval_ms: 100,
            links: ["Home", "About", "Projects", "Contact"]
                .into_iter()
                .map(String::from)
                .collect(),
            speed: AnimationSpeed::default(),
            color_theme: ColorTheme::default(),
            cell_width: 8,
            cell_height: 16,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Platform directories for starwake, if a home directory exists.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "starwake")
    }

    /// Path of the configuration file.
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load the configuration from the default location.
    ///
    /// Runs before logging is set up, so the source is returned for the
    /// caller to report.
    pub fn load() -> color_eyre::Result<(Self, ConfigSource)> {
        let source = ConfigSource::detect(Self::config_path());
        let config = match source.path() {
            Some(path) => Self::load_from(path)?,
            None => Self::default(),
        };
        Ok((config, source))
    }

    /// Load the configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> color_eyre::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err_with(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).wrap_err("failed to serialize config")?;
        fs::write(path, contents)
            .wrap_err_with(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Reject values the renderer cannot work with.
    fn validate(&self) -> color_eyre::Result<()> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(eyre!("cell_width and cell_height must be non-zero"));
        }
        if self.typing_interval_ms == 0 {
            return Err(eyre!("typing_interval_ms must be non-zero"));
        }
        Ok(())
    }
}
