//! Overlay settings resource.
//!
//! Loaded from an INI file with safe defaults, and replaceable at runtime
//! when the host pushes a settings update.
//!
//! # Configuration File Format
//!
//! ```ini
//! [overlay]
//! width = 1920
//! height = 1080
//! falling_evotars = true
//! falling_raiders = true
//! show_anonymous_evotars = false
//! max_evotars = 20
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::{Path, PathBuf};

/// Default safe values for startup
const DEFAULT_STAGE_WIDTH: f32 = 1920.0;
const DEFAULT_STAGE_HEIGHT: f32 = 1080.0;
const DEFAULT_FALLING_EVOTARS: bool = false;
const DEFAULT_FALLING_RAIDERS: bool = false;
const DEFAULT_SHOW_ANONYMOUS: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./overlay.ini";

#[derive(Resource, Debug, Clone)]
pub struct OverlaySettings {
    pub stage_width: f32,
    pub stage_height: f32,
    /// First-time chatters drop in from the sky instead of fading in.
    pub falling_evotars: bool,
    /// Raids spawn a wave of falling guests.
    pub falling_raiders: bool,
    /// Materialize lurkers from the chatters snapshot as anonymous evotars.
    pub show_anonymous_evotars: bool,
    /// Hard cap on simultaneous viewer evotars; oldest are evicted first.
    /// `None` means unbounded.
    pub max_evotars: Option<usize>,
    pub config_path: PathBuf,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySettings {
    /// Create settings with safe default values.
    pub fn new() -> Self {
        Self {
            stage_width: DEFAULT_STAGE_WIDTH,
            stage_height: DEFAULT_STAGE_HEIGHT,
            falling_evotars: DEFAULT_FALLING_EVOTARS,
            falling_raiders: DEFAULT_FALLING_RAIDERS,
            show_anonymous_evotars: DEFAULT_SHOW_ANONYMOUS,
            max_evotars: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load settings from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let path: &Path = &self.config_path;
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|e| format!("Failed to load settings file: {}", e))?;

        if let Some(width) = config.getuint("overlay", "width").ok().flatten() {
            self.stage_width = width as f32;
        }
        if let Some(height) = config.getuint("overlay", "height").ok().flatten() {
            self.stage_height = height as f32;
        }
        if let Some(v) = config.getbool("overlay", "falling_evotars").ok().flatten() {
            self.falling_evotars = v;
        }
        if let Some(v) = config.getbool("overlay", "falling_raiders").ok().flatten() {
            self.falling_raiders = v;
        }
        if let Some(v) = config
            .getbool("overlay", "show_anonymous_evotars")
            .ok()
            .flatten()
        {
            self.show_anonymous_evotars = v;
        }
        if let Some(max) = config.getuint("overlay", "max_evotars").ok().flatten() {
            self.max_evotars = if max == 0 { None } else { Some(max as usize) };
        }

        info!(
            "Loaded settings: stage {}x{}, falling_evotars={}, falling_raiders={}, show_anonymous={}, max_evotars={:?}",
            self.stage_width,
            self.stage_height,
            self.falling_evotars,
            self.falling_raiders,
            self.show_anonymous_evotars,
            self.max_evotars
        );

        Ok(())
    }
}
