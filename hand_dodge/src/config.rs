//! Configuration: a TOML file with every field defaulted, overridable from
//! the command line.
//!
//! ```toml
//! seed = 7
//!
//! [window]
//! width = 800
//! height = 600
//! preview_width = 200
//!
//! [camera]
//! mode = "udp"
//! feed_addr = "127.0.0.1:5005"
//! frame_timeout_ms = 8
//!
//! [snapshots]
//! enabled = true
//! dir = "screenshots"
//!
//! [logging]
//! level = "info"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

// ════════════════════════════════════════════════════════════════════════════
// GameConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Obstacle RNG seed; a fresh random seed when absent.
    pub seed:      Option<u64>,
    pub window:    WindowConfig,
    pub camera:    CameraConfig,
    pub snapshots: SnapshotConfig,
    pub logging:   LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width:         usize,
    pub height:        usize,
    /// Camera panel on the right; the play area is `width - preview_width`.
    pub preview_width: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig { width: 800, height: 600, preview_width: 200 }
    }
}

impl WindowConfig {
    /// Zero when the panel would take the whole window; [`GameConfig::validate`]
    /// rejects that case.
    pub fn play_width(&self) -> usize {
        self.width.saturating_sub(self.preview_width)
    }
}

/// Where hand poses come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// Synthetic camera steered from the keyboard.
    #[default]
    Sim,
    /// Landmark datagrams from an external pose estimator.
    Udp,
    /// Keyboard only.
    None,
}

impl FromStr for CameraMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sim"  => Ok(CameraMode::Sim),
            "udp"  => Ok(CameraMode::Udp),
            "none" => Ok(CameraMode::None),
            other  => Err(format!("unknown camera mode `{}` (sim, udp, none)", other)),
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CameraMode::Sim  => "sim",
            CameraMode::Udp  => "udp",
            CameraMode::None => "none",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub mode:             CameraMode,
    /// Local address the UDP feed binds to.
    pub feed_addr:        String,
    /// How long one tick waits for a frame before giving up on it.
    pub frame_timeout_ms: u64,
}

impl CameraConfig {
    pub const DEFAULT_FEED_ADDR: &'static str = "127.0.0.1:5005";
    pub const DEFAULT_FRAME_TIMEOUT_MS: u64 = 8;

    pub fn frame_timeout(&self) -> Duration {
        Duration::from_millis(self.frame_timeout_ms)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            mode:             CameraMode::default(),
            feed_addr:        Self::DEFAULT_FEED_ADDR.to_string(),
            frame_timeout_ms: Self::DEFAULT_FRAME_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub enabled: bool,
    pub dir:     PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        SnapshotConfig { enabled: true, dir: PathBuf::from("screenshots") }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Rolling log files go here; stderr when absent.
    pub dir:   Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: "info".to_string(), dir: None }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Loading
// ════════════════════════════════════════════════════════════════════════════

impl GameConfig {
    pub fn from_toml_str(s: &str) -> AppResult<Self> {
        let cfg: GameConfig = toml::from_str(s)
            .map_err(|e| AppError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// `explicit` must exist; otherwise the platform config file is used if
    /// present, else defaults.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let w = &self.window;
        if w.width == 0 || w.height == 0 {
            return Err(AppError::Config("window size must be positive".into()));
        }
        if w.preview_width >= w.width {
            return Err(AppError::Config(format!(
                "preview_width {} leaves no play area in a {} px window",
                w.preview_width, w.width
            )));
        }
        if (w.play_width() as f32) <= 2.0 * dodge_sim::PLAYER_RADIUS
            || (w.height as f32) <= dodge_sim::PLAYER_BOTTOM_OFFSET
        {
            return Err(AppError::Config("play area is too small for the player".into()));
        }
        if self.camera.frame_timeout_ms == 0 {
            return Err(AppError::Config("camera.frame_timeout_ms must be > 0".into()));
        }
        Ok(())
    }
}

/// `<platform config dir>/hand_dodge/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hand_dodge").map(|pd| pd.config_dir().join("config.toml"))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
