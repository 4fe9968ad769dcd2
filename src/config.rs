//! Tool policy and persisted configuration for inkpea

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::ToolKind;
use crate::render::geometry::{eraser, highlighter, pen, smoothing};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl StrokeColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build a color from 8-bit channels
    pub fn from_rgba_u8([r, g, b, a]: [u8; 4]) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// How a stroke combines with the ink already on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendKind {
    /// Paint over existing ink
    #[default]
    Normal,
    /// Remove existing ink, revealing the base image
    Erase,
}

/// Appearance of strokes drawn with one tool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolStyle {
    /// Ignored when `blend` is [`BlendKind::Erase`]
    pub color: StrokeColor,
    /// Stroke width in canvas pixels
    pub width: f32,
    pub blend: BlendKind,
}

/// Fixed mapping from tool to stroke appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPolicy {
    pub pen: ToolStyle,
    pub highlighter: ToolStyle,
    pub eraser: ToolStyle,
    /// Curve tension used to smooth sampled points (0 = straight polyline)
    pub tension: f32,
}

impl ToolPolicy {
    /// Look up the style for a tool
    pub fn style(&self, tool: ToolKind) -> ToolStyle {
        match tool {
            ToolKind::Pen => self.pen,
            ToolKind::Highlighter => self.highlighter,
            ToolKind::Eraser => self.eraser,
        }
    }
}

impl Default for ToolPolicy {
    fn default() -> Self {
        Self {
            pen: ToolStyle {
                color: pen::COLOR,
                width: pen::WIDTH,
                blend: BlendKind::Normal,
            },
            highlighter: ToolStyle {
                color: highlighter::COLOR,
                width: highlighter::WIDTH,
                blend: BlendKind::Normal,
            },
            eraser: ToolStyle {
                color: eraser::COLOR,
                width: eraser::WIDTH,
                blend: BlendKind::Erase,
            },
            tension: smoothing::TENSION,
        }
    }
}

/// Annotation configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InkConfig {
    /// Colors, widths and blend modes per tool
    pub tool_policy: ToolPolicy,
    /// Tool selected when a session opens
    pub default_tool: ToolKind,
}

impl InkConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "inkpea";
    const FILE_NAME: &'static str = "config.json";

    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join(Self::FILE_NAME))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_or_default(&path)
    }

    /// Load configuration from `path`, falling back to defaults on any error
    ///
    /// A missing file is expected on first run and only logged at debug level.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let data = std::fs::read(path)?;
        serde_json::from_slice(&data).map_err(io::Error::from)
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            log::error!("Could not locate config directory for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    /// Save configuration to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(self).map_err(io::Error::from)?;
        std::fs::write(path, data)
    }
}
