//! Drawing tool identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StrokeLogError;

/// Freehand tool a stroke was drawn with
///
/// Serialized as `"pen"`, `"highlighter"` or `"eraser"`. The French names
/// written by older saves (`"surligneur"`, `"gomme"`) are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    #[serde(alias = "surligneur")]
    Highlighter,
    #[serde(alias = "gomme")]
    Eraser,
}

impl ToolKind {
    /// All tools, in toolbar order
    pub const ALL: [ToolKind; 3] = [ToolKind::Pen, ToolKind::Highlighter, ToolKind::Eraser];

    /// Get the next tool in the cycle
    pub fn next(self) -> Self {
        match self {
            ToolKind::Pen => ToolKind::Highlighter,
            ToolKind::Highlighter => ToolKind::Eraser,
            ToolKind::Eraser => ToolKind::Pen,
        }
    }

    /// Canonical name used in saved stroke logs
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Highlighter => "highlighter",
            ToolKind::Eraser => "eraser",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = StrokeLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pen" => Ok(ToolKind::Pen),
            "highlighter" | "surligneur" => Ok(ToolKind::Highlighter),
            "eraser" | "gomme" => Ok(ToolKind::Eraser),
            other => Err(StrokeLogError::UnknownTool(other.to_string())),
        }
    }
}
