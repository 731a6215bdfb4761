//! Theme palette and the built-in presets.
//!
//! A theme is process-wide presentation state and is always replaced
//! wholesale.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ModelError;

/// Background images offered for the chat area.
pub const BACKGROUND_IMAGES: [&str; 5] = [
    "https://images.unsplash.com/photo-1640963269654-3fe248c5fba6?w=1080",
    "https://images.unsplash.com/photo-1643061678192-b3d5ad0c42c7?w=1080",
    "https://images.unsplash.com/photo-1626529110441-ab0da211273a?w=1080",
    "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?w=1080",
    "https://images.unsplash.com/photo-1557672172-298e090bd0f1?w=1080",
];

/// Color palette, hex strings like "#3b82f6". `chat_background` may also
/// hold a `url(...)` image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary: String,
    pub accent: String,
    pub background: String,
    pub chat_background: String,
    pub bubble_me: String,
    pub bubble_other: String,
}

impl Theme {
    fn palette(
        primary: &str,
        accent: &str,
        background: &str,
        chat_background: &str,
        bubble_me: &str,
        bubble_other: &str,
    ) -> Self {
        Self {
            primary: primary.to_string(),
            accent: accent.to_string(),
            background: background.to_string(),
            chat_background: chat_background.to_string(),
            bubble_me: bubble_me.to_string(),
            bubble_other: bubble_other.to_string(),
        }
    }

    /// Same palette with one of [`BACKGROUND_IMAGES`] (or any URL) behind the chat.
    pub fn with_background_image(mut self, url: &str) -> Self {
        self.chat_background = format!("url({url})");
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        ThemePreset::Ocean.theme()
    }
}

/// Built-in palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    Ocean,
    Sunset,
    Forest,
    Night,
    Rose,
    Cosmos,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 6] = [
        ThemePreset::Ocean,
        ThemePreset::Sunset,
        ThemePreset::Forest,
        ThemePreset::Night,
        ThemePreset::Rose,
        ThemePreset::Cosmos,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThemePreset::Ocean => "ocean",
            ThemePreset::Sunset => "sunset",
            ThemePreset::Forest => "forest",
            ThemePreset::Night => "night",
            ThemePreset::Rose => "rose",
            ThemePreset::Cosmos => "cosmos",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            ThemePreset::Ocean => {
                Theme::palette("#3b82f6", "#8b5cf6", "#f9fafb", "#ffffff", "#3b82f6", "#f3f4f6")
            }
            ThemePreset::Sunset => {
                Theme::palette("#f97316", "#ec4899", "#fef2f2", "#fffbeb", "#f97316", "#fed7aa")
            }
            ThemePreset::Forest => {
                Theme::palette("#10b981", "#059669", "#f0fdf4", "#f7fee7", "#10b981", "#dcfce7")
            }
            ThemePreset::Night => {
                Theme::palette("#6366f1", "#8b5cf6", "#1e293b", "#0f172a", "#6366f1", "#334155")
            }
            ThemePreset::Rose => {
                Theme::palette("#ec4899", "#f472b6", "#fdf2f8", "#fce7f3", "#ec4899", "#fbcfe8")
            }
            ThemePreset::Cosmos => {
                Theme::palette("#8b5cf6", "#a855f7", "#faf5ff", "#f5f3ff", "#8b5cf6", "#e9d5ff")
            }
        }
    }
}

impl FromStr for ThemePreset {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ThemePreset::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| ModelError::UnknownPreset(s.to_string()))
    }
}
