use serde::{Deserialize, Serialize};

use super::id::fresh_id;

/// Accent color for a project. The set is closed; both gateways and the
/// CLI parse into this enum, so an unknown color can never be stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    Pink,
    Purple,
    #[default]
    Blue,
    Green,
    Yellow,
}

impl ThemeColor {
    pub fn parse(s: &str) -> Option<ThemeColor> {
        match s {
            "pink" => Some(ThemeColor::Pink),
            "purple" => Some(ThemeColor::Purple),
            "blue" => Some(ThemeColor::Blue),
            "green" => Some(ThemeColor::Green),
            "yellow" => Some(ThemeColor::Yellow),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeColor::Pink => "pink",
            ThemeColor::Purple => "purple",
            ThemeColor::Blue => "blue",
            ThemeColor::Green => "green",
            ThemeColor::Yellow => "yellow",
        }
    }
}

/// A project groups tasks into one board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub theme_color: ThemeColor,
}

impl Project {
    /// Create a project with a fresh ID and the default accent color.
    /// Callers are expected to reject blank names before construction.
    pub fn new(name: String, description: String) -> Project {
        Project {
            id: fresh_id('p'),
            name,
            description,
            theme_color: ThemeColor::default(),
        }
    }
}
