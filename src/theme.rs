//! Theme values and the toggle icon derived from them.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Root attribute value that marks dark mode. Light mode is the attribute's absence.
pub const DARK_ATTRIBUTE_VALUE: &str = "dark";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored or user-supplied value. Surrounding whitespace and case are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("light") {
            Some(Self::Light)
        } else if trimmed.eq_ignore_ascii_case("dark") {
            Some(Self::Dark)
        } else {
            None
        }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    /// Read the theme off the root attribute. Only `"dark"` means dark.
    pub fn from_attribute(value: Option<&str>) -> Self {
        if value == Some(DARK_ATTRIBUTE_VALUE) {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Icon shown on the toggle while this theme is active. It advertises the
    /// theme a click switches to.
    pub fn toggle_icon(self) -> ToggleIcon {
        match self {
            Self::Light => ToggleIcon::Moon,
            Self::Dark => ToggleIcon::Sun,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme {:?}", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownTheme(s.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleIcon {
    Sun,
    Moon,
}

impl ToggleIcon {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
        }
    }

    /// Font Awesome glyph class.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Sun => "fa-sun",
            Self::Moon => "fa-moon",
        }
    }

    pub fn aria_label(self) -> &'static str {
        match self {
            Self::Sun => "Toggle light theme",
            Self::Moon => "Toggle dark theme",
        }
    }

    /// Inner markup for the toggle link.
    pub fn markup(self) -> String {
        format!("<i class=\"fas {}\"></i>", self.css_class())
    }
}
