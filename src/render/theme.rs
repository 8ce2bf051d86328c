use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    #[default]
    Wide,
    Compact,
}

/// Display options for a badge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub size: Size,
    /// Replaces the "Now Playing" / "Not Playing" header when set.
    pub status_label: Option<String>,
}

impl RenderOptions {
    /// Lenient construction from query-string values; unknown values fall back
    /// to the defaults and an empty label counts as unset.
    pub fn from_query(theme: Option<&str>, size: Option<&str>, label: Option<&str>) -> Self {
        Self {
            theme: theme.and_then(|t| t.parse().ok()).unwrap_or_default(),
            size: size.and_then(|s| s.parse().ok()).unwrap_or_default(),
            status_label: label
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        }
    }
}

impl Size {
    /// Edge length of the square album-art tile, which is also the card height.
    pub fn art_size(self) -> u32 {
        match self {
            Size::Wide => 200,
            Size::Compact => 180,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("invalid theme '{}', expected dark or light", other)),
        }
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wide" => Ok(Size::Wide),
            "compact" => Ok(Size::Compact),
            other => Err(format!("invalid size '{}', expected wide or compact", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Size::Wide => "wide",
            Size::Compact => "compact",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub track: &'static str,
    pub backdrop_opacity: f64,
}

const DARK: Palette = Palette {
    background: "#121212",
    border: "#2A2A2A",
    text: "#FFFFFF",
    muted: "#B3B3B3",
    track: "#3E3E3E",
    backdrop_opacity: 0.25,
};

const LIGHT: Palette = Palette {
    background: "#FFFFFF",
    border: "#E3E3E3",
    text: "#121212",
    muted: "#5E5E5E",
    track: "#DEDEDE",
    backdrop_opacity: 0.4,
};

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => DARK,
            Theme::Light => LIGHT,
        }
    }
}
