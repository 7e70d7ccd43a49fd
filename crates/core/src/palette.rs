//! CSS colors for theme tokens, shared by the SVG and canvas renderers.

use minkowski_protocol::ThemeToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Black axes on white, blue primed frame.
    #[default]
    Light,
    Dark,
}

impl Palette {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn css(self, token: ThemeToken) -> &'static str {
        match self {
            Self::Light => match token {
                ThemeToken::Background => "#ffffff",
                ThemeToken::FixedAxis | ThemeToken::AxisLabel => "#000000",
                ThemeToken::FixedGrid => "#bfbfbf",
                ThemeToken::PrimedAxis | ThemeToken::PrimedLabel => "#0000ff",
                ThemeToken::PrimedGrid => "#bfbfff",
                ThemeToken::ObserverRest => "#2f2f2f",
                ThemeToken::ObserverMoving => "#0000cc",
                ThemeToken::TimeMarker => "#e63946",
                ThemeToken::TextPrimary => "#1a1a2e",
            },
            Self::Dark => match token {
                ThemeToken::Background => "#181818",
                ThemeToken::FixedAxis | ThemeToken::AxisLabel => "#ececec",
                ThemeToken::FixedGrid => "#4a4a4a",
                ThemeToken::PrimedAxis | ThemeToken::PrimedLabel => "#448aff",
                ThemeToken::PrimedGrid => "#2a3a66",
                ThemeToken::ObserverRest => "#bdbdbd",
                ThemeToken::ObserverMoving => "#82b1ff",
                ThemeToken::TimeMarker => "#f44336",
                ThemeToken::TextPrimary => "#ececec",
            },
        }
    }
}
