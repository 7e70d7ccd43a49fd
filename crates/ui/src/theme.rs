use minkowski_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Self::Dark => egui::Visuals::dark(),
            Self::Light => egui::Visuals::light(),
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Catppuccin Mocha palette
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x1e, 0x1e, 0x2e), // Base

        FixedAxis => ResolvedColor::rgb(0xcd, 0xd6, 0xf4), // Text
        FixedGrid => ResolvedColor::rgb(0x45, 0x47, 0x5a), // Surface1
        AxisLabel => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),

        PrimedAxis => ResolvedColor::rgb(0x89, 0xb4, 0xfa), // Blue
        PrimedGrid => ResolvedColor::rgba(0x89, 0xb4, 0xfa, 90),
        PrimedLabel => ResolvedColor::rgb(0x89, 0xb4, 0xfa),

        ObserverRest => ResolvedColor::rgb(0xba, 0xc2, 0xde), // Subtext1
        ObserverMoving => ResolvedColor::rgb(0x74, 0xc7, 0xec), // Sapphire

        TimeMarker => ResolvedColor::rgb(0xf3, 0x8b, 0xa8), // Red

        TextPrimary => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(255, 255, 255),

        FixedAxis => ResolvedColor::rgb(0, 0, 0),
        FixedGrid => ResolvedColor::rgb(0xbf, 0xbf, 0xbf),
        AxisLabel => ResolvedColor::rgb(0, 0, 0),

        PrimedAxis => ResolvedColor::rgb(0, 0, 0xff),
        PrimedGrid => ResolvedColor::rgb(0xbf, 0xbf, 0xff),
        PrimedLabel => ResolvedColor::rgb(0, 0, 0xff),

        ObserverRest => ResolvedColor::rgb(50, 50, 60),
        ObserverMoving => ResolvedColor::rgb(0, 0, 200),

        TimeMarker => ResolvedColor::rgb(220, 60, 20),

        TextPrimary => ResolvedColor::rgb(20, 20, 30),
    }
}
