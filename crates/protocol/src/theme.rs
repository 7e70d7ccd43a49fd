use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,

    // Unprimed (rest) frame
    FixedAxis,
    FixedGrid,
    AxisLabel,

    // Primed (moving) frame
    PrimedAxis,
    PrimedGrid,
    PrimedLabel,

    // Observers
    ObserverRest,
    ObserverMoving,

    /// Horizontal line marking the current animation time.
    TimeMarker,

    TextPrimary,
}
