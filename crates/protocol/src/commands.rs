use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// Text carried by a command. Axis and observer labels are static, so most
/// commands borrow; deserialized commands own their text.
pub type Label = Cow<'static, str>;

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each drawing pass, in screen
/// pixels with y pointing down. Renderers consume the list sequentially and
/// each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Erase a region of the surface to the background color.
    Clear { rect: Rect },

    /// Stroke a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
        dashed: bool,
    },

    /// Fill an axis-aligned rectangle.
    FillRect { rect: Rect, color: ThemeToken },

    /// Fill a full circle (a canvas `arc` from 0 to 2π).
    FillCircle {
        center: Point,
        radius: f64,
        color: ThemeToken,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: Label,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Push an affine transform, composed with the current one and applied
    /// to all subsequent commands until the matching `PopTransform`.
    ///
    /// Coefficients use the canvas `setTransform(a, b, c, d, e, f)` order:
    /// `(x, y) -> (a*x + c*y + e, b*x + d*y + f)`.
    PushTransform { coefficients: [f64; 6] },

    /// Pop the most recent transform.
    PopTransform,

    /// Begin a logical group (a frame's axes, the observers, ...).
    BeginGroup { id: Label },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    /// Text starts at the position.
    Left,
    Center,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_as_tagged_json() {
        let cmd = RenderCommand::DrawText {
            position: Point::new(100.0, 90.0),
            text: Label::Borrowed("t′"),
            color: ThemeToken::PrimedLabel,
            font_size: 20.0,
            align: TextAlign::Left,
        };
        let json = serde_json::to_string(&cmd).unwrap_or_default();
        assert!(json.starts_with("{\"DrawText\""), "json={json}");
        assert!(json.contains("\"PrimedLabel\""));

        let back: Option<RenderCommand> = serde_json::from_str(&json).ok();
        assert_eq!(back, Some(cmd));
    }

    #[test]
    fn transform_coefficients_keep_canvas_order() {
        let cmd = RenderCommand::PushTransform {
            coefficients: [0.5, 0.0, 0.0, 1.0, 120.0, 380.0],
        };
        let json = serde_json::to_string(&cmd).unwrap_or_default();
        assert_eq!(
            json,
            r#"{"PushTransform":{"coefficients":[0.5,0.0,0.0,1.0,120.0,380.0]}}"#
        );
    }
}
