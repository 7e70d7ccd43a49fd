use serde::{Deserialize, Serialize};

use crate::geometry::{AffineMatrix, Vector2};

/// Number of grid cells along each axis; grid lines sit at `k / GRID_DIVISIONS`.
pub const GRID_DIVISIONS: u32 = 10;

/// Screen geometry of the diagram, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    /// Margin between the screen edge and the diagram's axes.
    pub offset: f64,
    /// Arrowhead leg size.
    pub arrow_size: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            offset: 100.0,
            arrow_size: 10.0,
        }
    }
}

impl Layout {
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Tip of the unit space axis: `(W − 2·offset, 0)`.
    pub fn space_basis(&self) -> Vector2 {
        Vector2::new(self.width - 2.0 * self.offset, 0.0)
    }

    /// Tip of the unit time axis: `(0, H − 2·offset)`.
    pub fn time_basis(&self) -> Vector2 {
        Vector2::new(0.0, self.height - 2.0 * self.offset)
    }

    /// Diagram space (origin at the axes' crossing, y up) to screen pixels
    /// (origin top-left, y down).
    pub fn view(&self) -> AffineMatrix {
        AffineMatrix::new([1.0, 0.0, 0.0, -1.0, self.offset, self.height - self.offset])
    }
}
