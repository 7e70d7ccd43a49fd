use egui::{Align2, CornerRadius, FontId, Pos2, Rect, Shape, Stroke};
use minkowski_core::geometry::{AffineMatrix, Vector2};
use minkowski_core::model::Layout;
use minkowski_protocol::{Point, RenderCommand, TextAlign, ThemeToken};

use crate::theme::{self, ThemeMode};

const DASH_LENGTH: f32 = 4.0;
const GAP_LENGTH: f32 = 4.0;

/// Where the diagram lands inside the panel: command pixels are scaled
/// uniformly by `scale` and shifted to `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub origin: Pos2,
    pub scale: f32,
}

impl Placement {
    /// Fit the diagram into `available`, centered, keeping its aspect ratio.
    pub fn fit(available: Rect, layout: &Layout) -> Self {
        let sx = available.width() / layout.width as f32;
        let sy = available.height() / layout.height as f32;
        let scale = sx.min(sy).max(0.0);
        let size = egui::vec2(layout.width as f32 * scale, layout.height as f32 * scale);
        Self {
            origin: available.center() - size / 2.0,
            scale,
        }
    }
}

/// Transform state for PushTransform/PopTransform.
struct TransformStack {
    stack: Vec<AffineMatrix>,
    placement: Placement,
}

impl TransformStack {
    fn new(placement: Placement) -> Self {
        Self {
            stack: vec![AffineMatrix::IDENTITY],
            placement,
        }
    }

    fn current(&self) -> AffineMatrix {
        self.stack.last().copied().unwrap_or(AffineMatrix::IDENTITY)
    }

    fn pos(&self, p: Point) -> Pos2 {
        let v = self.current().apply_to_point(Vector2::new(p.x, p.y));
        let Placement { origin, scale } = self.placement;
        Pos2::new(origin.x + v.x as f32 * scale, origin.y + v.y as f32 * scale)
    }

    /// Length scale for radii and font sizes.
    fn length(&self, l: f64) -> f32 {
        let [a, b, c, d, ..] = self.current().coefficients();
        ((a * d - b * c).abs().sqrt() * l) as f32 * self.placement.scale
    }
}

/// Render a list of `RenderCommand` into an egui `Painter`.
pub fn render_commands(
    painter: &egui::Painter,
    commands: &[RenderCommand],
    placement: Placement,
    mode: ThemeMode,
) {
    let mut tf = TransformStack::new(placement);

    for cmd in commands {
        match cmd {
            RenderCommand::Clear { rect } => {
                let min = tf.pos(Point::new(rect.x, rect.y));
                let max = tf.pos(Point::new(rect.right(), rect.bottom()));
                painter.rect_filled(
                    Rect::from_min_max(min, max),
                    CornerRadius::ZERO,
                    theme::resolve(ThemeToken::Background, mode),
                );
            }

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
                dashed,
            } => {
                let points = [tf.pos(*from), tf.pos(*to)];
                let stroke = Stroke::new(*width as f32, theme::resolve(*color, mode));
                if *dashed {
                    painter.extend(Shape::dashed_line(
                        &points,
                        stroke,
                        DASH_LENGTH,
                        GAP_LENGTH,
                    ));
                } else {
                    painter.line_segment(points, stroke);
                }
            }

            // Under a pixel transform a rectangle may be sheared, so it is
            // painted as a polygon.
            RenderCommand::FillRect { rect, color } => {
                let corners = vec![
                    tf.pos(Point::new(rect.x, rect.y)),
                    tf.pos(Point::new(rect.right(), rect.y)),
                    tf.pos(Point::new(rect.right(), rect.bottom())),
                    tf.pos(Point::new(rect.x, rect.bottom())),
                ];
                painter.add(Shape::convex_polygon(
                    corners,
                    theme::resolve(*color, mode),
                    Stroke::NONE,
                ));
            }

            RenderCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(
                    tf.pos(*center),
                    tf.length(*radius),
                    theme::resolve(*color, mode),
                );
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                let size = *font_size as f32 * placement.scale;
                if size < 1.0 {
                    continue;
                }
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_CENTER,
                    TextAlign::Center => Align2::CENTER_CENTER,
                };
                painter.text(
                    tf.pos(*position),
                    anchor,
                    text.as_ref(),
                    FontId::proportional(size),
                    theme::resolve(*color, mode),
                );
            }

            RenderCommand::PushTransform { coefficients } => {
                let next = tf.current().compose(&AffineMatrix::new(*coefficients));
                tf.stack.push(next);
            }

            RenderCommand::PopTransform => {
                if tf.stack.len() > 1 {
                    tf.stack.pop();
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Groups carry no paint state in egui
            }
        }
    }
}
