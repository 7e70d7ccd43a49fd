//! Scene to render commands.
//!
//! All diagram points go through the scene's view matrix here, so the
//! emitted commands are in screen pixels. Observers are the one place a
//! transient transform is pushed: the figure is drawn in its own local
//! coordinates and squeezed horizontally by the contraction factor.

use minkowski_protocol::{Label, Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::geometry::{AffineMatrix, Vector2};
use crate::views::scene::{Arrow, FrameGeometry, FrameRole, ObserverPlacement, Scene, Segment};

const AXIS_WIDTH: f64 = 2.0;
const GRID_WIDTH: f64 = 1.0;
const MARKER_WIDTH: f64 = 1.5;
const LABEL_FONT_SIZE: f64 = 20.0;
const OBSERVER_FONT_SIZE: f64 = 14.0;

// Observer figure, in local pixels with the feet at the origin.
const BODY_WIDTH: f64 = 14.0;
const BODY_HEIGHT: f64 = 28.0;
const HEAD_RADIUS: f64 = 7.0;
const NECK: f64 = 2.0;

/// Append-only command buffer with scoped transforms.
#[derive(Debug, Default)]
pub struct CommandList {
    commands: Vec<RenderCommand>,
}

impl CommandList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Emit `draw` inside a `PushTransform`/`PopTransform` pair. The pop is
    /// emitted whatever `draw` does, so the list always ends balanced.
    pub fn with_transform<R>(
        &mut self,
        transform: &AffineMatrix,
        draw: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.push(RenderCommand::PushTransform {
            coefficients: transform.coefficients(),
        });
        let result = draw(self);
        self.push(RenderCommand::PopTransform);
        result
    }

    pub fn group<R>(&mut self, id: &'static str, draw: impl FnOnce(&mut Self) -> R) -> R {
        self.push(RenderCommand::BeginGroup {
            id: Label::Borrowed(id),
        });
        let result = draw(self);
        self.push(RenderCommand::EndGroup);
        result
    }

    fn line(&mut self, from: Vector2, to: Vector2, color: ThemeToken, width: f64, dashed: bool) {
        self.push(RenderCommand::DrawLine {
            from: from.to_point(),
            to: to.to_point(),
            color,
            width,
            dashed,
        });
    }

    fn text(
        &mut self,
        position: Vector2,
        text: &'static str,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    ) {
        self.push(RenderCommand::DrawText {
            position: position.to_point(),
            text: Label::Borrowed(text),
            color,
            font_size,
            align,
        });
    }

    pub fn into_commands(self) -> Vec<RenderCommand> {
        self.commands
    }
}

struct FramePalette {
    axis: ThemeToken,
    grid: ThemeToken,
    label: ThemeToken,
    dashed_grid: bool,
}

impl FramePalette {
    fn for_role(role: FrameRole) -> Self {
        match role {
            FrameRole::Fixed => Self {
                axis: ThemeToken::FixedAxis,
                grid: ThemeToken::FixedGrid,
                label: ThemeToken::AxisLabel,
                dashed_grid: false,
            },
            FrameRole::Primed => Self {
                axis: ThemeToken::PrimedAxis,
                grid: ThemeToken::PrimedGrid,
                label: ThemeToken::PrimedLabel,
                dashed_grid: true,
            },
        }
    }
}

/// Render a scene into a command list.
///
/// Order: clear, unprimed frame, primed frame, observers, and the time marker
/// last so it is never covered.
pub fn render_scene(scene: &Scene) -> Vec<RenderCommand> {
    let mut list = CommandList::with_capacity(128);
    let layout = &scene.layout;

    list.push(RenderCommand::Clear {
        rect: Rect::new(0.0, 0.0, layout.width, layout.height),
    });

    list.group("frame-fixed", |list| render_frame(list, scene, &scene.fixed));
    list.group("frame-primed", |list| render_frame(list, scene, &scene.primed));
    list.group("observers", |list| {
        for placement in &scene.observers {
            render_observer(list, scene, placement);
        }
    });
    list.group("time-marker", |list| {
        let line = scene.time_marker.line;
        list.line(
            scene.to_screen(line.from),
            scene.to_screen(line.to),
            ThemeToken::TimeMarker,
            MARKER_WIDTH,
            false,
        );
    });

    list.into_commands()
}

fn render_frame(list: &mut CommandList, scene: &Scene, frame: &FrameGeometry) {
    let palette = FramePalette::for_role(frame.role);

    for segment in &frame.grid {
        draw_segment(list, scene, segment, palette.grid, GRID_WIDTH, palette.dashed_grid);
    }
    // The space label sits past the tip, so it starts there.
    render_arrow(list, scene, &frame.time_axis, &palette, TextAlign::Center);
    render_arrow(list, scene, &frame.space_axis, &palette, TextAlign::Left);
}

fn render_arrow(
    list: &mut CommandList,
    scene: &Scene,
    arrow: &Arrow,
    palette: &FramePalette,
    align: TextAlign,
) {
    draw_segment(list, scene, &arrow.shaft, palette.axis, AXIS_WIDTH, false);
    for leg in &arrow.head {
        draw_segment(list, scene, leg, palette.axis, AXIS_WIDTH, false);
    }
    list.text(
        scene.to_screen(arrow.label_at),
        arrow.label,
        palette.label,
        LABEL_FONT_SIZE,
        align,
    );
}

fn draw_segment(
    list: &mut CommandList,
    scene: &Scene,
    segment: &Segment,
    color: ThemeToken,
    width: f64,
    dashed: bool,
) {
    list.line(
        scene.to_screen(segment.from),
        scene.to_screen(segment.to),
        color,
        width,
        dashed,
    );
}

/// Pixel transform for an observer figure: scale horizontally around the
/// feet, then move the feet to their screen position.
pub fn observer_transform(feet: Vector2, contraction: f64) -> AffineMatrix {
    AffineMatrix::translate(feet).compose(&AffineMatrix::scale(contraction, 1.0))
}

fn render_observer(list: &mut CommandList, scene: &Scene, placement: &ObserverPlacement) {
    let feet = scene.observer_screen_position(placement.observer);
    let color = if placement.moving {
        ThemeToken::ObserverMoving
    } else {
        ThemeToken::ObserverRest
    };

    list.with_transform(&observer_transform(feet, placement.contraction), |list| {
        list.push(RenderCommand::FillRect {
            rect: Rect::new(-BODY_WIDTH / 2.0, -BODY_HEIGHT, BODY_WIDTH, BODY_HEIGHT),
            color,
        });
        list.push(RenderCommand::FillCircle {
            center: Point::new(0.0, -BODY_HEIGHT - NECK - HEAD_RADIUS),
            radius: HEAD_RADIUS,
            color,
        });
    });

    // Outside the scope so the label is not squeezed.
    list.text(
        feet + Vector2::new(0.0, OBSERVER_FONT_SIZE),
        placement.observer.label(),
        ThemeToken::TextPrimary,
        OBSERVER_FONT_SIZE,
        TextAlign::Center,
    );
}
