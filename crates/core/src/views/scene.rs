//! Scene construction: every primitive of one drawing pass, in diagram space.
//!
//! Diagram space has its origin where the axes cross and y pointing up. The
//! scene carries the view matrix that maps it onto screen pixels; nothing in
//! here knows about the drawing surface.

use serde::Serialize;

use crate::geometry::{AffineMatrix, Vector2};
use crate::model::{AnimationClock, FrameTransforms, GRID_DIVISIONS, Layout};

/// Distance between an axis tip and its label.
const LABEL_GAP: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameRole {
    /// The unprimed frame, labeled `t` / `x`.
    Fixed,
    /// The transformed frame, labeled `t′` / `x′`.
    Primed,
}

impl FrameRole {
    pub fn time_label(self) -> &'static str {
        match self {
            Self::Fixed => "t",
            Self::Primed => "t′",
        }
    }

    pub fn space_label(self) -> &'static str {
        match self {
            Self::Fixed => "x",
            Self::Primed => "x′",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Vector2,
    pub to: Vector2,
}

impl Segment {
    pub fn new(from: Vector2, to: Vector2) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }
}

/// An axis from the origin to its tip, with a two-legged arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrow {
    pub shaft: Segment,
    pub head: [Segment; 2],
    pub label: &'static str,
    pub label_at: Vector2,
}

impl Arrow {
    fn new(tip: Vector2, legs: [Vector2; 2], label: &'static str) -> Self {
        let length = tip.length();
        let direction = if length > 0.0 {
            tip.scale(1.0 / length)
        } else {
            Vector2::ZERO
        };
        Self {
            shaft: Segment::new(Vector2::ZERO, tip),
            head: legs.map(|leg| Segment::new(tip, tip + leg)),
            label,
            label_at: tip + direction.scale(LABEL_GAP),
        }
    }

    pub fn tip(&self) -> Vector2 {
        self.shaft.to
    }
}

/// Axes and grid of one coordinate frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameGeometry {
    pub role: FrameRole,
    /// The matrix this frame was built with.
    pub transform: AffineMatrix,
    pub time_basis: Vector2,
    pub space_basis: Vector2,
    pub time_axis: Arrow,
    pub space_axis: Arrow,
    /// Lines parallel to the space axis, then lines parallel to the time axis.
    pub grid: Vec<Segment>,
}

impl FrameGeometry {
    pub fn build(role: FrameRole, transform: AffineMatrix, layout: &Layout) -> Self {
        let time_basis = transform.apply_to_point(layout.time_basis());
        let space_basis = transform.apply_to_point(layout.space_basis());
        let s = layout.arrow_size;

        let time_axis = Arrow::new(
            time_basis,
            [
                transform.apply_to_delta(Vector2::new(-s, -s)),
                transform.apply_to_delta(Vector2::new(s, -s)),
            ],
            role.time_label(),
        );
        let space_axis = Arrow::new(
            space_basis,
            [
                transform.apply_to_delta(Vector2::new(-s, -s)),
                transform.apply_to_delta(Vector2::new(-s, s)),
            ],
            role.space_label(),
        );

        Self {
            role,
            transform,
            time_basis,
            space_basis,
            time_axis,
            space_axis,
            grid: grid_lines(time_basis, space_basis),
        }
    }
}

/// Interior grid lines at `k / GRID_DIVISIONS` along each basis vector.
fn grid_lines(time_basis: Vector2, space_basis: Vector2) -> Vec<Segment> {
    let steps = 1..GRID_DIVISIONS;
    let mut lines = Vec::with_capacity(2 * steps.len());
    for k in steps.clone() {
        let start = time_basis.scale(f64::from(k) / f64::from(GRID_DIVISIONS));
        lines.push(Segment::new(start, start.add(space_basis)));
    }
    for k in steps {
        let start = space_basis.scale(f64::from(k) / f64::from(GRID_DIVISIONS));
        lines.push(Segment::new(start, start.add(time_basis)));
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Observer {
    /// At rest in the unprimed frame.
    A,
    /// At rest in the primed frame.
    B,
}

impl Observer {
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

/// Where an observer stands at the current time, and how it is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObserverPlacement {
    pub observer: Observer,
    /// Feet on the baseline, at the observer's current horizontal position.
    pub position: Vector2,
    /// Horizontal scale of the figure (1/γ when Lorentz-contracted).
    pub contraction: f64,
    pub moving: bool,
}

impl ObserverPlacement {
    /// Observer at rest in the frame drawn with `frame`.
    ///
    /// The horizontal position is where that frame's time axis crosses the
    /// current time slice. Dividing by `frame.a()` undoes the matrix's own
    /// stretch of the time coordinate. The figure itself stays on the
    /// baseline, so an observer at rest in an identity frame never moves.
    fn at_time(
        observer: Observer,
        frame: &AffineMatrix,
        fraction: f64,
        layout: &Layout,
        contraction: f64,
        moving: bool,
    ) -> Self {
        let along = layout.time_basis().scale(fraction / frame.a());
        Self {
            observer,
            position: Vector2::new(frame.apply_to_point(along).x, 0.0),
            contraction,
            moving,
        }
    }
}

/// Horizontal line at the current time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeMarker {
    pub y: f64,
    /// Spans the whole screen width.
    pub line: Segment,
}

/// Everything drawn in one pass. Rebuilt from scratch for every redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub layout: Layout,
    /// Diagram space to screen pixels.
    pub view: AffineMatrix,
    pub clock: AnimationClock,
    pub fixed: FrameGeometry,
    pub primed: FrameGeometry,
    pub observers: [ObserverPlacement; 2],
    pub time_marker: TimeMarker,
}

impl Scene {
    pub fn build(transforms: &FrameTransforms, clock: AnimationClock, layout: &Layout) -> Self {
        let fraction = clock.fraction();
        let fixed = FrameGeometry::build(FrameRole::Fixed, transforms.auxiliary, layout);
        let primed = FrameGeometry::build(FrameRole::Primed, transforms.primary, layout);

        // Whichever observer is at rest in the non-reference frame moves and
        // is contracted.
        let contraction = transforms.contraction();
        let (a_scale, b_scale) = if transforms.inverse {
            (contraction, 1.0)
        } else {
            (1.0, contraction)
        };
        let observers = [
            ObserverPlacement::at_time(
                Observer::A,
                &transforms.auxiliary,
                fraction,
                layout,
                a_scale,
                transforms.inverse,
            ),
            ObserverPlacement::at_time(
                Observer::B,
                &transforms.primary,
                fraction,
                layout,
                b_scale,
                !transforms.inverse,
            ),
        ];

        let y = fraction * layout.time_basis().y;
        let time_marker = TimeMarker {
            y,
            line: Segment::new(
                Vector2::new(-layout.offset, y),
                Vector2::new(layout.width - layout.offset, y),
            ),
        };

        log::trace!(
            "scene rebuilt: mode={:?} inverse={} time={}",
            transforms.mode,
            transforms.inverse,
            clock.index()
        );

        Self {
            layout: *layout,
            view: layout.view(),
            clock,
            fixed,
            primed,
            observers,
            time_marker,
        }
    }

    pub fn observer(&self, observer: Observer) -> &ObserverPlacement {
        match observer {
            Observer::A => &self.observers[0],
            Observer::B => &self.observers[1],
        }
    }

    /// Screen position of an observer's feet.
    pub fn observer_screen_position(&self, observer: Observer) -> Vector2 {
        self.view.apply_to_point(self.observer(observer).position)
    }

    pub fn to_screen(&self, p: Vector2) -> Vector2 {
        self.view.apply_to_point(p)
    }
}
