//! Integration test: drive a DiagramSession the way a host does (start,
//! tick, submit) and check the scene and render output it produces.

use minkowski_core::geometry::{AffineMatrix, Vector2};
use minkowski_core::model::{
    DiagramSession, FrameState, Layout, ParameterSubmission, ROTATION_ANGLE, SubmitError,
    TIME_STEPS,
};
use minkowski_core::svg::render_svg;
use minkowski_core::views::Observer;
use minkowski_protocol::{RenderCommand, ThemeToken};

const EPS: f64 = 1e-9;

fn lorentz(speed: &str) -> ParameterSubmission {
    ParameterSubmission::complete(false, true, false, speed)
}

#[test]
fn ten_ticks_return_to_start() {
    let mut session = DiagramSession::new(Layout::default());
    session.start();
    let first = session.scene().time_marker.y;
    for _ in 0..TIME_STEPS {
        let cmds = session.tick();
        assert!(cmds.is_some());
        assert!(session.clock().index() < TIME_STEPS);
    }
    assert_eq!(session.clock().index(), 0);
    assert_eq!(session.scene().time_marker.y, first);
}

#[test]
fn lorentz_boost_at_three_tenths() {
    let mut session = DiagramSession::default();
    assert!(session.submit(&lorentz("0.3")).is_ok());

    let transforms = session.transforms();
    assert!((transforms.gamma - 1.048_284_836_721_918).abs() < 1e-12);
    let [a, b, ..] = transforms.primary.coefficients();
    assert!((a * a - b * b - 1.0).abs() < EPS);

    let scene = session.scene();
    let h = Layout::default().height - 200.0;
    let tip = scene.primed.time_axis.tip();
    assert!((tip.x - transforms.gamma * 0.3 * h).abs() < EPS);
    assert!((tip.y - transforms.gamma * h).abs() < EPS);
}

#[test]
fn rotation_at_time_five() {
    let mut session = DiagramSession::default();
    session.start();
    for _ in 0..5 {
        session.tick();
    }
    let cmds = session.submit(&ParameterSubmission::complete(true, false, false, "0.3"));
    assert!(cmds.is_ok());
    assert_eq!(session.clock().index(), 5);

    let scene = session.scene();
    let b = scene.observer(Observer::B);
    let (sin, cos) = ROTATION_ANGLE.sin_cos();
    assert!((b.position.x - sin * 0.5 / cos * 400.0).abs() < EPS);
    assert_eq!(b.position.y, 0.0);
    assert_eq!(b.contraction, 1.0);
}

#[test]
fn observer_a_holds_its_place_while_b_walks() {
    let mut session = DiagramSession::default();
    session.start();
    let origin = session.scene().to_screen(Vector2::ZERO);
    let mut previous_b = None;
    for _ in 0..3 {
        assert!(session.tick().is_some());
        let scene = session.scene();
        assert_eq!(scene.observer_screen_position(Observer::A), origin);

        let b = scene.observer_screen_position(Observer::B);
        assert_eq!(b.y, origin.y);
        if let Some(previous) = previous_b {
            assert!(b.x > previous);
        }
        previous_b = Some(b.x);
    }
}

#[test]
fn unparseable_speed_is_ignored() {
    let mut session = DiagramSession::default();
    session.start();
    session.tick();
    let before_state = session.frame_state().clone();
    let before_frame = session.render();

    assert_eq!(
        session.submit(&lorentz("abc")),
        Err(SubmitError::InvalidSpeed("abc".into()))
    );
    assert_eq!(session.frame_state(), &before_state);
    assert_eq!(session.render(), before_frame);
    assert_eq!(session.clock().index(), 1);
}

#[test]
fn missing_control_is_ignored() {
    let mut session = DiagramSession::default();
    let submission = ParameterSubmission {
        rotation: None,
        ..lorentz("0.5")
    };
    assert_eq!(
        session.submit(&submission),
        Err(SubmitError::MissingControl("rotation"))
    );
    assert_eq!(session.frame_state(), &FrameState::default());
}

#[test]
fn inverse_view_with_half_light_speed() {
    let mut session = DiagramSession::default();
    let normal = {
        assert!(session.submit(&lorentz("0.5")).is_ok());
        session.transforms()
    };
    assert!(
        session
            .submit(&ParameterSubmission::complete(false, true, true, "0.5"))
            .is_ok()
    );
    let inverse = session.transforms();

    assert_eq!(inverse.primary, AffineMatrix::IDENTITY);
    let [a, b, c, d, ..] = normal.primary.coefficients();
    assert_eq!(inverse.auxiliary.coefficients(), [a, -b, -c, d, 0.0, 0.0]);
    assert_eq!(inverse.gamma, normal.gamma);

    // Forward then inverse returns the starting point.
    let p = Vector2::new(123.0, -45.0);
    let back = inverse.auxiliary.apply_to_point(normal.primary.apply_to_point(p));
    assert!(back.distance(p) < EPS);
}

#[test]
fn every_frame_is_balanced_and_ends_with_time_marker() {
    let mut session = DiagramSession::default();
    session.start();
    for (i, speed) in ["0.1", "0.5", "0.95", "1.5"].iter().enumerate() {
        let submitted =
            session.submit(&ParameterSubmission::complete(false, true, i % 2 == 1, *speed));
        assert!(submitted.is_ok());
        let Some(cmds) = session.tick() else {
            panic!("running session must render on tick");
        };
        let pushes = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::PushTransform { .. }))
            .count();
        let pops = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::PopTransform))
            .count();
        assert_eq!(pushes, pops);

        let last_line = cmds.iter().rev().find_map(|c| match c {
            RenderCommand::DrawLine { color, .. } => Some(*color),
            _ => None,
        });
        assert_eq!(last_line, Some(ThemeToken::TimeMarker));

        for cmd in &cmds {
            if let RenderCommand::PushTransform { coefficients } = cmd {
                assert!(coefficients.iter().all(|c| c.is_finite()));
            }
        }
    }
}

#[test]
fn svg_export_of_a_still_frame() {
    let state = FrameState {
        relativity: true,
        speed: 0.6,
        ..FrameState::default()
    };
    let mut session = DiagramSession::with_state(Layout::default(), state);
    session.seek(minkowski_core::model::AnimationClock::at(4));
    let svg = render_svg(&session.render(), 800.0, 600.0, false);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">x′</text>"));
    assert!(svg.contains(r#"<g transform="matrix(0."#));
}
