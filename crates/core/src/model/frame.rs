use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{AffineMatrix, Vector2};

/// Fixed angle of the rotation mode, in radians.
pub const ROTATION_ANGLE: f64 = 0.1 * PI;

/// Largest |β| fed into the Lorentz factor. Keeps γ finite when a speed at
/// or beyond light speed is submitted while relativity is on.
pub const MAX_BOOST_SPEED: f64 = 0.999;

/// Which transform maps the fixed frame onto the primed frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformMode {
    /// Pure shear `t' = t, x' = x + βt`.
    Galilean { beta: f64 },
    /// Symmetric hyperbolic rotation with Lorentz factor γ.
    LorentzBoost { beta: f64 },
    /// Euclidean rotation by a fixed angle.
    Rotation { theta: f64 },
}

impl TransformMode {
    /// Pick the mode from the UI flags. Rotation wins over relativity.
    pub fn from_flags(rotation: bool, relativity: bool, speed: f64) -> Self {
        if rotation {
            Self::Rotation {
                theta: ROTATION_ANGLE,
            }
        } else if relativity {
            Self::LorentzBoost { beta: speed }
        } else {
            Self::Galilean { beta: speed }
        }
    }

    /// Lorentz factor of the mode, 1 outside boost mode.
    pub fn gamma(&self) -> f64 {
        match *self {
            Self::LorentzBoost { beta } => lorentz_factor(beta),
            Self::Galilean { .. } | Self::Rotation { .. } => 1.0,
        }
    }

    /// Forward transform of the primed frame.
    pub fn matrix(&self) -> AffineMatrix {
        let linear = match *self {
            Self::Rotation { theta } => {
                let (sin, cos) = theta.sin_cos();
                [[cos, sin], [-sin, cos]]
            }
            Self::LorentzBoost { beta } => {
                let beta = clamp_boost_speed(beta);
                let gamma = lorentz_factor(beta);
                [[gamma, gamma * beta], [gamma * beta, gamma]]
            }
            Self::Galilean { beta } => [[1.0, beta], [0.0, 1.0]],
        };
        AffineMatrix::from_linear(linear, Vector2::ZERO)
    }

    pub fn is_boost(&self) -> bool {
        matches!(self, Self::LorentzBoost { .. })
    }
}

/// γ = 1/√(1−β²), with β clamped below light speed.
pub fn lorentz_factor(beta: f64) -> f64 {
    let beta = clamp_boost_speed(beta);
    1.0 / (1.0 - beta * beta).sqrt()
}

fn clamp_boost_speed(beta: f64) -> f64 {
    beta.clamp(-MAX_BOOST_SPEED, MAX_BOOST_SPEED)
}

/// UI-driven parameters of the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameState {
    /// Speed as a fraction of light speed.
    pub speed: f64,
    pub rotation: bool,
    pub relativity: bool,
    /// Draw the scene from the primed frame's point of view.
    pub inverse: bool,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            speed: 0.3,
            rotation: false,
            relativity: false,
            inverse: false,
        }
    }
}

impl FrameState {
    pub fn mode(&self) -> TransformMode {
        TransformMode::from_flags(self.rotation, self.relativity, self.speed)
    }

    /// Apply a submission atomically: either every field is taken or the
    /// state is left untouched.
    pub fn apply(&mut self, submission: &ParameterSubmission) -> Result<(), SubmitError> {
        let rotation = submission
            .rotation
            .ok_or(SubmitError::MissingControl("rotation"))?;
        let relativity = submission
            .relativity
            .ok_or(SubmitError::MissingControl("relativity"))?;
        let text = submission
            .speed
            .as_deref()
            .ok_or(SubmitError::MissingControl("speed"))?;
        let speed = parse_speed(text)?;

        self.rotation = rotation;
        self.relativity = relativity;
        if let Some(inverse) = submission.inverse {
            self.inverse = inverse;
        }
        self.speed = speed;
        Ok(())
    }
}

/// Values read from the host's controls. `None` means the control could not
/// be found. The inverse-view control is optional; the others are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSubmission {
    pub rotation: Option<bool>,
    pub relativity: Option<bool>,
    pub inverse: Option<bool>,
    pub speed: Option<String>,
}

impl ParameterSubmission {
    /// A submission where every control is present.
    pub fn complete(rotation: bool, relativity: bool, inverse: bool, speed: impl Into<String>) -> Self {
        Self {
            rotation: Some(rotation),
            relativity: Some(relativity),
            inverse: Some(inverse),
            speed: Some(speed.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("control not found: {0}")]
    MissingControl(&'static str),
    #[error("speed is not a number: {0:?}")]
    InvalidSpeed(String),
}

/// Parse the speed field. Surrounding whitespace is ignored; anything that is
/// not a finite number is rejected.
pub fn parse_speed(text: &str) -> Result<f64, SubmitError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SubmitError::InvalidSpeed(text.to_string()))
}

/// The matrices a drawing pass uses, derived from a [`FrameState`].
///
/// `primary` is applied to the primed frame's basis and `auxiliary` to the
/// unprimed frame's basis. In the normal view the unprimed frame is the rest
/// frame (identity) and observer B moves; in the inverse view the primed
/// frame is drawn upright and the unprimed frame and observer A move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTransforms {
    pub mode: TransformMode,
    pub primary: AffineMatrix,
    pub auxiliary: AffineMatrix,
    /// Lorentz factor of the mode, independent of the view direction.
    pub gamma: f64,
    pub inverse: bool,
}

impl FrameTransforms {
    pub fn derive(state: &FrameState) -> Self {
        let mode = state.mode();
        let forward = mode.matrix();
        let (primary, auxiliary) = if state.inverse {
            (AffineMatrix::IDENTITY, forward.invert_boost_or_rotation())
        } else {
            (forward, AffineMatrix::IDENTITY)
        };
        Self {
            mode,
            primary,
            auxiliary,
            gamma: mode.gamma(),
            inverse: state.inverse,
        }
    }

    /// Horizontal scale applied to the moving observer: 1/γ under a Lorentz
    /// boost, 1 for shears and rotations.
    pub fn contraction(&self) -> f64 {
        if self.mode.is_boost() {
            1.0 / self.gamma
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lorentz_state(speed: f64, inverse: bool) -> FrameState {
        FrameState {
            speed,
            relativity: true,
            inverse,
            ..FrameState::default()
        }
    }

    #[test]
    fn defaults_match_initial_session() {
        let state = FrameState::default();
        assert_eq!(state.speed, 0.3);
        assert!(!state.rotation && !state.relativity && !state.inverse);
        assert_eq!(state.mode(), TransformMode::Galilean { beta: 0.3 });
    }

    #[test]
    fn rotation_takes_precedence_over_relativity() {
        let mode = TransformMode::from_flags(true, true, 0.5);
        assert_eq!(
            mode,
            TransformMode::Rotation {
                theta: ROTATION_ANGLE
            }
        );
        assert_eq!(mode.gamma(), 1.0);
    }

    #[test]
    fn galilean_is_a_pure_shear() {
        let m = TransformMode::Galilean { beta: 0.3 }.matrix();
        assert_eq!(m.coefficients(), [1.0, 0.0, 0.3, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn lorentz_matrix_is_symmetric_boost() {
        let m = TransformMode::LorentzBoost { beta: 0.3 }.matrix();
        let [a, b, c, d, e, f] = m.coefficients();
        assert!((a - 1.048_284_836_721_918).abs() < 1e-12);
        assert_eq!(a, d);
        assert_eq!(b, c);
        assert!((b - 0.3 * a).abs() < 1e-15);
        assert_eq!((e, f), (0.0, 0.0));
    }

    #[test]
    fn rotation_matrix_layout() {
        let m = TransformMode::from_flags(true, false, 0.3).matrix();
        let (sin, cos) = ROTATION_ANGLE.sin_cos();
        assert_eq!(m.coefficients(), [cos, -sin, sin, cos, 0.0, 0.0]);
    }

    #[test]
    fn boost_speed_is_clamped_below_light_speed() {
        let gamma = lorentz_factor(1.0);
        assert!(gamma.is_finite());
        assert!(gamma > 20.0);
        assert_eq!(lorentz_factor(-2.0), gamma);
    }

    #[test]
    fn parse_speed_rejects_non_numbers() {
        assert_eq!(parse_speed(" 0.5 "), Ok(0.5));
        assert_eq!(parse_speed("-0.25"), Ok(-0.25));
        assert!(parse_speed("abc").is_err());
        assert!(parse_speed("").is_err());
        assert!(parse_speed("NaN").is_err());
        assert!(parse_speed("inf").is_err());
    }

    #[test]
    fn invalid_speed_leaves_state_untouched() {
        let mut state = FrameState::default();
        let before = state.clone();
        let err = state.apply(&ParameterSubmission::complete(true, true, true, "abc"));
        assert_eq!(err, Err(SubmitError::InvalidSpeed("abc".into())));
        assert_eq!(state, before);
    }

    #[test]
    fn missing_control_leaves_state_untouched() {
        let mut state = FrameState::default();
        let submission = ParameterSubmission {
            rotation: Some(true),
            relativity: None,
            inverse: Some(true),
            speed: Some("0.9".into()),
        };
        assert_eq!(
            state.apply(&submission),
            Err(SubmitError::MissingControl("relativity"))
        );
        assert_eq!(state, FrameState::default());
    }

    #[test]
    fn absent_inverse_control_keeps_prior_value() {
        let mut state = FrameState {
            inverse: true,
            ..FrameState::default()
        };
        let submission = ParameterSubmission {
            rotation: Some(false),
            relativity: Some(true),
            inverse: None,
            speed: Some("0.6".into()),
        };
        assert!(state.apply(&submission).is_ok());
        assert!(state.inverse);
        assert!(state.relativity);
        assert_eq!(state.speed, 0.6);
    }

    #[test]
    fn normal_view_draws_boost_on_primed_frame() {
        let transforms = FrameTransforms::derive(&lorentz_state(0.5, false));
        assert_eq!(transforms.primary, TransformMode::LorentzBoost { beta: 0.5 }.matrix());
        assert_eq!(transforms.auxiliary, AffineMatrix::IDENTITY);
    }

    #[test]
    fn inverse_view_swaps_reference_frame() {
        let forward = FrameTransforms::derive(&lorentz_state(0.5, false));
        let inverse = FrameTransforms::derive(&lorentz_state(0.5, true));

        assert_eq!(inverse.primary, AffineMatrix::IDENTITY);
        let [a, b, c, d, ..] = forward.primary.coefficients();
        assert_eq!(inverse.auxiliary.coefficients(), [a, -b, -c, d, 0.0, 0.0]);
        assert_eq!(inverse.gamma, forward.gamma);
        assert_eq!(inverse.contraction(), forward.contraction());
    }

    const SPEEDS: [f64; 7] = [-0.99, -0.5, 0.0, 0.3, 0.6, 0.95, 0.999];

    /// One state per mode at the given speed and view.
    fn every_mode(speed: f64, inverse: bool) -> [FrameState; 3] {
        [(false, false), (false, true), (true, false)].map(|(rotation, relativity)| FrameState {
            speed,
            rotation,
            relativity,
            inverse,
        })
    }

    fn close(a: Vector2, b: Vector2, eps: f64) -> bool {
        (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
    }

    #[test]
    fn derived_boosts_preserve_the_interval() {
        for beta in SPEEDS {
            for inverse in [false, true] {
                let transforms = FrameTransforms::derive(&lorentz_state(beta, inverse));
                let boost = if inverse {
                    transforms.auxiliary
                } else {
                    transforms.primary
                };
                let [a, b, c, d, ..] = boost.coefficients();
                for (diagonal, off) in [(a, b), (d, c)] {
                    let interval = diagonal * diagonal - off * off;
                    assert!(
                        (interval - 1.0).abs() < 1e-6,
                        "beta={beta} inverse={inverse} interval={interval}"
                    );
                }
            }
        }
    }

    #[test]
    fn derived_matrices_are_linear() {
        let u = Vector2::new(37.0, -91.0);
        let v = Vector2::new(-5.5, 240.0);
        for speed in SPEEDS {
            for inverse in [false, true] {
                for state in every_mode(speed, inverse) {
                    let transforms = FrameTransforms::derive(&state);
                    for m in [transforms.primary, transforms.auxiliary] {
                        assert_eq!(m.apply_to_delta(Vector2::ZERO), Vector2::ZERO);
                        assert_eq!(m.apply_to_point(Vector2::ZERO), Vector2::ZERO);
                        let sum = m.apply_to_delta(u + v);
                        let parts = m.apply_to_delta(u) + m.apply_to_delta(v);
                        assert!(close(sum, parts, 1e-9), "state={state:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn inverse_view_undoes_the_forward_transform_in_every_mode() {
        let points = [
            Vector2::new(0.0, 400.0),
            Vector2::new(600.0, 0.0),
            Vector2::new(37.0, -91.0),
        ];
        for speed in SPEEDS {
            for (normal, inverse) in every_mode(speed, false)
                .into_iter()
                .zip(every_mode(speed, true))
            {
                let forward = FrameTransforms::derive(&normal).primary;
                let backward = FrameTransforms::derive(&inverse).auxiliary;
                for p in points {
                    let back = backward.apply_to_point(forward.apply_to_point(p));
                    // γ reaches ~22 at the clamp, so allow for the larger products.
                    assert!(close(back, p, 1e-7), "state={normal:?} p={p:?} back={back:?}");
                }
                let [a, b, c, d, e, f] = backward.compose(&forward).coefficients();
                for (got, want) in [(a, 1.0), (b, 0.0), (c, 0.0), (d, 1.0), (e, 0.0), (f, 0.0)] {
                    assert!((got - want).abs() < 1e-9, "state={normal:?}");
                }
            }
        }
    }

    #[test]
    fn contraction_only_under_lorentz_boost() {
        let gal = FrameTransforms::derive(&FrameState::default());
        assert_eq!(gal.contraction(), 1.0);

        let rot = FrameTransforms::derive(&FrameState {
            rotation: true,
            relativity: true,
            ..FrameState::default()
        });
        assert_eq!(rot.contraction(), 1.0);

        let boost = FrameTransforms::derive(&lorentz_state(0.6, false));
        assert!((boost.contraction() - 0.8).abs() < 1e-12);
    }
}
