use serde::{Deserialize, Serialize};

use super::Vector2;

/// A 2-D augmented (affine) transform.
///
/// The six coefficients follow the canvas `setTransform(a, b, c, d, e, f)`
/// order and represent
///
/// ```text
/// | a  c  e |   | x |
/// | b  d  f | * | y |
/// | 0  0  1 |   | 1 |
/// ```
///
/// The third row is implicit, so every value of this type is affine. All
/// operations return new matrices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    coefficients: [f64; 6],
}

impl AffineMatrix {
    pub const IDENTITY: Self = Self::new([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    pub const fn new(coefficients: [f64; 6]) -> Self {
        Self { coefficients }
    }

    /// Build from a row-major 2×2 linear block and a translation.
    ///
    /// `linear[r][c]` is the entry at row `r`, column `c`.
    pub const fn from_linear(linear: [[f64; 2]; 2], translation: Vector2) -> Self {
        Self::new([
            linear[0][0],
            linear[1][0],
            linear[0][1],
            linear[1][1],
            translation.x,
            translation.y,
        ])
    }

    pub const fn translate(offset: Vector2) -> Self {
        Self::new([1.0, 0.0, 0.0, 1.0, offset.x, offset.y])
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    pub const fn coefficients(&self) -> [f64; 6] {
        self.coefficients
    }

    /// Linear entry at row 0, column 0: the factor the transform applies to
    /// the first axis. For boosts this is γ, for rotations cos θ.
    pub const fn a(&self) -> f64 {
        self.coefficients[0]
    }

    /// Full affine application, translation included.
    pub fn apply_to_point(&self, p: Vector2) -> Vector2 {
        let [a, b, c, d, e, f] = self.coefficients;
        Vector2::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Linear part only. For direction vectors (arrowhead offsets and the
    /// like) that must not pick up the transform's origin shift.
    pub fn apply_to_delta(&self, v: Vector2) -> Vector2 {
        let [a, b, c, d, _, _] = self.coefficients;
        Vector2::new(a * v.x + c * v.y, b * v.x + d * v.y)
    }

    /// Augmented-matrix product `self × inner`: applying the result equals
    /// applying `inner` first and then `self`.
    ///
    /// The linear block is `self.linear × inner.linear`; the translation is
    /// `self.linear × inner.translation + self.translation`.
    pub fn compose(&self, inner: &Self) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.coefficients;
        let [a2, b2, c2, d2, e2, f2] = inner.coefficients;
        Self::new([
            a1 * a2 + c1 * b2,
            b1 * a2 + d1 * b2,
            a1 * c2 + c1 * d2,
            b1 * c2 + d1 * d2,
            a1 * e2 + c1 * f2 + e1,
            b1 * e2 + d1 * f2 + f1,
        ])
    }

    /// Inverse of a boost, shear, or rotation produced by the frame model:
    /// the two off-diagonal coefficients are negated.
    ///
    /// This is only correct for that restricted family (unit-determinant
    /// linear blocks with equal diagonal entries and no translation). It is
    /// not a general matrix inverse.
    pub fn invert_boost_or_rotation(&self) -> Self {
        let [a, b, c, d, e, f] = self.coefficients;
        debug_assert!(
            (a - d).abs() < 1e-12,
            "off-diagonal inversion needs equal diagonal entries"
        );
        Self::new([a, -b, -c, d, e, f])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransformMode;

    const EPS: f64 = 1e-9;

    fn boost(beta: f64) -> AffineMatrix {
        TransformMode::LorentzBoost { beta }.matrix()
    }

    fn rotation(theta: f64) -> AffineMatrix {
        TransformMode::Rotation { theta }.matrix()
    }

    fn close(a: Vector2, b: Vector2) -> bool {
        (a.x - b.x).abs() <= EPS && (a.y - b.y).abs() <= EPS
    }

    #[test]
    fn point_application_includes_translation() {
        let m = AffineMatrix::new([2.0, 0.5, -1.0, 3.0, 10.0, 20.0]);
        let p = m.apply_to_point(Vector2::new(1.0, 2.0));
        assert_eq!(p, Vector2::new(2.0 - 2.0 + 10.0, 0.5 + 6.0 + 20.0));
    }

    #[test]
    fn delta_application_drops_translation() {
        let m = AffineMatrix::new([2.0, 0.5, -1.0, 3.0, 10.0, 20.0]);
        assert_eq!(
            m.apply_to_delta(Vector2::new(1.0, 2.0)),
            Vector2::new(0.0, 6.5)
        );
        assert_eq!(m.apply_to_delta(Vector2::ZERO), Vector2::ZERO);
    }

    #[test]
    fn from_linear_maps_rows_to_canvas_order() {
        let m = AffineMatrix::from_linear([[1.0, 2.0], [3.0, 4.0]], Vector2::new(5.0, 6.0));
        assert_eq!(m.coefficients(), [1.0, 3.0, 2.0, 4.0, 5.0, 6.0]);
        // Row 0 produces the x component.
        assert_eq!(
            m.apply_to_delta(Vector2::new(0.0, 1.0)),
            Vector2::new(2.0, 4.0)
        );
    }

    #[test]
    fn identity_is_neutral_for_compose() {
        let samples = [
            boost(0.3),
            rotation(1.3),
            AffineMatrix::new([2.0, 0.5, -1.0, 3.0, 10.0, 20.0]),
        ];
        for m in samples {
            assert_eq!(AffineMatrix::IDENTITY.compose(&m), m);
            assert_eq!(m.compose(&AffineMatrix::IDENTITY), m);
        }
    }

    #[test]
    fn compose_applies_inner_first() {
        let view = AffineMatrix::new([1.0, 0.0, 0.0, -1.0, 100.0, 500.0]);
        let frame = boost(0.5);
        let chained = view.compose(&frame);
        let p = Vector2::new(30.0, 70.0);
        assert!(close(
            chained.apply_to_point(p),
            view.apply_to_point(frame.apply_to_point(p))
        ));
        // Not the other order.
        assert!(!close(
            frame.compose(&view).apply_to_point(p),
            chained.apply_to_point(p)
        ));
    }

    #[test]
    fn compose_translation_goes_through_outer_linear_block() {
        let outer = AffineMatrix::new([0.0, 1.0, -1.0, 0.0, 5.0, 7.0]);
        let inner = AffineMatrix::translate(Vector2::new(2.0, 3.0));
        let [.., e, f] = outer.compose(&inner).coefficients();
        assert_eq!((e, f), (-3.0 + 5.0, 2.0 + 7.0));
    }

    #[test]
    fn scale_then_translate_keeps_origin_fixed() {
        let m = AffineMatrix::translate(Vector2::new(40.0, 60.0))
            .compose(&AffineMatrix::scale(0.5, 2.0));
        assert_eq!(m.apply_to_point(Vector2::ZERO), Vector2::new(40.0, 60.0));
        assert_eq!(
            m.apply_to_delta(Vector2::new(10.0, 10.0)),
            Vector2::new(5.0, 20.0)
        );
    }

    #[test]
    fn off_diagonal_inversion_round_trips() {
        let points = [
            Vector2::new(0.0, 400.0),
            Vector2::new(600.0, 0.0),
            Vector2::new(-123.5, 77.25),
        ];
        for m in [boost(-0.95), rotation(1.3)] {
            let inv = m.invert_boost_or_rotation();
            for p in points {
                let back = inv.apply_to_point(m.apply_to_point(p));
                assert!(close(back, p), "m={m:?} p={p:?} back={back:?}");
            }
        }
    }
}
