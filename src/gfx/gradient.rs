//! # Easing Gradients
//!
//! Maps a normalized floor position in `[0, 1]` to an eased weight in `[0, 1]`.
//! The custom curve follows CSS `cubic-bezier()` timing semantics: the curve runs
//! from `(0, 0)` to `(1, 1)`, the input is read on the x axis and the eased value
//! on the y axis.

use crate::params::{BezierControlPoints, BezierPoint, GradientMode};

/// Newton-Raphson steps attempted before falling back to bisection.
const NEWTON_ITERATIONS: usize = 8;
/// Bisection steps used when Newton fails to converge.
const BISECTION_ITERATIONS: usize = 24;
/// Acceptable error on the x axis.
const CONVERGENCE_TOLERANCE: f32 = 1e-4;
/// Below this slope a Newton step is not trusted.
const MIN_SLOPE: f32 = 1e-6;

/// A resolved easing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Bezier(CubicBezier),
}

impl Easing {
    /// Resolves a gradient mode against the parameter set's optional curve.
    /// A bezier mode without control points uses the default curve.
    pub fn resolve(mode: GradientMode, curve: Option<&BezierControlPoints>) -> Self {
        match mode {
            GradientMode::Linear => Easing::Linear,
            GradientMode::EaseIn => Easing::EaseIn,
            GradientMode::EaseOut => Easing::EaseOut,
            GradientMode::EaseInOut => Easing::EaseInOut,
            GradientMode::Bezier => {
                let points = curve.copied().unwrap_or_default();
                Easing::Bezier(CubicBezier::new(points.p1, points.p2))
            }
        }
    }

    /// Evaluates the easing at `t`. Inputs outside `[0, 1]` are clamped.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            Easing::Bezier(curve) => curve.evaluate(t),
        }
    }
}

/// Evaluates `mode` at `t` without keeping the resolved easing around.
pub fn evaluate(mode: GradientMode, curve: Option<&BezierControlPoints>, t: f32) -> f32 {
    Easing::resolve(mode, curve).evaluate(t)
}

/// Cubic bezier through `(0,0)`, `p1`, `p2`, `(1,1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    p1: BezierPoint,
    p2: BezierPoint,
}

impl CubicBezier {
    /// Control points are clamped to the unit square so the x axis stays monotonic.
    pub fn new(p1: BezierPoint, p2: BezierPoint) -> Self {
        Self {
            p1: p1.clamped(),
            p2: p2.clamped(),
        }
    }

    pub fn control_points(&self) -> (BezierPoint, BezierPoint) {
        (self.p1, self.p2)
    }

    // B(u) = 3(1-u)^2 u a + 3(1-u) u^2 b + u^3
    fn component(u: f32, a: f32, b: f32) -> f32 {
        let v = 1.0 - u;
        3.0 * v * v * u * a + 3.0 * v * u * u * b + u * u * u
    }

    fn slope(u: f32, a: f32, b: f32) -> f32 {
        let v = 1.0 - u;
        3.0 * v * v * a + 6.0 * v * u * (b - a) + 3.0 * u * u * (1.0 - b)
    }

    /// Finds the curve parameter whose x coordinate equals `x`.
    pub fn solve_parameter(&self, x: f32) -> f32 {
        let (ax, bx) = (self.p1.x, self.p2.x);

        let mut u = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = Self::component(u, ax, bx) - x;
            if error.abs() < CONVERGENCE_TOLERANCE {
                return u;
            }
            let d = Self::slope(u, ax, bx);
            if d.abs() < MIN_SLOPE {
                break;
            }
            u -= error / d;
            if !(0.0..=1.0).contains(&u) {
                break;
            }
        }
        if (0.0..=1.0).contains(&u) && (Self::component(u, ax, bx) - x).abs() < CONVERGENCE_TOLERANCE
        {
            return u;
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        u = x;
        for _ in 0..BISECTION_ITERATIONS {
            let error = Self::component(u, ax, bx) - x;
            if error.abs() < CONVERGENCE_TOLERANCE {
                break;
            }
            if error < 0.0 {
                lo = u;
            } else {
                hi = u;
            }
            u = 0.5 * (lo + hi);
        }
        u
    }

    pub fn evaluate(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let u = self.solve_parameter(x);
        Self::component(u, self.p1.y, self.p2.y).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_easings() -> Vec<Easing> {
        vec![
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::Bezier(CubicBezier::new(
                BezierPoint::new(0.25, 0.1),
                BezierPoint::new(0.75, 0.9),
            )),
            Easing::Bezier(CubicBezier::new(
                BezierPoint::new(0.0, 1.0),
                BezierPoint::new(1.0, 0.0),
            )),
        ]
    }

    #[test]
    fn test_endpoints_fixed() {
        for easing in all_easings() {
            assert!(easing.evaluate(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.evaluate(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_named_curves() {
        assert_eq!(Easing::Linear.evaluate(0.3), 0.3);
        assert!((Easing::EaseIn.evaluate(0.5) - 0.25).abs() < 1e-6);
        assert!((Easing::EaseOut.evaluate(0.5) - 0.75).abs() < 1e-6);
        assert!((Easing::EaseInOut.evaluate(0.25) - 0.125).abs() < 1e-6);
        assert!((Easing::EaseInOut.evaluate(0.75) - 0.875).abs() < 1e-6);
        assert!((Easing::EaseInOut.evaluate(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_bezier_matches_reference() {
        let curve = CubicBezier::new(BezierPoint::new(0.25, 0.1), BezierPoint::new(0.75, 0.9));
        let expected = [
            (0.0, 0.0),
            (0.25, 0.209_413_7),
            (0.5, 0.5),
            (0.75, 0.790_586_3),
            (1.0, 1.0),
        ];
        for (x, y) in expected {
            let got = curve.evaluate(x);
            assert!((got - y).abs() < 1e-3, "x={x}: expected {y}, got {got}");
        }
    }

    #[test]
    fn test_bezier_flat_slope_falls_back() {
        // x(u) has zero slope at u = 0.5, which stalls Newton steps
        let curve = CubicBezier::new(BezierPoint::new(1.0, 0.0), BezierPoint::new(0.0, 1.0));
        for i in 0..=20 {
            let x = i as f32 / 20.0;
            let y = curve.evaluate(x);
            assert!((0.0..=1.0).contains(&y), "x={x} gave {y}");
            let u = curve.solve_parameter(x);
            let residual = CubicBezier::component(u, 1.0, 0.0) - x;
            assert!(residual.abs() < 1e-3, "x={x} residual {residual}");
        }
    }

    #[test]
    fn test_out_of_range_points_are_clamped() {
        let curve = CubicBezier::new(BezierPoint::new(-2.0, 3.0), BezierPoint::new(4.0, -1.0));
        let (p1, p2) = curve.control_points();
        assert_eq!((p1.x, p1.y), (0.0, 1.0));
        assert_eq!((p2.x, p2.y), (1.0, 0.0));
    }

    #[test]
    fn test_monotonic_named_curves() {
        for easing in all_easings().into_iter().take(5) {
            let mut last = 0.0;
            for i in 0..=100 {
                let v = easing.evaluate(i as f32 / 100.0);
                assert!(v + 1e-4 >= last, "{easing:?} not monotonic at {i}");
                last = v;
            }
        }
    }

    #[test]
    fn test_resolve_bezier_without_points_uses_default() {
        let easing = Easing::resolve(GradientMode::Bezier, None);
        let expected = CubicBezier::new(BezierPoint::new(0.25, 0.1), BezierPoint::new(0.75, 0.9));
        assert_eq!(easing, Easing::Bezier(expected));
    }
}
