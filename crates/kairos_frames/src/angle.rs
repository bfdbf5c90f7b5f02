//! Angle normalization.
//!
//! Every angular difference in the workspace goes through this module.
//! Raw subtraction of longitudes breaks at the 0°/360° seam.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to (-180, +180] degrees.
pub fn normalize_pm180(deg: f64) -> f64 {
    let r = normalize_360(deg);
    if r > 180.0 { r - 360.0 } else { r }
}

/// Signed shortest arc from `from` to `to`, in (-180, +180].
pub fn signed_arc(from: f64, to: f64) -> f64 {
    normalize_pm180(to - from)
}

/// Forward (counter-clockwise) arc from `from` to `to`, in [0, 360).
pub fn arc_forward(from: f64, to: f64) -> f64 {
    normalize_360(to - from)
}

/// Unsigned angular separation folded into [0, 180].
///
/// Separations beyond 180° are equivalent to their 360° complement.
pub fn separation_deg(a: f64, b: f64) -> f64 {
    signed_arc(a, b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero() {
        assert_eq!(normalize_360(0.0), 0.0);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_large() {
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
        assert!((normalize_360(-370.0) - 350.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_tiny_negative_stays_in_range() {
        let r = normalize_360(-1e-17);
        assert!((0.0..360.0).contains(&r), "r = {r}");
    }

    #[test]
    fn wraparound_idempotence() {
        for i in -50..50 {
            let a = i as f64 * 37.3 + 0.123;
            assert!(
                (normalize_360(a + 360.0) - normalize_360(a)).abs() < 1e-9,
                "a = {a}"
            );
            assert!((normalize_360(normalize_360(a)) - normalize_360(a)).abs() < 1e-12);
        }
    }

    #[test]
    fn pm180_basic() {
        assert!((normalize_pm180(180.0) - 180.0).abs() < 1e-10);
        assert!((normalize_pm180(-180.0) - 180.0).abs() < 1e-10);
        assert!((normalize_pm180(270.0) + 90.0).abs() < 1e-10);
        assert!((normalize_pm180(-270.0) - 90.0).abs() < 1e-10);
        assert!((normalize_pm180(450.0) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn separation_across_seam() {
        assert!((separation_deg(359.0, 1.0) - 2.0).abs() < 1e-10);
        assert!((separation_deg(1.0, 359.0) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn separation_folds_beyond_180() {
        assert!((separation_deg(10.0, 250.0) - 120.0).abs() < 1e-10);
        assert!((separation_deg(0.0, 180.0) - 180.0).abs() < 1e-10);
    }

    #[test]
    fn arc_forward_wraps() {
        assert!((arc_forward(350.0, 20.0) - 30.0).abs() < 1e-10);
        assert!((arc_forward(10.0, 40.0) - 30.0).abs() < 1e-10);
    }

    #[test]
    fn signed_arc_direction() {
        assert!((signed_arc(350.0, 10.0) - 20.0).abs() < 1e-10);
        assert!((signed_arc(10.0, 350.0) + 20.0).abs() < 1e-10);
    }
}
