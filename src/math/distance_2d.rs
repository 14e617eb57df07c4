use super::Point2;

/// Returns the point on segment `a`→`b` closest to `p`.
#[must_use]
pub fn closest_point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return *a;
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    a + d * t
}

/// Returns the minimum distance from `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    (p - closest_point_on_segment(p, a, b)).norm()
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// Falls back to the point-to-point distance when `a == b`.
#[must_use]
pub fn point_to_line_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < 1e-10 {
        return (p - a).norm();
    }
    let v = p - a;
    (d.x * v.y - d.y * v.x).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::pt;

    const TOL: f64 = 1e-10;

    #[test]
    fn segment_dist_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let d = point_to_segment_dist(&pt(1.0, 1.0), &pt(0.0, 0.0), &pt(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(&pt(-1.0, 0.0), &pt(0.0, 0.0), &pt(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_on_segment() {
        let d = point_to_segment_dist(&pt(1.0, 0.0), &pt(0.0, 0.0), &pt(2.0, 0.0));
        assert!(d.abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        // Zero-length segment: distance is point-to-point.
        let d = point_to_segment_dist(&pt(3.0, 4.0), &pt(0.0, 0.0), &pt(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn closest_point_clamps_to_end() {
        let c = closest_point_on_segment(&pt(5.0, 1.0), &pt(0.0, 0.0), &pt(2.0, 0.0));
        assert!((c.x - 2.0).abs() < TOL);
        assert!(c.y.abs() < TOL);
    }

    #[test]
    fn line_dist_ignores_segment_extent() {
        let d = point_to_line_dist(&pt(10.0, 3.0), &pt(0.0, 0.0), &pt(1.0, 0.0));
        assert!((d - 3.0).abs() < TOL, "d={d}");
    }
}
