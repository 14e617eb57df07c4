use super::{Point2, Vector2, TOLERANCE};

/// Orientation of the ordered triple `(a, b, c)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// 2D cross product of `b - a` and `c - a`.
#[must_use]
pub fn cross(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Classifies the turn `a → b → c` by the sign of the cross product.
#[must_use]
pub fn orientation(a: &Point2, b: &Point2, c: &Point2) -> Orientation {
    let v = cross(a, b, c);
    if v > TOLERANCE {
        Orientation::CounterClockwise
    } else if v < -TOLERANCE {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Strict segment crossing test.
///
/// Returns `true` only when the open segments `a0→a1` and `b0→b1` cross at a
/// single interior point. Touching at an endpoint or running collinearly
/// does not count.
#[must_use]
pub fn segments_cross(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let o1 = orientation(a0, a1, b0);
    let o2 = orientation(a0, a1, b1);
    let o3 = orientation(b0, b1, a0);
    let o4 = orientation(b0, b1, a1);

    if [o1, o2, o3, o4].contains(&Orientation::Collinear) {
        return false;
    }
    o1 != o2 && o3 != o4
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / denom;
    let u = (dx * d1.y - dy * d1.x) / denom;
    Some((t, u))
}

/// Intersection point of the segment `a→b` with the infinite line through
/// `c` and `d`, used by polygon clipping. Returns `a` when parallel.
#[must_use]
pub fn segment_line_intersection(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> Point2 {
    match line_line_intersect_2d(a, &(b - a), c, &(d - c)) {
        Some((t, _)) => a + (b - a) * t,
        None => *a,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::pt;

    #[test]
    fn orientation_basic() {
        let a = pt(0.0, 0.0);
        let b = pt(1.0, 0.0);
        assert_eq!(orientation(&a, &b, &pt(0.5, 1.0)), Orientation::CounterClockwise);
        assert_eq!(orientation(&a, &b, &pt(0.5, -1.0)), Orientation::Clockwise);
        assert_eq!(orientation(&a, &b, &pt(2.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn crossing_segments() {
        assert!(segments_cross(
            &pt(0.0, 0.0),
            &pt(2.0, 2.0),
            &pt(0.0, 2.0),
            &pt(2.0, 0.0)
        ));
    }

    #[test]
    fn endpoint_touch_is_not_a_crossing() {
        // T-junction: b0 sits on segment a.
        assert!(!segments_cross(
            &pt(0.0, 0.0),
            &pt(2.0, 0.0),
            &pt(1.0, 0.0),
            &pt(1.0, 1.0)
        ));
        // Shared endpoint.
        assert!(!segments_cross(
            &pt(0.0, 0.0),
            &pt(1.0, 1.0),
            &pt(1.0, 1.0),
            &pt(2.0, 0.0)
        ));
    }

    #[test]
    fn disjoint_segments() {
        assert!(!segments_cross(
            &pt(0.0, 0.0),
            &pt(1.0, 0.0),
            &pt(0.0, 1.0),
            &pt(1.0, 1.0)
        ));
    }

    #[test]
    fn line_line_basic() {
        let (t, u) = line_line_intersect_2d(
            &pt(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &pt(3.0, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((t - 3.0).abs() < TOLERANCE);
        assert!((u - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn line_line_parallel() {
        assert!(line_line_intersect_2d(
            &pt(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &pt(0.0, 1.0),
            &Vector2::new(2.0, 0.0),
        )
        .is_none());
    }
}
