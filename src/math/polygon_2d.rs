use super::distance_2d::{closest_point_on_segment, point_to_segment_dist};
use super::intersect_2d::{cross, segment_line_intersection, segments_cross};
use super::{Point2, EDGE_TOLERANCE, SNAP_NUDGE, TOLERANCE};

/// Shared-area threshold below which two polygons only touch.
const OVERLAP_AREA_EPS: f64 = 1e-9;

/// Tolerance used to decide that a vertex sits on the other polygon's boundary
/// rather than strictly inside it.
const STRICT_EDGE_EPS: f64 = 1e-7;

/// Iterates the closing edges `(p[i], p[i+1 mod n])` of a polygon.
pub fn edges(points: &[Point2]) -> impl Iterator<Item = (&Point2, &Point2)> {
    let n = points.len();
    (0..if n < 2 { 0 } else { n }).map(move |i| (&points[i], &points[(i + 1) % n]))
}

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    edges(points).map(|(a, b)| a.x * b.y - b.x * a.y).sum::<f64>() * 0.5
}

/// Unsigned polygon area. Zero for fewer than 3 vertices.
#[must_use]
pub fn polygon_area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Length of the closed boundary. Zero for fewer than 2 vertices.
#[must_use]
pub fn polygon_perimeter(points: &[Point2]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    edges(points).map(|(a, b)| (b - a).norm()).sum()
}

/// Arithmetic mean of the vertices (not the area centroid).
///
/// Returns the origin for an empty polygon.
#[must_use]
pub fn centroid(points: &[Point2]) -> Point2 {
    if points.is_empty() {
        return Point2::origin();
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point2::new(sx / n, sy / n)
}

/// Ray-casting parity test.
///
/// Points on the boundary may land on either side; combine with
/// [`point_on_edge`] when boundary points must count as inside.
#[must_use]
pub fn point_in_polygon(p: &Point2, points: &[Point2]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    for (a, b) in edges(points) {
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// True if `p` is within `tol` of any edge of the polygon.
#[must_use]
pub fn point_on_edge(p: &Point2, points: &[Point2], tol: f64) -> bool {
    if points.len() < 2 {
        return false;
    }
    edges(points)
        .map(|(a, b)| point_to_segment_dist(p, a, b))
        .fold(f64::INFINITY, f64::min)
        <= tol
}

/// Inside by parity, or on the boundary within [`EDGE_TOLERANCE`].
#[must_use]
pub fn point_inside_or_on_polygon(p: &Point2, points: &[Point2]) -> bool {
    point_in_polygon(p, points) || point_on_edge(p, points, EDGE_TOLERANCE)
}

fn strictly_inside(p: &Point2, points: &[Point2]) -> bool {
    point_in_polygon(p, points) && !point_on_edge(p, points, STRICT_EDGE_EPS)
}

/// True if the two polygons share interior area.
///
/// Checks, in order: a vertex of either polygon strictly inside the other,
/// a strict crossing between any pair of edges, and finally a positive clipped
/// area (catches congruent or edge-aligned overlaps where every vertex lies on
/// the other boundary). Touching at a point or along an edge is not overlap.
#[must_use]
pub fn polygons_overlap(a: &[Point2], b: &[Point2]) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }
    if a.iter().any(|p| strictly_inside(p, b)) || b.iter().any(|p| strictly_inside(p, a)) {
        return true;
    }
    for (a0, a1) in edges(a) {
        for (b0, b1) in edges(b) {
            if segments_cross(a0, a1, b0, b1) {
                return true;
            }
        }
    }
    polygon_area(&clip_polygon(a, b)) > OVERLAP_AREA_EPS
}

/// Sutherland–Hodgman clip of `subject` against the convex polygon `clip`.
///
/// The clip polygon may have either winding. Returns an empty vector when the
/// polygons do not overlap or either input is degenerate.
#[must_use]
pub fn clip_polygon(subject: &[Point2], clip: &[Point2]) -> Vec<Point2> {
    if subject.len() < 3 || clip.len() < 3 {
        return Vec::new();
    }
    let mut clip_ccw = clip.to_vec();
    if signed_area(&clip_ccw) < 0.0 {
        clip_ccw.reverse();
    }

    let mut output = subject.to_vec();
    for (c0, c1) in edges(&clip_ccw) {
        if output.is_empty() {
            break;
        }
        let input = std::mem::take(&mut output);
        let inside = |p: &Point2| cross(c0, c1, p) >= -TOLERANCE;

        for (i, current) in input.iter().enumerate() {
            let prev = &input[(i + input.len() - 1) % input.len()];
            match (inside(prev), inside(current)) {
                (true, true) => output.push(*current),
                (true, false) => output.push(segment_line_intersection(prev, current, c0, c1)),
                (false, true) => {
                    output.push(segment_line_intersection(prev, current, c0, c1));
                    output.push(*current);
                }
                (false, false) => {}
            }
        }
    }

    if output.len() < 3 || polygon_area(&output) < TOLERANCE {
        return Vec::new();
    }
    output
}

/// Snaps a dragged point back into the polygon.
///
/// Points already inside or on the boundary are returned unchanged. Otherwise
/// the nearest boundary point is found and nudged [`SNAP_NUDGE`] toward the
/// vertex centroid. Degenerate polygons return the point unchanged.
#[must_use]
pub fn constrain_point_to_polygon(p: &Point2, points: &[Point2]) -> Point2 {
    if points.len() < 3 || point_inside_or_on_polygon(p, points) {
        return *p;
    }

    let mut nearest = *p;
    let mut best = f64::INFINITY;
    for (a, b) in edges(points) {
        let c = closest_point_on_segment(p, a, b);
        let d = (p - c).norm();
        if d < best {
            best = d;
            nearest = c;
        }
    }

    let toward = centroid(points) - nearest;
    let len = toward.norm();
    if len < TOLERANCE {
        return nearest;
    }
    nearest + toward * (SNAP_NUDGE.min(len) / len)
}

/// Axis-aligned bounds `(min, max)` of a point set, or `None` if empty.
#[must_use]
pub fn bounds(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = points.first()?;
    let mut lo = *first;
    let mut hi = *first;
    for p in &points[1..] {
        lo.x = lo.x.min(p.x);
        lo.y = lo.y.min(p.y);
        hi.x = hi.x.max(p.x);
        hi.y = hi.y.max(p.y);
    }
    Some((lo, hi))
}
