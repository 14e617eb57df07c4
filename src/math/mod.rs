pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type, meters in the pool-local plan frame.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance within which a point counts as lying on a polygon edge.
pub const EDGE_TOLERANCE: f64 = 0.05;

/// Distance a snapped point is pushed from the boundary toward the centroid.
pub const SNAP_NUDGE: f64 = 0.05;

/// Shorthand constructor used throughout the crate and its tests.
#[must_use]
pub fn pt(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}
