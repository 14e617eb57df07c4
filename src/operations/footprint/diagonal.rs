use super::{triangular_stairs, CornerFrame};
use crate::geometry::StairFootprint;
use crate::math::distance_2d::point_to_line_dist;

/// 45° corner stairs: an isosceles right triangle with both legs on the walls.
///
/// Step lines run parallel to the hypotenuse at `i / step_count` of the
/// anchor-to-hypotenuse distance, so the smallest tread sits in the corner.
pub(super) fn generate(frame: &CornerFrame, step_count: usize, step_depth: f64) -> StairFootprint {
    #[allow(clippy::cast_precision_loss)]
    let n = step_count as f64;
    let diagonal_size = n * step_depth;

    let base = (frame.at(diagonal_size, 0.0), frame.at(0.0, diagonal_size));
    let height = point_to_line_dist(&frame.anchor, &base.0, &base.1);

    #[allow(clippy::cast_precision_loss)]
    let fractions: Vec<f64> = (1..=step_count).map(|i| i as f64 / n).collect();
    triangular_stairs(frame.anchor, base, &fractions, height)
}
