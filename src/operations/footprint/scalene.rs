use super::triangular_stairs;
use crate::geometry::StairFootprint;
use crate::math::distance_2d::point_to_line_dist;
use crate::math::Point2;

/// Leg length difference below which a triangle is laid out as isosceles.
pub(crate) const ISOSCELES_TOLERANCE: f64 = 0.10;

/// Stairs filling a free triangle.
///
/// The longest edge is the base and the opposite vertex the apex. Tread
/// depths grow linearly from `min_depth` at the apex to `max_depth` at the
/// base and are rescaled to sum to the apex height.
pub(super) fn generate(
    vertices: &[Point2; 3],
    step_count: usize,
    min_depth: f64,
    max_depth: f64,
) -> StairFootprint {
    let edge_len = |i: usize| (vertices[(i + 1) % 3] - vertices[i]).norm();
    let base_start = (0..3)
        .max_by(|&a, &b| edge_len(a).total_cmp(&edge_len(b)))
        .unwrap_or(0);

    let base = (vertices[base_start], vertices[(base_start + 1) % 3]);
    let apex = vertices[(base_start + 2) % 3];
    let height = point_to_line_dist(&apex, &base.0, &base.1);

    let leg_a = (base.0 - apex).norm();
    let leg_b = (base.1 - apex).norm();
    let depths = if (leg_a - leg_b).abs() > ISOSCELES_TOLERANCE {
        expanding_depths(step_count, min_depth, max_depth, height)
    } else {
        #[allow(clippy::cast_precision_loss)]
        let even = height / step_count as f64;
        vec![even; step_count]
    };

    let mut fractions = Vec::with_capacity(depths.len());
    let mut acc = 0.0;
    for d in &depths {
        acc += d;
        fractions.push(if height > 0.0 { acc / height } else { 0.0 });
    }
    if let Some(last) = fractions.last_mut() {
        // Absorb rounding so the last tread closes exactly on the base.
        *last = 1.0;
    }

    triangular_stairs(apex, base, &fractions, height)
}

/// Linearly growing tread depths, rescaled to sum to `height`.
pub(crate) fn expanding_depths(step_count: usize, min_depth: f64, max_depth: f64, height: f64) -> Vec<f64> {
    if step_count == 0 {
        return Vec::new();
    }
    if step_count == 1 {
        return vec![height];
    }
    #[allow(clippy::cast_precision_loss)]
    let last = (step_count - 1) as f64;
    let raw: Vec<f64> = (0..step_count)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let t = k as f64 / last;
            min_depth + (max_depth - min_depth) * t
        })
        .collect();
    let sum: f64 = raw.iter().sum();
    if sum <= 0.0 {
        #[allow(clippy::cast_precision_loss)]
        return vec![height / step_count as f64; step_count];
    }
    raw.iter().map(|d| d * height / sum).collect()
}
