use super::CornerFrame;
use crate::geometry::{FootprintPolygon, StairFootprint, StepLine, SubFeature, Tread};

/// Rectangular stairs: `step_count` treads of equal depth stacked along the depth axis.
pub(super) fn generate(
    frame: &CornerFrame,
    width: f64,
    swap_axes: bool,
    step_count: usize,
    step_depth: f64,
) -> StairFootprint {
    // at(w, d) places a point `w` along the width axis and `d` along the depth axis.
    let at = |w: f64, d: f64| {
        if swap_axes {
            frame.at(d, w)
        } else {
            frame.at(w, d)
        }
    };

    #[allow(clippy::cast_precision_loss)]
    let n = step_count as f64;
    let depth = n * step_depth;

    let footprint = FootprintPolygon::new(
        SubFeature::Stairs,
        vec![at(0.0, 0.0), at(width, 0.0), at(width, depth), at(0.0, depth)],
    );

    let step_lines = (1..step_count)
        .map(|j| {
            #[allow(clippy::cast_precision_loss)]
            let d = j as f64 * step_depth;
            StepLine {
                index: j,
                start: at(0.0, d),
                end: at(width, d),
                fraction: d / depth,
            }
        })
        .collect();

    let treads = (0..step_count)
        .map(|j| {
            #[allow(clippy::cast_precision_loss)]
            let (d0, d1) = (j as f64 * step_depth, (j + 1) as f64 * step_depth);
            Tread {
                polygon: vec![at(0.0, d0), at(width, d0), at(width, d1), at(0.0, d1)],
                depth: step_depth,
                width,
            }
        })
        .collect();

    StairFootprint {
        footprint,
        step_lines,
        treads,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::polygon_area;
    use crate::math::{pt, TOLERANCE};

    fn frame() -> CornerFrame {
        let outline = vec![pt(0.0, 0.0), pt(8.0, 0.0), pt(8.0, 4.0), pt(0.0, 4.0)];
        CornerFrame::at_vertex(&outline, 0).unwrap()
    }

    #[test]
    fn rectangle_with_cross_steps() {
        let stairs = generate(&frame(), 1.5, false, 4, 0.3);
        assert!((stairs.footprint.area() - 1.5 * 1.2).abs() < 1e-9);
        assert_eq!(stairs.step_lines.len(), 3);
        assert_eq!(stairs.treads.len(), 4);

        // Width along +x, depth along +y: cross-step lines are horizontal.
        for (k, line) in stairs.step_lines.iter().enumerate() {
            let y = 0.3 * (k + 1) as f64;
            assert!((line.start.y - y).abs() < TOLERANCE);
            assert!((line.end.y - y).abs() < TOLERANCE);
            assert!((line.length() - 1.5).abs() < TOLERANCE);
        }
        let total: f64 = stairs.treads.iter().map(|t| polygon_area(&t.polygon)).sum();
        assert!((total - stairs.footprint.area()).abs() < 1e-9);
    }

    #[test]
    fn swapped_axes() {
        let stairs = generate(&frame(), 1.5, true, 4, 0.3);
        let v = &stairs.footprint.vertices;
        // Width now along +y, depth along +x.
        assert!((v[1] - pt(0.0, 1.5)).norm() < TOLERANCE);
        assert!((v[2] - pt(1.2, 1.5)).norm() < TOLERANCE);
        let line = stairs.step_lines[0];
        assert!((line.start.x - 0.3).abs() < TOLERANCE);
        assert!((line.end.x - 0.3).abs() < TOLERANCE);
    }

    #[test]
    fn single_step_has_no_lines() {
        let stairs = generate(&frame(), 1.0, false, 1, 0.4);
        assert!(stairs.step_lines.is_empty());
        assert_eq!(stairs.treads.len(), 1);
    }
}
