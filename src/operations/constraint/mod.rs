mod editor;

pub use editor::{FootprintEditor, FootprintId};

use tracing::warn;

use crate::error::ConstraintViolation;
use crate::geometry::FootprintPolygon;
use crate::math::polygon_2d::{point_inside_or_on_polygon, polygons_overlap};
use crate::math::Point2;

/// Checks that every footprint vertex lies inside or on the pool outline.
///
/// Boundary contact within the edge tolerance is accepted.
///
/// # Errors
///
/// Returns `ConstraintViolation::OutsidePool` for the first vertex outside
/// the outline, or `Degenerate` for footprints with fewer than 3 vertices.
pub fn validate_polygon_in_pool(
    footprint: &FootprintPolygon,
    pool: &[Point2],
) -> Result<(), ConstraintViolation> {
    if footprint.is_degenerate() {
        return Err(ConstraintViolation::Degenerate {
            feature: footprint.feature,
            vertices: footprint.vertices.len(),
        });
    }
    match footprint
        .vertices
        .iter()
        .position(|p| !point_inside_or_on_polygon(p, pool))
    {
        None => Ok(()),
        Some(vertex) => {
            let p = footprint.vertices[vertex];
            warn!(feature = %footprint.feature, vertex, x = p.x, y = p.y, "footprint leaves the pool");
            Err(ConstraintViolation::OutsidePool {
                feature: footprint.feature,
                vertex,
                x: p.x,
                y: p.y,
            })
        }
    }
}

/// Checks that two footprints share no interior area.
///
/// A common boundary point or edge is allowed.
///
/// # Errors
///
/// Returns `ConstraintViolation::Overlap` if the footprints overlap.
pub fn validate_no_overlap(
    stairs: &FootprintPolygon,
    splash: &FootprintPolygon,
) -> Result<(), ConstraintViolation> {
    if polygons_overlap(&stairs.vertices, &splash.vertices) {
        warn!("stairs footprint overlaps the splash pool");
        return Err(ConstraintViolation::Overlap);
    }
    Ok(())
}

/// Full placement check: inside the pool first, then clear of the other sub-feature.
///
/// Only the first failure is reported.
///
/// # Errors
///
/// Returns the first `ConstraintViolation` found.
pub fn validate_element_placement(
    footprint: &FootprintPolygon,
    pool: &[Point2],
    other: Option<&FootprintPolygon>,
) -> Result<(), ConstraintViolation> {
    validate_polygon_in_pool(footprint, pool)?;
    match other {
        Some(other) => validate_no_overlap(footprint, other),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::SubFeature;
    use crate::math::pt;

    fn pool() -> Vec<Point2> {
        vec![pt(0.0, 0.0), pt(8.0, 0.0), pt(8.0, 4.0), pt(0.0, 4.0)]
    }

    fn rect(feature: SubFeature, x0: f64, y0: f64, x1: f64, y1: f64) -> FootprintPolygon {
        FootprintPolygon::new(
            feature,
            vec![pt(x0, y0), pt(x1, y0), pt(x1, y1), pt(x0, y1)],
        )
    }

    #[test]
    fn splash_on_the_boundary_is_inside() {
        // Every vertex sits exactly on the pool outline.
        let splash = rect(SubFeature::SplashPool, 0.0, 0.0, 2.0, 4.0);
        assert_eq!(validate_polygon_in_pool(&splash, &pool()), Ok(()));
    }

    #[test]
    fn vertex_outside_is_rejected() {
        let stairs = rect(SubFeature::Stairs, 7.0, 3.0, 8.5, 4.0);
        let err = validate_polygon_in_pool(&stairs, &pool()).unwrap_err();
        assert!(matches!(
            err,
            ConstraintViolation::OutsidePool {
                feature: SubFeature::Stairs,
                vertex: 1,
                ..
            }
        ));
    }

    #[test]
    fn slight_overhang_within_tolerance_passes() {
        let stairs = rect(SubFeature::Stairs, 6.5, 3.0, 8.03, 4.03);
        assert_eq!(validate_polygon_in_pool(&stairs, &pool()), Ok(()));
    }

    #[test]
    fn degenerate_footprint_rejected() {
        let fp = FootprintPolygon::new(SubFeature::Stairs, vec![pt(1.0, 1.0), pt(2.0, 1.0)]);
        assert!(matches!(
            validate_polygon_in_pool(&fp, &pool()),
            Err(ConstraintViolation::Degenerate { vertices: 2, .. })
        ));
    }

    #[test]
    fn touching_point_is_not_overlap() {
        let stairs = rect(SubFeature::Stairs, 2.0, 2.0, 3.0, 3.0);
        let splash = rect(SubFeature::SplashPool, 0.0, 0.0, 2.0, 2.0);
        assert_eq!(validate_no_overlap(&stairs, &splash), Ok(()));
    }

    #[test]
    fn shared_edge_is_not_overlap() {
        let stairs = rect(SubFeature::Stairs, 2.0, 0.0, 3.0, 1.2);
        let splash = rect(SubFeature::SplashPool, 0.0, 0.0, 2.0, 4.0);
        assert_eq!(validate_no_overlap(&stairs, &splash), Ok(()));
    }

    #[test]
    fn shared_area_is_overlap() {
        let stairs = rect(SubFeature::Stairs, 1.5, 0.0, 3.0, 1.2);
        let splash = rect(SubFeature::SplashPool, 0.0, 0.0, 2.0, 4.0);
        assert_eq!(
            validate_no_overlap(&stairs, &splash),
            Err(ConstraintViolation::Overlap)
        );
    }

    #[test]
    fn placement_reports_pool_violation_first() {
        // Outside the pool and overlapping: only the pool violation is reported.
        let stairs = rect(SubFeature::Stairs, 1.0, -1.0, 3.0, 1.0);
        let splash = rect(SubFeature::SplashPool, 0.0, 0.0, 2.0, 4.0);
        assert!(matches!(
            validate_element_placement(&stairs, &pool(), Some(&splash)),
            Err(ConstraintViolation::OutsidePool { .. })
        ));

        let inside = rect(SubFeature::Stairs, 1.0, 0.0, 3.0, 1.0);
        assert_eq!(
            validate_element_placement(&inside, &pool(), Some(&splash)),
            Err(ConstraintViolation::Overlap)
        );
        assert_eq!(validate_element_placement(&inside, &pool(), None), Ok(()));
    }
}
