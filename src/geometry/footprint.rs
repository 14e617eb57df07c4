use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::polygon_2d::polygon_area;
use crate::math::Point2;

/// Optional pool sub-feature owning a footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubFeature {
    Stairs,
    SplashPool,
}

impl fmt::Display for SubFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stairs => f.write_str("stairs"),
            Self::SplashPool => f.write_str("splash pool"),
        }
    }
}

/// Plan-view polygon of a sub-feature inside the pool outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintPolygon {
    pub feature: SubFeature,
    pub vertices: Vec<Point2>,
}

impl FootprintPolygon {
    /// Creates a footprint for the given sub-feature.
    #[must_use]
    pub fn new(feature: SubFeature, vertices: Vec<Point2>) -> Self {
        Self { feature, vertices }
    }

    /// Plan-view area of the footprint.
    #[must_use]
    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices)
    }

    /// True when the footprint has fewer than 3 vertices.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }
}

/// A line separating two adjacent treads.
///
/// `index` counts from the anchor side starting at 1; `fraction` is the
/// line's distance from the anchor relative to the full stair depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepLine {
    pub index: usize,
    pub start: Point2,
    pub end: Point2,
    pub fraction: f64,
}

impl StepLine {
    /// Length of the line, i.e. the width of the tread edge it bounds.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// One walkable step region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tread {
    pub polygon: Vec<Point2>,
    /// Extent of the tread measured across the step lines.
    pub depth: f64,
    /// Length of the tread's outer edge (the riser it sits on).
    pub width: f64,
}

impl Tread {
    #[must_use]
    pub fn area(&self) -> f64 {
        polygon_area(&self.polygon)
    }
}

/// Complete stair layout: outline, step lines and treads ordered from the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairFootprint {
    pub footprint: FootprintPolygon,
    pub step_lines: Vec<StepLine>,
    pub treads: Vec<Tread>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::pt;

    #[test]
    fn footprint_area_and_degeneracy() {
        let fp = FootprintPolygon::new(
            SubFeature::Stairs,
            vec![pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 1.0), pt(0.0, 1.0)],
        );
        assert!((fp.area() - 2.0).abs() < 1e-12);
        assert!(!fp.is_degenerate());
        assert!(FootprintPolygon::new(SubFeature::SplashPool, vec![pt(0.0, 0.0)]).is_degenerate());
    }

    #[test]
    fn feature_names() {
        assert_eq!(SubFeature::Stairs.to_string(), "stairs");
        assert_eq!(SubFeature::SplashPool.to_string(), "splash pool");
    }
}
