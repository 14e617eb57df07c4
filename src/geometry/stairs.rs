use serde::{Deserialize, Serialize};

use super::pool::positive;
use crate::error::InputError;
use crate::math::Point2;

/// Most steps a single stair may have.
pub const MAX_STEPS: usize = 40;

/// Stair topology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StairShape {
    /// Rectangle against two walls. Width runs along the edge leaving the
    /// anchor vertex and depth along the arriving edge, unless `swap_axes`.
    Rectangular { width: f64, swap_axes: bool },
    /// Isosceles right triangle filling the anchor corner.
    Diagonal45,
    /// Free triangle given in pool coordinates; the anchor is ignored.
    ScaleneTriangle {
        vertices: [Point2; 3],
        min_tread_depth: f64,
        max_tread_depth: f64,
    },
}

/// Where a stair footprint is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StairAnchor {
    /// An outline vertex; the two adjacent walls give the inward directions.
    PoolCorner { index: usize },
    /// Where the splash pool's dividing wall meets the pool wall.
    SplashBoundary,
}

/// Canonical stair description consumed by the footprint generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StairsConfig {
    pub shape: StairShape,
    pub anchor: StairAnchor,
    pub step_count: usize,
    pub step_depth: f64,
    pub riser_height: f64,
}

/// Placement vocabulary of older quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyPlacement {
    CornerLeft,
    CornerRight,
    FullWidth,
    DiagonalCorner,
}

/// Placement-based stairs as stored by older quotes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyStairs {
    pub placement: LegacyPlacement,
    pub width: f64,
    pub step_count: usize,
    pub step_depth: f64,
    pub riser_height: f64,
}

/// Stairs as received from the caller, in either vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StairsInput {
    Shaped(StairsConfig),
    Legacy(LegacyStairs),
}

impl StairsInput {
    /// Resolves legacy placements into the canonical [`StairsConfig`].
    ///
    /// Corner placements sit at the pool's start end (`corner_left` at the
    /// first outline vertex, `corner_right` at the last) with the stair width
    /// running along the end wall. `full_width` spans the whole end wall.
    ///
    /// # Errors
    ///
    /// Returns `InputError::TooFewVertices` for outlines with fewer than 3 vertices.
    pub fn normalize(&self, outline: &[Point2]) -> Result<StairsConfig, InputError> {
        let legacy = match self {
            Self::Shaped(config) => return Ok(*config),
            Self::Legacy(legacy) => legacy,
        };
        let n = outline.len();
        if n < 3 {
            return Err(InputError::TooFewVertices(n));
        }

        let (shape, index) = match legacy.placement {
            LegacyPlacement::CornerLeft => (
                StairShape::Rectangular {
                    width: legacy.width,
                    swap_axes: true,
                },
                0,
            ),
            LegacyPlacement::CornerRight => (
                StairShape::Rectangular {
                    width: legacy.width,
                    swap_axes: false,
                },
                n - 1,
            ),
            LegacyPlacement::FullWidth => (
                StairShape::Rectangular {
                    width: (outline[n - 1] - outline[0]).norm(),
                    swap_axes: true,
                },
                0,
            ),
            LegacyPlacement::DiagonalCorner => (StairShape::Diagonal45, 0),
        };

        Ok(StairsConfig {
            shape,
            anchor: StairAnchor::PoolCorner { index },
            step_count: legacy.step_count,
            step_depth: legacy.step_depth,
            riser_height: legacy.riser_height,
        })
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        let (step_count, step_depth, riser_height) = match self {
            Self::Shaped(c) => (c.step_count, c.step_depth, c.riser_height),
            Self::Legacy(l) => {
                if l.placement != LegacyPlacement::FullWidth
                    && l.placement != LegacyPlacement::DiagonalCorner
                {
                    positive("stair width", l.width)?;
                }
                (l.step_count, l.step_depth, l.riser_height)
            }
        };
        if step_count == 0 {
            return Err(InputError::SubFeature("stairs need at least one step".to_owned()));
        }
        if step_count > MAX_STEPS {
            return Err(InputError::SubFeature(format!(
                "stairs have {step_count} steps, at most {MAX_STEPS} are supported"
            )));
        }
        positive("step depth", step_depth)?;
        positive("riser height", riser_height)?;

        if let Self::Shaped(config) = self {
            match config.shape {
                StairShape::Rectangular { width, .. } => positive("stair width", width)?,
                StairShape::Diagonal45 => {}
                StairShape::ScaleneTriangle {
                    min_tread_depth,
                    max_tread_depth,
                    ..
                } => {
                    positive("min tread depth", min_tread_depth)?;
                    positive("max tread depth", max_tread_depth)?;
                    if min_tread_depth > max_tread_depth {
                        return Err(InputError::SubFeature(
                            "min tread depth exceeds max tread depth".to_owned(),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
