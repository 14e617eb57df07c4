use serde::{Deserialize, Serialize};

use super::pool::positive;
use crate::error::InputError;

/// Thickness of a dividing wall; the width of its top cap.
pub const WALL_THICKNESS: f64 = 0.20;

/// Dividing wall between the main pool and the splash pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividingWall {
    /// Height of the wall above the splash-pool floor.
    pub wall_offset: f64,
}

/// A shallow splash pool spanning the full width of one pool end.
///
/// The splash pool starts at outline vertex `corner` and extends `length`
/// along the edge leaving that vertex; across, it spans the edge arriving at
/// the vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplashPoolConfig {
    #[serde(default)]
    pub corner: usize,
    pub length: f64,
    pub depth: f64,
    #[serde(default)]
    pub dividing_wall: Option<DividingWall>,
}

impl SplashPoolConfig {
    /// Creates a splash pool at outline vertex 0 without a dividing wall.
    #[must_use]
    pub fn new(length: f64, depth: f64) -> Self {
        Self {
            corner: 0,
            length,
            depth,
            dividing_wall: None,
        }
    }

    #[must_use]
    pub fn at_corner(mut self, corner: usize) -> Self {
        self.corner = corner;
        self
    }

    #[must_use]
    pub fn with_dividing_wall(mut self, wall_offset: f64) -> Self {
        self.dividing_wall = Some(DividingWall { wall_offset });
        self
    }

    pub(crate) fn validate(&self, main_depth: f64) -> Result<(), InputError> {
        positive("splash length", self.length)?;
        positive("splash depth", self.depth)?;
        if self.depth >= main_depth {
            return Err(InputError::SubFeature(format!(
                "splash pool depth {} must be shallower than the main pool ({main_depth})",
                self.depth
            )));
        }
        if let Some(wall) = self.dividing_wall {
            positive("dividing wall offset", wall.wall_offset)?;
        }
        Ok(())
    }
}
