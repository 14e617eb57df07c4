use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::geometry::PoolSpec;
use crate::operations::layout::RollWidth;

/// Roll count for covering an area with one roll size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollQuote {
    pub roll_width: RollWidth,
    /// Area of one full roll.
    pub roll_area: f64,
    pub rolls: usize,
    pub waste_area: f64,
}

/// Area-based material quote, made before any strip is planned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialEstimate {
    pub bottom_area: f64,
    pub wall_area: f64,
    /// Bottom plus walls, before surcharges.
    pub base_area: f64,
    /// Base area with the irregular-shape surcharge and the seam margin.
    pub total_area: f64,
    pub narrow: RollQuote,
    pub wide: RollQuote,
    pub preferred: RollWidth,
}

/// Estimates foil area and roll counts from closed-form pool area and perimeter.
pub struct EstimateMaterial<'a> {
    spec: &'a PoolSpec,
    config: &'a PlannerConfig,
}

impl<'a> EstimateMaterial<'a> {
    /// Creates a new `EstimateMaterial` operation.
    #[must_use]
    pub fn new(spec: &'a PoolSpec, config: &'a PlannerConfig) -> Self {
        Self { spec, config }
    }

    /// Executes the estimate.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` or `InputError` for invalid parameters.
    pub fn execute(&self) -> Result<MaterialEstimate> {
        self.config.validate()?;
        self.spec.validate()?;

        let bottom_area = self.spec.shape.area();
        let wall_area = self.spec.shape.perimeter() * self.spec.mean_wall_height();
        let base_area = bottom_area + wall_area;
        let total_area = base_area
            * (1.0 + self.spec.irregular_surcharge_pct / 100.0)
            * (1.0 + self.config.seam_margin);

        let narrow = self.quote(RollWidth::Narrow, total_area);
        let wide = self.quote(RollWidth::Wide, total_area);
        let preferred = if narrow.waste_area <= wide.waste_area {
            RollWidth::Narrow
        } else {
            RollWidth::Wide
        };

        debug!(total_area, narrow = narrow.rolls, wide = wide.rolls, %preferred, "material estimated");

        Ok(MaterialEstimate {
            bottom_area,
            wall_area,
            base_area,
            total_area,
            narrow,
            wide,
            preferred,
        })
    }

    fn quote(&self, roll_width: RollWidth, total_area: f64) -> RollQuote {
        let roll_area = roll_width.meters(self.config) * self.config.max_roll_length;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rolls = (total_area / roll_area).ceil() as usize;
        #[allow(clippy::cast_precision_loss)]
        let waste_area = rolls as f64 * roll_area - total_area;
        RollQuote {
            roll_width,
            roll_area,
            rolls,
            waste_area,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{DepthProfile, PoolShape};
    use approx::assert_relative_eq;

    fn rect_pool() -> PoolSpec {
        PoolSpec::new(
            PoolShape::Rectangle {
                length: 8.0,
                width: 4.0,
            },
            DepthProfile::Flat { depth: 1.4 },
        )
    }

    #[test]
    fn rectangle_quote() {
        let config = PlannerConfig::default();
        let spec = rect_pool();
        let estimate = EstimateMaterial::new(&spec, &config).execute().unwrap();

        assert_relative_eq!(estimate.bottom_area, 32.0);
        assert_relative_eq!(estimate.wall_area, 36.0, epsilon = 1e-9);
        assert_relative_eq!(estimate.base_area, 68.0, epsilon = 1e-9);
        assert_relative_eq!(estimate.total_area, 74.8, epsilon = 1e-9);

        assert_eq!(estimate.narrow.rolls, 2);
        assert_relative_eq!(estimate.narrow.waste_area, 7.7, epsilon = 1e-9);
        assert_eq!(estimate.wide.rolls, 2);
        assert_relative_eq!(estimate.wide.waste_area, 27.7, epsilon = 1e-9);
        assert_eq!(estimate.preferred, RollWidth::Narrow);
    }

    #[test]
    fn surcharge_raises_total() {
        let config = PlannerConfig::default();
        let spec = rect_pool().with_irregular_surcharge(10.0);
        let estimate = EstimateMaterial::new(&spec, &config).execute().unwrap();
        assert_relative_eq!(estimate.total_area, 68.0 * 1.1 * 1.1, epsilon = 1e-9);
    }

    #[test]
    fn gutter_pool_has_no_freeboard() {
        let config = PlannerConfig::default();
        let spec = rect_pool().with_overflow(crate::geometry::OverflowType::Overflow);
        let estimate = EstimateMaterial::new(&spec, &config).execute().unwrap();
        assert_relative_eq!(estimate.wall_area, 24.0 * 1.4, epsilon = 1e-9);
    }
}
