use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;

/// The two stocked roll sizes.
///
/// Ordered narrow first so rolls group and report in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollWidth {
    Narrow,
    Wide,
}

impl RollWidth {
    /// Both sizes, narrow first.
    pub const ALL: [Self; 2] = [Self::Narrow, Self::Wide];

    /// Nominal width in meters.
    #[must_use]
    pub fn meters(self, config: &PlannerConfig) -> f64 {
        match self {
            Self::Narrow => config.narrow_roll_width,
            Self::Wide => config.wide_roll_width,
        }
    }
}

impl fmt::Display for RollWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Narrow => f.write_str("narrow"),
            Self::Wide => f.write_str("wide"),
        }
    }
}

/// Roll size for a wall of the given height.
///
/// The fold allowance is added before comparing with the narrow breakpoint.
/// Heights above one roll width are covered by stacking strips, never by a
/// third size.
#[must_use]
pub fn choose_roll_width(height_to_cover: f64, config: &PlannerConfig) -> RollWidth {
    if height_to_cover + config.fold_allowance <= config.narrow_breakpoint {
        RollWidth::Narrow
    } else {
        RollWidth::Wide
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_includes_fold() {
        let config = PlannerConfig::default();
        assert_eq!(choose_roll_width(1.0, &config), RollWidth::Narrow);
        assert_eq!(choose_roll_width(1.2, &config), RollWidth::Narrow);
        assert_eq!(choose_roll_width(1.3, &config), RollWidth::Wide);
        assert_eq!(choose_roll_width(3.5, &config), RollWidth::Wide);
    }

    #[test]
    fn nominal_widths_come_from_config() {
        let config = PlannerConfig::default();
        assert!((RollWidth::Narrow.meters(&config) - 1.65).abs() < 1e-12);
        assert!((RollWidth::Wide.meters(&config) - 2.05).abs() < 1e-12);
        assert!(RollWidth::Narrow < RollWidth::Wide);
    }
}
