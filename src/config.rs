//! Planner configuration.
//!
//! Manufacturing constants (roll sizes, seam overlaps, fold allowance) live in
//! one [`PlannerConfig`] value so a caller can load them from a TOML file or
//! override individual fields with the `with_*` builders.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How adjacent strips are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointType {
    /// Strips overlap by the configured seam width and are welded on top.
    #[default]
    Overlap,
    /// Strips meet edge to edge and need a separate butt weld.
    ButtWeld,
}

/// Seam overlap per segment class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeamOverlap {
    /// Overlap between strips on floor-like segments.
    pub bottom: f64,
    /// Overlap between strips on wall-like segments.
    pub wall: f64,
}

impl Default for SeamOverlap {
    fn default() -> Self {
        Self {
            bottom: MIN_OVERLAP_BOTTOM,
            wall: MIN_OVERLAP_WALL,
        }
    }
}

/// Manufacturer minimum overlap on bottom-class seams.
pub const MIN_OVERLAP_BOTTOM: f64 = 0.05;

/// Manufacturer minimum overlap on wall-class seams.
pub const MIN_OVERLAP_WALL: f64 = 0.10;

/// Allowed range for the fold allowance.
pub const FOLD_ALLOWANCE_RANGE: (f64, f64) = (0.10, 0.20);

/// Parameters controlling foil planning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Extra wall height wrapped onto the floor at the wall-to-bottom transition.
    pub fold_allowance: f64,
    /// Seam overlap used when planning strips.
    pub overlap: SeamOverlap,
    /// Nominal width of the narrow roll.
    pub narrow_roll_width: f64,
    /// Nominal width of the wide roll.
    pub wide_roll_width: f64,
    /// Usable length of one roll.
    pub max_roll_length: f64,
    /// Effective wall height up to which the narrow roll is chosen.
    pub narrow_breakpoint: f64,
    /// Fractional seam margin added to the area-based estimate.
    pub seam_margin: f64,
    /// Joint type of the selected sheet material.
    pub joint: JointType,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            fold_allowance: 0.15,
            overlap: SeamOverlap::default(),
            narrow_roll_width: 1.65,
            wide_roll_width: 2.05,
            max_roll_length: 25.0,
            narrow_breakpoint: 1.40,
            seam_margin: 0.10,
            joint: JointType::Overlap,
        }
    }
}

impl PlannerConfig {
    /// Parses a (possibly partial) TOML document over the defaults and validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Toml` on malformed input, or a range error from
    /// [`PlannerConfig::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file, falling back to the defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` when the file exists but cannot be read,
    /// otherwise any error from [`PlannerConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Sets the fold allowance.
    #[must_use]
    pub fn with_fold_allowance(mut self, fold_allowance: f64) -> Self {
        self.fold_allowance = fold_allowance;
        self
    }

    /// Sets the seam overlaps.
    #[must_use]
    pub fn with_overlap(mut self, overlap: SeamOverlap) -> Self {
        self.overlap = overlap;
        self
    }

    /// Sets the material joint type.
    #[must_use]
    pub fn with_joint(mut self, joint: JointType) -> Self {
        self.joint = joint;
        self
    }

    /// Sets the usable roll length.
    #[must_use]
    pub fn with_max_roll_length(mut self, max_roll_length: f64) -> Self {
        self.max_roll_length = max_roll_length;
        self
    }

    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (fold_min, fold_max) = FOLD_ALLOWANCE_RANGE;
        check("fold_allowance", self.fold_allowance, fold_min, fold_max)?;
        check("overlap.bottom", self.overlap.bottom, 0.0, 1.0)?;
        check("overlap.wall", self.overlap.wall, 0.0, 1.0)?;
        check("narrow_roll_width", self.narrow_roll_width, 0.1, 10.0)?;
        check("wide_roll_width", self.wide_roll_width, 0.1, 10.0)?;
        check("max_roll_length", self.max_roll_length, 1.0, 1000.0)?;
        check("narrow_breakpoint", self.narrow_breakpoint, 0.0, 10.0)?;
        check("seam_margin", self.seam_margin, 0.0, 1.0)?;

        if self.narrow_roll_width >= self.wide_roll_width {
            return Err(ConfigError::RollWidthOrder {
                narrow: self.narrow_roll_width,
                wide: self.wide_roll_width,
            });
        }
        // An overlap as wide as the roll would never advance.
        let widest_overlap = self.overlap.bottom.max(self.overlap.wall);
        if widest_overlap >= self.narrow_roll_width {
            return Err(ConfigError::OutOfRange {
                key: "overlap",
                value: widest_overlap,
                min: 0.0,
                max: self.narrow_roll_width,
            });
        }
        Ok(())
    }
}

fn check(key: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            key,
            value,
            min,
            max,
        })
    }
}
