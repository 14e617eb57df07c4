use serde::{Deserialize, Serialize};

use super::strip_plan::Strip;
use crate::config::{JointType, PlannerConfig, MIN_OVERLAP_BOTTOM, MIN_OVERLAP_WALL};
use crate::geometry::{SegmentClass, SurfaceSegment};
use crate::math::TOLERANCE;

/// Distance within which a cut counts as sitting on a corner.
const CORNER_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// Manufacturing rule a strip breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Longer than a roll, or a floor run that needed a cross seam.
    StripTooLong,
    /// Seam overlap below the manufacturer minimum.
    BelowMinimumOverlap,
    /// Vertical wall seam away from a corner.
    VerticalSeamOffCorner,
}

/// A rule violation reported on a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    /// Index of the offending strip in the plan's strip list.
    pub strip: Option<usize>,
}

impl ValidationIssue {
    fn error(code: IssueCode, strip: usize, message: String) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message,
            strip: Some(strip),
        }
    }

    fn warning(code: IssueCode, strip: usize, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message,
            strip: Some(strip),
        }
    }
}

/// Manufacturer minimum overlap for a segment class.
#[must_use]
pub fn minimum_overlap(class: SegmentClass) -> f64 {
    match class {
        SegmentClass::Bottom => MIN_OVERLAP_BOTTOM,
        SegmentClass::Wall => MIN_OVERLAP_WALL,
    }
}

/// Checks every strip against the manufacturing rules.
///
/// Violations are collected, never raised; a plan with issues is still a plan.
#[must_use]
pub fn validate_strips(
    strips: &[Strip],
    segments: &[SurfaceSegment],
    config: &PlannerConfig,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (i, strip) in strips.iter().enumerate() {
        let class = strip.segment_kind.class();

        if strip.strip_length > config.max_roll_length + TOLERANCE {
            issues.push(ValidationIssue::error(
                IssueCode::StripTooLong,
                i,
                format!(
                    "strip of {:.2} m exceeds the {:.2} m roll",
                    strip.strip_length, config.max_roll_length
                ),
            ));
        } else if class == SegmentClass::Bottom && strip.piece_index > 0 {
            issues.push(ValidationIssue::error(
                IssueCode::StripTooLong,
                i,
                format!(
                    "{:.2} m floor run needs a cross seam at {:.2} m",
                    strip.run_length, strip.position_along_length
                ),
            ));
        }

        let min = minimum_overlap(class);
        if config.joint == JointType::Overlap
            && strip.position_along_width > 0.0
            && strip.overlap_with_previous < min - TOLERANCE
        {
            issues.push(ValidationIssue::error(
                IssueCode::BelowMinimumOverlap,
                i,
                format!(
                    "overlap {:.3} m is below the {min:.2} m minimum",
                    strip.overlap_with_previous
                ),
            ));
        }

        if class == SegmentClass::Wall && strip.piece_index > 0 {
            let corners = segments
                .get(strip.segment)
                .map_or(&[][..], |s| s.corners.as_slice());
            let at_corner = corners
                .iter()
                .any(|c| (c - strip.position_along_length).abs() < CORNER_TOLERANCE);
            if !at_corner {
                issues.push(ValidationIssue::warning(
                    IssueCode::VerticalSeamOffCorner,
                    i,
                    format!(
                        "vertical seam at {:.2} m is not on a corner",
                        strip.position_along_length
                    ),
                ));
            }
        }
    }
    issues
}
