use serde::{Deserialize, Serialize};
use tracing::debug;

use super::roll_width::RollWidth;
use crate::config::{JointType, PlannerConfig};
use crate::geometry::{SegmentClass, SegmentKind, SurfaceSegment};
use crate::math::TOLERANCE;

/// One strip across the width of a segment, before length cuts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripSpan {
    pub used_width: f64,
    pub overlap: f64,
    /// Offset of the strip's leading edge from the start of the covered width.
    pub position_along_width: f64,
}

/// A piece of foil cut from a roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strip {
    /// Index of the covered segment in the plan's segment list.
    pub segment: usize,
    pub segment_kind: SegmentKind,
    pub roll_width: RollWidth,
    pub used_width: f64,
    pub strip_length: f64,
    pub overlap_with_previous: f64,
    pub position_along_width: f64,
    /// Start of this piece along the segment's run.
    pub position_along_length: f64,
    /// 0 for the first piece of a run cut to fit the roll length.
    pub piece_index: usize,
    /// Length of the whole run this piece was cut from.
    pub run_length: f64,
}

impl Strip {
    /// Area of foil the strip takes from the roll.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.used_width * self.strip_length
    }
}

/// Splits a width into overlapping strips.
///
/// The first strip covers `min(roll_width, width_to_cover)` with no overlap;
/// each further strip covers `min(roll_width, remaining + min_overlap)` and
/// overlaps its predecessor by `min_overlap`. Returns no strips when the
/// width is not positive or the overlap leaves no net coverage.
#[must_use]
pub fn plan_strips(width_to_cover: f64, roll_width: f64, min_overlap: f64) -> Vec<StripSpan> {
    if !(width_to_cover.is_finite() && width_to_cover > 0.0) || roll_width <= min_overlap {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut covered = 0.0;
    while covered < width_to_cover - TOLERANCE {
        let remaining = width_to_cover - covered;
        let span = if spans.is_empty() {
            StripSpan {
                used_width: roll_width.min(width_to_cover),
                overlap: 0.0,
                position_along_width: 0.0,
            }
        } else {
            StripSpan {
                used_width: roll_width.min(remaining + min_overlap),
                overlap: min_overlap,
                position_along_width: covered - min_overlap,
            }
        };
        covered += span.used_width - span.overlap;
        spans.push(span);
    }
    spans
}

/// Seam overlap applied between strips of a segment class.
#[must_use]
pub fn seam_overlap(class: SegmentClass, config: &PlannerConfig) -> f64 {
    match config.joint {
        JointType::ButtWeld => 0.0,
        JointType::Overlap => match class {
            SegmentClass::Bottom => config.overlap.bottom,
            SegmentClass::Wall => config.overlap.wall,
        },
    }
}

/// Roll size for a floor-like segment.
///
/// Compares narrow-only against wide-only coverage by wasted width
/// (`strips * roll - width`); ties go to fewer strips, then to narrow.
#[must_use]
pub fn choose_bottom_roll_width(width_to_cover: f64, config: &PlannerConfig) -> RollWidth {
    let overlap = seam_overlap(SegmentClass::Bottom, config);
    let evaluate = |roll: RollWidth| {
        let meters = roll.meters(config);
        let strips = plan_strips(width_to_cover, meters, overlap).len();
        #[allow(clippy::cast_precision_loss)]
        let waste = strips as f64 * meters - width_to_cover;
        (roll, waste, strips)
    };

    let (narrow, wide) = (evaluate(RollWidth::Narrow), evaluate(RollWidth::Wide));
    let pick = if (narrow.1 - wide.1).abs() > TOLERANCE {
        if narrow.1 < wide.1 {
            narrow
        } else {
            wide
        }
    } else if wide.2 < narrow.2 {
        wide
    } else {
        narrow
    };
    debug!(
        width_to_cover,
        narrow_waste = narrow.1,
        wide_waste = wide.1,
        roll = %pick.0,
        "bottom roll width chosen"
    );
    pick.0
}

/// Plans the strips covering one segment with the given roll size.
///
/// Runs longer than the maximum roll length are cut into consecutive pieces.
#[must_use]
pub fn strips_for_segment(
    index: usize,
    segment: &SurfaceSegment,
    roll_width: RollWidth,
    config: &PlannerConfig,
) -> Vec<Strip> {
    let overlap = seam_overlap(segment.class(), config);
    let spans = plan_strips(segment.width_to_cover, roll_width.meters(config), overlap);
    let pieces = cut_run(segment.length_along_strip, config.max_roll_length);

    let mut strips = Vec::with_capacity(spans.len() * pieces.len());
    for span in &spans {
        for (piece_index, &(start, length)) in pieces.iter().enumerate() {
            strips.push(Strip {
                segment: index,
                segment_kind: segment.kind,
                roll_width,
                used_width: span.used_width,
                strip_length: length,
                overlap_with_previous: span.overlap,
                position_along_width: span.position_along_width,
                position_along_length: start,
                piece_index,
                run_length: segment.length_along_strip,
            });
        }
    }
    strips
}

/// Cuts a run into `(start, length)` pieces no longer than `max_length`.
fn cut_run(run_length: f64, max_length: f64) -> Vec<(f64, f64)> {
    if run_length <= max_length + TOLERANCE || max_length <= 0.0 {
        return vec![(0.0, run_length)];
    }
    let mut pieces = Vec::new();
    let mut start = 0.0;
    while start < run_length - TOLERANCE {
        let length = (run_length - start).min(max_length);
        pieces.push((start, length));
        start += length;
    }
    pieces
}
