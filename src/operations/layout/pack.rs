use serde::{Deserialize, Serialize};
use tracing::trace;

use super::roll_width::RollWidth;
use super::strip_plan::Strip;
use crate::math::TOLERANCE;

/// Strips cut from one physical roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollAllocation {
    pub roll_width: RollWidth,
    /// Indices into the plan's strip list, in cutting order.
    pub strips: Vec<usize>,
    pub used_length: f64,
    pub waste_length: f64,
}

impl RollAllocation {
    fn open(roll_width: RollWidth) -> Self {
        Self {
            roll_width,
            strips: Vec::new(),
            used_length: 0.0,
            waste_length: 0.0,
        }
    }
}

/// Packs strips into rolls of `max_roll_length` with first-fit-decreasing.
///
/// Strips are grouped by roll width (narrow first) and never mixed within a
/// roll. Within a group, strips are placed longest first into the first roll
/// with room, opening a new roll when none fits. Equal lengths keep their
/// input order.
#[must_use]
pub fn pack_strips_into_rolls(strips: &[Strip], max_roll_length: f64) -> Vec<RollAllocation> {
    let mut rolls = Vec::new();

    for width in RollWidth::ALL {
        let mut order: Vec<usize> = strips
            .iter()
            .enumerate()
            .filter(|(_, s)| s.roll_width == width)
            .map(|(i, _)| i)
            .collect();
        order.sort_by(|&a, &b| strips[b].strip_length.total_cmp(&strips[a].strip_length));

        let mut group: Vec<RollAllocation> = Vec::new();
        for index in order {
            let length = strips[index].strip_length;
            let slot = group
                .iter()
                .position(|r| r.used_length + length <= max_roll_length + TOLERANCE);
            let roll = match slot {
                Some(slot) => slot,
                None => {
                    group.push(RollAllocation::open(width));
                    group.len() - 1
                }
            };
            group[roll].strips.push(index);
            group[roll].used_length += length;
            trace!(strip = index, roll, %width, length, "strip placed");
        }
        rolls.extend(group);
    }

    for roll in &mut rolls {
        roll.waste_length = (max_roll_length - roll.used_length).max(0.0);
    }
    rolls
}
