use serde::{Deserialize, Serialize};

/// What part of the basin a segment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Bottom,
    Wall,
    StairTread,
    StairRiser,
    SplashBottom,
    SplashWall,
    DividingWallPool,
    DividingWallSplash,
    DividingWallTop,
}

/// Seam rules a segment follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentClass {
    /// Horizontal surfaces.
    Bottom,
    /// Vertical surfaces under hydrostatic load.
    Wall,
}

impl SegmentKind {
    #[must_use]
    pub fn class(self) -> SegmentClass {
        match self {
            Self::Bottom | Self::StairTread | Self::SplashBottom | Self::DividingWallTop => {
                SegmentClass::Bottom
            }
            Self::Wall
            | Self::StairRiser
            | Self::SplashWall
            | Self::DividingWallPool
            | Self::DividingWallSplash => SegmentClass::Wall,
        }
    }
}

/// A coverable part of the wetted surface.
///
/// Strips run along `length_along_strip`; `width_to_cover` is split across
/// strips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSegment {
    pub kind: SegmentKind,
    pub width_to_cover: f64,
    pub length_along_strip: f64,
    pub area: f64,
    /// Portion of `width_to_cover` reserved for the wrap onto the floor.
    pub fold_allowance: f64,
    /// Positions along the strip direction where the run turns a corner.
    pub corners: Vec<f64>,
}

impl SurfaceSegment {
    /// Creates a segment whose area is `width_to_cover * length_along_strip`.
    ///
    /// Returns `None` when either extent is not positive; such segments are
    /// dropped rather than emitted.
    #[must_use]
    pub fn new(kind: SegmentKind, width_to_cover: f64, length_along_strip: f64) -> Option<Self> {
        Self::with_area(
            kind,
            width_to_cover,
            length_along_strip,
            width_to_cover * length_along_strip,
        )
    }

    /// Like [`SurfaceSegment::new`] but with an explicitly computed area.
    #[must_use]
    pub fn with_area(
        kind: SegmentKind,
        width_to_cover: f64,
        length_along_strip: f64,
        area: f64,
    ) -> Option<Self> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(width_to_cover) || !usable(length_along_strip) {
            return None;
        }
        Some(Self {
            kind,
            width_to_cover,
            length_along_strip,
            area: area.max(0.0),
            fold_allowance: 0.0,
            corners: Vec::new(),
        })
    }

    /// Records the fold share of the covered width.
    #[must_use]
    pub fn with_fold(mut self, fold_allowance: f64) -> Self {
        self.fold_allowance = fold_allowance;
        self
    }

    /// Marks both run ends as corners, as for a straight wall between two corners.
    #[must_use]
    pub fn cornered(mut self) -> Self {
        self.corners = vec![0.0, self.length_along_strip];
        self
    }

    #[must_use]
    pub fn class(&self) -> SegmentClass {
        self.kind.class()
    }

    /// Covered height without the fold wrap.
    #[must_use]
    pub fn nominal_width(&self) -> f64 {
        self.width_to_cover - self.fold_allowance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_extent_is_dropped() {
        assert!(SurfaceSegment::new(SegmentKind::Wall, 0.0, 5.0).is_none());
        assert!(SurfaceSegment::new(SegmentKind::Wall, 1.0, -2.0).is_none());
        assert!(SurfaceSegment::new(SegmentKind::Wall, f64::NAN, 2.0).is_none());
    }

    #[test]
    fn segment_area_and_corners() {
        let Some(seg) = SurfaceSegment::new(SegmentKind::Wall, 1.65, 8.0) else {
            panic!("segment dropped");
        };
        let seg = seg.with_fold(0.15).cornered();
        assert!((seg.area - 13.2).abs() < 1e-9);
        assert!((seg.nominal_width() - 1.5).abs() < 1e-12);
        assert_eq!(seg.corners, vec![0.0, 8.0]);
    }

    #[test]
    fn classes() {
        assert_eq!(SegmentKind::DividingWallTop.class(), SegmentClass::Bottom);
        assert_eq!(SegmentKind::StairRiser.class(), SegmentClass::Wall);
        assert_eq!(SegmentKind::SplashBottom.class(), SegmentClass::Bottom);
    }
}
