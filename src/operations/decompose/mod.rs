mod features;

use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::geometry::pool::STEP_PROFILE_PERIMETER;
use crate::geometry::{PoolShape, PoolSpec, SegmentKind, StairFootprint, SurfaceSegment};
use crate::math::polygon_2d::edges;
use crate::math::Point2;
use crate::operations::footprint::SplashLayout;

/// Coverable segments of a pool together with the accepted sub-feature layouts.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub outline: Vec<Point2>,
    pub segments: Vec<SurfaceSegment>,
    pub splash_pool: Option<SplashLayout>,
    pub stairs: Option<StairFootprint>,
}

/// Splits the wetted surface of a pool into typed coverable segments.
///
/// Sub-feature footprints are validated against the outline (and each other)
/// before their segments are emitted. Segments with a non-positive extent
/// are dropped silently.
pub struct Decompose<'a> {
    spec: &'a PoolSpec,
    config: &'a PlannerConfig,
}

impl<'a> Decompose<'a> {
    /// Creates a new `Decompose` operation.
    #[must_use]
    pub fn new(spec: &'a PoolSpec, config: &'a PlannerConfig) -> Self {
        Self { spec, config }
    }

    /// Executes the decomposition.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` for invalid dimensions, or a
    /// `ConstraintViolation` if a sub-feature footprint is rejected.
    pub fn execute(&self) -> Result<Decomposition> {
        self.spec.validate()?;
        let outline = self.spec.shape.outline();

        let (splash_pool, splash_segments) = match &self.spec.splash_pool {
            Some(splash) => {
                let (layout, segments) =
                    features::splash_pool(self.spec, splash, &outline, self.config)?;
                (Some(layout), segments)
            }
            None => (None, Vec::new()),
        };

        let (stairs, stair_segments) = match &self.spec.stairs {
            Some(input) => {
                let (footprint, segments) = features::stairs(
                    input,
                    &outline,
                    self.spec.splash_pool.as_ref(),
                    splash_pool.as_ref(),
                    self.config,
                )?;
                (Some(footprint), segments)
            }
            None => (None, Vec::new()),
        };

        let mut segments: Vec<SurfaceSegment> = Vec::new();
        segments.extend(self.bottom(splash_pool.as_ref(), stairs.as_ref()));
        segments.extend(self.walls(&outline, splash_pool.as_ref()));
        segments.extend(splash_segments);
        segments.extend(stair_segments);

        debug!(
            segments = segments.len(),
            splash_pool = splash_pool.is_some(),
            stairs = stairs.is_some(),
            "decomposed pool surface"
        );

        Ok(Decomposition {
            outline,
            segments,
            splash_pool,
            stairs,
        })
    }

    /// Main floor left once the sub-features have taken their share.
    fn bottom(
        &self,
        splash: Option<&SplashLayout>,
        stairs: Option<&StairFootprint>,
    ) -> Option<SurfaceSegment> {
        let (mut along, mut across) = self.spec.shape.floor_extent();
        let mut area = self.spec.shape.area();

        if let Some(layout) = splash {
            area -= layout.footprint.area();
            // The splash pool cuts a full-width slice off one end of the floor.
            let axis = self.spec.shape.floor_axis();
            if layout.boundary_frame().along.dot(&axis).abs() > 0.5 {
                along -= layout.length;
            } else {
                across -= layout.length;
            }
        }
        if let Some(stairs) = stairs {
            area -= stairs.footprint.area();
        }
        SurfaceSegment::with_area(SegmentKind::Bottom, across, along, area)
    }

    fn walls(&self, outline: &[Point2], splash: Option<&SplashLayout>) -> Vec<SurfaceSegment> {
        let fold = self.config.fold_allowance;
        let strip_height = self.spec.max_wall_height() + fold;
        let area_height = self.spec.mean_wall_height() + fold;
        let wall = |length: f64| {
            SurfaceSegment::with_area(SegmentKind::Wall, strip_height, length, length * area_height)
                .map(|s| s.with_fold(fold))
        };

        let full: Vec<f64> = edges(outline).map(|(a, b)| (b - a).norm()).collect();
        let runs = self.wall_runs(&full, splash);

        if self.spec.shape.has_curved_wall() {
            // One continuous run; it has no corners to hide seams in.
            let lined: f64 = full.iter().sum::<f64>() - runs.iter().sum::<f64>();
            return wall(self.spec.shape.perimeter() - lined).into_iter().collect();
        }

        let mut walls: Vec<SurfaceSegment> = runs
            .into_iter()
            .filter_map(wall)
            .map(SurfaceSegment::cornered)
            .collect();

        if matches!(self.spec.shape, PoolShape::SteppedRectangle { .. }) {
            walls.extend(wall(STEP_PROFILE_PERIMETER).map(SurfaceSegment::cornered));
        }
        walls
    }

    /// Per-edge wall runs still lined by the main pool.
    ///
    /// The splash pool lines the whole end wall at its corner and the first
    /// `length` of both side walls.
    fn wall_runs(&self, edge_lengths: &[f64], splash: Option<&SplashLayout>) -> Vec<f64> {
        let mut runs = edge_lengths.to_vec();
        let n = runs.len();
        if let (Some(layout), Some(config)) = (splash, &self.spec.splash_pool) {
            if n >= 3 {
                let corner = config.corner % n;
                runs[(corner + n - 1) % n] = 0.0;
                for side in [corner, (corner + n - 2) % n] {
                    runs[side] = (runs[side] - layout.length).max(0.0);
                }
            }
        }
        runs
    }
}
