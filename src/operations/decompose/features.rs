use crate::config::PlannerConfig;
use crate::error::Result;
use crate::geometry::splash::WALL_THICKNESS;
use crate::geometry::{
    PoolSpec, SegmentKind, SplashPoolConfig, StairFootprint, StairsInput, SurfaceSegment,
};
use crate::math::Point2;
use crate::operations::constraint::{validate_element_placement, validate_polygon_in_pool};
use crate::operations::footprint::{GenerateSplashPool, GenerateStairs, SplashLayout};

/// Lays out the splash pool and emits its bottom, walls and dividing wall.
pub(super) fn splash_pool(
    spec: &PoolSpec,
    splash: &SplashPoolConfig,
    outline: &[Point2],
    config: &PlannerConfig,
) -> Result<(SplashLayout, Vec<SurfaceSegment>)> {
    let layout = GenerateSplashPool::new(splash, outline).execute()?;
    validate_polygon_in_pool(&layout.footprint, outline)?;

    let fold = config.fold_allowance;
    let (length, end_width) = (layout.length, layout.end_width);
    let mut segments = Vec::new();

    segments.extend(SurfaceSegment::with_area(
        SegmentKind::SplashBottom,
        length.min(end_width),
        length.max(end_width),
        length * end_width,
    ));

    let wall_height = splash.depth + spec.overflow.freeboard() + fold;
    // End wall, then the two side walls.
    for run in [end_width, length, length] {
        segments.extend(
            SurfaceSegment::new(SegmentKind::SplashWall, wall_height, run)
                .map(|s| s.with_fold(fold).cornered()),
        );
    }

    if let Some(wall) = splash.dividing_wall {
        let pool_side = spec.depth.max() - splash.depth + fold;
        segments.extend(
            SurfaceSegment::new(SegmentKind::DividingWallPool, pool_side, end_width)
                .map(|s| s.with_fold(fold).cornered()),
        );
        segments.extend(
            SurfaceSegment::new(SegmentKind::DividingWallSplash, wall.wall_offset + fold, end_width)
                .map(|s| s.with_fold(fold).cornered()),
        );
        segments.extend(SurfaceSegment::new(
            SegmentKind::DividingWallTop,
            WALL_THICKNESS,
            end_width,
        ));
    }

    Ok((layout, segments))
}

/// Generates the stair footprint, checks its placement and emits treads and risers.
pub(super) fn stairs(
    input: &StairsInput,
    outline: &[Point2],
    splash: Option<&SplashPoolConfig>,
    splash_layout: Option<&SplashLayout>,
    config: &PlannerConfig,
) -> Result<(StairFootprint, Vec<SurfaceSegment>)> {
    let stairs_config = input.normalize(outline)?;
    let mut generate = GenerateStairs::new(stairs_config, outline);
    if let Some(splash) = splash {
        generate = generate.with_splash_pool(splash);
    }
    let footprint = generate.execute()?;
    validate_element_placement(
        &footprint.footprint,
        outline,
        splash_layout.map(|l| &l.footprint),
    )?;

    let fold = config.fold_allowance;
    let riser_height = stairs_config.riser_height + fold;
    let mut segments = Vec::with_capacity(footprint.treads.len() * 2);
    for tread in &footprint.treads {
        segments.extend(SurfaceSegment::with_area(
            SegmentKind::StairTread,
            tread.depth,
            tread.width,
            tread.area(),
        ));
        segments.extend(
            SurfaceSegment::new(SegmentKind::StairRiser, riser_height, tread.width)
                .map(|s| s.with_fold(fold).cornered()),
        );
    }

    Ok((footprint, segments))
}
