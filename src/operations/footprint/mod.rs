mod diagonal;
mod rectangular;
mod scalene;
mod splash;

pub use splash::{GenerateSplashPool, SplashLayout};

use tracing::debug;

use crate::error::{InputError, Result};
use crate::geometry::{
    FootprintPolygon, SplashPoolConfig, StairAnchor, StairFootprint, StairShape, StairsConfig,
    StepLine, SubFeature, Tread, MAX_STEPS,
};
use crate::math::{Point2, Vector2, TOLERANCE};

/// A corner of the pool (or splash pool) with the two wall directions leaving it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerFrame {
    pub anchor: Point2,
    /// Unit direction toward the next outline vertex.
    pub along: Vector2,
    /// Unit direction toward the previous outline vertex.
    pub across: Vector2,
}

impl CornerFrame {
    /// Builds the frame at outline vertex `index`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoSuchCorner` when `index` is out of range, and
    /// `InputError::SubFeature` when an adjacent wall has zero length.
    pub fn at_vertex(outline: &[Point2], index: usize) -> std::result::Result<Self, InputError> {
        let n = outline.len();
        if n < 3 || index >= n {
            return Err(InputError::NoSuchCorner { index, count: n });
        }
        let anchor = outline[index];
        let next = outline[(index + 1) % n];
        let prev = outline[(index + n - 1) % n];
        Ok(Self {
            anchor,
            along: unit(next - anchor)?,
            across: unit(prev - anchor)?,
        })
    }

    /// Point at `a` along the first wall and `b` along the second.
    #[must_use]
    pub fn at(&self, a: f64, b: f64) -> Point2 {
        self.anchor + self.along * a + self.across * b
    }
}

fn unit(v: Vector2) -> std::result::Result<Vector2, InputError> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(InputError::SubFeature(
            "stair anchor has a zero-length adjacent wall".to_owned(),
        ));
    }
    Ok(v / len)
}

/// Generates a stair footprint with its step lines and treads.
///
/// The result still has to pass the constraint checker before it is accepted.
pub struct GenerateStairs<'a> {
    config: StairsConfig,
    outline: &'a [Point2],
    splash: Option<&'a SplashPoolConfig>,
}

impl<'a> GenerateStairs<'a> {
    /// Creates a new `GenerateStairs` operation against the pool outline.
    #[must_use]
    pub fn new(config: StairsConfig, outline: &'a [Point2]) -> Self {
        Self {
            config,
            outline,
            splash: None,
        }
    }

    /// Supplies the splash pool needed by [`StairAnchor::SplashBoundary`].
    #[must_use]
    pub fn with_splash_pool(mut self, splash: &'a SplashPoolConfig) -> Self {
        self.splash = Some(splash);
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` if the anchor cannot be resolved or the stair
    /// has no steps.
    pub fn execute(&self) -> Result<StairFootprint> {
        let n = self.config.step_count;
        if n == 0 || n > MAX_STEPS {
            return Err(InputError::SubFeature(format!(
                "stairs need between 1 and {MAX_STEPS} steps, got {n}"
            ))
            .into());
        }

        let stairs = match self.config.shape {
            StairShape::Rectangular { width, swap_axes } => rectangular::generate(
                &self.frame()?,
                width,
                swap_axes,
                n,
                self.config.step_depth,
            ),
            StairShape::Diagonal45 => diagonal::generate(&self.frame()?, n, self.config.step_depth),
            StairShape::ScaleneTriangle {
                vertices,
                min_tread_depth,
                max_tread_depth,
            } => scalene::generate(&vertices, n, min_tread_depth, max_tread_depth),
        };

        debug!(
            shape = ?self.config.shape,
            steps = n,
            area = stairs.footprint.area(),
            "generated stair footprint"
        );
        Ok(stairs)
    }

    fn frame(&self) -> Result<CornerFrame> {
        match self.config.anchor {
            StairAnchor::PoolCorner { index } => Ok(CornerFrame::at_vertex(self.outline, index)?),
            StairAnchor::SplashBoundary => {
                let splash = self.splash.ok_or_else(|| {
                    InputError::SubFeature(
                        "stairs anchored on the splash pool need a splash pool".to_owned(),
                    )
                })?;
                let layout = GenerateSplashPool::new(splash, self.outline).execute()?;
                Ok(layout.boundary_frame())
            }
        }
    }
}

/// Builds the tread band between two step lines.
///
/// `inner` is `None` for the first tread, which closes at the anchor point.
fn band(anchor: Point2, inner: Option<(Point2, Point2)>, outer: (Point2, Point2)) -> Vec<Point2> {
    match inner {
        None => vec![anchor, outer.0, outer.1],
        Some((i0, i1)) => vec![i0, outer.0, outer.1, i1],
    }
}

/// Assembles a triangular stair whose lines are parallel to the far edge.
///
/// `fractions` are the cumulative line positions from the apex, ending at 1.
fn triangular_stairs(
    apex: Point2,
    base: (Point2, Point2),
    fractions: &[f64],
    height: f64,
) -> StairFootprint {
    let line_at = |f: f64| (apex + (base.0 - apex) * f, apex + (base.1 - apex) * f);

    let mut step_lines = Vec::with_capacity(fractions.len().saturating_sub(1));
    let mut treads = Vec::with_capacity(fractions.len());
    let mut prev: Option<(f64, (Point2, Point2))> = None;

    for (i, &f) in fractions.iter().enumerate() {
        let line = line_at(f);
        let inner_f = prev.map_or(0.0, |(pf, _)| pf);
        treads.push(Tread {
            polygon: band(apex, prev.map(|(_, l)| l), line),
            depth: (f - inner_f) * height,
            width: (line.1 - line.0).norm(),
        });
        if i + 1 < fractions.len() {
            step_lines.push(StepLine {
                index: i + 1,
                start: line.0,
                end: line.1,
                fraction: f,
            });
        }
        prev = Some((f, line));
    }

    StairFootprint {
        footprint: FootprintPolygon::new(SubFeature::Stairs, vec![apex, base.0, base.1]),
        step_lines,
        treads,
    }
}
