use super::CornerFrame;
use crate::error::Result;
use crate::geometry::{FootprintPolygon, SplashPoolConfig, SubFeature};
use crate::math::Point2;

/// Plan-view placement of a splash pool.
#[derive(Debug, Clone, PartialEq)]
pub struct SplashLayout {
    pub footprint: FootprintPolygon,
    /// Width of the pool end the splash pool spans.
    pub end_width: f64,
    /// Run of the splash pool along the side walls.
    pub length: f64,
    /// Dividing wall from the pool wall across to the opposite side.
    pub dividing_wall: (Point2, Point2),
    frame: CornerFrame,
}

impl SplashLayout {
    /// Frame for stairs set against the dividing wall.
    ///
    /// The anchor is where the dividing wall meets the pool wall; the first
    /// direction continues along the pool wall away from the splash pool, the
    /// second runs along the dividing wall.
    #[must_use]
    pub fn boundary_frame(&self) -> CornerFrame {
        CornerFrame {
            anchor: self.dividing_wall.0,
            along: self.frame.along,
            across: self.frame.across,
        }
    }
}

/// Places a splash pool across one end of the pool.
pub struct GenerateSplashPool<'a> {
    config: &'a SplashPoolConfig,
    outline: &'a [Point2],
}

impl<'a> GenerateSplashPool<'a> {
    /// Creates a new `GenerateSplashPool` operation.
    #[must_use]
    pub fn new(config: &'a SplashPoolConfig, outline: &'a [Point2]) -> Self {
        Self { config, outline }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` if the configured corner does not exist.
    pub fn execute(&self) -> Result<SplashLayout> {
        let frame = CornerFrame::at_vertex(self.outline, self.config.corner)?;
        let n = self.outline.len();
        let prev = self.outline[(self.config.corner + n - 1) % n];
        let end_width = (prev - frame.anchor).norm();
        let length = self.config.length;

        let footprint = FootprintPolygon::new(
            SubFeature::SplashPool,
            vec![
                frame.at(0.0, 0.0),
                frame.at(length, 0.0),
                frame.at(length, end_width),
                frame.at(0.0, end_width),
            ],
        );

        Ok(SplashLayout {
            footprint,
            end_width,
            length,
            dividing_wall: (frame.at(length, 0.0), frame.at(length, end_width)),
            frame,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{pt, TOLERANCE};

    #[test]
    fn splash_spans_pool_end() {
        let outline = vec![pt(0.0, 0.0), pt(8.0, 0.0), pt(8.0, 4.0), pt(0.0, 4.0)];
        let config = SplashPoolConfig::new(2.0, 0.6);
        let layout = GenerateSplashPool::new(&config, &outline).execute().unwrap();
        assert!((layout.end_width - 4.0).abs() < TOLERANCE);
        assert!((layout.footprint.area() - 8.0).abs() < 1e-9);
        assert!((layout.dividing_wall.0 - pt(2.0, 0.0)).norm() < TOLERANCE);
        assert!((layout.dividing_wall.1 - pt(2.0, 4.0)).norm() < TOLERANCE);
    }

    #[test]
    fn splash_at_far_corner() {
        let outline = vec![pt(0.0, 0.0), pt(8.0, 0.0), pt(8.0, 4.0), pt(0.0, 4.0)];
        let config = SplashPoolConfig::new(1.5, 0.6).at_corner(2);
        let layout = GenerateSplashPool::new(&config, &outline).execute().unwrap();
        assert!((layout.dividing_wall.0 - pt(6.5, 4.0)).norm() < TOLERANCE);
        assert!((layout.dividing_wall.1 - pt(6.5, 0.0)).norm() < TOLERANCE);
    }
}
