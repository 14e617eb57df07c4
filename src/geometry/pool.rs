use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::splash::SplashPoolConfig;
use super::stairs::StairsInput;
use crate::error::InputError;
use crate::math::polygon_2d::{bounds, polygon_area, polygon_perimeter};
use crate::math::{pt, Point2, Vector2};

/// Extra floor area accounted for the step profile of a stepped rectangle.
pub const STEP_PROFILE_AREA: f64 = 0.5;

/// Extra wall run accounted for the step profile of a stepped rectangle.
pub const STEP_PROFILE_PERIMETER: f64 = 1.0;

/// Freeboard between water line and coping on skimmer pools.
pub const SKIMMER_FREEBOARD: f64 = 0.10;

/// Number of edges used to approximate an oval outline.
const OVAL_OUTLINE_SEGMENTS: usize = 64;

/// Plan-view shape of the pool basin.
///
/// All built-in shapes live in a frame with one corner at the origin, the
/// length along +x and the width along +y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PoolShape {
    Rectangle {
        length: f64,
        width: f64,
    },
    Oval {
        length: f64,
        width: f64,
    },
    /// Bounding rectangle with a rectangular notch removed at the `(length, width)` corner.
    LShape {
        length: f64,
        width: f64,
        cutout_length: f64,
        cutout_width: f64,
    },
    SteppedRectangle {
        length: f64,
        width: f64,
    },
    Custom {
        vertices: Vec<Point2>,
    },
}

impl PoolShape {
    /// Closed-form floor area.
    #[must_use]
    pub fn area(&self) -> f64 {
        match self {
            Self::Rectangle { length, width } => length * width,
            Self::Oval { length, width } => PI * (length / 2.0) * (width / 2.0),
            Self::LShape {
                length,
                width,
                cutout_length,
                cutout_width,
            } => {
                let (a, b) = l_shape_parts(*length, *width, *cutout_length, *cutout_width);
                a.0 * a.1 + b.0 * b.1
            }
            Self::SteppedRectangle { length, width } => length * width + STEP_PROFILE_AREA,
            Self::Custom { vertices } => polygon_area(vertices),
        }
    }

    /// Closed-form wall perimeter.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        match self {
            Self::Rectangle { length, width } => 2.0 * (length + width),
            Self::Oval { length, width } => ramanujan_perimeter(length / 2.0, width / 2.0),
            Self::LShape {
                length,
                width,
                cutout_length,
                cutout_width,
            } => {
                let (a, b) = l_shape_parts(*length, *width, *cutout_length, *cutout_width);
                // The two parts share the full width of the lower rectangle's top edge.
                let shared = b.0;
                2.0 * (a.0 + a.1) + 2.0 * (b.0 + b.1) - 2.0 * shared
            }
            Self::SteppedRectangle { length, width } => {
                2.0 * (length + width) + STEP_PROFILE_PERIMETER
            }
            Self::Custom { vertices } => polygon_perimeter(vertices),
        }
    }

    /// Plan outline used for footprint validation and per-edge walls.
    ///
    /// Ovals are approximated by a regular polygon.
    #[must_use]
    pub fn outline(&self) -> Vec<Point2> {
        match self {
            Self::Rectangle { length, width } | Self::SteppedRectangle { length, width } => {
                rectangle(*length, *width)
            }
            Self::Oval { length, width } => {
                let (a, b) = (length / 2.0, width / 2.0);
                (0..OVAL_OUTLINE_SEGMENTS)
                    .map(|i| {
                        #[allow(clippy::cast_precision_loss)]
                        let t = 2.0 * PI * i as f64 / OVAL_OUTLINE_SEGMENTS as f64;
                        pt(a + a * t.cos(), b + b * t.sin())
                    })
                    .collect()
            }
            Self::LShape {
                length,
                width,
                cutout_length,
                cutout_width,
            } => vec![
                pt(0.0, 0.0),
                pt(*length, 0.0),
                pt(*length, width - cutout_width),
                pt(length - cutout_length, width - cutout_width),
                pt(length - cutout_length, *width),
                pt(0.0, *width),
            ],
            Self::Custom { vertices } => vertices.clone(),
        }
    }

    /// Extent of the floor `(along_strip, across_strips)`.
    ///
    /// Strips run along the longer bounding dimension.
    #[must_use]
    pub fn floor_extent(&self) -> (f64, f64) {
        match self {
            Self::Rectangle { length, width }
            | Self::Oval { length, width }
            | Self::LShape { length, width, .. }
            | Self::SteppedRectangle { length, width } => (length.max(*width), length.min(*width)),
            Self::Custom { vertices } => match bounds(vertices) {
                Some((lo, hi)) => {
                    let (dx, dy) = (hi.x - lo.x, hi.y - lo.y);
                    (dx.max(dy), dx.min(dy))
                }
                None => (0.0, 0.0),
            },
        }
    }

    /// Unit direction the floor strips run in: the longer bounding axis.
    #[must_use]
    pub fn floor_axis(&self) -> Vector2 {
        let (dx, dy) = match self {
            Self::Rectangle { length, width }
            | Self::Oval { length, width }
            | Self::LShape { length, width, .. }
            | Self::SteppedRectangle { length, width } => (*length, *width),
            Self::Custom { vertices } => {
                bounds(vertices).map_or((0.0, 0.0), |(lo, hi)| (hi.x - lo.x, hi.y - lo.y))
            }
        };
        if dx >= dy {
            Vector2::x()
        } else {
            Vector2::y()
        }
    }

    /// True for shapes whose wall is one continuous curved run.
    #[must_use]
    pub fn has_curved_wall(&self) -> bool {
        matches!(self, Self::Oval { .. })
    }

    fn validate(&self) -> Result<(), InputError> {
        match self {
            Self::Rectangle { length, width }
            | Self::Oval { length, width }
            | Self::SteppedRectangle { length, width } => {
                positive("length", *length)?;
                positive("width", *width)
            }
            Self::LShape {
                length,
                width,
                cutout_length,
                cutout_width,
            } => {
                positive("length", *length)?;
                positive("width", *width)?;
                positive("cutout_length", *cutout_length)?;
                positive("cutout_width", *cutout_width)?;
                if cutout_length >= length || cutout_width >= width {
                    return Err(InputError::SubFeature(
                        "L-shape cutout must be smaller than the bounding rectangle".to_owned(),
                    ));
                }
                Ok(())
            }
            Self::Custom { vertices } => {
                if vertices.len() < 3 {
                    return Err(InputError::TooFewVertices(vertices.len()));
                }
                if vertices.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
                    return Err(InputError::NonFinite("custom outline vertex"));
                }
                Ok(())
            }
        }
    }
}

/// Splits an L-shape into `(lower, upper)` rectangles as `(extent_x, extent_y)`.
fn l_shape_parts(length: f64, width: f64, cutout_length: f64, cutout_width: f64) -> ((f64, f64), (f64, f64)) {
    ((length, width - cutout_width), (length - cutout_length, cutout_width))
}

/// Ramanujan's approximation of an ellipse perimeter.
fn ramanujan_perimeter(a: f64, b: f64) -> f64 {
    PI * (3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt())
}

fn rectangle(length: f64, width: f64) -> Vec<Point2> {
    vec![pt(0.0, 0.0), pt(length, 0.0), pt(length, width), pt(0.0, width)]
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InputError::NonPositive { name, value })
    }
}

/// Water depth along the pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DepthProfile {
    Flat { depth: f64 },
    /// Floor sloping linearly from the shallow to the deep end.
    Sloped { shallow: f64, deep: f64 },
}

impl DepthProfile {
    #[must_use]
    pub fn mean(&self) -> f64 {
        match self {
            Self::Flat { depth } => *depth,
            Self::Sloped { shallow, deep } => (shallow + deep) / 2.0,
        }
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        match self {
            Self::Flat { depth } => *depth,
            Self::Sloped { shallow, deep } => shallow.max(*deep),
        }
    }
}

/// Water-line arrangement; decides the freeboard above the water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowType {
    #[default]
    Skimmer,
    /// Water brimming into a perimeter gutter.
    Overflow,
}

impl OverflowType {
    #[must_use]
    pub fn freeboard(self) -> f64 {
        match self {
            Self::Skimmer => SKIMMER_FREEBOARD,
            Self::Overflow => 0.0,
        }
    }
}

/// Everything the planner needs to know about one pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSpec {
    pub shape: PoolShape,
    pub depth: DepthProfile,
    #[serde(default)]
    pub overflow: OverflowType,
    #[serde(default)]
    pub stairs: Option<StairsInput>,
    #[serde(default)]
    pub splash_pool: Option<SplashPoolConfig>,
    /// Extra material percentage charged for irregular shapes.
    #[serde(default)]
    pub irregular_surcharge_pct: f64,
}

impl PoolSpec {
    /// Creates a pool without sub-features.
    #[must_use]
    pub fn new(shape: PoolShape, depth: DepthProfile) -> Self {
        Self {
            shape,
            depth,
            overflow: OverflowType::default(),
            stairs: None,
            splash_pool: None,
            irregular_surcharge_pct: 0.0,
        }
    }

    #[must_use]
    pub fn with_overflow(mut self, overflow: OverflowType) -> Self {
        self.overflow = overflow;
        self
    }

    #[must_use]
    pub fn with_stairs(mut self, stairs: StairsInput) -> Self {
        self.stairs = Some(stairs);
        self
    }

    #[must_use]
    pub fn with_splash_pool(mut self, splash_pool: SplashPoolConfig) -> Self {
        self.splash_pool = Some(splash_pool);
        self
    }

    #[must_use]
    pub fn with_irregular_surcharge(mut self, pct: f64) -> Self {
        self.irregular_surcharge_pct = pct;
        self
    }

    /// Mean wall height from floor to coping, without fold allowance.
    #[must_use]
    pub fn mean_wall_height(&self) -> f64 {
        self.depth.mean() + self.overflow.freeboard()
    }

    /// Wall height at the deepest point, without fold allowance.
    #[must_use]
    pub fn max_wall_height(&self) -> f64 {
        self.depth.max() + self.overflow.freeboard()
    }

    /// Checks dimensions and sub-feature settings.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), InputError> {
        self.shape.validate()?;
        match self.depth {
            DepthProfile::Flat { depth } => positive("depth", depth)?,
            DepthProfile::Sloped { shallow, deep } => {
                positive("shallow depth", shallow)?;
                positive("deep depth", deep)?;
            }
        }
        if !self.irregular_surcharge_pct.is_finite() || self.irregular_surcharge_pct < 0.0 {
            return Err(InputError::NonPositive {
                name: "irregular_surcharge_pct",
                value: self.irregular_surcharge_pct,
            });
        }
        if let Some(splash) = &self.splash_pool {
            splash.validate(self.depth.max())?;
        }
        if let Some(stairs) = &self.stairs {
            stairs.validate()?;
        }
        Ok(())
    }
}
