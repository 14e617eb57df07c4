//! Foil layout: roll choice, strip planning, roll packing and plan ranking.

pub mod pack;
pub mod roll_width;
pub mod score;
pub mod strip_plan;
pub mod validate;

pub use pack::{pack_strips_into_rolls, RollAllocation};
pub use roll_width::{choose_roll_width, RollWidth};
pub use strip_plan::{choose_bottom_roll_width, plan_strips, Strip, StripSpan};
pub use validate::{IssueCode, Severity, ValidationIssue};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{JointType, PlannerConfig};
use crate::error::Result;
use crate::geometry::{PoolSpec, SegmentClass, SurfaceSegment};
use crate::operations::decompose::Decompose;

/// Roll policy a candidate plan follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    NarrowOnly,
    WideOnly,
    /// Walls by height breakpoint, floors by wasted width.
    Mixed,
}

impl Strategy {
    /// Candidate order; earlier candidates win ties.
    const CANDIDATES: [Self; 3] = [Self::Mixed, Self::NarrowOnly, Self::WideOnly];

    fn roll_for(self, segment: &SurfaceSegment, config: &PlannerConfig) -> RollWidth {
        match self {
            Self::NarrowOnly => RollWidth::Narrow,
            Self::WideOnly => RollWidth::Wide,
            Self::Mixed => match segment.class() {
                SegmentClass::Bottom => choose_bottom_roll_width(segment.width_to_cover, config),
                SegmentClass::Wall => choose_roll_width(segment.nominal_width(), config),
            },
        }
    }
}

/// Headline figures of one candidate plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: Strategy,
    pub strip_count: usize,
    pub roll_count: usize,
    pub waste_area: f64,
    pub waste_percentage: f64,
    pub issue_count: usize,
    pub score: f64,
}

/// The three candidate plans side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub narrow_only: StrategySummary,
    pub wide_only: StrategySummary,
    pub mixed: StrategySummary,
}

/// Rolls of one width needed by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollCount {
    pub roll_width: RollWidth,
    pub rolls: usize,
    pub used_length: f64,
}

/// A complete foil plan for one pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub strategy: Strategy,
    pub segments: Vec<SurfaceSegment>,
    pub strips: Vec<Strip>,
    pub rolls: Vec<RollAllocation>,
    pub total_area_needed: f64,
    pub used_area: f64,
    pub waste_area: f64,
    pub waste_percentage: f64,
    pub issues: Vec<ValidationIssue>,
    /// Seam length to butt weld; zero for overlap-welded material.
    pub butt_weld_length: f64,
    pub comparison: Comparison,
}

impl PlanResult {
    /// Roll count and used length per roll width, narrow first.
    #[must_use]
    pub fn roll_counts(&self) -> Vec<RollCount> {
        RollWidth::ALL
            .iter()
            .filter_map(|&width| {
                let rolls: Vec<&RollAllocation> =
                    self.rolls.iter().filter(|r| r.roll_width == width).collect();
                if rolls.is_empty() {
                    return None;
                }
                Some(RollCount {
                    roll_width: width,
                    rolls: rolls.len(),
                    used_length: rolls.iter().map(|r| r.used_length).sum(),
                })
            })
            .collect()
    }

    /// True when any issue has error severity.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }
}

/// Plans the foil for a pool and picks the best roll strategy.
///
/// Narrow-only, wide-only and mixed plans are all built and compared; the
/// lowest score wins.
pub struct PlanFoil<'a> {
    spec: &'a PoolSpec,
    config: &'a PlannerConfig,
}

impl<'a> PlanFoil<'a> {
    /// Creates a new `PlanFoil` operation.
    #[must_use]
    pub fn new(spec: &'a PoolSpec, config: &'a PlannerConfig) -> Self {
        Self { spec, config }
    }

    /// Executes the planning.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an invalid configuration, an `InputError`
    /// for invalid pool dimensions, or a `ConstraintViolation` for a rejected
    /// sub-feature footprint. Manufacturing-rule violations are reported in
    /// [`PlanResult::issues`] instead.
    pub fn execute(&self) -> Result<PlanResult> {
        self.config.validate()?;
        let decomposition = Decompose::new(self.spec, self.config).execute()?;
        Ok(plan_segments(decomposition.segments, self.config))
    }
}

/// One fully planned strategy.
#[derive(Debug, Clone)]
struct Candidate {
    strategy: Strategy,
    strips: Vec<Strip>,
    rolls: Vec<RollAllocation>,
    used_area: f64,
    waste_area: f64,
    waste_percentage: f64,
    issues: Vec<ValidationIssue>,
    score: f64,
}

impl Candidate {
    fn build(strategy: Strategy, segments: &[SurfaceSegment], config: &PlannerConfig) -> Self {
        let mut strips = Vec::new();
        for (index, segment) in segments.iter().enumerate() {
            let roll = strategy.roll_for(segment, config);
            let planned = strip_plan::strips_for_segment(index, segment, roll, config);
            debug!(
                ?strategy,
                segment = index,
                kind = ?segment.kind,
                %roll,
                strips = planned.len(),
                "segment planned"
            );
            strips.extend(planned);
        }

        let rolls = pack_strips_into_rolls(&strips, config.max_roll_length);
        let issues = validate::validate_strips(&strips, segments, config);

        let used_area: f64 = strips.iter().map(Strip::area).sum();
        let roll_area: f64 = rolls
            .iter()
            .map(|r| r.roll_width.meters(config) * config.max_roll_length)
            .sum();
        let waste_area = (roll_area - used_area).max(0.0);
        let waste_percentage = if roll_area > 0.0 {
            waste_area / roll_area * 100.0
        } else {
            0.0
        };
        let score = score::score_plan(
            waste_percentage,
            issues.len(),
            strips.len(),
            &rolls,
            config.max_roll_length,
        );

        Self {
            strategy,
            strips,
            rolls,
            used_area,
            waste_area,
            waste_percentage,
            issues,
            score,
        }
    }

    fn summary(&self) -> StrategySummary {
        StrategySummary {
            strategy: self.strategy,
            strip_count: self.strips.len(),
            roll_count: self.rolls.len(),
            waste_area: self.waste_area,
            waste_percentage: self.waste_percentage,
            issue_count: self.issues.len(),
            score: self.score,
        }
    }
}

/// Plans already decomposed segments under every strategy and keeps the best.
#[must_use]
pub fn plan_segments(segments: Vec<SurfaceSegment>, config: &PlannerConfig) -> PlanResult {
    let [mixed, narrow, wide] =
        Strategy::CANDIDATES.map(|strategy| Candidate::build(strategy, &segments, config));
    let comparison = Comparison {
        narrow_only: narrow.summary(),
        wide_only: wide.summary(),
        mixed: mixed.summary(),
    };

    let mut best = mixed;
    for candidate in [narrow, wide] {
        if candidate.score < best.score {
            best = candidate;
        }
    }

    let butt_weld_length = match config.joint {
        JointType::ButtWeld => butt_weld_length(&best.strips, &segments),
        JointType::Overlap => 0.0,
    };
    let total_area_needed = segments.iter().map(|s| s.area).sum();

    info!(
        strategy = ?best.strategy,
        rolls = best.rolls.len(),
        strips = best.strips.len(),
        waste_pct = best.waste_percentage,
        "foil plan chosen"
    );

    let result = PlanResult {
        strategy: best.strategy,
        segments,
        strips: best.strips,
        rolls: best.rolls,
        total_area_needed,
        used_area: best.used_area,
        waste_area: best.waste_area,
        waste_percentage: best.waste_percentage,
        issues: best.issues,
        butt_weld_length,
        comparison,
    };
    if result.has_errors() {
        warn!(
            issues = result.issues.len(),
            "foil plan breaks manufacturing rules"
        );
    }
    result
}

/// Weld length between side-by-side floor strips.
///
/// Each pair of neighbouring strips in a bottom-class segment is welded
/// over the shorter of the two runs.
fn butt_weld_length(strips: &[Strip], segments: &[SurfaceSegment]) -> f64 {
    let mut total = 0.0;
    for (index, segment) in segments.iter().enumerate() {
        if segment.class() != SegmentClass::Bottom {
            continue;
        }
        let mut lanes: Vec<&Strip> = strips
            .iter()
            .filter(|s| s.segment == index && s.piece_index == 0)
            .collect();
        lanes.sort_by(|a, b| a.position_along_width.total_cmp(&b.position_along_width));
        total += lanes
            .windows(2)
            .map(|pair| pair[0].run_length.min(pair[1].run_length))
            .sum::<f64>();
    }
    total
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{InputError, PoolfoilError};
    use crate::geometry::{
        DepthProfile, LegacyPlacement, LegacyStairs, PoolShape, SegmentKind, SplashPoolConfig,
        StairAnchor, StairShape, StairsConfig, StairsInput,
    };
    use crate::math::pt;
    use approx::assert_relative_eq;

    fn rect_pool(length: f64, width: f64, depth: f64) -> PoolSpec {
        PoolSpec::new(
            PoolShape::Rectangle { length, width },
            DepthProfile::Flat { depth },
        )
    }

    fn plan(spec: &PoolSpec, config: &PlannerConfig) -> PlanResult {
        PlanFoil::new(spec, config).execute().unwrap()
    }

    fn assert_plan_invariants(result: &PlanResult, config: &PlannerConfig) {
        for roll in &result.rolls {
            let sum: f64 = roll.strips.iter().map(|&i| result.strips[i].strip_length).sum();
            assert!(sum <= config.max_roll_length + 1e-9, "roll over length: {sum}");
            assert!(roll
                .strips
                .iter()
                .all(|&i| result.strips[i].roll_width == roll.roll_width));
        }
        let mut packed: Vec<usize> = result.rolls.iter().flat_map(|r| r.strips.clone()).collect();
        packed.sort_unstable();
        assert_eq!(packed, (0..result.strips.len()).collect::<Vec<_>>());
        assert!((0.0..100.0).contains(&result.waste_percentage));

        for (index, segment) in result.segments.iter().enumerate() {
            let lanes: Vec<&Strip> = result
                .strips
                .iter()
                .filter(|s| s.segment == index && s.piece_index == 0)
                .collect();
            assert_relative_eq!(lanes[0].overlap_with_previous, 0.0);
            let covered: f64 = lanes.iter().map(|s| s.used_width - s.overlap_with_previous).sum();
            assert!(covered >= segment.width_to_cover - 1e-9);
            assert!(lanes.iter().all(|s| s.used_width <= s.roll_width.meters(config) + 1e-12));
        }
    }

    #[test]
    fn rectangle_plan_is_consistent() {
        let config = PlannerConfig::default();
        let result = plan(&rect_pool(8.0, 4.0, 1.4), &config);
        assert_plan_invariants(&result, &config);
        assert_relative_eq!(result.total_area_needed, 32.0 + 24.0 * 1.65, epsilon = 1e-9);
        assert!(result.issues.is_empty());
        assert_relative_eq!(result.butt_weld_length, 0.0);
    }

    #[test]
    fn every_pool_kind_plans_consistently() {
        let config = PlannerConfig::default();
        let flat = DepthProfile::Flat { depth: 1.4 };
        let diagonal = StairsInput::Legacy(LegacyStairs {
            placement: LegacyPlacement::DiagonalCorner,
            width: 0.0,
            step_count: 4,
            step_depth: 0.3,
            riser_height: 0.25,
        });
        let boundary_stairs = StairsInput::Shaped(StairsConfig {
            shape: StairShape::Rectangular {
                width: 1.0,
                swap_axes: false,
            },
            anchor: StairAnchor::SplashBoundary,
            step_count: 4,
            step_depth: 0.3,
            riser_height: 0.25,
        });
        let pools = [
            rect_pool(8.0, 4.0, 1.4),
            PoolSpec::new(
                PoolShape::Oval {
                    length: 7.0,
                    width: 3.5,
                },
                DepthProfile::Flat { depth: 1.2 },
            ),
            PoolSpec::new(
                PoolShape::LShape {
                    length: 10.0,
                    width: 6.0,
                    cutout_length: 4.0,
                    cutout_width: 2.0,
                },
                flat,
            ),
            PoolSpec::new(
                PoolShape::SteppedRectangle {
                    length: 8.0,
                    width: 4.0,
                },
                flat,
            ),
            PoolSpec::new(
                PoolShape::Custom {
                    vertices: vec![
                        pt(0.0, 0.0),
                        pt(6.0, 0.0),
                        pt(6.0, 3.0),
                        pt(3.0, 5.0),
                        pt(0.0, 3.0),
                    ],
                },
                flat,
            ),
            PoolSpec::new(
                PoolShape::Rectangle {
                    length: 10.0,
                    width: 5.0,
                },
                DepthProfile::Sloped {
                    shallow: 1.0,
                    deep: 2.0,
                },
            ),
            rect_pool(8.0, 4.0, 1.4)
                .with_splash_pool(SplashPoolConfig::new(2.0, 0.6).with_dividing_wall(0.3)),
            rect_pool(8.0, 4.0, 1.4).with_stairs(diagonal),
            rect_pool(8.0, 4.0, 1.4)
                .with_splash_pool(SplashPoolConfig::new(2.0, 0.6))
                .with_stairs(boundary_stairs),
        ];
        for spec in &pools {
            let result = plan(spec, &config);
            assert!(!result.rolls.is_empty(), "no rolls for {:?}", spec.shape);
            assert_plan_invariants(&result, &config);
        }
    }

    #[test]
    fn runaway_step_count_is_rejected() {
        let config = PlannerConfig::default();
        let spec = rect_pool(8.0, 4.0, 1.4).with_stairs(StairsInput::Shaped(StairsConfig {
            shape: StairShape::Diagonal45,
            anchor: StairAnchor::PoolCorner { index: 0 },
            step_count: 1 << 62,
            step_depth: 1e-18,
            riser_height: 0.25,
        }));
        assert!(matches!(
            PlanFoil::new(&spec, &config).execute(),
            Err(PoolfoilError::Input(InputError::SubFeature(_)))
        ));
    }

    #[test]
    fn comparison_reports_all_strategies() {
        let config = PlannerConfig::default();
        let result = plan(&rect_pool(8.0, 4.0, 1.4), &config);
        let c = result.comparison;
        assert_eq!(c.narrow_only.strategy, Strategy::NarrowOnly);
        assert_eq!(c.wide_only.strategy, Strategy::WideOnly);
        assert_eq!(c.mixed.strategy, Strategy::Mixed);
        let best = [c.narrow_only, c.wide_only, c.mixed]
            .iter()
            .map(|s| s.score)
            .fold(f64::INFINITY, f64::min);
        let chosen = match result.strategy {
            Strategy::NarrowOnly => c.narrow_only,
            Strategy::WideOnly => c.wide_only,
            Strategy::Mixed => c.mixed,
        };
        assert_relative_eq!(chosen.score, best);
        assert_eq!(chosen.roll_count, result.rolls.len());
    }

    #[test]
    fn planning_is_deterministic() {
        let config = PlannerConfig::default();
        let spec = rect_pool(10.0, 5.0, 1.5).with_splash_pool(SplashPoolConfig::new(2.0, 0.6));
        assert_eq!(plan(&spec, &config), plan(&spec, &config));
    }

    #[test]
    fn long_pool_carries_issues_but_still_plans() {
        let config = PlannerConfig::default();
        let result = plan(&rect_pool(30.0, 6.0, 1.4), &config);
        assert_plan_invariants(&result, &config);
        assert!(result.has_errors());
        assert!(result
            .issues
            .iter()
            .any(|i| i.code == IssueCode::StripTooLong));
        assert!(result
            .issues
            .iter()
            .any(|i| i.code == IssueCode::VerticalSeamOffCorner));
    }

    #[test]
    fn butt_weld_length_of_floor_seams() {
        let config = PlannerConfig::default().with_joint(JointType::ButtWeld);
        let segments = vec![SurfaceSegment::new(SegmentKind::Bottom, 4.1, 8.0).unwrap()];
        let result = plan_segments(segments, &config);
        // Two 2.05 m lanes on wide, or three on narrow; one or two 8 m seams.
        let lanes = result.strips.len();
        #[allow(clippy::cast_precision_loss)]
        let expected = (lanes - 1) as f64 * 8.0;
        assert_relative_eq!(result.butt_weld_length, expected);
        assert!(result.butt_weld_length > 0.0);
    }

    #[test]
    fn roll_counts_group_by_width() {
        let config = PlannerConfig::default();
        let result = plan(&rect_pool(8.0, 4.0, 1.4), &config);
        let counts = result.roll_counts();
        let total: usize = counts.iter().map(|c| c.rolls).sum();
        assert_eq!(total, result.rolls.len());
        assert!(counts.windows(2).all(|w| w[0].roll_width < w[1].roll_width));
    }

    #[test]
    fn invalid_input_is_an_error() {
        let config = PlannerConfig::default();
        let err = PlanFoil::new(&rect_pool(8.0, 0.0, 1.4), &config)
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            PoolfoilError::Input(InputError::NonPositive { name: "width", .. })
        ));

        let bad = PlannerConfig::default().with_fold_allowance(0.5);
        assert!(matches!(
            PlanFoil::new(&rect_pool(8.0, 4.0, 1.4), &bad).execute(),
            Err(PoolfoilError::Config(_))
        ));
    }

    #[test]
    fn plan_serializes() {
        let config = PlannerConfig::default();
        let result = plan(&rect_pool(6.0, 3.0, 1.2), &config);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"strategy\""));
        let back: PlanResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.strips.len(), result.strips.len());
    }
}
