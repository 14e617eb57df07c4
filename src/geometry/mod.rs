pub mod footprint;
pub mod pool;
pub mod segment;
pub mod splash;
pub mod stairs;

pub use footprint::{FootprintPolygon, StairFootprint, StepLine, SubFeature, Tread};
pub use pool::{DepthProfile, OverflowType, PoolShape, PoolSpec};
pub use segment::{SegmentClass, SegmentKind, SurfaceSegment};
pub use splash::{DividingWall, SplashPoolConfig};
pub use stairs::{
    LegacyPlacement, LegacyStairs, StairAnchor, StairShape, StairsConfig, StairsInput, MAX_STEPS,
};
