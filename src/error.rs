use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::SubFeature;

/// Top-level error type for the foil planner.
#[derive(Debug, Error)]
pub enum PoolfoilError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),
}

/// Errors related to planner configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        key: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("narrow roll width {narrow} must be smaller than wide roll width {wide}")]
    RollWidthOrder { narrow: f64, wide: f64 },

    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to the pool description handed to the planner.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("dimension {name} = {value} must be a positive finite number")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("custom pool outline needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("pool outline has no vertex {index} (outline has {count})")]
    NoSuchCorner { index: usize, count: usize },

    #[error("invalid sub-feature configuration: {0}")]
    SubFeature(String),
}

/// A footprint placement that must not be committed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintViolation {
    #[error("{feature} vertex {vertex} at ({x:.3}, {y:.3}) lies outside the pool outline")]
    OutsidePool {
        feature: SubFeature,
        vertex: usize,
        x: f64,
        y: f64,
    },

    #[error("stairs overlap the splash pool")]
    Overlap,

    #[error("{feature} footprint is degenerate ({vertices} vertices)")]
    Degenerate { feature: SubFeature, vertices: usize },

    #[error("footprint not found")]
    UnknownFootprint,

    #[error("{feature} footprint has no vertex {vertex}")]
    NoSuchVertex { feature: SubFeature, vertex: usize },
}

/// Convenience type alias for results using [`PoolfoilError`].
pub type Result<T> = std::result::Result<T, PoolfoilError>;
