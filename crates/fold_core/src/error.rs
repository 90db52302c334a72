//! Scene construction errors
//!
//! Everything here is detected before the first engine object is created,
//! except [`SceneError::Physics`], which carries the engine's own error.

use std::io;

use fold_physics::PhysicsError;
use thiserror::Error;

/// Invalid tabulated curve data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// The x and y lists differ in length
    #[error("sample lists differ in length: {xs} x values, {ys} y values")]
    LengthMismatch { xs: usize, ys: usize },
    /// Fewer than two samples
    #[error("a polyline needs at least 2 samples, got {0}")]
    TooFewSamples(usize),
    /// Sample `index` repeats sample `index - 1`
    #[error("sample {index} repeats the previous sample")]
    RepeatedPoint { index: usize },
    /// Sample `index` has a NaN or infinite coordinate
    #[error("sample {index} is not finite")]
    NonFinite { index: usize },
}

/// Error building or loading a scene
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("curve error: {0}")]
    Curve(#[from] CurveError),
    /// A point range that does not fit the polyline
    #[error("point range {start}..={end} does not fit a polyline of {len} points")]
    InvalidRange { start: usize, end: usize, len: usize },
    /// A split index with nothing on one side
    #[error("split index {index} must be strictly inside a polyline of {len} points")]
    SplitOutOfRange { index: usize, len: usize },
    /// The container corners do not trace a simple polygon
    #[error("container corners do not form a simple polygon")]
    ContainerNotSimple,
    /// The source region pokes out of the container
    #[error("source region corner ({x}, {y}) lies outside the container")]
    SourceOutsideContainer { x: f32, y: f32 },
    /// The source region has no extent
    #[error("source region half-extents must be positive, got {half_width} x {half_height}")]
    EmptySource { half_width: f32, half_height: f32 },
    /// The container needs one or two throat edges
    #[error("expected 1 or 2 throat edges, got {0}")]
    ThroatCount(usize),
    /// The two gate edges touch, leaving no gap
    #[error("gate edges leave no gap")]
    GateClosed,
    /// A static edge whose endpoints coincide
    #[error("static edge {index} is degenerate")]
    DegenerateEdge { index: usize },
    /// Segment friction must be finite and non-negative
    #[error("invalid segment friction {0}")]
    InvalidFriction(f32),
    /// Fault step must be finite
    #[error("invalid fault step ({x}, {y})")]
    InvalidStep { x: f32, y: f32 },
    /// Particle radius must be positive
    #[error("invalid particle radius {0}")]
    InvalidRadius(f32),
    #[error("physics error: {0}")]
    Physics(#[from] PhysicsError),
    /// IO error reading or writing a template
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Invalid RON syntax
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_error_display() {
        let msg = CurveError::LengthMismatch { xs: 3, ys: 2 }.to_string();
        assert!(msg.contains("3 x values"));
        assert!(msg.contains("2 y values"));
    }

    #[test]
    fn test_scene_error_wraps_curve_error() {
        let err: SceneError = CurveError::TooFewSamples(1).into();
        assert!(matches!(err, SceneError::Curve(CurveError::TooFewSamples(1))));
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_io_error_display() {
        let err: SceneError = io::Error::new(io::ErrorKind::NotFound, "file missing").into();
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file missing"));
    }
}
