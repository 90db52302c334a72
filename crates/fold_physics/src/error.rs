//! Engine-level error type

use thiserror::Error;

/// Errors raised by the physics engine
///
/// These cover stale handles and shapes the engine refuses to register.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// The body key does not refer to a live body
    #[error("unknown body handle")]
    UnknownBody,
    /// The particle group key does not refer to a live group
    #[error("unknown particle group handle")]
    UnknownParticleGroup,
    /// An edge whose two endpoints coincide
    #[error("degenerate edge: endpoints coincide")]
    DegenerateEdge,
    /// A chain with too few vertices or a repeated adjacent vertex
    #[error("invalid chain: {0}")]
    InvalidChain(String),
    /// A polygon with too few vertices or no area
    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),
    /// Particle groups can only be filled from polygon shapes
    #[error("particle groups require a polygon shape")]
    UnsupportedParticleShape,
    /// Particle radius must be positive and finite
    #[error("invalid particle radius {0}")]
    InvalidRadius(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(PhysicsError::UnknownBody.to_string(), "unknown body handle");
        let msg = PhysicsError::InvalidRadius(-1.0).to_string();
        assert!(msg.contains("-1"));
        let msg = PhysicsError::InvalidChain("2 vertices".into()).to_string();
        assert!(msg.contains("2 vertices"));
    }
}
