//! Rigid anchor types for 2D physics simulation

use fold_math::{Transform2D, Vec2};
use slotmap::new_key_type;

use crate::fixture::FixtureKey;

// Define generational key type for bodies
new_key_type! {
    /// Key to a body in the physics world
    ///
    /// Uses generational indexing so a key to a destroyed body returns None
    /// instead of pointing to whatever reused its slot.
    pub struct BodyKey;
}

/// How the engine moves a body during a step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyType {
    /// Never moved by the step; may still be repositioned directly
    #[default]
    Static,
    /// Moved by its own velocity, ignores gravity
    Kinematic,
    /// Moved by velocity and gravity
    Dynamic,
}

/// Parameters for creating a body
#[derive(Clone, Copy, Debug, Default)]
pub struct BodyDef {
    pub body_type: BodyType,
    pub transform: Transform2D,
}

impl BodyDef {
    /// A static body at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body type
    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = body_type;
        self
    }

    /// Set the initial transform
    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.transform = transform;
        self
    }
}

/// A rigid anchor carrying zero or more fixtures
#[derive(Clone, Debug)]
pub struct Body2D {
    /// Position and rotation in world space
    pub transform: Transform2D,
    /// Velocity (units per second)
    pub linear_velocity: Vec2,
    body_type: BodyType,
    fixtures: Vec<FixtureKey>,
}

impl Body2D {
    /// Create a body from its definition
    pub fn new(def: BodyDef) -> Self {
        Self {
            transform: def.transform,
            linear_velocity: Vec2::ZERO,
            body_type: def.body_type,
            fixtures: Vec::new(),
        }
    }

    /// Get the body type
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Whether the step leaves this body in place
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Current rotation angle in radians
    pub fn angle(&self) -> f32 {
        self.transform.angle
    }

    /// Keys of the fixtures attached to this body
    pub fn fixtures(&self) -> &[FixtureKey] {
        &self.fixtures
    }

    pub(crate) fn attach(&mut self, fixture: FixtureKey) {
        self.fixtures.push(fixture);
    }
}
