//! Fixtures bind a shape to a body

use slotmap::new_key_type;

use crate::body::BodyKey;
use crate::shapes::Shape;

new_key_type! {
    /// Key to a fixture in the physics world
    pub struct FixtureKey;
}

/// A shape attached to exactly one body
#[derive(Clone, Debug)]
pub struct Fixture {
    /// The owning body
    pub body: BodyKey,
    /// Shape in the body's local frame
    pub shape: Shape,
    /// Surface friction coefficient
    pub friction: f32,
}

impl Fixture {
    /// Create a fixture for `body`
    pub fn new(body: BodyKey, shape: Shape, friction: f32) -> Self {
        Self { body, shape, friction }
    }
}
