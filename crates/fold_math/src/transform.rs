//! 2D Transform (position, rotation)
//!
//! A Transform2D places a rigid anchor in the plane. Fixture shapes are stored
//! in the anchor's local frame and mapped to world space through it.

use serde::{Serialize, Deserialize};
use crate::Vec2;

/// A 2D rigid transform with position and rotation angle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Position in world units
    pub position: Vec2,
    /// Rotation in radians (counter-clockwise)
    pub angle: f32,
}

impl Transform2D {
    /// Identity transform (origin, no rotation)
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        angle: 0.0,
    };

    /// Create a transform from position and angle
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self { position, angle }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec2) -> Self {
        Self::new(position, 0.0)
    }

    /// Return this transform shifted by `delta` with its rotation held at zero
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.position + delta, 0.0)
    }

    /// Transform a point from local space to world space
    #[inline]
    pub fn transform_point(&self, local: Vec2) -> Vec2 {
        local.rotated(self.angle) + self.position
    }

    /// Transform a point from world space to local space
    #[inline]
    pub fn inverse_transform_point(&self, world: Vec2) -> Vec2 {
        (world - self.position).rotated(-self.angle)
    }
}
