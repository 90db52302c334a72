//! The engine seam the scene is built against

use fold_math::{Transform2D, Vec2};

use crate::body::{BodyDef, BodyKey};
use crate::error::PhysicsError;
use crate::fixture::FixtureKey;
use crate::particle::{ParticleColor, ParticleGroupDef, ParticleGroupKey};
use crate::shapes::Shape;

/// Operations a scene needs from a physics/particle engine
///
/// Scene construction code is generic over this trait so it can run against
/// [`PhysicsWorld`](crate::PhysicsWorld) or any other backend.
pub trait SimulationEngine {
    /// Set world gravity
    fn set_gravity(&mut self, gravity: Vec2);

    /// Create an anchor and return its key
    fn create_body(&mut self, def: BodyDef) -> BodyKey;

    /// Attach a shape to a body with the given friction
    fn create_fixture(&mut self, body: BodyKey, shape: Shape, friction: f32) -> Result<FixtureKey, PhysicsError>;

    /// Set the global particle radius (controls fill spacing)
    fn set_particle_radius(&mut self, radius: f32) -> Result<(), PhysicsError>;

    /// Fill a shape with a new particle group
    fn create_particle_group(&mut self, def: &ParticleGroupDef) -> Result<ParticleGroupKey, PhysicsError>;

    /// Per-particle colors of a group, for a coloring pass
    fn particle_colors_mut(&mut self, group: ParticleGroupKey) -> Option<&mut [ParticleColor]>;

    /// Current transform of a body
    fn body_transform(&self, body: BodyKey) -> Option<Transform2D>;

    /// Reposition a body directly, bypassing forces and velocity
    fn set_body_transform(&mut self, body: BodyKey, transform: Transform2D) -> Result<(), PhysicsError>;

    /// Advance the simulation by `dt` seconds
    fn step(&mut self, dt: f32);
}
