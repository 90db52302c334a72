//! 2D physics collaborator for the folded geology scene
//!
//! This crate provides the engine the scene is built against:
//! - [`SimulationEngine`] - the operations a scene may ask of an engine
//! - [`PhysicsWorld`] - a reference engine storing anchors, fixtures and particles
//! - Collision shapes (edges, chain loops, polygons)
//! - Particle groups with behavior flags and per-particle colors
//!
//! The reference world integrates particles under gravity inside the
//! container bounds. It has no contact solver and no particle-particle forces.

pub mod body;
pub mod engine;
pub mod error;
pub mod fixture;
pub mod particle;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{Body2D, BodyDef, BodyKey, BodyType};
pub use engine::SimulationEngine;
pub use error::PhysicsError;
pub use fixture::{Fixture, FixtureKey};
pub use particle::{
    ParticleColor, ParticleFlags, ParticleGroup, ParticleGroupDef, ParticleGroupKey, ParticleSystem,
    PARTICLE_STRIDE,
};
pub use shapes::{Aabb2, ChainShape, EdgeShape, PolygonShape, Shape};
pub use world::{PhysicsConfig, PhysicsWorld};
