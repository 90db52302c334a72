//! Physics world and simulation

use fold_math::{Transform2D, Vec2};
use slotmap::SlotMap;

use crate::body::{Body2D, BodyDef, BodyKey, BodyType};
use crate::engine::SimulationEngine;
use crate::error::PhysicsError;
use crate::fixture::{Fixture, FixtureKey};
use crate::particle::{ParticleColor, ParticleGroupDef, ParticleGroupKey, ParticleSystem};
use crate::shapes::{Aabb2, Shape};

/// Configuration for the physics simulation
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Gravity acceleration
    pub gravity: Vec2,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -10.0),
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: Vec2) -> Self {
        Self { gravity }
    }
}

/// The physics world containing all bodies, fixtures and particles
pub struct PhysicsWorld {
    /// All bodies (using generational keys)
    bodies: SlotMap<BodyKey, Body2D>,
    /// All fixtures, each owned by one body
    fixtures: SlotMap<FixtureKey, Fixture>,
    particles: ParticleSystem,
    step_count: u64,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            fixtures: SlotMap::with_key(),
            particles: ParticleSystem::new(),
            step_count: 0,
            config,
        }
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&Body2D> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut Body2D> {
        self.bodies.get_mut(key)
    }

    /// Remove a body and all of its fixtures
    pub fn remove_body(&mut self, key: BodyKey) -> Option<Body2D> {
        let body = self.bodies.remove(key)?;
        for fixture in body.fixtures() {
            self.fixtures.remove(*fixture);
        }
        Some(body)
    }

    /// Get a fixture by key
    pub fn get_fixture(&self, key: FixtureKey) -> Option<&Fixture> {
        self.fixtures.get(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Get the number of fixtures in the world
    pub fn fixture_count(&self) -> usize {
        self.fixtures.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// Iterate over all fixtures
    pub fn fixtures(&self) -> impl Iterator<Item = (FixtureKey, &Fixture)> + '_ {
        self.fixtures.iter()
    }

    /// Get the particle system
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Number of steps taken so far
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// World-space bounds of all closed chain loops
    ///
    /// Particles are kept inside this box during a step.
    pub fn container_bounds(&self) -> Option<Aabb2> {
        self.fixtures
            .values()
            .filter(|f| matches!(&f.shape, Shape::Chain(c) if c.closed))
            .filter_map(|f| {
                let body = self.bodies.get(f.body)?;
                f.shape.aabb(&body.transform)
            })
            .reduce(|a, b| a.union(&b))
    }
}

impl SimulationEngine for PhysicsWorld {
    fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    fn create_body(&mut self, def: BodyDef) -> BodyKey {
        self.bodies.insert(Body2D::new(def))
    }

    fn create_fixture(&mut self, body: BodyKey, shape: Shape, friction: f32) -> Result<FixtureKey, PhysicsError> {
        if !self.bodies.contains_key(body) {
            return Err(PhysicsError::UnknownBody);
        }
        shape.validate()?;
        let key = self.fixtures.insert(Fixture::new(body, shape, friction));
        self.bodies[body].attach(key);
        Ok(key)
    }

    fn set_particle_radius(&mut self, radius: f32) -> Result<(), PhysicsError> {
        self.particles.set_radius(radius)
    }

    fn create_particle_group(&mut self, def: &ParticleGroupDef) -> Result<ParticleGroupKey, PhysicsError> {
        self.particles.create_group(def)
    }

    fn particle_colors_mut(&mut self, group: ParticleGroupKey) -> Option<&mut [ParticleColor]> {
        self.particles.group_mut(group).map(|g| g.colors_mut())
    }

    fn body_transform(&self, body: BodyKey) -> Option<Transform2D> {
        self.bodies.get(body).map(|b| b.transform)
    }

    fn set_body_transform(&mut self, body: BodyKey, transform: Transform2D) -> Result<(), PhysicsError> {
        let body = self.bodies.get_mut(body).ok_or(PhysicsError::UnknownBody)?;
        body.transform = transform;
        Ok(())
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs:
    /// 1. Gravity and velocity integration for dynamic bodies
    /// 2. Velocity integration for kinematic bodies
    /// 3. Particle integration, bounded by the container loops
    fn step(&mut self, dt: f32) {
        let gravity = self.config.gravity;

        // Phase 1/2: Integrate bodies
        for body in self.bodies.values_mut() {
            match body.body_type() {
                BodyType::Static => continue,
                BodyType::Dynamic => body.linear_velocity += gravity * dt,
                BodyType::Kinematic => {}
            }
            body.transform.position += body.linear_velocity * dt;
        }

        // Phase 3: Particles
        let bounds = self.container_bounds();
        self.particles.step(dt, gravity, bounds);

        self.step_count += 1;
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
