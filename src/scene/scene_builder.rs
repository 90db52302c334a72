//! SceneBuilder - template loading with configuration overrides
//!
//! Provides a fluent API over [`SceneTemplate`] for the few values the
//! application config is allowed to change.

use std::path::Path;

use fold_core::{FoldedGeology, PhysicsWorld, SceneError, SceneTemplate, SimulationEngine};
use fold_math::Vec2;
use fold_physics::ParticleFlags;

use crate::config::AppConfig;

/// Builder for the folded geology scene
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::load("scenes/folded_geology.ron")?
///     .with_gravity(Vec2::new(0.0, 10.0))
///     .with_fault_key('g')
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    template: SceneTemplate,
}

impl SceneBuilder {
    /// Start from the built-in default template
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_template(template: SceneTemplate) -> Self {
        Self { template }
    }

    /// Start from a RON template on disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        Ok(Self::from_template(SceneTemplate::load(path)?))
    }

    /// Load the configured template and apply every override the config sets
    pub fn from_config(config: &AppConfig) -> Result<Self, SceneError> {
        let mut builder = Self::load(&config.scene.template)?;

        if let Some([x, y]) = config.physics.gravity {
            builder = builder.with_gravity(Vec2::new(x, y));
        }
        if let Some(radius) = config.particles.radius {
            builder = builder.with_particle_radius(radius);
        }
        if let Some(flags) = config.particles.flags {
            builder = builder.with_particle_flags(flags);
        }
        if let Some(key) = config.input.fault_key {
            builder = builder.with_fault_key(key);
        }

        Ok(builder)
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.template.gravity = gravity;
        self
    }

    pub fn with_particle_radius(mut self, radius: f32) -> Self {
        self.template.particle_radius = radius;
        self
    }

    pub fn with_particle_flags(mut self, flags: ParticleFlags) -> Self {
        self.template.particle_flags = flags;
        self
    }

    /// Change the key that slips the fault
    pub fn with_fault_key(mut self, key: char) -> Self {
        self.template.fault.trigger_key = key;
        self
    }

    pub fn template(&self) -> &SceneTemplate {
        &self.template
    }

    /// Build the scene in the reference physics world
    pub fn build(&self) -> Result<FoldedGeology, SceneError> {
        self.build_in(PhysicsWorld::new())
    }

    /// Build the scene into a caller-supplied engine
    pub fn build_in<E: SimulationEngine>(&self, engine: E) -> Result<FoldedGeology<E>, SceneError> {
        FoldedGeology::from_template(&self.template, engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_template() {
        let builder = SceneBuilder::new();
        assert_eq!(builder.template(), &SceneTemplate::default());
    }

    #[test]
    fn test_overrides_reach_the_scene() {
        let scene = SceneBuilder::new()
            .with_gravity(Vec2::new(0.0, -10.0))
            .with_fault_key('g')
            .build()
            .unwrap();

        assert_eq!(scene.engine().config.gravity, Vec2::new(0.0, -10.0));
        assert_eq!(scene.fault().key(), 'g');
    }

    #[test]
    fn test_config_overrides() {
        let mut config = AppConfig::default();
        config.scene.template = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/folded_geology.ron").into();
        config.physics.gravity = Some([0.0, 5.0]);
        config.particles.radius = Some(0.05);
        config.particles.flags = Some(ParticleFlags::TENSILE | ParticleFlags::COLOR_MIXING);
        config.input.fault_key = Some('x');

        let builder = SceneBuilder::from_config(&config).unwrap();
        let template = builder.template();
        assert_eq!(template.gravity, Vec2::new(0.0, 5.0));
        assert_eq!(template.particle_radius, 0.05);
        assert!(template.particle_flags.contains(ParticleFlags::COLOR_MIXING));
        assert_eq!(template.fault.trigger_key, 'x');
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let mut config = AppConfig::default();
        config.scene.template = std::env::temp_dir().join("folded_geology_missing.ron");

        assert!(matches!(SceneBuilder::from_config(&config), Err(SceneError::Io(_))));
    }

    #[test]
    fn test_bad_override_is_rejected_at_build() {
        let result = SceneBuilder::new().with_particle_radius(-1.0).build_in(PhysicsWorld::new());
        assert!(result.is_err());
    }
}
