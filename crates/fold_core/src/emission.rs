//! Particle emission: seeding the sediment layer
//!
//! Emission runs once while the scene is built. It sets the global particle
//! radius, fills the source box with one particle group and, when the group
//! mixes colors, tints it so the mixing is visible.

use fold_math::Vec2;
use fold_physics::{
    ParticleColor, ParticleFlags, ParticleGroupDef, ParticleGroupKey, PolygonShape, Shape, SimulationEngine,
};
use serde::{Serialize, Deserialize};

use crate::error::SceneError;

/// Colors handed out by [`color_particle_group`], in order
pub const PARTICLE_PALETTE: [ParticleColor; 8] = [
    ParticleColor::new(0xff, 0x00, 0x00, 0xff), // red
    ParticleColor::new(0x00, 0xff, 0x00, 0xff), // green
    ParticleColor::new(0x00, 0x00, 0xff, 0xff), // blue
    ParticleColor::new(0xff, 0x8c, 0x00, 0xff), // orange
    ParticleColor::new(0x00, 0xce, 0xd1, 0xff), // turquoise
    ParticleColor::new(0xff, 0x00, 0xff, 0xff), // magenta
    ParticleColor::new(0xff, 0xd7, 0x00, 0xff), // gold
    ParticleColor::new(0x00, 0xff, 0xff, 0xff), // cyan
];

/// Axis-aligned box the sediment is seeded in
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceRegion {
    pub half_width: f32,
    pub half_height: f32,
    pub center: Vec2,
}

impl SourceRegion {
    pub fn new(half_width: f32, half_height: f32, center: Vec2) -> Self {
        Self {
            half_width,
            half_height,
            center,
        }
    }

    /// Corners in counter-clockwise order, starting bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let (hx, hy, c) = (self.half_width, self.half_height, self.center);
        [
            Vec2::new(c.x - hx, c.y - hy),
            Vec2::new(c.x + hx, c.y - hy),
            Vec2::new(c.x + hx, c.y + hy),
            Vec2::new(c.x - hx, c.y + hy),
        ]
    }

    /// Polygon the particle group is filled from
    pub fn to_shape(&self) -> Shape {
        Shape::Polygon(PolygonShape::boxed(self.half_width, self.half_height, self.center, 0.0))
    }

    /// Check the box has positive extent
    pub fn validate(&self) -> Result<(), SceneError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !(positive(self.half_width) && positive(self.half_height) && self.center.is_finite()) {
            return Err(SceneError::EmptySource {
                half_width: self.half_width,
                half_height: self.half_height,
            });
        }
        Ok(())
    }
}

impl Default for SourceRegion {
    fn default() -> Self {
        Self::new(2.0, 0.2, Vec2::new(0.0, 0.2))
    }
}

/// One-shot particle emission settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emission {
    pub flags: ParticleFlags,
    pub region: SourceRegion,
    /// Global particle radius; fill spacing derives from it
    pub radius: f32,
}

impl Emission {
    pub fn new(flags: ParticleFlags, region: SourceRegion, radius: f32) -> Self {
        Self { flags, region, radius }
    }

    /// Check radius and region
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SceneError::InvalidRadius(self.radius));
        }
        self.region.validate()
    }

    /// Set the radius, create the group, and color it if it mixes colors
    pub fn emit<E: SimulationEngine>(&self, engine: &mut E) -> Result<ParticleGroupKey, SceneError> {
        self.validate()?;
        engine.set_particle_radius(self.radius)?;

        let def = ParticleGroupDef::new(self.region.to_shape(), self.flags);
        let group = engine.create_particle_group(&def)?;

        if self.flags.contains(ParticleFlags::COLOR_MIXING) {
            color_particle_group(engine, group, 0)?;
        }
        Ok(group)
    }
}

/// Tint a group in palette bands of `particles_per_color`
///
/// Particle `i` gets `PARTICLE_PALETTE[(i / particles_per_color) % 8]`.
/// Passing 0 spreads the whole palette evenly over the group.
pub fn color_particle_group<E: SimulationEngine>(
    engine: &mut E,
    group: ParticleGroupKey,
    particles_per_color: usize,
) -> Result<(), SceneError> {
    let colors = engine
        .particle_colors_mut(group)
        .ok_or(fold_physics::PhysicsError::UnknownParticleGroup)?;

    let per_color = match particles_per_color {
        0 => (colors.len() / PARTICLE_PALETTE.len()).max(1),
        n => n,
    };
    for (i, color) in colors.iter_mut().enumerate() {
        *color = PARTICLE_PALETTE[(i / per_color) % PARTICLE_PALETTE.len()];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fold_physics::PhysicsWorld;

    fn emission(flags: ParticleFlags) -> Emission {
        Emission::new(flags, SourceRegion::new(0.5, 0.2, Vec2::new(0.0, 0.2)), 0.05)
    }

    #[test]
    fn test_emit_creates_one_group_in_region() {
        let mut world = PhysicsWorld::new();
        let group = emission(ParticleFlags::TENSILE | ParticleFlags::VISCOUS).emit(&mut world).unwrap();

        assert_eq!(world.particles().radius(), 0.05);
        assert_eq!(world.particles().group_count(), 1);
        let group = world.particles().group(group).unwrap();
        assert!(group.particle_count() > 0);
        assert_eq!(group.flags(), ParticleFlags::TENSILE | ParticleFlags::VISCOUS);
    }

    #[test]
    fn test_color_mixing_tints_every_particle() {
        let mut world = PhysicsWorld::new();
        let key = emission(ParticleFlags::COLOR_MIXING).emit(&mut world).unwrap();

        let group = world.particles().group(key).unwrap();
        assert!(group.colors().iter().all(|c| !c.is_zero()));
        assert_eq!(group.colors()[0], PARTICLE_PALETTE[0]);
    }

    #[test]
    fn test_no_coloring_without_flag() {
        let mut world = PhysicsWorld::new();
        let key = emission(ParticleFlags::TENSILE).emit(&mut world).unwrap();

        let group = world.particles().group(key).unwrap();
        assert!(group.colors().iter().all(ParticleColor::is_zero));
    }

    #[test]
    fn test_palette_bands() {
        let mut world = PhysicsWorld::new();
        let key = emission(ParticleFlags::WATER).emit(&mut world).unwrap();

        color_particle_group(&mut world, key, 3).unwrap();

        let colors = world.particles().group(key).unwrap().colors();
        assert_eq!(colors[0], PARTICLE_PALETTE[0]);
        assert_eq!(colors[2], PARTICLE_PALETTE[0]);
        assert_eq!(colors[3], PARTICLE_PALETTE[1]);
        assert_eq!(colors[3 * 8], PARTICLE_PALETTE[0]);
    }

    #[test]
    fn test_invalid_radius_creates_nothing() {
        let mut world = PhysicsWorld::new();
        let bad = Emission::new(ParticleFlags::WATER, SourceRegion::default(), 0.0);

        assert!(matches!(bad.emit(&mut world), Err(SceneError::InvalidRadius(_))));
        assert_eq!(world.particles().group_count(), 0);
    }

    #[test]
    fn test_empty_region_rejected() {
        let region = SourceRegion::new(0.0, 0.2, Vec2::ZERO);
        assert!(matches!(region.validate(), Err(SceneError::EmptySource { .. })));
    }

    #[test]
    fn test_region_corners() {
        let corners = SourceRegion::default().corners();
        assert_eq!(corners[0], Vec2::new(-2.0, 0.0));
        assert_eq!(corners[2], Vec2::new(2.0, 0.4));
    }
}
