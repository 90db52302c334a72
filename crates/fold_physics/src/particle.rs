//! Particle groups and the particle system that owns them
//!
//! Groups are filled on a regular grid whose spacing derives from the global
//! particle radius. Particles carry a behavior flag set and a color; the
//! reference step only integrates gravity and keeps particles in bounds.

use bitflags::bitflags;
use fold_math::geometry::EPSILON;
use fold_math::{Transform2D, Vec2};
use serde::{Serialize, Deserialize};
use slotmap::{new_key_type, SlotMap};

use crate::error::PhysicsError;
use crate::shapes::{Aabb2, Shape};

/// Grid spacing as a fraction of the particle diameter
pub const PARTICLE_STRIDE: f32 = 0.75;

/// Radius used until a scene sets its own
pub const DEFAULT_PARTICLE_RADIUS: f32 = 1.0;

new_key_type! {
    /// Key to a particle group in the particle system
    pub struct ParticleGroupKey;
}

bitflags! {
    /// Material behavior of a particle
    ///
    /// Flags combine freely; an empty set is plain water.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ParticleFlags: u32 {
        /// Plain liquid with no extra behavior
        const WATER = 0;
        /// Removed at the next opportunity
        const ZOMBIE = 1 << 1;
        /// Never moves
        const WALL = 1 << 2;
        /// Springy connections
        const SPRING = 1 << 3;
        /// Elastic connections
        const ELASTIC = 1 << 4;
        /// Damps relative velocity with neighbours
        const VISCOUS = 1 << 5;
        /// Repulsive only, no cohesion
        const POWDER = 1 << 6;
        /// Surface tension
        const TENSILE = 1 << 7;
        /// Blends color with neighbours
        const COLOR_MIXING = 1 << 8;
        /// Reports its own destruction
        const DESTRUCTION_LISTENER = 1 << 9;
        /// Blocks tunnelling through walls
        const BARRIER = 1 << 10;
        /// Less compressible
        const STATIC_PRESSURE = 1 << 11;
        /// Forms new connections on contact
        const REACTIVE = 1 << 12;
        /// Pushes away other groups
        const REPULSIVE = 1 << 13;
    }
}

/// An RGBA particle tint; the all-zero default means "not colored"
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticleColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ParticleColor {
    /// Uncolored
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a color from RGBA bytes
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether this is the default (uncolored) tint
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Parameters for creating a particle group
#[derive(Clone, Debug)]
pub struct ParticleGroupDef {
    /// Behavior flags applied to every particle in the group
    pub flags: ParticleFlags,
    /// Region to fill; must be a polygon
    pub shape: Shape,
    /// Placement of `shape` in the world
    pub transform: Transform2D,
    /// Initial color of every particle
    pub color: ParticleColor,
}

impl ParticleGroupDef {
    /// Fill `shape` at its own coordinates with the given flags
    pub fn new(shape: Shape, flags: ParticleFlags) -> Self {
        Self {
            flags,
            shape,
            transform: Transform2D::IDENTITY,
            color: ParticleColor::ZERO,
        }
    }
}

/// A batch of particles created together
#[derive(Clone, Debug)]
pub struct ParticleGroup {
    flags: ParticleFlags,
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    colors: Vec<ParticleColor>,
}

impl ParticleGroup {
    /// Behavior flags shared by the group
    pub fn flags(&self) -> ParticleFlags {
        self.flags
    }

    /// Number of particles in the group
    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    pub fn colors(&self) -> &[ParticleColor] {
        &self.colors
    }

    /// Mutable access to per-particle colors for a coloring pass
    pub fn colors_mut(&mut self) -> &mut [ParticleColor] {
        &mut self.colors
    }

    /// Bounding box of the particle positions
    pub fn aabb(&self) -> Option<Aabb2> {
        Aabb2::from_points(self.positions.iter().copied())
    }
}

/// Owner of all particle groups and the global particle radius
#[derive(Debug)]
pub struct ParticleSystem {
    radius: f32,
    groups: SlotMap<ParticleGroupKey, ParticleGroup>,
}

impl ParticleSystem {
    /// Create an empty particle system
    pub fn new() -> Self {
        Self {
            radius: DEFAULT_PARTICLE_RADIUS,
            groups: SlotMap::with_key(),
        }
    }

    /// Global particle radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Set the global particle radius
    pub fn set_radius(&mut self, radius: f32) -> Result<(), PhysicsError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        self.radius = radius;
        Ok(())
    }

    /// Distance between neighbouring particles in a freshly filled group
    pub fn stride(&self) -> f32 {
        PARTICLE_STRIDE * 2.0 * self.radius
    }

    /// Create a group by filling the def's shape on a stride-aligned grid
    ///
    /// Grid lines sit on integer multiples of the stride, so two groups
    /// filled with the same radius interleave without overlap.
    pub fn create_group(&mut self, def: &ParticleGroupDef) -> Result<ParticleGroupKey, PhysicsError> {
        if !matches!(def.shape, Shape::Polygon(_)) {
            return Err(PhysicsError::UnsupportedParticleShape);
        }
        def.shape.validate()?;
        let aabb = def
            .shape
            .aabb(&def.transform)
            .ok_or_else(|| PhysicsError::InvalidPolygon("no vertices".to_string()))?;

        // Grid indices, with the far edges included
        let stride = self.stride();
        let (i0, i1) = ((aabb.min.x / stride).floor() as i32, ((aabb.max.x + EPSILON) / stride).floor() as i32);
        let (j0, j1) = ((aabb.min.y / stride).floor() as i32, ((aabb.max.y + EPSILON) / stride).floor() as i32);

        let mut positions = Vec::new();
        for j in j0..=j1 {
            for i in i0..=i1 {
                let p = Vec2::new(i as f32 * stride, j as f32 * stride);
                if def.shape.test_point(&def.transform, p) {
                    positions.push(p);
                }
            }
        }

        let count = positions.len();
        log::debug!("Created particle group: {} particles, flags {:?}", count, def.flags);
        Ok(self.groups.insert(ParticleGroup {
            flags: def.flags,
            positions,
            velocities: vec![Vec2::ZERO; count],
            colors: vec![def.color; count],
        }))
    }

    /// Get a group by key
    pub fn group(&self, key: ParticleGroupKey) -> Option<&ParticleGroup> {
        self.groups.get(key)
    }

    /// Get a mutable group by key
    pub fn group_mut(&mut self, key: ParticleGroupKey) -> Option<&mut ParticleGroup> {
        self.groups.get_mut(key)
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of particles across all groups
    pub fn particle_count(&self) -> usize {
        self.groups.values().map(ParticleGroup::particle_count).sum()
    }

    /// Iterate over all groups
    pub fn groups(&self) -> impl Iterator<Item = (ParticleGroupKey, &ParticleGroup)> + '_ {
        self.groups.iter()
    }

    /// Integrate gravity and keep particles inside `bounds`
    ///
    /// Wall particles never move. A particle pushed back onto the bounds
    /// loses its velocity along that axis.
    pub fn step(&mut self, dt: f32, gravity: Vec2, bounds: Option<Aabb2>) {
        for group in self.groups.values_mut() {
            if group.flags.contains(ParticleFlags::WALL) {
                continue;
            }
            for (p, v) in group.positions.iter_mut().zip(group.velocities.iter_mut()) {
                *v += gravity * dt;
                *p += *v * dt;

                if let Some(b) = bounds {
                    let clamped = p.clamp_components(b.min, b.max);
                    if clamped.x != p.x {
                        v.x = 0.0;
                    }
                    if clamped.y != p.y {
                        v.y = 0.0;
                    }
                    *p = clamped;
                }
            }
        }
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{EdgeShape, PolygonShape};
    use approx::assert_abs_diff_eq;

    fn box_def(flags: ParticleFlags) -> ParticleGroupDef {
        ParticleGroupDef::new(
            Shape::Polygon(PolygonShape::boxed(0.5, 0.25, Vec2::new(0.0, 0.25), 0.0)),
            flags,
        )
    }

    #[test]
    fn test_set_radius_rejects_non_positive() {
        let mut system = ParticleSystem::new();
        assert_eq!(system.set_radius(0.0), Err(PhysicsError::InvalidRadius(0.0)));
        assert!(system.set_radius(f32::NAN).is_err());
        assert!(system.set_radius(0.025).is_ok());
        assert_eq!(system.radius(), 0.025);
        assert_abs_diff_eq!(system.stride(), 0.0375, epsilon = 1e-7);
    }

    #[test]
    fn test_fill_stays_inside_shape() {
        let mut system = ParticleSystem::new();
        system.set_radius(0.05).unwrap();
        let key = system.create_group(&box_def(ParticleFlags::TENSILE)).unwrap();
        let group = system.group(key).unwrap();

        assert!(group.particle_count() > 0);
        for p in group.positions() {
            assert!(p.x >= -0.5 - 1e-4 && p.x <= 0.5 + 1e-4, "x out of box: {:?}", p);
            assert!(p.y >= -1e-4 && p.y <= 0.5 + 1e-4, "y out of box: {:?}", p);
        }
        assert_eq!(group.flags(), ParticleFlags::TENSILE);
        assert!(group.colors().iter().all(ParticleColor::is_zero));
    }

    #[test]
    fn test_fill_includes_far_edges() {
        // Stride 0.375 divides the box exactly: 5 columns by 3 rows
        let mut system = ParticleSystem::new();
        system.set_radius(0.25).unwrap();
        let def = ParticleGroupDef::new(
            Shape::Polygon(PolygonShape::boxed(0.75, 0.375, Vec2::new(0.0, 0.375), 0.0)),
            ParticleFlags::WATER,
        );
        let key = system.create_group(&def).unwrap();
        let group = system.group(key).unwrap();

        assert_eq!(group.particle_count(), 15);
        assert!(group.positions().contains(&Vec2::new(0.75, 0.75)));
        assert!(group.positions().contains(&Vec2::new(-0.75, 0.0)));
    }

    #[test]
    fn test_smaller_radius_fills_more_particles() {
        let mut coarse = ParticleSystem::new();
        coarse.set_radius(0.1).unwrap();
        let mut fine = ParticleSystem::new();
        fine.set_radius(0.025).unwrap();

        let a = coarse.create_group(&box_def(ParticleFlags::WATER)).unwrap();
        let b = fine.create_group(&box_def(ParticleFlags::WATER)).unwrap();
        assert!(fine.group(b).unwrap().particle_count() > coarse.group(a).unwrap().particle_count());
    }

    #[test]
    fn test_edge_shape_is_rejected() {
        let mut system = ParticleSystem::new();
        let def = ParticleGroupDef::new(
            Shape::Edge(EdgeShape::new(Vec2::ZERO, Vec2::X)),
            ParticleFlags::WATER,
        );
        assert_eq!(system.create_group(&def), Err(PhysicsError::UnsupportedParticleShape));
        assert_eq!(system.group_count(), 0);
    }

    #[test]
    fn test_step_applies_gravity_and_clamps() {
        let mut system = ParticleSystem::new();
        system.set_radius(0.1).unwrap();
        let key = system.create_group(&box_def(ParticleFlags::WATER)).unwrap();
        let bounds = Aabb2::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 1.0));

        for _ in 0..200 {
            system.step(1.0 / 60.0, Vec2::new(0.0, -10.0), Some(bounds));
        }

        let group = system.group(key).unwrap();
        for (p, v) in group.positions().iter().zip(group.velocities()) {
            assert!(bounds.contains(*p));
            assert_eq!(v.y, 0.0);
        }
    }

    #[test]
    fn test_wall_particles_do_not_move() {
        let mut system = ParticleSystem::new();
        system.set_radius(0.1).unwrap();
        let key = system.create_group(&box_def(ParticleFlags::WALL)).unwrap();
        let before = system.group(key).unwrap().positions().to_vec();

        system.step(0.1, Vec2::new(0.0, -10.0), None);

        assert_eq!(system.group(key).unwrap().positions(), &before[..]);
    }

    #[test]
    fn test_flags_parse_from_text() {
        let flags: ParticleFlags = bitflags::parser::from_str("TENSILE | VISCOUS").unwrap();
        assert_eq!(flags, ParticleFlags::TENSILE | ParticleFlags::VISCOUS);
        assert!(!flags.contains(ParticleFlags::COLOR_MIXING));
    }
}
