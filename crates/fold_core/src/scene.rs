//! The assembled folded geology scene
//!
//! Construction order: check the template, set gravity, build the container,
//! seed the sediment, then build both fault blocks. The template is fully
//! validated first, so a bad template leaves the engine untouched.

use fold_physics::{PhysicsWorld, SimulationEngine};

use crate::boundary::BoundaryBody;
use crate::container::ContainerHandles;
use crate::error::SceneError;
use crate::fault::FaultController;
use crate::template::{MovingBlock, SceneTemplate};

/// A container of sediment crossed by a two-block fault
pub struct FoldedGeology<E: SimulationEngine = PhysicsWorld> {
    engine: E,
    name: String,
    container: ContainerHandles,
    left: BoundaryBody,
    right: BoundaryBody,
    fault: FaultController,
}

impl FoldedGeology<PhysicsWorld> {
    /// Build the default scene in a fresh [`PhysicsWorld`]
    pub fn new() -> Result<Self, SceneError> {
        Self::from_template(&SceneTemplate::default(), PhysicsWorld::new())
    }

    /// Total number of sediment particles
    pub fn particle_count(&self) -> usize {
        self.engine.particles().particle_count()
    }
}

impl<E: SimulationEngine> FoldedGeology<E> {
    /// Build the scene described by `template` into `engine`
    pub fn from_template(template: &SceneTemplate, mut engine: E) -> Result<Self, SceneError> {
        let layout = template.resolve()?;

        engine.set_gravity(template.gravity);
        let container = template.container.build(&mut engine)?;
        template.emission().emit(&mut engine)?;

        let friction = template.fault.friction;
        let left = BoundaryBody::build(&mut engine, &layout.polyline, layout.left, friction)?;
        let right = BoundaryBody::build(&mut engine, &layout.polyline, layout.right, friction)?;

        let moving = match template.fault.moving_block {
            MovingBlock::Left => left.key(),
            MovingBlock::Right => right.key(),
        };
        let fault = FaultController::new(moving, template.fault.trigger_key, template.fault.step);

        log::info!(
            "Built scene '{}': {} static edges, fault blocks of {} and {} segments",
            template.name,
            container.edges.len(),
            left.segment_count(),
            right.segment_count()
        );

        Ok(Self {
            engine,
            name: template.name.clone(),
            container,
            left,
            right,
            fault,
        })
    }

    /// Handle a key press; only the fault key does anything
    ///
    /// Returns whether the key slipped the fault.
    pub fn keyboard(&mut self, key: char) -> Result<bool, SceneError> {
        Ok(self.fault.handle_key(&mut self.engine, key)?)
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.engine.step(dt);
    }

    /// Text lines for a debug overlay
    pub fn overlay_lines(&self) -> Vec<String> {
        let offset = self.fault.offset();
        vec![
            format!("Press '{}' to slip the fault", self.fault.key()),
            format!(
                "Fault slips: {}  offset: ({:.3}, {:.3})",
                self.fault.applied(),
                offset.x,
                offset.y
            ),
        ]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Consume the scene, returning the engine
    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn container(&self) -> &ContainerHandles {
        &self.container
    }

    /// Block left of the split
    pub fn left_block(&self) -> &BoundaryBody {
        &self.left
    }

    /// Block right of the split
    pub fn right_block(&self) -> &BoundaryBody {
        &self.right
    }

    pub fn fault(&self) -> &FaultController {
        &self.fault
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fold_math::Vec2;

    #[test]
    fn test_default_scene_builds() {
        let scene = FoldedGeology::new().unwrap();
        assert_eq!(scene.name(), "Folded Geology");
        assert_eq!(scene.engine().config.gravity, Vec2::new(0.0, 10.0));
        assert_eq!(scene.left_block().segment_count(), 8);
        assert_eq!(scene.right_block().segment_count(), 8);
        assert_eq!(scene.fault().body(), scene.right_block().key());
        assert!(scene.particle_count() > 0);
    }

    #[test]
    fn test_left_block_can_be_the_moving_one() {
        let mut template = SceneTemplate::default();
        template.fault.moving_block = MovingBlock::Left;
        let mut scene = FoldedGeology::from_template(&template, PhysicsWorld::new()).unwrap();

        scene.keyboard('f').unwrap();

        let world = scene.engine();
        assert_eq!(world.get_body(scene.left_block().key()).unwrap().position(), template.fault.step);
        assert_eq!(world.get_body(scene.right_block().key()).unwrap().position(), Vec2::ZERO);
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let mut template = SceneTemplate::default();
        template.fault.curve.xs.truncate(1);
        template.fault.curve.ys.truncate(1);

        let result = FoldedGeology::from_template(&template, PhysicsWorld::new());
        assert!(matches!(result, Err(SceneError::Curve(_))));
    }

    #[test]
    fn test_overlay_reports_offset() {
        let mut scene = FoldedGeology::new().unwrap();
        scene.keyboard('f').unwrap();
        scene.keyboard('f').unwrap();

        let lines = scene.overlay_lines();
        assert!(lines[0].contains("'f'"));
        assert!(lines[1].contains("Fault slips: 2"));
        assert!(lines[1].contains("0.026"));
    }
}
