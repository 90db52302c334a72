//! Container loop and the static edges inside it
//!
//! The container is a closed four-corner loop. Near its top, two horizontal
//! gate edges leave a narrow gap, optionally lined by vertical throat edges;
//! further edges (ledges, floor dividers) are plain static segments.

use fold_math::geometry::{self, EPSILON};
use fold_math::Vec2;
use fold_physics::{BodyDef, BodyKey, ChainShape, EdgeShape, Shape, SimulationEngine};
use serde::{Serialize, Deserialize};

use crate::error::SceneError;

/// A static edge segment in scene data
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub start: Vec2,
    pub end: Vec2,
}

impl EdgeSpec {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn to_shape(&self) -> Shape {
        Shape::Edge(EdgeShape::new(self.start, self.end))
    }

    fn is_degenerate(&self) -> bool {
        (self.end - self.start).length() <= EPSILON
    }
}

/// Layout of the container and its static edges
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainerLayout {
    /// Loop corners, in order around the container
    pub corners: [Vec2; 4],
    /// Friction of the container loop
    #[serde(default)]
    pub loop_friction: f32,
    /// The two edges whose gap gates the emission region
    pub gate: [EdgeSpec; 2],
    /// One or two vertical edges lining the gap
    pub throats: Vec<EdgeSpec>,
    /// Any further static edges
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    /// Friction of every static edge
    pub edge_friction: f32,
}

/// Engine handles of a built container
#[derive(Clone, Debug)]
pub struct ContainerHandles {
    /// The anchor owning the closed loop
    pub ground: BodyKey,
    /// One anchor per static edge: gate, throats, then the rest
    pub edges: Vec<BodyKey>,
}

impl ContainerLayout {
    /// Width of the gap between the two gate edges
    pub fn gate_gap(&self) -> f32 {
        let [a, b] = self.gate;
        [(a.start, b.start), (a.start, b.end), (a.end, b.start), (a.end, b.end)]
            .into_iter()
            .map(|(p, q)| (q - p).length())
            .fold(f32::INFINITY, f32::min)
    }

    /// Whether `point` lies inside or on the container loop
    pub fn contains(&self, point: Vec2) -> bool {
        geometry::polygon_contains(&self.corners, point)
    }

    /// First point where the loop reaches into `region`, if any
    ///
    /// A region can have every corner inside a concave loop and still be cut
    /// by one of its edges.
    pub fn intrusion(&self, region: &[Vec2]) -> Option<Vec2> {
        geometry::polygon_intrusion(&self.corners, region)
    }

    /// Every static edge, gate first, then throats, then the rest
    pub fn static_edges(&self) -> impl Iterator<Item = &EdgeSpec> + '_ {
        self.gate.iter().chain(&self.throats).chain(&self.edges)
    }

    /// Check the layout before anything is registered with an engine
    pub fn validate(&self) -> Result<(), SceneError> {
        if !geometry::is_simple_polygon(&self.corners) {
            return Err(SceneError::ContainerNotSimple);
        }
        if !(1..=2).contains(&self.throats.len()) {
            return Err(SceneError::ThroatCount(self.throats.len()));
        }
        if let Some(index) = self.static_edges().position(EdgeSpec::is_degenerate) {
            return Err(SceneError::DegenerateEdge { index });
        }
        if self.gate_gap() <= EPSILON {
            return Err(SceneError::GateClosed);
        }
        Ok(())
    }

    /// Register the loop and every static edge with the engine
    pub fn build<E: SimulationEngine>(&self, engine: &mut E) -> Result<ContainerHandles, SceneError> {
        self.validate()?;

        let ground = engine.create_body(BodyDef::new());
        engine.create_fixture(ground, Shape::Chain(ChainShape::create_loop(&self.corners)), self.loop_friction)?;

        let mut edges = Vec::with_capacity(2 + self.throats.len() + self.edges.len());
        for edge in self.static_edges() {
            let body = engine.create_body(BodyDef::new());
            engine.create_fixture(body, edge.to_shape(), self.edge_friction)?;
            edges.push(body);
        }

        log::debug!("Container built with {} static edges, gate gap {:.3}", edges.len(), self.gate_gap());
        Ok(ContainerHandles { ground, edges })
    }
}

impl Default for ContainerLayout {
    fn default() -> Self {
        let edge = |x1, y1, x2, y2| EdgeSpec::new(Vec2::new(x1, y1), Vec2::new(x2, y2));
        Self {
            corners: [
                Vec2::new(-2.0, 0.0),
                Vec2::new(2.0, 0.0),
                Vec2::new(2.0, 4.0),
                Vec2::new(-2.0, 4.0),
            ],
            loop_friction: 0.0,
            gate: [edge(-2.0, 3.2, -1.2, 3.2), edge(-1.1, 3.2, 2.0, 3.2)],
            throats: vec![edge(-1.2, 3.2, -1.2, 2.8), edge(-1.1, 3.2, -1.1, 2.8)],
            edges: vec![
                // Ledges
                edge(-1.6, 2.4, 0.6, 2.0),
                edge(1.6, 1.6, -0.8, 1.2),
                // Floor dividers
                edge(-1.2, 0.8, -1.2, 0.0),
                edge(-0.4, 0.8, -0.4, 0.0),
                edge(0.4, 0.8, 0.4, 0.0),
                edge(1.2, 0.8, 1.2, 0.0),
            ],
            edge_friction: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fold_physics::PhysicsWorld;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = ContainerLayout::default();
        assert!(layout.validate().is_ok());
        assert_abs_diff_eq!(layout.gate_gap(), 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_build_registers_loop_and_edges() {
        let layout = ContainerLayout::default();
        let mut world = PhysicsWorld::new();
        let handles = layout.build(&mut world).unwrap();

        // Loop anchor + 2 gate + 2 throat + 6 others
        assert_eq!(handles.edges.len(), 10);
        assert_eq!(world.body_count(), 11);
        assert_eq!(world.fixture_count(), 11);

        let ground = world.get_body(handles.ground).unwrap();
        let fixture = world.get_fixture(ground.fixtures()[0]).unwrap();
        match &fixture.shape {
            Shape::Chain(chain) => {
                assert!(chain.closed);
                assert_eq!(chain.vertices.len(), 4);
            }
            other => panic!("expected a chain loop, got {:?}", other),
        }

        let bounds = world.container_bounds().unwrap();
        assert_eq!(bounds.min, Vec2::new(-2.0, 0.0));
        assert_eq!(bounds.max, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_self_intersecting_corners_rejected() {
        let mut layout = ContainerLayout::default();
        layout.corners.swap(1, 2);
        let mut world = PhysicsWorld::new();

        assert!(matches!(layout.build(&mut world), Err(SceneError::ContainerNotSimple)));
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_throat_count() {
        let mut layout = ContainerLayout::default();
        layout.throats.truncate(1);
        assert!(layout.validate().is_ok());

        layout.throats.clear();
        assert!(matches!(layout.validate(), Err(SceneError::ThroatCount(0))));
    }

    #[test]
    fn test_closed_gate_rejected() {
        let mut layout = ContainerLayout::default();
        layout.gate[1].start = layout.gate[0].end;
        assert!(matches!(layout.validate(), Err(SceneError::GateClosed)));
    }

    #[test]
    fn test_degenerate_edge_rejected() {
        let mut layout = ContainerLayout::default();
        layout.edges[0].end = layout.edges[0].start;
        // Gate (2) and throats (2) come first
        assert!(matches!(layout.validate(), Err(SceneError::DegenerateEdge { index: 4 })));
    }

    #[test]
    fn test_contains_is_boundary_inclusive() {
        let layout = ContainerLayout::default();
        assert!(layout.contains(Vec2::new(0.0, 2.0)));
        assert!(layout.contains(Vec2::new(-2.0, 0.0)));
        assert!(!layout.contains(Vec2::new(0.0, 4.5)));
    }
}
