//! Collision shapes for 2D physics
//!
//! Shapes are stored in their anchor's local frame. Scene bodies are created
//! at the origin, so for them local and world coordinates coincide until a
//! body is repositioned.

use fold_math::geometry::{self, EPSILON};
use fold_math::{Transform2D, Vec2};
use serde::{Serialize, Deserialize};

use crate::error::PhysicsError;

/// A 2D axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Aabb2 {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Smallest AABB containing all of `points`
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::new(first, first);
        for p in iter {
            aabb.min = aabb.min.min_components(p);
            aabb.max = aabb.max.max_components(p);
        }
        Some(aabb)
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Check if a point is inside or on the AABB
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Smallest AABB containing both boxes
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.min.min_components(other.min), self.max.max_components(other.max))
    }
}

/// A single line segment
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeShape {
    pub v1: Vec2,
    pub v2: Vec2,
}

impl EdgeShape {
    /// Create an edge between two points
    pub fn new(v1: Vec2, v2: Vec2) -> Self {
        Self { v1, v2 }
    }

    /// Length of the edge
    pub fn length(&self) -> f32 {
        (self.v2 - self.v1).length()
    }
}

/// A chain of connected segments, optionally closed into a loop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainShape {
    pub vertices: Vec<Vec2>,
    /// Whether the last vertex connects back to the first
    pub closed: bool,
}

impl ChainShape {
    /// Create a closed loop through `vertices`
    pub fn create_loop(vertices: &[Vec2]) -> Self {
        Self {
            vertices: vertices.to_vec(),
            closed: true,
        }
    }

    /// Create an open chain through `vertices`
    pub fn create_chain(vertices: &[Vec2]) -> Self {
        Self {
            vertices: vertices.to_vec(),
            closed: false,
        }
    }

    /// Number of segments in the chain
    pub fn edge_count(&self) -> usize {
        match (self.vertices.len(), self.closed) {
            (0 | 1, _) => 0,
            (n, true) => n,
            (n, false) => n - 1,
        }
    }

    /// Get the segment at `index` as an edge
    pub fn edge(&self, index: usize) -> Option<EdgeShape> {
        if index >= self.edge_count() {
            return None;
        }
        let v1 = self.vertices[index];
        let v2 = self.vertices[(index + 1) % self.vertices.len()];
        Some(EdgeShape::new(v1, v2))
    }
}

/// A convex polygon with counter-clockwise vertices
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonShape {
    pub vertices: Vec<Vec2>,
}

impl PolygonShape {
    /// Create an oriented box with half-extents `hx`, `hy` around `center`
    pub fn boxed(hx: f32, hy: f32, center: Vec2, angle: f32) -> Self {
        let xf = Transform2D::new(center, angle);
        let vertices = [
            Vec2::new(-hx, -hy),
            Vec2::new(hx, -hy),
            Vec2::new(hx, hy),
            Vec2::new(-hx, hy),
        ]
        .into_iter()
        .map(|v| xf.transform_point(v))
        .collect();
        Self { vertices }
    }

    /// Check if a local-space point is inside or on the polygon
    pub fn contains_local(&self, point: Vec2) -> bool {
        let n = self.vertices.len();
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            (b - a).cross(point - a) >= -EPSILON
        })
    }
}

/// Collider enum for storing different collision shape types
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Edge(EdgeShape),
    Chain(ChainShape),
    Polygon(PolygonShape),
}

impl Shape {
    /// Reject shapes the engine cannot register
    pub fn validate(&self) -> Result<(), PhysicsError> {
        match self {
            Shape::Edge(edge) => {
                if edge.length() <= EPSILON {
                    return Err(PhysicsError::DegenerateEdge);
                }
            }
            Shape::Chain(chain) => {
                let min = if chain.closed { 3 } else { 2 };
                if chain.vertices.len() < min {
                    return Err(PhysicsError::InvalidChain(format!(
                        "{} vertices, need at least {}",
                        chain.vertices.len(),
                        min
                    )));
                }
                if let Some(i) = (0..chain.edge_count())
                    .find(|&i| chain.edge(i).is_some_and(|e| e.length() <= EPSILON))
                {
                    return Err(PhysicsError::InvalidChain(format!("repeated vertex at {}", i)));
                }
            }
            Shape::Polygon(polygon) => {
                if polygon.vertices.len() < 3 {
                    return Err(PhysicsError::InvalidPolygon(format!(
                        "{} vertices",
                        polygon.vertices.len()
                    )));
                }
                if geometry::signed_area(&polygon.vertices) <= EPSILON {
                    return Err(PhysicsError::InvalidPolygon(
                        "zero area or clockwise winding".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Local-space vertices of the shape
    pub fn vertices(&self) -> Vec<Vec2> {
        match self {
            Shape::Edge(e) => vec![e.v1, e.v2],
            Shape::Chain(c) => c.vertices.clone(),
            Shape::Polygon(p) => p.vertices.clone(),
        }
    }

    /// World-space vertices under `xf`
    pub fn world_vertices(&self, xf: &Transform2D) -> Vec<Vec2> {
        self.vertices().into_iter().map(|v| xf.transform_point(v)).collect()
    }

    /// World-space bounding box under `xf`
    pub fn aabb(&self, xf: &Transform2D) -> Option<Aabb2> {
        Aabb2::from_points(self.world_vertices(xf))
    }

    /// Check if a world-space point is inside a solid shape
    ///
    /// Edges and chains have no interior and never contain a point.
    pub fn test_point(&self, xf: &Transform2D, point: Vec2) -> bool {
        match self {
            Shape::Polygon(p) => p.contains_local(xf.inverse_transform_point(point)),
            Shape::Edge(_) | Shape::Chain(_) => false,
        }
    }
}
