//! Core of the folded geology scene
//!
//! This crate turns tabulated layer data into fault blocks and seeds the
//! sediment they deform:
//!
//! - [`Polyline`] - Sampled curve built from tabulated x/y data
//! - [`BoundaryBody`] - Anchor owning a contiguous run of polyline segments
//! - [`ContainerLayout`] - Closed container loop plus gate, throat and floor edges
//! - [`Emission`] - One-shot particle group creation with optional coloring
//! - [`FaultController`] - Kinematic, per-trigger fault slip
//! - [`SceneTemplate`] - Serializable description of the whole scene
//! - [`FoldedGeology`] - The assembled scene

mod boundary;
mod container;
mod curve;
mod emission;
mod error;
mod fault;
mod scene;
mod template;

pub use boundary::{split_ranges, BoundaryBody, PointRange, SplitMode};
pub use container::{ContainerHandles, ContainerLayout, EdgeSpec};
pub use curve::{CurveSamples, Polyline};
pub use emission::{color_particle_group, Emission, SourceRegion, PARTICLE_PALETTE};
pub use error::{CurveError, SceneError};
pub use fault::{FaultController, FaultState, FaultTrigger};
pub use scene::FoldedGeology;
pub use template::{FaultLayout, MovingBlock, SceneTemplate};

// Re-export the types callers need to drive a scene
pub use fold_math::{Transform2D, Vec2};
pub use fold_physics::{BodyKey, ParticleColor, ParticleFlags, PhysicsWorld, SimulationEngine};
