//! Scene construction utilities
//!
//! Loads the scene template and applies configuration overrides before building.

mod scene_builder;

pub use scene_builder::SceneBuilder;
