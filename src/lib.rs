//! Folded geology application
//!
//! Configuration, key mapping and the frame driver around the `fold_core` scene.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
