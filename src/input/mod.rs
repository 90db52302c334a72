//! Input handling module
//!
//! Maps frame key presses to driver actions; everything else goes to the scene.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
