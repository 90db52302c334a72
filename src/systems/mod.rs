//! Application systems
//!
//! The per-frame driver that turns key presses and a fixed timestep into scene updates.

mod simulation;

pub use simulation::{Settings, SimulationResult, SimulationSystem};
