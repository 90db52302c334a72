//! 2D Mathematics Library
//!
//! This crate provides the small amount of planar math the folded geology
//! scene needs.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components
//! - [`Transform2D`] - Position and rotation angle of a rigid anchor
//!
//! ## Predicates
//!
//! - [`geometry`] - Segment intersection, polygon area and point containment

mod vec2;
mod transform;
pub mod geometry;

pub use vec2::Vec2;
pub use transform::Transform2D;
