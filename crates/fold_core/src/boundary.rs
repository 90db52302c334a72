//! Boundary bodies: anchors carrying a run of polyline segments
//!
//! One logical layer boundary can be split into two anchors at a sample
//! index so the halves move independently (the two sides of a fault).

use fold_math::Vec2;
use fold_physics::{BodyDef, BodyKey, Shape, SimulationEngine};
use serde::{Serialize, Deserialize};

use crate::curve::Polyline;
use crate::error::SceneError;

/// An inclusive range of polyline point indices
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointRange {
    pub start: usize,
    pub end: usize,
}

impl PointRange {
    /// Points `start..=end`
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Every point of `polyline`
    pub fn full(polyline: &Polyline) -> Self {
        Self::new(0, polyline.len() - 1)
    }

    /// Number of segments joining the points in this range
    pub fn segment_count(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check the range fits `polyline`
    pub fn validate(&self, polyline: &Polyline) -> Result<(), SceneError> {
        if self.start > self.end || self.end >= polyline.len() {
            return Err(SceneError::InvalidRange {
                start: self.start,
                end: self.end,
                len: polyline.len(),
            });
        }
        Ok(())
    }
}

/// How the split point is shared between the two halves of a fault
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitMode {
    /// Both halves include the split point; the curve is continuous at rest
    #[default]
    Shared,
    /// The right half starts one point later, leaving a visible gap
    Detached,
}

/// Partition `polyline` at point `index` into left and right ranges
///
/// The index must leave at least one segment on each side.
pub fn split_ranges(polyline: &Polyline, index: usize, mode: SplitMode) -> Result<(PointRange, PointRange), SceneError> {
    let last = polyline.len() - 1;
    let right_start = match mode {
        SplitMode::Shared => Some(index),
        SplitMode::Detached => index.checked_add(1),
    };
    match right_start {
        Some(start) if index > 0 && start < last => {
            Ok((PointRange::new(0, index), PointRange::new(start, last)))
        }
        _ => Err(SceneError::SplitOutOfRange {
            index,
            len: polyline.len(),
        }),
    }
}

/// A static anchor owning one segment fixture per consecutive point pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryBody {
    key: BodyKey,
    range: PointRange,
    segment_count: usize,
}

impl BoundaryBody {
    /// Create the anchor for `range` of `polyline`
    ///
    /// The range is checked before anything is registered with the engine.
    /// Segments are attached in world coordinates to an anchor at the origin.
    pub fn build<E: SimulationEngine>(
        engine: &mut E,
        polyline: &Polyline,
        range: PointRange,
        friction: f32,
    ) -> Result<Self, SceneError> {
        range.validate(polyline)?;

        let key = engine.create_body(BodyDef::new());
        let mut segment_count = 0;
        for edge in polyline.segments_between(range.start, range.end) {
            engine.create_fixture(key, Shape::Edge(edge), friction)?;
            segment_count += 1;
        }

        log::debug!(
            "Boundary body over points {}..={}: {} segments",
            range.start,
            range.end,
            segment_count
        );
        Ok(Self {
            key,
            range,
            segment_count,
        })
    }

    /// Engine handle, retained for later repositioning
    pub fn key(&self) -> BodyKey {
        self.key
    }

    /// Points covered by this body
    pub fn range(&self) -> PointRange {
        self.range
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Current position of the anchor
    pub fn position<E: SimulationEngine>(&self, engine: &E) -> Option<Vec2> {
        engine.body_transform(self.key).map(|xf| xf.position)
    }
}
