//! Scene templates
//!
//! A template holds everything needed to build the scene: gravity, the
//! container, the source box and particle settings, and the tabulated fault
//! curve. Templates load from and save to RON files.

use std::fs;
use std::path::Path;

use fold_math::Vec2;
use fold_physics::ParticleFlags;
use serde::{Serialize, Deserialize};

use crate::boundary::{split_ranges, PointRange, SplitMode};
use crate::container::ContainerLayout;
use crate::curve::{CurveSamples, Polyline};
use crate::emission::{Emission, SourceRegion};
use crate::error::SceneError;

/// Which half of the split curve the fault trigger moves
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovingBlock {
    Left,
    #[default]
    Right,
}

/// The fault curve and how it slips
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaultLayout {
    /// Tabulated layer boundary
    pub curve: CurveSamples,
    /// Point index the curve is split at
    pub split_index: usize,
    #[serde(default)]
    pub split_mode: SplitMode,
    /// Friction of every curve segment
    pub friction: f32,
    /// Displacement per trigger
    pub step: Vec2,
    /// Key that triggers a slip
    pub trigger_key: char,
    #[serde(default)]
    pub moving_block: MovingBlock,
}

impl Default for FaultLayout {
    fn default() -> Self {
        Self {
            curve: CurveSamples::new(
                vec![
                    -2.0, -1.75, -1.5, -1.25, -1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5,
                    1.75, 2.0,
                ],
                vec![
                    0.95, 1.02, 1.12, 1.24, 1.33, 1.36, 1.31, 1.2, 1.08, 0.97, 0.9, 0.88, 0.92, 1.0, 1.09, 1.15,
                    1.18,
                ],
            ),
            split_index: 8,
            split_mode: SplitMode::Shared,
            friction: 0.1,
            step: Vec2::new(0.001, 0.013),
            trigger_key: 'f',
            moving_block: MovingBlock::Right,
        }
    }
}

/// Serializable description of a folded geology scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneTemplate {
    /// Scene name (for display/debugging)
    pub name: String,
    pub gravity: Vec2,
    pub container: ContainerLayout,
    pub source: SourceRegion,
    pub particle_radius: f32,
    pub particle_flags: ParticleFlags,
    pub fault: FaultLayout,
}

/// A template whose data has been checked and resolved
#[derive(Clone, Debug)]
pub(crate) struct ResolvedLayout {
    pub polyline: Polyline,
    pub left: PointRange,
    pub right: PointRange,
}

impl Default for SceneTemplate {
    fn default() -> Self {
        Self {
            name: "Folded Geology".to_string(),
            gravity: Vec2::new(0.0, 10.0),
            container: ContainerLayout::default(),
            source: SourceRegion::default(),
            particle_radius: 0.025,
            particle_flags: ParticleFlags::TENSILE | ParticleFlags::VISCOUS,
            fault: FaultLayout::default(),
        }
    }
}

impl SceneTemplate {
    /// Load a template from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Parse a template from RON text
    pub fn from_ron_str(contents: &str) -> Result<Self, SceneError> {
        Ok(ron::from_str(contents)?)
    }

    /// Save the template to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    /// Render the template as pretty RON
    pub fn to_ron_string(&self) -> Result<String, SceneError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Emission settings for the sediment layer
    pub fn emission(&self) -> Emission {
        Emission::new(self.particle_flags, self.source, self.particle_radius)
    }

    /// Check every precondition without touching an engine
    pub fn validate(&self) -> Result<(), SceneError> {
        self.resolve().map(|_| ())
    }

    /// Validate and resolve the curve into the two block ranges
    pub(crate) fn resolve(&self) -> Result<ResolvedLayout, SceneError> {
        let polyline = self.fault.curve.to_polyline()?;
        let (left, right) = split_ranges(&polyline, self.fault.split_index, self.fault.split_mode)?;

        self.container.validate()?;
        self.emission().validate()?;
        let source = self.source.corners();
        let outside = source
            .iter()
            .copied()
            .find(|&corner| !self.container.contains(corner))
            .or_else(|| self.container.intrusion(&source));
        if let Some(point) = outside {
            return Err(SceneError::SourceOutsideContainer {
                x: point.x,
                y: point.y,
            });
        }
        if !(self.fault.friction.is_finite() && self.fault.friction >= 0.0) {
            return Err(SceneError::InvalidFriction(self.fault.friction));
        }
        if !self.fault.step.is_finite() {
            return Err(SceneError::InvalidStep {
                x: self.fault.step.x,
                y: self.fault.step.y,
            });
        }

        Ok(ResolvedLayout { polyline, left, right })
    }
}
