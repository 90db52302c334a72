//! Fault slip: kinematic, per-trigger displacement of one boundary body
//!
//! A trigger moves the designated body by a fixed step and holds its rotation
//! at zero. The body is repositioned directly rather than driven by forces,
//! and nothing bounds how far repeated triggers may carry it.

use fold_math::{Transform2D, Vec2};
use fold_physics::{BodyKey, PhysicsError, SimulationEngine};

/// Controller state; a trigger is consumed within a single call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaultState {
    #[default]
    Idle,
    Displacing,
}

/// A request to move `body` by `delta`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaultTrigger {
    pub body: BodyKey,
    pub delta: Vec2,
}

/// Maps one key to a fixed displacement of one body
#[derive(Clone, Debug)]
pub struct FaultController {
    body: BodyKey,
    key: char,
    step: Vec2,
    state: FaultState,
    applied: u32,
}

impl FaultController {
    /// Move `body` by `step` each time `key` is pressed
    pub fn new(body: BodyKey, key: char, step: Vec2) -> Self {
        Self {
            body,
            key,
            step,
            state: FaultState::Idle,
            applied: 0,
        }
    }

    /// The trigger for `key`, if it is the bound key
    pub fn trigger_for(&self, key: char) -> Option<FaultTrigger> {
        (key == self.key).then_some(FaultTrigger {
            body: self.body,
            delta: self.step,
        })
    }

    /// Apply one trigger and return the body's new transform
    pub fn apply<E: SimulationEngine>(&mut self, engine: &mut E, trigger: FaultTrigger) -> Result<Transform2D, PhysicsError> {
        let current = engine.body_transform(trigger.body).ok_or(PhysicsError::UnknownBody)?;

        self.state = FaultState::Displacing;
        let next = current.translated(trigger.delta);
        let result = engine.set_body_transform(trigger.body, next);
        self.state = FaultState::Idle;
        result?;

        self.applied += 1;
        log::debug!(
            "Fault slip #{}: block at ({:.4}, {:.4})",
            self.applied,
            next.position.x,
            next.position.y
        );
        Ok(next)
    }

    /// Apply the trigger bound to `key`; other keys are ignored
    ///
    /// Returns whether the key moved the body.
    pub fn handle_key<E: SimulationEngine>(&mut self, engine: &mut E, key: char) -> Result<bool, PhysicsError> {
        match self.trigger_for(key) {
            Some(trigger) => self.apply(engine, trigger).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn state(&self) -> FaultState {
        self.state
    }

    /// Key bound to the slip
    pub fn key(&self) -> char {
        self.key
    }

    /// Displacement per trigger
    pub fn step(&self) -> Vec2 {
        self.step
    }

    /// Body being displaced
    pub fn body(&self) -> BodyKey {
        self.body
    }

    /// Number of triggers applied so far
    pub fn applied(&self) -> u32 {
        self.applied
    }

    /// Total displacement requested so far
    pub fn offset(&self) -> Vec2 {
        self.step * self.applied as f32
    }
}
