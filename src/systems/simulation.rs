//! Scene simulation system
//!
//! Runs one frame of the scene:
//! - Forward this frame's key presses to the scene
//! - Step the engine by `1 / hz` unless paused
//! - Collect the overlay text

use fold_core::{FoldedGeology, SceneError, SimulationEngine};

use crate::config::PhysicsConfig;

/// Per-frame stepping settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Steps per second; 0 or less never steps
    pub hz: f32,
    pub paused: bool,
    /// Step once even though paused; cleared after use
    pub single_step: bool,
}

impl Settings {
    pub fn new(hz: f32) -> Self {
        Self {
            hz,
            paused: false,
            single_step: false,
        }
    }

    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self::new(config.hz)
    }

    /// Timestep for this frame, consuming a pending single step
    fn take_time_step(&mut self) -> f32 {
        let dt = if self.hz > 0.0 { 1.0 / self.hz } else { 0.0 };
        if !self.paused {
            return dt;
        }
        if self.single_step {
            self.single_step = false;
            dt
        } else {
            0.0
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(60.0)
    }
}

/// Result of a simulation update
#[derive(Debug, Clone, Default)]
pub struct SimulationResult {
    /// Whether the engine advanced this frame
    pub stepped: bool,
    /// Timestep used, 0 when not stepped
    pub dt: f32,
    /// Fault slips applied this frame
    pub slips: u32,
    /// Debug overlay text
    pub overlay: Vec<String>,
}

/// Drives the scene one frame at a time
///
/// Keys pressed during a frame are queued with [`press`](Self::press) and
/// applied in order before the step.
#[derive(Debug, Default)]
pub struct SimulationSystem {
    pending: Vec<char>,
    frames: u64,
    show_overlay: bool,
}

impl SimulationSystem {
    pub fn new(show_overlay: bool) -> Self {
        Self {
            pending: Vec::new(),
            frames: 0,
            show_overlay,
        }
    }

    /// Queue a key press for the next update
    pub fn press(&mut self, key: char) {
        self.pending.push(key);
    }

    /// Number of completed updates
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one simulation frame
    ///
    /// Pending keys are consumed even when one of them fails.
    pub fn update<E: SimulationEngine>(
        &mut self,
        scene: &mut FoldedGeology<E>,
        settings: &mut Settings,
    ) -> Result<SimulationResult, SceneError> {
        let mut slips = 0;
        for key in std::mem::take(&mut self.pending) {
            if scene.keyboard(key)? {
                slips += 1;
            }
        }

        let dt = settings.take_time_step();
        let stepped = dt > 0.0;
        if stepped {
            scene.step(dt);
        }
        self.frames += 1;

        let mut overlay = Vec::new();
        if settings.paused {
            overlay.push("****PAUSED****".to_string());
        }
        overlay.extend(scene.overlay_lines());
        for line in &overlay {
            if self.show_overlay {
                log::info!("{}", line);
            } else {
                log::debug!("{}", line);
            }
        }

        Ok(SimulationResult {
            stepped,
            dt,
            slips,
            overlay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fold_math::Vec2;

    fn right_position(scene: &FoldedGeology) -> Vec2 {
        scene
            .engine()
            .get_body(scene.right_block().key())
            .unwrap()
            .position()
    }

    #[test]
    fn test_steps_at_configured_rate() {
        let mut scene = FoldedGeology::new().unwrap();
        let mut system = SimulationSystem::default();
        let mut settings = Settings::new(30.0);

        let result = system.update(&mut scene, &mut settings).unwrap();
        assert!(result.stepped);
        assert_relative_eq!(result.dt, 1.0 / 30.0);
        assert_eq!(scene.engine().step_count(), 1);
        assert_eq!(system.frames(), 1);
    }

    #[test]
    fn test_paused_does_not_step() {
        let mut scene = FoldedGeology::new().unwrap();
        let mut system = SimulationSystem::default();
        let mut settings = Settings {
            paused: true,
            ..Settings::default()
        };

        let result = system.update(&mut scene, &mut settings).unwrap();
        assert!(!result.stepped);
        assert_eq!(result.overlay[0], "****PAUSED****");
        assert_eq!(scene.engine().step_count(), 0);
    }

    #[test]
    fn test_single_step_while_paused() {
        let mut scene = FoldedGeology::new().unwrap();
        let mut system = SimulationSystem::default();
        let mut settings = Settings {
            paused: true,
            single_step: true,
            ..Settings::default()
        };

        assert!(system.update(&mut scene, &mut settings).unwrap().stepped);
        assert!(!settings.single_step);
        assert!(!system.update(&mut scene, &mut settings).unwrap().stepped);
        assert_eq!(scene.engine().step_count(), 1);
    }

    #[test]
    fn test_zero_hz_never_steps() {
        let mut scene = FoldedGeology::new().unwrap();
        let mut system = SimulationSystem::default();
        let mut settings = Settings::new(0.0);

        let result = system.update(&mut scene, &mut settings).unwrap();
        assert!(!result.stepped);
        assert_eq!(result.dt, 0.0);
    }

    #[test]
    fn test_keys_apply_before_step() {
        let mut scene = FoldedGeology::new().unwrap();
        let mut system = SimulationSystem::default();
        let mut settings = Settings::default();

        system.press('f');
        system.press('x');
        system.press('f');
        let result = system.update(&mut scene, &mut settings).unwrap();

        assert_eq!(result.slips, 2);
        assert_relative_eq!(right_position(&scene).y, 0.026, epsilon = 1e-6);
        assert!(result.overlay.iter().any(|line| line.contains("Fault slips: 2")));

        // Queue is drained
        let result = system.update(&mut scene, &mut settings).unwrap();
        assert_eq!(result.slips, 0);
    }

    #[test]
    fn test_keys_apply_while_paused() {
        let mut scene = FoldedGeology::new().unwrap();
        let mut system = SimulationSystem::default();
        let mut settings = Settings {
            paused: true,
            ..Settings::default()
        };

        system.press('f');
        let result = system.update(&mut scene, &mut settings).unwrap();
        assert_eq!(result.slips, 1);
        assert!(!result.stepped);
        assert_relative_eq!(right_position(&scene).x, 0.001, epsilon = 1e-6);
    }
}
