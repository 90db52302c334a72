//! Key mapping from characters to driver actions
//!
//! Driver keys (pause, single step, restart, quit) are handled here.
//! Any other character, the fault key included, is passed to the scene.

use crate::config::InputConfig;

/// Actions handled by the driver rather than the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Toggle the paused state
    TogglePause,
    /// Advance one step while paused
    SingleStep,
    /// Rebuild the scene from its template
    Restart,
    /// Stop reading input
    Quit,
}

/// Maps key presses to driver actions
///
/// The scene's own trigger key always wins, so a binding that collides with
/// it is shadowed instead of silently eating fault slips.
#[derive(Debug, Clone)]
pub struct InputMapper {
    pause: char,
    single_step: char,
    restart: char,
    quit: char,
    scene_key: char,
}

impl InputMapper {
    pub fn new(config: &InputConfig, scene_key: char) -> Self {
        let mapper = Self {
            pause: config.pause_key,
            single_step: config.single_step_key,
            restart: config.restart_key,
            quit: config.quit_key,
            scene_key,
        };
        for (name, key) in mapper.bindings() {
            if key == scene_key {
                log::warn!("{} key '{}' is the fault key and will be ignored", name, key);
            }
        }
        mapper
    }

    fn bindings(&self) -> [(&'static str, char); 4] {
        [
            ("Pause", self.pause),
            ("Single step", self.single_step),
            ("Restart", self.restart),
            ("Quit", self.quit),
        ]
    }

    /// Map a key press to an action
    ///
    /// Returns `None` for keys the scene should receive.
    pub fn map_key(&self, key: char) -> Option<InputAction> {
        if key == self.scene_key {
            return None;
        }

        match key {
            k if k == self.pause => Some(InputAction::TogglePause),
            k if k == self.single_step => Some(InputAction::SingleStep),
            k if k == self.restart => Some(InputAction::Restart),
            k if k == self.quit => Some(InputAction::Quit),
            _ => None,
        }
    }

    pub fn scene_key(&self) -> char {
        self.scene_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> InputMapper {
        InputMapper::new(&InputConfig::default(), 'f')
    }

    #[test]
    fn test_driver_keys() {
        let mapper = mapper();
        assert_eq!(mapper.map_key('p'), Some(InputAction::TogglePause));
        assert_eq!(mapper.map_key('o'), Some(InputAction::SingleStep));
        assert_eq!(mapper.map_key('r'), Some(InputAction::Restart));
        assert_eq!(mapper.map_key('q'), Some(InputAction::Quit));
    }

    #[test]
    fn test_scene_keys_not_mapped() {
        let mapper = mapper();
        for key in ['f', 'a', 'z', ' ', '7'] {
            assert_eq!(mapper.map_key(key), None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_fault_key_shadows_driver_binding() {
        let config = InputConfig {
            pause_key: 'f',
            ..InputConfig::default()
        };
        let mapper = InputMapper::new(&config, 'f');
        assert_eq!(mapper.map_key('f'), None);
        assert_eq!(mapper.scene_key(), 'f');
    }
}
