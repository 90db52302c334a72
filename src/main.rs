//! Headless folded geology driver
//!
//! Reads stdin one line per frame. Each character on a line is a key pressed
//! during that frame; an empty line just steps.

use std::io::BufRead;

use env_logger::Env;
use folded_geology::config::AppConfig;
use folded_geology::input::{InputAction, InputMapper};
use folded_geology::scene::SceneBuilder;
use folded_geology::systems::{Settings, SimulationSystem};
use fold_core::SceneError;

fn run(config: &AppConfig) -> Result<(), SceneError> {
    let builder = SceneBuilder::from_config(config)?;
    let mut scene = builder.build()?;
    let mapper = InputMapper::new(&config.input, scene.fault().key());
    let mut settings = Settings::from_config(&config.physics);
    let mut system = SimulationSystem::new(config.debug.show_overlay);

    log::info!("Press '{}' to slip the fault, '{}' to quit", mapper.scene_key(), config.input.quit_key);

    let stdin = std::io::stdin();
    'frames: for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };

        for key in line.chars() {
            match mapper.map_key(key) {
                Some(InputAction::TogglePause) => {
                    settings.paused = !settings.paused;
                    log::info!("{}", if settings.paused { "Paused" } else { "Resumed" });
                }
                Some(InputAction::SingleStep) => {
                    settings.paused = true;
                    settings.single_step = true;
                }
                Some(InputAction::Restart) => {
                    scene = builder.build()?;
                    log::info!("Restarted '{}'", scene.name());
                }
                Some(InputAction::Quit) => break 'frames,
                None => system.press(key),
            }
        }

        system.update(&mut scene, &mut settings)?;
    }

    let offset = scene.fault().offset();
    log::info!(
        "Finished after {} frames: {} fault slips, offset ({:.3}, {:.3}), {} particles",
        system.frames(),
        scene.fault().applied(),
        offset.x,
        offset.y,
        scene.particle_count()
    );
    Ok(())
}

fn main() {
    let loaded = AppConfig::load();
    let log_level = match &loaded {
        Ok(config) => config.debug.log_level.clone(),
        Err(_) => AppConfig::default().debug.log_level,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("{}; using defaults", e);
        AppConfig::default()
    });

    log::info!("Starting Folded Geology");
    if let Err(e) = run(&config) {
        log::error!("{}", e);
        eprintln!("folded_geology: {}", e);
        std::process::exit(1);
    }
}
