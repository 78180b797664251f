//! Headless fixed-timestep simulation driven by `pixel_ecs`.

use std::error::Error;

use pixel_rs::config::{Config, ENGINE_NAME, ENGINE_VERSION};
use pixel_rs::{logger, Game};

const APP_NAME: &str = "pixel";
const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "binary must be compiled by Cargo");

fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let version: semver::Version = APP_VERSION_STR.parse()?;
    let config = Config::new(APP_NAME.to_string(), version);

    let _handle = logger::init(&config)?;
    log::info!("logger initialized successfully");
    log::info!(
        "{} {} powered by {} {}",
        config.name(),
        config.version(),
        ENGINE_NAME,
        *ENGINE_VERSION,
    );

    let mut game = Game::new(config);
    game.setup();
    game.run()?;

    log::info!("closing this application after {} ticks", game.ticks());
    Ok(())
}
