//! Configuration utilities for the simulation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use semver::Version;

pub const ENGINE_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");

const ENGINE_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");
lazy_static::lazy_static! {
    pub static ref ENGINE_VERSION: Version = ENGINE_VERSION_STR.parse().unwrap();
}

/// This struct represents general configuration of the simulation.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    version: Version,
    fps: u32,
    ticks: u64,
    log_dir: PathBuf,
    log_level: LevelFilter,
}

impl Config {
    /// Creates new configuration with given name and version.
    /// Other settings are taken from [`Config::default`].
    pub fn new(name: String, version: Version) -> Self {
        Self {
            name,
            version,
            ..Self::default()
        }
    }

    /// Sets count of simulation updates per second.
    ///
    /// # Panics
    ///
    /// Panics if `fps` is zero.
    ///
    pub fn with_fps(mut self, fps: u32) -> Self {
        assert_ne!(fps, 0, "simulation must update at least once per second");
        self.fps = fps;
        self
    }

    /// Sets count of simulation updates to run before exit.
    pub fn with_ticks(mut self, ticks: u64) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    /// Name of your simulation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of your simulation.
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Fixed duration of one simulation update.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// Directory where log files are written.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

impl Default for Config {
    fn default() -> Self {
        let log_level = if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        Self {
            name: "pixel".to_string(),
            version: Version::new(0, 0, 0),
            fps: 60,
            ticks: 120,
            log_dir: PathBuf::from("logs"),
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("demo".to_string(), Version::new(1, 2, 3));
        assert_eq!(config.name(), "demo");
        assert_eq!(config.version(), &Version::new(1, 2, 3));
        assert_eq!(config.fps(), 60);
        assert_eq!(config.ticks(), 120);
        assert_eq!(config.log_dir(), Path::new("logs"));
    }

    #[test]
    fn test_frame_duration() {
        let config = Config::default().with_fps(50).with_ticks(5);
        assert_eq!(config.frame_duration(), Duration::from_millis(20));
        assert_eq!(config.ticks(), 5);
    }

    #[test]
    #[should_panic]
    fn test_zero_fps() {
        let _config = Config::default().with_fps(0);
    }

    #[test]
    fn test_engine_version() {
        assert_eq!(ENGINE_VERSION.to_string(), ENGINE_VERSION_STR);
        assert_eq!(ENGINE_NAME, "pixel_rs");
    }
}
