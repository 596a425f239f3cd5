//! Session configuration, injected when a session is created.

use bevy_ecs::resource::Resource;
use figment::{providers::Env, Figment};
use glam::Vec2;
use serde::Deserialize;

use crate::constants::{self, hostile, progression, spawn};
use crate::error::ConfigError;

/// Everything a session needs to know about its surroundings before the first tick.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Arena width, in world units.
    pub arena_width: f32,
    /// Arena height, in world units.
    pub arena_height: f32,
    /// Seed for spawn placement and respawn intervals. A random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Zombies present when the session is created.
    pub initial_zombies: u32,
    /// Ticks per second used by the headless driver.
    pub tick_rate: f32,
    /// Ticks the headless driver runs before giving up.
    pub max_ticks: u64,
    /// Whether the headless driver sleeps between ticks.
    pub realtime: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            arena_width: constants::DEFAULT_ARENA_WIDTH,
            arena_height: constants::DEFAULT_ARENA_HEIGHT,
            seed: None,
            initial_zombies: spawn::INITIAL_ZOMBIES,
            tick_rate: constants::TICKS_PER_SECOND,
            max_ticks: 60 * 60 * 5,
            realtime: false,
        }
    }
}

impl SessionConfig {
    /// Loads the configuration from `HORDE_`-prefixed environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: SessionConfig = Figment::new().merge(Env::prefixed("HORDE_")).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Rejects configurations under which spawn placement could not terminate.
    ///
    /// For any player position, the corner of a spawn area farthest from the player is at least
    /// half the area's diagonal away, so a half-diagonal above the required distance guarantees
    /// that a valid spawn point exists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.arena_width, self.arena_height);
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::InvalidArena { width, height });
        }
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(ConfigError::InvalidTickRate(self.tick_rate));
        }
        if progression::SAFE_ZONE_SIZE >= width || progression::SAFE_ZONE_SIZE >= height {
            return Err(ConfigError::SafeZoneTooLarge {
                size: progression::SAFE_ZONE_SIZE,
            });
        }

        for (size, required) in [
            (hostile::ZOMBIE_SIZE, spawn::ZOMBIE_MIN_DISTANCE),
            (hostile::BOSS_SIZE, spawn::BOSS_MIN_DISTANCE),
        ] {
            let area = (self.arena_size() - Vec2::splat(size)).max(Vec2::ZERO);
            if area.length() / 2.0 <= required {
                return Err(ConfigError::UnsatisfiablePlacement { width, height, required });
            }
        }

        Ok(())
    }
}
