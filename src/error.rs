//! Centralized error types for the simulation.
//!
//! Gameplay never fails at runtime; every out-of-range value is clamped and every
//! impossible command is a no-op. The only errors are configuration problems,
//! which surface when a session is created.

/// Main error type for the simulation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating a [`SessionConfig`](crate::config::SessionConfig).
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Arena must have positive dimensions, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("Arena {width}x{height} is too small to place a spawn {required} units from the player")]
    UnsatisfiablePlacement { width: f32, height: f32, required: f32 },

    #[error("Safe zone of size {size} does not fit inside the arena")]
    SafeZoneTooLarge { size: f32 },

    #[error("Tick rate must be positive, got {0}")]
    InvalidTickRate(f32),

    #[error("Failed to load configuration: {0}")]
    Load(String),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Load(error.to_string())
    }
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
