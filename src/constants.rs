//! This module contains all the constants used in the simulation.

/// Nominal ticks per second. Tick-denominated constants assume this rate.
pub const TICKS_PER_SECOND: f32 = 60.0;

/// Default arena dimensions, in world units.
pub const DEFAULT_ARENA_WIDTH: f32 = 1280.0;
pub const DEFAULT_ARENA_HEIGHT: f32 = 720.0;

pub mod player {
    /// Side length of the player's bounding box.
    pub const SIZE: f32 = 30.0;
    pub const MAX_HEALTH: f32 = 100.0;
    pub const STARTING_STAMINA: f32 = 100.0;
    pub const NORMAL_SPEED: f32 = 3.0;
    pub const RUN_SPEED: f32 = 10.0;
    /// Stamina lost per tick while running.
    pub const STAMINA_DRAIN: f32 = 1.0;
    /// Stamina regained per tick while not running.
    pub const STAMINA_REGEN: f32 = 0.5;
}

pub mod weapon {
    /// Reach of the fists, measured between top-left corners.
    pub const MELEE_RANGE: f32 = 60.0;
    pub const MELEE_DAMAGE: f32 = 20.0;
    pub const FISTS_COOLDOWN: u32 = 20;
    /// Ticks the player flashes after a melee swing.
    pub const MELEE_FLASH: u32 = 5;
    /// Ticks the player flashes after switching weapons.
    pub const SWITCH_FLASH: u32 = 10;

    pub const GUN_COOLDOWN: u32 = 10;
    pub const GUN_SPEED: f32 = 6.0;
    pub const GUN_DAMAGE: f32 = 10.0;

    pub const SHOTGUN_COOLDOWN: u32 = 30;
    pub const SHOTGUN_SPEED: f32 = 6.0;
    /// Angular offsets of the shotgun pellets, in radians.
    pub const SHOTGUN_SPREAD: [f32; 5] = [-0.2, -0.1, 0.0, 0.1, 0.2];

    pub const SNIPER_COOLDOWN: u32 = 50;
    pub const SNIPER_SPEED: f32 = 10.0;
    pub const SNIPER_DAMAGE: f32 = 100.0;

    /// Damage of a bullet that does not carry its own.
    pub const DEFAULT_BULLET_DAMAGE: f32 = 10.0;
}

pub mod hostile {
    pub const ZOMBIE_SIZE: f32 = 40.0;
    pub const ZOMBIE_HEALTH: f32 = 50.0;
    pub const ZOMBIE_SPEED: f32 = 1.2;
    /// Contact damage per tick of overlap.
    pub const ZOMBIE_CONTACT_DAMAGE: f32 = 0.3;
    /// Zombies closer than this become aggressive.
    pub const AGGRO_RADIUS: f32 = 300.0;
    /// Zombies farther than this lose interest.
    pub const IDLE_RADIUS: f32 = 500.0;

    pub const BOSS_SIZE: f32 = 80.0;
    pub const BOSS_HEALTH: f32 = 500.0;
    pub const BOSS_SPEED: f32 = 0.8;
    pub const BOSS_CONTACT_DAMAGE: f32 = 1.0;
}

pub mod spawn {
    /// Minimum distance between the player and a freshly spawned zombie.
    pub const ZOMBIE_MIN_DISTANCE: f32 = 300.0;
    /// Minimum distance between the player and a freshly spawned boss.
    pub const BOSS_MIN_DISTANCE: f32 = 500.0;
    /// Range of the randomized zombie respawn interval, in ticks.
    pub const ZOMBIE_INTERVAL_MIN: f32 = 200.0;
    pub const ZOMBIE_INTERVAL_MAX: f32 = 500.0;
    /// The respawn interval never drops below this many ticks.
    pub const ZOMBIE_INTERVAL_FLOOR: f32 = 50.0;
    /// Ticks between tick-driven boss spawn requests.
    pub const BOSS_TICK_INTERVAL: u32 = 1500;
    pub const INITIAL_ZOMBIES: u32 = 2;
    pub const HEALTH_PACK_SIZE: f32 = 20.0;
    /// Ticks a health pack stays on the ground.
    pub const HEALTH_PACK_LIFETIME: u32 = 600;
    pub const HEALTH_PACK_HEAL: f32 = 30.0;
    /// Upper bound on rejection-sampling attempts for one placement.
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 256;
}

pub mod progression {
    pub const EXPERIENCE_PER_LEVEL: u32 = 100;
    pub const ZOMBIE_EXPERIENCE: u32 = 20;
    pub const LEVEL_UP_HEAL: f32 = 20.0;
    pub const LEVEL_UP_STAMINA: f32 = 10.0;
    /// Level at which the safe zone starts being enforced.
    pub const SAFE_ZONE_LEVEL: u32 = 1;
    pub const SAFE_ZONE_SIZE: f32 = 200.0;

    pub const ZOMBIE_SCORE: u32 = 10;
    pub const BOSS_SCORE: u32 = 100;
}

pub mod timers {
    /// Seconds between difficulty escalations.
    pub const DIFFICULTY_PERIOD: f32 = 30.0;
    /// Seconds between health pack spawns.
    pub const HEALTH_PACK_PERIOD: f32 = 20.0;
    /// Seconds between wall-clock boss spawn requests.
    pub const BOSS_PERIOD: f32 = 60.0;

    /// Speed added to every live zombie per escalation.
    pub const ZOMBIE_SPEED_STEP: f32 = 0.1;
    /// Ticks removed from the zombie respawn interval per escalation.
    pub const RESPAWN_INTERVAL_STEP: f32 = 10.0;
}
