//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the simulation logic: components, resources, and the systems
//! that advance them one tick at a time.

pub mod collision;
pub mod combat;
pub mod common;
pub mod hostile;
pub mod input;
pub mod item;
pub mod lifetime;
pub mod player;
pub mod profiling;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod timers;

pub use self::collision::*;
pub use self::combat::*;
pub use self::common::bundles::*;
pub use self::common::components::*;
pub use self::hostile::*;
pub use self::input::*;
pub use self::item::*;
pub use self::lifetime::*;
pub use self::player::*;
pub use self::profiling::*;
pub use self::progression::*;
pub use self::spawn::*;
pub use self::state::*;
pub use self::timers::*;
