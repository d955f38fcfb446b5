//! Simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Randomness only through the state's seeded RNG
//! - Time only through the `dt` handed to `tick`
//! - No rendering or storage dependencies

pub mod abilities;
pub mod collision;
pub mod elite;
pub mod enemy;
pub mod entities;
pub mod geometry;
pub mod menu;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use abilities::{Abilities, PowerUpKind, ShotSpec};
pub use elite::{CyclePhase, EliteActions, EliteCycle};
pub use enemy::{Enemy, EnemyContext, EnemyKind, Movement};
pub use entities::{Bullet, EnemyBullet, Explosion, Player, PowerUp, Star};
pub use geometry::{Rect, aabb};
pub use menu::{CONFIRM_MENU, INTRO_MENU, MenuCursor, MenuLayout, PAUSE_MENU};
pub use state::{Alert, DebugState, GameEvent, GameState, Mode, ScreenShake};
pub use tick::{FrameInput, set_kills, tick};
