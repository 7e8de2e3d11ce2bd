//! Run loop module
//!
//! Ties the live score to the difficulty curve and the high score board.
//! Like the rest of the core it must stay deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - No rendering, physics or platform dependencies (collisions arrive as input)

pub mod spawner;
pub mod state;
pub mod tick;

pub use spawner::{ObstacleSpawn, ObstacleSpawner};
pub use state::{GameEvent, GamePhase, GameState, RngState, RunSummary};
pub use tick::{TickInput, tick};
