//! Obstacle spawn cadence
//!
//! Obstacles appear on average every `spawn_interval` seconds. Each gap is
//! the mean scaled by a seeded jitter factor in `[1 - jitter, 1 + jitter]`.

use serde::{Deserialize, Serialize};

use super::state::RngState;
use crate::difficulty::DifficultyTier;

/// One obstacle for the physics/rendering layer to create
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpawn {
    pub id: u32,
    /// Horizontal start position in `0..=play_field_width`
    pub x: f32,
    /// Seconds to fall through the play field
    pub fall_duration: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSpawner {
    pub spawn_interval: f32,
    pub obstacle_speed: f32,
    pub jitter: f32,
    /// Seconds until the next spawn
    pub until_next: f32,
    /// Obstacles spawned this run
    pub spawned: u32,
}

impl ObstacleSpawner {
    pub fn new(tier: &DifficultyTier, jitter: f32) -> Self {
        Self {
            spawn_interval: tier.spawn_interval,
            obstacle_speed: tier.obstacle_speed,
            jitter,
            until_next: tier.spawn_interval,
            spawned: 0,
        }
    }

    /// Longest gap the current cadence can produce
    pub fn max_gap(&self) -> f32 {
        self.spawn_interval * (1.0 + self.jitter)
    }

    /// Switch to a new tier's cadence; a pending spawn is pulled in if it
    /// was scheduled under the slower cadence
    pub fn retune(&mut self, tier: &DifficultyTier) {
        self.spawn_interval = tier.spawn_interval;
        self.obstacle_speed = tier.obstacle_speed;
        self.until_next = self.until_next.min(self.max_gap());
    }

    fn next_gap(&self, rng: &mut RngState) -> f32 {
        let factor = 1.0 - self.jitter + 2.0 * self.jitter * rng.next_unit();
        self.spawn_interval * factor
    }

    /// Advance by `dt` seconds, returning the obstacles due in that window
    pub fn advance(&mut self, dt: f32, rng: &mut RngState, width: f32) -> Vec<ObstacleSpawn> {
        let mut spawns = Vec::new();
        self.until_next -= dt;
        while self.until_next <= 0.0 {
            self.spawned += 1;
            let spawn = ObstacleSpawn {
                id: self.spawned,
                x: rng.next_unit() * width,
                fall_duration: self.obstacle_speed,
            };
            log::debug!("Spawn obstacle {} at x={:.1}", spawn.id, spawn.x);
            spawns.push(spawn);
            self.until_next += self.next_gap(rng);
        }
        spawns
    }
}
