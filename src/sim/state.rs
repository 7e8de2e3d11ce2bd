//! Game state and core run-loop types
//!
//! All state needed to replay a run deterministically lives here.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner::{ObstacleSpawn, ObstacleSpawner};
use crate::difficulty::{self, DifficultyTier};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player dodging, score timer running
    Playing,
    /// Player was hit; waiting for restart
    GameOver,
}

/// Result of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    /// Score made it onto the high score board
    pub new_high_score: bool,
    /// Best score on the board after recording this run
    pub best: u64,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SpawnObstacle(ObstacleSpawn),
    LevelUp { level: u32, tier: DifficultyTier },
    GameOver(RunSummary),
    Restarted,
}

/// RNG state wrapper for serialization
///
/// The generator is rebuilt from `seed` and advanced by `stream` draws, so a
/// saved state resumes the exact same sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        rng.advance(self.stream);
        rng
    }

    /// Next value in `[0, 1)`
    pub fn next_unit(&mut self) -> f32 {
        let value = self.to_rng().random::<f32>();
        self.stream += 1;
        value
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Score
    pub score: u64,
    /// Fractional points not yet added to `score`
    pub score_carry: f32,
    /// Seconds since the last score tick
    pub score_timer: f32,
    /// Tier derived from the current score
    pub tier: DifficultyTier,
    /// Ticks processed while playing
    pub time_ticks: u64,
    /// Player position across the play field
    pub player_x: f32,
    pub spawner: ObstacleSpawner,
    /// Runs started since the state was created
    pub runs_played: u32,
    /// Summary of the most recent finished run
    pub last_run: Option<RunSummary>,
    /// Pending notifications (not persisted)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New run; out-of-range settings are replaced with defaults
    pub fn new(seed: u64, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let tier = difficulty::starting_tier();
        Self {
            seed,
            rng_state: RngState::new(seed),
            player_x: settings.play_field_width / 2.0,
            spawner: ObstacleSpawner::new(&tier, settings.spawn_jitter),
            settings,
            phase: GamePhase::Playing,
            score: 0,
            score_carry: 0.0,
            score_timer: 0.0,
            tier,
            time_ticks: 0,
            runs_played: 1,
            last_run: None,
            events: Vec::new(),
        }
    }

    /// Start a new run. The RNG keeps advancing so each run differs.
    pub fn restart(&mut self) {
        let tier = difficulty::starting_tier();
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.score_carry = 0.0;
        self.score_timer = 0.0;
        self.tier = tier;
        self.time_ticks = 0;
        self.player_x = self.settings.play_field_width / 2.0;
        self.spawner = ObstacleSpawner::new(&tier, self.settings.spawn_jitter);
        self.runs_played += 1;
        self.events.push(GameEvent::Restarted);
        log::info!("Run {} started", self.runs_played);
    }

    pub fn level(&self) -> u32 {
        self.tier.level
    }

    /// Hand pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add one score tick worth of points and retune on level change
    pub fn award_points(&mut self) {
        let gained = self.settings.base_points_per_tick as f32 * self.tier.score_multiplier + self.score_carry;
        let whole = gained.floor();
        self.score_carry = gained - whole;
        self.score += whole as u64;
        self.sync_level();
    }

    /// Re-derive the tier if the score crossed a level threshold
    pub fn sync_level(&mut self) {
        if difficulty::level_of(self.score) == self.tier.level {
            return;
        }
        let tier = difficulty::evaluate(self.score);
        self.tier = tier;
        self.spawner.retune(&tier);
        log::info!(
            "Level {} at score {}: spawn every {}s, fall {}s",
            tier.level,
            self.score,
            tier.spawn_interval,
            tier.obstacle_speed
        );
        self.events.push(GameEvent::LevelUp { level: tier.level, tier });
    }
}
