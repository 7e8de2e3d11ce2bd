//! Run loop tick
//!
//! Advances the score timer, difficulty and spawner by one frame and records
//! the final score when the physics layer reports a hit.

use super::state::{GameEvent, GamePhase, GameState, RunSummary};
use crate::consts::{MAX_FRAME_DT, MIN_SCORE_TICK_INTERVAL};
use crate::error::GameError;
use crate::highscores::HighScoreStore;
use crate::persistence::KeyValueStore;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Target player x (from touch/drag position)
    pub move_to: Option<f32>,
    /// Physics layer detected a collision with the player
    pub player_hit: bool,
    /// Restart after game over (tap)
    pub restart: bool,
}

/// Advance the game state by `dt` seconds (capped at [`MAX_FRAME_DT`])
///
/// A failed high score write still ends the run; the error is returned so the
/// caller can report it.
pub fn tick<S: KeyValueStore>(
    state: &mut GameState,
    scores: &mut HighScoreStore<S>,
    input: &TickInput,
    dt: f32,
) -> Result<(), GameError> {
    // Drop long stalls (backgrounded tab, debugger) instead of catching up
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };

    if input.restart && state.phase == GamePhase::GameOver {
        state.restart();
    }

    if state.phase == GamePhase::GameOver {
        return Ok(());
    }

    state.time_ticks += 1;

    if let Some(x) = input.move_to {
        state.player_x = x.clamp(0.0, state.settings.play_field_width);
    }

    if input.player_hit {
        return end_run(state, scores);
    }

    // Score timer
    let interval = state.settings.score_tick_interval.max(MIN_SCORE_TICK_INTERVAL);
    state.score_timer += dt;
    while state.score_timer >= interval {
        state.score_timer -= interval;
        state.award_points();
    }

    let width = state.settings.play_field_width;
    let spawns = state.spawner.advance(dt, &mut state.rng_state, width);
    state
        .events
        .extend(spawns.into_iter().map(GameEvent::SpawnObstacle));

    Ok(())
}

fn end_run<S: KeyValueStore>(state: &mut GameState, scores: &mut HighScoreStore<S>) -> Result<(), GameError> {
    state.phase = GamePhase::GameOver;

    let recorded = scores.record(state.score);
    let summary = RunSummary {
        score: state.score,
        level: state.level(),
        new_high_score: matches!(recorded, Ok(true)),
        best: scores.highest(),
    };

    match &recorded {
        Ok(_) => log::info!(
            "Game over: score {} (level {}), best {}{}",
            summary.score,
            summary.level,
            summary.best,
            if summary.new_high_score { ", new high score" } else { "" }
        ),
        Err(e) => log::warn!("Game over: score {} not saved: {}", summary.score, e),
    }

    state.last_run = Some(summary);
    state.events.push(GameEvent::GameOver(summary));
    recorded.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::persistence::MemoryStore;
    use crate::settings::Settings;

    const DT: f32 = 0.1;

    fn setup() -> (GameState, HighScoreStore<MemoryStore>) {
        (
            GameState::new(12345, Settings::default()),
            HighScoreStore::with_defaults(MemoryStore::new()),
        )
    }

    fn idle(state: &mut GameState, scores: &mut HighScoreStore<MemoryStore>, ticks: u32) {
        for _ in 0..ticks {
            tick(state, scores, &TickInput::default(), DT).unwrap();
        }
    }

    fn hit() -> TickInput {
        TickInput {
            player_hit: true,
            ..Default::default()
        }
    }

    fn level_ups(events: &[GameEvent]) -> Vec<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::LevelUp { level, .. } => Some(*level),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_score_ticks_and_level_up() {
        let (mut state, mut scores) = setup();
        idle(&mut state, &mut scores, 9);
        assert_eq!(state.score, 9);
        assert_eq!(state.level(), 1);

        idle(&mut state, &mut scores, 1);
        assert_eq!(state.score, 10);
        assert_eq!(state.level(), 2);
        assert_eq!(level_ups(&state.drain_events()), vec![2]);
        assert_eq!(state.spawner.spawn_interval, 1.0);
        assert_eq!(state.spawner.obstacle_speed, 3.0);
    }

    #[test]
    fn test_levels_never_go_down() {
        let (mut state, mut scores) = setup();
        let mut last = state.level();
        let mut seen = Vec::new();
        for _ in 0..400 {
            idle(&mut state, &mut scores, 1);
            assert!(state.level() >= last);
            last = state.level();
            seen.extend(level_ups(&state.drain_events()));
        }
        assert_eq!(seen, vec![2, 3, 4, 5, 6]);
        assert!(state.score >= 200);
    }

    #[test]
    fn test_obstacles_spawn_while_playing() {
        let (mut state, mut scores) = setup();
        idle(&mut state, &mut scores, 50);
        let spawns = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::SpawnObstacle(_)))
            .count();
        assert!(spawns >= 3, "{spawns}");
    }

    #[test]
    fn test_movement_is_clamped() {
        let (mut state, mut scores) = setup();
        let input = TickInput {
            move_to: Some(-50.0),
            ..Default::default()
        };
        tick(&mut state, &mut scores, &input, DT).unwrap();
        assert_eq!(state.player_x, 0.0);

        let input = TickInput {
            move_to: Some(1e6),
            ..Default::default()
        };
        tick(&mut state, &mut scores, &input, DT).unwrap();
        assert_eq!(state.player_x, state.settings.play_field_width);
    }

    #[test]
    fn test_hit_records_score_once() {
        let (mut state, mut scores) = setup();
        idle(&mut state, &mut scores, 30);
        let final_score = state.score;
        state.drain_events();

        tick(&mut state, &mut scores, &hit(), DT).unwrap();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(scores.all_scores(), &[final_score]);
        assert_eq!(scores.backend().write_count(), 1);

        let summary = state.last_run.unwrap();
        assert_eq!(summary.score, final_score);
        assert!(summary.new_high_score);
        assert_eq!(summary.best, final_score);
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver(summary)]);

        // Further hits and idle ticks while game over do nothing
        tick(&mut state, &mut scores, &hit(), DT).unwrap();
        idle(&mut state, &mut scores, 10);
        assert_eq!(state.score, final_score);
        assert_eq!(scores.backend().write_count(), 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_restart_after_game_over() {
        let (mut state, mut scores) = setup();
        idle(&mut state, &mut scores, 300);
        tick(&mut state, &mut scores, &hit(), DT).unwrap();
        let first = state.last_run.unwrap();
        assert!(first.level > 1);

        // Restart is ignored while playing, honoured after game over
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &mut scores, &restart, DT).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level(), 1);
        assert_eq!(state.runs_played, 2);

        idle(&mut state, &mut scores, 5);
        tick(&mut state, &mut scores, &restart, DT).unwrap();
        assert_eq!(state.runs_played, 2);

        tick(&mut state, &mut scores, &hit(), DT).unwrap();
        let second = state.last_run.unwrap();
        assert!(second.score < first.score);
        assert!(second.new_high_score);
        assert_eq!(second.best, first.score);
        assert_eq!(scores.all_scores(), &[first.score, second.score]);
    }

    #[test]
    fn test_low_score_does_not_make_full_board() {
        let (mut state, mut scores) = setup();
        for s in (1..=10).rev() {
            scores.record(s * 100).unwrap();
        }

        idle(&mut state, &mut scores, 5);
        tick(&mut state, &mut scores, &hit(), DT).unwrap();
        let summary = state.last_run.unwrap();
        assert!(!summary.new_high_score);
        assert_eq!(summary.best, 1000);
        assert_eq!(scores.backend().write_count(), 11);
    }

    /// Backend that refuses every write
    struct FullDisk;

    impl KeyValueStore for FullDisk {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_storage_failure_still_ends_run() {
        let mut state = GameState::new(1, Settings::default());
        let mut scores = HighScoreStore::with_defaults(FullDisk);
        for _ in 0..20 {
            tick(&mut state, &mut scores, &TickInput::default(), DT).unwrap();
        }

        let result = tick(&mut state, &mut scores, &hit(), DT);
        assert!(matches!(result, Err(GameError::Storage(_))));
        assert_eq!(state.phase, GamePhase::GameOver);
        let summary = state.last_run.unwrap();
        assert!(!summary.new_high_score);
        assert_eq!(summary.best, 0);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &mut scores, &restart, DT).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let (mut state, mut scores) = setup();
        tick(&mut state, &mut scores, &TickInput::default(), 3600.0).unwrap();
        assert_eq!(state.score, 1);
        assert_eq!(state.level(), 1);
        assert!(state.drain_events().is_empty());

        // Negative and non-finite steps advance nothing
        tick(&mut state, &mut scores, &TickInput::default(), -5.0).unwrap();
        tick(&mut state, &mut scores, &TickInput::default(), f32::NAN).unwrap();
        assert_eq!(state.score, 1);
        assert_eq!(state.score_timer, 0.0);
    }

    #[test]
    fn test_zero_score_interval_does_not_hang() {
        let settings = Settings {
            score_tick_interval: 0.0,
            ..Settings::default()
        };
        let mut state = GameState::new(1, settings);
        let mut scores = HighScoreStore::with_defaults(MemoryStore::new());
        for _ in 0..10 {
            tick(&mut state, &mut scores, &TickInput::default(), DT).unwrap();
        }
        assert_eq!(state.score, 10);
        assert_eq!(state.level(), 2);

        // Settings edited after construction are floored by the loop itself
        state.settings.score_tick_interval = 0.0;
        tick(&mut state, &mut scores, &TickInput::default(), DT).unwrap();
        assert!(state.score <= 10 + 10 * 2);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let (mut state1, mut scores1) = setup();
        let (mut state2, mut scores2) = setup();

        let inputs = [
            TickInput {
                move_to: Some(120.0),
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                move_to: Some(300.0),
                ..Default::default()
            },
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut state1, &mut scores1, input, DT).unwrap();
                tick(&mut state2, &mut scores2, input, DT).unwrap();
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.drain_events(), state2.drain_events());
        assert_eq!(state1.rng_state.stream, state2.rng_state.stream);
    }
}
