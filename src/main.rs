//! Avoid Obstacles headless runner
//!
//! Plays one seeded run against the persistent score board with a scripted
//! collision, then prints the board. The interactive game drives the same
//! library from its own engine loop.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use avoid_obstacles::highscores::HighScoreConfig;
    use avoid_obstacles::persistence::{KeyValueStore, MemoryStore};
    use avoid_obstacles::sim::{GameEvent, GameState, RngState, TickInput, tick};
    use avoid_obstacles::{HighScoreStore, Settings, difficulty, platform};

    /// Frame step of the headless loop (60 fps)
    const FRAME_DT: f32 = 1.0 / 60.0;

    platform::init_logging();
    log::info!("Avoid Obstacles (headless) starting...");

    let store: Box<dyn KeyValueStore> = match platform::default_store() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Falling back to in-memory scores: {}", e);
            Box::new(MemoryStore::new())
        }
    };

    let settings = Settings::load(&store);
    let mut scores = HighScoreStore::new(store, HighScoreConfig::from(&settings));

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Started new game with seed: {}", seed);

    // The player survives somewhere between 5 and 60 seconds
    let survive_secs = 5.0 + RngState::new(seed ^ 0x9e37_79b9).next_unit() * 55.0;
    let hit_frame = (survive_secs / FRAME_DT) as u64;

    let mut state = GameState::new(seed, settings);
    let mut frame = 0u64;
    let mut spawned = 0u32;
    loop {
        let input = TickInput {
            player_hit: frame >= hit_frame,
            ..Default::default()
        };
        if let Err(e) = tick(&mut state, &mut scores, &input, FRAME_DT) {
            log::error!("{}", e);
        }
        frame += 1;

        let mut over = false;
        for event in state.drain_events() {
            match event {
                GameEvent::SpawnObstacle(_) => spawned += 1,
                GameEvent::LevelUp { level, tier } => println!(
                    "Level {} (score {}): spawn every {:.1}s, obstacles fall in {:.1}s",
                    level, state.score, tier.spawn_interval, tier.obstacle_speed
                ),
                GameEvent::GameOver(summary) => {
                    println!(
                        "\nGame over after {:.1}s: score {} at level {}/{}, {} obstacles dodged",
                        frame as f32 * FRAME_DT,
                        summary.score,
                        summary.level,
                        difficulty::max_level(),
                        spawned
                    );
                    if summary.new_high_score {
                        println!("New high score!");
                    }
                    println!("Best: {}", summary.best);
                    over = true;
                }
                GameEvent::Restarted => {}
            }
        }
        if over {
            break;
        }
    }

    println!("\nHigh scores:");
    for (rank, score) in scores.all_scores().iter().enumerate() {
        println!("{:>2}. {}", rank + 1, score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the library directly; nothing to run here
}
