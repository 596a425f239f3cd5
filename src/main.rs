use std::time::{Duration, Instant};

use anyhow::Context;
use horde::{autopilot::Autopilot, config::SessionConfig, game::Game, systems::SessionState};
use thousands::Separable;
use tracing::{debug, info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Runs a headless session driven by the autopilot until the player dies or the tick limit is reached.
///
/// Configuration comes from `HORDE_`-prefixed environment variables, logging from `RUST_LOG`.
pub fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")?;

    let config = SessionConfig::from_env().context("Could not load configuration")?;
    let loop_time = Duration::from_secs_f32(1.0 / config.tick_rate);
    let dt = loop_time.as_secs_f32();

    let mut game = Game::new(config.clone()).context("Could not create session")?;
    let mut autopilot = Autopilot::default();
    info!(
        max_ticks = config.max_ticks,
        realtime = config.realtime,
        "Starting headless session"
    );

    for _ in 0..config.max_ticks {
        let start = Instant::now();

        let snapshot = game.snapshot();
        if snapshot.state == SessionState::GameOver {
            break;
        }
        let input = autopilot.next_input(&snapshot);
        for event in game.tick(dt, input) {
            debug!(?event, "Game event");
        }

        if !config.realtime {
            continue;
        }
        let elapsed = start.elapsed();
        if elapsed < loop_time {
            spin_sleep::sleep(loop_time - elapsed);
        } else {
            warn!("Tick loop behind schedule by: {:?}", elapsed - loop_time);
        }
    }

    let snapshot = game.snapshot();
    info!(
        state = ?snapshot.state,
        ticks = snapshot.tick,
        level = snapshot.player.as_ref().map_or(0, |player| player.level),
        escalations = snapshot.escalations,
        score = snapshot.score.separate_with_commas(),
        "Session finished"
    );

    Ok(())
}
