//! Moonslide Headless Simulation
//!
//! Plays a scripted session without a window, logs what happens, and
//! replays it to check the session hash is reproducible.
//!
//! Usage: `moonslide-sim [CONFIG.json] [SEED]`

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use moonslide::{
    GameConfig, Point, VERSION,
    game::{
        feedback::{dispatch_feedback, FeedbackCall, RecordingFeedback},
        input::ScriptedTap,
        replay::replay_session,
    },
};

/// Session length for the demo (seconds)
const DEMO_SECONDS: u32 = 40;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => GameConfig::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed {:?}", s))?,
        None => 12345,
    };

    info!("Moonslide Sim v{}", VERSION);
    info!("Tick Rate: {} Hz", config.tick_rate_hz);
    info!(
        "Playfield: {}x{}, limit {} collectibles",
        config.playfield.width, config.playfield.height, config.max_collectibles
    );

    demo_session(config, seed)
}

/// Tap script: chase the upper band, sweeping left and right.
fn demo_script(config: &GameConfig, ticks: u32) -> Vec<ScriptedTap> {
    let field = config.playfield;
    let step = config.tick_rate_hz / 2;
    (0..ticks)
        .step_by(step.max(1) as usize)
        .enumerate()
        .map(|(i, tick)| {
            let x = field.width * (0.1 + 0.8 * ((i % 9) as f32 / 8.0));
            let y = field.height * (0.45 + 0.5 * ((i % 5) as f32 / 4.0));
            ScriptedTap::new(tick, Point::new(x, y))
        })
        .collect()
}

fn demo_session(config: GameConfig, seed: u64) -> Result<()> {
    info!("=== Starting Demo Session ===");
    info!("RNG Seed: {}", seed);

    let ticks = DEMO_SECONDS * config.tick_rate_hz;
    let script = demo_script(&config, ticks);
    info!("Running {} ticks with {} scripted taps...", ticks, script.len());

    let (controller, events) = replay_session(config.clone(), seed, &script, ticks);

    let mut haptics = RecordingFeedback::new();
    let mut audio = RecordingFeedback::new();
    dispatch_feedback(&events, &mut haptics, &mut audio);

    let mut tally: BTreeMap<&'static str, usize> = BTreeMap::new();
    for event in &events {
        *tally.entry(event.name()).or_default() += 1;
        if event.is_lifecycle() {
            info!("Lifecycle: {:?}", event);
        }
    }
    for (name, count) in &tally {
        debug!("{:>24}: {}", name, count);
    }

    let session = controller.session();
    info!("=== Session Results ===");
    info!("Ticks: {}", controller.ticks());
    info!("Score: {}", session.score);
    info!("Collectibles on screen: {}", session.collectible_count());
    info!("Phase: {:?}", session.phase);
    info!(
        "Feedback: {} light, {} success, {} sounds",
        haptics.count(FeedbackCall::LightImpact),
        haptics.count(FeedbackCall::Success),
        audio.count(FeedbackCall::PickupSound)
    );

    let hash = session.compute_hash().context("hashing session")?;
    info!("Final State Hash: {}", hex::encode(hash));

    info!("=== Verifying Determinism ===");
    let (replay, _) = replay_session(config, seed, &script, ticks);
    let replay_hash = replay.session().compute_hash().context("hashing replay")?;
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        bail!("replay diverged: {} vs {}", hex::encode(hash), hex::encode(replay_hash));
    }
    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}
