//! Sky Dodge headless runner
//!
//! Plays the game with an autopilot at a fixed timestep, restarting after
//! each game over, and logs what happens.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use sky_dodge::consts::SIM_DT;
use sky_dodge::sim::{Category, GameEvent, GamePhase, Session, TickInput};
use sky_dodge::{Game, JsonFileStore, LogAudio, Settings, StoreError};

/// Sky Dodge headless runner
#[derive(Parser)]
#[command(version, about = "Runs the Sky Dodge core headless with an autopilot")]
struct Cli {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Score file
    #[arg(long, value_name = "PATH", default_value = "sky_dodge_score.json")]
    store: PathBuf,

    /// Settings JSON file (defaults are used when absent)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Frames to wait on the game-over screen before pressing restart
    #[arg(long, default_value_t = 90)]
    restart_delay: u32,

    /// Print the final session as JSON
    #[arg(long)]
    dump: bool,
}

/// Autopilot: dodge the nearest threatening cloud, otherwise chase coins,
/// otherwise drift
struct Autopilot {
    y: f32,
    max_speed: f32,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            y: 0.0,
            max_speed: 420.0,
        }
    }

    fn target(&self, session: &Session, half_height: f32) -> f32 {
        let Some(player) = session.player() else {
            return self.y;
        };
        let ahead = |x: f32| x > player.pos.x && x - player.pos.x < 260.0;

        // Most urgent threat: closest obstacle ahead whose band covers us
        let threat = session
            .entities
            .iter()
            .filter(|e| e.category == Category::Obstacle && ahead(e.pos.x))
            .filter(|e| (e.pos.y - self.y).abs() < (e.size.y + player.size.y) / 2.0 + 12.0)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

        if let Some(cloud) = threat {
            let clearance = (cloud.size.y + player.size.y) / 2.0 + 20.0;
            let above = cloud.pos.y + clearance;
            let below = cloud.pos.y - clearance;
            let target = if above <= half_height && (self.y >= cloud.pos.y || below < -half_height)
            {
                above
            } else {
                below
            };
            return target.clamp(-half_height, half_height);
        }

        let coin = session
            .entities
            .iter()
            .filter(|e| e.category == Category::Bonus && e.pos.x > player.pos.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));
        if let Some(coin) = coin {
            return coin.pos.y;
        }

        let t = session.elapsed_secs;
        (t * 0.7).sin() * half_height * 0.5
    }

    fn steer(&mut self, session: &Session, half_height: f32, dt: f32) -> f32 {
        let target = self.target(session, half_height);
        let max_delta = self.max_speed * dt;
        self.y += (target - self.y).clamp(-max_delta, max_delta);
        self.y
    }
}

fn run(cli: Cli) -> Result<(), StoreError> {
    let settings = match &cli.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seed = cli.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    let half_height = settings.field_height / 2.0;

    let mut game = Game::new(settings, JsonFileStore::new(&cli.store), LogAudio::new(), seed)?;
    game.set_score_observer(|score| log::info!("Score: {}", score));

    let mut pilot = Autopilot::new();
    let mut frames_over = 0;
    let mut sessions = 1;
    let mut spawned = 0u32;

    for _ in 0..cli.frames {
        let mut input = TickInput::default();
        match game.phase() {
            GamePhase::Running => {
                input.target_y = Some(pilot.steer(game.session(), half_height, SIM_DT));
            }
            GamePhase::GameOver => {
                frames_over += 1;
                if frames_over >= cli.restart_delay {
                    input.restart = true;
                    frames_over = 0;
                }
            }
        }

        game.advance(&input, SIM_DT)?;

        for event in game.drain_events() {
            match event {
                GameEvent::EntitySpawned { category, .. } if category != Category::Player => {
                    spawned += 1
                }
                GameEvent::GameOver { score } => log::info!("GAME OVER (score {})", score),
                GameEvent::Restarted { session } => {
                    sessions = session;
                    pilot = Autopilot::new();
                }
                other => log::trace!("{:?}", other),
            }
        }
    }

    log::info!(
        "Ran {} frames over {} session(s), {} spawns, final score {}",
        cli.frames,
        sessions,
        spawned,
        game.score().get()
    );

    if cli.dump {
        println!("{}", serde_json::to_string_pretty(game.session())?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sky Dodge (headless) starting...");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal storage error: {}", e);
            ExitCode::FAILURE
        }
    }
}
