//! Gate Rush headless runner
//!
//! Drives the simulation without a window: soak runs, balance checks, and a
//! JSON snapshot for frontends to test against.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use gate_rush::consts::TICK_RATE;
use gate_rush::sim::{
    GameState, Outcome, Phase, PhaseTag, RenderSnapshot, SeededRandomizer, TickInput, tick,
};
use gate_rush::{TickPacer, Tuning};

/// Ticks between direction changes when weaving
const WEAVE_TICKS: u64 = 120;

/// Scripted steering, standing in for a keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Steer {
    /// Stay put in the middle
    None,
    Left,
    Right,
    /// Alternate left and right
    Weave,
}

impl Steer {
    fn input(self, tick: u64) -> TickInput {
        let (left, right) = match self {
            Steer::None => (false, false),
            Steer::Left => (true, false),
            Steer::Right => (false, true),
            Steer::Weave => {
                let leftward = (tick / WEAVE_TICKS) % 2 == 0;
                (leftward, !leftward)
            }
        };
        TickInput {
            left,
            right,
            restart: false,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gate-rush")]
#[command(about = "Run the Gate Rush simulation headless")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 5 * 60 * TICK_RATE as u64)]
    ticks: u64,

    /// JSON tuning overrides; missing fields keep their defaults
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Steering pattern
    #[arg(long, value_enum, default_value_t = Steer::None)]
    steer: Steer,

    /// Press restart whenever a round is lost
    #[arg(long)]
    restart_on_loss: bool,

    /// Pace ticks at the nominal rate instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Print the final render snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

#[derive(Debug, Default)]
struct RunStats {
    wins: u32,
    losses: u32,
    best_level: u32,
    best_count: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => load_tuning(path)?,
        None => Tuning::default(),
    };

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("Gate Rush starting with seed {}", seed);

    let mut rng = SeededRandomizer::new(seed);
    let mut state = GameState::new(tuning, &mut rng);
    let mut stats = RunStats::default();
    let mut last_phase = state.phase();
    let mut restart_next = false;

    let mut pacer = TickPacer::default();
    let mut last_frame = Instant::now();
    let mut ticks_run = 0u64;

    while ticks_run < args.ticks {
        let due = if args.realtime {
            thread::sleep(Duration::from_secs_f64(pacer.tick_secs()));
            let now = Instant::now();
            let due = pacer.ticks_due((now - last_frame).as_secs_f64());
            last_frame = now;
            due
        } else {
            1
        };

        for _ in 0..due {
            if ticks_run >= args.ticks {
                break;
            }

            let mut input = args.steer.input(state.time_ticks);
            input.restart = std::mem::take(&mut restart_next);
            tick(&mut state, &input, &mut rng);
            ticks_run += 1;

            stats.best_level = stats.best_level.max(state.round.level);
            stats.best_count = stats.best_count.max(state.round.swarm.count);

            let phase = state.phase();
            if phase != last_phase && phase == PhaseTag::Result {
                if let Phase::Result(result) = &state.round.phase {
                    match result.outcome {
                        Outcome::Win => stats.wins += 1,
                        Outcome::Lose => {
                            stats.losses += 1;
                            restart_next = args.restart_on_loss;
                        }
                    }
                }
            }
            last_phase = phase;
        }
    }

    println!(
        "seed {} | {} ticks | {} wins, {} losses | best level {} | largest swarm {} | now {:?} on level {}",
        seed,
        ticks_run,
        stats.wins,
        stats.losses,
        stats.best_level,
        stats.best_count,
        state.phase(),
        state.round.level
    );

    if args.snapshot {
        let snapshot = RenderSnapshot::capture(&state);
        let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
        println!("{}", json);
    }

    Ok(())
}

fn load_tuning(path: &Path) -> Result<Tuning> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading tuning file {}", path.display()))?;
    Tuning::from_json(&json).with_context(|| format!("loading tuning from {}", path.display()))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
