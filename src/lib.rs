//! Gate Rush - A lane-runner arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (swarm, gates, boss, round state machine)
//! - `tuning`: Start-time game balance, loadable from JSON
//!
//! Rendering, input polling and windowing live outside this crate. A frontend
//! samples input once per frame, calls [`sim::advance`], and draws the returned
//! [`sim::RenderSnapshot`].

pub mod pacing;
pub mod sim;
pub mod tuning;

pub use pacing::TickPacer;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const WIDTH: i32 = 600;
    pub const HEIGHT: i32 = 800;

    /// Nominal simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Maximum ticks run for one rendered frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 8;

    /// Gate batches per round
    pub const GATES_PER_ROUND: u32 = 7;
    /// Ticks between gate batches (60 is about one second)
    pub const GATE_SPAWN_TICKS: u32 = 90;

    /// Swarm leader box
    pub const SWARM_SIZE: i32 = 50;
    /// Gap between the swarm's bottom edge and the screen bottom
    pub const SWARM_BOTTOM_MARGIN: i32 = 100;
    /// Horizontal speed under keyboard control (pixels/tick)
    pub const SWARM_SPEED: i32 = 8;
    /// Auto-centering speed during the boss fight (pixels/tick)
    pub const SWARM_RECENTER_STEP: i32 = 2;
    /// Crowd members drawn at most (keeps rendering cheap)
    pub const MAX_SWARM_OFFSETS: usize = 200;
    /// Crowd spread = base + shown members / divisor
    pub const SWARM_SPREAD_BASE: i32 = 20;
    pub const SWARM_SPREAD_DIVISOR: i32 = 5;

    /// Gate geometry
    pub const GATE_HEIGHT: i32 = 80;
    /// Inset from the screen edge and from the centre line
    pub const GATE_INSET: i32 = 5;
    /// Top edge of a freshly spawned gate (off-screen)
    pub const GATE_SPAWN_Y: i32 = -100;
    pub const GATE_FALL_SPEED: i32 = 5;

    /// Boss geometry
    pub const BOSS_SIZE: i32 = 150;
    /// Bottom edge of the boss when it enters (off-screen)
    pub const BOSS_SPAWN_BOTTOM: i32 = -50;
    pub const BOSS_DESCENT_SPEED: i32 = 4;
    /// The boss stops descending once its bottom edge reaches the swarm's line
    pub const BOSS_REST_BOTTOM: i32 = HEIGHT - SWARM_BOTTOM_MARGIN;

    /// Boss HP range at level 1, and per-level growth of each bound
    pub const BOSS_HP_MIN_BASE: u64 = 500;
    pub const BOSS_HP_MIN_PER_LEVEL: u64 = 500;
    pub const BOSS_HP_MAX_BASE: u64 = 1000;
    pub const BOSS_HP_MAX_PER_LEVEL: u64 = 10_000;

    /// Delay on the win banner before the next round starts (3 seconds)
    pub const RESULT_DELAY_TICKS: u64 = 3 * TICK_RATE as u64;
}
