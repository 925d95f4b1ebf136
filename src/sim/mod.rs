//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One tick per call, no wall clock
//! - Randomness only through an injected [`Randomizer`]
//! - Stable iteration order (gates in spawn order)
//! - No rendering or platform dependencies

pub mod boss;
pub mod gate;
pub mod random;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod swarm;
pub mod tick;

pub use boss::Boss;
pub use gate::{Gate, GateEffect, Lane, Operator, spawn_batch};
pub use random::{Randomizer, ScriptedRandomizer, SeededRandomizer};
pub use rect::Rect;
pub use snapshot::{BossView, GateView, RenderSnapshot, ResultBanner, SwarmView};
pub use state::{GameState, Outcome, Phase, PhaseTag, ResultPhase, RoundState, RunningPhase};
pub use swarm::Swarm;
pub use tick::{TickInput, advance, tick};
