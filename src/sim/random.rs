//! Injectable randomness
//!
//! The simulation never reaches for a global RNG. Whoever drives the game owns
//! one [`Randomizer`], seeds it once, and passes it into every tick. Rounds do
//! not reseed it.

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::boss::Boss;
use super::gate::GateEffect;
use crate::Tuning;

/// Source of every random decision the simulation makes
pub trait Randomizer {
    /// Effect shared by both gates of a new batch
    fn gate_effect(&mut self, tuning: &Tuning) -> GateEffect;
    /// HP for the boss of a round at `level`
    fn boss_hp(&mut self, level: u32, tuning: &Tuning) -> u64;
    /// Crowd member offset in `[-spread, spread]` on both axes
    fn swarm_offset(&mut self, spread: i32) -> IVec2;
}

/// Production randomizer backed by a seeded PCG stream
#[derive(Debug, Clone)]
pub struct SeededRandomizer {
    rng: Pcg32,
}

impl SeededRandomizer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Randomizer for SeededRandomizer {
    fn gate_effect(&mut self, tuning: &Tuning) -> GateEffect {
        GateEffect::roll(&mut self.rng, tuning)
    }

    fn boss_hp(&mut self, level: u32, tuning: &Tuning) -> u64 {
        Boss::roll_hp(&mut self.rng, level, tuning)
    }

    fn swarm_offset(&mut self, spread: i32) -> IVec2 {
        IVec2::new(
            self.rng.random_range(-spread..=spread),
            self.rng.random_range(-spread..=spread),
        )
    }
}

/// Replays fixed gate effects and boss HPs in order, for reproducible rounds.
///
/// Once a script runs dry the seeded fallback takes over. Crowd offsets always
/// come from the fallback since they never affect gameplay.
#[derive(Debug, Clone)]
pub struct ScriptedRandomizer {
    gate_effects: VecDeque<GateEffect>,
    boss_hps: VecDeque<u64>,
    fallback: SeededRandomizer,
}

impl ScriptedRandomizer {
    pub fn new(gate_effects: Vec<GateEffect>, boss_hps: Vec<u64>) -> Self {
        Self {
            gate_effects: gate_effects.into(),
            boss_hps: boss_hps.into(),
            fallback: SeededRandomizer::new(0),
        }
    }

    /// Seed for draws past the end of the script
    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback = SeededRandomizer::new(seed);
        self
    }

    /// Scripted gate effects not yet consumed
    pub fn remaining_gate_effects(&self) -> usize {
        self.gate_effects.len()
    }
}

impl Randomizer for ScriptedRandomizer {
    fn gate_effect(&mut self, tuning: &Tuning) -> GateEffect {
        match self.gate_effects.pop_front() {
            Some(effect) => effect,
            None => self.fallback.gate_effect(tuning),
        }
    }

    fn boss_hp(&mut self, level: u32, tuning: &Tuning) -> u64 {
        match self.boss_hps.pop_front() {
            Some(hp) => hp,
            None => self.fallback.boss_hp(level, tuning),
        }
    }

    fn swarm_offset(&mut self, spread: i32) -> IVec2 {
        self.fallback.swarm_offset(spread)
    }
}
