//! Fixed timestep simulation tick
//!
//! Core game loop that advances a round by one tick: spawn gates, check for the
//! boss, move everything, resolve collisions, then decide phase changes.

use super::gate::{Gate, GateEffect, spawn_batch};
use super::random::Randomizer;
use super::snapshot::RenderSnapshot;
use super::state::{GameState, Outcome, Phase, RoundState, RunningPhase};
use super::swarm::Swarm;
use crate::Tuning;

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Restart button clicked this frame
    pub restart: bool,
}

impl TickInput {
    /// -1, 0 or 1; holding both cancels out
    pub fn direction(&self) -> i32 {
        i32::from(self.right) - i32::from(self.left)
    }
}

/// Advance by one tick and hand back the state with a snapshot to draw
pub fn advance<R: Randomizer + ?Sized>(
    mut state: GameState,
    input: &TickInput,
    rng: &mut R,
) -> (GameState, RenderSnapshot) {
    tick(&mut state, input, rng);
    let snapshot = RenderSnapshot::capture(&state);
    (state, snapshot)
}

/// Advance the game state by one tick in place
pub fn tick<R: Randomizer + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    if input.restart {
        log::info!("Restart requested at tick {}", state.time_ticks);
        state.restart(rng);
        return;
    }

    state.time_ticks += 1;
    let now = state.time_ticks;
    let tuning = &state.tuning;
    let round = &mut state.round;

    if let Phase::Running(running) = &mut round.phase {
        spawn_gates(running, &mut round.gates, tuning, rng);
        if boss_due(running, round.gates.is_empty(), tuning) {
            round.enter_boss();
        }
    }

    move_entities(round, input, tuning, rng);

    match &mut round.phase {
        Phase::Running(running) => {
            running.passed_gates += resolve_gate_hits(&mut round.swarm, &mut round.gates);
        }
        Phase::Boss(boss) => {
            if boss.rect.intersects(&round.swarm.rect) {
                let outcome = if round.swarm.count >= boss.hp {
                    Outcome::Win
                } else {
                    Outcome::Lose
                };
                round.finish(now, outcome);
            }
        }
        Phase::Result(_) => {}
    }

    // Extinction loses immediately, boss or not
    if !matches!(round.phase, Phase::Result(_)) && round.swarm.is_extinct() {
        log::info!("Swarm wiped out on level {}", round.level);
        round.finish(now, Outcome::Lose);
    }

    if next_round_due(round, now, tuning) {
        state.advance_level(rng);
    }
}

/// Spawn one batch when the timer runs out, until the quota is reached
fn spawn_gates<R: Randomizer + ?Sized>(
    running: &mut RunningPhase,
    gates: &mut Vec<Gate>,
    tuning: &Tuning,
    rng: &mut R,
) {
    running.gate_timer += 1;
    if running.gate_timer <= tuning.gate_spawn_ticks
        || running.spawned_gates >= tuning.gates_per_round
    {
        return;
    }

    running.gate_timer = 0;
    running.batch_counter += 1;
    let effect = rng.gate_effect(tuning);
    log::debug!(
        "Batch {} spawned: {}",
        running.batch_counter,
        effect.label()
    );
    gates.extend(spawn_batch(running.batch_counter, effect));
    running.spawned_gates += 1;
}

/// Either every batch was passed, or every batch was spawned and has left play
fn boss_due(running: &RunningPhase, no_gates_left: bool, tuning: &Tuning) -> bool {
    let quota = tuning.gates_per_round;
    running.passed_gates >= quota || (running.spawned_gates >= quota && no_gates_left)
}

fn move_entities<R: Randomizer + ?Sized>(
    round: &mut RoundState,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut R,
) {
    match &mut round.phase {
        Phase::Running(_) => {
            round.swarm.move_horizontal(input.direction());
        }
        Phase::Boss(boss) => {
            // Steering is locked; line the swarm up with the boss
            round.swarm.recenter(tuning.recenter_step);
            boss.descend(tuning.boss_descent_speed);
        }
        Phase::Result(_) => return,
    }

    round.swarm.update_offsets(rng);
    for gate in &mut round.gates {
        gate.fall(tuning.gate_fall_speed);
    }
    round.gates.retain(|gate| !gate.is_off_screen());
}

/// Apply each touched batch once and remove both of its gates.
/// Returns the number of batches passed.
fn resolve_gate_hits(swarm: &mut Swarm, gates: &mut Vec<Gate>) -> u32 {
    let mut hit: Vec<(u32, GateEffect)> = Vec::new();
    for gate in gates.iter() {
        let seen = hit.iter().any(|(id, _)| *id == gate.batch_id);
        if !seen && gate.rect.intersects(&swarm.rect) {
            hit.push((gate.batch_id, gate.effect));
        }
    }

    for (batch_id, effect) in &hit {
        swarm.apply_effect(*effect);
        log::debug!(
            "Batch {} passed ({}): swarm now {}",
            batch_id,
            effect.label(),
            swarm.count
        );
    }
    gates.retain(|gate| !hit.iter().any(|(id, _)| *id == gate.batch_id));

    hit.len() as u32
}

/// A won round moves on once the banner has been up long enough
fn next_round_due(round: &RoundState, now: u64, tuning: &Tuning) -> bool {
    match &round.phase {
        Phase::Result(result) => {
            let elapsed = now.saturating_sub(result.started_at_tick);
            result.outcome.is_win() && elapsed > tuning.result_delay_ticks
        }
        _ => false,
    }
}
