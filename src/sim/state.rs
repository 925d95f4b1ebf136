//! Round and game state
//!
//! A round is replaced wholesale when the next one starts (after a win) or on
//! restart. Fields that only make sense in one phase live in that phase's
//! variant.

use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::gate::Gate;
use super::random::Randomizer;
use super::swarm::Swarm;
use crate::Tuning;

/// Phase tag, without the per-phase data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseTag {
    /// Running down the lane through gates
    Running,
    /// Boss descending, swarm auto-centering
    Boss,
    /// Round decided; waiting for the next round or a restart
    Result,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        self == Outcome::Win
    }
}

/// Gate phase bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningPhase {
    /// Batches spawned so far this round
    pub spawned_gates: u32,
    /// Batches the swarm has run through
    pub passed_gates: u32,
    /// Ticks since the last spawn
    pub gate_timer: u32,
    /// Last batch id handed out
    pub batch_counter: u32,
}

/// A decided round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPhase {
    /// Game tick at which the round was decided
    pub started_at_tick: u64,
    pub outcome: Outcome,
    /// The boss, if the round got that far
    pub boss: Option<Boss>,
}

impl ResultPhase {
    /// Survivors after beating the boss (0 on a loss)
    pub fn remaining(&self, count: u64) -> u64 {
        match (self.outcome, self.boss) {
            (Outcome::Win, Some(boss)) => count.saturating_sub(boss.hp),
            _ => 0,
        }
    }
}

/// Round phase with its data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Running(RunningPhase),
    Boss(Boss),
    Result(ResultPhase),
}

impl Phase {
    pub fn tag(&self) -> PhaseTag {
        match self {
            Phase::Running(_) => PhaseTag::Running,
            Phase::Boss(_) => PhaseTag::Boss,
            Phase::Result(_) => PhaseTag::Result,
        }
    }
}

/// Everything about the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    /// 1-based round level; scales boss HP
    pub level: u32,
    pub swarm: Swarm,
    /// Live gates, in spawn order
    pub gates: Vec<Gate>,
    /// HP of this round's boss, drawn when the round starts
    pub boss_hp: u64,
    pub phase: Phase,
}

impl RoundState {
    pub fn new<R: Randomizer + ?Sized>(
        level: u32,
        count: u64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let boss_hp = rng.boss_hp(level, tuning);
        log::info!(
            "Round start: level {}, swarm {}, boss hp {}",
            level,
            count,
            boss_hp
        );
        Self {
            level,
            swarm: Swarm::new(count, tuning.swarm_speed),
            gates: Vec::new(),
            boss_hp,
            phase: Phase::Running(RunningPhase::default()),
        }
    }

    /// The boss on screen, if any
    pub fn boss(&self) -> Option<&Boss> {
        match &self.phase {
            Phase::Boss(boss) => Some(boss),
            Phase::Result(result) => result.boss.as_ref(),
            Phase::Running(_) => None,
        }
    }

    /// Switch to the boss fight
    pub fn enter_boss(&mut self) {
        log::info!(
            "Boss enters: level {}, hp {}, swarm {}",
            self.level,
            self.boss_hp,
            self.swarm.count
        );
        self.phase = Phase::Boss(Boss::new(self.level, self.boss_hp));
    }

    /// Decide the round
    pub fn finish(&mut self, tick: u64, outcome: Outcome) {
        let boss = match &self.phase {
            Phase::Boss(boss) => Some(*boss),
            _ => None,
        };
        log::info!(
            "Round over at tick {}: {:?} (swarm {}, boss hp {})",
            tick,
            outcome,
            self.swarm.count,
            self.boss_hp
        );
        self.phase = Phase::Result(ResultPhase {
            started_at_tick: tick,
            outcome,
            boss,
        });
    }

    /// Swarm carried into the next round after a win; at least 1
    pub fn carried_count(&self) -> u64 {
        self.swarm.count.saturating_sub(self.boss_hp).max(1)
    }
}

/// Complete game state: fixed tuning, the clock, and the live round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Ticks simulated since the game was created (restarts do not reset it)
    pub time_ticks: u64,
    pub round: RoundState,
}

/// Level and swarm size of a fresh game
pub const START_LEVEL: u32 = 1;
pub const START_COUNT: u64 = 1;

impl GameState {
    pub fn new<R: Randomizer + ?Sized>(tuning: Tuning, rng: &mut R) -> Self {
        let round = RoundState::new(START_LEVEL, START_COUNT, &tuning, rng);
        Self {
            tuning,
            time_ticks: 0,
            round,
        }
    }

    /// Throw the current round away and start over at level 1
    pub fn restart<R: Randomizer + ?Sized>(&mut self, rng: &mut R) {
        self.round = RoundState::new(START_LEVEL, START_COUNT, &self.tuning, rng);
    }

    /// Start the round after a win
    pub fn advance_level<R: Randomizer + ?Sized>(&mut self, rng: &mut R) {
        let level = self.round.level + 1;
        let count = self.round.carried_count();
        self.round = RoundState::new(level, count, &self.tuning, rng);
    }

    pub fn phase(&self) -> PhaseTag {
        self.round.phase.tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandomizer;

    #[test]
    fn test_new_game() {
        let mut rng = ScriptedRandomizer::new(vec![], vec![640]);
        let state = GameState::new(Tuning::default(), &mut rng);
        assert_eq!(state.phase(), PhaseTag::Running);
        assert_eq!(state.round.level, 1);
        assert_eq!(state.round.swarm.count, 1);
        assert_eq!(state.round.boss_hp, 640);
        assert!(state.round.gates.is_empty());
        assert!(state.round.boss().is_none());
    }

    #[test]
    fn test_finish_keeps_boss_only_after_boss_fight() {
        let mut rng = ScriptedRandomizer::new(vec![], vec![600, 600]);
        let mut state = GameState::new(Tuning::default(), &mut rng);

        state.round.finish(10, Outcome::Lose);
        assert!(state.round.boss().is_none());

        state.restart(&mut rng);
        state.round.enter_boss();
        state.round.finish(20, Outcome::Lose);
        let Phase::Result(result) = &state.round.phase else {
            panic!("expected result phase");
        };
        assert_eq!(result.started_at_tick, 20);
        assert_eq!(result.boss.map(|b| b.hp), Some(600));
    }

    #[test]
    fn test_carried_count_never_below_one() {
        let mut rng = ScriptedRandomizer::new(vec![], vec![500, 500]);
        let mut state = GameState::new(Tuning::default(), &mut rng);

        state.round.swarm.count = 500;
        assert_eq!(state.round.carried_count(), 1);

        state.round.swarm.count = 620;
        assert_eq!(state.round.carried_count(), 120);

        state.advance_level(&mut rng);
        assert_eq!(state.round.level, 2);
        assert_eq!(state.round.swarm.count, 120);
    }

    #[test]
    fn test_remaining_on_banner() {
        let win = ResultPhase {
            started_at_tick: 0,
            outcome: Outcome::Win,
            boss: Some(Boss::new(1, 700)),
        };
        assert_eq!(win.remaining(900), 200);

        let lose = ResultPhase {
            outcome: Outcome::Lose,
            ..win
        };
        assert_eq!(lose.remaining(100), 0);
    }
}
