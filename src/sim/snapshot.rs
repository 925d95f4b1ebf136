//! Render snapshot - what the frontend draws after each tick.
//!
//! Plain data, serializable so an out-of-process frontend can consume it as
//! JSON. Image assets, fonts and fallback colours are the frontend's business.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::gate::{Gate, Lane, Operator};
use super::rect::Rect;
use super::state::{GameState, Outcome, Phase, PhaseTag};

/// Complete visible state after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub phase: PhaseTag,
    pub level: u32,
    pub swarm: SwarmView,
    pub gates: Vec<GateView>,
    pub boss: Option<BossView>,
    /// Share of the round's batches passed, 0.0 - 1.0 (gate phase only)
    pub progress: Option<f32>,
    /// Win/lose banner (result phase only)
    pub banner: Option<ResultBanner>,
}

/// The player's swarm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmView {
    pub rect: Rect,
    pub count: u64,
    /// Crowd members relative to `rect`'s centre
    pub offsets: Vec<IVec2>,
}

/// One gate half
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateView {
    pub batch_id: u32,
    pub lane: Lane,
    pub operator: Operator,
    pub value: u64,
    /// e.g. `+25`
    pub label: String,
    /// Helps the player (`+`, `x`)
    pub beneficial: bool,
    pub rect: Rect,
}

impl From<&Gate> for GateView {
    fn from(gate: &Gate) -> Self {
        Self {
            batch_id: gate.batch_id,
            lane: gate.lane,
            operator: gate.effect.operator,
            value: gate.effect.value,
            label: gate.effect.label(),
            beneficial: gate.effect.operator.is_beneficial(),
            rect: gate.rect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossView {
    pub rect: Rect,
    pub hp: u64,
    pub level: u32,
    /// Reached the swarm's line and stopped descending
    pub resting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBanner {
    pub outcome: Outcome,
    /// Swarm left after paying the boss's HP (wins only)
    pub remaining: Option<u64>,
    /// Ticks until the next round starts (wins only)
    pub next_round_in: Option<u64>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let round = &state.round;

        let progress = match &round.phase {
            Phase::Running(running) => {
                let ratio = running.passed_gates as f32 / state.tuning.gates_per_round as f32;
                Some(ratio.min(1.0))
            }
            _ => None,
        };

        let banner = match &round.phase {
            Phase::Result(result) => {
                let win = result.outcome.is_win();
                let elapsed = state.time_ticks.saturating_sub(result.started_at_tick);
                Some(ResultBanner {
                    outcome: result.outcome,
                    remaining: win.then(|| result.remaining(round.swarm.count)),
                    next_round_in: win.then(|| {
                        (state.tuning.result_delay_ticks + 1).saturating_sub(elapsed)
                    }),
                })
            }
            _ => None,
        };

        Self {
            tick: state.time_ticks,
            phase: round.phase.tag(),
            level: round.level,
            swarm: SwarmView {
                rect: round.swarm.rect,
                count: round.swarm.count,
                offsets: round.swarm.offsets().to_vec(),
            },
            gates: round.gates.iter().map(GateView::from).collect(),
            boss: round.boss().map(|boss| BossView {
                rect: boss.rect,
                hp: boss.hp,
                level: boss.level,
                resting: boss.is_resting(),
            }),
            progress,
            banner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::*;
    use crate::sim::gate::{GateEffect, spawn_batch};
    use crate::sim::random::ScriptedRandomizer;
    use crate::sim::state::RunningPhase;

    fn game(hp: u64) -> (GameState, ScriptedRandomizer) {
        let mut rng = ScriptedRandomizer::new(vec![], vec![hp]);
        let state = GameState::new(Tuning::default(), &mut rng);
        (state, rng)
    }

    #[test]
    fn test_running_snapshot() {
        let (mut state, _rng) = game(800);
        state
            .round
            .gates
            .extend(spawn_batch(3, GateEffect::new(Operator::Subtract, 20)));
        state.round.phase = Phase::Running(RunningPhase {
            passed_gates: 2,
            ..Default::default()
        });

        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.phase, PhaseTag::Running);
        assert_eq!(snap.gates.len(), 2);
        assert_eq!(snap.gates[0].label, "-20");
        assert!(!snap.gates[0].beneficial);
        assert_eq!(snap.gates[0].batch_id, snap.gates[1].batch_id);
        assert!(snap.boss.is_none());
        assert!(snap.banner.is_none());
        let progress = snap.progress.unwrap();
        assert!((progress - 2.0 / 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_progress_clamped() {
        let (mut state, _rng) = game(800);
        state.round.phase = Phase::Running(RunningPhase {
            passed_gates: 12,
            ..Default::default()
        });
        assert_eq!(RenderSnapshot::capture(&state).progress, Some(1.0));
    }

    #[test]
    fn test_boss_view_reports_level_and_rest() {
        let (mut state, _rng) = game(800);
        state.round.enter_boss();

        let view = RenderSnapshot::capture(&state).boss.unwrap();
        assert_eq!(view.level, 1);
        assert!(!view.resting);

        if let Phase::Boss(boss) = &mut state.round.phase {
            for _ in 0..200 {
                boss.descend(BOSS_DESCENT_SPEED);
            }
        }
        let view = RenderSnapshot::capture(&state).boss.unwrap();
        assert!(view.resting);
        assert_eq!(view.rect.bottom(), BOSS_REST_BOTTOM);
    }

    #[test]
    fn test_win_banner() {
        let (mut state, _rng) = game(800);
        state.round.swarm.count = 1_000;
        state.round.enter_boss();
        state.time_ticks = 500;
        state.round.finish(500, Outcome::Win);
        state.time_ticks = 530;

        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.phase, PhaseTag::Result);
        assert_eq!(snap.boss.map(|b| b.hp), Some(800));
        assert!(snap.progress.is_none());
        let banner = snap.banner.unwrap();
        assert_eq!(banner.outcome, Outcome::Win);
        assert_eq!(banner.remaining, Some(200));
        assert_eq!(banner.next_round_in, Some(151));
    }

    #[test]
    fn test_lose_banner_without_boss() {
        let (mut state, _rng) = game(800);
        state.round.swarm.count = 0;
        state.round.finish(10, Outcome::Lose);

        let snap = RenderSnapshot::capture(&state);
        assert!(snap.boss.is_none());
        let banner = snap.banner.unwrap();
        assert_eq!(banner.outcome, Outcome::Lose);
        assert_eq!(banner.remaining, None);
        assert_eq!(banner.next_round_in, None);
    }

    #[test]
    fn test_serializes_to_json() {
        let (state, _rng) = game(800);
        let json = serde_json::to_string(&RenderSnapshot::capture(&state)).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        let back: RenderSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, 1);
    }
}
