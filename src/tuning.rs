//! Game balance knobs
//!
//! Fixed when a game starts. Defaults come from [`crate::consts`]; a frontend
//! may override any subset from JSON before constructing the game.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::gate::{DEFAULT_OPERATOR_TABLE, Operator};

/// Problems with a tuning file, reported before a game starts
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("operator table must contain at least one operator")]
    EmptyOperatorTable,
    #[error("gates_per_round must be non-zero")]
    ZeroQuota,
    #[error("gate_spawn_ticks must be non-zero")]
    ZeroCadence,
    #[error("{name} range is inverted ({min} > {max})")]
    InvertedRange {
        name: &'static str,
        min: u64,
        max: u64,
    },
    #[error("multiplicative values must start at 1 or more, got {0}")]
    ZeroMultiplier(u64),
    #[error("{name} must be positive, got {value}")]
    NonPositiveSpeed { name: &'static str, value: i32 },
}

/// Inclusive range of gate values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u64,
    pub max: u64,
}

impl ValueRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn as_range(&self) -> RangeInclusive<u64> {
        self.min..=self.max
    }
}

/// Linear boss HP scaling: both bounds grow by a fixed amount per level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossHpScale {
    pub min_base: u64,
    pub min_per_level: u64,
    pub max_base: u64,
    pub max_per_level: u64,
}

impl Default for BossHpScale {
    fn default() -> Self {
        Self {
            min_base: BOSS_HP_MIN_BASE,
            min_per_level: BOSS_HP_MIN_PER_LEVEL,
            max_base: BOSS_HP_MAX_BASE,
            max_per_level: BOSS_HP_MAX_PER_LEVEL,
        }
    }
}

impl BossHpScale {
    /// HP bounds for a 1-based level
    pub fn range(&self, level: u32) -> RangeInclusive<u64> {
        let steps = u64::from(level.max(1) - 1);
        let min = self
            .min_base
            .saturating_add(self.min_per_level.saturating_mul(steps));
        let max = self
            .max_base
            .saturating_add(self.max_per_level.saturating_mul(steps));
        min..=max
    }
}

/// Start-time game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Gate batches per round (the quota)
    pub gates_per_round: u32,
    /// A batch spawns once the spawn timer exceeds this many ticks
    pub gate_spawn_ticks: u32,
    /// Ticks the win banner stays up before the next round
    pub result_delay_ticks: u64,
    /// Operators are drawn uniformly from this table; repeats act as weights
    pub operator_table: Vec<Operator>,
    /// Values for `+` and `-`
    pub additive_values: ValueRange,
    /// Values for `x` and `/`
    pub multiplicative_values: ValueRange,
    pub boss_hp: BossHpScale,
    pub swarm_speed: i32,
    pub recenter_step: i32,
    pub gate_fall_speed: i32,
    pub boss_descent_speed: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gates_per_round: GATES_PER_ROUND,
            gate_spawn_ticks: GATE_SPAWN_TICKS,
            result_delay_ticks: RESULT_DELAY_TICKS,
            operator_table: DEFAULT_OPERATOR_TABLE.to_vec(),
            additive_values: ValueRange::new(10, 50),
            multiplicative_values: ValueRange::new(1, 3),
            boss_hp: BossHpScale::default(),
            swarm_speed: SWARM_SPEED,
            recenter_step: SWARM_RECENTER_STEP,
            gate_fall_speed: GATE_FALL_SPEED,
            boss_descent_speed: BOSS_DESCENT_SPEED,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document and validate it.
    /// Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: {} gates/round, spawn every {} ticks",
            tuning.gates_per_round,
            tuning.gate_spawn_ticks
        );
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.operator_table.is_empty() {
            return Err(TuningError::EmptyOperatorTable);
        }
        if self.gates_per_round == 0 {
            return Err(TuningError::ZeroQuota);
        }
        if self.gate_spawn_ticks == 0 {
            return Err(TuningError::ZeroCadence);
        }

        let ranges = [
            ("additive_values", self.additive_values.min, self.additive_values.max),
            (
                "multiplicative_values",
                self.multiplicative_values.min,
                self.multiplicative_values.max,
            ),
            ("boss_hp base", self.boss_hp.min_base, self.boss_hp.max_base),
            (
                "boss_hp per-level",
                self.boss_hp.min_per_level,
                self.boss_hp.max_per_level,
            ),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(TuningError::InvertedRange { name, min, max });
            }
        }

        // Division by the drawn value must stay defined
        if self.multiplicative_values.min == 0 {
            return Err(TuningError::ZeroMultiplier(0));
        }

        let speeds = [
            ("swarm_speed", self.swarm_speed),
            ("recenter_step", self.recenter_step),
            ("gate_fall_speed", self.gate_fall_speed),
            ("boss_descent_speed", self.boss_descent_speed),
        ];
        for (name, value) in speeds {
            if value <= 0 {
                return Err(TuningError::NonPositiveSpeed { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.gates_per_round, 7);
        assert_eq!(tuning.gate_spawn_ticks, 90);
        assert_eq!(tuning.result_delay_ticks, 180);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gates_per_round": 3, "operator_table": ["+", "/"] }"#)
            .unwrap();
        assert_eq!(tuning.gates_per_round, 3);
        assert_eq!(tuning.operator_table, vec![Operator::Add, Operator::Divide]);
        assert_eq!(tuning.gate_spawn_ticks, GATE_SPAWN_TICKS);
        assert_eq!(tuning.boss_hp, BossHpScale::default());
    }

    #[test]
    fn test_rejects_bad_tuning() {
        assert!(matches!(
            Tuning::from_json(r#"{ "operator_table": [] }"#),
            Err(TuningError::EmptyOperatorTable)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "gates_per_round": 0 }"#),
            Err(TuningError::ZeroQuota)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "gate_spawn_ticks": 0 }"#),
            Err(TuningError::ZeroCadence)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "additive_values": { "min": 9, "max": 2 } }"#),
            Err(TuningError::InvertedRange { name: "additive_values", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "multiplicative_values": { "min": 0, "max": 2 } }"#),
            Err(TuningError::ZeroMultiplier(0))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "boss_descent_speed": 0 }"#),
            Err(TuningError::NonPositiveSpeed { name: "boss_descent_speed", .. })
        ));
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_boss_hp_range_scales_with_level() {
        let scale = BossHpScale::default();
        assert_eq!(scale.range(1), 500..=1000);
        assert_eq!(scale.range(2), 1000..=11_000);
        assert_eq!(scale.range(4), 2000..=31_000);
        // Level 0 is treated as level 1
        assert_eq!(scale.range(0), 500..=1000);
    }
}
