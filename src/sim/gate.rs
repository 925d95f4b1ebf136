//! Operator gates
//!
//! Gates spawn in left/right pairs (a batch). Both halves of a batch carry the
//! same effect, so the lane the swarm runs through only matters visually.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::Tuning;
use crate::consts::*;

/// Arithmetic applied to the swarm count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "x")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

/// Spawn table: two good operators listed twice, one bad operator once
pub const DEFAULT_OPERATOR_TABLE: [Operator; 5] = [
    Operator::Add,
    Operator::Multiply,
    Operator::Subtract,
    Operator::Add,
    Operator::Multiply,
];

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "x",
            Operator::Divide => "/",
        }
    }

    /// `+` and `x` help the player (drawn blue), `-` and `/` hurt (drawn red)
    pub fn is_beneficial(self) -> bool {
        matches!(self, Operator::Add | Operator::Multiply)
    }

    /// Additive operators draw from the larger value range
    pub fn is_additive(self) -> bool {
        matches!(self, Operator::Add | Operator::Subtract)
    }

    /// Apply to a count. Results floor at zero and saturate at the top.
    pub fn apply(self, count: u64, value: u64) -> u64 {
        match self {
            Operator::Add => count.saturating_add(value),
            Operator::Subtract => count.saturating_sub(value),
            Operator::Multiply => count.saturating_mul(value),
            // Tuning guarantees value >= 1
            Operator::Divide => count / value.max(1),
        }
    }
}

/// An operator with its operand, shared by both gates of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateEffect {
    pub operator: Operator,
    pub value: u64,
}

impl GateEffect {
    pub const fn new(operator: Operator, value: u64) -> Self {
        Self { operator, value }
    }

    /// Draw an operator from the tuning table, then a value from its range
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Self {
        let operator = tuning
            .operator_table
            .choose(rng)
            .copied()
            .unwrap_or(Operator::Add);
        let range = if operator.is_additive() {
            tuning.additive_values
        } else {
            tuning.multiplicative_values
        };
        let value = rng.random_range(range.as_range());
        Self { operator, value }
    }

    /// Text shown on the gate, e.g. `+25` or `x2`
    pub fn label(&self) -> String {
        format!("{}{}", self.operator.symbol(), self.value)
    }
}

/// Which half of the screen a gate occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    fn spawn_x(self) -> i32 {
        match self {
            Lane::Left => GATE_INSET,
            Lane::Right => WIDTH / 2 + GATE_INSET,
        }
    }
}

/// A falling gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    pub batch_id: u32,
    pub lane: Lane,
    pub effect: GateEffect,
    pub rect: Rect,
}

impl Gate {
    pub fn new(batch_id: u32, lane: Lane, effect: GateEffect) -> Self {
        Self {
            batch_id,
            lane,
            effect,
            rect: Rect::new(
                lane.spawn_x(),
                GATE_SPAWN_Y,
                WIDTH / 2 - 2 * GATE_INSET,
                GATE_HEIGHT,
            ),
        }
    }

    pub fn fall(&mut self, speed: i32) {
        self.rect.pos.y += speed;
    }

    /// Entirely below the bottom edge
    pub fn is_off_screen(&self) -> bool {
        self.rect.top() > HEIGHT
    }
}

/// Create the left/right pair for one batch
pub fn spawn_batch(batch_id: u32, effect: GateEffect) -> [Gate; 2] {
    [
        Gate::new(batch_id, Lane::Left, effect),
        Gate::new(batch_id, Lane::Right, effect),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Add.apply(1, 10), 11);
        assert_eq!(Operator::Multiply.apply(4, 3), 12);
        assert_eq!(Operator::Subtract.apply(30, 10), 20);
        assert_eq!(Operator::Divide.apply(7, 2), 3);
        // Clamped, never wraps
        assert_eq!(Operator::Subtract.apply(5, 50), 0);
        assert_eq!(Operator::Multiply.apply(u64::MAX, 2), u64::MAX);
    }

    #[test]
    fn test_batch_shares_effect() {
        let effect = GateEffect::new(Operator::Multiply, 2);
        let [left, right] = spawn_batch(4, effect);

        assert_eq!(left.batch_id, right.batch_id);
        assert_eq!(left.effect, right.effect);
        assert_eq!(left.lane, Lane::Left);
        assert_eq!(right.lane, Lane::Right);

        assert_eq!(left.rect, Rect::new(5, -100, 290, 80));
        assert_eq!(right.rect, Rect::new(305, -100, 290, 80));
        assert!(!left.rect.intersects(&right.rect));
    }

    #[test]
    fn test_rolled_effects_respect_tuning() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen_divide = false;
        let mut good = 0;

        for _ in 0..2000 {
            let effect = GateEffect::roll(&mut rng, &tuning);
            assert!(tuning.operator_table.contains(&effect.operator));
            if effect.operator.is_additive() {
                assert!((10..=50).contains(&effect.value));
            } else {
                assert!((1..=3).contains(&effect.value));
            }
            seen_divide |= effect.operator == Operator::Divide;
            if effect.operator.is_beneficial() {
                good += 1;
            }
        }

        // The default table never offers division, and favours good gates 4:1
        assert!(!seen_divide);
        assert!(good > 1400, "expected ~80% good gates, got {good}/2000");
    }

    #[test]
    fn test_fall_and_leave_screen() {
        let mut gate = Gate::new(1, Lane::Left, GateEffect::new(Operator::Add, 10));
        // Top starts at -100; it must pass y = HEIGHT to leave
        let ticks = (HEIGHT - GATE_SPAWN_Y) / GATE_FALL_SPEED;
        for _ in 0..ticks {
            gate.fall(GATE_FALL_SPEED);
        }
        assert_eq!(gate.rect.top(), HEIGHT);
        assert!(!gate.is_off_screen());

        gate.fall(GATE_FALL_SPEED);
        assert!(gate.is_off_screen());
    }

    #[test]
    fn test_label() {
        assert_eq!(GateEffect::new(Operator::Add, 25).label(), "+25");
        assert_eq!(GateEffect::new(Operator::Multiply, 2).label(), "x2");
        assert_eq!(GateEffect::new(Operator::Divide, 3).label(), "/3");
    }
}
