//! The player's swarm
//!
//! One leader box does the colliding; the crowd around it is a list of
//! offsets that presentation draws as individual members.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::gate::GateEffect;
use super::random::Randomizer;
use super::rect::Rect;
use crate::consts::*;

/// The player-controlled swarm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swarm {
    /// Population; never negative
    pub count: u64,
    /// Leader collision box
    pub rect: Rect,
    /// Horizontal speed (pixels/tick)
    pub speed: i32,
    /// Crowd member offsets from the leader's centre (oldest first)
    offsets: Vec<IVec2>,
}

impl Swarm {
    /// A swarm at its start position: centred, just above the bottom margin
    pub fn new(count: u64, speed: i32) -> Self {
        let mut rect = Rect::new(0, 0, SWARM_SIZE, SWARM_SIZE);
        rect.set_center_x(WIDTH / 2);
        rect.set_bottom(HEIGHT - SWARM_BOTTOM_MARGIN);
        Self {
            count,
            rect,
            speed,
            offsets: Vec::with_capacity(MAX_SWARM_OFFSETS),
        }
    }

    pub fn apply_effect(&mut self, effect: GateEffect) {
        self.count = effect.operator.apply(self.count, effect.value);
    }

    pub fn is_extinct(&self) -> bool {
        self.count == 0
    }

    /// Step sideways by `speed * direction` and stay inside the lane
    pub fn move_horizontal(&mut self, direction: i32) {
        self.rect.pos.x += self.speed * direction.signum();
        self.rect.clamp_x(0, WIDTH);
    }

    /// Drift toward the screen centre without overshooting it
    pub fn recenter(&mut self, step: i32) {
        let delta = WIDTH / 2 - self.rect.center_x();
        self.rect.pos.x += delta.clamp(-step, step);
    }

    /// Grow or shrink the crowd toward the current count, capped.
    /// New members land in a square whose half-width grows with the crowd.
    pub fn update_offsets<R: Randomizer + ?Sized>(&mut self, rng: &mut R) {
        let target = self.shown_members();
        if self.offsets.len() < target {
            let spread = SWARM_SPREAD_BASE + target as i32 / SWARM_SPREAD_DIVISOR;
            while self.offsets.len() < target {
                self.offsets.push(rng.swarm_offset(spread));
            }
        }
        self.offsets.truncate(target);
    }

    pub fn offsets(&self) -> &[IVec2] {
        &self.offsets
    }

    fn shown_members(&self) -> usize {
        usize::try_from(self.count)
            .unwrap_or(usize::MAX)
            .min(MAX_SWARM_OFFSETS)
    }
}
