//! The end-of-round boss

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::Tuning;
use crate::consts::*;

/// Boss entity. Beaten when the swarm count at contact is at least `hp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boss {
    pub hp: u64,
    pub level: u32,
    pub rect: Rect,
}

impl Boss {
    /// Place a boss above the screen, horizontally centred
    pub fn new(level: u32, hp: u64) -> Self {
        let mut rect = Rect::new(0, 0, BOSS_SIZE, BOSS_SIZE);
        rect.set_center_x(WIDTH / 2);
        rect.set_bottom(BOSS_SPAWN_BOTTOM);
        Self { hp, level, rect }
    }

    /// Draw HP uniformly from the level's range
    pub fn roll_hp<R: Rng + ?Sized>(rng: &mut R, level: u32, tuning: &Tuning) -> u64 {
        rng.random_range(tuning.boss_hp.range(level))
    }

    /// Move down by `speed`, stopping on the resting line
    pub fn descend(&mut self, speed: i32) {
        let remaining = BOSS_REST_BOTTOM - self.rect.bottom();
        self.rect.pos.y += speed.min(remaining).max(0);
    }

    pub fn is_resting(&self) -> bool {
        self.rect.bottom() >= BOSS_REST_BOTTOM
    }
}
