//! Fixed-rate tick pacing
//!
//! Frontends render at whatever rate the display gives them; the simulation
//! wants exactly [`TICK_RATE`] ticks per second. Feed each frame's elapsed time
//! in and run as many ticks as come out.

use crate::consts::{MAX_TICKS_PER_FRAME, TICK_RATE};

/// Longest frame we try to catch up on (seconds)
const MAX_FRAME_SECS: f64 = 0.1;

/// Accumulates wall time into whole ticks
#[derive(Debug, Clone)]
pub struct TickPacer {
    tick_secs: f64,
    accumulator: f64,
}

impl Default for TickPacer {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

impl TickPacer {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            tick_secs: 1.0 / f64::from(ticks_per_second.max(1)),
            accumulator: 0.0,
        }
    }

    /// Seconds per tick
    pub fn tick_secs(&self) -> f64 {
        self.tick_secs
    }

    /// Ticks to run for a frame that took `elapsed_secs`.
    ///
    /// Long stalls are clamped and capped at [`MAX_TICKS_PER_FRAME`] to prevent
    /// a spiral of death; the leftover fraction carries into the next frame.
    pub fn ticks_due(&mut self, elapsed_secs: f64) -> u32 {
        self.accumulator += elapsed_secs.clamp(0.0, MAX_FRAME_SECS);

        let mut ticks = 0;
        while self.accumulator >= self.tick_secs && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.tick_secs;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= self.tick_secs {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_frame_at_rate() {
        let mut pacer = TickPacer::default();
        let frame = pacer.tick_secs();
        let total: u32 = (0..60).map(|_| pacer.ticks_due(frame + 1e-9)).sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn test_fraction_carries_over() {
        let mut pacer = TickPacer::new(60);
        // 144 Hz display: some frames run no tick
        let ticks: Vec<u32> = (0..144).map(|_| pacer.ticks_due(1.0 / 144.0)).collect();
        assert!(ticks.contains(&0));
        let total: u32 = ticks.iter().sum();
        assert!((59..=60).contains(&total), "got {total}");
    }

    #[test]
    fn test_stall_is_capped() {
        let mut pacer = TickPacer::new(60);
        // Clamped to 0.1s worth of ticks
        let ticks = pacer.ticks_due(5.0);
        assert!((5..=6).contains(&ticks), "got {ticks}");

        let mut fast = TickPacer::new(1000);
        assert_eq!(fast.ticks_due(5.0), MAX_TICKS_PER_FRAME);
        // Backlog dropped, so the next short frame is not inflated
        assert_eq!(fast.ticks_due(0.0), 0);
        assert_eq!(fast.ticks_due(-1.0), 0);
    }
}
