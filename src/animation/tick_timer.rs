// src/animation/tick_timer.rs
//
// Fixed-period repeating timer. The host feeds elapsed time in and gets
// back how many whole ticks fell due. Stopped timers never fire.

use std::time::Duration;

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(20);

// a stalled host should not replay seconds worth of ticks in one frame
const MAX_TICKS_PER_UPDATE: u32 = 16;

#[derive(Debug, Clone)]
pub struct TickTimer {
    period: f32,
    timer: f32,
    running: bool,
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        let period = period.as_secs_f32();
        Self {
            period: if period > 0.0 {
                period
            } else {
                DEFAULT_TICK_PERIOD.as_secs_f32()
            },
            timer: 0.0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            tracing::debug!("tick timer started ({:.0} ms)", self.period * 1000.0);
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!("tick timer stopped");
        }
        self.running = false;
        self.timer = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs_f32(self.period)
    }

    /// Accumulates `dt` seconds and returns the number of ticks that are due.
    pub fn update(&mut self, dt: f32) -> u32 {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        self.timer += dt;
        let due = (self.timer / self.period).floor();
        self.timer -= due * self.period;

        if due >= MAX_TICKS_PER_UPDATE as f32 {
            self.timer = 0.0;
            MAX_TICKS_PER_UPDATE
        } else {
            due as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = TickTimer::default();
        assert_eq!(timer.update(1.0), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_ticks_accumulate_across_updates() {
        let mut timer = TickTimer::new(Duration::from_millis(20));
        timer.start();
        assert_eq!(timer.update(0.015), 0);
        assert_eq!(timer.update(0.010), 1);
        assert_eq!(timer.update(0.045), 2);
    }

    #[test]
    fn test_large_gap_is_capped() {
        let mut timer = TickTimer::default();
        timer.start();
        assert_eq!(timer.update(5.0), MAX_TICKS_PER_UPDATE);
        // leftover time is dropped after a stall
        assert_eq!(timer.update(0.001), 0);
    }

    #[test]
    fn test_stop_clears_partial_tick() {
        let mut timer = TickTimer::default();
        timer.start();
        timer.update(0.019);
        timer.stop();
        timer.start();
        assert_eq!(timer.update(0.002), 0);
    }

    #[test]
    fn test_zero_period_falls_back_to_default() {
        let timer = TickTimer::new(Duration::ZERO);
        assert_eq!(timer.period(), Duration::from_secs_f32(DEFAULT_TICK_PERIOD.as_secs_f32()));
    }
}
