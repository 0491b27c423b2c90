//! Fixed logical timestep over variable wall-clock frames.

use std::time::Duration;

/// Accumulates elapsed wall time and hands it out in whole steps.
///
/// A step is only consumed once strictly more than one step's worth of time
/// has accumulated; the remainder carries over to the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    step: Duration,
    accumulated: Duration,
}

impl FixedTimestep {
    pub fn new(step: Duration) -> Self {
        assert!(!step.is_zero(), "fixed timestep must be non-zero");
        Self {
            step,
            accumulated: Duration::ZERO,
        }
    }

    /// Step of `1 / hz` seconds.
    pub fn from_hz(hz: u32) -> Self {
        assert!(hz > 0, "update rate must be positive");
        Self::new(Duration::from_secs(1) / hz)
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Time carried over, always at most one step.
    pub fn remainder(&self) -> Duration {
        self.accumulated
    }

    /// Add `elapsed` and return how many steps to run now.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut steps = 0;
        while self.accumulated > self.step {
            self.accumulated -= self.step;
            steps += 1;
        }
        steps
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::from_hz(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_and_a_half_steps_run_two() {
        let mut clock = FixedTimestep::new(Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_millis(25)), 2);
        assert_eq!(clock.remainder(), Duration::from_millis(5));
    }

    #[test]
    fn partial_step_is_kept() {
        let mut clock = FixedTimestep::new(Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_millis(5)), 0);
        assert_eq!(clock.advance(Duration::from_millis(6)), 1);
        assert_eq!(clock.remainder(), Duration::from_millis(1));
    }

    #[test]
    fn exact_step_waits_for_more_time() {
        let mut clock = FixedTimestep::new(Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_millis(10)), 0);
        assert_eq!(clock.advance(Duration::from_nanos(1)), 1);
    }

    #[test]
    fn default_runs_at_sixty_hertz() {
        assert_eq!(FixedTimestep::default().step(), Duration::from_secs(1) / 60);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn zero_step_panics() {
        FixedTimestep::new(Duration::ZERO);
    }
}
