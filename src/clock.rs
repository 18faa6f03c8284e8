/// Per-game step scheduler layered on the frame cadence.
///
/// Each game owns one `StepClock` and feeds it elapsed frame time from
/// `update()`. The clock fires at most one step per frame, so commands and
/// steps stay strictly serialized on the main loop. A new interval (Tetris
/// level-up) takes effect on the next scheduled step, never the pending one.
/// `stop` is unconditional and idempotent: once stopped, no step fires until
/// `start`, and any accumulated partial step is discarded.
pub struct StepClock {
    interval_ms: u64,
    pending_interval: Option<u64>,
    elapsed_ms: u64,
    running: bool,
}

impl StepClock {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            pending_interval: None,
            elapsed_ms: 0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Schedule a new step interval. The step currently accumulating keeps the
    /// old interval; the new one applies from the following step.
    pub fn set_interval(&mut self, interval_ms: u64) {
        self.pending_interval = Some(interval_ms);
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Advance by one frame's worth of time. Returns true when a step is due.
    pub fn advance(&mut self, frame_ms: u64) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms += frame_ms;
        if self.elapsed_ms < self.interval_ms {
            return false;
        }
        self.elapsed_ms -= self.interval_ms;
        if let Some(next) = self.pending_interval.take() {
            self.interval_ms = next;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_steps_until_started() {
        let mut clock = StepClock::new(100);
        assert!(!clock.advance(500));
    }

    #[test]
    fn fires_once_per_elapsed_interval() {
        let mut clock = StepClock::new(100);
        clock.start();
        let mut steps = 0;
        for _ in 0..25 {
            if clock.advance(16) {
                steps += 1;
            }
        }
        // 400 ms of frames at a 100 ms interval
        assert_eq!(steps, 4);
    }

    #[test]
    fn stop_cancels_pending_step() {
        let mut clock = StepClock::new(100);
        clock.start();
        clock.advance(96);
        clock.stop();
        // The partial step accumulated before the stop must not fire.
        assert!(!clock.advance(16));
        clock.start();
        assert!(!clock.advance(16));
        assert!(clock.advance(96));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut clock = StepClock::new(100);
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
        assert!(!clock.advance(1000));
    }

    #[test]
    fn interval_change_applies_on_next_scheduled_step() {
        let mut clock = StepClock::new(100);
        clock.start();
        clock.advance(50);
        clock.set_interval(200);
        // The step already accumulating still fires on the old interval.
        assert!(clock.advance(50));
        // From here the new interval is in effect.
        assert!(!clock.advance(150));
        assert!(clock.advance(50));
    }
}
