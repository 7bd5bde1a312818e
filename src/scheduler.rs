/// Frame governor: decides on each display-refresh callback whether enough
/// wall-clock time has elapsed to advance one simulated tick.
///
/// Timestamps are milliseconds on any monotonic axis; the host feeds it
/// `Instant`-derived values, tests feed it literals. At most one tick fires
/// per callback, so a slow host makes the animation run slower instead of
/// bursting catch-up steps.
#[derive(Debug)]
pub struct FrameScheduler {
    running: bool,
    last_tick_ms: f64,
    tick_interval_ms: f64,
}

impl FrameScheduler {
    pub fn new(target_fps: u32) -> Self {
        Self {
            running: true,
            last_tick_ms: 0.0,
            tick_interval_ms: 1000.0 / target_fps.max(1) as f64,
        }
    }

    /// Returns true exactly when a tick should fire at `now_ms`, and records
    /// the tick time when it does.
    pub fn should_tick(&mut self, now_ms: f64) -> bool {
        if !self.running {
            return false;
        }
        if now_ms - self.last_tick_ms >= self.tick_interval_ms {
            self.last_tick_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pauses ticking; in-flight callbacks see `running == false` and do
    /// nothing. Idempotent, safe at any point in the lifecycle.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Resumes ticking after a `stop`. The next callback may tick
    /// immediately if the interval has already elapsed.
    pub fn resume(&mut self) {
        self.running = true;
    }
}
