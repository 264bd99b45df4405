use std::time::{Duration, Instant};

/// Rates over one logging window of the run loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub ticks_per_second: f32,
    pub frame_time_ms: f32,
    pub dropped_ticks: u32,
    pub sprite_count: usize,
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    window_start: Instant,
    window: Duration,
    frames: u32,
    ticks: u32,
    dropped_ticks: u32,
    frame_time_total: Duration,
}

impl MetricsAccumulator {
    pub(crate) fn new(window: Duration, now: Instant) -> Self {
        Self {
            window_start: now,
            window,
            frames: 0,
            ticks: 0,
            dropped_ticks: 0,
            frame_time_total: Duration::ZERO,
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration) {
        self.frames = self.frames.saturating_add(1);
        self.frame_time_total = self.frame_time_total.saturating_add(frame_dt);
    }

    pub(crate) fn record_ticks(&mut self, count: u32) {
        self.ticks = self.ticks.saturating_add(count);
    }

    pub(crate) fn record_dropped(&mut self, count: u32) {
        self.dropped_ticks = self.dropped_ticks.saturating_add(count);
    }

    /// Closes the window once it has run its length; `None` before that.
    pub(crate) fn maybe_snapshot(
        &mut self,
        now: Instant,
        sprite_count: usize,
    ) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.window {
            return None;
        }

        let seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let frame_time_ms = match self.frames {
            0 => 0.0,
            frames => self.frame_time_total.as_secs_f32() * 1000.0 / frames as f32,
        };
        let snapshot = LoopMetricsSnapshot {
            fps: self.frames as f32 / seconds,
            ticks_per_second: self.ticks as f32 / seconds,
            frame_time_ms,
            dropped_ticks: self.dropped_ticks,
            sprite_count,
        };

        *self = Self::new(self.window, now);
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_reports_rates() {
        let start = Instant::now();
        let mut metrics = MetricsAccumulator::new(Duration::from_secs(1), start);
        for _ in 0..4 {
            metrics.record_frame(Duration::from_millis(25));
        }
        metrics.record_ticks(20);
        metrics.record_dropped(3);

        let snapshot = metrics
            .maybe_snapshot(start + Duration::from_secs(2), 7)
            .expect("window elapsed");

        assert!((snapshot.fps - 2.0).abs() < 0.01);
        assert!((snapshot.ticks_per_second - 10.0).abs() < 0.01);
        assert!((snapshot.frame_time_ms - 25.0).abs() < 0.01);
        assert_eq!(snapshot.dropped_ticks, 3);
        assert_eq!(snapshot.sprite_count, 7);
    }

    #[test]
    fn window_resets_after_snapshot() {
        let start = Instant::now();
        let mut metrics = MetricsAccumulator::new(Duration::from_millis(500), start);
        metrics.record_ticks(5);
        assert!(metrics
            .maybe_snapshot(start + Duration::from_millis(100), 0)
            .is_none());

        let later = start + Duration::from_millis(600);
        assert!(metrics.maybe_snapshot(later, 0).is_some());
        let next = metrics
            .maybe_snapshot(later + Duration::from_millis(500), 0)
            .expect("second window");
        assert_eq!(next.ticks_per_second, 0.0);
        assert_eq!(next.frame_time_ms, 0.0);
    }
}
