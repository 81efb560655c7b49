//! Progress bar animation state

use std::time::{Duration, Instant};

/// Eases the progress gauge from its previous ratio to the current one
#[derive(Debug, Clone, Copy)]
pub struct ProgressAnimation {
    from: f64,
    to: f64,
    started: Instant,
}

impl ProgressAnimation {
    /// Duration of one slide between two ratios
    const DURATION: Duration = Duration::from_millis(250);

    /// A settled gauge showing `ratio`
    pub fn at(ratio: f64, now: Instant) -> Self {
        let ratio = ratio.clamp(0.0, 1.0);
        Self {
            from: ratio,
            to: ratio,
            started: now,
        }
    }

    /// Start sliding towards `ratio` from wherever the gauge is now
    pub fn retarget(&mut self, ratio: f64, now: Instant) {
        self.from = self.ratio(now);
        self.to = ratio.clamp(0.0, 1.0);
        self.started = now;
    }

    /// Ratio to draw at `now`
    pub fn ratio(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= Self::DURATION {
            return self.to;
        }
        let progress = elapsed.as_secs_f32() / Self::DURATION.as_secs_f32();
        // Cubic ease-out for smooth deceleration
        let eased = simple_easing::cubic_out(progress) as f64;
        (self.from + (self.to - self.from) * eased).clamp(0.0, 1.0)
    }

    /// Whether the gauge is still moving (drives faster redraws)
    pub fn is_animating(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) < Self::DURATION && self.from != self.to
    }
}
