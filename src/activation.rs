//! Double-activation (double-click / double-tap) detection.
//!
//! One timestamp per popup instance. Runs alongside the drag controller as
//! an independent observer of the same pointer stream; it only ever sees
//! pointer-ups the façade has already filtered to the header region with
//! the button cluster excluded.

use std::time::{Duration, Instant};

/// Two activations closer than this toggle maximize/restore.
pub const DOUBLE_ACTIVATION_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Default)]
pub struct ActivationDetector {
    last_activation: Option<Instant>,
}

impl ActivationDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one header activation. Returns true when it completes a
    /// double-activation; the timestamp is then cleared so a third rapid
    /// tap cannot re-trigger against the pair that just fired.
    pub fn observe(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_activation {
            let delta = now.saturating_duration_since(last);
            if delta > Duration::ZERO && delta < DOUBLE_ACTIVATION_WINDOW {
                self.last_activation = None;
                return true;
            }
        }
        self.last_activation = Some(now);
        false
    }

    pub fn reset(&mut self) {
        self.last_activation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_inside_the_window() {
        let mut detector = ActivationDetector::new();
        let t0 = Instant::now();
        assert!(!detector.observe(t0));
        assert!(detector.observe(t0 + Duration::from_millis(299)));
    }

    #[test]
    fn does_not_fire_outside_the_window() {
        let mut detector = ActivationDetector::new();
        let t0 = Instant::now();
        assert!(!detector.observe(t0));
        assert!(!detector.observe(t0 + Duration::from_millis(301)));
    }

    #[test]
    fn zero_delta_is_not_a_double() {
        let mut detector = ActivationDetector::new();
        let t0 = Instant::now();
        assert!(!detector.observe(t0));
        assert!(!detector.observe(t0));
    }

    #[test]
    fn firing_resets_the_timestamp() {
        let mut detector = ActivationDetector::new();
        let t0 = Instant::now();
        assert!(!detector.observe(t0));
        assert!(detector.observe(t0 + Duration::from_millis(100)));
        // The third rapid tap starts a fresh pair instead of re-triggering.
        assert!(!detector.observe(t0 + Duration::from_millis(200)));
        assert!(detector.observe(t0 + Duration::from_millis(250)));
    }
}
