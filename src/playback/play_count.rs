/// Seconds of listening after which a play is counted.
pub const PLAY_COUNT_MIN_SECONDS: f64 = 30.0;
/// Fraction of the track after which a play is counted.
pub const PLAY_COUNT_MIN_FRACTION: f64 = 0.5;

/// One-shot flag deciding when a load of a song counts as a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayCountGate {
    counted: bool,
}

impl PlayCountGate {
    pub fn reset(&mut self) {
        self.counted = false;
    }

    /// Returns `true` exactly once per reset, on the first observation that
    /// crosses either threshold. Unknown durations only use the time rule.
    pub fn observe(&mut self, elapsed: f64, duration: f64) -> bool {
        if self.counted || !elapsed.is_finite() {
            return false;
        }

        let by_time = elapsed >= PLAY_COUNT_MIN_SECONDS;
        let by_fraction =
            duration.is_finite() && duration > 0.0 && elapsed >= duration * PLAY_COUNT_MIN_FRACTION;

        if by_time || by_fraction {
            self.counted = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_past_thirty_seconds() {
        let mut gate = PlayCountGate::default();
        assert!(!gate.observe(12.0, 240.0));
        assert!(gate.observe(30.0, 240.0));
        assert!(!gate.observe(31.0, 240.0));
        assert!(!gate.observe(200.0, 240.0));
    }

    #[test]
    fn short_track_counts_at_half() {
        let mut gate = PlayCountGate::default();
        assert!(!gate.observe(9.0, 20.0));
        assert!(gate.observe(10.0, 20.0));
    }

    #[test]
    fn unknown_duration_uses_time_rule() {
        let mut gate = PlayCountGate::default();
        assert!(!gate.observe(5.0, f64::NAN));
        assert!(!gate.observe(5.0, 0.0));
        assert!(gate.observe(30.5, f64::NAN));
    }

    #[test]
    fn reset_rearms_the_gate() {
        let mut gate = PlayCountGate::default();
        assert!(gate.observe(40.0, 100.0));
        gate.reset();
        assert!(!gate.observe(10.0, 100.0));
        assert!(gate.observe(50.0, 100.0));
    }
}
