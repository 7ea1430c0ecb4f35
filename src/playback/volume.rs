//! Output volume with a mute switch that keeps the stored level.

pub const DEFAULT_VOLUME: f64 = 1.0;

/// Bring persisted or user-entered values into `[0, 1]`.
///
/// Older settings stored whole percentages, so `2..=100` is scaled down.
/// Anything else outside the range is clamped.
pub fn normalize_volume(value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_VOLUME;
    }
    if value > 1.0 && value <= 100.0 && value.fract() == 0.0 {
        return value / 100.0;
    }
    value.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeControl {
    level: f64,
    muted: bool,
}

impl VolumeControl {
    pub fn new(level: f64) -> Self {
        Self {
            level: normalize_volume(level),
            muted: false,
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Slider input. Zero reads as muted, anything above unmutes.
    pub fn set_level(&mut self, level: f64) {
        if !level.is_finite() {
            return;
        }
        self.level = level.clamp(0.0, 1.0);
        self.muted = self.level == 0.0;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Value handed to the media element.
    pub fn output(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmute_restores_exact_level() {
        let mut volume = VolumeControl::new(0.37);
        volume.toggle_mute();
        assert_eq!(volume.output(), 0.0);
        assert_eq!(volume.level(), 0.37);
        volume.toggle_mute();
        assert_eq!(volume.output(), 0.37);
    }

    #[test]
    fn zero_level_marks_muted_and_positive_unmutes() {
        let mut volume = VolumeControl::new(0.5);
        volume.set_level(0.0);
        assert!(volume.is_muted());
        volume.set_level(0.2);
        assert!(!volume.is_muted());
        assert_eq!(volume.output(), 0.2);
    }

    #[test]
    fn levels_are_clamped() {
        let mut volume = VolumeControl::default();
        volume.set_level(3.0);
        assert_eq!(volume.level(), 1.0);
        volume.set_level(f64::NAN);
        assert_eq!(volume.level(), 1.0);
    }

    #[test]
    fn normalize_scales_percentages() {
        assert_eq!(normalize_volume(80.0), 0.8);
        assert_eq!(normalize_volume(1.5), 1.0);
        assert_eq!(normalize_volume(250.0), 1.0);
        assert_eq!(normalize_volume(0.4), 0.4);
        assert_eq!(normalize_volume(-1.0), 0.0);
        assert_eq!(normalize_volume(f64::INFINITY), DEFAULT_VOLUME);
    }
}
