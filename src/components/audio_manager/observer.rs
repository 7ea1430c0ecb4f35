//! Turns periodic media element snapshots into controller events.

use crate::playback::MediaEvent;
use serde::Deserialize;

/// `HAVE_CURRENT_DATA`: enough data to render the current position.
const READY_STATE_CURRENT_DATA: u16 = 2;
const TIME_EPSILON: f64 = 0.2;
const DURATION_EPSILON: f64 = 0.5;
/// Consecutive samples before a play/pause flip is believed.
const STATE_STREAK: u8 = 2;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaSnapshot {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub current_time: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub ended: bool,
    #[serde(default)]
    pub ready_state: u16,
    #[serde(default)]
    pub error_code: Option<u16>,
    /// Generation of the load the element held when sampled. A new value
    /// starts a fresh observation even for the same source.
    #[serde(skip)]
    pub load_id: u64,
}

fn media_error_message(code: u16) -> String {
    match code {
        1 => "Playback was aborted before the audio loaded.".to_string(),
        2 => "Network error while loading this track.".to_string(),
        3 => "Audio playback failed due to a decode error.".to_string(),
        4 => "Failed to load audio because no supported source was found.".to_string(),
        other => format!("Audio playback failed (code {other})."),
    }
}

#[derive(Debug, Default)]
pub struct MediaObserver {
    src: String,
    load_id: u64,
    last_time: Option<f64>,
    last_duration: Option<f64>,
    ready_reported: bool,
    ended_reported: bool,
    error_reported: Option<u16>,
    reported_paused: Option<bool>,
    paused_streak: u8,
    playing_streak: u8,
}

impl MediaObserver {
    pub fn observe(&mut self, snapshot: &MediaSnapshot) -> Vec<MediaEvent> {
        if snapshot.src.is_empty() {
            *self = Self::default();
            return Vec::new();
        }
        if snapshot.src != self.src || snapshot.load_id != self.load_id {
            *self = Self {
                src: snapshot.src.clone(),
                load_id: snapshot.load_id,
                ..Self::default()
            };
        }

        let mut events = Vec::new();

        if let Some(code) = snapshot.error_code {
            if self.error_reported != Some(code) {
                self.error_reported = Some(code);
                events.push(MediaEvent::Error(media_error_message(code)));
            }
            return events;
        }

        if !self.ready_reported && snapshot.ready_state >= READY_STATE_CURRENT_DATA {
            self.ready_reported = true;
            events.push(MediaEvent::Ready);
        }

        let duration = snapshot.duration;
        if duration.is_finite()
            && duration > 0.0
            && self
                .last_duration
                .map(|last| (last - duration).abs() > DURATION_EPSILON)
                .unwrap_or(true)
        {
            self.last_duration = Some(duration);
            events.push(MediaEvent::Duration(duration));
        }

        let time = snapshot.current_time;
        if time.is_finite()
            && self
                .last_time
                .map(|last| (last - time).abs() >= TIME_EPSILON)
                .unwrap_or(true)
        {
            self.last_time = Some(time);
            events.push(MediaEvent::Time(time));
        }

        if snapshot.paused {
            self.paused_streak = self.paused_streak.saturating_add(1);
            self.playing_streak = 0;
        } else {
            self.playing_streak = self.playing_streak.saturating_add(1);
            self.paused_streak = 0;
        }
        if self.playing_streak >= STATE_STREAK && self.reported_paused != Some(false) {
            self.reported_paused = Some(false);
            events.push(MediaEvent::Playing);
        } else if self.paused_streak >= STATE_STREAK
            && self.reported_paused == Some(false)
            && !snapshot.ended
        {
            self.reported_paused = Some(true);
            events.push(MediaEvent::Paused);
        }

        if snapshot.ended {
            if !self.ended_reported {
                self.ended_reported = true;
                self.reported_paused = Some(true);
                events.push(MediaEvent::Ended);
            }
        } else {
            self.ended_reported = false;
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(time: f64, paused: bool) -> MediaSnapshot {
        MediaSnapshot {
            src: "https://cdn.example/a.mp3".into(),
            current_time: time,
            duration: 120.0,
            paused,
            ended: false,
            ready_state: 4,
            error_code: None,
            load_id: 1,
        }
    }

    #[test]
    fn first_sample_reports_ready_duration_and_time() {
        let mut observer = MediaObserver::default();
        let events = observer.observe(&snap(0.0, true));
        assert_eq!(
            events,
            vec![
                MediaEvent::Ready,
                MediaEvent::Duration(120.0),
                MediaEvent::Time(0.0)
            ]
        );
        assert!(observer.observe(&snap(0.1, true)).is_empty());
    }

    #[test]
    fn play_state_needs_two_samples() {
        let mut observer = MediaObserver::default();
        observer.observe(&snap(0.0, true));
        assert!(!observer.observe(&snap(0.0, false)).contains(&MediaEvent::Playing));
        assert!(observer.observe(&snap(0.4, false)).contains(&MediaEvent::Playing));
        assert!(!observer.observe(&snap(0.8, true)).contains(&MediaEvent::Paused));
        assert!(observer.observe(&snap(0.8, true)).contains(&MediaEvent::Paused));
    }

    #[test]
    fn ended_reported_once_until_restart() {
        let mut observer = MediaObserver::default();
        let mut ended = snap(120.0, true);
        ended.ended = true;
        assert!(observer.observe(&ended).contains(&MediaEvent::Ended));
        assert!(!observer.observe(&ended).contains(&MediaEvent::Ended));
        observer.observe(&snap(0.0, false));
        assert!(observer.observe(&ended).contains(&MediaEvent::Ended));
    }

    #[test]
    fn new_source_resets_tracking() {
        let mut observer = MediaObserver::default();
        observer.observe(&snap(10.0, false));
        let mut next = snap(0.0, true);
        next.src = "https://cdn.example/b.mp3".into();
        assert!(observer.observe(&next).contains(&MediaEvent::Ready));
    }

    #[test]
    fn reloading_same_source_reports_ready_again() {
        let mut observer = MediaObserver::default();
        assert!(observer.observe(&snap(30.0, false)).contains(&MediaEvent::Ready));
        assert!(!observer.observe(&snap(30.4, false)).contains(&MediaEvent::Ready));
        let mut reloaded = snap(0.0, true);
        reloaded.load_id = 2;
        assert!(observer.observe(&reloaded).contains(&MediaEvent::Ready));
    }

    #[test]
    fn errors_are_reported_once() {
        let mut observer = MediaObserver::default();
        let mut failed = snap(0.0, true);
        failed.error_code = Some(4);
        assert_eq!(
            observer.observe(&failed),
            vec![MediaEvent::Error(media_error_message(4))]
        );
        assert!(observer.observe(&failed).is_empty());
    }

    #[test]
    fn empty_source_is_ignored() {
        let mut observer = MediaObserver::default();
        assert!(observer.observe(&MediaSnapshot::default()).is_empty());
    }
}
