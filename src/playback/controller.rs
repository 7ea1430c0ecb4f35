//! Playback controller.
//!
//! Owns the state of the single audio element: which song is loaded, where it
//! is in its playlist, repeat/shuffle/volume, play counting and likes. Media
//! events and user commands go in; `PlayerEffect`s come out for the audio
//! driver to apply. Nothing here touches the DOM or the network.

use crate::api::models::Song;
use crate::playback::cursor::PlaylistCursor;
use crate::playback::effects::{BackendRequest, LoadToken, MediaCommand, MediaEvent, PlayerEffect};
use crate::playback::likes::{LikeSnapshot, LikeTicket, LikeTracker, LIKE_RECONCILE_WINDOW};
use crate::playback::play_count::PlayCountGate;
use crate::playback::status::PlayerStatus;
use crate::playback::volume::VolumeControl;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Elapsed seconds after which "previous" restarts the current track.
pub const SCRUB_BACK_THRESHOLD: f64 = 3.0;

/// Songs the player walks through, in playback order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaylistContext {
    pub id: String,
    pub name: String,
    pub songs: Vec<Song>,
}

impl PlaylistContext {
    pub fn new(id: impl Into<String>, name: impl Into<String>, songs: Vec<Song>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            songs,
        }
    }

    fn same_sequence(&self, other: &PlaylistContext) -> bool {
        self.id == other.id
            && self.songs.len() == other.songs.len()
            && self
                .songs
                .iter()
                .zip(other.songs.iter())
                .all(|(a, b)| a.id == b.id)
    }
}

pub struct PlaybackController {
    status: PlayerStatus,
    song: Option<Song>,
    playlist: Option<PlaylistContext>,
    cursor: PlaylistCursor,
    position: f64,
    duration: f64,
    repeat: bool,
    shuffle: bool,
    volume: VolumeControl,
    play_gate: PlayCountGate,
    likes: LikeTracker,
    generation: u64,
    awaiting_autoplay: bool,
    error: Option<String>,
    rng: StdRng,
}

impl PlaybackController {
    pub fn new(volume: f64) -> Self {
        Self::with_rng(volume, StdRng::from_entropy())
    }

    pub fn with_rng(volume: f64, rng: StdRng) -> Self {
        Self {
            status: PlayerStatus::Idle,
            song: None,
            playlist: None,
            cursor: PlaylistCursor::default(),
            position: 0.0,
            duration: 0.0,
            repeat: false,
            shuffle: false,
            volume: VolumeControl::new(volume),
            play_gate: PlayCountGate::default(),
            likes: LikeTracker::default(),
            generation: 0,
            awaiting_autoplay: false,
            error: None,
            rng,
        }
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    pub fn playlist(&self) -> Option<&PlaylistContext> {
        self.playlist.as_ref()
    }

    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    pub fn shuffle_order(&self) -> &[usize] {
        self.cursor.order()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn volume(&self) -> VolumeControl {
        self.volume
    }

    pub fn likes(&self) -> LikeSnapshot {
        self.likes.snapshot()
    }

    pub fn like_pending(&self) -> bool {
        self.likes.is_pending()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when next/previous can change track.
    pub fn has_playlist(&self) -> bool {
        self.cursor.can_traverse()
    }

    pub fn token(&self) -> Option<LoadToken> {
        self.song.as_ref().map(|song| LoadToken {
            song_id: song.id.clone(),
            generation: self.generation,
        })
    }

    pub fn is_current(&self, token: &LoadToken) -> bool {
        token.generation == self.generation
            && self.song.as_ref().map(|s| s.id == token.song_id).unwrap_or(false)
    }

    /// Start playing `song`, optionally as part of `playlist`.
    ///
    /// A playlist that differs from the attached one resets traversal and
    /// draws a fresh shuffle order; picking another song of the same playlist
    /// keeps the order.
    pub fn play(&mut self, song: Song, playlist: Option<PlaylistContext>) -> Vec<PlayerEffect> {
        match playlist {
            Some(playlist) => {
                let index = playlist
                    .songs
                    .iter()
                    .position(|s| s.id == song.id)
                    .unwrap_or(0);
                let unchanged = self
                    .playlist
                    .as_ref()
                    .map(|current| current.same_sequence(&playlist))
                    .unwrap_or(false);
                if unchanged {
                    self.cursor.jump_to(index);
                } else {
                    self.cursor =
                        PlaylistCursor::new(playlist.songs.len(), index, self.shuffle, &mut self.rng);
                }
                self.playlist = Some(playlist);
            }
            None => {
                self.playlist = None;
                self.cursor = PlaylistCursor::default();
            }
        }
        self.assign(song)
    }

    /// Stop playback and forget the loaded song.
    pub fn close(&mut self) -> Vec<PlayerEffect> {
        self.generation += 1;
        self.status = PlayerStatus::Idle;
        self.song = None;
        self.playlist = None;
        self.cursor = PlaylistCursor::default();
        self.position = 0.0;
        self.duration = 0.0;
        self.awaiting_autoplay = false;
        self.error = None;
        self.play_gate.reset();
        self.likes.reset(0);
        vec![PlayerEffect::Media(MediaCommand::Unload)]
    }

    fn assign(&mut self, song: Song) -> Vec<PlayerEffect> {
        self.generation += 1;
        self.status = PlayerStatus::Loading;
        self.position = 0.0;
        self.duration = song.duration as f64;
        self.awaiting_autoplay = true;
        self.error = None;
        self.play_gate.reset();
        self.likes.reset(song.likes);

        tracing::debug!(song_id = %song.id, generation = self.generation, "loading song");

        let token = LoadToken {
            song_id: song.id.clone(),
            generation: self.generation,
        };
        let effects = vec![
            PlayerEffect::Media(MediaCommand::Load {
                url: song.audio_url.clone(),
                generation: self.generation,
            }),
            PlayerEffect::Media(MediaCommand::SetVolume(self.volume.output())),
            PlayerEffect::Backend(BackendRequest::FetchLikeState { token }),
            PlayerEffect::SongChanged(song.clone()),
        ];
        self.song = Some(song);
        effects
    }

    fn assign_index(&mut self, index: usize) -> Vec<PlayerEffect> {
        let next = self
            .playlist
            .as_ref()
            .and_then(|playlist| playlist.songs.get(index))
            .cloned();
        match next {
            Some(song) => self.assign(song),
            None => Vec::new(),
        }
    }

    /// Media event sampled while the element held load `generation`.
    /// Samples from an earlier load are dropped.
    pub fn on_media_sample(&mut self, generation: u64, event: MediaEvent) -> Vec<PlayerEffect> {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, ?event, "dropping stale media sample");
            return Vec::new();
        }
        self.on_media_event(event)
    }

    /// Route an observed media event to its handler.
    pub fn on_media_event(&mut self, event: MediaEvent) -> Vec<PlayerEffect> {
        match event {
            MediaEvent::Ready => self.on_media_ready(),
            MediaEvent::Duration(duration) => {
                self.on_duration(duration);
                Vec::new()
            }
            MediaEvent::Time(position) => self.on_time_update(position),
            MediaEvent::Playing => {
                self.on_media_play();
                Vec::new()
            }
            MediaEvent::Paused => {
                self.on_media_pause();
                Vec::new()
            }
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::Error(message) => {
                self.on_media_error(message);
                Vec::new()
            }
        }
    }

    /// First readiness signal for the current load.
    pub fn on_media_ready(&mut self) -> Vec<PlayerEffect> {
        if !self.awaiting_autoplay {
            return Vec::new();
        }
        self.awaiting_autoplay = false;
        vec![PlayerEffect::Media(MediaCommand::AttemptAutoplay)]
    }

    pub fn on_autoplay_result(&mut self, started: bool) {
        if self.status != PlayerStatus::Loading {
            return;
        }
        self.status = if started {
            PlayerStatus::Playing
        } else {
            tracing::info!("autoplay blocked, waiting for the user");
            PlayerStatus::Paused
        };
    }

    pub fn on_duration(&mut self, duration: f64) {
        if duration.is_finite() && duration > 0.0 {
            self.duration = duration;
        }
    }

    pub fn on_time_update(&mut self, position: f64) -> Vec<PlayerEffect> {
        if self.song.is_none() || !position.is_finite() {
            return Vec::new();
        }
        self.position = position.max(0.0);

        if !self.play_gate.observe(self.position, self.duration) {
            return Vec::new();
        }
        let Some(token) = self.token() else {
            return Vec::new();
        };
        let plays = match self.song.as_mut() {
            Some(song) => {
                song.plays += 1;
                song.plays
            }
            None => return Vec::new(),
        };
        vec![PlayerEffect::Backend(BackendRequest::RecordPlay { token, plays })]
    }

    pub fn on_media_play(&mut self) {
        if self.song.is_some() {
            self.awaiting_autoplay = false;
            self.status = PlayerStatus::Playing;
        }
    }

    pub fn on_media_pause(&mut self) {
        if self.status == PlayerStatus::Playing {
            self.status = PlayerStatus::Paused;
        }
    }

    pub fn on_media_error(&mut self, message: String) {
        tracing::warn!(%message, "media error");
        self.error = Some(message);
        self.awaiting_autoplay = false;
        if self.status == PlayerStatus::Loading || self.status == PlayerStatus::Playing {
            self.status = PlayerStatus::Paused;
        }
    }

    /// End of media: repeat, advance, or park at zero.
    pub fn on_ended(&mut self) -> Vec<PlayerEffect> {
        if self.song.is_none() {
            return Vec::new();
        }
        self.status = PlayerStatus::Ended;

        if self.repeat {
            self.position = 0.0;
            self.status = PlayerStatus::Playing;
            return vec![
                PlayerEffect::Media(MediaCommand::Seek(0.0)),
                PlayerEffect::Media(MediaCommand::Play),
            ];
        }

        if self.cursor.can_traverse() {
            return self.next();
        }

        self.position = 0.0;
        self.status = PlayerStatus::Paused;
        vec![PlayerEffect::Media(MediaCommand::Seek(0.0))]
    }

    pub fn toggle_play(&mut self) -> Vec<PlayerEffect> {
        match self.status {
            PlayerStatus::Idle => Vec::new(),
            PlayerStatus::Playing => vec![PlayerEffect::Media(MediaCommand::Pause)],
            PlayerStatus::Loading | PlayerStatus::Paused | PlayerStatus::Ended => {
                self.awaiting_autoplay = false;
                vec![PlayerEffect::Media(MediaCommand::Play)]
            }
        }
    }

    pub fn seek(&mut self, position: f64) -> Vec<PlayerEffect> {
        if self.song.is_none() || !position.is_finite() {
            return Vec::new();
        }
        let upper = if self.duration > 0.0 {
            self.duration
        } else {
            f64::MAX
        };
        self.position = position.clamp(0.0, upper);
        vec![PlayerEffect::Media(MediaCommand::Seek(self.position))]
    }

    pub fn next(&mut self) -> Vec<PlayerEffect> {
        match self.cursor.next() {
            Some(index) => self.assign_index(index),
            None => Vec::new(),
        }
    }

    pub fn previous(&mut self) -> Vec<PlayerEffect> {
        if self.song.is_some() && self.position > SCRUB_BACK_THRESHOLD {
            self.position = 0.0;
            return vec![PlayerEffect::Media(MediaCommand::Seek(0.0))];
        }
        match self.cursor.previous() {
            Some(index) => self.assign_index(index),
            None => Vec::new(),
        }
    }

    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.cursor.set_shuffle(self.shuffle, &mut self.rng);
    }

    /// Apply saved player settings.
    pub fn restore_settings(
        &mut self,
        volume: f64,
        muted: bool,
        repeat: bool,
        shuffle: bool,
    ) -> Vec<PlayerEffect> {
        self.volume = VolumeControl::new(volume);
        if muted {
            self.volume.toggle_mute();
        }
        self.repeat = repeat;
        if shuffle != self.shuffle {
            self.shuffle = shuffle;
            self.cursor.set_shuffle(shuffle, &mut self.rng);
        }
        vec![PlayerEffect::Media(MediaCommand::SetVolume(
            self.volume.output(),
        ))]
    }

    pub fn set_volume(&mut self, level: f64) -> Vec<PlayerEffect> {
        self.volume.set_level(level);
        vec![PlayerEffect::Media(MediaCommand::SetVolume(
            self.volume.output(),
        ))]
    }

    pub fn toggle_mute(&mut self) -> Vec<PlayerEffect> {
        self.volume.toggle_mute();
        vec![PlayerEffect::Media(MediaCommand::SetVolume(
            self.volume.output(),
        ))]
    }

    pub fn toggle_like(&mut self, signed_in: bool) -> Vec<PlayerEffect> {
        let Some(token) = self.token() else {
            return Vec::new();
        };
        if !signed_in {
            return vec![PlayerEffect::Alert("Please log in to like songs".to_string())];
        }
        let Some(intent) = self.likes.begin_toggle() else {
            return Vec::new();
        };
        let request = if intent.like {
            BackendRequest::Like {
                token,
                ticket: intent.ticket,
            }
        } else {
            BackendRequest::Unlike {
                token,
                ticket: intent.ticket,
            }
        };
        vec![PlayerEffect::Backend(request)]
    }

    pub fn on_like_confirmed(&mut self, token: &LoadToken, ticket: LikeTicket) -> Vec<PlayerEffect> {
        if !self.is_current(token) || !self.likes.confirm(ticket) {
            return Vec::new();
        }
        vec![PlayerEffect::Backend(BackendRequest::FetchLikeCount {
            token: token.clone(),
            delay: Some(LIKE_RECONCILE_WINDOW),
        })]
    }

    pub fn on_like_failed(&mut self, token: &LoadToken, ticket: LikeTicket) -> Vec<PlayerEffect> {
        if !self.is_current(token) || !self.likes.rollback(ticket) {
            return Vec::new();
        }
        vec![
            PlayerEffect::Alert("Failed to update like status".to_string()),
            PlayerEffect::Backend(BackendRequest::FetchLikeState {
                token: token.clone(),
            }),
        ]
    }

    /// Authoritative like relation and counter. Answers for an earlier load
    /// are dropped.
    pub fn on_like_state(&mut self, token: &LoadToken, liked: bool, count: u64) -> bool {
        if !self.is_current(token) {
            tracing::debug!(song_id = %token.song_id, "dropping stale like state");
            return false;
        }
        let liked_applied = self.likes.apply_liked(liked);
        let count_applied = self.likes.apply_count(count);
        liked_applied && count_applied
    }

    pub fn on_like_count(&mut self, token: &LoadToken, count: u64) -> bool {
        if !self.is_current(token) {
            tracing::debug!(song_id = %token.song_id, "dropping stale like count");
            return false;
        }
        if self.likes.apply_count(count) {
            if let Some(song) = self.song.as_mut() {
                song.likes = count;
            }
            true
        } else {
            false
        }
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(crate::playback::volume::DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn song(id: &str) -> Song {
        Song {
            id: id.to_string(),
            title: format!("Title {id}"),
            artist: "Artist".to_string(),
            audio_url: format!("https://cdn.example/{id}.mp3"),
            duration: 200,
            likes: 3,
            ..Default::default()
        }
    }

    fn playlist(n: usize) -> PlaylistContext {
        PlaylistContext::new(
            "pl",
            "Mix",
            (0..n).map(|i| song(&format!("s{i}"))).collect(),
        )
    }

    fn controller() -> PlaybackController {
        PlaybackController::with_rng(0.8, StdRng::seed_from_u64(42))
    }

    fn backend(effects: &[PlayerEffect]) -> Vec<BackendRequest> {
        effects
            .iter()
            .filter_map(|e| match e {
                PlayerEffect::Backend(req) => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn load_then_autoplay_success_reaches_playing() {
        let mut player = controller();
        let effects = player.play(song("a"), None);
        assert_eq!(player.status(), PlayerStatus::Loading);
        assert!(effects.contains(&PlayerEffect::Media(MediaCommand::Load {
            url: "https://cdn.example/a.mp3".into(),
            generation: player.token().unwrap().generation,
        })));

        assert_eq!(
            player.on_media_ready(),
            vec![PlayerEffect::Media(MediaCommand::AttemptAutoplay)]
        );
        // Later readiness signals do not retry.
        assert!(player.on_media_ready().is_empty());

        player.on_autoplay_result(true);
        assert_eq!(player.status(), PlayerStatus::Playing);
    }

    #[test]
    fn blocked_autoplay_leaves_player_paused() {
        let mut player = controller();
        player.play(song("a"), None);
        player.on_media_ready();
        player.on_autoplay_result(false);
        assert_eq!(player.status(), PlayerStatus::Paused);

        assert_eq!(
            player.toggle_play(),
            vec![PlayerEffect::Media(MediaCommand::Play)]
        );
        player.on_media_play();
        assert_eq!(player.status(), PlayerStatus::Playing);
        player.on_media_pause();
        assert_eq!(player.status(), PlayerStatus::Paused);
    }

    #[test]
    fn next_n_times_returns_to_start() {
        let mut player = controller();
        let list = playlist(4);
        player.play(list.songs[0].clone(), Some(list));
        for _ in 0..4 {
            player.next();
        }
        assert_eq!(player.index(), 0);
        assert_eq!(player.song().unwrap().id, "s0");
    }

    #[test]
    fn previous_after_three_seconds_restarts_track() {
        let mut player = controller();
        let list = playlist(3);
        player.play(list.songs[1].clone(), Some(list));
        player.on_time_update(12.0);

        let effects = player.previous();
        assert_eq!(effects, vec![PlayerEffect::Media(MediaCommand::Seek(0.0))]);
        assert_eq!(player.index(), 1);
        assert_eq!(player.position(), 0.0);

        // Now within the first seconds, previous moves back.
        player.previous();
        assert_eq!(player.index(), 0);
    }

    #[test]
    fn scrub_back_works_without_playlist() {
        let mut player = controller();
        player.play(song("solo"), None);
        player.on_time_update(45.0);
        assert_eq!(
            player.previous(),
            vec![PlayerEffect::Media(MediaCommand::Seek(0.0))]
        );
        assert!(player.previous().is_empty());
        assert!(player.next().is_empty());
    }

    #[test]
    fn shuffle_toggle_regenerates_full_permutation() {
        let mut player = controller();
        let list = playlist(9);
        player.play(list.songs[2].clone(), Some(list));
        player.toggle_shuffle();

        let order = player.shuffle_order().to_vec();
        let unique: HashSet<usize> = order.iter().copied().collect();
        assert_eq!(order.len(), 9);
        assert_eq!(unique, (0..9).collect::<HashSet<usize>>());

        let pos = order.iter().position(|&i| i == 2).unwrap();
        player.next();
        assert_eq!(player.index(), order[(pos + 1) % 9]);
        // Advancing inside the playlist keeps the permutation.
        assert_eq!(player.shuffle_order(), order.as_slice());
    }

    #[test]
    fn picking_from_same_playlist_keeps_order() {
        let mut player = controller();
        let list = playlist(6);
        player.toggle_shuffle();
        player.play(list.songs[0].clone(), Some(list.clone()));
        let order = player.shuffle_order().to_vec();
        player.play(list.songs[4].clone(), Some(list));
        assert_eq!(player.shuffle_order(), order.as_slice());
        assert_eq!(player.index(), 4);
    }

    #[test]
    fn play_count_fires_once_per_load() {
        let mut player = controller();
        player.play(song("a"), None);

        let mut fired = 0;
        for t in [1.0, 10.0, 29.0, 30.0, 31.0, 60.0, 150.0] {
            fired += backend(&player.on_time_update(t))
                .iter()
                .filter(|r| matches!(r, BackendRequest::RecordPlay { .. }))
                .count();
        }
        assert_eq!(fired, 1);

        // Reloading the same song arms the gate again.
        player.play(song("a"), None);
        let effects = player.on_time_update(35.0);
        assert!(matches!(
            backend(&effects).as_slice(),
            [BackendRequest::RecordPlay { plays: 1, .. }]
        ));
    }

    #[test]
    fn repeat_restarts_on_end() {
        let mut player = controller();
        player.play(song("a"), None);
        player.toggle_repeat();
        let effects = player.on_ended();
        assert_eq!(
            effects,
            vec![
                PlayerEffect::Media(MediaCommand::Seek(0.0)),
                PlayerEffect::Media(MediaCommand::Play)
            ]
        );
        assert_eq!(player.status(), PlayerStatus::Playing);
    }

    #[test]
    fn end_advances_through_playlist() {
        let mut player = controller();
        let list = playlist(2);
        player.play(list.songs[1].clone(), Some(list));
        let effects = player.on_ended();
        assert_eq!(player.song().unwrap().id, "s0");
        assert_eq!(player.status(), PlayerStatus::Loading);
        assert!(effects
            .iter()
            .any(|e| matches!(e, PlayerEffect::SongChanged(s) if s.id == "s0")));
    }

    #[test]
    fn end_without_playlist_parks_at_zero() {
        let mut player = controller();
        player.play(song("a"), None);
        player.on_media_play();
        player.on_time_update(199.0);
        player.on_ended();
        assert_eq!(player.status(), PlayerStatus::Paused);
        assert_eq!(player.position(), 0.0);
    }

    #[test]
    fn mute_round_trip_keeps_volume() {
        let mut player = controller();
        player.set_volume(0.63);
        assert_eq!(
            player.toggle_mute(),
            vec![PlayerEffect::Media(MediaCommand::SetVolume(0.0))]
        );
        assert_eq!(
            player.toggle_mute(),
            vec![PlayerEffect::Media(MediaCommand::SetVolume(0.63))]
        );
    }

    #[test]
    fn like_flow_confirms_then_reconciles() {
        let mut player = controller();
        player.play(song("a"), None);
        let token = player.token().unwrap();
        player.on_like_state(&token, false, 3);

        let effects = player.toggle_like(true);
        let ticket = match backend(&effects).as_slice() {
            [BackendRequest::Like { ticket, .. }] => *ticket,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(player.likes(), LikeSnapshot { liked: true, count: 4 });

        let follow_up = player.on_like_confirmed(&token, ticket);
        assert!(matches!(
            backend(&follow_up).as_slice(),
            [BackendRequest::FetchLikeCount { delay: Some(_), .. }]
        ));

        // Another session liked it too.
        assert!(player.on_like_count(&token, 5));
        assert_eq!(player.likes().count, 5);

        let effects = player.toggle_like(true);
        let ticket = match backend(&effects).as_slice() {
            [BackendRequest::Unlike { ticket, .. }] => *ticket,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(player.likes(), LikeSnapshot { liked: false, count: 4 });
        player.on_like_confirmed(&token, ticket);
        assert!(player.on_like_count(&token, 4));
    }

    #[test]
    fn like_failure_rolls_back_and_requeries() {
        let mut player = controller();
        player.play(song("a"), None);
        let token = player.token().unwrap();

        let effects = player.toggle_like(true);
        let ticket = match backend(&effects).as_slice() {
            [BackendRequest::Like { ticket, .. }] => *ticket,
            other => panic!("unexpected {other:?}"),
        };
        let effects = player.on_like_failed(&token, ticket);
        assert_eq!(player.likes(), LikeSnapshot { liked: false, count: 3 });
        assert!(effects
            .iter()
            .any(|e| matches!(e, PlayerEffect::Alert(_))));
        assert!(matches!(
            backend(&effects).as_slice(),
            [BackendRequest::FetchLikeState { .. }]
        ));
    }

    #[test]
    fn like_requires_user() {
        let mut player = controller();
        player.play(song("a"), None);
        let effects = player.toggle_like(false);
        assert_eq!(
            effects,
            vec![PlayerEffect::Alert("Please log in to like songs".into())]
        );
        assert!(!player.like_pending());
    }

    #[test]
    fn stale_like_count_is_dropped_after_song_change() {
        let mut player = controller();
        let list = playlist(2);
        player.play(list.songs[0].clone(), Some(list));
        let old = player.token().unwrap();
        player.next();

        assert!(!player.on_like_count(&old, 999));
        assert_eq!(player.likes().count, 3);

        // Same song reloaded still counts as a new load.
        player.previous();
        assert!(!player.on_like_state(&old, true, 50));
    }

    #[test]
    fn close_returns_to_idle() {
        let mut player = controller();
        player.play(song("a"), None);
        assert_eq!(
            player.close(),
            vec![PlayerEffect::Media(MediaCommand::Unload)]
        );
        assert_eq!(player.status(), PlayerStatus::Idle);
        assert!(player.toggle_play().is_empty());
        assert!(player.token().is_none());
    }

    #[test]
    fn media_events_drive_state() {
        let mut c = controller();
        c.play(song("a"), None);
        assert_eq!(
            c.on_media_event(MediaEvent::Ready),
            vec![PlayerEffect::Media(MediaCommand::AttemptAutoplay)]
        );
        c.on_media_event(MediaEvent::Playing);
        assert_eq!(c.status(), PlayerStatus::Playing);
        c.on_media_event(MediaEvent::Duration(180.5));
        assert_eq!(c.duration(), 180.5);
        c.on_media_event(MediaEvent::Paused);
        assert_eq!(c.status(), PlayerStatus::Paused);
        c.on_media_event(MediaEvent::Error("decode".into()));
        assert_eq!(c.error(), Some("decode"));
    }

    #[test]
    fn samples_from_previous_load_are_ignored() {
        let mut player = controller();
        player.play(song("a"), None);
        let first = player.token().unwrap().generation;
        player.on_media_sample(first, MediaEvent::Time(150.0));
        assert_eq!(player.position(), 150.0);

        player.play(song("b"), None);
        // The element still reports the old track until the load is applied.
        assert!(player.on_media_sample(first, MediaEvent::Time(150.2)).is_empty());
        assert!(player.on_media_sample(first, MediaEvent::Ended).is_empty());
        assert!(player.on_media_sample(first, MediaEvent::Playing).is_empty());
        assert_eq!(player.status(), PlayerStatus::Loading);
        assert_eq!(player.position(), 0.0);
        assert_eq!(player.song().unwrap().id, "b");
        assert!(player.previous().is_empty());

        let current = player.token().unwrap().generation;
        assert_eq!(
            player.on_media_sample(current, MediaEvent::Ready),
            vec![PlayerEffect::Media(MediaCommand::AttemptAutoplay)]
        );
        let effects = player.on_media_sample(current, MediaEvent::Time(31.0));
        assert!(matches!(
            backend(&effects).as_slice(),
            [BackendRequest::RecordPlay { plays: 1, .. }]
        ));
    }

    #[test]
    fn restored_settings_apply() {
        let mut c = controller();
        let effects = c.restore_settings(60.0, true, true, true);
        assert_eq!(effects, vec![PlayerEffect::Media(MediaCommand::SetVolume(0.0))]);
        assert_eq!(c.volume().level(), 0.6);
        assert!(c.repeat());
        assert!(c.shuffle());
        assert!(c.volume().is_muted());
    }
}
