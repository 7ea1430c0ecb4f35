//! Audio driver: applies controller effects to the media element and the
//! backend, and feeds media state back into the controller.

use crate::api::{Result, SupabaseClient};
use crate::components::{show_alert, AppSession, PlayerHandle};
use crate::playback::{BackendRequest, LikeTicket, LoadToken, MediaCommand, PlayerEffect};
use dioxus::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

mod observer;

pub use observer::{MediaObserver, MediaSnapshot};

const POLL_INTERVAL_MS: u64 = 200;

/// Generation of the last load command applied to the media element.
static MEDIA_GENERATION: AtomicU64 = AtomicU64::new(0);

// Browser (wasm) media backend.
include!("web_backend.rs");
// Webview script bridge for native targets.
include!("native_bridge.rs");

#[component]
pub fn AudioController() -> Element {
    let player = use_context::<PlayerHandle>();
    let app = use_context::<AppSession>();

    use_hook(move || {
        spawn(async move {
            let mut observer = MediaObserver::default();
            loop {
                sleep_ms(POLL_INTERVAL_MS).await;
                // Read before sampling so a sample never claims a newer load.
                let load_id = MEDIA_GENERATION.load(Ordering::Relaxed);
                let Some(mut snapshot) = media_snapshot().await else {
                    continue;
                };
                snapshot.load_id = load_id;
                for event in observer.observe(&snapshot) {
                    player.dispatch(move |controller| controller.on_media_sample(load_id, event));
                }
            }
        })
    });

    use_effect(move || {
        let _ = player.pulse();
        for effect in player.take_effects() {
            apply_effect(effect, player, app);
        }
    });

    rsx! {}
}

fn apply_effect(effect: PlayerEffect, player: PlayerHandle, app: AppSession) {
    match effect {
        PlayerEffect::Media(MediaCommand::AttemptAutoplay) => {
            spawn(async move {
                let started = start_playback().await;
                player.dispatch(move |controller| {
                    controller.on_autoplay_result(started);
                    Vec::new()
                });
            });
        }
        PlayerEffect::Media(command) => {
            if let MediaCommand::Load { generation, .. } = command {
                MEDIA_GENERATION.store(generation, Ordering::Relaxed);
            }
            apply_media_command(&command);
        }
        PlayerEffect::Backend(request) => {
            let client = app.client();
            spawn(run_backend_request(request, client, player));
        }
        PlayerEffect::SongChanged(song) => {
            tracing::info!(song_id = %song.id, title = %song.title, "now playing");
        }
        PlayerEffect::Alert(message) => show_alert(&message),
    }
}

async fn run_backend_request(request: BackendRequest, client: SupabaseClient, player: PlayerHandle) {
    match request {
        BackendRequest::FetchLikeState { token } => match client.like_state(&token.song_id).await {
            Ok((liked, count)) => player.dispatch(move |controller| {
                controller.on_like_state(&token, liked, count);
                Vec::new()
            }),
            Err(err) => tracing::warn!(song_id = %token.song_id, error = %err, "failed to load like state"),
        },
        BackendRequest::FetchLikeCount { token, delay } => {
            if let Some(delay) = delay {
                sleep_ms(delay.as_millis() as u64).await;
            }
            match client.song_like_count(&token.song_id).await {
                Ok(count) => player.dispatch(move |controller| {
                    controller.on_like_count(&token, count);
                    Vec::new()
                }),
                Err(err) => {
                    tracing::warn!(song_id = %token.song_id, error = %err, "failed to refresh like count")
                }
            }
        }
        BackendRequest::RecordPlay { token, plays } => {
            if let Err(err) = client.record_play(&token.song_id, plays).await {
                tracing::warn!(song_id = %token.song_id, error = %err, "failed to record play");
            }
        }
        BackendRequest::Like { token, ticket } => {
            let result = client.like_song(&token.song_id).await;
            settle_like(result, token, ticket, player);
        }
        BackendRequest::Unlike { token, ticket } => {
            let result = client.unlike_song(&token.song_id).await;
            settle_like(result, token, ticket, player);
        }
    }
}

fn settle_like(result: Result<()>, token: LoadToken, ticket: LikeTicket, player: PlayerHandle) {
    match result {
        Ok(()) => player.dispatch(move |controller| controller.on_like_confirmed(&token, ticket)),
        Err(err) => {
            tracing::warn!(song_id = %token.song_id, error = %err, "failed to update like");
            player.dispatch(move |controller| controller.on_like_failed(&token, ticket));
        }
    }
}
