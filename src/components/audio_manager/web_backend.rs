// Browser media backend: a single hidden <audio> element driven through web-sys.

#[cfg(target_arch = "wasm32")]
const AUDIO_ELEMENT_ID: &str = "tuneitin-audio";

/// The shared audio element, created on first use.
#[cfg(target_arch = "wasm32")]
fn audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

#[cfg(target_arch = "wasm32")]
async fn media_snapshot() -> Option<MediaSnapshot> {
    let audio = audio_element()?;
    Some(MediaSnapshot {
        src: audio.get_attribute("src").unwrap_or_default(),
        current_time: audio.current_time(),
        duration: audio.duration(),
        paused: audio.paused(),
        ended: audio.ended(),
        ready_state: audio.ready_state(),
        error_code: audio.error().map(|error| error.code()),
    })
}

#[cfg(target_arch = "wasm32")]
fn apply_media_command(command: &MediaCommand) {
    let Some(audio) = audio_element() else {
        tracing::warn!("audio element unavailable");
        return;
    };
    match command {
        MediaCommand::Load { url, .. } => {
            audio.set_src(url);
            audio.load();
        }
        MediaCommand::Unload => {
            let _ = audio.pause();
            let _ = audio.remove_attribute("src");
            audio.load();
        }
        MediaCommand::Play => {
            if let Ok(promise) = audio.play() {
                spawn(async move {
                    if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        tracing::debug!(?err, "play request rejected");
                    }
                });
            }
        }
        MediaCommand::Pause => {
            let _ = audio.pause();
        }
        MediaCommand::Seek(position) => audio.set_current_time(*position),
        MediaCommand::SetVolume(level) => audio.set_volume(*level),
        // Resolved through `start_playback`.
        MediaCommand::AttemptAutoplay => {}
    }
}

/// Try to start playback and report whether the browser allowed it.
#[cfg(target_arch = "wasm32")]
async fn start_playback() -> bool {
    let Some(audio) = audio_element() else {
        return false;
    };
    match audio.play() {
        Ok(promise) => wasm_bindgen_futures::JsFuture::from(promise).await.is_ok(),
        Err(_) => false,
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
}
