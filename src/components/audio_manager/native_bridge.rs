// Desktop/mobile media backend: the webview hosts the <audio> element and is
// driven through a small script bridge.

#[cfg(not(target_arch = "wasm32"))]
const NATIVE_AUDIO_BOOTSTRAP_JS: &str = r#"
(function () {
  if (window.__tuneitinAudio) return true;
  const audio = document.createElement("audio");
  audio.id = "tuneitin-audio";
  audio.preload = "metadata";
  document.body.appendChild(audio);
  const finite = (value) => (Number.isFinite(value) ? value : 0);
  window.__tuneitinAudio = {
    audio,
    apply(command) {
      switch (command.type) {
        case "load":
          audio.src = command.url;
          audio.load();
          break;
        case "unload":
          audio.pause();
          audio.removeAttribute("src");
          audio.load();
          break;
        case "play":
          audio.play().catch(() => {});
          break;
        case "pause":
          audio.pause();
          break;
        case "seek":
          audio.currentTime = command.position;
          break;
        case "volume":
          audio.volume = command.level;
          break;
      }
    },
    snapshot() {
      return {
        src: audio.getAttribute("src") || "",
        current_time: finite(audio.currentTime),
        duration: finite(audio.duration),
        paused: audio.paused,
        ended: audio.ended,
        ready_state: audio.readyState,
        error_code: audio.error ? audio.error.code : null,
      };
    },
  };
  return true;
})();
"#;

#[cfg(not(target_arch = "wasm32"))]
fn ensure_native_audio_bridge() {
    let _ = document::eval(NATIVE_AUDIO_BOOTSTRAP_JS);
}

#[cfg(not(target_arch = "wasm32"))]
fn bridge_command(command: &MediaCommand) -> Option<serde_json::Value> {
    let value = match command {
        MediaCommand::Load { url, .. } => serde_json::json!({ "type": "load", "url": url }),
        MediaCommand::Unload => serde_json::json!({ "type": "unload" }),
        MediaCommand::Play => serde_json::json!({ "type": "play" }),
        MediaCommand::Pause => serde_json::json!({ "type": "pause" }),
        MediaCommand::Seek(position) => serde_json::json!({ "type": "seek", "position": position }),
        MediaCommand::SetVolume(level) => serde_json::json!({ "type": "volume", "level": level }),
        MediaCommand::AttemptAutoplay => return None,
    };
    Some(value)
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_media_command(command: &MediaCommand) {
    let Some(value) = bridge_command(command) else {
        return;
    };
    ensure_native_audio_bridge();
    let script = format!(
        r#"(function () {{
            const bridge = window.__tuneitinAudio;
            if (!bridge) return false;
            bridge.apply({value});
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
}

#[cfg(not(target_arch = "wasm32"))]
async fn media_snapshot() -> Option<MediaSnapshot> {
    ensure_native_audio_bridge();
    let eval = document::eval(
        r#"return (function () {
            const bridge = window.__tuneitinAudio;
            return bridge ? bridge.snapshot() : { src: "" };
        })();"#,
    );
    eval.join::<MediaSnapshot>().await.ok()
}

#[cfg(not(target_arch = "wasm32"))]
async fn start_playback() -> bool {
    ensure_native_audio_bridge();
    let eval = document::eval(
        r#"return await (async function () {
            const bridge = window.__tuneitinAudio;
            if (!bridge) return false;
            try {
              await bridge.audio.play();
              return true;
            } catch (_) {
              return false;
            }
        })();"#,
    );
    eval.join::<bool>().await.unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
