use super::picked_file::{read_picked_file, PickedFile};
use crate::api::models::format_duration;
use crate::api::*;
use crate::api::Result;
use crate::components::{use_require_user, AppSession, AppView, Icon};
use crate::metadata::{read_audio_metadata, title_from_file_name};
use dioxus::prelude::*;

const INPUT_CLASS: &str = "w-full px-3 py-2.5 bg-zinc-900 border border-zinc-800 rounded-lg text-white placeholder-zinc-500 focus:outline-none focus:border-emerald-500/50";

#[component]
pub fn UploadView() -> Element {
    let user = use_require_user();
    let app = use_context::<AppSession>();
    let navigator = use_navigator();

    let mut title = use_signal(String::new);
    let mut artist = use_signal(String::new);
    let mut album = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut audio = use_signal(|| None::<PickedFile>);
    let mut cover = use_signal(|| None::<PickedFile>);
    let mut duration = use_signal(|| 0u32);
    let mut progress = use_signal(|| None::<u8>);
    let mut error = use_signal(|| None::<String>);

    let on_audio_change = move |evt: FormEvent| async move {
        error.set(None);
        let file = match read_picked_file(&evt).await {
            Ok(Some(file)) => file,
            Ok(None) => {
                audio.set(None);
                return;
            }
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        if !file.is_audio() {
            error.set(Some("Please choose an audio file".to_string()));
            return;
        }

        match read_audio_metadata(&file.bytes) {
            Ok(meta) => {
                duration.set(meta.duration_secs);
                if title().trim().is_empty() {
                    title.set(meta.title.unwrap_or_else(|| title_from_file_name(&file.name)));
                }
                if artist().trim().is_empty() {
                    if let Some(tagged) = meta.artist {
                        artist.set(tagged);
                    }
                }
                if album().trim().is_empty() {
                    if let Some(tagged) = meta.album {
                        album.set(tagged);
                    }
                }
            }
            Err(err) => {
                tracing::warn!(file = %file.name, error = %err, "could not read audio metadata");
                duration.set(0);
                if title().trim().is_empty() {
                    title.set(title_from_file_name(&file.name));
                }
            }
        }
        audio.set(Some(file));
    };

    let on_cover_change = move |evt: FormEvent| async move {
        match read_picked_file(&evt).await {
            Ok(Some(file)) if file.is_image() => cover.set(Some(file)),
            Ok(Some(_)) => error.set(Some("Cover must be an image".to_string())),
            Ok(None) => cover.set(None),
            Err(message) => error.set(Some(message)),
        }
    };

    let on_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        if progress().is_some() {
            return;
        }
        let Some(file) = audio() else {
            error.set(Some("Please choose an audio file".to_string()));
            return;
        };
        if title().trim().is_empty() || artist().trim().is_empty() {
            error.set(Some("Title and artist are required".to_string()));
            return;
        }
        error.set(None);
        progress.set(Some(0));

        match upload_song(app.client(), file, cover(), &mut progress, |user_id| NewSong {
            title: title().trim().to_string(),
            artist: artist().trim().to_string(),
            album: non_empty(album()),
            description: non_empty(description()),
            audio_url: String::new(),
            cover_image: None,
            user_id,
            duration: duration(),
            plays: 0,
            likes: 0,
        })
        .await
        {
            Ok(song) => {
                tracing::info!(song_id = %song.id, "song uploaded");
                navigator.push(AppView::SongsView {});
            }
            Err(err) => {
                tracing::warn!(error = %err, "upload failed");
                error.set(Some(format!("Upload failed: {err}")));
                progress.set(None);
            }
        }
    };

    if user.is_none() {
        return rsx! {};
    }

    let audio_name = audio.read().as_ref().map(|f| f.name.clone());
    let cover_name = cover.read().as_ref().map(|f| f.name.clone());
    let uploading = progress().is_some();

    rsx! {
        div { class: "max-w-2xl mx-auto space-y-8",
            header { class: "page-header",
                h1 { class: "text-3xl font-bold text-white mb-2", "Upload a song" }
                p { class: "text-zinc-400", "MP3, WAV, OGG, FLAC or M4A" }
            }

            form { class: "space-y-5", onsubmit: on_submit,
                FilePicker {
                    label: "Audio file",
                    accept: "audio/*",
                    icon: "music",
                    chosen: audio_name,
                    detail: if duration() > 0 { Some(format_duration(duration())) } else { None },
                    onchange: on_audio_change,
                }
                FilePicker {
                    label: "Cover image (optional)",
                    accept: "image/*",
                    icon: "upload",
                    chosen: cover_name,
                    detail: None,
                    onchange: on_cover_change,
                }

                div { class: "grid sm:grid-cols-2 gap-4",
                    input {
                        class: INPUT_CLASS,
                        placeholder: "Title",
                        value: "{title}",
                        oninput: move |e| title.set(e.value()),
                    }
                    input {
                        class: INPUT_CLASS,
                        placeholder: "Artist",
                        value: "{artist}",
                        oninput: move |e| artist.set(e.value()),
                    }
                }
                input {
                    class: INPUT_CLASS,
                    placeholder: "Album (optional)",
                    value: "{album}",
                    oninput: move |e| album.set(e.value()),
                }
                textarea {
                    class: INPUT_CLASS,
                    rows: "3",
                    placeholder: "Description (optional)",
                    value: "{description}",
                    oninput: move |e| description.set(e.value()),
                }

                if let Some(message) = error() {
                    p { class: "text-sm text-red-400", "{message}" }
                }

                if let Some(percent) = progress() {
                    div { class: "space-y-1",
                        div { class: "h-2 bg-zinc-800 rounded-full overflow-hidden",
                            div {
                                class: "h-full bg-emerald-500 transition-all",
                                style: "width: {percent}%",
                            }
                        }
                        p { class: "text-xs text-zinc-400 text-right", "{percent}%" }
                    }
                }

                button {
                    r#type: "submit",
                    disabled: uploading,
                    class: "w-full py-3 rounded-lg bg-emerald-500 hover:bg-emerald-400 text-black font-semibold disabled:opacity-50 flex items-center justify-center gap-2",
                    if uploading {
                        Icon { name: "loader".to_string(), class: "w-4 h-4 animate-spin".to_string() }
                        "Uploading..."
                    } else {
                        Icon { name: "upload".to_string(), class: "w-4 h-4".to_string() }
                        "Upload"
                    }
                }
            }
        }
    }
}

/// Audio first, then the optional cover, then the row. Progress moves in
/// quarters as each step finishes.
async fn upload_song(
    client: SupabaseClient,
    audio: PickedFile,
    cover: Option<PickedFile>,
    progress: &mut Signal<Option<u8>>,
    build: impl FnOnce(String) -> NewSong,
) -> Result<Song> {
    let user_id = client.user_id()?.to_string();

    let audio_url = client
        .upload_song_audio(&audio.name, audio.bytes, &audio.content_type)
        .await?;
    progress.set(Some(25));

    let cover_image = match cover {
        Some(image) => Some(
            client
                .upload_cover_image(&image.name, image.bytes, &image.content_type)
                .await?,
        ),
        None => None,
    };
    progress.set(Some(50));

    let mut row = build(user_id);
    row.audio_url = audio_url;
    row.cover_image = cover_image;
    progress.set(Some(75));

    let song = client.create_song(&row).await?;
    progress.set(Some(100));
    Ok(song)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[component]
fn FilePicker(
    label: String,
    accept: String,
    icon: String,
    chosen: Option<String>,
    detail: Option<String>,
    onchange: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        label { class: "flex items-center gap-4 p-4 rounded-xl border border-dashed border-zinc-700 hover:border-emerald-500/50 cursor-pointer transition-colors",
            div { class: "w-10 h-10 rounded-lg bg-zinc-800 flex items-center justify-center",
                Icon { name: icon, class: "w-5 h-5 text-zinc-400".to_string() }
            }
            div { class: "flex-1 min-w-0",
                p { class: "text-sm text-white", "{label}" }
                p { class: "text-xs text-zinc-500 truncate",
                    {chosen.unwrap_or_else(|| "No file chosen".to_string())}
                    if let Some(detail) = detail {
                        " • {detail}"
                    }
                }
            }
            input {
                r#type: "file",
                accept: "{accept}",
                class: "hidden",
                onchange: move |evt| onchange.call(evt),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::non_empty;

    #[test]
    fn blank_optional_fields_are_dropped() {
        assert_eq!(non_empty("   ".to_string()), None);
        assert_eq!(non_empty(" Live ".to_string()), Some("Live".to_string()));
    }
}
