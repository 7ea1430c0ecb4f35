use super::picked_file::{read_picked_file, PickedFile};
use super::song_selector::SongSelector;
use crate::api::*;
use crate::components::{AppSession, Icon};
use dioxus::prelude::*;

/// Create (no `existing`) or edit a playlist. Song picking is only offered on
/// create; the detail view adds songs afterwards.
#[component]
pub fn PlaylistDialog(
    existing: Option<Playlist>,
    songs: Vec<Song>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<Playlist>,
) -> Element {
    let app = use_context::<AppSession>();
    let is_edit = existing.is_some();
    let existing_for_init = existing.clone();
    let mut name = use_signal(|| {
        existing_for_init
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_default()
    });
    let existing_for_desc = existing.clone();
    let mut description = use_signal(|| {
        existing_for_desc
            .as_ref()
            .and_then(|p| p.description.clone())
            .unwrap_or_default()
    });
    let mut cover = use_signal(|| None::<PickedFile>);
    let selected = use_signal(Vec::<String>::new);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let on_cover_change = move |evt: FormEvent| async move {
        match read_picked_file(&evt).await {
            Ok(Some(file)) if file.is_image() => cover.set(Some(file)),
            Ok(Some(_)) => error.set(Some("Cover must be an image".to_string())),
            Ok(None) => cover.set(None),
            Err(message) => error.set(Some(message)),
        }
    };

    let existing_for_save = existing.clone();
    let on_save = move |_| {
        let existing = existing_for_save.clone();
        async move {
            if saving() {
                return;
            }
            let trimmed = name().trim().to_string();
            if trimmed.is_empty() {
                error.set(Some("Playlist name is required".to_string()));
                return;
            }
            saving.set(true);
            error.set(None);

            let client = app.client();
            let mut cover_image = existing.as_ref().and_then(|p| p.cover_image.clone());
            if let Some(file) = cover() {
                match client
                    .upload_cover_image(&file.name, file.bytes, &file.content_type)
                    .await
                {
                    Ok(url) => cover_image = Some(url),
                    Err(err) => {
                        tracing::warn!(error = %err, "cover upload failed");
                        error.set(Some(format!("Cover upload failed: {err}")));
                        saving.set(false);
                        return;
                    }
                }
            }

            let draft = PlaylistDraft {
                name: trimmed,
                description: Some(description()),
                cover_image,
            };
            let result = match existing.as_ref() {
                Some(playlist) => client.update_playlist(&playlist.id, &draft).await,
                None => client.create_playlist(&draft, &selected()).await,
            };
            saving.set(false);
            match result {
                Ok(playlist) => on_saved.call(playlist),
                Err(err) => {
                    tracing::warn!(error = %err, "saving playlist failed");
                    error.set(Some(err.to_string()));
                }
            }
        }
    };

    rsx! {
        div { class: "fixed inset-0 z-50 bg-black/70 backdrop-blur-sm flex items-center justify-center p-4",
            div { class: "w-full max-w-lg bg-zinc-900 border border-zinc-800 rounded-2xl shadow-2xl",
                div { class: "flex items-center justify-between px-6 py-4 border-b border-zinc-800",
                    h2 { class: "text-lg font-semibold text-white",
                        if is_edit { "Edit playlist" } else { "New playlist" }
                    }
                    button {
                        r#type: "button",
                        class: "p-1 text-zinc-400 hover:text-white",
                        onclick: move |_| on_close.call(()),
                        Icon { name: "x".to_string(), class: "w-5 h-5".to_string() }
                    }
                }

                div { class: "px-6 py-4 space-y-4 max-h-[70vh] overflow-y-auto",
                    div {
                        label { class: "block text-sm text-zinc-400 mb-1", "Name" }
                        input {
                            class: "w-full px-3 py-2 bg-zinc-950 border border-zinc-800 rounded-lg text-white focus:outline-none focus:border-emerald-500/50",
                            value: "{name}",
                            oninput: move |e| name.set(e.value()),
                        }
                    }
                    div {
                        label { class: "block text-sm text-zinc-400 mb-1", "Description" }
                        textarea {
                            class: "w-full px-3 py-2 bg-zinc-950 border border-zinc-800 rounded-lg text-white focus:outline-none focus:border-emerald-500/50",
                            rows: "3",
                            value: "{description}",
                            oninput: move |e| description.set(e.value()),
                        }
                    }
                    div {
                        label { class: "block text-sm text-zinc-400 mb-1", "Cover image" }
                        input {
                            r#type: "file",
                            accept: "image/*",
                            class: "block w-full text-sm text-zinc-400 file:mr-3 file:px-3 file:py-1.5 file:rounded-lg file:border-0 file:bg-zinc-800 file:text-white",
                            onchange: on_cover_change,
                        }
                    }
                    if !is_edit && !songs.is_empty() {
                        div {
                            label { class: "block text-sm text-zinc-400 mb-1", "Songs" }
                            SongSelector { songs: songs.clone(), selected }
                        }
                    }
                    if let Some(message) = error() {
                        p { class: "text-sm text-red-400", "{message}" }
                    }
                }

                div { class: "flex justify-end gap-2 px-6 py-4 border-t border-zinc-800",
                    button {
                        r#type: "button",
                        class: "px-4 py-2 rounded-lg text-sm text-zinc-300 hover:text-white",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        r#type: "button",
                        disabled: saving(),
                        class: "px-4 py-2 rounded-lg text-sm font-medium bg-emerald-500 hover:bg-emerald-400 text-black disabled:opacity-50",
                        onclick: on_save,
                        if saving() { "Saving..." } else if is_edit { "Save" } else { "Create" }
                    }
                }
            }
        }
    }
}
