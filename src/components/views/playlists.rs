use super::home::{EmptyHint, Loading};
use super::playlist_dialog::PlaylistDialog;
use super::report;
use crate::api::*;
use crate::components::{use_require_user, AppSession, AppView, Icon};
use dioxus::prelude::*;

#[component]
pub fn PlaylistsView() -> Element {
    let _user = use_require_user();
    let app = use_context::<AppSession>();
    let navigator = use_navigator();
    let mut creating = use_signal(|| false);

    let mut playlists = use_resource(move || {
        let client = app.client();
        async move { report(client.playlists(None).await, "playlists") }
    });
    // Songs for the create dialog's selector
    let songs = use_resource(move || {
        let client = app.client();
        async move { report(client.all_songs().await, "songs") }
    });

    let selectable = songs
        .read()
        .as_ref()
        .and_then(|result| result.as_ref().ok().cloned())
        .unwrap_or_default();

    rsx! {
        div { class: "space-y-8",
            header { class: "page-header flex items-end justify-between gap-4",
                div {
                    h1 { class: "text-3xl font-bold text-white mb-2", "Playlists" }
                    p { class: "text-zinc-400", "Collections built by the community" }
                }
                button {
                    r#type: "button",
                    class: "flex items-center gap-2 px-4 py-2 rounded-full bg-emerald-500 hover:bg-emerald-400 text-black font-medium",
                    onclick: move |_| creating.set(true),
                    Icon { name: "plus".to_string(), class: "w-4 h-4".to_string() }
                    "New playlist"
                }
            }

            match playlists() {
                Some(Ok(items)) if !items.is_empty() => rsx! {
                    div { class: "grid grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-5 gap-4",
                        for playlist in items {
                            PlaylistCard {
                                key: "{playlist.id}",
                                playlist: playlist.clone(),
                                onclick: move |_| {
                                    navigator.push(AppView::PlaylistDetailView {
                                        id: playlist.id.clone(),
                                    });
                                },
                            }
                        }
                    }
                },
                Some(Ok(_)) => rsx! {
                    EmptyHint { icon: "playlist", text: "No playlists yet. Create the first one." }
                },
                Some(Err(message)) => rsx! {
                    p { class: "text-sm text-red-400", "Could not load playlists: {message}" }
                },
                None => rsx! { Loading {} },
            }

            if creating() {
                PlaylistDialog {
                    existing: None,
                    songs: selectable,
                    on_close: move |_| creating.set(false),
                    on_saved: move |playlist: Playlist| {
                        creating.set(false);
                        playlists.restart();
                        navigator.push(AppView::PlaylistDetailView { id: playlist.id });
                    },
                }
            }
        }
    }
}

#[component]
pub fn PlaylistCard(playlist: Playlist, onclick: EventHandler<MouseEvent>) -> Element {
    let count = playlist.song_count();

    rsx! {
        button {
            class: "group text-left",
            onclick: move |e| onclick.call(e),
            // Playlist cover
            div { class: "aspect-square rounded-xl bg-zinc-800 mb-3 overflow-hidden relative shadow-lg group-hover:shadow-xl transition-shadow",
                {match playlist.cover_image.as_ref() {
                    Some(url) => rsx! {
                        img { class: "w-full h-full object-cover", src: "{url}" }
                    },
                    None => rsx! {
                        div { class: "w-full h-full flex items-center justify-center bg-gradient-to-br from-emerald-600 to-teal-700",
                            Icon { name: "playlist".to_string(), class: "w-12 h-12 text-white/70".to_string() }
                        }
                    }
                }}
                div { class: "absolute inset-0 bg-black/40 opacity-0 group-hover:opacity-100 transition-opacity flex items-center justify-center",
                    div { class: "w-12 h-12 rounded-full bg-emerald-500 flex items-center justify-center shadow-xl transform scale-90 group-hover:scale-100 transition-transform",
                        Icon { name: "play".to_string(), class: "w-5 h-5 text-white ml-0.5".to_string() }
                    }
                }
            }
            p { class: "font-medium text-white text-sm truncate group-hover:text-emerald-400 transition-colors", "{playlist.name}" }
            p { class: "text-xs text-zinc-400",
                if count == 1 { "1 song" } else { "{count} songs" }
            }
        }
    }
}
