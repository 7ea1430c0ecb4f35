use super::home::{EmptyHint, Loading};
use super::report;
use super::song_row::SongRow;
use crate::api::Song;
use crate::components::{
    confirm_action, show_alert, use_require_user, AppSession, Icon, PlayerHandle,
};
use crate::playback::PlaylistContext;
use dioxus::prelude::*;

#[component]
pub fn SongsView() -> Element {
    let user = use_require_user();
    let app = use_context::<AppSession>();
    let player = use_context::<PlayerHandle>();
    let mut search = use_signal(String::new);

    let mut songs = use_resource(move || {
        let client = app.client();
        async move { report(client.all_songs().await, "songs") }
    });

    let query = search();
    let user_id = user.map(|user| user.id);

    let on_delete = move |song: Song| async move {
        if !confirm_action(&format!("Delete \"{}\"? This cannot be undone.", song.title)).await {
            return;
        }
        match app.client().delete_song(&song.id).await {
            Ok(()) => {
                tracing::info!(song_id = %song.id, "song deleted");
                songs.restart();
            }
            Err(err) => {
                tracing::warn!(song_id = %song.id, error = %err, "failed to delete song");
                show_alert(&format!("Could not delete song: {err}"));
            }
        }
    };

    rsx! {
        div { class: "space-y-6",
            header { class: "page-header flex flex-col sm:flex-row sm:items-end justify-between gap-4",
                div {
                    h1 { class: "text-3xl font-bold text-white mb-2", "Songs" }
                    p { class: "text-zinc-400", "Everything uploaded so far" }
                }
                div { class: "relative w-full sm:w-72",
                    Icon {
                        name: "search".to_string(),
                        class: "absolute left-3 top-1/2 -translate-y-1/2 w-4 h-4 text-zinc-500".to_string(),
                    }
                    input {
                        class: "w-full pl-9 pr-3 py-2 bg-zinc-900 border border-zinc-800 rounded-lg text-sm text-white placeholder-zinc-500 focus:outline-none focus:border-emerald-500/50",
                        placeholder: "Search by title, artist or album",
                        value: "{query}",
                        oninput: move |e| search.set(e.value()),
                    }
                }
            }

            match songs() {
                Some(Ok(all)) => {
                    let visible: Vec<_> = all
                        .iter()
                        .filter(|song| song.matches_query(&query))
                        .cloned()
                        .collect();
                    if visible.is_empty() {
                        rsx! { EmptyHint { icon: "music", text: "No songs found" } }
                    } else {
                        rsx! {
                            div { class: "space-y-1",
                                for (index, song) in visible.iter().cloned().enumerate() {
                                    SongRow {
                                        key: "{song.id}",
                                        song: song.clone(),
                                        index,
                                        on_play: {
                                            let visible = visible.clone();
                                            let song = song.clone();
                                            move |_| {
                                                let context = PlaylistContext::new(
                                                    "all-songs",
                                                    "All Songs",
                                                    visible.clone(),
                                                );
                                                player.play(song.clone(), Some(context));
                                            }
                                        },
                                        if user_id.is_some() && song.user_id == user_id {
                                            button {
                                                r#type: "button",
                                                title: "Delete",
                                                class: "p-1.5 ml-2 text-zinc-500 hover:text-red-400",
                                                onclick: {
                                                    let song = song.clone();
                                                    move |_| on_delete(song.clone())
                                                },
                                                Icon { name: "trash".to_string(), class: "w-4 h-4".to_string() }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                Some(Err(err)) => rsx! {
                    p { class: "text-sm text-red-400", "Could not load songs: {err}" }
                },
                None => rsx! { Loading {} },
            }
        }
    }
}
