use super::playlists::PlaylistCard;
use super::report;
use super::song_row::SongRow;
use crate::api::*;
use crate::components::{AppSession, AppView, Icon, PlayerHandle};
use crate::playback::PlaylistContext;
use dioxus::prelude::*;

const RECENT_CONTEXT_ID: &str = "recent";

#[component]
pub fn HomeView() -> Element {
    let app = use_context::<AppSession>();

    if app.is_signed_in() {
        rsx! { Dashboard {} }
    } else {
        rsx! { Landing {} }
    }
}

#[component]
fn Landing() -> Element {
    rsx! {
        div { class: "max-w-3xl mx-auto text-center py-20 space-y-8",
            div { class: "w-20 h-20 mx-auto rounded-3xl bg-gradient-to-br from-emerald-500 to-teal-600 flex items-center justify-center shadow-2xl shadow-emerald-500/20",
                Icon { name: "headphones".to_string(), class: "w-10 h-10 text-white".to_string() }
            }
            h1 { class: "text-4xl sm:text-5xl font-bold text-white", "Your music, in one place" }
            p { class: "text-lg text-zinc-400",
                "Upload your tracks, build playlists and listen anywhere."
            }
            div { class: "flex justify-center gap-3",
                Link {
                    to: AppView::SignupView {},
                    class: "px-6 py-3 rounded-full bg-emerald-500 hover:bg-emerald-400 text-black font-semibold",
                    "Get started"
                }
                Link {
                    to: AppView::LoginView {},
                    class: "px-6 py-3 rounded-full bg-zinc-800 hover:bg-zinc-700 text-white font-semibold",
                    "Log in"
                }
            }
        }
    }
}

#[component]
fn Dashboard() -> Element {
    let app = use_context::<AppSession>();
    let player = use_context::<PlayerHandle>();
    let navigator = use_navigator();

    let playlists = use_resource(move || {
        let client = app.client();
        async move { report(client.playlists(Some(RECENT_PLAYLISTS_LIMIT)).await, "playlists") }
    });
    let recent = use_resource(move || {
        let client = app.client();
        async move { report(client.recent_songs().await, "recent songs") }
    });

    let greeting = app
        .user()
        .map(|user| format!("Welcome back, {}", user.display_name()))
        .unwrap_or_else(|| "Welcome back".to_string());

    rsx! {
        div { class: "space-y-10",
            header { class: "page-header",
                h1 { class: "text-3xl font-bold text-white mb-2", "{greeting}" }
                p { class: "text-zinc-400", "Pick up where you left off" }
            }

            section { class: "space-y-4",
                div { class: "flex items-center justify-between",
                    h2 { class: "text-xl font-semibold text-white", "Recent playlists" }
                    Link { to: AppView::PlaylistsView {}, class: "text-sm text-zinc-400 hover:text-white", "See all" }
                }
                match playlists() {
                    Some(Ok(items)) if !items.is_empty() => rsx! {
                        div { class: "grid grid-cols-2 sm:grid-cols-4 gap-4",
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
                        EmptyHint { icon: "playlist", text: "No playlists yet" }
                    },
                    Some(Err(err)) => rsx! {
                        p { class: "text-sm text-red-400", "Could not load playlists: {err}" }
                    },
                    None => rsx! { Loading {} },
                }
            }

            section { class: "space-y-4",
                div { class: "flex items-center justify-between",
                    h2 { class: "text-xl font-semibold text-white", "Recently added" }
                    Link { to: AppView::SongsView {}, class: "text-sm text-zinc-400 hover:text-white", "All songs" }
                }
                match recent() {
                    Some(Ok(songs)) if !songs.is_empty() => rsx! {
                        div { class: "space-y-1",
                            for (index, song) in songs.iter().cloned().enumerate() {
                                SongRow {
                                    key: "{song.id}",
                                    song: song.clone(),
                                    index,
                                    on_play: {
                                        let songs = songs.clone();
                                        move |_| {
                                            let context = PlaylistContext::new(
                                                RECENT_CONTEXT_ID,
                                                "Recently Added",
                                                songs.clone(),
                                            );
                                            player.play(song.clone(), Some(context));
                                        }
                                    },
                                }
                            }
                        }
                    },
                    Some(Ok(_)) => rsx! {
                        EmptyHint { icon: "music", text: "No songs uploaded yet" }
                    },
                    Some(Err(err)) => rsx! {
                        p { class: "text-sm text-red-400", "Could not load songs: {err}" }
                    },
                    None => rsx! { Loading {} },
                }
            }
        }
    }
}

#[component]
pub(super) fn Loading() -> Element {
    rsx! {
        div { class: "flex items-center justify-center py-12",
            Icon { name: "loader".to_string(), class: "w-8 h-8 text-zinc-500 animate-spin".to_string() }
        }
    }
}

#[component]
pub(super) fn EmptyHint(icon: String, text: String) -> Element {
    rsx! {
        div { class: "flex flex-col items-center justify-center py-12 text-zinc-500",
            Icon { name: icon, class: "w-12 h-12 mb-3".to_string() }
            p { "{text}" }
        }
    }
}
