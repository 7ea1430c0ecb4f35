use crate::api::models::{format_duration, Song};
use crate::components::{Icon, PlayerHandle};
use dioxus::prelude::*;

/// One song in a list. Trailing actions are passed as children.
#[component]
pub fn SongRow(song: Song, index: usize, on_play: EventHandler<()>, children: Element) -> Element {
    let player = use_context::<PlayerHandle>();
    let is_current = player
        .controller()
        .read()
        .song()
        .map(|current| current.id == song.id)
        .unwrap_or(false);

    rsx! {
        div {
            class: if is_current { "group w-full flex items-center gap-4 p-3 rounded-xl bg-emerald-500/10 transition-colors" } else { "group w-full flex items-center gap-4 p-3 rounded-xl hover:bg-zinc-800/50 transition-colors" },
            button {
                r#type: "button",
                class: "flex items-center gap-4 flex-1 min-w-0 text-left",
                onclick: move |_| on_play.call(()),
                span { class: "w-6 text-sm text-zinc-500 group-hover:hidden text-right", "{index + 1}" }
                span { class: "w-6 hidden group-hover:flex justify-end",
                    Icon {
                        name: "play".to_string(),
                        class: "w-4 h-4 text-white".to_string(),
                    }
                }
                div { class: "w-10 h-10 rounded bg-zinc-800 flex-shrink-0 overflow-hidden flex items-center justify-center",
                    match song.cover_image.as_ref() {
                        Some(url) => rsx! {
                            img { class: "w-full h-full object-cover", src: "{url}", loading: "lazy" }
                        },
                        None => rsx! {
                            Icon {
                                name: "music".to_string(),
                                class: "w-4 h-4 text-zinc-500".to_string(),
                            }
                        },
                    }
                }
                div { class: "flex-1 min-w-0",
                    p { class: if is_current { "text-sm font-medium text-emerald-400 truncate" } else { "text-sm font-medium text-white truncate" },
                        "{song.title}"
                    }
                    p { class: "text-xs text-zinc-400 truncate",
                        "{song.artist}"
                        if let Some(album) = song.album.as_ref() {
                            " • {album}"
                        }
                    }
                }
                div { class: "hidden sm:flex items-center gap-1 text-xs text-zinc-500",
                    Icon {
                        name: "headphones".to_string(),
                        class: "w-3 h-3".to_string(),
                    }
                    "{song.plays}"
                }
                span { class: "text-sm text-zinc-500 w-12 text-right tabular-nums",
                    "{format_duration(song.duration)}"
                }
            }
            {children}
        }
    }
}
