use crate::api::models::{format_duration, Song};
use crate::components::Icon;
use dioxus::prelude::*;

/// Searchable checklist of songs; checked ids land in `selected`.
#[component]
pub fn SongSelector(songs: Vec<Song>, selected: Signal<Vec<String>>) -> Element {
    let mut search = use_signal(String::new);
    let query = search();
    let visible: Vec<Song> = songs
        .iter()
        .filter(|song| song.matches_query(&query))
        .cloned()
        .collect();
    let chosen = selected.read().len();

    rsx! {
        div { class: "space-y-3",
            div { class: "flex items-center justify-between",
                div { class: "relative flex-1",
                    Icon {
                        name: "search".to_string(),
                        class: "absolute left-3 top-1/2 -translate-y-1/2 w-4 h-4 text-zinc-500".to_string(),
                    }
                    input {
                        class: "w-full pl-9 pr-3 py-2 bg-zinc-900 border border-zinc-800 rounded-lg text-sm text-white placeholder-zinc-500 focus:outline-none focus:border-emerald-500/50",
                        placeholder: "Search songs",
                        value: "{query}",
                        oninput: move |e| search.set(e.value()),
                    }
                }
                span { class: "ml-3 text-xs text-zinc-400 whitespace-nowrap", "{chosen} selected" }
            }

            div { class: "max-h-64 overflow-y-auto rounded-lg border border-zinc-800 divide-y divide-zinc-800/60",
                if visible.is_empty() {
                    p { class: "p-4 text-sm text-zinc-500 text-center", "No songs found" }
                }
                for song in visible {
                    SelectorRow { key: "{song.id}", song: song.clone(), selected }
                }
            }
        }
    }
}

#[component]
fn SelectorRow(song: Song, selected: Signal<Vec<String>>) -> Element {
    let mut selected = selected;
    let checked = selected.read().contains(&song.id);
    let id = song.id.clone();

    rsx! {
        label { class: "flex items-center gap-3 px-3 py-2 cursor-pointer hover:bg-zinc-800/50",
            input {
                r#type: "checkbox",
                class: "accent-emerald-500",
                checked,
                onchange: move |_| {
                    let mut ids = selected.write();
                    if let Some(pos) = ids.iter().position(|existing| *existing == id) {
                        ids.remove(pos);
                    } else {
                        ids.push(id.clone());
                    }
                },
            }
            div { class: "flex-1 min-w-0",
                p { class: "text-sm text-white truncate", "{song.title}" }
                p { class: "text-xs text-zinc-400 truncate", "{song.artist}" }
            }
            span { class: "text-xs text-zinc-500 tabular-nums", "{format_duration(song.duration)}" }
        }
    }
}
