use super::home::{EmptyHint, Loading};
use super::playlist_dialog::PlaylistDialog;
use super::song_row::SongRow;
use super::song_selector::SongSelector;
use crate::api::models::format_total_duration;
use crate::api::*;
use crate::components::{
    confirm_action, show_alert, use_require_user, AppSession, AppView, Icon, PlayerHandle,
};
use crate::playback::PlaylistContext;
use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq)]
enum Move {
    Up,
    Down,
}

#[component]
pub fn PlaylistDetailView(id: String) -> Element {
    let user = use_require_user();
    let app = use_context::<AppSession>();
    let navigator = use_navigator();
    let mut search = use_signal(String::new);
    let mut editing = use_signal(|| false);
    let mut adding = use_signal(|| false);
    let player = use_context::<PlayerHandle>();
    let busy = use_signal(|| false);

    // Ok(None) means the playlist does not exist
    let mut detail = use_resource(use_reactive!(|(id,)| {
        let client = app.client();
        async move {
            match client.playlist_detail(&id).await {
                Ok(detail) => Ok(Some(detail)),
                Err(err) if err.is_not_found() => Ok(None),
                Err(err) => {
                    tracing::warn!(playlist_id = %id, error = %err, "failed to load playlist");
                    Err(err.to_string())
                }
            }
        }
    }));

    use_effect(move || {
        if let Some(Ok(None)) = &*detail.read() {
            tracing::info!("playlist not found");
            navigator.replace(AppView::PlaylistsView {});
        }
    });

    let loaded = match detail() {
        Some(Ok(Some(loaded))) => loaded,
        Some(Err(message)) => {
            return rsx! {
                p { class: "text-sm text-red-400", "Could not load playlist: {message}" }
            };
        }
        _ => return rsx! { Loading {} },
    };

    let is_owner = match (&user, &loaded.playlist.user_id) {
        (Some(user), Some(owner)) => user.id == *owner,
        _ => false,
    };
    let all_songs = loaded.songs();
    let total = format_total_duration(&all_songs);
    let count = all_songs.len();
    let query = search();
    let searching = !query.trim().is_empty();
    let entries: Vec<(usize, PlaylistEntry)> = loaded
        .entries
        .iter()
        .cloned()
        .enumerate()
        .filter(|(_, entry)| {
            entry
                .song
                .as_ref()
                .map(|song| song.matches_query(&query))
                .unwrap_or(false)
        })
        .collect();

    let context = PlaylistContext::new(
        loaded.playlist.id.clone(),
        loaded.playlist.name.clone(),
        all_songs.clone(),
    );

    let on_play_all = {
        let context = context.clone();
        move |_| {
            if let Some(first) = context.songs.first().cloned() {
                player.play(first, Some(context.clone()));
            }
        }
    };

    let on_delete = {
        let playlist = loaded.playlist.clone();
        move |_| {
            let playlist = playlist.clone();
            async move {
                if !confirm_action(&format!("Delete playlist \"{}\"?", playlist.name)).await {
                    return;
                }
                match app.client().delete_playlist(&playlist.id).await {
                    Ok(()) => {
                        tracing::info!(playlist_id = %playlist.id, "playlist deleted");
                        navigator.replace(AppView::PlaylistsView {});
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to delete playlist");
                        show_alert(&format!("Could not delete playlist: {err}"));
                    }
                }
            }
        }
    };

    let entry_count = loaded.entries.len();

    rsx! {
        div { class: "space-y-8",
            button {
                r#type: "button",
                class: "flex items-center gap-2 text-sm text-zinc-400 hover:text-white",
                onclick: move |_| {
                    navigator.push(AppView::PlaylistsView {});
                },
                Icon { name: "arrow-left".to_string(), class: "w-4 h-4".to_string() }
                "Playlists"
            }

            header { class: "flex flex-col md:flex-row gap-6 md:items-end",
                div { class: "w-48 h-48 rounded-2xl bg-zinc-800 overflow-hidden shadow-2xl flex-shrink-0",
                    {match loaded.playlist.cover_image.as_ref() {
                        Some(url) => rsx! {
                            img { class: "w-full h-full object-cover", src: "{url}" }
                        },
                        None => rsx! {
                            div { class: "w-full h-full flex items-center justify-center bg-gradient-to-br from-emerald-600 to-teal-700",
                                Icon { name: "playlist".to_string(), class: "w-16 h-16 text-white/70".to_string() }
                            }
                        },
                    }}
                }
                div { class: "flex-1 min-w-0 space-y-3",
                    p { class: "text-xs uppercase tracking-wider text-zinc-500", "Playlist" }
                    h1 { class: "text-4xl font-bold text-white truncate", "{loaded.playlist.name}" }
                    if let Some(description) = loaded.playlist.description.as_ref().filter(|d| !d.is_empty()) {
                        p { class: "text-zinc-400", "{description}" }
                    }
                    p { class: "text-sm text-zinc-500 flex items-center gap-2",
                        Icon { name: "clock".to_string(), class: "w-4 h-4".to_string() }
                        if count == 1 { "1 song" } else { "{count} songs" }
                        " • {total}"
                    }
                    div { class: "flex flex-wrap items-center gap-2 pt-2",
                        button {
                            r#type: "button",
                            disabled: count == 0,
                            class: "flex items-center gap-2 px-5 py-2.5 rounded-full bg-emerald-500 hover:bg-emerald-400 text-black font-semibold disabled:opacity-50",
                            onclick: on_play_all,
                            Icon { name: "play".to_string(), class: "w-4 h-4".to_string() }
                            "Play all"
                        }
                        if is_owner {
                            button {
                                r#type: "button",
                                class: "flex items-center gap-2 px-4 py-2.5 rounded-full bg-zinc-800 hover:bg-zinc-700 text-white",
                                onclick: move |_| adding.set(!adding()),
                                Icon { name: "plus".to_string(), class: "w-4 h-4".to_string() }
                                "Add songs"
                            }
                            button {
                                r#type: "button",
                                class: "flex items-center gap-2 px-4 py-2.5 rounded-full bg-zinc-800 hover:bg-zinc-700 text-white",
                                onclick: move |_| editing.set(true),
                                Icon { name: "edit".to_string(), class: "w-4 h-4".to_string() }
                                "Edit"
                            }
                            button {
                                r#type: "button",
                                class: "flex items-center gap-2 px-4 py-2.5 rounded-full bg-zinc-800 hover:bg-red-500/20 text-red-400",
                                onclick: on_delete,
                                Icon { name: "trash".to_string(), class: "w-4 h-4".to_string() }
                                "Delete"
                            }
                        }
                    }
                }
            }

            if adding() && is_owner {
                AddSongsPanel {
                    playlist_id: loaded.playlist.id.clone(),
                    on_close: move |_| adding.set(false),
                    on_added: move |_| {
                        adding.set(false);
                        detail.restart();
                    },
                }
            }

            div { class: "relative max-w-sm",
                Icon {
                    name: "search".to_string(),
                    class: "absolute left-3 top-1/2 -translate-y-1/2 w-4 h-4 text-zinc-500".to_string(),
                }
                input {
                    class: "w-full pl-9 pr-3 py-2 bg-zinc-900 border border-zinc-800 rounded-lg text-sm text-white placeholder-zinc-500 focus:outline-none focus:border-emerald-500/50",
                    placeholder: "Search in playlist",
                    value: "{query}",
                    oninput: move |e| search.set(e.value()),
                }
            }

            if entries.is_empty() {
                if searching {
                    EmptyHint { icon: "search", text: "No songs match \"{query}\"" }
                } else {
                    EmptyHint { icon: "music", text: "This playlist is empty" }
                }
            } else {
                div { class: "space-y-1",
                    for (index, entry) in entries {
                        EntryRow {
                            key: "{entry.id}",
                            entry: entry.clone(),
                            index,
                            context: context.clone(),
                            can_edit: is_owner,
                            can_reorder: is_owner && !searching,
                            is_first: index == 0,
                            is_last: index + 1 == entry_count,
                            neighbors: loaded.entries.clone(),
                            busy,
                            on_changed: move |_| detail.restart(),
                        }
                    }
                }
            }

            if editing() {
                PlaylistDialog {
                    existing: Some(loaded.playlist.clone()),
                    songs: Vec::new(),
                    on_close: move |_| editing.set(false),
                    on_saved: move |_| {
                        editing.set(false);
                        detail.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn EntryRow(
    entry: PlaylistEntry,
    index: usize,
    context: PlaylistContext,
    can_edit: bool,
    can_reorder: bool,
    is_first: bool,
    is_last: bool,
    neighbors: Vec<PlaylistEntry>,
    busy: Signal<bool>,
    on_changed: EventHandler<()>,
) -> Element {
    let app = use_context::<AppSession>();
    let player = use_context::<PlayerHandle>();
    let mut busy = busy;
    let Some(song) = entry.song.clone() else {
        return rsx! {};
    };

    let on_play = {
        let song = song.clone();
        let context = context.clone();
        move |_| player.play(song.clone(), Some(context.clone()))
    };

    let reorder = {
        let entry = entry.clone();
        let neighbors = neighbors.clone();
        move |direction: Move| {
            let entry = entry.clone();
            let target = match direction {
                Move::Up => index.checked_sub(1),
                Move::Down => Some(index + 1),
            }
            .and_then(|i| neighbors.get(i).cloned());
            async move {
                let Some(other) = target else {
                    return;
                };
                if busy() {
                    return;
                }
                busy.set(true);
                if let Err(err) = app.client().swap_playlist_entries(&entry, &other).await {
                    tracing::warn!(error = %err, "failed to reorder playlist");
                    show_alert(&format!("Could not move song: {err}"));
                }
                busy.set(false);
                on_changed.call(());
            }
        }
    };
    let move_up = {
        let reorder = reorder.clone();
        move |_| reorder(Move::Up)
    };
    let move_down = move |_| reorder(Move::Down);

    let on_remove = {
        let entry_id = entry.id.clone();
        let title = song.title.clone();
        move |_| {
            let entry_id = entry_id.clone();
            let title = title.clone();
            async move {
                if busy() || !confirm_action(&format!("Remove \"{title}\" from this playlist?")).await {
                    return;
                }
                busy.set(true);
                if let Err(err) = app.client().remove_playlist_entry(&entry_id).await {
                    tracing::warn!(error = %err, "failed to remove playlist entry");
                    show_alert(&format!("Could not remove song: {err}"));
                }
                busy.set(false);
                on_changed.call(());
            }
        }
    };

    rsx! {
        SongRow { song, index, on_play,
            if can_edit {
                div { class: "flex items-center gap-1 pl-2",
                    if can_reorder {
                        button {
                            r#type: "button",
                            title: "Move up",
                            disabled: is_first || busy(),
                            class: "p-1.5 text-zinc-500 hover:text-white disabled:opacity-30",
                            onclick: move_up,
                            Icon { name: "arrow-up".to_string(), class: "w-4 h-4".to_string() }
                        }
                        button {
                            r#type: "button",
                            title: "Move down",
                            disabled: is_last || busy(),
                            class: "p-1.5 text-zinc-500 hover:text-white disabled:opacity-30",
                            onclick: move_down,
                            Icon { name: "arrow-down".to_string(), class: "w-4 h-4".to_string() }
                        }
                    }
                    button {
                        r#type: "button",
                        title: "Remove",
                        disabled: busy(),
                        class: "p-1.5 text-zinc-500 hover:text-red-400 disabled:opacity-30",
                        onclick: on_remove,
                        Icon { name: "trash".to_string(), class: "w-4 h-4".to_string() }
                    }
                }
            }
        }
    }
}

/// Picker over songs not yet in the playlist.
#[component]
fn AddSongsPanel(
    playlist_id: String,
    on_close: EventHandler<()>,
    on_added: EventHandler<()>,
) -> Element {
    let app = use_context::<AppSession>();
    let selected = use_signal(Vec::<String>::new);
    let mut saving = use_signal(|| false);

    let id_for_load = playlist_id.clone();
    let candidates = use_resource(move || {
        let client = app.client();
        let id = id_for_load.clone();
        async move { super::report(client.songs_not_in_playlist(&id).await, "songs") }
    });

    let on_add = move |_| {
        let id = playlist_id.clone();
        async move {
            let ids = selected();
            if ids.is_empty() || saving() {
                return;
            }
            saving.set(true);
            match app.client().add_songs_to_playlist(&id, &ids).await {
                Ok(()) => on_added.call(()),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to add songs");
                    show_alert(&format!("Could not add songs: {err}"));
                }
            }
            saving.set(false);
        }
    };

    let chosen = selected.read().len();

    rsx! {
        section { class: "bg-zinc-900/60 border border-zinc-800 rounded-2xl p-5 space-y-4",
            div { class: "flex items-center justify-between",
                h2 { class: "text-lg font-semibold text-white", "Add songs" }
                button {
                    r#type: "button",
                    class: "p-1 text-zinc-400 hover:text-white",
                    onclick: move |_| on_close.call(()),
                    Icon { name: "x".to_string(), class: "w-5 h-5".to_string() }
                }
            }
            match candidates() {
                Some(Ok(songs)) if songs.is_empty() => rsx! {
                    p { class: "text-sm text-zinc-500", "Every song is already in this playlist" }
                },
                Some(Ok(songs)) => rsx! {
                    SongSelector { songs, selected }
                },
                Some(Err(message)) => rsx! {
                    p { class: "text-sm text-red-400", "Could not load songs: {message}" }
                },
                None => rsx! { Loading {} },
            }
            div { class: "flex justify-end",
                button {
                    r#type: "button",
                    disabled: chosen == 0 || saving(),
                    class: "px-4 py-2 rounded-lg text-sm font-medium bg-emerald-500 hover:bg-emerald-400 text-black disabled:opacity-50",
                    onclick: on_add,
                    if saving() { "Adding..." } else { "Add {chosen} songs" }
                }
            }
        }
    }
}
