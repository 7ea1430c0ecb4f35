use crate::api::models::format_clock;
use crate::components::{Icon, PlayerHandle};
use dioxus::prelude::*;

mod controls;

use controls::{
    LikeButton, NextButton, PlayPauseButton, PrevButton, RepeatButton, ShuffleButton,
    VolumeControls,
};

/// Bottom bar for the current song. Hidden while nothing is loaded.
#[component]
pub fn Player() -> Element {
    let player = use_context::<PlayerHandle>();

    let controller = player.controller();
    let controller = controller.read();
    let Some(song) = controller.song().cloned() else {
        return rsx! {};
    };

    let position = controller.position();
    let duration = controller.duration();
    let error = controller.error().map(str::to_string);
    let progress = if duration > 0.0 {
        (position / duration * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    let source = controller.playlist().map(|playlist| {
        format!(
            "Playing from {} • {} of {}",
            playlist.name,
            controller.index() + 1,
            playlist.songs.len()
        )
    });
    drop(controller);

    let on_seek_input = move |e: Event<FormData>| {
        if duration <= 0.0 {
            return;
        }
        if let Ok(percent) = e.value().parse::<f64>() {
            let target = percent.clamp(0.0, 100.0) / 100.0 * duration;
            player.dispatch(move |controller| controller.seek(target));
        }
    };

    rsx! {
        div {
            id: "player",
            class: "fixed bottom-0 left-0 right-0 z-40 bg-zinc-950/95 backdrop-blur-xl border-t border-zinc-800/60",
            div { class: "container mx-auto px-4 py-3 flex flex-col gap-2",
                div { class: "flex items-center gap-2 text-xs text-zinc-500 tabular-nums",
                    span { class: "w-10 text-right", "{format_clock(position)}" }
                    input {
                        r#type: "range",
                        min: "0",
                        max: "100",
                        step: "0.1",
                        value: progress,
                        disabled: duration <= 0.0,
                        class: "flex-1 h-1.5 bg-zinc-800 rounded-full appearance-none cursor-pointer accent-emerald-500",
                        oninput: on_seek_input,
                    }
                    span { class: "w-10", "{format_clock(duration)}" }
                }

                div { class: "flex items-center justify-between gap-4",
                    div { class: "flex items-center gap-3 min-w-0 flex-1",
                        div { class: "w-12 h-12 rounded-lg bg-zinc-800 overflow-hidden flex-shrink-0 flex items-center justify-center",
                            match song.cover_image.as_ref() {
                                Some(url) => rsx! {
                                    img {
                                        src: "{url}",
                                        alt: "{song.title}",
                                        class: "w-full h-full object-cover",
                                    }
                                },
                                None => rsx! {
                                    Icon {
                                        name: "music".to_string(),
                                        class: "w-5 h-5 text-zinc-500".to_string(),
                                    }
                                },
                            }
                        }
                        div { class: "min-w-0",
                            p { class: "text-sm font-medium text-white truncate", "{song.title}" }
                            p { class: "text-xs text-zinc-400 truncate", "{song.artist}" }
                            if let Some(source) = source {
                                p { class: "text-[11px] text-zinc-500 truncate", "{source}" }
                            }
                        }
                        LikeButton {}
                    }

                    div { class: "flex items-center gap-1 sm:gap-2",
                        ShuffleButton {}
                        PrevButton {}
                        PlayPauseButton {}
                        NextButton {}
                        RepeatButton {}
                    }

                    div { class: "flex items-center gap-2 flex-1 justify-end",
                        div { class: "hidden md:flex", VolumeControls {} }
                        button {
                            id: "close-player-btn",
                            r#type: "button",
                            class: "p-2 text-zinc-500 hover:text-white transition-colors",
                            onclick: move |_| player.dispatch(|controller| controller.close()),
                            Icon {
                                name: "x".to_string(),
                                class: "w-5 h-5".to_string(),
                            }
                        }
                    }
                }

                if let Some(error) = error {
                    p { class: "text-xs text-red-400", "{error}" }
                }
            }
        }
    }
}
