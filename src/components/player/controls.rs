use crate::components::{AppSession, Icon, PlayerHandle};
use dioxus::prelude::*;

#[component]
pub(super) fn PlayPauseButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let playing = player.controller().read().status().is_playing();

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            class: "w-10 h-10 rounded-full bg-white flex items-center justify-center hover:scale-105 transition-transform shadow-lg",
            onclick: move |_| player.dispatch(|controller| controller.toggle_play()),
            if playing {
                Icon {
                    name: "pause".to_string(),
                    class: "w-5 h-5 text-black".to_string(),
                }
            } else {
                Icon {
                    name: "play".to_string(),
                    class: "w-5 h-5 text-black ml-0.5".to_string(),
                }
            }
        }
    }
}

/// Previous track, or restart when a few seconds in.
#[component]
pub(super) fn PrevButton() -> Element {
    let player = use_context::<PlayerHandle>();

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            class: "p-1.5 sm:p-2 text-zinc-300 hover:text-white transition-colors",
            onclick: move |_| player.dispatch(|controller| controller.previous()),
            Icon {
                name: "prev".to_string(),
                class: "w-5 h-5".to_string(),
            }
        }
    }
}

#[component]
pub(super) fn NextButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let enabled = player.controller().read().has_playlist();

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            disabled: !enabled,
            class: if enabled { "p-1.5 sm:p-2 text-zinc-300 hover:text-white transition-colors" } else { "p-1.5 sm:p-2 text-zinc-600 cursor-not-allowed" },
            onclick: move |_| player.dispatch(|controller| controller.next()),
            Icon {
                name: "next".to_string(),
                class: "w-5 h-5".to_string(),
            }
        }
    }
}

#[component]
pub(super) fn ShuffleButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let enabled = player.controller().read().shuffle();

    rsx! {
        button {
            id: "shuffle-btn",
            r#type: "button",
            class: if enabled { "p-1.5 sm:p-2 text-emerald-400 hover:text-emerald-300 transition-colors" } else { "p-1.5 sm:p-2 text-zinc-400 hover:text-white transition-colors" },
            onclick: move |_| {
                player.dispatch(|controller| {
                    controller.toggle_shuffle();
                    Vec::new()
                })
            },
            Icon {
                name: "shuffle".to_string(),
                class: "w-4 h-4 sm:w-5 sm:h-5".to_string(),
            }
        }
    }
}

#[component]
pub(super) fn RepeatButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let enabled = player.controller().read().repeat();

    rsx! {
        button {
            id: "repeat-btn",
            r#type: "button",
            class: if enabled { "p-1.5 sm:p-2 text-emerald-400 hover:text-emerald-300 transition-colors" } else { "p-1.5 sm:p-2 text-zinc-400 hover:text-white transition-colors" },
            onclick: move |_| {
                player.dispatch(|controller| {
                    controller.toggle_repeat();
                    Vec::new()
                })
            },
            Icon {
                name: "repeat".to_string(),
                class: "w-4 h-4 sm:w-5 sm:h-5".to_string(),
            }
        }
    }
}

/// Like toggle with the current counter.
#[component]
pub(super) fn LikeButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let app = use_context::<AppSession>();
    let (likes, pending) = {
        let controller = player.controller();
        let controller = controller.read();
        (controller.likes(), controller.like_pending())
    };

    rsx! {
        button {
            id: "like-btn",
            r#type: "button",
            disabled: pending,
            class: if likes.liked { "flex items-center gap-1 p-2 text-emerald-400 hover:text-emerald-300 transition-colors flex-shrink-0" } else { "flex items-center gap-1 p-2 text-zinc-400 hover:text-emerald-400 transition-colors flex-shrink-0" },
            onclick: move |_| {
                let signed_in = app.is_signed_in();
                player.dispatch(move |controller| controller.toggle_like(signed_in));
            },
            Icon {
                name: if likes.liked { "heart-filled".to_string() } else { "heart".to_string() },
                class: "w-5 h-5".to_string(),
            }
            span { class: "text-xs tabular-nums", "{likes.count}" }
        }
    }
}

#[component]
pub(super) fn VolumeControls() -> Element {
    let player = use_context::<PlayerHandle>();
    let volume = player.controller().read().volume();
    let shown = if volume.is_muted() { 0.0 } else { volume.level() };

    rsx! {
        div { class: "flex items-center gap-2",
            button {
                id: "mute-btn",
                r#type: "button",
                class: "p-2 text-zinc-400 hover:text-white transition-colors",
                onclick: move |_| player.dispatch(|controller| controller.toggle_mute()),
                Icon {
                    name: if volume.is_muted() { "volume-x".to_string() } else { "volume".to_string() },
                    class: "w-5 h-5".to_string(),
                }
            }
            input {
                r#type: "range",
                min: "0",
                max: "100",
                value: (shown * 100.0).round() as i32,
                class: "w-24 h-1.5 bg-zinc-800 rounded-full appearance-none cursor-pointer accent-zinc-400",
                oninput: move |e: Event<FormData>| {
                    if let Ok(val) = e.value().parse::<f64>() {
                        player.dispatch(move |controller| controller.set_volume(val / 100.0));
                    }
                },
            }
        }
    }
}
