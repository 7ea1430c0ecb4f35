use super::home::Loading;
use super::picked_file::{read_picked_file, PickedFile};
use super::report;
use crate::api::*;
use crate::components::{use_require_user, AppSession, AppView, Icon, PlayerHandle};
use dioxus::prelude::*;

const INPUT_CLASS: &str = "w-full px-3 py-2.5 bg-zinc-900 border border-zinc-800 rounded-lg text-white placeholder-zinc-500 focus:outline-none focus:border-emerald-500/50";

#[component]
pub fn ProfileView() -> Element {
    let user = use_require_user();
    let app = use_context::<AppSession>();
    let player = use_context::<PlayerHandle>();
    let navigator = use_navigator();
    let mut editing = use_signal(|| false);

    let mut profile = use_resource(move || {
        let client = app.client();
        async move { report(client.profile_or_create().await, "profile") }
    });
    let stats = use_resource(move || {
        let client = app.client();
        async move { report(client.profile_stats().await, "profile stats") }
    });

    let Some(user) = user else {
        return rsx! {};
    };

    let on_sign_out = move |_| {
        player.dispatch(|controller| controller.close());
        app.sign_out();
        navigator.replace(AppView::LoginView {});
    };

    let current = match profile() {
        Some(Ok(current)) => current,
        Some(Err(message)) => {
            return rsx! {
                p { class: "text-sm text-red-400", "Could not load profile: {message}" }
            };
        }
        None => return rsx! { Loading {} },
    };
    let display_name = current
        .name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| user.display_name());

    rsx! {
        div { class: "max-w-3xl mx-auto space-y-8",
            section { class: "flex flex-col sm:flex-row items-center sm:items-end gap-6",
                div { class: "w-32 h-32 rounded-full bg-zinc-800 overflow-hidden flex items-center justify-center shadow-2xl",
                    {match current.avatar_url.as_ref() {
                        Some(url) => rsx! {
                            img { class: "w-full h-full object-cover", src: "{url}" }
                        },
                        None => rsx! {
                            Icon { name: "user".to_string(), class: "w-12 h-12 text-zinc-500".to_string() }
                        },
                    }}
                }
                div { class: "flex-1 min-w-0 text-center sm:text-left space-y-2",
                    p { class: "text-xs uppercase tracking-wider text-zinc-500", "Profile" }
                    h1 { class: "text-3xl font-bold text-white truncate", "{display_name}" }
                    if let Some(email) = user.email.as_ref() {
                        p { class: "text-sm text-zinc-400", "{email}" }
                    }
                    if let Some(bio) = current.bio.as_ref().filter(|bio| !bio.is_empty()) {
                        p { class: "text-zinc-300", "{bio}" }
                    }
                }
                div { class: "flex gap-2",
                    button {
                        r#type: "button",
                        class: "flex items-center gap-2 px-4 py-2 rounded-full bg-zinc-800 hover:bg-zinc-700 text-white",
                        onclick: move |_| editing.set(!editing()),
                        Icon { name: "edit".to_string(), class: "w-4 h-4".to_string() }
                        "Edit"
                    }
                    button {
                        r#type: "button",
                        class: "flex items-center gap-2 px-4 py-2 rounded-full bg-zinc-800 hover:bg-red-500/20 text-red-400",
                        onclick: on_sign_out,
                        Icon { name: "log-out".to_string(), class: "w-4 h-4".to_string() }
                        "Log out"
                    }
                }
            }

            {match stats() {
                Some(Ok(stats)) => rsx! {
                    div { class: "grid grid-cols-3 gap-4",
                        StatCard { icon: "music", label: "Songs", value: stats.songs.to_string() }
                        StatCard { icon: "playlist", label: "Playlists", value: stats.playlists.to_string() }
                        StatCard { icon: "headphones", label: "Plays", value: stats.total_plays.to_string() }
                    }
                },
                Some(Err(message)) => rsx! {
                    p { class: "text-sm text-red-400", "Could not load stats: {message}" }
                },
                None => rsx! { Loading {} },
            }}

            if editing() {
                ProfileEditor {
                    profile: current.clone(),
                    fallback_name: display_name.clone(),
                    on_close: move |_| editing.set(false),
                    on_saved: move |_| {
                        editing.set(false);
                        profile.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn StatCard(icon: String, label: String, value: String) -> Element {
    rsx! {
        div { class: "p-5 rounded-2xl bg-zinc-900/60 border border-zinc-800 text-center space-y-1",
            Icon { name: icon, class: "w-5 h-5 mx-auto text-emerald-400".to_string() }
            p { class: "text-2xl font-bold text-white tabular-nums", "{value}" }
            p { class: "text-xs text-zinc-500", "{label}" }
        }
    }
}

#[component]
fn ProfileEditor(
    profile: Profile,
    fallback_name: String,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let app = use_context::<AppSession>();
    let mut name = use_signal(|| fallback_name.clone());
    let initial_bio = profile.bio.clone().unwrap_or_default();
    let mut bio = use_signal(move || initial_bio);
    let mut avatar = use_signal(|| None::<PickedFile>);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let on_avatar_change = move |evt: FormEvent| async move {
        match read_picked_file(&evt).await {
            Ok(Some(file)) if file.is_image() => avatar.set(Some(file)),
            Ok(Some(_)) => error.set(Some("Avatar must be an image".to_string())),
            Ok(None) => avatar.set(None),
            Err(message) => error.set(Some(message)),
        }
    };

    let on_save = move |_| {
        let existing_avatar = profile.avatar_url.clone();
        async move {
            if saving() {
                return;
            }
            saving.set(true);
            error.set(None);
            let client = app.client();

            let mut avatar_url = existing_avatar;
            if let Some(file) = avatar() {
                match client
                    .upload_avatar(&file.name, file.bytes, &file.content_type)
                    .await
                {
                    Ok(url) => avatar_url = Some(url),
                    Err(err) => {
                        tracing::warn!(error = %err, "avatar upload failed");
                        error.set(Some(format!("Avatar upload failed: {err}")));
                        saving.set(false);
                        return;
                    }
                }
            }

            match client.save_profile(&name(), &bio(), avatar_url.as_deref()).await {
                Ok(saved) => {
                    tracing::info!(user_id = %saved.id, "profile saved");
                    on_saved.call(());
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to save profile");
                    error.set(Some(err.to_string()));
                }
            }
            saving.set(false);
        }
    };

    rsx! {
        section { class: "p-6 rounded-2xl bg-zinc-900/60 border border-zinc-800 space-y-4",
            h2 { class: "text-lg font-semibold text-white", "Edit profile" }
            input {
                class: INPUT_CLASS,
                placeholder: "Display name",
                value: "{name}",
                oninput: move |e| name.set(e.value()),
            }
            textarea {
                class: INPUT_CLASS,
                rows: "3",
                placeholder: "Bio",
                value: "{bio}",
                oninput: move |e| bio.set(e.value()),
            }
            div {
                label { class: "block text-sm text-zinc-400 mb-1", "Avatar" }
                input {
                    r#type: "file",
                    accept: "image/*",
                    class: "block w-full text-sm text-zinc-400 file:mr-3 file:px-3 file:py-1.5 file:rounded-lg file:border-0 file:bg-zinc-800 file:text-white",
                    onchange: on_avatar_change,
                }
            }
            if let Some(message) = error() {
                p { class: "text-sm text-red-400", "{message}" }
            }
            div { class: "flex justify-end gap-2",
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
                    if saving() { "Saving..." } else { "Save" }
                }
            }
        }
    }
}
