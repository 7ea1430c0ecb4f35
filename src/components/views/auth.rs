use crate::api::*;
use crate::components::{AppSession, AppView, Icon};
use dioxus::prelude::*;

const INPUT_CLASS: &str = "w-full px-3 py-2.5 bg-zinc-900 border border-zinc-800 rounded-lg text-white placeholder-zinc-500 focus:outline-none focus:border-emerald-500/50";

#[component]
pub fn LoginView() -> Element {
    let app = use_context::<AppSession>();
    let navigator = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let on_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        if busy() {
            return;
        }
        busy.set(true);
        error.set(None);
        match app.client().sign_in(email().trim(), &password()).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user.id, "signed in");
                app.sign_in(session);
                navigator.replace(AppView::HomeView {});
            }
            Err(err) => {
                tracing::warn!(error = %err, "sign-in failed");
                error.set(Some(err.to_string()));
            }
        }
        busy.set(false);
    };

    rsx! {
        AuthCard { title: "Welcome back", subtitle: "Log in to keep listening",
            form { class: "space-y-4", onsubmit: on_submit,
                input {
                    class: INPUT_CLASS,
                    r#type: "email",
                    placeholder: "Email",
                    required: true,
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
                input {
                    class: INPUT_CLASS,
                    r#type: "password",
                    placeholder: "Password",
                    required: true,
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }
                if let Some(message) = error() {
                    p { class: "text-sm text-red-400", "{message}" }
                }
                button {
                    r#type: "submit",
                    disabled: busy(),
                    class: "w-full py-2.5 rounded-lg bg-emerald-500 hover:bg-emerald-400 text-black font-semibold disabled:opacity-50",
                    if busy() { "Logging in..." } else { "Log in" }
                }
            }
            p { class: "text-sm text-zinc-400 text-center",
                "No account yet? "
                Link { to: AppView::SignupView {}, class: "text-emerald-400 hover:underline", "Sign up" }
            }
        }
    }
}

#[component]
pub fn SignupView() -> Element {
    let app = use_context::<AppSession>();
    let navigator = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);

    let on_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        if busy() {
            return;
        }
        busy.set(true);
        error.set(None);
        notice.set(None);
        match app
            .client()
            .sign_up(email().trim(), &password(), name().trim())
            .await
        {
            Ok(SignUpOutcome::SignedIn(session)) => {
                tracing::info!(user_id = %session.user.id, "account created");
                app.sign_in(session);
                navigator.replace(AppView::HomeView {});
            }
            Ok(SignUpOutcome::ConfirmationRequired(user)) => {
                tracing::info!(user_id = %user.id, "account created, confirmation pending");
                notice.set(Some(
                    "Check your email to confirm your account, then log in.".to_string(),
                ));
            }
            Err(err) => {
                tracing::warn!(error = %err, "sign-up failed");
                error.set(Some(err.to_string()));
            }
        }
        busy.set(false);
    };

    rsx! {
        AuthCard { title: "Create an account", subtitle: "Upload music and build playlists",
            form { class: "space-y-4", onsubmit: on_submit,
                input {
                    class: INPUT_CLASS,
                    placeholder: "Name",
                    required: true,
                    value: "{name}",
                    oninput: move |e| name.set(e.value()),
                }
                input {
                    class: INPUT_CLASS,
                    r#type: "email",
                    placeholder: "Email",
                    required: true,
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
                input {
                    class: INPUT_CLASS,
                    r#type: "password",
                    placeholder: "Password",
                    required: true,
                    minlength: "6",
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }
                if let Some(message) = error() {
                    p { class: "text-sm text-red-400", "{message}" }
                }
                if let Some(message) = notice() {
                    p { class: "text-sm text-emerald-400", "{message}" }
                }
                button {
                    r#type: "submit",
                    disabled: busy(),
                    class: "w-full py-2.5 rounded-lg bg-emerald-500 hover:bg-emerald-400 text-black font-semibold disabled:opacity-50",
                    if busy() { "Creating account..." } else { "Sign up" }
                }
            }
            p { class: "text-sm text-zinc-400 text-center",
                "Already have an account? "
                Link { to: AppView::LoginView {}, class: "text-emerald-400 hover:underline", "Log in" }
            }
        }
    }
}

#[component]
fn AuthCard(title: String, subtitle: String, children: Element) -> Element {
    rsx! {
        div { class: "max-w-md mx-auto py-10 space-y-6",
            div { class: "text-center space-y-2",
                div { class: "w-14 h-14 mx-auto rounded-2xl bg-gradient-to-br from-emerald-500 to-teal-600 flex items-center justify-center",
                    Icon { name: "headphones".to_string(), class: "w-7 h-7 text-white".to_string() }
                }
                h1 { class: "text-2xl font-bold text-white", "{title}" }
                p { class: "text-zinc-400", "{subtitle}" }
            }
            div { class: "bg-zinc-900/60 border border-zinc-800 rounded-2xl p-6 space-y-4",
                {children}
            }
            BackendSettings {}
        }
    }
}

/// Collapsible form for the backend URL and public key.
#[component]
fn BackendSettings() -> Element {
    let app = use_context::<AppSession>();
    let mut open = use_signal(|| !app.config.read().is_configured());
    let mut url = use_signal(|| app.config.read().url.clone());
    let mut anon_key = use_signal(|| app.config.read().anon_key.clone());
    let mut saved = use_signal(|| false);
    let mut edited = use_signal(|| false);

    // Follow the restored config until the user edits it
    use_effect(move || {
        let config = app.config.read().clone();
        if !*edited.peek() {
            url.set(config.url.clone());
            anon_key.set(config.anon_key.clone());
            if !config.is_configured() {
                open.set(true);
            }
        }
    });

    let on_save = move |_| {
        let config = BackendConfig::new(url(), anon_key());
        if !config.is_configured() {
            return;
        }
        app.set_config(config);
        saved.set(true);
    };

    rsx! {
        div { class: "bg-zinc-900/40 border border-zinc-800 rounded-2xl",
            button {
                r#type: "button",
                class: "w-full flex items-center justify-between px-5 py-3 text-sm text-zinc-400 hover:text-white",
                onclick: move |_| open.set(!open()),
                span { "Backend settings" }
                Icon {
                    name: if open() { "arrow-up".to_string() } else { "arrow-down".to_string() },
                    class: "w-4 h-4".to_string(),
                }
            }
            if open() {
                div { class: "px-5 pb-5 space-y-3",
                    input {
                        class: INPUT_CLASS,
                        placeholder: "https://your-project.supabase.co",
                        value: "{url}",
                        oninput: move |e| {
                            saved.set(false);
                            edited.set(true);
                            url.set(e.value());
                        },
                    }
                    input {
                        class: INPUT_CLASS,
                        placeholder: "Anon key",
                        value: "{anon_key}",
                        oninput: move |e| {
                            saved.set(false);
                            edited.set(true);
                            anon_key.set(e.value());
                        },
                    }
                    div { class: "flex items-center justify-between",
                        if saved() {
                            span { class: "text-xs text-emerald-400 flex items-center gap-1",
                                Icon { name: "check".to_string(), class: "w-3 h-3".to_string() }
                                "Saved"
                            }
                        } else {
                            span {}
                        }
                        button {
                            r#type: "button",
                            class: "px-3 py-1.5 rounded-lg text-sm bg-zinc-800 hover:bg-zinc-700 text-white",
                            onclick: on_save,
                            "Save"
                        }
                    }
                }
            }
        }
    }
}
