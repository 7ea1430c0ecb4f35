use crate::api::*;
use crate::components::{AppView, AudioController, NavBar, Player};
use crate::db::{
    clear_session, initialize_database, load_backend_config, load_session, load_settings,
    save_backend_config, save_session, save_settings, PlayerSettings,
};
use crate::playback::{PlaybackController, PlayerEffect, PlaylistContext, DEFAULT_VOLUME};
use dioxus::prelude::*;

/// Backend connection and signed-in user, shared by every view.
#[derive(Clone, Copy, PartialEq)]
pub struct AppSession {
    pub config: Signal<BackendConfig>,
    pub session: Signal<Option<Session>>,
    /// Set once stored config and session have been restored.
    pub loaded: Signal<bool>,
}

impl AppSession {
    pub fn client(&self) -> SupabaseClient {
        SupabaseClient::new((self.config)(), (self.session)())
    }

    pub fn user(&self) -> Option<AuthUser> {
        (self.session)().map(|session| session.user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn sign_in(&self, session: Session) {
        let mut current = self.session;
        current.set(Some(session.clone()));
        spawn(async move {
            if let Err(err) = save_session(&session).await {
                tracing::warn!(error = %err, "failed to store session");
            }
        });
    }

    pub fn sign_out(&self) {
        let client = self.client();
        let mut current = self.session;
        current.set(None);
        spawn(async move {
            if let Err(err) = client.sign_out().await {
                tracing::warn!(error = %err, "sign-out request failed");
            }
            if let Err(err) = clear_session().await {
                tracing::warn!(error = %err, "failed to clear stored session");
            }
        });
    }

    pub fn set_config(&self, config: BackendConfig) {
        let mut current = self.config;
        current.set(config.clone());
        spawn(async move {
            if let Err(err) = save_backend_config(&config).await {
                tracing::warn!(error = %err, "failed to store backend config");
            }
        });
    }
}

/// The playback controller plus the queue of effects it produced that the
/// audio driver has not applied yet.
#[derive(Clone, Copy, PartialEq)]
pub struct PlayerHandle {
    controller: Signal<PlaybackController>,
    outbox: Signal<Vec<PlayerEffect>>,
    pulse: Signal<u64>,
}

impl PlayerHandle {
    fn new() -> Self {
        Self {
            controller: Signal::new(PlaybackController::new(DEFAULT_VOLUME)),
            outbox: Signal::new(Vec::new()),
            pulse: Signal::new(0),
        }
    }

    /// Subscribing read of the controller.
    pub fn controller(&self) -> Signal<PlaybackController> {
        self.controller
    }

    /// Run a controller transition and queue its effects.
    pub fn dispatch<F>(&self, transition: F)
    where
        F: FnOnce(&mut PlaybackController) -> Vec<PlayerEffect>,
    {
        let mut controller = self.controller;
        let effects = {
            let mut guard = controller.write();
            transition(&mut *guard)
        };
        if effects.is_empty() {
            return;
        }
        let mut outbox = self.outbox;
        outbox.write().extend(effects);
        let mut pulse = self.pulse;
        pulse.with_mut(|value| *value = value.wrapping_add(1));
    }

    pub fn play(&self, song: Song, playlist: Option<PlaylistContext>) {
        self.dispatch(move |controller| controller.play(song, playlist));
    }

    pub(crate) fn pulse(&self) -> u64 {
        (self.pulse)()
    }

    pub(crate) fn take_effects(&self) -> Vec<PlayerEffect> {
        let mut outbox = self.outbox;
        let effects = std::mem::take(&mut *outbox.write());
        effects
    }
}

/// Redirects to the login view once restoration finished without a user.
pub fn use_require_user() -> Option<AuthUser> {
    let app = use_context::<AppSession>();
    let navigator = use_navigator();

    use_effect(move || {
        if (app.loaded)() && app.session.read().is_none() {
            navigator.replace(AppView::LoginView {});
        }
    });

    app.user()
}

async fn restore_session(config: &BackendConfig) -> Option<Session> {
    let stored = match load_session().await {
        Ok(stored) => stored?,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load stored session");
            return None;
        }
    };
    if !stored.is_expired(chrono::Utc::now().timestamp()) {
        // A revoked token still looks fresh locally
        let client = SupabaseClient::new(config.clone(), Some(stored.clone()));
        match client.get_user().await {
            Ok(user) => return Some(Session { user, ..stored }),
            Err(BackendError::Unauthenticated) => {
                tracing::info!("stored session was revoked");
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not verify stored session");
                return Some(stored);
            }
        }
    }

    let refresh_token = stored.refresh_token.clone()?;
    let client = SupabaseClient::new(config.clone(), None);
    match client.refresh_session(&refresh_token).await {
        Ok(session) => {
            if let Err(err) = save_session(&session).await {
                tracing::warn!(error = %err, "failed to store refreshed session");
            }
            Some(session)
        }
        Err(err) => {
            tracing::info!(error = %err, "stored session expired");
            let _ = clear_session().await;
            None
        }
    }
}

#[component]
pub fn AppShell() -> Element {
    let mut config = use_signal(BackendConfig::default);
    let mut session = use_signal(|| None::<Session>);
    let mut loaded = use_signal(|| false);

    use_context_provider(|| AppSession {
        config,
        session,
        loaded,
    });
    let player = use_context_provider(PlayerHandle::new);

    // Restore connection, session and player settings on mount
    use_hook(move || {
        spawn(async move {
            if let Err(err) = initialize_database().await {
                tracing::error!(error = %err, "failed to initialize local storage");
            }

            let stored_config = load_backend_config().await.unwrap_or_else(|err| {
                tracing::warn!(error = %err, "failed to load backend config");
                BackendConfig::default()
            });
            if !stored_config.is_configured() {
                tracing::warn!("backend is not configured; set it on the login screen");
            }
            let restored = restore_session(&stored_config).await;
            config.set(stored_config);
            session.set(restored);

            let settings = load_settings().await.unwrap_or_else(|err| {
                tracing::warn!(error = %err, "failed to load player settings");
                PlayerSettings::default()
            });
            player.dispatch(move |controller| {
                controller.restore_settings(
                    settings.volume,
                    settings.muted,
                    settings.repeat,
                    settings.shuffle,
                )
            });
            loaded.set(true);
        });
    });

    let current_settings = use_memo(move || {
        let controller = player.controller();
        let controller = controller.read();
        PlayerSettings {
            volume: controller.volume().level(),
            muted: controller.volume().is_muted(),
            repeat: controller.repeat(),
            shuffle: controller.shuffle(),
        }
    });

    // Persist player settings when they change
    use_effect(move || {
        let settings = current_settings();
        if !loaded() {
            return;
        }
        spawn(async move {
            if let Err(err) = save_settings(&settings).await {
                tracing::warn!(error = %err, "failed to store player settings");
            }
        });
    });

    let has_song = player.controller().read().status().has_song();

    rsx! {
        div { class: "app-container min-h-screen bg-black text-white flex flex-col",
            NavBar {}

            main { class: if has_song { "flex-1 pb-32" } else { "flex-1" },
                div { class: "page-shell container mx-auto px-4 py-6",
                    Outlet::<AppView> {}
                }
            }

            Player {}
        }

        // Applies player effects and watches the media element
        AudioController {}
    }
}
