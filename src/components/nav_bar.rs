use crate::components::{view_label, AppSession, AppView, Icon, PlayerHandle};
use dioxus::prelude::*;

#[component]
pub fn NavBar() -> Element {
    let app = use_context::<AppSession>();
    let player = use_context::<PlayerHandle>();
    let view = use_route::<AppView>();
    let navigator = use_navigator();
    let user = app.user();

    let is_active = |target: &AppView| match (target, &view) {
        (AppView::PlaylistsView {}, AppView::PlaylistDetailView { .. }) => true,
        (target, view) => target == view,
    };

    rsx! {
        nav { class: "border-b border-zinc-800/60 bg-zinc-950/80 backdrop-blur-xl sticky top-0 z-40",
            div { class: "container mx-auto flex items-center justify-between px-4 py-3 gap-4",
                Link { to: AppView::HomeView {}, class: "flex items-center gap-3",
                    div { class: "w-9 h-9 rounded-xl bg-gradient-to-br from-emerald-500 to-teal-600 flex items-center justify-center shadow-lg shadow-emerald-500/20",
                        Icon { name: "music".to_string(), class: "w-5 h-5 text-white".to_string() }
                    }
                    div { class: "hidden sm:block",
                        span { class: "text-lg font-bold text-white", "TuneItIn" }
                        span { class: "block text-xs text-zinc-500", "{view_label(&view)}" }
                    }
                }

                if let Some(user) = user {
                    div { class: "flex items-center gap-1 overflow-x-auto",
                        NavItem {
                            icon: "home",
                            label: "Home",
                            to: AppView::HomeView {},
                            active: is_active(&AppView::HomeView {}),
                        }
                        NavItem {
                            icon: "music",
                            label: "Songs",
                            to: AppView::SongsView {},
                            active: is_active(&AppView::SongsView {}),
                        }
                        NavItem {
                            icon: "playlist",
                            label: "Playlists",
                            to: AppView::PlaylistsView {},
                            active: is_active(&AppView::PlaylistsView {}),
                        }
                        NavItem {
                            icon: "upload",
                            label: "Upload",
                            to: AppView::UploadView {},
                            active: is_active(&AppView::UploadView {}),
                        }
                        NavItem {
                            icon: "user",
                            label: user.display_name(),
                            to: AppView::ProfileView {},
                            active: is_active(&AppView::ProfileView {}),
                        }
                        button {
                            class: "p-2 rounded-xl text-zinc-400 hover:text-white hover:bg-zinc-800/50 transition-colors",
                            aria_label: "Log out",
                            onclick: move |_| {
                                player.dispatch(|controller| controller.close());
                                app.sign_out();
                                navigator.push(AppView::HomeView {});
                            },
                            Icon { name: "log-out".to_string(), class: "w-5 h-5".to_string() }
                        }
                    }
                } else {
                    div { class: "flex items-center gap-2",
                        Link {
                            to: AppView::LoginView {},
                            class: "px-4 py-2 rounded-xl text-sm text-zinc-300 hover:text-white transition-colors",
                            "Log in"
                        }
                        Link {
                            to: AppView::SignupView {},
                            class: "px-4 py-2 rounded-xl text-sm font-medium bg-emerald-500 text-black hover:bg-emerald-400 transition-colors",
                            "Sign up"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NavItem(icon: String, label: String, to: AppView, active: bool) -> Element {
    let base_class = "flex items-center gap-2 px-3 py-2 rounded-xl text-sm font-medium transition-all duration-200 whitespace-nowrap";
    let active_class = if active {
        "bg-gradient-to-r from-emerald-500/20 to-teal-500/10 text-emerald-400 shadow-sm"
    } else {
        "text-zinc-400 hover:text-white hover:bg-zinc-800/50"
    };

    rsx! {
        Link { to, class: "{base_class} {active_class}",
            Icon { name: icon.clone(), class: "w-4 h-4".to_string() }
            span { class: "hidden md:inline", "{label}" }
        }
    }
}
