//! Application routes.

use crate::components::views::*;
use crate::components::AppShell;
use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[route("/")]
        HomeView {},
        #[route("/songs")]
        SongsView {},
        #[route("/playlists")]
        PlaylistsView {},
        #[route("/playlists/:id")]
        PlaylistDetailView { id: String },
        #[route("/upload")]
        UploadView {},
        #[route("/profile")]
        ProfileView {},
        #[route("/auth/login")]
        LoginView {},
        #[route("/auth/signup")]
        SignupView {},
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::HomeView {} => "Home",
        AppView::SongsView {} => "Songs",
        AppView::PlaylistsView {} => "Playlists",
        AppView::PlaylistDetailView { .. } => "Playlist",
        AppView::UploadView {} => "Upload",
        AppView::ProfileView {} => "Profile",
        AppView::LoginView {} => "Log in",
        AppView::SignupView {} => "Sign up",
    }
}
