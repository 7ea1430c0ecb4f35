//! Route views and the pieces they share.

mod auth;
mod home;
mod picked_file;
mod playlist_detail;
mod playlist_dialog;
mod playlists;
mod profile;
mod song_row;
mod song_selector;
mod songs;
mod upload;

pub use auth::{LoginView, SignupView};
pub use home::HomeView;
pub use playlist_detail::PlaylistDetailView;
pub use playlists::PlaylistsView;
pub use profile::ProfileView;
pub use songs::SongsView;
pub use upload::UploadView;

/// Logs a failed backend call and turns it into a display message.
fn report<T>(result: crate::api::Result<T>, what: &str) -> Result<T, String> {
    result.map_err(|err| {
        tracing::warn!(error = %err, "failed to load {what}");
        err.to_string()
    })
}
