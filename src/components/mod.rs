//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod audio_manager;
mod icons;
mod nav_bar;
mod notify;
mod player;
pub mod views;

pub use app::*;
pub use app_view::*;
pub use audio_manager::*;
pub use icons::*;
pub use nav_bar::*;
pub use notify::*;
pub use player::*;
// Views are accessed via views::ViewName
