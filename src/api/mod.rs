pub mod error;
pub mod models;
pub mod query;
pub mod supabase;

pub use error::{BackendError, Result};
pub use models::*;
pub use supabase::{SignUpOutcome, SupabaseClient, RECENT_PLAYLISTS_LIMIT};
