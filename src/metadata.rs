//! Tag and duration reading for uploaded audio files.

use lofty::{AudioFile, ItemKey, Probe, TaggedFileExt};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Unrecognized audio format: {0}")]
    Format(#[from] std::io::Error),

    #[error("Could not read audio file: {0}")]
    Read(#[from] lofty::LoftyError),
}

/// What the upload form pre-fills from the file itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioMetadata {
    pub duration_secs: u32,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

impl AudioMetadata {
    fn apply_tag(&mut self, tag: &lofty::Tag) {
        for item in tag.items() {
            let Some(text) = item.value().text().map(str::trim).filter(|t| !t.is_empty()) else {
                continue;
            };
            match item.key() {
                ItemKey::TrackTitle => self.title = Some(text.to_string()),
                ItemKey::TrackArtist => self.artist = Some(text.to_string()),
                ItemKey::AlbumTitle => self.album = Some(text.to_string()),
                _ => {}
            }
        }
    }
}

/// Reads duration plus title/artist/album tags from an in-memory file.
pub fn read_audio_metadata(bytes: &[u8]) -> Result<AudioMetadata, MetadataError> {
    let tagged_file = Probe::new(Cursor::new(bytes)).guess_file_type()?.read()?;

    let mut metadata = AudioMetadata {
        duration_secs: tagged_file.properties().duration().as_secs_f64().round() as u32,
        ..Default::default()
    };
    if let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
        metadata.apply_tag(tag);
    }
    Ok(metadata)
}

/// Title fallback when the file has no title tag: the name without extension.
pub fn title_from_file_name(name: &str) -> String {
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    stem.replace(['_', '-'], " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(read_audio_metadata(b"definitely not audio").is_err());
    }

    #[test]
    fn title_fallback_strips_extension() {
        assert_eq!(title_from_file_name("late_night-drive.mp3"), "late night drive");
        assert_eq!(title_from_file_name(".hidden"), ".hidden");
        assert_eq!(title_from_file_name("plain"), "plain");
    }
}
