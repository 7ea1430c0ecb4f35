use dioxus::prelude::*;

/// A file chosen through an `<input type="file">`, read into memory.
#[derive(Clone, PartialEq)]
pub struct PickedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PickedFile {
    pub fn is_audio(&self) -> bool {
        self.content_type.starts_with("audio/")
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Reads the first selected file of a change event.
pub async fn read_picked_file(evt: &FormEvent) -> Result<Option<PickedFile>, String> {
    let Some(file) = evt.files().into_iter().next() else {
        return Ok(None);
    };
    let name = file.name();
    let content_type = file
        .content_type()
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| guess_content_type(&name).to_string());
    let bytes = file
        .read_bytes()
        .await
        .map_err(|err| format!("Could not read {name}: {err}"))?;
    Ok(Some(PickedFile {
        name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

fn guess_content_type(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" | "aac" => "audio/mp4",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_falls_back_to_extension() {
        assert_eq!(guess_content_type("Track 01.MP3"), "audio/mpeg");
        assert_eq!(guess_content_type("cover.jpeg"), "image/jpeg");
        assert_eq!(guess_content_type("notes"), "application/octet-stream");
    }
}
