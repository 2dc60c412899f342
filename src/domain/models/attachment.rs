use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tempfile::NamedTempFile;

/// A file picked by the user, loaded but not yet classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Text,
}

impl AttachmentKind {
    /// Returns `None` for types that cannot be attached.
    pub fn from_mime(mime_type: &str) -> Option<AttachmentKind> {
        let mime = mime_type.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            return Some(AttachmentKind::Image);
        }
        if mime.starts_with("text/") || mime == "application/pdf" {
            return Some(AttachmentKind::Text);
        }

        return None;
    }
}

/// Transport form of an attachment as carried in requests and history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub content: String,
}

/// Local copy of an image attachment, removed from disk once released or
/// dropped.
#[derive(Debug)]
pub struct Preview {
    file: NamedTempFile,
}

impl Preview {
    pub fn new(bytes: &[u8], extension: &str) -> Result<Preview> {
        let suffix = if extension.is_empty() {
            "".to_string()
        } else {
            format!(".{extension}")
        };

        let mut file = tempfile::Builder::new()
            .prefix("parley-preview-")
            .suffix(&suffix)
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;

        return Ok(Preview { file });
    }

    pub fn path(&self) -> &Path {
        return self.file.path();
    }

    pub fn release(self) {
        let path = self.file.path().to_path_buf();
        if let Err(err) = self.file.close() {
            tracing::warn!(error = ?err, path = ?path, "Failed to release attachment preview");
        }
    }
}

#[derive(Debug)]
pub struct AttachedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub kind: AttachmentKind,
    pub content: String,
    pub preview: Option<Preview>,
}

impl AttachedFile {
    pub fn to_record(&self) -> FileRecord {
        return FileRecord {
            name: self.name.to_string(),
            mime_type: self.mime_type.to_string(),
            size: self.size,
            content: self.content.to_string(),
        };
    }

    pub fn preview_path(&self) -> Option<&Path> {
        return self.preview.as_ref().map(|preview| return preview.path());
    }

    pub fn release(self) {
        if let Some(preview) = self.preview {
            preview.release();
        }
    }
}
