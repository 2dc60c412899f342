#[cfg(test)]
#[path = "attachments_test.rs"]
mod tests;

use std::path::Path;

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::fs;

use crate::domain::models::AttachedFile;
use crate::domain::models::AttachmentKind;
use crate::domain::models::Preview;
use crate::domain::models::RawFile;

pub const MAX_ATTACHMENTS: usize = 5;

#[derive(Debug)]
pub enum BatchOutcome {
    Accepted(Vec<AttachedFile>),
    /// The whole batch was refused. `remaining` is how many more files could
    /// have been attached.
    Rejected { remaining: usize },
}

pub struct Attachments {}

impl Attachments {
    /// Loads a file from disk, guessing its MIME type from the extension.
    pub async fn read(path: &Path) -> Result<RawFile> {
        let bytes = fs::read(path).await?;
        let name = path
            .file_name()
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return path.to_string_lossy().to_string());
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        return Ok(RawFile {
            name,
            mime_type,
            bytes,
        });
    }

    /// Turns a batch of picked files into attachments. Batches that would push
    /// the total past `MAX_ATTACHMENTS` are refused as a whole. Files of an
    /// unsupported type are skipped.
    pub fn process(batch: Vec<RawFile>, current_count: usize) -> BatchOutcome {
        let remaining = MAX_ATTACHMENTS.saturating_sub(current_count);
        if batch.len() > remaining {
            tracing::debug!(
                batch = batch.len(),
                current = current_count,
                "Rejected attachment batch"
            );
            return BatchOutcome::Rejected { remaining };
        }

        let files = batch
            .into_iter()
            .filter_map(|raw| {
                return Attachments::classify(raw);
            })
            .collect::<Vec<AttachedFile>>();

        return BatchOutcome::Accepted(files);
    }

    fn classify(raw: RawFile) -> Option<AttachedFile> {
        let kind = match AttachmentKind::from_mime(&raw.mime_type) {
            Some(kind) => kind,
            None => {
                tracing::debug!(
                    name = raw.name.as_str(),
                    mime_type = raw.mime_type.as_str(),
                    "Skipping unsupported attachment"
                );
                return None;
            }
        };

        let size = raw.bytes.len() as u64;
        let mut preview = None;
        let content = match kind {
            AttachmentKind::Image => {
                match Preview::new(&raw.bytes, &preview_extension(&raw)) {
                    Ok(handle) => preview = Some(handle),
                    Err(err) => {
                        tracing::warn!(
                            error = ?err,
                            name = raw.name.as_str(),
                            "Failed to create preview"
                        );
                    }
                }
                format!(
                    "data:{};base64,{}",
                    raw.mime_type,
                    STANDARD.encode(&raw.bytes)
                )
            }
            AttachmentKind::Text => String::from_utf8_lossy(&raw.bytes).to_string(),
        };

        return Some(AttachedFile {
            name: raw.name,
            mime_type: raw.mime_type,
            size,
            kind,
            content,
            preview,
        });
    }
}

fn preview_extension(raw: &RawFile) -> String {
    if let Some(ext) = Path::new(&raw.name).extension() {
        return ext.to_string_lossy().to_string();
    }

    return mime_guess::get_mime_extensions_str(&raw.mime_type)
        .and_then(|exts| return exts.first())
        .map(|ext| return ext.to_string())
        .unwrap_or_default();
}
