use modfiles_core::metadata::{FileKind, FileMetadata};
use tabled::Tabled;

/// A terminal view of one resolved file
#[derive(Tabled)]
pub struct FileRow {
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Size")]
    pub size: String,
    #[tabled(rename = "Mode")]
    pub mode: String,
    #[tabled(rename = "Target")]
    pub target: String,
}

impl FileRow {
    pub fn from_metadata(meta: &FileMetadata) -> Self {
        let kind = match meta.kind {
            FileKind::File => "file",
            FileKind::Directory => "directory",
            FileKind::Link => "link",
            FileKind::Other => "other",
        };

        Self {
            path: meta.full_path().display().to_string(),
            kind: kind.to_string(),
            size: format_size(meta.size),
            mode: meta
                .mode
                .map(|m| format!("{:04o}", m))
                .unwrap_or_else(|| "-".to_string()),
            target: meta
                .destination
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    }
}
