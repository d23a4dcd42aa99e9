use super::FileMetadata;
use modfiles_api::{CollaboratorResult, LinkMode, ModelFactory};
use std::path::Path;

/// Builds a single `FileMetadata` for a resolved path.
///
/// Links are followed unless the caller asks to manage them.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataFactory;

impl ModelFactory for MetadataFactory {
    type Instance = FileMetadata;

    fn construct(&self, path: &Path, links: Option<LinkMode>) -> CollaboratorResult<FileMetadata> {
        let links = links.unwrap_or(LinkMode::Follow);
        Ok(FileMetadata::collect(path, Path::new("."), links)?)
    }
}
