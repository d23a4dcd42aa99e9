//! File metadata instances returned by `find` and `search`.
//!
//! Only filesystem metadata is collected; file contents are never read.

pub mod factory;
pub mod walker;

pub use factory::MetadataFactory;
pub use walker::MetadataWalker;

use modfiles_api::LinkMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
    Link,
    Other,
}

impl FileKind {
    fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            FileKind::Link
        } else if file_type.is_dir() {
            FileKind::Directory
        } else if file_type.is_file() {
            FileKind::File
        } else {
            FileKind::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Resolved path the request was answered from
    pub path: PathBuf,
    /// Location below `path`; `.` for `path` itself
    pub relative_path: PathBuf,
    pub kind: FileKind,
    pub size: u64,
    /// Unix permission bits, where available
    pub mode: Option<u32>,
    /// Link target, only recorded when links are managed
    pub destination: Option<PathBuf>,
    pub links: LinkMode,
}

impl FileMetadata {
    /// Collects metadata for `base/relative`.
    pub fn collect(base: &Path, relative: &Path, links: LinkMode) -> io::Result<Self> {
        let full_path = join_relative(base, relative);
        let stat = match links {
            LinkMode::Follow => fs::metadata(&full_path)?,
            LinkMode::Manage => fs::symlink_metadata(&full_path)?,
        };

        let kind = FileKind::from_file_type(stat.file_type());
        let destination = if kind == FileKind::Link {
            Some(fs::read_link(&full_path)?)
        } else {
            None
        };

        Ok(Self {
            path: base.to_path_buf(),
            relative_path: relative.to_path_buf(),
            kind,
            size: stat.len(),
            mode: permission_bits(&stat),
            destination,
            links,
        })
    }

    pub fn full_path(&self) -> PathBuf {
        join_relative(&self.path, &self.relative_path)
    }
}

fn join_relative(base: &Path, relative: &Path) -> PathBuf {
    if relative == Path::new(".") {
        base.to_path_buf()
    } else {
        base.join(relative)
    }
}

#[cfg(unix)]
fn permission_bits(stat: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(stat.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn permission_bits(_stat: &fs::Metadata) -> Option<u32> {
    None
}
