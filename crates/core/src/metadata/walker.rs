//! Expansion of a resolved path into metadata instances.
//!
//! Understood options:
//! - `recurse`: `true` (unlimited), `false`, a depth, or the same as a string
//! - `ignore`: a glob or a list of globs; matching entries and everything
//!   below them are skipped
//!
//! Other keys are accepted and ignored.

use super::FileMetadata;
use ignore::WalkBuilder;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use modfiles_api::{CollaboratorResult, DirectoryExpander, LinkMode, OptionMap};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataWalker;

impl MetadataWalker {
    /// Maximum walk depth requested by `recurse`; `None` is unlimited.
    pub fn recursion_depth(options: &OptionMap) -> CollaboratorResult<Option<usize>> {
        match options.get("recurse") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(Some(0)),
            Some(Value::Bool(true)) => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(|depth| Some(depth as usize))
                .ok_or_else(|| format!("invalid recurse depth: {}", n).into()),
            Some(Value::String(s)) => match s.as_str() {
                "true" | "inf" => Ok(None),
                "false" => Ok(Some(0)),
                other => other
                    .parse::<usize>()
                    .map(Some)
                    .map_err(|_| format!("invalid recurse value: {}", other).into()),
            },
            Some(other) => Err(format!("invalid recurse value: {}", other).into()),
        }
    }

    /// Globs given by `ignore`.
    pub fn ignore_patterns(options: &OptionMap) -> CollaboratorResult<Vec<String>> {
        match options.get("ignore") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(pattern)) => Ok(vec![pattern.clone()]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| -> CollaboratorResult<String> {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| format!("invalid ignore pattern: {}", item).into())
                })
                .collect(),
            Some(other) => Err(format!("invalid ignore value: {}", other).into()),
        }
    }

    fn build_matcher(root: &Path, patterns: &[String]) -> CollaboratorResult<Gitignore> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            builder.add_line(None, pattern)?;
        }
        Ok(builder.build()?)
    }
}

impl DirectoryExpander for MetadataWalker {
    type Instance = FileMetadata;

    fn expand(
        &self,
        path: &Path,
        links: Option<LinkMode>,
        options: &OptionMap,
    ) -> CollaboratorResult<Vec<FileMetadata>> {
        let links = links.unwrap_or(LinkMode::Follow);
        let depth = Self::recursion_depth(options)?;
        let matcher = Self::build_matcher(path, &Self::ignore_patterns(options)?)?;

        let walker = WalkBuilder::new(path)
            .standard_filters(false)
            .follow_links(links == LinkMode::Follow)
            .max_depth(depth)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                // The requested path itself is always returned
                if entry.depth() == 0 {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !matcher.matched(entry.path(), is_dir).is_ignore()
            })
            .build();

        let mut instances = Vec::new();
        for entry in walker {
            // One unreadable entry or link loop must not hide the rest.
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("Skipping entry below {}: {}", path.display(), err);
                    continue;
                }
            };
            let relative = match entry.path().strip_prefix(path) {
                Ok(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
                Ok(rel) => rel.to_path_buf(),
                Err(_) => continue,
            };
            instances.push(FileMetadata::collect(path, &relative, links)?);
        }

        Ok(instances)
    }
}
