//! Parsing of module file URIs.
//!
//! A request names a file as `[scheme://host]/[modules/]<module>/<relative...>`.
//! Only the path component matters: scheme and host are ignored. Dot segments
//! are normalized away by the URL parser; every remaining segment is
//! percent-decoded before it names a module or a file.

use modfiles_api::{ResolveError, ResolveResult};
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use url::Url;

/// Name of the mount segment that prefixes module paths.
pub const MOUNT: &str = "modules";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFileUri {
    raw: String,
    path: String,
    mounted: bool,
    module_name: String,
    relative: Vec<String>,
}

impl ModuleFileUri {
    /// Parses a request URI.
    ///
    /// Bare paths such as `/modules/foo/bar` are accepted as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use modfiles_core::ModuleFileUri;
    ///
    /// let uri = ModuleFileUri::parse("puppetmounts://host/modules/my/local/file").unwrap();
    /// assert_eq!(uri.module_name(), "my");
    /// assert_eq!(uri.relative_path(), "/local/file");
    /// ```
    pub fn parse(raw: &str) -> ResolveResult<Self> {
        let path = request_path(raw)?;
        let encoded: Vec<&str> = path.strip_prefix('/').unwrap_or(&path).split('/').collect();

        // Only a segment that is exactly the mount name gets stripped. The
        // check runs before decoding so it agrees with `authorization_key`.
        let (mounted, rest) = match encoded.split_first() {
            Some((first, rest)) if *first == MOUNT => (true, rest),
            _ => (false, encoded.as_slice()),
        };

        let mut segments = rest
            .iter()
            .map(|segment| decode_segment(raw, segment))
            .collect::<ResolveResult<Vec<String>>>()?
            .into_iter();
        let module_name = segments.next().unwrap_or_default();
        let relative: Vec<String> = segments.collect();

        Ok(Self {
            raw: raw.to_string(),
            path,
            mounted,
            module_name,
            relative,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Path component of the request, as parsed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the request path carried the `/modules` mount.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// First segment after the mount. May be empty.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Segments after the module name, joined with `/` and led by `/`.
    /// Empty when the request names the module itself.
    pub fn relative_path(&self) -> String {
        if self.relative.is_empty() {
            return String::new();
        }
        format!("/{}", self.relative.join("/"))
    }

    /// Location of the requested file below a module's base directory:
    /// `<base>/files/<relative...>`.
    pub fn resolve_in(&self, module_base: &Path) -> PathBuf {
        let mut path = module_base.join("files");
        for segment in &self.relative {
            path.push(segment);
        }
        path
    }

    /// Key presented to the authorization service. Always within the mount.
    pub fn authorization_key(&self) -> String {
        let path = self.path.trim_start_matches('/');
        if self.mounted {
            format!("/{}", path)
        } else {
            format!("/{}/{}", MOUNT, path)
        }
    }
}

fn request_path(raw: &str) -> ResolveResult<String> {
    let invalid = |err: url::ParseError| ResolveError::InvalidUri {
        uri: raw.to_string(),
        reason: err.to_string(),
    };

    match Url::parse(raw) {
        Ok(url) if url.cannot_be_a_base() => Err(ResolveError::InvalidUri {
            uri: raw.to_string(),
            reason: "expected a hierarchical path".to_string(),
        }),
        Ok(url) => Ok(url.path().to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("file:///").map_err(invalid)?;
            let url = base.join(raw).map_err(invalid)?;
            Ok(url.path().to_string())
        }
        Err(err) => Err(invalid(err)),
    }
}

/// Decodes one path segment. A decoded segment must still name a single
/// directory entry, so `%2F`, NUL and `..` are refused.
fn decode_segment(raw: &str, segment: &str) -> ResolveResult<String> {
    let invalid = |reason: String| ResolveError::InvalidUri {
        uri: raw.to_string(),
        reason,
    };

    let decoded = percent_decode_str(segment)
        .decode_utf8()
        .map_err(|err| invalid(format!("segment '{}' is not UTF-8: {}", segment, err)))?;
    if decoded.contains('/') || decoded.contains('\0') || decoded == ".." {
        return Err(invalid(format!(
            "segment '{}' does not name a single entry",
            segment
        )));
    }
    Ok(decoded.into_owned())
}
