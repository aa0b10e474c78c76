//! Source classification and filename derivation.

use crate::{Result, SnagError};

/// Kind of source an install request points at, determined once from the
/// source string and passed explicitly through the install path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Zip,
    TarGz,
    Repository,
}

impl SourceKind {
    /// Classify a source string by trailing suffix. Anything that is not a
    /// known archive suffix is treated as a version-control repository URL.
    pub fn classify(source: &str) -> Self {
        let source = source.to_lowercase();

        if source.ends_with(".zip") {
            SourceKind::Zip
        } else if source.ends_with(".tar.gz") || source.ends_with(".tgz") {
            SourceKind::TarGz
        } else {
            SourceKind::Repository
        }
    }
}

/// Derive the local filename for a download from the last path segment of
/// the source URL.
pub fn archive_file_name(source: &str) -> Result<String> {
    let segment = match url::Url::parse(source) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|segments| segments.last().map(str::to_string))
            .unwrap_or_default(),
        // Not a parseable URL, fall back to a raw split
        Err(_) => source.rsplit('/').next().unwrap_or_default().to_string(),
    };

    if segment.is_empty() {
        return Err(SnagError::InstallationFailed(format!(
            "Cannot derive a file name from {}",
            source
        )));
    }

    Ok(segment)
}

/// Derive the sibling `.tar` filename for a gzipped tarball download.
pub fn tar_file_name(archive_name: &str) -> String {
    if let Some(stem) = archive_name.strip_suffix(".tar.gz") {
        format!("{}.tar", stem)
    } else if let Some(stem) = archive_name.strip_suffix(".tgz") {
        format!("{}.tar", stem)
    } else {
        format!("{}.tar", archive_name)
    }
}
