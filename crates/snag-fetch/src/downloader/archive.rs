//! Archive extraction (zip, tar, gzip).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;

use crate::{Result, SnagError};

/// Reject entry paths that could resolve outside the extraction root.
///
/// Applied uniformly to zip and tar entries: absolute paths and `..`
/// components fail the specific entry, leaving earlier entries in place.
fn validate_entry_path(path: &Path) -> Result<()> {
    for component in path.components() {
        match component {
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(SnagError::PathTraversal {
                    path: path.display().to_string(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Extract a zip archive into the destination directory.
///
/// Returns the paths written, directories included.
pub fn unzip(src: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let file = File::open(src)?;
    let reader = BufReader::new(file);
    let mut archive = zip::ZipArchive::new(reader)
        .map_err(|e| SnagError::ExtractionFailed(format!("Failed to open zip: {}", e)))?;

    std::fs::create_dir_all(dest)?;

    let mut written = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| SnagError::ExtractionFailed(format!("Failed to read zip entry: {}", e)))?;

        // Resolved entry path must stay within the destination directory
        let relative_path = entry.enclosed_name().ok_or_else(|| SnagError::PathTraversal {
            path: entry.name().to_string(),
        })?;
        validate_entry_path(&relative_path)?;

        let outpath = dest.join(&relative_path);

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath)?;
            written.push(outpath);
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut outfile = File::create(&outpath)?;
        std::io::copy(&mut entry, &mut outfile)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
            }
        }

        log::debug!("Extracted {}", outpath.display());
        written.push(outpath);
    }

    Ok(written)
}

/// Extract a tar stream into the target directory, keeping the archive's own
/// layout, and return the name of the top-level directory taken from the
/// first real entry. `pax_global_header` entries are skipped.
pub fn untar<R: Read>(reader: R, target: &Path) -> Result<PathBuf> {
    let mut archive = tar::Archive::new(reader);
    let mut top_dir: Option<PathBuf> = None;

    let entries = archive
        .entries()
        .map_err(|e| SnagError::ExtractionFailed(format!("Failed to read tar: {}", e)))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| SnagError::ExtractionFailed(format!("Failed to read tar entry: {}", e)))?;

        let entry_path = entry
            .path()
            .map_err(|e| SnagError::ExtractionFailed(format!("Invalid path in tar: {}", e)))?
            .into_owned();

        if entry_path.as_os_str() == "pax_global_header" {
            continue;
        }

        validate_entry_path(&entry_path)?;

        if top_dir.is_none() {
            let first = entry_path.components().find_map(|c| match c {
                Component::Normal(name) => Some(PathBuf::from(name)),
                _ => None,
            });
            top_dir = first;
        }

        let outpath = target.join(&entry_path);

        if entry.header().entry_type().is_dir() {
            std::fs::create_dir_all(&outpath)?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)?;
        }

        entry
            .unpack(&outpath)
            .map_err(|e| SnagError::ExtractionFailed(format!("Failed to extract: {}", e)))?;
        log::debug!("Extracted {}", outpath.display());
    }

    top_dir.ok_or_else(|| SnagError::ExtractionFailed("Archive contains no entries".to_string()))
}

/// Extract a tar file into the target directory. See [`untar`].
pub fn untar_file(tarball: &Path, target: &Path) -> Result<PathBuf> {
    let file = File::open(tarball)?;
    untar(BufReader::new(file), target)
}

/// Decompress a gzip file to the target path.
pub fn gunzip(source: &Path, target: &Path) -> Result<()> {
    let file = File::open(source)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut writer = File::create(target)?;
    std::io::copy(&mut decoder, &mut writer)?;
    Ok(())
}
