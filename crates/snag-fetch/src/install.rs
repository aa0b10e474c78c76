//! Install operation.

use std::path::{Path, PathBuf};

use crate::confirm::Confirmation;
use crate::downloader::{archive, FileDownloader, GitDownloader};
use crate::http::HttpClient;
use crate::source::{archive_file_name, tar_file_name, SourceKind};
use crate::Result;

/// Installs a package from a source reference into a destination path.
///
/// Archive downloads and their intermediate files land in the working
/// directory; the working directory defaults to the process working
/// directory.
pub struct Installer {
    files: FileDownloader,
    git: GitDownloader,
    work_dir: PathBuf,
}

impl Installer {
    /// Create an installer with the default HTTP client.
    pub fn new() -> Result<Self> {
        Ok(Self {
            files: FileDownloader::new(HttpClient::new()?),
            git: GitDownloader::new(),
            work_dir: PathBuf::from("."),
        })
    }

    /// Set the directory that holds downloads and intermediate files.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    /// Use a specific git downloader (e.g. with an explicit SSH key).
    pub fn with_git(mut self, git: GitDownloader) -> Self {
        self.git = git;
        self
    }

    /// Install `source` to `destination`.
    ///
    /// The source is classified once by suffix: `.zip` archives extract
    /// straight into the destination, `.tar.gz`/`.tgz` archives extract in
    /// the working directory and their top-level directory is renamed to the
    /// destination, anything else is shallow-cloned. Errors abort the
    /// operation as-is; partially written files are left in place.
    pub fn install<F>(
        &self,
        source: &str,
        destination: &Path,
        confirm: &dyn Confirmation,
        progress: Option<F>,
    ) -> Result<()>
    where
        F: FnMut(u64, u64),
    {
        let question = format!("Install {} to {}", source, destination.display());
        if !confirm.confirm(&question) {
            log::info!("Skipping install of {}", source);
            return Ok(());
        }

        match SourceKind::classify(source) {
            SourceKind::Zip => self.install_zip(source, destination, progress),
            SourceKind::TarGz => self.install_tar_gz(source, destination, progress),
            SourceKind::Repository => self.install_repository(source, destination),
        }
    }

    fn install_zip<F>(&self, source: &str, destination: &Path, progress: Option<F>) -> Result<()>
    where
        F: FnMut(u64, u64),
    {
        let archive_path = self.work_dir.join(archive_file_name(source)?);
        self.files.download(source, &archive_path, progress)?;

        let files = archive::unzip(&archive_path, destination)?;
        log::info!(
            "Extracted {} entries to {}",
            files.len(),
            destination.display()
        );

        std::fs::remove_file(&archive_path)?;
        Ok(())
    }

    fn install_tar_gz<F>(&self, source: &str, destination: &Path, progress: Option<F>) -> Result<()>
    where
        F: FnMut(u64, u64),
    {
        let archive_name = archive_file_name(source)?;
        let archive_path = self.work_dir.join(&archive_name);
        self.files.download(source, &archive_path, progress)?;

        let tar_path = self.work_dir.join(tar_file_name(&archive_name));
        archive::gunzip(&archive_path, &tar_path)?;
        std::fs::remove_file(&archive_path)?;

        let top_dir = archive::untar_file(&tar_path, &self.work_dir)?;
        std::fs::remove_file(&tar_path)?;

        // Rename, not copy: the extracted top-level directory becomes the
        // destination.
        log::debug!(
            "Renaming {} to {}",
            self.work_dir.join(&top_dir).display(),
            destination.display()
        );
        std::fs::rename(self.work_dir.join(&top_dir), destination)?;
        Ok(())
    }

    fn install_repository(&self, source: &str, destination: &Path) -> Result<()> {
        log::info!("Cloning {} to {}", source, destination.display());
        self.git.clone_tree(source, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AutoConfirm;
    use tempfile::TempDir;

    struct DenyConfirm;

    impl Confirmation for DenyConfirm {
        fn confirm(&self, _question: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_install_declined_is_noop() {
        let temp = TempDir::new().unwrap();
        let installer = Installer::new().unwrap().with_work_dir(temp.path());

        installer
            .install(
                "https://example.com/pkg.zip",
                &temp.path().join("dest"),
                &DenyConfirm,
                None::<fn(u64, u64)>,
            )
            .unwrap();

        assert!(!temp.path().join("dest").exists());
        assert!(!temp.path().join("pkg.zip").exists());
    }

    #[test]
    fn test_install_unfetchable_archive_fails() {
        let temp = TempDir::new().unwrap();
        let installer = Installer::new().unwrap().with_work_dir(temp.path());

        // Nothing listens on this port
        let result = installer.install(
            "http://127.0.0.1:1/pkg.zip",
            &temp.path().join("dest"),
            &AutoConfirm,
            None::<fn(u64, u64)>,
        );

        assert!(result.is_err());
        assert!(!temp.path().join("dest").exists());
    }
}
