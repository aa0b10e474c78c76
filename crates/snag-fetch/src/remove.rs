//! Remove operation.

use std::path::Path;

use crate::confirm::Confirmation;
use crate::Result;

/// Recursively delete a path once the confirmation answers yes.
///
/// Removing a path that does not exist is a no-op success; removal is
/// unconditional once confirmed.
pub fn remove(path: &Path, confirm: &dyn Confirmation) -> Result<()> {
    let question = format!("Remove {}", path.display());
    if !confirm.confirm(&question) {
        log::info!("Skipping removal of {}", path.display());
        return Ok(());
    }

    log::info!("Removing {}", path.display());

    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    if metadata.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }

    Ok(())
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
    fn test_remove_missing_path_is_noop() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        assert!(remove(&missing, &AutoConfirm).is_ok());
    }

    #[test]
    fn test_remove_deletes_directory_tree() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("pkg");
        std::fs::create_dir_all(target.join("sub")).unwrap();
        std::fs::write(target.join("sub/file.txt"), b"data").unwrap();

        remove(&target, &AutoConfirm).unwrap();
        assert!(!target.exists());
    }

    #[test]
    fn test_remove_deletes_single_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("file.txt");
        std::fs::write(&target, b"data").unwrap();

        remove(&target, &AutoConfirm).unwrap();
        assert!(!target.exists());
    }

    #[test]
    fn test_remove_declined_keeps_path() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("pkg");
        std::fs::create_dir(&target).unwrap();

        remove(&target, &DenyConfirm).unwrap();
        assert!(target.exists());
    }
}
