use std::path::Path;
use colored::Colorize;
use walkdir::WalkDir;
use crate::resolve::Platform;

/// Capability interface over filesystem permission changes, so tests can
/// observe or stub the Windows pre-removal pass.
pub trait PermissionFixer {
    fn make_writable(&self, path: &Path) -> std::io::Result<()>;
}

/// Grants full owner permissions using the platform's native mechanism.
pub struct OwnerPermissions;

impl PermissionFixer for OwnerPermissions {
    fn make_writable(&self, path: &Path) -> std::io::Result<()> {
        let mut perms = std::fs::metadata(path)?.permissions();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            perms.set_mode(0o755);
        }
        #[cfg(not(unix))]
        perms.set_readonly(false);
        std::fs::set_permissions(path, perms)
    }
}

/// Best-effort recursive removal of the scratch modules directory.
///
/// On Windows-class hosts every entry is first made writable (ignoring
/// individual failures), since git commonly leaves read-only objects that
/// block deletion. A removal failure is reported as a warning and never
/// propagated: cleanup must not turn a successful install into a failure.
pub fn remove_scratch_dir(dir: &Path, platform: Platform, fixer: &dyn PermissionFixer) {
    if !dir.exists() {
        return;
    }
    if platform.is_windows() {
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            let _ = fixer.make_writable(entry.path());
        }
    }
    if let Err(err) = std::fs::remove_dir_all(dir) {
        eprintln!(
            "{} could not remove {}: {}",
            "warning:".yellow(),
            dir.display(),
            err
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::tempdir;

    struct RecordingFixer {
        seen: RefCell<Vec<PathBuf>>,
    }

    impl PermissionFixer for RecordingFixer {
        fn make_writable(&self, path: &Path) -> std::io::Result<()> {
            self.seen.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn test_removes_directory_tree() {
        let dir = tempdir().unwrap();
        let scratch = dir.path().join(".cnest");
        std::fs::create_dir_all(scratch.join("widgets").join("include")).unwrap();
        std::fs::write(scratch.join("widgets").join("include").join("w.h"), "h").unwrap();

        remove_scratch_dir(&scratch, Platform::Linux, &OwnerPermissions);
        assert!(!scratch.exists());
    }

    #[test]
    fn test_missing_directory_is_a_no_op() {
        let dir = tempdir().unwrap();
        remove_scratch_dir(&dir.path().join("gone"), Platform::Linux, &OwnerPermissions);
    }

    #[test]
    fn test_windows_platform_fixes_permissions_first() {
        let dir = tempdir().unwrap();
        let scratch = dir.path().join(".cnest");
        std::fs::create_dir_all(&scratch).unwrap();
        std::fs::write(scratch.join("file"), "x").unwrap();

        let fixer = RecordingFixer { seen: RefCell::new(Vec::new()) };
        remove_scratch_dir(&scratch, Platform::Windows, &fixer);
        assert!(!scratch.exists());
        assert!(fixer.seen.borrow().iter().any(|p| p.ends_with("file")));
    }

    #[test]
    fn test_linux_platform_skips_permission_pass() {
        let dir = tempdir().unwrap();
        let scratch = dir.path().join(".cnest");
        std::fs::create_dir_all(&scratch).unwrap();

        let fixer = RecordingFixer { seen: RefCell::new(Vec::new()) };
        remove_scratch_dir(&scratch, Platform::Linux, &fixer);
        assert!(fixer.seen.borrow().is_empty());
    }
}
