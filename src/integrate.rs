use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Extensions recognized as static libraries: the Unix archive suffix and the
/// Windows static-library suffix. Shared with the build descriptor updater.
pub const STATIC_LIB_EXTENSIONS: [&str; 2] = ["a", "lib"];

/// Checks whether a path carries one of the recognized static-library extensions.
pub fn is_static_lib(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| STATIC_LIB_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Copies every regular file under `source` into `dest`, recreating relative
/// paths and overwriting existing files. Prints a running percentage after
/// each file. A missing `source` directory is silently skipped.
///
/// Any read or copy failure aborts integration; the caller treats that as
/// fatal for the whole install.
///
/// Returns the number of files copied.
pub fn integrate_headers(source: &Path, dest: &Path) -> Result<usize> {
    if !source.exists() {
        return Ok(0);
    }
    let files: Vec<PathBuf> = WalkDir::new(source)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();
    // No progress output for an empty source tree.
    if files.is_empty() {
        return Ok(0);
    }

    for (index, file) in files.iter().enumerate() {
        let relative = file.strip_prefix(source)?;
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        std::fs::copy(file, &target)
            .with_context(|| format!("could not copy header {}", file.display()))?;
        let percent = (index + 1) * 100 / files.len();
        println!("  [{:>3}%] {}", percent, relative.display());
    }
    Ok(files.len())
}

/// Copies every static-library file under `source` (after flattening) into
/// `dest`, overwriting existing files. Files with other extensions are
/// ignored. A missing `source` directory is silently skipped.
///
/// Returns the number of files copied.
pub fn integrate_libs(source: &Path, dest: &Path) -> Result<usize> {
    if !source.exists() {
        return Ok(0);
    }
    let flattened = flatten_single_dirs(source.to_path_buf());
    let mut copied = 0;
    for entry in WalkDir::new(&flattened).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || !is_static_lib(entry.path()) {
            continue;
        }
        let file_name = entry.file_name();
        std::fs::create_dir_all(dest)
            .with_context(|| format!("could not create {}", dest.display()))?;
        std::fs::copy(entry.path(), dest.join(file_name))
            .with_context(|| format!("could not copy library {}", entry.path().display()))?;
        copied += 1;
    }
    Ok(copied)
}

/// Descends into `dir` as long as it contains exactly one entry and that entry
/// is itself a directory. Handles packages that nest their libraries under a
/// single platform or architecture folder.
pub fn flatten_single_dirs(mut dir: PathBuf) -> PathBuf {
    loop {
        let entries: Vec<PathBuf> = match std::fs::read_dir(&dir) {
            Ok(read) => read.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
            Err(_) => return dir,
        };
        match entries.as_slice() {
            [only] if only.is_dir() => dir = only.clone(),
            _ => return dir,
        }
    }
}
