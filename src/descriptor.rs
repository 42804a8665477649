use std::io::Write;
use std::path::Path;
use anyhow::{Context, Result};
use crate::integrate::is_static_lib;
use crate::resolve::Platform;

/// Marker comment guarding the Windows system-library block. The descriptor
/// is never parsed, only scanned for this exact line.
const PLATFORM_LIBS_MARKER: &str = "# cnest: platform libraries";

/// Socket/system libraries every package needs on Windows-class hosts.
const WINDOWS_SYSTEM_LIBS: [&str; 2] = ["ws2_32", "wsock32"];

/// Appends one package's include and link directives to the build descriptor.
///
/// The block is pure text append: a marker comment naming the package, an
/// include directive for the project header directory, and one link directive
/// per static-library file currently present in the project library directory,
/// all targeting `target_name`. On Windows-class hosts the fixed system
/// libraries are appended as well, once per project, guarded by a marker
/// comment. Nothing is ever rolled back.
pub fn append_package_directives(
    descriptor: &Path,
    package: &str,
    target_name: &str,
    include_dir: &str,
    lib_dir: &Path,
    lib_dir_name: &str,
    platform: Platform,
) -> Result<()> {
    let existing = std::fs::read_to_string(descriptor).unwrap_or_default();
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(descriptor)
        .with_context(|| format!("could not open {}", descriptor.display()))?;

    writeln!(file)?;
    writeln!(file, "# cnest: {}", package)?;
    writeln!(file, "include_directories({})", include_dir)?;
    for lib in lib_files(lib_dir)? {
        writeln!(file, "target_link_libraries({} {}/{})", target_name, lib_dir_name, lib)?;
    }

    if platform.is_windows() && !existing.contains(PLATFORM_LIBS_MARKER) {
        writeln!(file, "{}", PLATFORM_LIBS_MARKER)?;
        for lib in WINDOWS_SYSTEM_LIBS {
            writeln!(file, "target_link_libraries({} {})", target_name, lib)?;
        }
    }
    Ok(())
}

/// Static-library file names currently in the project library directory,
/// sorted for deterministic output.
fn lib_files(lib_dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    if !lib_dir.exists() {
        return Ok(files);
    }
    for entry in std::fs::read_dir(lib_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() && is_static_lib(&entry.path()) {
            files.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    files.sort();
    Ok(files)
}
