use serde::{Deserialize, Serialize};

/// The three platform families `cnest` distinguishes. Resolved once at
/// startup and passed down explicitly, never read from ambient state again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Detects the platform family of the running host. Anything that is not
    /// Windows or macOS is treated as Linux-class.
    pub fn host() -> Platform {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            _ => Platform::Linux,
        }
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

/// The default branch a package is fetched from when the caller gives no
/// explicit revision. Published packages are expected to maintain one branch
/// per platform family with platform-appropriate prebuilt artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultBranches {
    pub windows: String,
    pub macos: String,
    pub linux: String,
}

impl Default for DefaultBranches {
    fn default() -> Self {
        DefaultBranches {
            windows: String::from("main-windows"),
            macos: String::from("main-macos"),
            linux: String::from("main-linux"),
        }
    }
}

impl DefaultBranches {
    pub fn for_platform(&self, platform: Platform) -> &str {
        match platform {
            Platform::Windows => &self.windows,
            Platform::MacOs => &self.macos,
            Platform::Linux => &self.linux,
        }
    }
}

/// Resolves an install request to a concrete revision string.
///
/// An explicit revision is used verbatim, with no validation that it exists
/// remotely (a bad revision surfaces later, at acquisition). With no explicit
/// revision the platform's default branch is selected from the injected table.
pub fn resolve_revision(
    explicit: Option<&str>,
    platform: Platform,
    branches: &DefaultBranches,
) -> String {
    match explicit {
        Some(revision) => revision.to_string(),
        None => branches.for_platform(platform).to_string(),
    }
}
