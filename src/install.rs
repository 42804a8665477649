use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::cleanup::{remove_scratch_dir, PermissionFixer};
use crate::descriptor::append_package_directives;
use crate::fetch::Fetcher;
use crate::integrate::{integrate_headers, integrate_libs};
use crate::manifest::{ManifestError, ProjectManifest};
use crate::resolve::{resolve_revision, DefaultBranches, Platform};

/// Default location packages are fetched from: `<host>/<package>.git`.
pub const DEFAULT_PACKAGE_HOST: &str = "https://github.com/cnest-packages";

/// One install request: a package name matching a remote repository, and an
/// optional explicit branch/tag/commit to fetch instead of the platform default.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    pub package: String,
    pub revision: Option<String>,
}

/// Everything the pipeline needs to know about the project it operates on.
/// File and directory names are carried here rather than as module constants
/// so tests can redirect the whole pipeline into a temporary project root.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    pub project_root: PathBuf,
    pub manifest_file: String,
    pub modules_dir: String,
    pub include_dir: String,
    pub lib_dir: String,
    pub build_descriptor: String,
    pub package_host: String,
    pub platform: Platform,
    pub branches: DefaultBranches,
}

impl InstallConfig {
    /// The standard configuration for a project rooted at `root`, with the
    /// platform detected from the running host.
    pub fn for_project<P: AsRef<Path>>(root: P) -> InstallConfig {
        InstallConfig {
            project_root: root.as_ref().to_path_buf(),
            manifest_file: String::from("cnest.toml"),
            modules_dir: String::from(".cnest"),
            include_dir: String::from("include"),
            lib_dir: String::from("lib"),
            build_descriptor: String::from("CMakeLists.txt"),
            package_host: String::from(DEFAULT_PACKAGE_HOST),
            platform: Platform::host(),
            branches: DefaultBranches::default(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(&self.manifest_file)
    }

    pub fn modules_path(&self) -> PathBuf {
        self.project_root.join(&self.modules_dir)
    }
}

/// Result of a completed pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The package was fetched, integrated, and recorded at this revision.
    Installed { revision: String },
    /// The manifest already recorded the package at this revision; the
    /// pipeline short-circuited without touching the filesystem.
    AlreadyInstalled { revision: String },
}

/// Fatal pipeline errors. All of them leave the manifest exactly as it was
/// before the call, except `ManifestWriteFailed`, which can only occur at the
/// commit point after every filesystem step has already succeeded.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("no manifest found at project root; run `cnest init` first")]
    PreconditionMissing,

    #[error("failed to read project manifest: {0}")]
    ManifestReadFailed(#[source] ManifestError),

    #[error("failed to acquire {package} at {revision}: {reason}")]
    AcquisitionFailed {
        package: String,
        revision: String,
        reason: String,
    },

    #[error("failed to integrate {package}: {reason}")]
    IntegrationFailed { package: String, reason: String },

    #[error("failed to record {1} in manifest: {0}")]
    ManifestWriteFailed(#[source] ManifestError, String),
}

/// Runs the full installation pipeline for one request.
///
/// Stage order: resolve, acquire, integrate headers, integrate libraries,
/// update the build descriptor, commit the manifest, clean up the scratch
/// directory. The manifest is only written after every filesystem step has
/// succeeded, so an abort anywhere earlier never leaves the manifest claiming
/// a package that was not actually integrated. Cleanup runs only on the
/// success path; a failed install leaves its working copy behind for the next
/// invocation to update in place.
pub fn install(
    config: &InstallConfig,
    fetcher: &dyn Fetcher,
    fixer: &dyn PermissionFixer,
    request: &InstallRequest,
) -> Result<InstallOutcome, InstallError> {
    let manifest_path = config.manifest_path();
    if !manifest_path.exists() {
        return Err(InstallError::PreconditionMissing);
    }
    let mut manifest =
        ProjectManifest::load(&manifest_path).map_err(InstallError::ManifestReadFailed)?;

    let revision = resolve_revision(
        request.revision.as_deref(),
        config.platform,
        &config.branches,
    );

    if let Some(recorded) = manifest.installed_revision(&request.package) {
        return Ok(InstallOutcome::AlreadyInstalled {
            revision: recorded.to_string(),
        });
    }

    println!("Installing {} (revision: {})", request.package, revision);
    let workdir = acquire(config, fetcher, &request.package, &revision)?;
    integrate(config, &request.package, &workdir)?;

    append_package_directives(
        &config.project_root.join(&config.build_descriptor),
        &request.package,
        &manifest.project.name,
        &config.include_dir,
        &config.project_root.join(&config.lib_dir),
        &config.lib_dir,
        config.platform,
    )
    .map_err(|e| InstallError::IntegrationFailed {
        package: request.package.clone(),
        reason: e.to_string(),
    })?;

    // Commit point: the only manifest mutation in the pipeline.
    manifest.record(&request.package, &revision);
    manifest
        .save(&manifest_path)
        .map_err(|e| InstallError::ManifestWriteFailed(e, request.package.clone()))?;

    remove_scratch_dir(&config.modules_path(), config.platform, fixer);

    Ok(InstallOutcome::Installed { revision })
}

/// Ensures a working copy of `package` at `revision` exists under the scratch
/// modules directory, cloning fresh or updating in place.
fn acquire(
    config: &InstallConfig,
    fetcher: &dyn Fetcher,
    package: &str,
    revision: &str,
) -> Result<PathBuf, InstallError> {
    let acquisition_failed = |e: anyhow::Error| InstallError::AcquisitionFailed {
        package: package.to_string(),
        revision: revision.to_string(),
        reason: e.to_string(),
    };

    let workdir = config.modules_path().join(package);
    if workdir.exists() {
        fetcher
            .update_to_revision(&workdir, revision)
            .map_err(acquisition_failed)?;
    } else {
        std::fs::create_dir_all(config.modules_path())
            .map_err(|e| acquisition_failed(e.into()))?;
        let url = format!("{}/{}.git", config.package_host, package);
        fetcher
            .clone_revision(&url, revision, &workdir)
            .map_err(acquisition_failed)?;
    }
    Ok(workdir)
}

/// Copies headers then libraries from the working copy into the project tree.
fn integrate(config: &InstallConfig, package: &str, workdir: &Path) -> Result<(), InstallError> {
    let integration_failed = |e: anyhow::Error| InstallError::IntegrationFailed {
        package: package.to_string(),
        reason: e.to_string(),
    };

    let headers = integrate_headers(
        &workdir.join(&config.include_dir),
        &config.project_root.join(&config.include_dir),
    )
    .map_err(integration_failed)?;
    let libs = integrate_libs(
        &workdir.join(&config.lib_dir),
        &config.project_root.join(&config.lib_dir),
    )
    .map_err(integration_failed)?;
    println!("  copied {} header file(s) and {} static lib(s)", headers, libs);
    Ok(())
}
