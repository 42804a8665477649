use std::path::Path;
use std::process::Command;
use anyhow::{bail, Result};

/// Capability interface over the version-control tool that materializes
/// package working copies. Tests substitute a deterministic fake so the
/// pipeline can run without network or a `git` binary.
pub trait Fetcher {
    /// Clones `url` at `revision` into `dest`, which must not exist yet.
    fn clone_revision(&self, url: &str, revision: &str, dest: &Path) -> Result<()>;

    /// Brings an existing working copy at `workdir` up to date on `revision`:
    /// fetch remote updates, switch to the revision, fast-forward.
    fn update_to_revision(&self, workdir: &Path, revision: &str) -> Result<()>;
}

/// Production fetcher shelling out to the `git` CLI.
pub struct GitFetcher;

impl GitFetcher {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<()> {
        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git {} failed: {}", args.first().unwrap_or(&""), stderr.trim());
        }
        Ok(())
    }
}

impl Fetcher for GitFetcher {
    fn clone_revision(&self, url: &str, revision: &str, dest: &Path) -> Result<()> {
        let parent = dest.parent().unwrap_or_else(|| Path::new("."));
        let dest_str = dest.to_string_lossy();
        self.run(
            &["clone", "--branch", revision, "--single-branch", url, &dest_str],
            parent,
        )
    }

    fn update_to_revision(&self, workdir: &Path, revision: &str) -> Result<()> {
        self.run(&["fetch", "--all"], workdir)?;
        self.run(&["checkout", revision], workdir)?;
        self.run(&["pull"], workdir)
    }
}
