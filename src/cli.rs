use clap::{Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    #[command(subcommand)]
    pub(crate) command: CnestCommand,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum CnestCommand {
    /// Initializes a new `cnest.toml` and a starter CMake project in the current directory
    Init,
    /// Installs a package: fetches it, copies headers to `include/` and static
    /// libraries to `lib/`, appends directives to `CMakeLists.txt`, and records
    /// it in `cnest.toml`
    Install {
        /// Name of the package repository to install
        package: String,
        /// Branch, tag, or commit to fetch. Defaults to the platform's default branch
        revision: Option<String>,
    },
    /// List all dependencies recorded in `cnest.toml`
    List,
    /// Build the project with CMake (`cmake -S . -B build` then `cmake --build build`)
    Build,
    /// Run the built project binary from `build/`
    Run {
        args: Vec<String>,
    },
}
