//! # Cnest Core Library
//!
//! This crate contains the core logic and building blocks of the `cnest` tool – a project-local
//! dependency manager for native C/C++ projects with a `cargo`-like UX.
//!
//! `cnest` fetches named remote packages, integrates their headers and static libraries into the
//! consuming project's `include/` and `lib/` directories, appends the matching directives to the
//! project's `CMakeLists.txt`, and records the installed revision in the `cnest.toml` manifest.
//!
//! This library is built for the `cnest` CLI, but you can also reuse it as a backend in other tools.
//!
//! ## Modules Overview
//! - [`manifest`] – Parsing and serialization of `cnest.toml` manifest files
//! - [`resolve`] – Platform detection and default-branch revision resolution
//! - [`fetch`] – The `Fetcher` capability and its git-backed implementation
//! - [`integrate`] – Copying headers and static libraries into the project tree
//! - [`descriptor`] – Appending include/link directives to `CMakeLists.txt`
//! - [`cleanup`] – Best-effort removal of the scratch modules directory
//! - [`install`] – The installation pipeline orchestrator


pub mod manifest;
pub mod resolve;
pub mod fetch;
pub mod integrate;
pub mod descriptor;
pub mod cleanup;
pub mod install;

pub use manifest::*;
pub use resolve::*;
pub use fetch::*;
pub use integrate::*;
pub use descriptor::*;
pub use cleanup::*;
pub use install::*;
