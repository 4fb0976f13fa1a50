//! cratos: discover and inspect git-managed package modules
//!
//! A *module* is a directory holding both a `.git` directory and a
//! `package.json` manifest. cratos walks one or more root directories for
//! modules, reads each module's package name and version together with its
//! `git status`, and prints aggregate views over the whole set.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cratos::{parse_argv, Cratos, Result};
//!
//! fn main() -> Result<()> {
//!     let argv = parse_argv(["cratos", "cratos", "list", "--path=/src"]);
//!     let output = Cratos::default().run_to_string(&argv)?;
//!     print!("{}", output);
//!     Ok(())
//! }
//! ```
//!
//! ## Discovery only
//!
//! ```rust,no_run
//! use cratos::ModuleDiscovery;
//! use std::path::Path;
//!
//! for module in ModuleDiscovery::new().discover(Path::new("/src")) {
//!     println!("{}", module.display());
//! }
//! ```
//!
//! # Architecture
//!
//! - [`args`]: classification of raw command-line tokens
//! - [`config`]: root resolution from flags and the environment, discovery settings
//! - [`io`]: directory snapshots, manifest reading, the `git` client
//! - [`core`]: module discovery and per-module aggregation
//! - [`commands`]: command selection and output formatting
//! - [`error`]: error types

pub use args::{parse_args_os, parse_argv, ParsedArgv};
pub use commands::{usage, Command, Cratos, VERSION};
pub use config::{DiscoveryConfig, Environment, MapEnv, ProcessEnv, RootSource, RootSpec};
pub use crate::core::{ModuleDiscovery, ModuleInfoAggregator, ModuleRecord};
pub use error::{CratosError, Result};
pub use io::{DirectoryNode, Dirent, GitCli, GitStatus, PackageManifest, VcsClient};

pub mod args;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
