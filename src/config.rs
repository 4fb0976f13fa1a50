//! Root resolution and discovery configuration
//!
//! The process environment is reached only through [`Environment`], so callers
//! (and tests) can hand in a synthetic one.

use crate::args::ParsedArgv;
use crate::error::{CratosError, Result};
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Environment variable listing module roots, colon-delimited
pub const CRATOS_PATH: &str = "CRATOS_PATH";

/// Fallback root when `CRATOS_PATH` is unset
pub const HOME: &str = "HOME";

/// Flag overriding both environment variables
pub const PATH_FLAG: &str = "--path";

/// Read-only access to environment variables
pub trait Environment: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory environment
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Where the roots were taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    Flag,
    CratosPath,
    Home,
}

/// Ordered list of absolute directories to search for modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSpec {
    pub source: RootSource,
    pub roots: Vec<PathBuf>,
}

impl RootSpec {
    /// Pick exactly one source: `--path=`, then `CRATOS_PATH`, then `HOME`
    pub fn resolve(argv: &ParsedArgv, env: &dyn Environment) -> Result<Self> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        let flag = argv.flag_value(PATH_FLAG).map(str::to_string);

        let (source, raw) = if let Some(value) = non_empty(flag) {
            (RootSource::Flag, value)
        } else if let Some(value) = non_empty(env.var(CRATOS_PATH)) {
            (RootSource::CratosPath, value)
        } else if let Some(value) = non_empty(env.var(HOME)) {
            warn!("CRATOS_PATH not set; finding modules from HOME");
            (RootSource::Home, value)
        } else {
            return Err(CratosError::RootResolution);
        };

        let spec = Self::parse(source, &raw)?;
        debug!("Resolved roots from {:?}: {:?}", spec.source, spec.roots);
        Ok(spec)
    }

    /// Split a colon-delimited value into absolute paths, skipping empty segments
    pub fn parse(source: RootSource, raw: &str) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let roots = raw
            .split(':')
            .filter(|segment| !segment.is_empty())
            .map(|segment| normalize(&cwd.join(segment)))
            .collect();

        Ok(Self { source, roots })
    }
}

/// Fold `.` and `..` components lexically, without touching the filesystem
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Configuration for module discovery
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Version-control metadata directory marking a module
    pub vcs_dir: String,
    /// Package manifest file marking a module
    pub manifest_file: String,
    /// Directory names never descended into
    pub ignore_dirs: BTreeSet<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            vcs_dir: ".git".to_string(),
            manifest_file: "package.json".to_string(),
            ignore_dirs: [".git", "node_modules"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl DiscoveryConfig {
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_dirs.contains(name)
    }

    /// [`is_ignored`](Self::is_ignored) for raw file names; non-UTF-8 names never match
    pub fn is_ignored_os(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|name| self.is_ignored(name))
    }
}
