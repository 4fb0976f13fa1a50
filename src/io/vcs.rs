//! Version-control status via the `git` command-line client
//!
//! Everything that spawns a process sits behind [`VcsClient`]; parsing of the
//! porcelain output is a pure function so it can be tested without git.

use crate::error::{CratosError, Result};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Width of the `## ` branch marker and of the `XY ` file status code
pub const STATUS_PREFIX_LEN: usize = 3;

/// Source of short, porcelain, branch-annotated status text for a module
pub trait VcsClient: Send + Sync {
    fn status(&self, module: &Path) -> Result<String>;
}

/// `git` resolved from `PATH`
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    vcs_dir: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            vcs_dir: ".git".to_string(),
        }
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Metadata directory passed as `--git-dir`, relative to the module
    pub fn with_vcs_dir(mut self, vcs_dir: impl Into<String>) -> Self {
        self.vcs_dir = vcs_dir.into();
        self
    }
}

impl VcsClient for GitCli {
    fn status(&self, module: &Path) -> Result<String> {
        let git_dir = module.join(&self.vcs_dir);
        debug!("Running {} status in {}", self.program, module.display());

        let output = Command::new(&self.program)
            .arg(format!("--git-dir={}", git_dir.display()))
            .arg(format!("--work-tree={}", module.display()))
            .args(["status", "--porcelain", "--branch"])
            .output()
            .map_err(|e| CratosError::vcs(module, e.to_string()))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(CratosError::vcs(
                module,
                String::from_utf8_lossy(&output.stderr).trim_end(),
            ))
        }
    }
}

/// Parsed `status --porcelain --branch` output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitStatus {
    /// First line, e.g. `## main...origin/main`
    pub branch: String,
    /// Remaining lines, e.g. `?? index.js`
    pub files: Vec<String>,
}

impl GitStatus {
    pub fn parse(stdout: &str) -> Self {
        let mut lines = stdout.lines();
        let branch = lines.next().unwrap_or_default().to_string();
        let files = lines
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { branch, files }
    }

    /// Branch description without the `## ` marker
    pub fn branch_name(&self) -> &str {
        strip_status_prefix(&self.branch)
    }

    /// File paths without their two-letter status codes
    pub fn file_names(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|line| strip_status_prefix(line).to_string())
            .collect()
    }
}

fn strip_status_prefix(line: &str) -> &str {
    line.get(STATUS_PREFIX_LEN..).unwrap_or_default()
}
