//! Command dispatch
//!
//! [`Command::from_argv`] applies a fixed precedence: version flag, help flag
//! or no command, then the known command names, then `Unknown`. The module
//! commands discover every module under the resolved roots, aggregate them,
//! and print one line per module (per changed file for `status`).

use crate::args::ParsedArgv;
use crate::config::{DiscoveryConfig, Environment, ProcessEnv, RootSpec};
use crate::core::{ModuleDiscovery, ModuleInfoAggregator, ModuleRecord};
use crate::error::Result;
use crate::io::{GitCli, VcsClient};
use log::debug;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "\
usage: cratos [--version] [-v] [--help] [-h] [--path=<path>] <command> [<args>]

commands:

    list, ls                      list cratos modules

    branch, b                     get branch for cratos modules

    s[tatus]                      get status for cratos modules

    status-branch, sb             get branch and changed files for cratos modules

    ch[eckout] <branch>           checkout branch for relevant cratos modules

    fetch                         fetch remotes for cratos modules

    merge                         merge remote into current branch for cratos modules

    pull                          fetch+merge remote into current branch for cratos modules

    push                          push current branch to remote for cratos modules

    dist <major|minor|patch>      version bump && publish cratos modules, skip unchanged modules

    clean                         remove ignored and untracked files for cratos modules

    i[nstall]                     install cratos module dependencies into local node_modules

    i[nstall] --save, -s <mod>    install and save mod into cratos module dependencies modify package.json

    link, ln                      symlink cratos modules into all other cratos modules' local node_modules
";

/// Usage text as printed by `--help`
pub fn usage() -> &'static str {
    USAGE
}

/// What a parsed command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Version,
    Help,
    List,
    Status,
    Branch,
    StatusBranch,
    Unknown(String),
}

impl Command {
    pub fn from_argv(argv: &ParsedArgv) -> Self {
        if argv.has_any_flag(&["--version", "-v"]) {
            return Self::Version;
        }
        let name = match argv.command() {
            Some(name) if !argv.has_any_flag(&["--help", "-h"]) => name,
            _ => return Self::Help,
        };
        match name {
            "list" | "ls" => Self::List,
            "status" | "s" => Self::Status,
            "branch" | "b" => Self::Branch,
            "status-branch" | "sb" => Self::StatusBranch,
            other => Self::Unknown(other.to_string()),
        }
    }

    fn format(&self, record: &ModuleRecord) -> Vec<String> {
        match self {
            Self::List => vec![format!("{}-{}", record.package_name, record.package_version)],
            Self::Status => record
                .git_status_files
                .iter()
                .map(|file| format!("{} {}", record.package_name, file))
                .collect(),
            Self::Branch => vec![format!("{} {}", record.package_name, record.git_status_branch)],
            Self::StatusBranch => vec![format!(
                "{} {} {}",
                record.package_name,
                record.git_status_branch,
                record.git_status_file_names.join(",")
            )],
            Self::Version | Self::Help | Self::Unknown(_) => Vec::new(),
        }
    }
}

/// Dispatcher with injected environment and VCS client
pub struct Cratos {
    env: Box<dyn Environment>,
    vcs: Box<dyn VcsClient>,
    discovery: ModuleDiscovery,
}

impl Default for Cratos {
    fn default() -> Self {
        Self::with_config(DiscoveryConfig::default())
    }
}

impl Cratos {
    pub fn new(env: impl Environment + 'static, vcs: impl VcsClient + 'static) -> Self {
        Self {
            env: Box::new(env),
            vcs: Box::new(vcs),
            discovery: ModuleDiscovery::new(),
        }
    }

    /// Process environment and `git`, both following `config`'s marker names
    pub fn with_config(config: DiscoveryConfig) -> Self {
        let git = GitCli::new().with_vcs_dir(config.vcs_dir.clone());
        Self::new(ProcessEnv, git).with_discovery(ModuleDiscovery::with_config(config))
    }

    pub fn with_discovery(mut self, discovery: ModuleDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Module paths under every resolved root, deduplicated and sorted
    pub fn find_module_paths(&self, argv: &ParsedArgv) -> Result<BTreeSet<PathBuf>> {
        let spec = RootSpec::resolve(argv, self.env.as_ref())?;
        Ok(self.discovery.discover_all(&spec.roots))
    }

    /// Records for every discovered module, in path order
    pub fn find_modules(&self, argv: &ParsedArgv) -> Result<Vec<ModuleRecord>> {
        let paths = self.find_module_paths(argv)?;
        debug!("Aggregating {} modules", paths.len());
        ModuleInfoAggregator::new(self.vcs.as_ref(), &self.discovery.config().manifest_file)
            .aggregate_all(&paths)
    }

    /// Run the command `argv` selects, writing its output lines to `out`
    pub fn run(&self, argv: &ParsedArgv, out: &mut dyn Write) -> Result<()> {
        let command = Command::from_argv(argv);
        debug!("Dispatching {:?}", command);

        match &command {
            Command::Version => writeln!(out, "v{}", VERSION)?,
            Command::Help => writeln!(out, "{}", USAGE)?,
            Command::Unknown(name) => {
                writeln!(out, "{} is not a cratos command\n{}", name, USAGE)?
            }
            Command::List | Command::Status | Command::Branch | Command::StatusBranch => {
                for record in self.find_modules(argv)? {
                    for line in command.format(&record) {
                        writeln!(out, "{}", line)?;
                    }
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    /// [`run`](Self::run) capturing the output as a string
    pub fn run_to_string(&self, argv: &ParsedArgv) -> Result<String> {
        let mut buffer = Vec::new();
        self.run(argv, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
