//! Module discovery
//!
//! A directory is a module when it directly contains both the VCS metadata
//! directory and the package manifest. Modules are leaves: the walk never
//! looks inside one, so nested modules beneath a module are not reported.
//! Sibling subdirectories are explored in parallel.

use crate::config::DiscoveryConfig;
use crate::io::DirectoryNode;
use log::debug;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Recursive module finder
#[derive(Debug, Clone, Default)]
pub struct ModuleDiscovery {
    config: DiscoveryConfig,
}

impl ModuleDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Whether a directory snapshot satisfies the module marker
    pub fn is_module(&self, node: &DirectoryNode) -> bool {
        node.contains(&self.config.vcs_dir) && node.contains(&self.config.manifest_file)
    }

    /// All module roots under `root`, `root` included
    pub fn discover(&self, root: &Path) -> BTreeSet<PathBuf> {
        let node = DirectoryNode::read(root);

        if self.is_module(&node) {
            debug!("Found module: {}", root.display());
            return BTreeSet::from([node.path]);
        }

        let children: Vec<PathBuf> = node
            .subdirectories()
            .filter(|d| !self.config.is_ignored_os(&d.name))
            .map(|d| d.path.clone())
            .collect();

        children
            .par_iter()
            .map(|child| self.discover(child))
            .reduce(BTreeSet::new, |mut acc, found| {
                acc.extend(found);
                acc
            })
    }

    /// Union of [`discover`](Self::discover) over several roots, deduplicated
    pub fn discover_all(&self, roots: &[PathBuf]) -> BTreeSet<PathBuf> {
        roots
            .par_iter()
            .map(|root| self.discover(root))
            .reduce(BTreeSet::new, |mut acc, found| {
                acc.extend(found);
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_module(path: &Path) {
        fs::create_dir_all(path.join(".git")).unwrap();
        fs::write(path.join("package.json"), r#"{"name":"ayo","version":"0.0.1"}"#).unwrap();
    }

    #[test]
    fn test_root_module_is_leaf() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_module(root);
        create_module(&root.join("nested/inner"));

        let found = ModuleDiscovery::new().discover(root);
        assert_eq!(found, BTreeSet::from([root.to_path_buf()]));
    }

    #[test]
    fn test_single_deep_module_among_siblings() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for sibling in ["x", "y/z", "w/v/u", "empty"] {
            fs::create_dir_all(root.join(sibling)).unwrap();
        }
        create_module(&root.join("a/b/c"));

        let found = ModuleDiscovery::new().discover(root);
        assert_eq!(found, BTreeSet::from([root.join("a/b/c")]));
    }

    #[test]
    fn test_marker_needs_both_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("only-git/.git")).unwrap();
        fs::create_dir_all(root.join("only-manifest")).unwrap();
        fs::write(root.join("only-manifest/package.json"), "{}").unwrap();

        assert!(ModuleDiscovery::new().discover(root).is_empty());
    }

    #[test]
    fn test_ignored_directories_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_module(&root.join("node_modules/dep"));
        create_module(&root.join(".git/modules/sub"));
        create_module(&root.join("app"));

        let found = ModuleDiscovery::new().discover(root);
        assert_eq!(found, BTreeSet::from([root.join("app")]));
    }

    #[test]
    fn test_custom_ignore_set() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_module(&root.join("vendor/lib"));
        create_module(&root.join("app"));

        let mut config = DiscoveryConfig::default();
        config.ignore_dirs.insert("vendor".to_string());
        let found = ModuleDiscovery::with_config(config).discover(root);
        assert_eq!(found, BTreeSet::from([root.join("app")]));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_directory_names_are_walked() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let latin1 = root.join(OsStr::from_bytes(b"caf\xE9"));
        create_module(&latin1.join("project"));

        let found = ModuleDiscovery::new().discover(root);
        assert_eq!(found, BTreeSet::from([latin1.join("project")]));
    }

    #[test]
    fn test_missing_root_finds_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let found = ModuleDiscovery::new().discover(&temp_dir.path().join("missing"));
        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_does_not_abort() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_module(&root.join("ok"));
        let locked = root.join("locked");
        create_module(&locked.join("hidden"));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let found = ModuleDiscovery::new().discover(root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // root may bypass permission bits, in which case the hidden module shows up too
        assert!(found.contains(&root.join("ok")));
    }

    #[test]
    fn test_overlapping_roots_are_deduplicated() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_module(&root.join("project"));
        create_module(&root.join("a/project"));

        let roots = vec![root.to_path_buf(), root.join("a"), root.join("project")];
        let found = ModuleDiscovery::new().discover_all(&roots);
        assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            vec![root.join("a/project"), root.join("project")]
        );
    }
}
