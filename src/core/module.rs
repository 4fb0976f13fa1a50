use crate::error::Result;
use crate::io::{GitStatus, PackageManifest, VcsClient};
use log::debug;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Everything cratos reports about one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    pub path: PathBuf,
    pub package_name: String,
    pub package_version: String,
    /// Branch description with the `## ` marker removed
    pub git_status_branch: String,
    /// Porcelain entries, `<code> <file>`
    pub git_status_files: Vec<String>,
    /// The same entries without their status codes
    pub git_status_file_names: Vec<String>,
}

/// Merges manifest metadata and VCS status into [`ModuleRecord`]s
pub struct ModuleInfoAggregator<'a> {
    vcs: &'a dyn VcsClient,
    manifest_file: &'a str,
}

impl<'a> ModuleInfoAggregator<'a> {
    pub fn new(vcs: &'a dyn VcsClient, manifest_file: &'a str) -> Self {
        Self { vcs, manifest_file }
    }

    /// Build the record for one module; either source failing fails the whole record
    pub fn aggregate(&self, module: &Path) -> Result<ModuleRecord> {
        let (manifest, status) = rayon::join(
            || PackageManifest::read(module, self.manifest_file),
            || self.vcs.status(module),
        );
        let manifest = manifest?;
        let status = GitStatus::parse(&status?);
        debug!(
            "Aggregated {}: {} files changed",
            module.display(),
            status.files.len()
        );

        Ok(ModuleRecord {
            path: module.to_path_buf(),
            package_name: manifest.name,
            package_version: manifest.version,
            git_status_branch: status.branch_name().to_string(),
            git_status_file_names: status.file_names(),
            git_status_files: status.files,
        })
    }

    /// Aggregate every module, preserving input order; the first failure wins
    pub fn aggregate_all<'p, I>(&self, modules: I) -> Result<Vec<ModuleRecord>>
    where
        I: IntoIterator<Item = &'p PathBuf>,
    {
        let modules: Vec<&PathBuf> = modules.into_iter().collect();
        modules
            .par_iter()
            .map(|module| self.aggregate(module))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CratosError;
    use std::fs;
    use tempfile::TempDir;

    struct FakeVcs(std::result::Result<&'static str, &'static str>);

    impl VcsClient for FakeVcs {
        fn status(&self, module: &Path) -> Result<String> {
            self.0
                .map(str::to_string)
                .map_err(|stderr| CratosError::vcs(module, stderr))
        }
    }

    fn write_manifest(dir: &Path, content: &str) {
        fs::write(dir.join("package.json"), content).unwrap();
    }

    #[test]
    fn test_aggregate_merges_sources() {
        let temp_dir = TempDir::new().unwrap();
        write_manifest(temp_dir.path(), r#"{"name":"ayo","version":"0.0.1"}"#);
        let vcs = FakeVcs(Ok("## No commits yet on master\n?? hey\n?? index.js\n?? package.json\n"));

        let record = ModuleInfoAggregator::new(&vcs, "package.json")
            .aggregate(temp_dir.path())
            .unwrap();

        assert_eq!(record.path, temp_dir.path());
        assert_eq!(record.package_name, "ayo");
        assert_eq!(record.package_version, "0.0.1");
        assert_eq!(record.git_status_branch, "No commits yet on master");
        assert_eq!(record.git_status_files, vec!["?? hey", "?? index.js", "?? package.json"]);
        assert_eq!(record.git_status_file_names, vec!["hey", "index.js", "package.json"]);
    }

    #[test]
    fn test_vcs_failure_surfaces_stderr() {
        let temp_dir = TempDir::new().unwrap();
        write_manifest(temp_dir.path(), r#"{"name":"ayo","version":"0.0.1"}"#);
        let vcs = FakeVcs(Err("fatal: not a git repository"));

        let err = ModuleInfoAggregator::new(&vcs, "package.json")
            .aggregate(temp_dir.path())
            .unwrap_err();
        assert_eq!(err.to_string(), "fatal: not a git repository");
    }

    #[test]
    fn test_manifest_failure_fails_record() {
        let temp_dir = TempDir::new().unwrap();
        let vcs = FakeVcs(Ok("## main\n"));

        let result = ModuleInfoAggregator::new(&vcs, "package.json").aggregate(temp_dir.path());
        assert!(matches!(result, Err(CratosError::Manifest { .. })));
    }

    #[test]
    fn test_aggregate_all_keeps_order_and_fails_fast() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a");
        let b = temp_dir.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        write_manifest(&a, r#"{"name":"a","version":"1.0.0"}"#);
        write_manifest(&b, r#"{"name":"b","version":"2.0.0"}"#);
        let vcs = FakeVcs(Ok("## main\n"));
        let aggregator = ModuleInfoAggregator::new(&vcs, "package.json");

        let records = aggregator.aggregate_all(&[a.clone(), b.clone()]).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.package_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);

        let broken = temp_dir.path().join("broken");
        fs::create_dir_all(&broken).unwrap();
        assert!(aggregator.aggregate_all(&[a, broken, b]).is_err());
    }
}
