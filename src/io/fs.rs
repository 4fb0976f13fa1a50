use crate::error::{CratosError, Result};
use log::warn;
use serde::Deserialize;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One immediate child of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirent {
    pub name: OsString,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Snapshot of a directory's immediate children
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    pub path: PathBuf,
    pub dirents: Vec<Dirent>,
}

impl DirectoryNode {
    /// Read `path` one level deep. An unreadable directory yields no entries.
    pub fn read(path: &Path) -> Self {
        let mut dirents = Vec::new();

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            match entry {
                Ok(entry) => dirents.push(Dirent {
                    name: entry.file_name().to_os_string(),
                    path: entry.path().to_path_buf(),
                    is_dir: entry.file_type().is_dir(),
                }),
                Err(e) => {
                    warn!("unreadable directory {}: {}", path.display(), e);
                    break;
                }
            }
        }

        Self {
            path: path.to_path_buf(),
            dirents,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dirents.iter().any(|d| d.name.as_os_str() == OsStr::new(name))
    }

    pub fn subdirectories(&self) -> impl Iterator<Item = &Dirent> {
        self.dirents.iter().filter(|d| d.is_dir)
    }
}

/// The fields of a package manifest that cratos reports
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
}

impl PackageManifest {
    /// Read and parse `<module>/<manifest_file>`
    pub fn read(module: &Path, manifest_file: &str) -> Result<Self> {
        let path = module.join(manifest_file);
        let content = fs::read_to_string(&path)
            .map_err(|e| CratosError::manifest(&path, e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| CratosError::manifest(&path, e.to_string()))
    }
}
