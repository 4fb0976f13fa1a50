pub mod fs;
pub mod vcs;

pub use fs::{DirectoryNode, Dirent, PackageManifest};
pub use vcs::{GitCli, GitStatus, VcsClient};
