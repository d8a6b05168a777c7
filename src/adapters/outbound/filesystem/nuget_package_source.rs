use super::{LocalFolderPackageSource, ProjectManifestPackageSource};
use crate::license_report::domain::PackageRecord;
use crate::ports::outbound::{PackageSource, ProgressReporter};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Folder name holding packages next to a solution
const PACKAGES_FOLDER: &str = "packages";

/// Project file extensions searched in solution mode
const PROJECT_EXTENSIONS: [&str; 3] = ["csproj", "fsproj", "vbproj"];

/// Build output and tool folders never searched for project files
const SKIPPED_FOLDERS: [&str; 3] = ["bin", "obj", "node_modules"];

/// How an input path is to be reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLayout {
    /// A single project file, or a packages folder: one report
    Single,
    /// A solution folder: one report per project file found below it
    Solution(Vec<PathBuf>),
}

/// NuGetPackageSource adapter choosing the enumeration for an input path
///
/// A file is read as a project manifest. A directory with a `packages`
/// subfolder is enumerated through that subfolder, any other directory
/// directly.
pub struct NuGetPackageSource {
    folder: LocalFolderPackageSource,
    manifest: ProjectManifestPackageSource,
}

impl NuGetPackageSource {
    pub fn new(manifest: ProjectManifestPackageSource) -> Self {
        Self {
            folder: LocalFolderPackageSource::new(),
            manifest,
        }
    }

    /// Decides whether `path` is reported once or per project
    pub fn locate(path: &Path) -> InputLayout {
        if !path.is_dir()
            || path.join(PACKAGES_FOLDER).is_dir()
            || LocalFolderPackageSource::recognizes(path)
        {
            return InputLayout::Single;
        }
        InputLayout::Solution(Self::find_project_files(path))
    }

    /// Project files below `root`, recursively, sorted by path
    pub fn find_project_files(root: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let Ok(entries) = fs::read_dir(&dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let Ok(file_type) = entry.file_type() else {
                    continue;
                };
                let path = entry.path();
                let name = entry.file_name();
                let name = name.to_string_lossy();

                if file_type.is_dir() {
                    if !name.starts_with('.') && !SKIPPED_FOLDERS.contains(&name.as_ref()) {
                        pending.push(path);
                    }
                } else if file_type.is_file() && is_project_file(&path) {
                    found.push(path);
                }
            }
        }

        found.sort();
        found
    }

    fn packages_folder(root: &Path) -> PathBuf {
        let nested = root.join(PACKAGES_FOLDER);
        if nested.is_dir() {
            nested
        } else {
            root.to_path_buf()
        }
    }
}

impl PackageSource for NuGetPackageSource {
    fn packages(
        &self,
        root: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<Vec<PackageRecord>> {
        if root.is_file() {
            return self.manifest.packages(root, reporter);
        }
        self.folder.packages(&Self::packages_folder(root), reporter)
    }
}

fn is_project_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PROJECT_EXTENSIONS.contains(&ext))
}
