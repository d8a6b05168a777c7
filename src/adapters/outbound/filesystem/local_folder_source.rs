use super::NuspecReader;
use crate::license_report::domain::PackageRecord;
use crate::ports::outbound::{PackageSource, ProgressReporter};
use crate::shared::error::summary_line;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// LocalFolderPackageSource adapter enumerating a packages folder
///
/// Two layouts are understood and may even be mixed:
/// - `<root>/<Id>.<Version>/` (packages.config style)
/// - `<root>/<id>/<version>/` (global packages folder style)
///
/// A package directory is read from its extracted `*.nuspec`, or from the
/// nuspec inside its `*.nupkg` when nothing was extracted. Packages are
/// returned in directory-name order. A manifest that cannot be read is
/// skipped with a warning; a folder with neither layout yields no packages.
pub struct LocalFolderPackageSource;

/// Where the metadata of one package directory lives
#[derive(Debug, Clone, PartialEq, Eq)]
enum PackageManifest {
    Nuspec(PathBuf),
    Archive(PathBuf),
}

impl PackageManifest {
    fn path(&self) -> &Path {
        match self {
            PackageManifest::Nuspec(path) | PackageManifest::Archive(path) => path,
        }
    }

    fn read(&self) -> Result<PackageRecord> {
        match self {
            PackageManifest::Nuspec(path) => NuspecReader::read(path),
            PackageManifest::Archive(path) => NuspecReader::read_package(path),
        }
    }
}

impl LocalFolderPackageSource {
    pub fn new() -> Self {
        Self
    }

    /// Whether `root` contains at least one package in a known layout
    pub fn recognizes(root: &Path) -> bool {
        !Self::manifests(root).is_empty()
    }

    /// Locates one manifest per package directory below `root`
    fn manifests(root: &Path) -> Vec<PackageManifest> {
        let mut found = Vec::new();
        for package_dir in sorted_entries(root, EntryKind::Directory) {
            if let Some(manifest) = package_manifest(&package_dir) {
                found.push(manifest);
                continue;
            }
            found.extend(
                sorted_entries(&package_dir, EntryKind::Directory)
                    .iter()
                    .filter_map(|version_dir| package_manifest(version_dir)),
            );
        }
        found
    }
}

impl Default for LocalFolderPackageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageSource for LocalFolderPackageSource {
    fn packages(
        &self,
        root: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<Vec<PackageRecord>> {
        if !root.is_dir() {
            anyhow::bail!("{} is not a directory", root.display());
        }

        let mut records = Vec::new();
        for manifest in Self::manifests(root) {
            match manifest.read() {
                Ok(record) => records.push(record),
                Err(e) => reporter.report_error(&format!(
                    "⚠️  Warning: Skipped unreadable package manifest {}: {}",
                    manifest.path().display(),
                    summary_line(&e)
                )),
            }
        }
        Ok(records)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    File,
}

/// Entries of `dir` of one kind, sorted by path; symbolic links are skipped
fn sorted_entries(dir: &Path, kind: EntryKind) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| {
            entry.file_type().is_ok_and(|t| match kind {
                EntryKind::Directory => t.is_dir(),
                EntryKind::File => t.is_file(),
            })
        })
        .map(|entry| entry.path())
        .collect();
    paths.sort();
    paths
}

/// Extracted nuspec first, then the package archive
fn package_manifest(dir: &Path) -> Option<PackageManifest> {
    let files = sorted_entries(dir, EntryKind::File);
    let with_extension = |wanted: &str| {
        files
            .iter()
            .find(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
            })
            .cloned()
    };

    with_extension("nuspec")
        .map(PackageManifest::Nuspec)
        .or_else(|| with_extension("nupkg").map(PackageManifest::Archive))
}
