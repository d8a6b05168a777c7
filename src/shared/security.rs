use crate::shared::error::LicenseReportError;
use crate::shared::Result;
use std::fs;
use std::path::{Component, Path};

/// Maximum manifest size for security (10 MB)
/// Project files and .nuspec documents are small; anything larger is rejected
pub const MAX_MANIFEST_SIZE: u64 = 10 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// # Security
/// This function uses `symlink_metadata()` instead of `metadata()` to ensure
/// we check the symlink itself, not the target it points to.
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates that a path is a regular manifest file within the size limit
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than [`MAX_MANIFEST_SIZE`]
pub fn validate_manifest_file(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", path.display(), e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > MAX_MANIFEST_SIZE {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            MAX_MANIFEST_SIZE
        );
    }

    Ok(())
}

/// Validates that `name` is usable as a file name directly inside an output directory
///
/// License ids and URI-derived names come from remote data, so they must not
/// be able to escape the output directory.
///
/// # Errors
/// Returns [`LicenseReportError::InvalidFileName`] if the name is empty, contains
/// a path separator, or is a `.`/`..` reference.
pub fn validate_file_name(name: &str) -> Result<()> {
    let reject = |reason: &str| -> Result<()> {
        Err(LicenseReportError::InvalidFileName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into())
    };

    if name.is_empty() {
        return reject("file name is empty");
    }

    if name.contains('/') || name.contains('\\') {
        return reject("contains a path separator");
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        (Some(Component::ParentDir), _) => reject("contains a parent directory reference"),
        _ => reject("is not a plain file name"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_not_symlink_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.nuspec");
        fs::write(&file_path, "<package/>").unwrap();

        assert!(validate_not_symlink(&file_path, "read").is_ok());
    }

    #[test]
    fn test_validate_not_symlink_nonexistent() {
        let path = PathBuf::from("/nonexistent/file.nuspec");
        assert!(validate_not_symlink(&path, "read").is_err());
    }

    #[test]
    fn test_validate_manifest_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("App.csproj");
        fs::write(&file_path, "<Project/>").unwrap();

        assert!(validate_manifest_file(&file_path).is_ok());
    }

    #[test]
    fn test_validate_manifest_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_manifest_file(temp_dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_file_name_plain() {
        assert!(validate_file_name("MIT.txt").is_ok());
        assert!(validate_file_name("Newtonsoft.Json.13.0.1.txt").is_ok());
        assert!(validate_file_name("JamesNK-Newtonsoft.Json-master-LICENSE.md.txt").is_ok());
    }

    #[test]
    fn test_validate_file_name_rejects_traversal() {
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name(".").is_err());
        assert!(validate_file_name("../MIT.txt").is_err());
        assert!(validate_file_name("sub/MIT.txt").is_err());
        assert!(validate_file_name("sub\\MIT.txt").is_err());
        assert!(validate_file_name("").is_err());
    }
}
