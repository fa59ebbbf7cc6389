//! File-system guards applied before an SBOM is read or a report is written.

use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Largest SBOM document accepted for decomposition (100 MB).
///
/// The graph engine itself is unbounded, so input size is capped here
/// before any parsing happens.
pub const MAX_BOM_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Rejects symbolic links.
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
pub fn reject_symlink(path: &Path, operation: &str) -> Result<()> {
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
            "Security: {} is a symbolic link. {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Reads a whole SBOM document after checking it is a regular,
/// non-symlinked file no larger than `max_size` bytes.
pub fn read_guarded(path: &Path, max_size: u64) -> Result<Vec<u8>> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read SBOM metadata: {}", e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    ensure_size_within(metadata.len(), path, max_size)?;

    fs::read(path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}

/// Fails when `file_size` exceeds `max_size`.
pub fn ensure_size_within(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}
