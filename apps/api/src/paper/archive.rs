//! Optional on-disk copy of every rendered paper.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// Writes `bytes` to `dir/file_name` atomically: a temp file in the same directory
/// is filled and then renamed over the target, so readers never see a partial file.
///
/// `file_name` must already be sanitized.
pub fn archive_paper(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create archive directory {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("cannot create temp file in {}", dir.display()))?;
    tmp.write_all(bytes)?;
    tmp.flush()?;

    let target = dir.join(file_name);
    tmp.persist(&target)
        .map_err(|e| e.error)
        .with_context(|| format!("cannot persist {}", target.display()))?;

    info!(path = %target.display(), bytes = bytes.len(), "Archived paper");
    Ok(target)
}
