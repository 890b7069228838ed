use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes `text` next to `path` first and renames it into place, so readers
/// never observe a half-written level.
pub(crate) fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    fs::write(&staging, text.as_bytes())?;
    if let Err(error) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(error);
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("level");
    path.with_file_name(format!(".{file_name}.tmp"))
}
