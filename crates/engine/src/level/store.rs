use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::atomic_io::write_text_atomic;
use super::codec::{scene_from_json, scene_to_json};
use super::error::LevelError;
use crate::app::Scene;

pub const LEVEL_FILE_EXTENSION: &str = "json";

/// Resolves `<levels_dir>/<name>.json`. Names must be a single non-empty
/// path component.
pub fn level_path(levels_dir: &Path, name: &str) -> Result<PathBuf, LevelError> {
    let invalid = |reason| LevelError::InvalidName {
        name: name.to_string(),
        reason,
    };
    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(invalid("name must not contain path separators"));
    }
    Ok(levels_dir.join(format!("{name}.{LEVEL_FILE_EXTENSION}")))
}

pub fn save_level(levels_dir: &Path, name: &str, scene: &Scene) -> Result<PathBuf, LevelError> {
    let path = level_path(levels_dir, name)?;
    let json = scene_to_json(scene)?;
    write_text_atomic(&path, &json).map_err(|source| LevelError::WriteFile {
        path: path.clone(),
        source,
    })?;
    info!(
        path = %path.display(),
        entity_count = scene.entity_count(),
        "level_saved"
    );
    Ok(path)
}

pub fn load_level(levels_dir: &Path, name: &str) -> Result<Scene, LevelError> {
    let path = level_path(levels_dir, name)?;
    load_level_file(&path)
}

pub fn load_level_file(path: &Path) -> Result<Scene, LevelError> {
    let raw = fs::read_to_string(path).map_err(|source| LevelError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let scene = scene_from_json(&raw)?;
    info!(
        path = %path.display(),
        entity_count = scene.entity_count(),
        "level_loaded"
    );
    Ok(scene)
}

/// Level names found in `levels_dir`, sorted. A missing directory has none.
pub fn list_levels(levels_dir: &Path) -> Result<Vec<String>, LevelError> {
    let entries = match fs::read_dir(levels_dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(LevelError::ReadFile {
                path: levels_dir.to_path_buf(),
                source,
            })
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LevelError::ReadFile {
            path: levels_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(LEVEL_FILE_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            if !stem.starts_with('.') {
                names.push(stem.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
