use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
pub mod level;

pub use app::{
    effective_parallax, render_scene, screen_to_world, world_to_screen, ActionStates,
    AttributeSet, AttributeSpec, Camera2D, DynamicState, Entity, EntityId, EntityIdAllocator,
    EntityKind, EntityType, InputAction, Layer, Rect, Scene, SceneRenderer, Vec2, ATTR_FRICTION,
    ATTR_MASS, ATTR_PARALLAX, ATTR_RESTITUTION, CAMERA_PAN_SPEED_DEFAULT, CAMERA_ZOOM_DEFAULT,
    CAMERA_ZOOM_MAX, CAMERA_ZOOM_MIN, CAMERA_ZOOM_STEP,
};
pub use level::{
    deserialize_scene, level_path, list_levels, load_level, load_level_file, parse_level_json,
    save_level, scene_from_json, scene_to_json, serialize_scene, EntityRecord, LevelDocument,
    LevelError, LEVEL_FILE_EXTENSION, LEVEL_FORMAT_VERSION,
};

pub const ROOT_ENV_VAR: &str = "SORASU_ROOT";
pub const LEVELS_DIR_ENV_VAR: &str = "SORASU_LEVELS_DIR";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub levels_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("current executable path has no parent directory: {0}")]
    ExeHasNoParent(PathBuf),
    #[error("failed to create levels directory at {path}: {source}")]
    CreateLevelsDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "SORASU_ROOT is set but does not point to a valid project root: {path}\n\
A valid root must contain Cargo.toml and either crates/ or levels/."
    )]
    InvalidEnvRoot { path: PathBuf },
    #[error(
        "Could not detect project root by walking upward from executable directory: {start_dir}\n\
Expected a directory containing Cargo.toml and either crates/ or levels/.\n\
Set {env_var} explicitly, for example:\n\
Bash/zsh: export {env_var}=\"/path/to/sorasu\""
    )]
    RootNotFound {
        start_dir: PathBuf,
        env_var: &'static str,
    },
}

/// Locates the project root and its `levels/` directory, creating the
/// latter when missing. `SORASU_LEVELS_DIR` overrides the levels location.
pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    let root = resolve_root()?;
    let levels_dir = match optional_env_path(LEVELS_DIR_ENV_VAR)? {
        Some(dir) => dir,
        None => root.join("levels"),
    };

    fs::create_dir_all(&levels_dir).map_err(|source| StartupError::CreateLevelsDir {
        path: levels_dir.clone(),
        source,
    })?;

    Ok(AppPaths { root, levels_dir })
}

fn optional_env_path(var: &'static str) -> Result<Option<PathBuf>, StartupError> {
    match env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(PathBuf::from(value))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(source) => Err(StartupError::EnvVar { var, source }),
    }
}

fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => {
            let normalized = normalize_path(&PathBuf::from(value));
            if is_repo_marker(&normalized) {
                Ok(normalized)
            } else {
                Err(StartupError::InvalidEnvRoot { path: normalized })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;

            exe_dir
                .ancestors()
                .find(|candidate| is_repo_marker(candidate))
                .map(normalize_path)
                .ok_or_else(|| StartupError::RootNotFound {
                    start_dir: normalize_path(&exe_dir),
                    env_var: ROOT_ENV_VAR,
                })
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn is_repo_marker(path: &Path) -> bool {
    let cargo_toml = path.join("Cargo.toml").is_file();
    let has_crates = path.join("crates").is_dir();
    let has_levels = path.join("levels").is_dir();

    cargo_toml && (has_crates || has_levels)
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
