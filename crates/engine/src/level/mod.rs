mod atomic_io;
mod codec;
mod document;
mod error;
mod store;

pub use codec::{
    deserialize_scene, parse_level_json, scene_from_json, scene_to_json, serialize_scene,
};
pub use document::{EntityRecord, LevelDocument, LEVEL_FORMAT_VERSION};
pub use error::LevelError;
pub use store::{
    level_path, list_levels, load_level, load_level_file, save_level, LEVEL_FILE_EXTENSION,
};
