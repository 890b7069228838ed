use serde::{Deserialize, Serialize};

use crate::app::AttributeSet;

pub const LEVEL_FORMAT_VERSION: u32 = 1;

fn default_format_version() -> u32 {
    LEVEL_FORMAT_VERSION
}

/// On-disk shape of a level: one ordered record list per layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDocument {
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    pub background: Vec<EntityRecord>,
    pub main: Vec<EntityRecord>,
    pub foreground: Vec<EntityRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub anchor: [f32; 2],
    pub bounds: [f32; 4],
    pub offsets: Vec<[f32; 2]>,
    #[serde(default)]
    pub attributes: AttributeSet,
}
