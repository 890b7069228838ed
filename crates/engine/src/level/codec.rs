use tracing::debug;

use super::document::{EntityRecord, LevelDocument, LEVEL_FORMAT_VERSION};
use super::error::LevelError;
use crate::app::{Entity, EntityType, Layer, Rect, Scene, Vec2};

const MIN_POLYGON_POINTS: usize = 3;

pub fn serialize_scene(scene: &Scene) -> LevelDocument {
    let records = |layer: Layer| -> Vec<EntityRecord> {
        scene.layer(layer).iter().map(entity_record).collect()
    };
    LevelDocument {
        format_version: LEVEL_FORMAT_VERSION,
        background: records(Layer::Background),
        main: records(Layer::Main),
        foreground: records(Layer::Foreground),
    }
}

fn entity_record(entity: &Entity) -> EntityRecord {
    let bounds = entity.bounds;
    let anchor = entity.anchor();
    EntityRecord {
        type_tag: entity.entity_type().tag().to_string(),
        anchor: [anchor.x, anchor.y],
        bounds: [bounds.x, bounds.y, bounds.width, bounds.height],
        offsets: entity
            .offsets
            .iter()
            .map(|offset| [offset.x, offset.y])
            .collect(),
        attributes: entity.attributes.clone(),
    }
}

/// Rebuilds a scene from a document. Nothing is returned unless every record
/// validates, so a failed load never yields a partial scene.
pub fn deserialize_scene(document: &LevelDocument) -> Result<Scene, LevelError> {
    if document.format_version != LEVEL_FORMAT_VERSION {
        return Err(LevelError::UnsupportedVersion {
            expected: LEVEL_FORMAT_VERSION,
            actual: document.format_version,
        });
    }

    let mut scene = Scene::new();
    for (layer, records) in [
        (Layer::Background, &document.background),
        (Layer::Main, &document.main),
        (Layer::Foreground, &document.foreground),
    ] {
        for (index, record) in records.iter().enumerate() {
            let path = format!("{}[{index}]", layer.key());
            let entity = entity_from_record(record, &path)?;
            if entity.layer() != layer {
                debug!(
                    path = %path,
                    derived_layer = entity.layer().key(),
                    "entity_kept_in_document_layer"
                );
            }
            scene.insert_into(layer, entity);
        }
    }
    Ok(scene)
}

fn entity_from_record(record: &EntityRecord, path: &str) -> Result<Entity, LevelError> {
    let entity_type =
        EntityType::from_tag(&record.type_tag).ok_or_else(|| LevelError::UnknownVariant {
            path: format!("{path}.type"),
            tag: record.type_tag.clone(),
        })?;

    let anchor = Vec2::new(record.anchor[0], record.anchor[1]);
    if !anchor.is_finite() {
        return Err(LevelError::malformed(
            format!("{path}.anchor"),
            "coordinates must be finite",
        ));
    }

    let [x, y, width, height] = record.bounds;
    let bounds = Rect::new(x, y, width, height);
    if !bounds.is_finite() {
        return Err(LevelError::malformed(
            format!("{path}.bounds"),
            "coordinates must be finite",
        ));
    }
    if !bounds.is_normalized() {
        return Err(LevelError::malformed(
            format!("{path}.bounds"),
            format!("width and height must be non-negative, got {width} x {height}"),
        ));
    }
    if bounds.origin() != anchor {
        return Err(LevelError::malformed(
            format!("{path}.anchor"),
            format!(
                "anchor ({}, {}) does not match bounds origin ({x}, {y})",
                anchor.x, anchor.y
            ),
        ));
    }

    if record.offsets.len() < MIN_POLYGON_POINTS {
        return Err(LevelError::malformed(
            format!("{path}.offsets"),
            format!(
                "polygon needs at least {MIN_POLYGON_POINTS} points, got {}",
                record.offsets.len()
            ),
        ));
    }
    let mut offsets = Vec::with_capacity(record.offsets.len());
    for (index, [dx, dy]) in record.offsets.iter().copied().enumerate() {
        let offset = Vec2::new(dx, dy);
        if !offset.is_finite() {
            return Err(LevelError::malformed(
                format!("{path}.offsets[{index}]"),
                "coordinates must be finite",
            ));
        }
        offsets.push(offset);
    }

    let mut attributes = record.attributes.clone();
    let corrected = attributes.conform_to(entity_type);
    if !corrected.is_empty() {
        debug!(path = %path, corrected = ?corrected, "attributes_corrected");
    }

    Ok(Entity::new(entity_type, bounds, offsets, attributes))
}

pub fn scene_to_json(scene: &Scene) -> Result<String, LevelError> {
    serde_json::to_string_pretty(&serialize_scene(scene)).map_err(LevelError::Encode)
}

pub fn parse_level_json(raw: &str) -> Result<LevelDocument, LevelError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, LevelDocument>(&mut deserializer).map_err(|error| {
        let path = error.path().to_string();
        let source = error.into_inner();
        LevelError::Parse {
            path: if path.is_empty() { ".".to_string() } else { path },
            message: source.to_string(),
        }
    })
}

pub fn scene_from_json(raw: &str) -> Result<Scene, LevelError> {
    let document = parse_level_json(raw)?;
    deserialize_scene(&document)
}
