use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const ATTR_FRICTION: &str = "friction";
pub const ATTR_MASS: &str = "mass";
pub const ATTR_RESTITUTION: &str = "restitution";
pub const ATTR_PARALLAX: &str = "parallax";

const ATTRIBUTE_DECIMALS: f32 = 1000.0;

/// Declared metadata for one editable numeric attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub init: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl AttributeSpec {
    pub fn clamp(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.init;
        }
        value.clamp(self.min, self.max)
    }

    /// Moves `value` by `steps` increments, clamped to the declared range and
    /// rounded to three decimals so repeated stepping does not drift.
    pub fn stepped(&self, value: f32, steps: i32) -> f32 {
        let moved = value + self.step * steps as f32;
        round_attribute(self.clamp(moved))
    }
}

fn round_attribute(value: f32) -> f32 {
    (value * ATTRIBUTE_DECIMALS).round() / ATTRIBUTE_DECIMALS
}

const STATIC_ATTRIBUTES: &[AttributeSpec] = &[AttributeSpec {
    name: ATTR_FRICTION,
    init: 0.9,
    min: 0.0,
    max: 1.0,
    step: 0.05,
}];

const DYNAMIC_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec {
        name: ATTR_MASS,
        init: 10.0,
        min: 1.0,
        max: 100.0,
        step: 1.0,
    },
    AttributeSpec {
        name: ATTR_FRICTION,
        init: 0.9,
        min: 0.0,
        max: 1.0,
        step: 0.05,
    },
    AttributeSpec {
        name: ATTR_RESTITUTION,
        init: 0.0,
        min: 0.0,
        max: 1.0,
        step: 0.05,
    },
];

const SCENERY_ATTRIBUTES: &[AttributeSpec] = &[AttributeSpec {
    name: ATTR_PARALLAX,
    init: 0.5,
    min: 0.1,
    max: 2.0,
    step: 0.05,
}];

/// Closed set of entity variants, shared by the runtime model and the level
/// document type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Static,
    Dynamic,
    Scenery,
    Player,
}

impl EntityType {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
            Self::Scenery => "scenery",
            Self::Player => "player",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "static" => Some(Self::Static),
            "dynamic" => Some(Self::Dynamic),
            "scenery" => Some(Self::Scenery),
            "player" => Some(Self::Player),
            _ => None,
        }
    }

    pub const fn attribute_specs(self) -> &'static [AttributeSpec] {
        match self {
            Self::Static => STATIC_ATTRIBUTES,
            Self::Dynamic | Self::Player => DYNAMIC_ATTRIBUTES,
            Self::Scenery => SCENERY_ATTRIBUTES,
        }
    }

    pub fn attribute_spec(self, name: &str) -> Option<&'static AttributeSpec> {
        self.attribute_specs().iter().find(|spec| spec.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet {
    values: BTreeMap<String, f32>,
}

impl AttributeSet {
    pub fn defaults_for(entity_type: EntityType) -> Self {
        let values = entity_type
            .attribute_specs()
            .iter()
            .map(|spec| (spec.name.to_string(), spec.init))
            .collect();
        Self { values }
    }

    /// Builds a set from positional values in schema order; missing trailing
    /// values fall back to `init` and every value is clamped.
    pub fn from_ordered(entity_type: EntityType, ordered: &[f32]) -> Self {
        let values = entity_type
            .attribute_specs()
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let value = ordered.get(index).copied().unwrap_or(spec.init);
                (spec.name.to_string(), spec.clamp(value))
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f32) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Conforms the set to the schema of `entity_type`: values outside their
    /// range are clamped, missing values take `init`, unknown names are
    /// dropped. Returns the names that had to be corrected.
    pub fn conform_to(&mut self, entity_type: EntityType) -> Vec<String> {
        let mut corrected = Vec::new();
        let specs = entity_type.attribute_specs();
        self.values.retain(|name, _| {
            let known = specs.iter().any(|spec| spec.name == name);
            if !known {
                corrected.push(name.clone());
            }
            known
        });
        for spec in specs {
            match self.values.get_mut(spec.name) {
                Some(value) => {
                    let clamped = spec.clamp(*value);
                    if clamped != *value {
                        *value = clamped;
                        corrected.push(spec.name.to_string());
                    }
                }
                None => {
                    self.values.insert(spec.name.to_string(), spec.init);
                    corrected.push(spec.name.to_string());
                }
            }
        }
        corrected
    }
}
