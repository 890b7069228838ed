use engine::{AttributeSet, AttributeSpec, ATTR_PARALLAX};
use tracing::debug;

use crate::tools::DrawType;

/// Values the next drawn entity will carry, one per attribute in the
/// draw type's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeEditor {
    draw_type: DrawType,
    values: Vec<f32>,
    selected: Option<usize>,
}

impl Default for AttributeEditor {
    fn default() -> Self {
        Self::new(DrawType::default())
    }
}

impl AttributeEditor {
    pub fn new(draw_type: DrawType) -> Self {
        let mut editor = Self {
            draw_type,
            values: Vec::new(),
            selected: None,
        };
        editor.select_draw_type(draw_type);
        editor
    }

    pub fn draw_type(&self) -> DrawType {
        self.draw_type
    }

    pub fn specs(&self) -> &'static [AttributeSpec] {
        self.draw_type.entity_type().attribute_specs()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn value(&self, name: &str) -> Option<f32> {
        self.specs()
            .iter()
            .position(|spec| spec.name == name)
            .and_then(|index| self.values.get(index).copied())
    }

    /// Reloads every value from the schema defaults and selects the first
    /// attribute.
    pub fn select_draw_type(&mut self, draw_type: DrawType) {
        self.draw_type = draw_type;
        self.values = self.specs().iter().map(|spec| spec.init).collect();
        self.selected = if self.values.is_empty() { None } else { Some(0) };
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.values.len() {
            debug!(index, "attribute_index_out_of_range");
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Steps the selected value, clamped to its declared range.
    pub fn adjust(&mut self, steps: i32) -> Option<f32> {
        let index = self.selected?;
        let spec = self.specs().get(index)?;
        let value = self.values.get_mut(index)?;
        *value = spec.stepped(*value, steps);
        Some(*value)
    }

    pub fn attribute_set(&self) -> AttributeSet {
        AttributeSet::from_ordered(self.draw_type.entity_type(), &self.values)
    }

    /// Parallax used to place the cursor while drawing; neutral unless the
    /// pen is drawing scenery.
    pub fn parallax(&self) -> f32 {
        match self.draw_type {
            DrawType::Scenery => self.value(ATTR_PARALLAX).unwrap_or(1.0),
            DrawType::Static | DrawType::Dynamic => 1.0,
        }
    }
}
