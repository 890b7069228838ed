use engine::EntityType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Select,
}

impl Tool {
    pub const fn name(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Select => "select",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pen" => Some(Tool::Pen),
            "eraser" => Some(Tool::Eraser),
            "select" => Some(Tool::Select),
            _ => None,
        }
    }
}

/// Entity variants the pen can create. The player is seeded, never drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawType {
    #[default]
    Static,
    Dynamic,
    Scenery,
}

impl DrawType {
    pub const fn entity_type(self) -> EntityType {
        match self {
            DrawType::Static => EntityType::Static,
            DrawType::Dynamic => EntityType::Dynamic,
            DrawType::Scenery => EntityType::Scenery,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "static" => Some(DrawType::Static),
            "dynamic" => Some(DrawType::Dynamic),
            "scenery" => Some(DrawType::Scenery),
            _ => None,
        }
    }
}
