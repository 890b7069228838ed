use engine::{InputAction, Vec2};

use crate::offsets::DrawShape;
use crate::tools::{DrawType, Tool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Everything the host feeds into an editing session. Pointer positions are
/// in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    KeyDown(InputAction),
    KeyUp(InputAction),
    PointerDown { button: PointerButton, screen: Vec2 },
    PointerUp { button: PointerButton, screen: Vec2 },
    PointerMoved { screen: Vec2 },
    /// Wheel notches; positive steps raise the selected attribute.
    Scroll { steps: i32 },
    Resize { size: Vec2 },
    Command(EditorCommand),
}

/// Requests raised by the UI widget layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorCommand {
    SelectTool(Tool),
    SelectDrawType(DrawType),
    SetDrawShape(DrawShape),
    SelectAttribute(usize),
    AdjustAttribute(i32),
    TogglePlayTest,
    ResetDynamics,
    Zoom(i32),
}

impl From<EditorCommand> for EditorEvent {
    fn from(command: EditorCommand) -> Self {
        EditorEvent::Command(command)
    }
}
