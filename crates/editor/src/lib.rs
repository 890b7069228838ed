mod attribute_editor;
mod config;
mod editor;
mod events;
mod offsets;
mod snap;
mod tools;

pub use attribute_editor::AttributeEditor;
pub use config::{EditorConfig, DEFAULT_LEVELS_DIR, MIN_DRAW_SIZE, UI_PANEL_WIDTH};
pub use editor::{EditState, Editor};
pub use events::{EditorCommand, EditorEvent, PointerButton};
pub use offsets::{calculate_offsets, DrawCorner, DrawShape, DEFAULT_DRAW_PATTERN};
pub use snap::{snap_to_corner, snap_to_plane, AxisGuide};
pub use tools::{DrawType, Tool};
