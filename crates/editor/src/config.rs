use std::path::PathBuf;

use engine::{Vec2, CAMERA_PAN_SPEED_DEFAULT};

pub const UI_PANEL_WIDTH: f32 = 200.0;
pub const MIN_DRAW_SIZE: f32 = 0.1;
pub const DEFAULT_LEVELS_DIR: &str = "levels";

#[derive(Debug, Clone)]
pub struct EditorConfig {
    pub screen_size: Vec2,
    pub pan_speed: f32,
    /// Presses left of this screen x belong to the widget panel.
    pub ui_panel_width: f32,
    pub min_draw_size: f32,
    pub levels_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            screen_size: Vec2::new(900.0, 600.0),
            pan_speed: CAMERA_PAN_SPEED_DEFAULT,
            ui_panel_width: UI_PANEL_WIDTH,
            min_draw_size: MIN_DRAW_SIZE,
            levels_dir: PathBuf::from(DEFAULT_LEVELS_DIR),
        }
    }
}
