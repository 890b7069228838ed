use super::input::{ActionStates, InputAction};
use super::rendering::{screen_to_world, world_to_screen};
use super::scene::{EntityId, Scene};
use super::Vec2;

pub const CAMERA_ZOOM_DEFAULT: f32 = 1.0;
pub const CAMERA_ZOOM_MIN: f32 = 0.5;
pub const CAMERA_ZOOM_MAX: f32 = 2.0;
pub const CAMERA_ZOOM_STEP: f32 = 0.1;
pub const CAMERA_PAN_SPEED_DEFAULT: f32 = 400.0;

/// Viewport onto the level. `viewport` is the world point drawn at the
/// centre of the screen.
#[derive(Debug, Clone, Copy)]
pub struct Camera2D {
    pub viewport: Vec2,
    pub zoom: f32,
    pub target: Option<EntityId>,
    pub pan_speed: f32,
    screen_center: Vec2,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            viewport: Vec2::ZERO,
            zoom: CAMERA_ZOOM_DEFAULT,
            target: None,
            pan_speed: CAMERA_PAN_SPEED_DEFAULT,
            screen_center: Vec2::ZERO,
        }
    }
}

impl Camera2D {
    pub fn new(screen_size: Vec2) -> Self {
        let mut camera = Self::default();
        camera.resize(screen_size);
        camera
    }

    pub fn screen_center(&self) -> Vec2 {
        self.screen_center
    }

    /// Keeps the viewport point centred for a new screen size.
    pub fn resize(&mut self, screen_size: Vec2) {
        self.screen_center = screen_size * 0.5;
    }

    pub fn world_to_screen(&self, world: Vec2, parallax: f32) -> Vec2 {
        world_to_screen(world, self, parallax)
    }

    pub fn screen_to_world(&self, screen: Vec2, parallax: f32) -> Vec2 {
        screen_to_world(screen, self, parallax)
    }

    pub fn effective_zoom(&self) -> f32 {
        clamp_camera_zoom(self.zoom)
    }

    pub fn set_zoom_clamped(&mut self, zoom: f32) {
        self.zoom = clamp_camera_zoom(zoom);
    }

    pub fn apply_zoom_steps(&mut self, steps: i32) {
        if steps == 0 {
            return;
        }
        let target_zoom = self.zoom + steps as f32 * CAMERA_ZOOM_STEP;
        self.set_zoom_clamped(target_zoom);
    }

    pub fn center_on(&mut self, world: Vec2) {
        self.viewport = world;
    }

    /// Follows the target's bounds centre when one is set and still exists,
    /// otherwise pans with the held direction actions.
    pub fn update(&mut self, actions: &ActionStates, dt_seconds: f32, scene: &Scene) {
        if let Some(target) = self.target {
            match scene.find(target) {
                Some(entity) => {
                    self.viewport = entity.bounds.center();
                    return;
                }
                None => self.target = None,
            }
        }

        let step = self.pan_speed * dt_seconds;
        if actions.is_down(InputAction::PanUp) {
            self.viewport.y -= step;
        }
        if actions.is_down(InputAction::PanDown) {
            self.viewport.y += step;
        }
        if actions.is_down(InputAction::PanLeft) {
            self.viewport.x -= step;
        }
        if actions.is_down(InputAction::PanRight) {
            self.viewport.x += step;
        }
    }
}

fn clamp_camera_zoom(zoom: f32) -> f32 {
    if !zoom.is_finite() {
        return CAMERA_ZOOM_DEFAULT;
    }
    zoom.clamp(CAMERA_ZOOM_MIN, CAMERA_ZOOM_MAX)
}
