use crate::app::{Camera2D, Vec2};

/// Parallax factors that cannot be inverted fall back to the neutral factor.
pub fn effective_parallax(parallax: f32) -> f32 {
    if parallax.is_finite() && parallax != 0.0 {
        parallax
    } else {
        1.0
    }
}

/// `screen = (world - viewport) * zoom * parallax + screen_center`
pub fn world_to_screen(world: Vec2, camera: &Camera2D, parallax: f32) -> Vec2 {
    let scale = camera.effective_zoom() * effective_parallax(parallax);
    (world - camera.viewport) * scale + camera.screen_center()
}

/// Exact inverse of [`world_to_screen`] for the same camera and parallax.
pub fn screen_to_world(screen: Vec2, camera: &Camera2D, parallax: f32) -> Vec2 {
    let scale = camera.effective_zoom() * effective_parallax(parallax);
    let relative = screen - camera.screen_center();
    Vec2::new(relative.x / scale, relative.y / scale) + camera.viewport
}
