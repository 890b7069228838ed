use crate::app::{Camera2D, Entity, Layer, Rect, Scene, Vec2};

/// Drawing backend supplied by the host. The engine decides what is drawn
/// and in which order; the backend decides how pixels are produced.
pub trait SceneRenderer {
    fn draw(&mut self, entity: &Entity, camera: &Camera2D);

    /// Outline and handle rendering used by the authoring tools.
    fn debug_draw(&mut self, entity: &Entity, camera: &Camera2D);

    fn draw_marker(&mut self, _world: Vec2, _parallax: f32, _camera: &Camera2D) {}

    fn draw_guide(&mut self, _from: Vec2, _to: Vec2, _parallax: f32, _camera: &Camera2D) {}

    fn draw_rect_outline(&mut self, _rect: Rect, _parallax: f32, _camera: &Camera2D) {}
}

/// Draws every entity back to front, following each with a debug outline
/// when `outline` asks for one.
pub fn render_scene<R, F>(scene: &Scene, camera: &Camera2D, renderer: &mut R, mut outline: F)
where
    R: SceneRenderer + ?Sized,
    F: FnMut(Layer, &Entity) -> bool,
{
    for layer in Layer::DRAW_ORDER {
        for entity in scene.layer(layer) {
            renderer.draw(entity, camera);
            if outline(layer, entity) {
                renderer.debug_draw(entity, camera);
            }
        }
    }
}
