mod renderer;
mod transform;

pub use renderer::{render_scene, SceneRenderer};
pub use transform::{effective_parallax, screen_to_world, world_to_screen};
