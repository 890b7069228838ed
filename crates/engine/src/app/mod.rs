mod attributes;
mod camera;
mod geometry;
mod input;
mod rendering;
mod scene;

pub use attributes::{
    AttributeSet, AttributeSpec, EntityType, ATTR_FRICTION, ATTR_MASS, ATTR_PARALLAX,
    ATTR_RESTITUTION,
};
pub use camera::{
    Camera2D, CAMERA_PAN_SPEED_DEFAULT, CAMERA_ZOOM_DEFAULT, CAMERA_ZOOM_MAX, CAMERA_ZOOM_MIN,
    CAMERA_ZOOM_STEP,
};
pub use geometry::{Rect, Vec2};
pub use input::{ActionStates, InputAction};
pub use rendering::{
    effective_parallax, render_scene, screen_to_world, world_to_screen, SceneRenderer,
};
pub use scene::{DynamicState, Entity, EntityId, EntityIdAllocator, EntityKind, Layer, Scene};
