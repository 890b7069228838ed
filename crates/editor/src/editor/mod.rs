use std::mem;
use std::path::PathBuf;

use engine::{
    load_level, render_scene, save_level, ActionStates, AttributeSet, Camera2D, Entity, EntityId,
    EntityType, InputAction, Layer, LevelError, Rect, Scene, SceneRenderer, Vec2,
};
use tracing::{debug, info, warn};

use crate::attribute_editor::AttributeEditor;
use crate::config::EditorConfig;
use crate::events::{EditorCommand, EditorEvent, PointerButton};
use crate::offsets::{calculate_offsets, DrawCorner, DrawShape, DEFAULT_DRAW_PATTERN};
use crate::snap::{snap_to_corner, snap_to_plane, AxisGuide};
use crate::tools::{DrawType, Tool};

const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 0.0);
const PLAYER_SIZE: Vec2 = Vec2::new(20.0, 40.0);
const PLAYER_ATTRIBUTES: [f32; 2] = [10.0, 0.9];

/// Pointer-driven authoring state. The entity being drawn lives here, not
/// in the scene, until it is committed.
#[derive(Debug, Clone, Default)]
pub enum EditState {
    #[default]
    Idle,
    Drawing {
        origin: Vec2,
        entity: Entity,
    },
    Selecting {
        anchor: Vec2,
        rect: Rect,
    },
    Dragging {
        grabs: Vec<(EntityId, Vec2)>,
    },
}

pub struct Editor {
    config: EditorConfig,
    scene: Scene,
    camera: Camera2D,
    actions: ActionStates,
    tool: Tool,
    draw_shape: DrawShape,
    attributes: AttributeEditor,
    state: EditState,
    selection: Vec<EntityId>,
    pointer_screen: Vec2,
    primary_held: bool,
    play_test: bool,
    snap_marker: Option<Vec2>,
    axis_guide: Option<AxisGuide>,
}

impl Editor {
    /// Starts a session on a fresh level holding only the player.
    pub fn new(config: EditorConfig) -> Self {
        let mut scene = Scene::new();
        scene.insert(default_player());
        Self::with_scene(config, scene)
    }

    pub fn with_scene(config: EditorConfig, scene: Scene) -> Self {
        let mut camera = Camera2D::new(config.screen_size);
        camera.pan_speed = config.pan_speed;
        let pointer_screen = camera.screen_center();
        let mut editor = Self {
            config,
            scene: Scene::new(),
            camera,
            actions: ActionStates::default(),
            tool: Tool::default(),
            draw_shape: DrawShape::default(),
            attributes: AttributeEditor::default(),
            state: EditState::Idle,
            selection: Vec::new(),
            pointer_screen,
            primary_held: false,
            play_test: false,
            snap_marker: None,
            axis_guide: None,
        };
        editor.load_scene(scene);
        editor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn current_scene(&self) -> &Scene {
        &self.scene
    }

    pub fn current_tool(&self) -> Tool {
        self.tool
    }

    pub fn current_draw_type(&self) -> DrawType {
        self.attributes.draw_type()
    }

    pub fn draw_shape(&self) -> DrawShape {
        self.draw_shape
    }

    pub fn attributes(&self) -> &AttributeEditor {
        &self.attributes
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn selection(&self) -> &[EntityId] {
        &self.selection
    }

    pub fn is_play_test(&self) -> bool {
        self.play_test
    }

    pub fn in_progress(&self) -> Option<&Entity> {
        match &self.state {
            EditState::Drawing { entity, .. } => Some(entity),
            _ => None,
        }
    }

    pub fn selection_rect(&self) -> Option<Rect> {
        match &self.state {
            EditState::Selecting { rect, .. } => Some(*rect),
            _ => None,
        }
    }

    pub fn snap_marker(&self) -> Option<Vec2> {
        self.snap_marker
    }

    pub fn axis_guide(&self) -> Option<AxisGuide> {
        self.axis_guide
    }

    pub fn handle_event(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::KeyDown(action) => self.actions.set(action, true),
            EditorEvent::KeyUp(action) => {
                self.actions.set(action, false);
                self.on_key_released(action);
            }
            EditorEvent::PointerMoved { screen } => self.pointer_screen = screen,
            EditorEvent::PointerDown { button, screen } => {
                self.pointer_screen = screen;
                if button == PointerButton::Primary {
                    self.on_primary_down();
                }
            }
            EditorEvent::PointerUp { button, screen } => {
                self.pointer_screen = screen;
                if button == PointerButton::Primary {
                    self.on_primary_up();
                }
            }
            EditorEvent::Scroll { steps } => {
                if !self.pointer_over_panel() {
                    self.adjust_attribute(steps);
                }
            }
            EditorEvent::Resize { size } => self.camera.resize(size),
            EditorEvent::Command(command) => self.apply_command(command),
        }
    }

    pub fn apply_command(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::SelectTool(tool) => self.select_tool(tool),
            EditorCommand::SelectDrawType(draw_type) => {
                self.attributes.select_draw_type(draw_type);
                debug!(draw_type = ?draw_type, "draw_type_selected");
            }
            EditorCommand::SetDrawShape(shape) => self.draw_shape = shape,
            EditorCommand::SelectAttribute(index) => {
                self.attributes.select(index);
            }
            EditorCommand::AdjustAttribute(steps) => self.adjust_attribute(steps),
            EditorCommand::TogglePlayTest => self.toggle_play_test(),
            EditorCommand::ResetDynamics => self.reset_dynamics(),
            EditorCommand::Zoom(steps) => self.camera.apply_zoom_steps(steps),
        }
    }

    /// Switching tools always drops the selection and any uncommitted shape
    /// or selection rectangle.
    pub fn select_tool(&mut self, tool: Tool) {
        if matches!(self.state, EditState::Drawing { .. }) {
            debug!(tool = tool.name(), "draw_cancelled");
        }
        self.state = EditState::Idle;
        self.selection.clear();
        self.tool = tool;
        debug!(tool = tool.name(), "tool_selected");
    }

    pub fn toggle_play_test(&mut self) {
        self.play_test = !self.play_test;
        self.camera.target = if self.play_test {
            self.scene.player().map(Entity::id)
        } else {
            None
        };
        info!(enabled = self.play_test, "play_test_toggled");
    }

    /// Puts every simulated body back at its spawn and hands the camera back
    /// to the designer, centred on the player.
    pub fn reset_dynamics(&mut self) {
        let count = self.scene.reset_dynamics();
        self.play_test = false;
        self.camera.target = None;
        self.center_on_player();
        info!(count, "dynamics_reset");
    }

    pub fn update(&mut self, dt_seconds: f32) {
        let draw_cursor = self.cursor_world(self.attributes.parallax());
        self.snap_marker = self
            .actions
            .is_down(InputAction::PointSnap)
            .then(|| snap_to_corner(draw_cursor, self.scene.layer(Layer::Main), None));
        self.axis_guide = self
            .actions
            .is_down(InputAction::AxisSnap)
            .then(|| snap_to_plane(draw_cursor, self.scene.layer(Layer::Main), None));

        let cursor = self.cursor_world(1.0);
        let draw_position = self.effective_draw_position();
        let shape = self.draw_shape;
        match &mut self.state {
            EditState::Idle => {}
            EditState::Drawing { origin, entity } => {
                let extent = draw_position - *origin;
                entity.bounds = Rect::from_origin_size(*origin, extent);
                entity.offsets = calculate_offsets(extent, DrawCorner::TopLeft, shape);
            }
            EditState::Selecting { anchor, rect } => {
                *rect = Rect::from_origin_size(*anchor, cursor - *anchor);
            }
            EditState::Dragging { grabs } => {
                for (id, offset) in grabs.iter() {
                    if let Some(entity) = self.scene.find_mut(*id) {
                        entity.set_position(cursor + *offset);
                    }
                }
            }
        }

        if self.tool == Tool::Eraser && self.primary_held {
            self.erase_at(cursor);
        }

        self.camera.update(&self.actions, dt_seconds, &self.scene);
    }

    /// Layers back to front, tool outlines, the shape being drawn, then the
    /// snap and selection overlays.
    pub fn draw<R>(&self, renderer: &mut R)
    where
        R: SceneRenderer + ?Sized,
    {
        let tool = self.tool;
        render_scene(&self.scene, &self.camera, renderer, |_, entity| match tool {
            Tool::Eraser => true,
            Tool::Select => self.selection.contains(&entity.id()),
            Tool::Pen => false,
        });

        if let Some(entity) = self.in_progress() {
            renderer.draw(entity, &self.camera);
        }

        let parallax = self.attributes.parallax();
        if let Some(marker) = self.snap_marker {
            renderer.draw_marker(marker, parallax, &self.camera);
        }
        if let Some(guide) = self.axis_guide {
            renderer.draw_guide(guide.from, guide.to, parallax, &self.camera);
        }
        if let Some(rect) = self.selection_rect() {
            renderer.draw_rect_outline(rect, 1.0, &self.camera);
        }
    }

    pub fn save_level(&self, name: &str) -> Result<PathBuf, LevelError> {
        save_level(&self.config.levels_dir, name, &self.scene)
    }

    /// Replaces the scene with a stored level. On failure the session is left
    /// exactly as it was.
    pub fn load_level(&mut self, name: &str) -> Result<(), LevelError> {
        match load_level(&self.config.levels_dir, name) {
            Ok(scene) => {
                self.load_scene(scene);
                Ok(())
            }
            Err(error) => {
                warn!(name, error = %error, "level_load_failed");
                Err(error)
            }
        }
    }

    pub fn load_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.state = EditState::Idle;
        self.selection.clear();
        self.primary_held = false;
        self.actions.release_all();
        self.play_test = false;
        self.camera.target = None;
        self.center_on_player();
        debug!(entity_count = self.scene.entity_count(), "scene_replaced");
    }

    fn on_key_released(&mut self, action: InputAction) {
        match action {
            InputAction::PenTool => self.select_tool(Tool::Pen),
            InputAction::EraserTool => self.select_tool(Tool::Eraser),
            InputAction::SelectTool => self.select_tool(Tool::Select),
            InputAction::TriangleShape => self.draw_shape = DrawShape::Triangle,
            InputAction::QuadShape => self.draw_shape = DrawShape::Quad,
            InputAction::TogglePlayTest => self.toggle_play_test(),
            InputAction::PanUp
            | InputAction::PanDown
            | InputAction::PanLeft
            | InputAction::PanRight
            | InputAction::PointSnap
            | InputAction::AxisSnap => {}
        }
    }

    fn on_primary_down(&mut self) {
        if self.pointer_over_panel() {
            debug!(x = self.pointer_screen.x, "pointer_over_ui_panel");
            return;
        }
        self.primary_held = true;

        match self.tool {
            Tool::Pen => match mem::take(&mut self.state) {
                EditState::Drawing { origin, entity } => self.commit_draw(origin, entity),
                _ => self.begin_draw(),
            },
            Tool::Eraser => {
                let cursor = self.cursor_world(1.0);
                self.erase_at(cursor);
            }
            Tool::Select => self.begin_select(),
        }
    }

    fn on_primary_up(&mut self) {
        self.primary_held = false;
        match mem::take(&mut self.state) {
            EditState::Selecting { anchor, .. } => {
                let cursor = self.cursor_world(1.0);
                let rect = Rect::from_origin_size(anchor, cursor - anchor).normalized();
                for id in self.scene.ids_intersecting(&rect) {
                    if !self.selection.contains(&id) {
                        self.selection.push(id);
                    }
                }
                debug!(selected = self.selection.len(), "selection_updated");
            }
            EditState::Dragging { grabs } => {
                let cursor = self.cursor_world(1.0);
                for (id, offset) in &grabs {
                    if let Some(entity) = self.scene.find_mut(*id) {
                        entity.set_position(cursor + *offset);
                    }
                }
                debug!(moved = grabs.len(), "drag_finished");
                self.selection.clear();
            }
            other => self.state = other,
        }
    }

    fn begin_draw(&mut self) {
        let origin = self.effective_draw_position();
        let draw_type = self.attributes.draw_type();
        let entity = Entity::new(
            draw_type.entity_type(),
            Rect::from_origin_size(origin, Vec2::ZERO),
            DEFAULT_DRAW_PATTERN.to_vec(),
            self.attributes.attribute_set(),
        );
        self.state = EditState::Drawing { origin, entity };
    }

    fn commit_draw(&mut self, origin: Vec2, mut entity: Entity) {
        let position = self.effective_draw_position();
        let extent = position - origin;
        let bounds = Rect::from_origin_size(origin, extent).normalized();
        if bounds.width < self.config.min_draw_size || bounds.height < self.config.min_draw_size {
            debug!(
                width = bounds.width,
                height = bounds.height,
                "draw_discarded"
            );
            return;
        }

        entity.bounds = bounds;
        entity.offsets = calculate_offsets(
            bounds.size(),
            DrawCorner::from_drag(extent),
            self.draw_shape,
        );
        entity.sync_simulation_state();
        let entity_type = entity.entity_type();
        let layer = entity.layer();
        let id = self.scene.insert(entity);
        info!(
            id = id.0,
            entity_type = entity_type.tag(),
            layer = layer.key(),
            "entity_committed"
        );
    }

    fn begin_select(&mut self) {
        let cursor = self.cursor_world(1.0);
        let grabbed = self.selection.iter().any(|id| {
            self.scene
                .find(*id)
                .is_some_and(|entity| entity.bounds.contains_point(cursor))
        });

        self.state = if grabbed {
            let grabs = self
                .selection
                .iter()
                .filter_map(|id| self.scene.find(*id))
                .map(|entity| (entity.id(), entity.anchor() - cursor))
                .collect();
            EditState::Dragging { grabs }
        } else {
            EditState::Selecting {
                anchor: cursor,
                rect: Rect::from_origin_size(cursor, Vec2::ZERO),
            }
        };
    }

    fn erase_at(&mut self, point: Vec2) {
        let removed = self.scene.remove_at_point(point);
        if removed.is_empty() {
            return;
        }
        self.selection.retain(|id| !removed.contains(id));
        if let Some(target) = self.camera.target {
            if removed.contains(&target) {
                self.camera.target = None;
            }
        }
        info!(count = removed.len(), "entities_erased");
    }

    fn adjust_attribute(&mut self, steps: i32) {
        if let Some(value) = self.attributes.adjust(steps) {
            debug!(value, "attribute_adjusted");
        }
    }

    fn cursor_world(&self, parallax: f32) -> Vec2 {
        self.camera.screen_to_world(self.pointer_screen, parallax)
    }

    /// Cursor position for the pen: point-snap wins over axis-snap when both
    /// modifiers are held.
    fn effective_draw_position(&self) -> Vec2 {
        let cursor = self.cursor_world(self.attributes.parallax());
        let candidates = self.scene.layer(Layer::Main);
        if self.actions.is_down(InputAction::PointSnap) {
            snap_to_corner(cursor, candidates, None)
        } else if self.actions.is_down(InputAction::AxisSnap) {
            snap_to_plane(cursor, candidates, None).to
        } else {
            cursor
        }
    }

    fn pointer_over_panel(&self) -> bool {
        self.pointer_screen.x < self.config.ui_panel_width
    }

    fn center_on_player(&mut self) {
        if let Some(center) = self.scene.player().map(|player| player.bounds.center()) {
            self.camera.center_on(center);
        }
    }
}

fn default_player() -> Entity {
    Entity::new(
        EntityType::Player,
        Rect::from_origin_size(PLAYER_SPAWN, PLAYER_SIZE),
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, PLAYER_SIZE.y),
            Vec2::new(PLAYER_SIZE.x, PLAYER_SIZE.y),
            Vec2::new(PLAYER_SIZE.x, 0.0),
        ],
        AttributeSet::from_ordered(EntityType::Player, &PLAYER_ATTRIBUTES),
    )
}

#[cfg(test)]
mod tests;
