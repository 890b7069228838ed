use super::*;
use engine::{ATTR_MASS, ATTR_PARALLAX, CAMERA_ZOOM_MAX};

fn block(entity_type: EntityType, bounds: Rect) -> Entity {
    let mut attributes = AttributeSet::defaults_for(entity_type);
    if entity_type == EntityType::Scenery {
        attributes.insert(ATTR_PARALLAX, 0.5);
    }
    Entity::new(
        entity_type,
        bounds,
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, bounds.height),
            Vec2::new(bounds.width, bounds.height),
            Vec2::new(bounds.width, 0.0),
        ],
        attributes,
    )
}

/// Session without a player, so the viewport stays at the world origin.
fn editor_with(entities: Vec<Entity>) -> Editor {
    let mut scene = Scene::new();
    for entity in entities {
        scene.insert(entity);
    }
    Editor::with_scene(EditorConfig::default(), scene)
}

fn screen_of(editor: &Editor, world: Vec2) -> Vec2 {
    editor.camera().world_to_screen(world, 1.0)
}

fn press(editor: &mut Editor, x: f32, y: f32) {
    let screen = screen_of(editor, Vec2::new(x, y));
    editor.handle_event(EditorEvent::PointerDown {
        button: PointerButton::Primary,
        screen,
    });
}

fn release(editor: &mut Editor, x: f32, y: f32) {
    let screen = screen_of(editor, Vec2::new(x, y));
    editor.handle_event(EditorEvent::PointerUp {
        button: PointerButton::Primary,
        screen,
    });
}

fn move_to(editor: &mut Editor, x: f32, y: f32) {
    let screen = screen_of(editor, Vec2::new(x, y));
    editor.handle_event(EditorEvent::PointerMoved { screen });
}

fn click(editor: &mut Editor, x: f32, y: f32) {
    press(editor, x, y);
    release(editor, x, y);
}

fn sweep(editor: &mut Editor, from: Vec2, to: Vec2) {
    press(editor, from.x, from.y);
    move_to(editor, to.x, to.y);
    editor.update(0.0);
    release(editor, to.x, to.y);
}

fn main_bounds(editor: &Editor) -> Vec<Rect> {
    editor
        .current_scene()
        .layer(Layer::Main)
        .iter()
        .map(|entity| entity.bounds)
        .collect()
}

#[derive(Default)]
struct RecordingRenderer {
    drawn: Vec<EntityId>,
    outlined: Vec<EntityId>,
    markers: Vec<Vec2>,
    guides: Vec<(Vec2, Vec2)>,
    rects: Vec<Rect>,
}

impl SceneRenderer for RecordingRenderer {
    fn draw(&mut self, entity: &Entity, _camera: &Camera2D) {
        self.drawn.push(entity.id());
    }

    fn debug_draw(&mut self, entity: &Entity, _camera: &Camera2D) {
        self.outlined.push(entity.id());
    }

    fn draw_marker(&mut self, world: Vec2, _parallax: f32, _camera: &Camera2D) {
        self.markers.push(world);
    }

    fn draw_guide(&mut self, from: Vec2, to: Vec2, _parallax: f32, _camera: &Camera2D) {
        self.guides.push((from, to));
    }

    fn draw_rect_outline(&mut self, rect: Rect, _parallax: f32, _camera: &Camera2D) {
        self.rects.push(rect);
    }
}

#[test]
fn new_session_seeds_player_and_centres_camera() {
    let editor = Editor::new(EditorConfig::default());
    let player = editor.current_scene().player().expect("player");
    assert_eq!(player.bounds, Rect::new(0.0, 0.0, 20.0, 40.0));
    assert_eq!(player.attributes.get(ATTR_MASS), Some(10.0));
    assert_eq!(editor.current_scene().entity_count(), 1);
    assert_eq!(editor.camera().viewport, Vec2::new(10.0, 20.0));
    assert_eq!(editor.camera().target, None);
    assert_eq!(editor.current_tool(), Tool::Pen);
    assert_eq!(editor.current_draw_type(), DrawType::Static);
}

#[test]
fn in_progress_draw_stays_out_of_the_scene() {
    let mut editor = editor_with(Vec::new());
    press(&mut editor, 0.0, 0.0);
    move_to(&mut editor, -10.0, 5.0);
    editor.update(0.0);

    assert!(editor.current_scene().is_empty());
    let drawing = editor.in_progress().expect("drawing");
    assert_eq!(drawing.bounds, Rect::new(0.0, 0.0, -10.0, 5.0));
    assert_eq!(drawing.id(), EntityId::DETACHED);
}

#[test]
fn committed_rect_is_normalized_for_every_drag_direction() {
    for end in [
        Vec2::new(30.0, 20.0),
        Vec2::new(-30.0, 20.0),
        Vec2::new(30.0, -20.0),
        Vec2::new(-30.0, -20.0),
    ] {
        let mut editor = editor_with(Vec::new());
        press(&mut editor, 0.0, 0.0);
        move_to(&mut editor, end.x, end.y);
        editor.update(0.0);
        press(&mut editor, end.x, end.y);

        assert!(matches!(editor.state(), EditState::Idle));
        let entity = &editor.current_scene().layer(Layer::Main)[0];
        assert_eq!(
            entity.bounds,
            Rect::new(end.x.min(0.0), end.y.min(0.0), 30.0, 20.0),
            "drag to {end:?}"
        );
        assert_eq!(
            entity.offsets,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 20.0),
                Vec2::new(30.0, 20.0),
                Vec2::new(30.0, 0.0),
            ]
        );
    }
}

#[test]
fn draw_below_minimum_size_is_discarded() {
    let mut editor = editor_with(Vec::new());
    press(&mut editor, 0.0, 0.0);
    press(&mut editor, 0.05, 30.0);
    assert!(editor.current_scene().is_empty());
    assert!(matches!(editor.state(), EditState::Idle));

    press(&mut editor, 0.0, 0.0);
    press(&mut editor, 40.0, 0.0);
    assert!(editor.current_scene().is_empty());
}

#[test]
fn triangle_dragged_up_left_drops_far_corner() {
    let mut editor = editor_with(Vec::new());
    editor.handle_event(EditorEvent::KeyUp(InputAction::TriangleShape));
    press(&mut editor, 10.0, 10.0);
    press(&mut editor, 0.0, 0.0);

    let entity = &editor.current_scene().layer(Layer::Main)[0];
    assert_eq!(entity.bounds, Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(
        entity.offsets,
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 10.0),
        ]
    );
}

#[test]
fn dynamic_commit_spawns_at_normalized_corner() {
    let mut editor = editor_with(Vec::new());
    editor.handle_event(EditorCommand::SelectDrawType(DrawType::Dynamic).into());
    press(&mut editor, 0.0, 0.0);
    press(&mut editor, -20.0, -10.0);

    let entity = &editor.current_scene().layer(Layer::Main)[0];
    assert_eq!(entity.entity_type(), EntityType::Dynamic);
    let state = entity.kind.dynamic_state().expect("dynamic state");
    assert_eq!(state.position, Vec2::new(-20.0, -10.0));
    assert_eq!(state.spawn, Vec2::new(-20.0, -10.0));
    assert_eq!(entity.attributes.get(ATTR_MASS), Some(10.0));
}

#[test]
fn near_scenery_lands_in_foreground_using_its_parallax() {
    let mut editor = editor_with(Vec::new());
    editor.handle_event(EditorCommand::SelectDrawType(DrawType::Scenery).into());
    editor.handle_event(EditorCommand::SelectAttribute(0).into());
    editor.handle_event(EditorCommand::AdjustAttribute(30).into());
    assert_eq!(editor.attributes().parallax(), 2.0);

    for screen in [Vec2::new(500.0, 300.0), Vec2::new(560.0, 340.0)] {
        editor.handle_event(EditorEvent::PointerDown {
            button: PointerButton::Primary,
            screen,
        });
    }

    let foreground = editor.current_scene().layer(Layer::Foreground);
    assert_eq!(foreground.len(), 1);
    assert_eq!(foreground[0].bounds, Rect::new(25.0, 0.0, 30.0, 20.0));
    assert_eq!(foreground[0].attributes.get(ATTR_PARALLAX), Some(2.0));
}

#[test]
fn selection_rect_collects_overlaps_across_layers() {
    let mut editor = editor_with(vec![
        block(EntityType::Scenery, Rect::new(0.0, 0.0, 10.0, 10.0)),
        block(EntityType::Static, Rect::new(5.0, 5.0, 10.0, 10.0)),
        block(EntityType::Static, Rect::new(100.0, 100.0, 10.0, 10.0)),
    ]);
    let background = editor.current_scene().layer(Layer::Background)[0].id();
    let near = editor.current_scene().layer(Layer::Main)[0].id();
    let far = editor.current_scene().layer(Layer::Main)[1].id();

    editor.handle_event(EditorCommand::SelectTool(Tool::Select).into());
    sweep(&mut editor, Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0));

    assert_eq!(editor.selection(), &[background, near]);
    assert!(!editor.selection().contains(&far));
    assert!(matches!(editor.state(), EditState::Idle));
}

#[test]
fn repeated_sweeps_do_not_duplicate_selection() {
    let mut editor = editor_with(vec![block(
        EntityType::Static,
        Rect::new(0.0, 0.0, 10.0, 10.0),
    )]);
    editor.handle_event(EditorCommand::SelectTool(Tool::Select).into());
    sweep(&mut editor, Vec2::new(-5.0, -5.0), Vec2::new(20.0, 20.0));
    sweep(&mut editor, Vec2::new(30.0, 30.0), Vec2::new(-5.0, -5.0));
    assert_eq!(editor.selection().len(), 1);
}

#[test]
fn dragging_moves_selection_by_recorded_offset() {
    let mut editor = editor_with(vec![block(
        EntityType::Static,
        Rect::new(10.0, 10.0, 10.0, 10.0),
    )]);
    editor.handle_event(EditorCommand::SelectTool(Tool::Select).into());
    sweep(&mut editor, Vec2::new(0.0, 0.0), Vec2::new(30.0, 30.0));
    assert_eq!(editor.selection().len(), 1);

    press(&mut editor, 12.0, 13.0);
    match editor.state() {
        EditState::Dragging { grabs } => assert_eq!(grabs[0].1, Vec2::new(-2.0, -3.0)),
        other => panic!("expected drag, got {other:?}"),
    }
    move_to(&mut editor, 20.0, 20.0);
    editor.update(0.0);
    assert_eq!(main_bounds(&editor), vec![Rect::new(18.0, 17.0, 10.0, 10.0)]);

    release(&mut editor, 20.0, 20.0);
    assert!(editor.selection().is_empty());
    assert!(matches!(editor.state(), EditState::Idle));
    assert_eq!(main_bounds(&editor), vec![Rect::new(18.0, 17.0, 10.0, 10.0)]);
}

#[test]
fn plain_click_with_selector_selects_nothing() {
    let mut editor = editor_with(vec![block(
        EntityType::Static,
        Rect::new(0.0, 0.0, 10.0, 10.0),
    )]);
    editor.handle_event(EditorCommand::SelectTool(Tool::Select).into());

    click(&mut editor, 5.0, 5.0);
    assert!(editor.selection().is_empty());

    press(&mut editor, 5.0, 5.0);
    assert!(matches!(editor.state(), EditState::Selecting { .. }));
}

#[test]
fn drag_release_lands_at_release_cursor_without_tick() {
    let mut editor = editor_with(vec![block(
        EntityType::Static,
        Rect::new(10.0, 10.0, 10.0, 10.0),
    )]);
    editor.handle_event(EditorCommand::SelectTool(Tool::Select).into());
    sweep(&mut editor, Vec2::new(0.0, 0.0), Vec2::new(30.0, 30.0));

    press(&mut editor, 12.0, 13.0);
    move_to(&mut editor, 20.0, 20.0);
    release(&mut editor, 20.0, 20.0);

    assert_eq!(main_bounds(&editor), vec![Rect::new(18.0, 17.0, 10.0, 10.0)]);
    assert!(editor.selection().is_empty());
}

#[test]
fn dragging_dynamic_body_moves_its_spawn() {
    let mut editor = editor_with(vec![block(
        EntityType::Dynamic,
        Rect::new(0.0, 0.0, 10.0, 10.0),
    )]);
    editor.handle_event(EditorCommand::SelectTool(Tool::Select).into());
    sweep(&mut editor, Vec2::new(-1.0, -1.0), Vec2::new(5.0, 5.0));
    press(&mut editor, 5.0, 5.0);
    move_to(&mut editor, 45.0, 25.0);
    editor.update(0.0);
    release(&mut editor, 45.0, 25.0);

    let entity = &editor.current_scene().layer(Layer::Main)[0];
    let state = entity.kind.dynamic_state().expect("dynamic state");
    assert_eq!(entity.anchor(), Vec2::new(40.0, 20.0));
    assert_eq!(state.position, Vec2::new(40.0, 20.0));
    assert_eq!(state.spawn, Vec2::new(40.0, 20.0));
}

#[test]
fn eraser_removes_only_entities_under_cursor() {
    let mut editor = editor_with(vec![block(
        EntityType::Static,
        Rect::new(0.0, 0.0, 10.0, 10.0),
    )]);
    editor.handle_event(EditorCommand::SelectTool(Tool::Eraser).into());

    click(&mut editor, 50.0, 50.0);
    assert_eq!(editor.current_scene().entity_count(), 1);

    click(&mut editor, 3.0, 3.0);
    assert!(editor.current_scene().is_empty());
}

#[test]
fn eraser_keeps_erasing_while_held() {
    let mut editor = editor_with(vec![
        block(EntityType::Static, Rect::new(0.0, 0.0, 10.0, 10.0)),
        block(EntityType::Static, Rect::new(20.0, 0.0, 10.0, 10.0)),
    ]);
    editor.handle_event(EditorCommand::SelectTool(Tool::Eraser).into());

    press(&mut editor, 50.0, 50.0);
    move_to(&mut editor, 5.0, 5.0);
    editor.update(0.0);
    release(&mut editor, 5.0, 5.0);
    assert_eq!(main_bounds(&editor), vec![Rect::new(20.0, 0.0, 10.0, 10.0)]);

    move_to(&mut editor, 25.0, 5.0);
    editor.update(0.0);
    assert_eq!(editor.current_scene().entity_count(), 1);
}

#[test]
fn switching_tools_cancels_uncommitted_work() {
    let mut editor = editor_with(vec![block(
        EntityType::Static,
        Rect::new(0.0, 0.0, 10.0, 10.0),
    )]);
    press(&mut editor, 50.0, 50.0);
    assert!(editor.in_progress().is_some());

    editor.handle_event(EditorEvent::KeyUp(InputAction::SelectTool));
    assert_eq!(editor.current_tool(), Tool::Select);
    assert!(editor.in_progress().is_none());
    assert_eq!(editor.current_scene().entity_count(), 1);

    sweep(&mut editor, Vec2::new(-1.0, -1.0), Vec2::new(5.0, 5.0));
    assert_eq!(editor.selection().len(), 1);
    press(&mut editor, 40.0, 40.0);
    assert!(editor.selection_rect().is_some());

    editor.handle_event(EditorEvent::KeyUp(InputAction::PenTool));
    assert!(editor.selection().is_empty());
    assert!(editor.selection_rect().is_none());
}

#[test]
fn point_snap_moves_both_draw_corners() {
    let mut editor = editor_with(vec![block(
        EntityType::Static,
        Rect::new(0.0, 0.0, 10.0, 10.0),
    )]);
    editor.handle_event(EditorEvent::KeyDown(InputAction::PointSnap));
    move_to(&mut editor, 11.0, 12.0);
    editor.update(0.0);
    assert_eq!(editor.snap_marker(), Some(Vec2::new(10.0, 10.0)));

    press(&mut editor, 11.0, 12.0);
    editor.handle_event(EditorEvent::KeyUp(InputAction::PointSnap));
    editor.update(0.0);
    assert_eq!(editor.snap_marker(), None);
    press(&mut editor, 40.0, 30.0);

    assert_eq!(
        main_bounds(&editor)[1],
        Rect::new(10.0, 10.0, 30.0, 20.0)
    );
}

#[test]
fn axis_snap_aligns_start_with_nearest_corner_row() {
    let mut editor = editor_with(vec![block(
        EntityType::Static,
        Rect::new(0.0, 0.0, 10.0, 10.0),
    )]);
    editor.handle_event(EditorEvent::KeyDown(InputAction::AxisSnap));
    move_to(&mut editor, 30.0, 12.0);
    editor.update(0.0);
    assert_eq!(
        editor.axis_guide(),
        Some(AxisGuide {
            from: Vec2::new(10.0, 10.0),
            to: Vec2::new(30.0, 10.0),
        })
    );

    press(&mut editor, 30.0, 12.0);
    editor.handle_event(EditorEvent::KeyUp(InputAction::AxisSnap));
    press(&mut editor, 50.0, 40.0);
    assert_eq!(
        main_bounds(&editor)[1],
        Rect::new(30.0, 10.0, 20.0, 30.0)
    );
}

#[test]
fn presses_over_ui_panel_are_ignored() {
    let mut editor = editor_with(Vec::new());
    editor.handle_event(EditorEvent::PointerDown {
        button: PointerButton::Primary,
        screen: Vec2::new(120.0, 300.0),
    });
    assert!(matches!(editor.state(), EditState::Idle));

    editor.handle_event(EditorEvent::Scroll { steps: 1 });
    assert_eq!(editor.attributes().values(), &[0.9]);
}

#[test]
fn scroll_outside_panel_steps_selected_attribute() {
    let mut editor = editor_with(Vec::new());
    move_to(&mut editor, 0.0, 0.0);
    editor.handle_event(EditorEvent::Scroll { steps: 1 });
    assert_eq!(editor.attributes().values(), &[0.95]);
    editor.handle_event(EditorEvent::Scroll { steps: 4 });
    assert_eq!(editor.attributes().values(), &[1.0]);
}

#[test]
fn play_test_makes_camera_follow_player() {
    let mut editor = Editor::new(EditorConfig::default());
    let player = editor.current_scene().player().map(Entity::id);

    editor.handle_event(EditorEvent::KeyUp(InputAction::TogglePlayTest));
    assert!(editor.is_play_test());
    assert_eq!(editor.camera().target, player);

    editor.handle_event(EditorEvent::KeyDown(InputAction::PanRight));
    editor.update(1.0);
    assert_eq!(editor.camera().viewport, Vec2::new(10.0, 20.0));

    editor.handle_event(EditorCommand::TogglePlayTest.into());
    assert!(!editor.is_play_test());
    assert_eq!(editor.camera().target, None);
    editor.update(0.5);
    assert_eq!(editor.camera().viewport, Vec2::new(210.0, 20.0));
}

#[test]
fn reset_leaves_play_test_and_recentres_on_player() {
    let mut editor = Editor::new(EditorConfig::default());
    editor.handle_event(EditorCommand::TogglePlayTest.into());
    editor.handle_event(EditorCommand::ResetDynamics.into());
    assert!(!editor.is_play_test());
    assert_eq!(editor.camera().target, None);

    editor.handle_event(EditorEvent::KeyDown(InputAction::PanDown));
    editor.update(1.0);
    editor.handle_event(EditorEvent::KeyUp(InputAction::PanDown));
    assert_ne!(editor.camera().viewport, Vec2::new(10.0, 20.0));

    editor.handle_event(EditorCommand::ResetDynamics.into());
    assert_eq!(editor.camera().viewport, Vec2::new(10.0, 20.0));
}

#[test]
fn zoom_command_is_clamped() {
    let mut editor = editor_with(Vec::new());
    editor.handle_event(EditorCommand::Zoom(50).into());
    assert_eq!(editor.camera().zoom, CAMERA_ZOOM_MAX);
}

#[test]
fn saved_level_loads_into_a_fresh_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = EditorConfig {
        levels_dir: dir.path().to_path_buf(),
        ..EditorConfig::default()
    };

    let mut editor = Editor::new(config.clone());
    editor.handle_event(EditorCommand::SelectDrawType(DrawType::Dynamic).into());
    press(&mut editor, 40.0, 0.0);
    press(&mut editor, 60.0, 30.0);
    let path = editor.save_level("round_trip").expect("save");
    assert!(path.ends_with("round_trip.json"));

    let mut other = Editor::with_scene(config, Scene::new());
    assert!(other.current_scene().is_empty());
    other.load_level("round_trip").expect("load");
    assert_eq!(other.current_scene().entity_count(), 2);
    assert_eq!(
        main_bounds(&other),
        vec![
            Rect::new(0.0, 0.0, 20.0, 40.0),
            Rect::new(40.0, 0.0, 20.0, 30.0),
        ]
    );
    assert_eq!(other.camera().viewport, Vec2::new(10.0, 20.0));
}

#[test]
fn loading_a_scene_releases_held_modifiers() {
    let mut editor = editor_with(vec![block(
        EntityType::Static,
        Rect::new(0.0, 0.0, 10.0, 10.0),
    )]);
    editor.handle_event(EditorEvent::KeyDown(InputAction::PointSnap));
    editor.update(0.0);
    assert!(editor.snap_marker().is_some());

    editor.load_scene(Scene::new());
    editor.update(0.0);
    assert_eq!(editor.snap_marker(), None);
}

#[test]
fn failed_load_leaves_session_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("broken.json"), "{ \"background\": [").expect("write");
    let config = EditorConfig {
        levels_dir: dir.path().to_path_buf(),
        ..EditorConfig::default()
    };
    let mut editor = Editor::new(config);
    editor.handle_event(EditorCommand::SelectTool(Tool::Select).into());
    sweep(&mut editor, Vec2::new(-1.0, -1.0), Vec2::new(5.0, 5.0));
    let selection = editor.selection().to_vec();
    assert_eq!(selection.len(), 1);

    assert!(matches!(
        editor.load_level("broken"),
        Err(LevelError::Parse { .. })
    ));
    assert!(matches!(
        editor.load_level("missing"),
        Err(LevelError::ReadFile { .. })
    ));
    assert_eq!(editor.current_scene().entity_count(), 1);
    assert_eq!(editor.selection(), selection.as_slice());
    assert_eq!(editor.current_tool(), Tool::Select);
}

#[test]
fn draw_pass_outlines_by_tool_and_renders_overlays() {
    let mut editor = editor_with(vec![
        block(EntityType::Scenery, Rect::new(0.0, 0.0, 10.0, 10.0)),
        block(EntityType::Static, Rect::new(20.0, 0.0, 10.0, 10.0)),
    ]);
    let background = editor.current_scene().layer(Layer::Background)[0].id();
    let main = editor.current_scene().layer(Layer::Main)[0].id();

    editor.handle_event(EditorCommand::SelectTool(Tool::Eraser).into());
    let mut renderer = RecordingRenderer::default();
    editor.draw(&mut renderer);
    assert_eq!(renderer.drawn, vec![background, main]);
    assert_eq!(renderer.outlined, vec![background, main]);

    editor.handle_event(EditorCommand::SelectTool(Tool::Select).into());
    sweep(&mut editor, Vec2::new(19.0, 1.0), Vec2::new(21.0, 2.0));
    press(&mut editor, 50.0, 50.0);
    editor.handle_event(EditorEvent::KeyDown(InputAction::PointSnap));
    editor.update(0.0);
    let mut renderer = RecordingRenderer::default();
    editor.draw(&mut renderer);
    assert_eq!(renderer.outlined, vec![main]);
    assert_eq!(renderer.markers, vec![Vec2::new(30.0, 10.0)]);
    assert_eq!(renderer.rects.len(), 1);
    assert!(renderer.guides.is_empty());

    editor.handle_event(EditorEvent::KeyUp(InputAction::PointSnap));
    editor.handle_event(EditorCommand::SelectTool(Tool::Pen).into());
    press(&mut editor, 100.0, 100.0);
    editor.update(0.0);
    let mut renderer = RecordingRenderer::default();
    editor.draw(&mut renderer);
    assert!(renderer.outlined.is_empty());
    assert_eq!(renderer.drawn, vec![background, main, EntityId::DETACHED]);
}
