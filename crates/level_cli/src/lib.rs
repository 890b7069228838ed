use std::fs;
use std::io::Write;
use std::path::PathBuf;

use editor::{
    DrawShape, DrawType, Editor, EditorCommand, EditorConfig, EditorEvent, PointerButton, Tool,
};
use engine::{list_levels, load_level, scene_from_json, InputAction, Layer, Scene, Vec2};
use tracing::info;

#[derive(Debug, Clone)]
pub struct CommonOptions {
    pub levels_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    List,
    Inspect { name: String },
    Validate { path: PathBuf },
    Replay { path: PathBuf, save: Option<String> },
}

/// One parsed replay line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Event(EditorEvent),
    /// Primary press, at the given screen point or wherever the pointer is.
    Press(Option<Vec2>),
    Release(Option<Vec2>),
    Tick { dt_seconds: f32, count: u32 },
    Save(String),
    Load(String),
}

/// Non-empty, non-comment script lines with their 1-based line numbers.
pub fn parse_script_commands(content: &str) -> Vec<(usize, String)> {
    let mut commands = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        commands.push((index + 1, trimmed.to_string()));
    }
    commands
}

pub fn parse_script_line(line: &str) -> Result<ScriptCommand, String> {
    let words = line.split_whitespace().collect::<Vec<_>>();
    let (&head, rest) = words
        .split_first()
        .ok_or_else(|| "empty command".to_string())?;

    let command = match (head, rest) {
        ("resize", [width, height]) => ScriptCommand::Event(EditorEvent::Resize {
            size: Vec2::new(parse_number(width)?, parse_number(height)?),
        }),
        ("tool", [name]) => {
            let tool = Tool::from_name(name).ok_or_else(|| format!("unknown tool '{name}'"))?;
            command_event(EditorCommand::SelectTool(tool))
        }
        ("type", [name]) => {
            let draw_type =
                DrawType::from_name(name).ok_or_else(|| format!("unknown draw type '{name}'"))?;
            command_event(EditorCommand::SelectDrawType(draw_type))
        }
        ("shape", ["quad"]) => command_event(EditorCommand::SetDrawShape(DrawShape::Quad)),
        ("shape", ["triangle"]) => command_event(EditorCommand::SetDrawShape(DrawShape::Triangle)),
        ("attr", [index]) => command_event(EditorCommand::SelectAttribute(
            index
                .parse::<usize>()
                .map_err(|_| format!("invalid attribute index '{index}'"))?,
        )),
        ("scroll", [steps]) => ScriptCommand::Event(EditorEvent::Scroll {
            steps: parse_steps(steps)?,
        }),
        ("zoom", [steps]) => command_event(EditorCommand::Zoom(parse_steps(steps)?)),
        ("move", [x, y]) => ScriptCommand::Event(EditorEvent::PointerMoved {
            screen: parse_point(x, y)?,
        }),
        ("down", []) => ScriptCommand::Press(None),
        ("down", [x, y]) => ScriptCommand::Press(Some(parse_point(x, y)?)),
        ("up", []) => ScriptCommand::Release(None),
        ("up", [x, y]) => ScriptCommand::Release(Some(parse_point(x, y)?)),
        ("key", [name, state]) => {
            let action =
                InputAction::from_name(name).ok_or_else(|| format!("unknown action '{name}'"))?;
            match *state {
                "down" => ScriptCommand::Event(EditorEvent::KeyDown(action)),
                "up" => ScriptCommand::Event(EditorEvent::KeyUp(action)),
                other => return Err(format!("invalid key state '{other}' (expected down|up)")),
            }
        }
        ("tick", [dt]) => ScriptCommand::Tick {
            dt_seconds: parse_number(dt)?,
            count: 1,
        },
        ("tick", [dt, count]) => ScriptCommand::Tick {
            dt_seconds: parse_number(dt)?,
            count: count
                .parse::<u32>()
                .map_err(|_| format!("invalid tick count '{count}'"))?,
        },
        ("playtest", []) => command_event(EditorCommand::TogglePlayTest),
        ("reset", []) => command_event(EditorCommand::ResetDynamics),
        ("save", [name]) => ScriptCommand::Save((*name).to_string()),
        ("load", [name]) => ScriptCommand::Load((*name).to_string()),
        _ => return Err(format!("unrecognized command '{line}'")),
    };
    Ok(command)
}

fn command_event(command: EditorCommand) -> ScriptCommand {
    ScriptCommand::Event(EditorEvent::Command(command))
}

fn parse_number(raw: &str) -> Result<f32, String> {
    raw.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("invalid number '{raw}'"))
}

fn parse_steps(raw: &str) -> Result<i32, String> {
    raw.parse::<i32>()
        .map_err(|_| format!("invalid step count '{raw}'"))
}

fn parse_point(x: &str, y: &str) -> Result<Vec2, String> {
    Ok(Vec2::new(parse_number(x)?, parse_number(y)?))
}

/// Human-readable summary of every layer, one entity per line.
pub fn describe_scene(scene: &Scene) -> Vec<String> {
    let mut lines = vec![format!("entities: {}", scene.entity_count())];
    for layer in Layer::DRAW_ORDER {
        let entities = scene.layer(layer);
        lines.push(format!("{}: {}", layer.key(), entities.len()));
        for (index, entity) in entities.iter().enumerate() {
            let bounds = entity.bounds;
            let mut line = format!(
                "  {}[{index}] {} bounds=({}, {}, {}, {}) points={}",
                layer.key(),
                entity.entity_type().tag(),
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                entity.offsets.len()
            );
            for (name, value) in entity.attributes.iter() {
                line.push_str(&format!(" {name}={value}"));
            }
            lines.push(line);
        }
    }
    lines
}

pub fn run<W: Write>(kind: CommandKind, opts: CommonOptions, stdout: &mut W) -> Result<(), String> {
    match kind {
        CommandKind::List => {
            let names = list_levels(&opts.levels_dir).map_err(|error| error.to_string())?;
            for name in names {
                write_line(stdout, &name)?;
            }
            Ok(())
        }
        CommandKind::Inspect { name } => {
            let scene = load_level(&opts.levels_dir, &name).map_err(|error| error.to_string())?;
            write_line(stdout, &format!("level: {name}"))?;
            for line in describe_scene(&scene) {
                write_line(stdout, &line)?;
            }
            Ok(())
        }
        CommandKind::Validate { path } => {
            let raw = fs::read_to_string(&path)
                .map_err(|error| format!("failed to read level file '{}': {error}", path.display()))?;
            let scene = scene_from_json(&raw)
                .map_err(|error| format!("{}: {error}", path.display()))?;
            write_line(
                stdout,
                &format!("ok: {} ({} entities)", path.display(), scene.entity_count()),
            )
        }
        CommandKind::Replay { path, save } => {
            let content = fs::read_to_string(&path)
                .map_err(|error| format!("failed to read script file '{}': {error}", path.display()))?;
            let config = EditorConfig {
                levels_dir: opts.levels_dir,
                ..EditorConfig::default()
            };
            let mut replay = Replay::new(Editor::new(config));
            for (line_number, line) in parse_script_commands(&content) {
                let command =
                    parse_script_line(&line).map_err(|error| format!("line {line_number}: {error}"))?;
                replay
                    .apply(command, stdout)
                    .map_err(|error| format!("line {line_number}: {error}"))?;
            }
            if let Some(name) = save {
                let saved = replay
                    .editor
                    .save_level(&name)
                    .map_err(|error| error.to_string())?;
                write_line(stdout, &format!("saved: {}", saved.display()))?;
            }
            for line in describe_scene(replay.editor.current_scene()) {
                write_line(stdout, &line)?;
            }
            Ok(())
        }
    }
}

struct Replay {
    editor: Editor,
    pointer: Vec2,
}

impl Replay {
    fn new(editor: Editor) -> Self {
        let pointer = editor.camera().screen_center();
        Self { editor, pointer }
    }

    fn apply<W: Write>(&mut self, command: ScriptCommand, stdout: &mut W) -> Result<(), String> {
        match command {
            ScriptCommand::Event(event) => {
                if let EditorEvent::PointerMoved { screen } = event {
                    self.pointer = screen;
                }
                self.editor.handle_event(event);
            }
            ScriptCommand::Press(at) => {
                let screen = self.pointer_at(at);
                self.editor.handle_event(EditorEvent::PointerDown {
                    button: PointerButton::Primary,
                    screen,
                });
            }
            ScriptCommand::Release(at) => {
                let screen = self.pointer_at(at);
                self.editor.handle_event(EditorEvent::PointerUp {
                    button: PointerButton::Primary,
                    screen,
                });
            }
            ScriptCommand::Tick { dt_seconds, count } => {
                for _ in 0..count {
                    self.editor.update(dt_seconds);
                }
            }
            ScriptCommand::Save(name) => {
                let path = self
                    .editor
                    .save_level(&name)
                    .map_err(|error| error.to_string())?;
                write_line(stdout, &format!("saved: {}", path.display()))?;
            }
            ScriptCommand::Load(name) => {
                self.editor
                    .load_level(&name)
                    .map_err(|error| error.to_string())?;
                info!(name = %name, "replay_level_loaded");
            }
        }
        Ok(())
    }

    fn pointer_at(&mut self, at: Option<Vec2>) -> Vec2 {
        if let Some(screen) = at {
            self.pointer = screen;
        }
        self.pointer
    }
}

fn write_line<W: Write>(stdout: &mut W, line: &str) -> Result<(), String> {
    writeln!(stdout, "{line}").map_err(|error| format!("failed to write output: {error}"))
}
