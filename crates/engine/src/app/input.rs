/// Abstract key bindings delivered by the input layer.
///
/// Pan and snap actions are held; tool, shape and play-test actions fire when
/// released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    PointSnap,
    AxisSnap,
    PenTool,
    EraserTool,
    SelectTool,
    TriangleShape,
    QuadShape,
    TogglePlayTest,
}

const ACTION_COUNT: usize = 12;

#[derive(Debug, Clone, Copy, Default)]
pub struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub fn release_all(&mut self) {
        self.down = [false; ACTION_COUNT];
    }
}

impl InputAction {
    pub const ALL: [InputAction; ACTION_COUNT] = [
        InputAction::PanUp,
        InputAction::PanDown,
        InputAction::PanLeft,
        InputAction::PanRight,
        InputAction::PointSnap,
        InputAction::AxisSnap,
        InputAction::PenTool,
        InputAction::EraserTool,
        InputAction::SelectTool,
        InputAction::TriangleShape,
        InputAction::QuadShape,
        InputAction::TogglePlayTest,
    ];

    const fn index(self) -> usize {
        match self {
            InputAction::PanUp => 0,
            InputAction::PanDown => 1,
            InputAction::PanLeft => 2,
            InputAction::PanRight => 3,
            InputAction::PointSnap => 4,
            InputAction::AxisSnap => 5,
            InputAction::PenTool => 6,
            InputAction::EraserTool => 7,
            InputAction::SelectTool => 8,
            InputAction::TriangleShape => 9,
            InputAction::QuadShape => 10,
            InputAction::TogglePlayTest => 11,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            InputAction::PanUp => "pan_up",
            InputAction::PanDown => "pan_down",
            InputAction::PanLeft => "pan_left",
            InputAction::PanRight => "pan_right",
            InputAction::PointSnap => "point_snap",
            InputAction::AxisSnap => "axis_snap",
            InputAction::PenTool => "pen_tool",
            InputAction::EraserTool => "eraser_tool",
            InputAction::SelectTool => "select_tool",
            InputAction::TriangleShape => "triangle_shape",
            InputAction::QuadShape => "quad_shape",
            InputAction::TogglePlayTest => "toggle_play_test",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}
