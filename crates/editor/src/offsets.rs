use engine::Vec2;

/// Placeholder outline given to a draw before the pointer moves.
pub const DEFAULT_DRAW_PATTERN: [Vec2; 4] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawShape {
    #[default]
    Quad,
    Triangle,
}

/// Corner of the committed rectangle that the draw started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl DrawCorner {
    /// Dragging left puts the start on the right edge; dragging up puts it
    /// on the bottom edge.
    pub fn from_drag(delta: Vec2) -> Self {
        match (delta.x < 0.0, delta.y < 0.0) {
            (false, false) => DrawCorner::TopLeft,
            (true, false) => DrawCorner::TopRight,
            (false, true) => DrawCorner::BottomLeft,
            (true, true) => DrawCorner::BottomRight,
        }
    }

    const fn dropped_triangle_point(self) -> usize {
        match self {
            DrawCorner::TopLeft => 1,
            DrawCorner::TopRight => 2,
            DrawCorner::BottomLeft => 0,
            DrawCorner::BottomRight => 3,
        }
    }
}

/// Outline for a rectangle of `extent` measured from its anchor. Quads walk
/// (0,0), (0,h), (w,h), (w,0); triangles omit one of those points depending
/// on `corner`.
pub fn calculate_offsets(extent: Vec2, corner: DrawCorner, shape: DrawShape) -> Vec<Vec2> {
    let mut points = vec![
        Vec2::ZERO,
        Vec2::new(0.0, extent.y),
        Vec2::new(extent.x, extent.y),
        Vec2::new(extent.x, 0.0),
    ];
    if shape == DrawShape::Triangle {
        points.remove(corner.dropped_triangle_point());
    }
    points
}
