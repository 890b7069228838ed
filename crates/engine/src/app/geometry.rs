use std::ops::{Add, AddAssign, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle in world units, `(x, y)` being the top-left corner
/// once normalized. Width and height may be negative while a shape is still
/// being dragged out.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.x = origin.x;
        self.y = origin.y;
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn is_normalized(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }

    /// Flips negative extents so the rectangle covers the same area with a
    /// non-negative width and height.
    pub fn normalized(&self) -> Rect {
        let mut rect = *self;
        if rect.width < 0.0 {
            rect.x += rect.width;
            rect.width = -rect.width;
        }
        if rect.height < 0.0 {
            rect.y += rect.height;
            rect.height = -rect.height;
        }
        rect
    }

    /// Half-open containment: the left/top edges are inside, the right/bottom
    /// edges are not.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let rect = self.normalized();
        point.x >= rect.x && point.x < rect.right() && point.y >= rect.y && point.y < rect.bottom()
    }

    pub fn has_area(&self) -> bool {
        self.width != 0.0 && self.height != 0.0
    }

    /// Strict overlap test; rectangles that only share an edge do not
    /// intersect, and a rectangle without area intersects nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        if !self.has_area() || !other.has_area() {
            return false;
        }
        let a = self.normalized();
        let b = other.normalized();
        a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_flips_negative_extents_and_keeps_area() {
        let rect = Rect::new(10.0, 20.0, -4.0, -6.0).normalized();
        assert_eq!(rect, Rect::new(6.0, 14.0, 4.0, 6.0));
        assert!(rect.is_normalized());
    }

    #[test]
    fn contains_point_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains_point(Vec2::new(0.0, 0.0)));
        assert!(rect.contains_point(Vec2::new(3.0, 3.0)));
        assert!(!rect.contains_point(Vec2::new(10.0, 5.0)));
        assert!(!rect.contains_point(Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn intersects_requires_real_overlap() {
        let selection = Rect::new(0.0, 0.0, 8.0, 8.0);
        assert!(selection.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(selection.intersects(&Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(!selection.intersects(&Rect::new(8.0, 0.0, 5.0, 5.0)));
        assert!(!selection.intersects(&Rect::new(100.0, 100.0, 10.0, 10.0)));
    }

    #[test]
    fn intersects_handles_unnormalized_selection() {
        let dragged_up_left = Rect::new(8.0, 8.0, -8.0, -8.0);
        assert!(dragged_up_left.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn zero_area_rect_intersects_nothing() {
        let target = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!Rect::new(5.0, 5.0, 0.0, 0.0).intersects(&target));
        assert!(!Rect::new(5.0, 2.0, 0.0, 6.0).intersects(&target));
        assert!(!target.intersects(&Rect::new(2.0, 5.0, 6.0, 0.0)));
    }

    #[test]
    fn center_of_rect() {
        assert_eq!(Rect::new(0.0, 0.0, 20.0, 40.0).center(), Vec2::new(10.0, 20.0));
    }
}
