//! Minimal 2D geometry for the editing layer.
//!
//! The canvas owns real hit-testing and drawing geometry; the core only needs
//! component access, translation, and axis-aligned rectangle containment for
//! `move_selected` / `select_in_rect`.

/// A 2D point on the composition canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Creates a point from its components.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shifts the point by a delta in place.
    pub fn translate(&mut self, delta: Point) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Returns the midpoint between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// An axis-aligned rectangle with inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Top-left corner (minimum x/y).
    pub min: Point,
    /// Bottom-right corner (maximum x/y).
    pub max: Point,
}

impl Rect {
    /// Builds the bounding rectangle of two arbitrary corner points.
    pub fn bounding(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_shifts_components() {
        let mut p = Point::new(10.0, -4.0);
        p.translate(Point::new(-2.5, 4.0));
        assert_eq!(p, Point::new(7.5, 0.0));
    }

    #[test]
    fn midpoint_is_symmetric() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 50.0);
        assert_eq!(a.midpoint(b), Point::new(50.0, 25.0));
        assert_eq!(a.midpoint(b), b.midpoint(a));
    }

    #[test]
    fn bounding_normalizes_corners() {
        let r = Rect::bounding(Point::new(10.0, -5.0), Point::new(-3.0, 7.0));
        assert_eq!(r.min, Point::new(-3.0, -5.0));
        assert_eq!(r.max, Point::new(10.0, 7.0));
    }

    #[test]
    fn contains_is_inclusive_on_edges() {
        let r = Rect::bounding(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(5.0, 10.0)));
        assert!(!r.contains(Point::new(10.1, 5.0)));
    }
}
