//! Axis-aligned rectangles in world units.
//!
//! Screen y grows downward. Width and height are never negative; the centre
//! is always derived from the bounds.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    pub fn from_center(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        let w = w.max(0.0);
        let h = h.max(0.0);
        Rect::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }

    pub fn center(&self) -> (f64, f64) {
        (self.center_x(), self.center_y())
    }

    pub fn set_center_x(&mut self, cx: f64) {
        self.x = cx - self.w / 2.0;
    }

    pub fn set_center_y(&mut self, cy: f64) {
        self.y = cy - self.h / 2.0;
    }

    pub fn set_center(&mut self, cx: f64, cy: f64) {
        self.set_center_x(cx);
        self.set_center_y(cy);
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Grow (or shrink, for negative deltas) around the same centre.
    pub fn inflate(&self, dw: f64, dh: f64) -> Rect {
        let (cx, cy) = self.center();
        Rect::from_center(cx, cy, self.w + dw, self.h + dh)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Angle of the half-diagonal, `atan((h/2) / (w/2))`.
    pub fn half_diagonal_angle(&self) -> f64 {
        (self.h / 2.0).atan2(self.w / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_follows_bounds() {
        let mut r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.center(), (25.0, 40.0));
        r.set_center(0.0, 0.0);
        assert_eq!(r.left(), -15.0);
        assert_eq!(r.bottom(), 20.0);
    }

    #[test]
    fn negative_sizes_are_clamped() {
        let r = Rect::new(0.0, 0.0, -5.0, -1.0);
        assert_eq!(r.w, 0.0);
        assert_eq!(r.h, 0.0);
        let shrunk = Rect::new(0.0, 0.0, 4.0, 4.0).inflate(-10.0, -10.0);
        assert_eq!(shrunk.w, 0.0);
        assert_eq!(shrunk.center(), (2.0, 2.0));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }
}
