/// Platform-neutral integer rectangle (image pixel space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    #[inline]
    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// Construct a normalized rectangle from two points.
    #[inline]
    pub fn from_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            left: x1.min(x2),
            top: y1.min(y2),
            right: x1.max(x2),
            bottom: y1.max(y2),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &RectI32) -> RectI32 {
        RectI32 {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Left/top edges are inside, right/bottom edges are not.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> RectI32 {
        RectI32 {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

/// Floating point rectangle (view space).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    #[inline]
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Left/top edges are inside, right/bottom edges are not.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeF {
    pub width: f32,
    pub height: f32,
}

impl SizeF {
    #[inline]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

impl From<(u32, u32)> for SizeF {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f32, height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_xywh_and_dimensions() {
        let r = RectI32::from_xywh(10, 20, 30, 40);
        assert_eq!(r.right, 40);
        assert_eq!(r.bottom, 60);
        assert_eq!(r.width(), 30);
        assert_eq!(r.height(), 40);
        assert!(!r.is_empty());
        assert!(RectI32::from_xywh(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn from_points_normalizes() {
        let r = RectI32::from_points(50, 60, 10, 20);
        assert_eq!(r, RectI32::from_xywh(10, 20, 40, 40));
    }

    #[test]
    fn union_covers_both() {
        let a = RectI32::from_xywh(0, 0, 10, 10);
        let b = RectI32::from_xywh(20, 5, 10, 10);
        assert_eq!(a.union(&b), RectI32::from_points(0, 0, 30, 15));
    }

    #[test]
    fn recti32_contains_is_half_open() {
        let r = RectI32::from_xywh(0, 0, 10, 10);
        assert!(r.contains(0, 0));
        assert!(r.contains(9, 9));
        assert!(!r.contains(10, 5));
        assert!(!r.offset(5, 5).contains(4, 4));
    }

    #[test]
    fn rectf_contains_is_half_open() {
        let r = RectF::from_xywh(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(29.9, 29.9));
        assert!(!r.contains(30.0, 15.0));
        assert!(!r.contains(15.0, 30.0));
        assert!(!r.contains(9.9, 15.0));
    }
}
