/// Inner (client) size of an element in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

impl Extent {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along one axis: height for rows, width for columns.
    pub fn along(self, axis: crate::types::Axis) -> i32 {
        match axis {
            crate::types::Axis::Row => self.height,
            crate::types::Axis::Column => self.width,
        }
    }
}

/// Pixel rectangle relative to a surface container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Position of one visible row or column inside a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub index: usize,
    /// Leading edge, may be negative for a partially scrolled-out element.
    pub start: i32,
    pub size: i32,
}

impl Span {
    /// Trailing edge (the boundary a resize handle sits on).
    pub fn end(&self) -> i32 {
        self.start + self.size
    }
}
