use glam::IVec2;

/// Axis-aligned integer rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(min: IVec2, size: IVec2) -> Self {
        Self { min, size }
    }

    pub fn from_xywh(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(IVec2::new(x, y), IVec2::new(w, h))
    }

    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }

    pub fn center_x(&self) -> f32 {
        self.min.x as f32 + self.size.x as f32 / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not overlap,
    /// and an empty rectangle overlaps nothing.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.size.cmple(IVec2::ZERO).any() || other.size.cmple(IVec2::ZERO).any() {
            return false;
        }
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}

/// Playing field. Top and bottom are walls, left and right are goal lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
}

impl Arena {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Lowest legal top edge for an object of `height`
    pub fn max_top(&self, height: i32) -> i32 {
        self.height - height
    }

    /// Whether an object of `height` with top edge `y` fits between the walls
    pub fn fits_vertically(&self, y: i32, height: i32) -> bool {
        (0..=self.max_top(height)).contains(&y)
    }

    /// Top-left corner that centers an object of `size` in the arena
    pub fn centered(&self, size: IVec2) -> IVec2 {
        IVec2::new(self.width / 2 - size.x / 2, self.height / 2 - size.y / 2)
    }
}
