// --- GEOMETRY ---
// Integer screen-space points and rectangles shared by capture and controller.

/// Pointer position in device coordinates, as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - origin`.
    pub fn delta_from(self, origin: ScreenPoint) -> (i32, i32) {
        (self.x.wrapping_sub(origin.x), self.y.wrapping_sub(origin.y))
    }

    /// Packs the point into one word so it can live in a single atomic cell.
    pub fn pack(self) -> u64 {
        ((self.x as u32 as u64) << 32) | (self.y as u32 as u64)
    }

    pub fn unpack(bits: u64) -> Self {
        Self {
            x: (bits >> 32) as u32 as i32,
            y: bits as u32 as i32,
        }
    }
}

/// Window bounds in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Swaps inverted edges so that `right >= left` and `bottom >= top`.
    pub fn normalized(self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Relative position of `p` inside the rect, each axis clamped to `[0, 1]`.
    /// A degenerate axis reports 0.
    pub fn anchor_of(&self, p: ScreenPoint) -> (f64, f64) {
        let ratio = |v: i32, start: i32, extent: i32| {
            if extent <= 0 {
                0.0
            } else {
                (f64::from(v - start) / f64::from(extent)).clamp(0.0, 1.0)
            }
        };
        (
            ratio(p.x, self.left, self.width()),
            ratio(p.y, self.top, self.height()),
        )
    }

    /// The point at the given relative position inside the rect.
    pub fn point_at(&self, anchor_x: f64, anchor_y: f64) -> ScreenPoint {
        ScreenPoint {
            x: self.left + (f64::from(self.width()) * anchor_x) as i32,
            y: self.top + (f64::from(self.height()) * anchor_y) as i32,
        }
    }
}
