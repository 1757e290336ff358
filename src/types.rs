/// Axis-aligned pixel rectangle. Used both as a source clip inside a texture
/// and as a destination region on the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn dimension(self) -> Dimension {
        Dimension {
            width: self.w,
            height: self.h,
        }
    }

    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }
}

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Dimension {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width as i32, size.height as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let rect = Rect::new(100, 0, 100, 50);
        assert_eq!(rect.right(), 200);
        assert_eq!(rect.bottom(), 50);
        assert_eq!(rect.dimension(), Dimension::new(100, 50));
    }

    #[test]
    fn dimension_from_physical_size() {
        let size = winit::dpi::PhysicalSize::new(640u32, 480u32);
        assert_eq!(Dimension::from(size), Dimension::new(640, 480));
    }
}
