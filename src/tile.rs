//! Tile layout arithmetic.
//!
//! Sprite sheets are cut into fixed-size source tiles and the display is
//! covered by destination tiles of the same size. Indices are column-major:
//! an index walks down a column before moving to the next one. Everything in
//! here is pure integer arithmetic and holds no state.

use crate::types::{Dimension, Rect};

/// Fixed tile size in pixels. Both sides are strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSize {
    width: i32,
    height: i32,
}

impl TileSize {
    /// Panics when either side is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "tile size must be positive, got {width}x{height}"
        );
        Self { width, height }
    }

    pub fn square(side: i32) -> Self {
        Self::new(side, side)
    }

    pub fn width(self) -> i32 {
        self.width
    }

    pub fn height(self) -> i32 {
        self.height
    }
}

/// Clip rectangle of source tile `index`.
///
/// `rows_per_column` is the number of whole tiles that fit vertically in the
/// source image. The caller keeps `index` below the grid total.
pub fn source_tile_rect(index: i32, tile: TileSize, rows_per_column: i32) -> Rect {
    let (x, y) = column_major(index, tile, rows_per_column);
    Rect::new(x, y, tile.width, tile.height)
}

/// Top-left corner of destination tile `index` on the display.
///
/// The result is not clipped; the last row and column may hang off screen.
pub fn screen_tile_origin(index: i32, tile: TileSize, rows_per_screen: i32) -> (i32, i32) {
    column_major(index, tile, rows_per_screen)
}

/// Row-major counterpart of [`screen_tile_origin`]: the index walks along a
/// row before moving down.
pub fn row_major_origin(index: i32, tile: TileSize, columns: i32) -> (i32, i32) {
    assert!(columns > 0, "column count must be positive");
    ((index % columns) * tile.width, (index / columns) * tile.height)
}

fn column_major(index: i32, tile: TileSize, rows: i32) -> (i32, i32) {
    assert!(rows > 0, "row count must be positive");
    ((index / rows) * tile.width, (index % rows) * tile.height)
}

fn ceil_div(value: i32, divisor: i32) -> i32 {
    value / divisor + i32::from(value % divisor != 0)
}

/// Whole tiles contained in a source image. Remainder pixels on the right
/// and bottom edges are never part of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    tile: TileSize,
    columns: i32,
    rows: i32,
}

impl TileGrid {
    pub fn new(source: Dimension, tile: TileSize) -> Self {
        Self {
            tile,
            columns: source.width / tile.width,
            rows: source.height / tile.height,
        }
    }

    pub fn tile(&self) -> TileSize {
        self.tile
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Zero when the source is smaller than one tile in either direction.
    pub fn total(&self) -> i32 {
        self.columns * self.rows
    }

    pub fn clip(&self, index: i32) -> Option<Rect> {
        (0..self.total())
            .contains(&index)
            .then(|| source_tile_rect(index, self.tile, self.rows))
    }

    /// Every clip in index order.
    pub fn clips(&self) -> impl Iterator<Item = Rect> + '_ {
        (0..self.total()).map(|index| source_tile_rect(index, self.tile, self.rows))
    }
}

/// Destination tiles needed to cover a display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenCoverage {
    tile: TileSize,
    columns: i32,
    rows: i32,
}

impl ScreenCoverage {
    /// Covers the whole display, adding a partial trailing tile on each axis
    /// whose size is not a multiple of the tile size.
    pub fn ceil(display: Dimension, tile: TileSize) -> Self {
        Self {
            tile,
            columns: ceil_div(display.width, tile.width),
            rows: ceil_div(display.height, tile.height),
        }
    }

    /// Only whole tiles; a strip on the right and bottom may stay uncovered.
    pub fn floor(display: Dimension, tile: TileSize) -> Self {
        Self {
            tile,
            columns: display.width / tile.width,
            rows: display.height / tile.height,
        }
    }

    pub fn tile(&self) -> TileSize {
        self.tile
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn total(&self) -> i32 {
        self.columns * self.rows
    }

    /// Origins in column-major order.
    pub fn origins(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.total()).map(|index| screen_tile_origin(index, self.tile, self.rows))
    }

    /// Origins in row-major order.
    pub fn row_major_origins(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.total()).map(|index| row_major_origin(index, self.tile, self.columns))
    }
}

/// Top-left corner that centers an item of `size` on `display`.
pub fn centered(display: Dimension, size: Dimension) -> (i32, i32) {
    (
        display.width / 2 - size.width / 2,
        display.height / 2 - size.height / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> TileGrid {
        TileGrid::new(Dimension::new(400, 200), TileSize::square(100))
    }

    #[test]
    fn sprite_sheet_tiles() {
        let grid = sheet();
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.total(), 8);

        let tile = TileSize::square(100);
        assert_eq!(source_tile_rect(0, tile, 2), Rect::new(0, 0, 100, 100));
        assert_eq!(source_tile_rect(1, tile, 2), Rect::new(0, 100, 100, 100));
        assert_eq!(source_tile_rect(2, tile, 2), Rect::new(100, 0, 100, 100));
    }

    #[test]
    fn clips_are_column_major() {
        let clips: Vec<Rect> = sheet().clips().collect();
        assert_eq!(clips.len(), 8);
        assert_eq!(clips[3], Rect::new(100, 100, 100, 100));
        assert_eq!(clips[7], Rect::new(300, 100, 100, 100));
    }

    #[test]
    fn clip_out_of_range() {
        let grid = sheet();
        assert_eq!(grid.clip(7), Some(Rect::new(300, 100, 100, 100)));
        assert_eq!(grid.clip(8), None);
        assert_eq!(grid.clip(-1), None);
    }

    #[test]
    fn remainder_pixels_are_dropped() {
        let grid = TileGrid::new(Dimension::new(250, 199), TileSize::square(100));
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.total(), 2);
    }

    #[test]
    fn source_smaller_than_tile() {
        let grid = TileGrid::new(Dimension::new(50, 50), TileSize::square(100));
        assert_eq!(grid.total(), 0);
        assert_eq!(grid.clips().count(), 0);
        assert_eq!(grid.clip(0), None);
    }

    #[test]
    fn screen_coverage_rounds_up() {
        let coverage = ScreenCoverage::ceil(Dimension::new(640, 480), TileSize::square(100));
        assert_eq!(coverage.columns(), 7);
        assert_eq!(coverage.rows(), 5);
        assert_eq!(coverage.total(), 35);

        let origins: Vec<(i32, i32)> = coverage.origins().collect();
        assert_eq!(origins[0], (0, 0));
        assert_eq!(origins[4], (0, 400));
        assert_eq!(origins[5], (100, 0));
        assert_eq!(origins[34], (600, 400));
    }

    #[test]
    fn exact_multiple_adds_no_extra_tile() {
        let coverage = ScreenCoverage::ceil(Dimension::new(600, 400), TileSize::square(100));
        assert_eq!((coverage.columns(), coverage.rows()), (6, 4));
    }

    #[test]
    fn floor_coverage_row_major() {
        let coverage = ScreenCoverage::floor(Dimension::new(640, 480), TileSize::square(40));
        assert_eq!((coverage.columns(), coverage.rows()), (16, 12));
        assert_eq!(coverage.total(), 192);

        let origins: Vec<(i32, i32)> = coverage.row_major_origins().collect();
        assert_eq!(origins[1], (40, 0));
        assert_eq!(origins[16], (0, 40));
        assert_eq!(origins[191], (600, 440));
    }

    #[test]
    fn centering() {
        let display = Dimension::new(640, 480);
        assert_eq!(centered(display, Dimension::new(100, 50)), (270, 215));
        assert_eq!(centered(display, Dimension::new(101, 51)), (270, 215));
        assert_eq!(centered(display, Dimension::new(800, 480)), (-80, 0));
    }

    #[test]
    #[should_panic(expected = "tile size must be positive")]
    fn zero_tile_size_panics() {
        TileSize::new(0, 100);
    }

    #[test]
    #[should_panic(expected = "row count must be positive")]
    fn zero_rows_panics() {
        source_tile_rect(0, TileSize::square(10), 0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn total_is_floor_product(
                tile_w in 1i32..200,
                tile_h in 1i32..200,
                extra_w in 0i32..2000,
                extra_h in 0i32..2000,
            ) {
                let source = Dimension::new(tile_w + extra_w, tile_h + extra_h);
                let grid = TileGrid::new(source, TileSize::new(tile_w, tile_h));
                prop_assert_eq!(
                    grid.total(),
                    (source.width / tile_w) * (source.height / tile_h)
                );
            }

            #[test]
            fn clips_stay_inside_source(
                tile_w in 1i32..100,
                tile_h in 1i32..100,
                source_w in 1i32..1000,
                source_h in 1i32..1000,
            ) {
                let grid = TileGrid::new(
                    Dimension::new(source_w, source_h),
                    TileSize::new(tile_w, tile_h),
                );
                for clip in grid.clips() {
                    prop_assert!(clip.x >= 0 && clip.y >= 0);
                    prop_assert!(clip.right() <= source_w, "{:?} exceeds width {}", clip, source_w);
                    prop_assert!(clip.bottom() <= source_h, "{:?} exceeds height {}", clip, source_h);
                }
            }

            #[test]
            fn next_index_moves_down_then_right(
                tile_w in 1i32..100,
                tile_h in 1i32..100,
                rows in 1i32..20,
                index in 0i32..400,
            ) {
                let tile = TileSize::new(tile_w, tile_h);
                let current = source_tile_rect(index, tile, rows);
                let next = source_tile_rect(index + 1, tile, rows);
                if index % rows == rows - 1 {
                    prop_assert_eq!(next.x, current.x + tile_w);
                    prop_assert_eq!(next.y, 0);
                } else {
                    prop_assert_eq!(next.x, current.x);
                    prop_assert_eq!(next.y, current.y + tile_h);
                }
            }

            #[test]
            fn ceil_coverage_covers_display(
                display_w in 1i32..4000,
                display_h in 1i32..4000,
                tile_w in 1i32..500,
                tile_h in 1i32..500,
            ) {
                let coverage = ScreenCoverage::ceil(
                    Dimension::new(display_w, display_h),
                    TileSize::new(tile_w, tile_h),
                );
                prop_assert!(coverage.columns() * tile_w >= display_w);
                prop_assert!(coverage.rows() * tile_h >= display_h);
                // Never more than one partial tile per axis.
                prop_assert!((coverage.columns() - 1) * tile_w < display_w);
                prop_assert!((coverage.rows() - 1) * tile_h < display_h);
            }
        }
    }
}
