use log::debug;

use super::{Flow, Lesson, quit_on_escape};
use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::Result;
use crate::input::{Input, Key};
use crate::texture::{TextureId, TextureSizes, TextureSources};
use crate::tile::{ScreenCoverage, TileGrid, TileSize};
use crate::types::{Dimension, Rect};

const TILE_WIDTH: i32 = 100;
const TILE_HEIGHT: i32 = 100;

/// One cell of a sprite sheet repeated over the whole window. Keys 1 to 4
/// pick the cell.
#[derive(Debug, Default)]
pub struct Clips {
    image: TextureId,
    clips: Vec<Rect>,
    coverage: Option<ScreenCoverage>,
    use_clip: usize,
}

impl Clips {
    fn tile() -> TileSize {
        TileSize::new(TILE_WIDTH, TILE_HEIGHT)
    }

    pub fn selected_clip(&self) -> Option<Rect> {
        self.clips.get(self.use_clip).copied()
    }
}

impl Lesson for Clips {
    fn title(&self) -> &str {
        "Lesson 5"
    }

    fn load(&mut self, config: &Config, textures: &mut TextureSources) -> Result<()> {
        self.image = textures.add_file(config.lesson_dir("Lesson5").join("image.png"));
        Ok(())
    }

    fn setup(&mut self, screen: Dimension, sizes: &TextureSizes) {
        if let Some(size) = sizes.query(self.image) {
            let grid = TileGrid::new(size, Self::tile());
            self.clips = grid.clips().collect();
            debug!(
                "sprite sheet {}x{} has {} clips",
                size.width,
                size.height,
                self.clips.len()
            );
        }
        self.coverage = Some(ScreenCoverage::ceil(screen, Self::tile()));
    }

    fn handle(&mut self, input: Input) -> Flow {
        match input {
            Input::KeyDown(Key::Digit(digit @ 1..=4)) => {
                let clip = usize::from(digit - 1);
                if clip < self.clips.len() {
                    self.use_clip = clip;
                }
                Flow::Continue
            }
            input => quit_on_escape(input),
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        let Some(coverage) = &self.coverage else {
            return;
        };
        // A sheet smaller than one tile has no clips; draw it whole instead.
        let clip = self.selected_clip();
        for (x, y) in coverage.origins() {
            canvas.draw_at(self.image, x, y, clip);
        }
    }
}
