use std::time::Duration;

use super::{Lesson, centered_texture};
use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::Result;
use crate::texture::{TextureId, TextureSizes, TextureSources};
use crate::tile::{ScreenCoverage, TileSize};
use crate::types::Dimension;

const TILE_SIZE: i32 = 40;

/// A background scaled down to small tiles, laid out row by row.
#[derive(Debug, Default)]
pub struct Tiles {
    background: TextureId,
    image: TextureId,
    coverage: Option<ScreenCoverage>,
    image_origin: (i32, i32),
}

impl Lesson for Tiles {
    fn title(&self) -> &str {
        "Lesson 3"
    }

    fn load(&mut self, config: &Config, textures: &mut TextureSources) -> Result<()> {
        let dir = config.lesson_dir("Lesson3");
        self.background = textures.add_file(dir.join("background.png"));
        self.image = textures.add_file(dir.join("image.png"));
        Ok(())
    }

    fn setup(&mut self, screen: Dimension, sizes: &TextureSizes) {
        self.coverage = Some(ScreenCoverage::floor(screen, TileSize::square(TILE_SIZE)));
        self.image_origin = centered_texture(screen, sizes, self.image);
    }

    fn draw(&self, canvas: &mut Canvas) {
        if let Some(coverage) = &self.coverage {
            for (x, y) in coverage.row_major_origins() {
                canvas.draw_scaled(self.background, x, y, TILE_SIZE, TILE_SIZE);
            }
        }
        let (x, y) = self.image_origin;
        canvas.draw_at(self.image, x, y, None);
    }

    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::test_util::{frame, prepare};
    use crate::types::Rect;

    #[test]
    fn screen_is_covered_by_whole_tiles() {
        let mut lesson = Tiles::default();
        let (_, sizes) = prepare(
            &mut lesson,
            &[Dimension::new(512, 512), Dimension::new(200, 200)],
        );

        let commands = frame(&lesson, &sizes);
        // 16 x 12 background tiles plus the image.
        assert_eq!(commands.len(), 193);
        assert_eq!(commands[0].dst, Rect::new(0, 0, 40, 40));
        assert_eq!(commands[1].dst, Rect::new(40, 0, 40, 40));
        assert_eq!(commands[16].dst, Rect::new(0, 40, 40, 40));
        assert_eq!(commands[191].dst, Rect::new(600, 440, 40, 40));
        assert!(commands[..192].iter().all(|command| command.texture == 0));
        assert_eq!(commands[192].dst, Rect::new(220, 140, 200, 200));
    }
}
