use std::time::Duration;

use super::{Lesson, centered_texture};
use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::Result;
use crate::texture::{TextureId, TextureSizes, TextureSources};
use crate::types::Dimension;

/// A background repeated 2x2 at its own size with a centered image on top.
#[derive(Debug, Default)]
pub struct Background {
    background: TextureId,
    image: TextureId,
    background_size: Option<Dimension>,
    image_origin: (i32, i32),
}

impl Lesson for Background {
    fn title(&self) -> &str {
        "Lesson 2"
    }

    fn load(&mut self, config: &Config, textures: &mut TextureSources) -> Result<()> {
        let dir = config.lesson_dir("Lesson2");
        self.background = textures.add_file(dir.join("background.bmp"));
        self.image = textures.add_file(dir.join("image.bmp"));
        Ok(())
    }

    fn setup(&mut self, screen: Dimension, sizes: &TextureSizes) {
        self.background_size = sizes.query(self.background);
        self.image_origin = centered_texture(screen, sizes, self.image);
    }

    fn draw(&self, canvas: &mut Canvas) {
        if let Some(Dimension { width, height }) = self.background_size {
            for (x, y) in [(0, 0), (width, 0), (0, height), (width, height)] {
                canvas.draw_at(self.background, x, y, None);
            }
        }
        let (x, y) = self.image_origin;
        canvas.draw_at(self.image, x, y, None);
    }

    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::test_util::{frame, prepare};
    use crate::types::Rect;

    #[test]
    fn background_tiles_then_image() {
        let mut lesson = Background::default();
        let (_, sizes) = prepare(
            &mut lesson,
            &[Dimension::new(320, 240), Dimension::new(100, 60)],
        );

        let commands = frame(&lesson, &sizes);
        let dsts: Vec<Rect> = commands.iter().map(|command| command.dst).collect();
        assert_eq!(
            dsts,
            vec![
                Rect::new(0, 0, 320, 240),
                Rect::new(320, 0, 320, 240),
                Rect::new(0, 240, 320, 240),
                Rect::new(320, 240, 320, 240),
                Rect::new(270, 210, 100, 60),
            ]
        );
        assert_eq!(commands[4].texture, 1);
    }
}
