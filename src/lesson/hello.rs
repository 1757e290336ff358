use std::time::Duration;

use super::Lesson;
use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::Result;
use crate::texture::{TextureId, TextureSizes, TextureSources};
use crate::types::Dimension;

/// A bitmap stretched over the whole window for three seconds.
#[derive(Debug, Default)]
pub struct Hello {
    image: TextureId,
    screen: Option<Dimension>,
}

impl Lesson for Hello {
    fn title(&self) -> &str {
        "Hello World!"
    }

    fn load(&mut self, config: &Config, textures: &mut TextureSources) -> Result<()> {
        self.image = textures.add_file(config.lesson_dir("Lesson1").join("HelloWorld.bmp"));
        Ok(())
    }

    fn setup(&mut self, screen: Dimension, _sizes: &TextureSizes) {
        self.screen = Some(screen);
    }

    fn draw(&self, canvas: &mut Canvas) {
        if let Some(screen) = self.screen {
            canvas.draw_scaled(self.image, 0, 0, screen.width, screen.height);
        }
    }

    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(3))
    }
}
