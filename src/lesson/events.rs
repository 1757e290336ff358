use super::{Flow, Lesson, centered_texture};
use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::Result;
use crate::input::Input;
use crate::texture::{TextureId, TextureSizes, TextureSources};
use crate::types::Dimension;

/// A centered image that stays up until any key or mouse button is pressed.
#[derive(Debug, Default)]
pub struct Events {
    image: TextureId,
    image_origin: (i32, i32),
}

impl Lesson for Events {
    fn title(&self) -> &str {
        "Lesson 4"
    }

    fn load(&mut self, config: &Config, textures: &mut TextureSources) -> Result<()> {
        self.image = textures.add_file(config.lesson_dir("Lesson4").join("image.png"));
        Ok(())
    }

    fn setup(&mut self, screen: Dimension, sizes: &TextureSizes) {
        self.image_origin = centered_texture(screen, sizes, self.image);
    }

    fn handle(&mut self, input: Input) -> Flow {
        match input {
            Input::Quit | Input::KeyDown(_) | Input::MouseDown => Flow::Exit,
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        let (x, y) = self.image_origin;
        canvas.draw_at(self.image, x, y, None);
    }
}
