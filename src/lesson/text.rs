use super::{Flow, Lesson, centered_texture, quit_on_escape};
use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::Result;
use crate::font::{self, TextColor};
use crate::input::Input;
use crate::texture::{TextureId, TextureSizes, TextureSources};
use crate::types::Dimension;

const MESSAGE: &str = "TTF fonts are neat!";
const FONT_FILE: &str = "OpenSans-Regular.ttf";
const FONT_SIZE: f32 = 64.0;

/// A line of text rendered from a TrueType font, centered in the window.
#[derive(Debug, Default)]
pub struct Text {
    message: TextureId,
    origin: (i32, i32),
}

impl Lesson for Text {
    fn title(&self) -> &str {
        "Lesson 6"
    }

    fn load(&mut self, config: &Config, textures: &mut TextureSources) -> Result<()> {
        let font_file = config.lesson_dir("Lesson6").join(FONT_FILE);
        let image = font::render_text(MESSAGE, &font_file, TextColor::WHITE, FONT_SIZE)?;
        self.message = textures.add_image(image);
        Ok(())
    }

    fn setup(&mut self, screen: Dimension, sizes: &TextureSizes) {
        self.origin = centered_texture(screen, sizes, self.message);
    }

    fn handle(&mut self, input: Input) -> Flow {
        quit_on_escape(input)
    }

    fn draw(&self, canvas: &mut Canvas) {
        let (x, y) = self.origin;
        canvas.draw_at(self.message, x, y, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::lesson::test_util::{config, frame};
    use crate::types::Rect;

    #[test]
    fn missing_font_fails_to_load() {
        let mut lesson = Text::default();
        let mut sources = TextureSources::default();
        let err = lesson.load(&config(), &mut sources).unwrap_err();
        match err {
            Error::FontLoad { path, .. } => {
                assert!(path.ends_with("Lesson6/OpenSans-Regular.ttf"), "{path:?}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(sources.is_empty());
    }

    #[test]
    fn message_is_centered() {
        let mut lesson = Text::default();
        let sizes: TextureSizes = [(0, Dimension::new(540, 88))].into_iter().collect();
        lesson.setup(Dimension::new(640, 480), &sizes);

        let commands = frame(&lesson, &sizes);
        assert_eq!(commands[0].dst, Rect::new(50, 196, 540, 88));
    }
}
