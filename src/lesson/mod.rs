//! The lesson programs. Each one declares its textures, reacts to input and
//! fills a [`Canvas`] every frame; the window loop in the crate root drives
//! them.

mod background;
mod clips;
mod events;
mod hello;
mod text;
mod tiles;

use std::time::Duration;

pub use background::Background;
pub use clips::Clips;
pub use events::Events;
pub use hello::Hello;
pub use text::Text;
pub use tiles::Tiles;

use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::input::{Input, Key};
use crate::texture::{TextureId, TextureSizes, TextureSources};
use crate::tile;
use crate::types::Dimension;

pub const LESSON_COUNT: u8 = 6;

/// What the window loop should do after an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub trait Lesson {
    fn title(&self) -> &str;

    /// Registers the textures the lesson draws. Runs before the window opens.
    fn load(&mut self, config: &Config, textures: &mut TextureSources) -> Result<()>;

    /// Computes layout once texture sizes are known. Runs again when the
    /// window size changes.
    fn setup(&mut self, _screen: Dimension, _sizes: &TextureSizes) {}

    fn handle(&mut self, input: Input) -> Flow {
        match input {
            Input::Quit => Flow::Exit,
            _ => Flow::Continue,
        }
    }

    fn draw(&self, canvas: &mut Canvas);

    /// Timed lessons close themselves after this long.
    fn timeout(&self) -> Option<Duration> {
        None
    }
}

pub fn by_number(number: u8) -> Result<Box<dyn Lesson>> {
    let lesson: Box<dyn Lesson> = match number {
        1 => Box::new(Hello::default()),
        2 => Box::new(Background::default()),
        3 => Box::new(Tiles::default()),
        4 => Box::new(Events::default()),
        5 => Box::new(Clips::default()),
        6 => Box::new(Text::default()),
        _ => return Err(Error::UnknownLesson(number)),
    };
    Ok(lesson)
}

/// Quit on close or Escape.
fn quit_on_escape(input: Input) -> Flow {
    match input {
        Input::Quit | Input::KeyDown(Key::Escape) => Flow::Exit,
        _ => Flow::Continue,
    }
}

/// Origin that centers `texture` on the screen, or the top-left corner when
/// its size is unknown.
fn centered_texture(screen: Dimension, sizes: &TextureSizes, texture: TextureId) -> (i32, i32) {
    sizes
        .query(texture)
        .map_or((0, 0), |size| tile::centered(screen, size))
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::path::PathBuf;

    use super::*;
    use crate::canvas::DrawCommand;

    pub fn config() -> Config {
        Config::new(PathBuf::from("/opt/lessons/res"))
    }

    /// Loads the lesson and lays it out with the given texture sizes.
    pub fn prepare(lesson: &mut dyn Lesson, sizes: &[Dimension]) -> (TextureSources, TextureSizes) {
        let config = config();
        let mut sources = TextureSources::default();
        lesson.load(&config, &mut sources).unwrap();
        let sizes: TextureSizes = sizes
            .iter()
            .enumerate()
            .map(|(id, size)| (id as TextureId, *size))
            .collect();
        lesson.setup(config.screen, &sizes);
        (sources, sizes)
    }

    pub fn frame(lesson: &dyn Lesson, sizes: &TextureSizes) -> Vec<DrawCommand> {
        let mut canvas = Canvas::new(sizes);
        lesson.draw(&mut canvas);
        canvas.into_commands()
    }
}
