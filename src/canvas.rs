use log::warn;

use crate::texture::{TextureId, TextureSizes};
use crate::types::Rect;

/// Copy of a texture region onto a display region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCommand {
    pub texture: TextureId,
    /// Sub-section of the texture; `None` draws the whole texture.
    pub clip: Option<Rect>,
    pub dst: Rect,
}

/// Ordered draw list for one frame. Later commands paint over earlier ones.
pub struct Canvas<'a> {
    sizes: &'a TextureSizes,
    commands: Vec<DrawCommand>,
}

impl<'a> Canvas<'a> {
    pub fn new(sizes: &'a TextureSizes) -> Self {
        Self {
            sizes,
            commands: Vec::new(),
        }
    }

    pub fn sizes(&self) -> &TextureSizes {
        self.sizes
    }

    /// Drops everything queued so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Copies `clip` of `texture` into `dst`, scaling as needed.
    pub fn copy(&mut self, texture: TextureId, clip: Option<Rect>, dst: Rect) {
        self.commands.push(DrawCommand { texture, clip, dst });
    }

    /// Draws `texture` at `(x, y)` without scaling. The destination takes the
    /// clip's size, or the whole texture's size when there is no clip.
    pub fn draw_at(&mut self, texture: TextureId, x: i32, y: i32, clip: Option<Rect>) {
        let size = match clip {
            Some(clip) => clip.dimension(),
            None => match self.sizes.query(texture) {
                Some(size) => size,
                None => {
                    warn!("texture {texture} has no size, skipping draw");
                    return;
                }
            },
        };
        self.copy(texture, clip, Rect::new(x, y, size.width, size.height));
    }

    /// Draws the whole of `texture` stretched to `w` x `h`.
    pub fn draw_scaled(&mut self, texture: TextureId, x: i32, y: i32, w: i32, h: i32) {
        self.copy(texture, None, Rect::new(x, y, w, h));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}
