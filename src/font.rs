//! Text rasterization into an RGBA image that can be uploaded like any other
//! texture.

use std::path::Path;

use cosmic_text::{
    Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache, fontdb,
};
use image::{Rgba, RgbaImage};
use log::debug;

use crate::error::{Error, Result};

/// Straight (non-premultiplied) RGBA text color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextColor {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Renders `message` with the font stored in `font_file`.
///
/// The font is loaded for this call only. The returned image is exactly as
/// large as the laid-out text and transparent outside the glyphs.
pub fn render_text(
    message: &str,
    font_file: &Path,
    color: TextColor,
    font_size: f32,
) -> Result<RgbaImage> {
    let data = std::fs::read(font_file).map_err(|source| Error::FontLoad {
        path: font_file.to_path_buf(),
        source,
    })?;

    let mut db = fontdb::Database::new();
    db.load_font_data(data);
    let family = db
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| Error::NoFontFace(font_file.to_path_buf()))?;
    debug!("rendering {message:?} with {family} at {font_size}px");

    let mut font_system = FontSystem::new_with_locale_and_db("en-US".to_string(), db);
    let mut swash_cache = SwashCache::new();

    let metrics = Metrics::new(font_size, (font_size * 1.2).ceil());
    let mut buffer = Buffer::new(&mut font_system, metrics);
    buffer.set_size(&mut font_system, None, None);
    let attrs = Attrs::new().family(Family::Name(&family));
    buffer.set_text(&mut font_system, message, &attrs, Shaping::Advanced);
    buffer.shape_until_scroll(&mut font_system, false);

    let (width, height) = buffer.layout_runs().fold((0.0f32, 0.0f32), |(w, h), run| {
        (w.max(run.line_w), h.max(run.line_top + run.line_height))
    });
    let (width, height) = (width.ceil() as u32, height.ceil() as u32);
    if width == 0 || height == 0 {
        return Err(Error::EmptyText(message.to_string()));
    }

    let mut image = RgbaImage::new(width, height);
    let text_color = Color::rgba(color.r, color.g, color.b, color.a);
    buffer.draw(
        &mut font_system,
        &mut swash_cache,
        text_color,
        |x, y, w, h, pixel| {
            for py in y..y + h as i32 {
                for px in x..x + w as i32 {
                    blend(&mut image, px, py, pixel);
                }
            }
        },
    );

    Ok(image)
}

/// Composites one coverage sample over whatever is already in the image.
/// Samples outside the image are dropped.
fn blend(image: &mut RgbaImage, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 || x as u32 >= image.width() || y as u32 >= image.height() {
        return;
    }
    let dst = image.get_pixel_mut(x as u32, y as u32);
    let src_a = u32::from(color.a());
    if src_a == 0 {
        return;
    }
    let dst_a = u32::from(dst.0[3]);
    let out_a = src_a + dst_a * (255 - src_a) / 255;
    let mix = |src: u8, dst: u8| -> u8 {
        let src = u32::from(src) * src_a;
        let dst = u32::from(dst) * dst_a * (255 - src_a) / 255;
        ((src + dst) / out_a).min(255) as u8
    };
    *dst = Rgba([
        mix(color.r(), dst.0[0]),
        mix(color.g(), dst.0[1]),
        mix(color.b(), dst.0[2]),
        out_a as u8,
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_file() {
        let err = render_text(
            "TTF fonts are neat!",
            Path::new("no/such/font.ttf"),
            TextColor::WHITE,
            64.0,
        )
        .unwrap_err();
        assert!(matches!(err, Error::FontLoad { .. }), "{err:?}");
    }

    #[test]
    fn file_without_faces() {
        let path = std::env::temp_dir()
            .join(format!("tilecraft-not-a-font-{}.ttf", std::process::id()));
        std::fs::write(&path, b"definitely not a font").unwrap();
        let result = render_text("hi", &path, TextColor::WHITE, 12.0);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(Error::NoFontFace(_))), "{result:?}");
    }

    #[test]
    fn blend_onto_transparent_takes_source() {
        let mut image = RgbaImage::new(2, 2);
        blend(&mut image, 1, 0, Color::rgba(255, 255, 255, 128));
        assert_eq!(image.get_pixel(1, 0), &Rgba([255, 255, 255, 128]));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn blend_accumulates_coverage() {
        let mut image = RgbaImage::new(1, 1);
        blend(&mut image, 0, 0, Color::rgba(255, 255, 255, 128));
        blend(&mut image, 0, 0, Color::rgba(255, 255, 255, 128));
        let pixel = image.get_pixel(0, 0);
        assert_eq!(&pixel.0[..3], &[255, 255, 255]);
        assert_eq!(pixel.0[3], 191);
    }

    #[test]
    fn blend_ignores_out_of_bounds() {
        let mut image = RgbaImage::new(1, 1);
        blend(&mut image, -1, 0, Color::rgba(255, 0, 0, 255));
        blend(&mut image, 0, 1, Color::rgba(255, 0, 0, 255));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }
}
