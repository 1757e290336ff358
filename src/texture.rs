use std::collections::HashMap;
use std::path::PathBuf;

use image::RgbaImage;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::types::Dimension;

pub type TextureId = u16;

/// Where a texture's pixels come from.
#[derive(Clone, Debug)]
pub enum TextureSource {
    /// Image file decoded when the GPU is ready.
    File(PathBuf),
    /// Pixels produced on the CPU, e.g. rasterized text.
    Image(RgbaImage),
}

impl TextureSource {
    fn decode(&self) -> Result<RgbaImage> {
        match self {
            TextureSource::File(path) => {
                let image = image::open(path).map_err(|source| Error::ImageLoad {
                    path: path.clone(),
                    source,
                })?;
                Ok(image.to_rgba8())
            }
            TextureSource::Image(image) => Ok(image.clone()),
        }
    }
}

/// Textures requested before the window exists. Ids are handed out in order.
#[derive(Default, Debug)]
pub struct TextureSources {
    last_id: TextureId,
    sources: Vec<(TextureId, TextureSource)>,
}

impl TextureSources {
    pub fn add(&mut self, source: TextureSource) -> TextureId {
        let id = self.last_id;
        self.last_id += 1;
        self.sources.push((id, source));
        id
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> TextureId {
        self.add(TextureSource::File(path.into()))
    }

    pub fn add_image(&mut self, image: RgbaImage) -> TextureId {
        self.add(TextureSource::Image(image))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(TextureId, TextureSource)> {
        self.sources.iter()
    }
}

/// Pixel size of every loaded texture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextureSizes {
    sizes: HashMap<TextureId, Dimension>,
}

impl TextureSizes {
    pub fn insert(&mut self, id: TextureId, size: Dimension) {
        self.sizes.insert(id, size);
    }

    pub fn query(&self, id: TextureId) -> Option<Dimension> {
        self.sizes.get(&id).copied()
    }
}

impl FromIterator<(TextureId, Dimension)> for TextureSizes {
    fn from_iter<I: IntoIterator<Item = (TextureId, Dimension)>>(iter: I) -> Self {
        Self {
            sizes: iter.into_iter().collect(),
        }
    }
}

pub(crate) struct TextureManager {
    textures: HashMap<TextureId, Texture>,
    sizes: TextureSizes,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl TextureManager {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        Self {
            textures: HashMap::new(),
            sizes: TextureSizes::default(),
            bind_group_layout,
        }
    }

    /// Decodes and uploads every source. Stops at the first one that fails;
    /// textures uploaded so far are released with the manager.
    pub fn load(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sources: &TextureSources,
    ) -> Result<()> {
        for (texture_id, source) in sources.iter() {
            let image = source.decode()?;
            let texture = Texture::from_image(device, queue, &image, &self.bind_group_layout);
            match source {
                TextureSource::File(path) => info!(
                    "loaded texture {texture_id} from {} ({}x{})",
                    path.display(),
                    texture.size.width,
                    texture.size.height
                ),
                TextureSource::Image(_) => debug!(
                    "uploaded texture {texture_id} ({}x{})",
                    texture.size.width, texture.size.height
                ),
            }
            self.sizes.insert(*texture_id, texture.size);
            self.textures.insert(*texture_id, texture);
        }
        Ok(())
    }

    pub fn get_texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(&id)
    }

    pub fn sizes(&self) -> &TextureSizes {
        &self.sizes
    }
}

pub(crate) struct Texture {
    pub bind_group: wgpu::BindGroup,
    pub size: Dimension,
}

impl Texture {
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let dimensions = image.dimensions();
        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: None,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Nearest keeps sprite-sheet clips from bleeding into their neighbours.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: None,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout: bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            bind_group,
            size: Dimension::new(dimensions.0 as i32, dimensions.1 as i32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential() {
        let mut sources = TextureSources::default();
        let background = sources.add_file("res/Lesson2/background.bmp");
        let image = sources.add_image(RgbaImage::new(4, 2));
        assert_eq!((background, image), (0, 1));
        assert_eq!(sources.len(), 2);
        assert!(matches!(sources.iter().nth(1), Some((1, TextureSource::Image(_)))));
    }

    #[test]
    fn missing_file_reports_path() {
        let source = TextureSource::File(PathBuf::from("does/not/exist.png"));
        match source.decode() {
            Err(Error::ImageLoad { path, .. }) => {
                assert_eq!(path, PathBuf::from("does/not/exist.png"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn in_memory_image_decodes_as_is() {
        let image = RgbaImage::from_pixel(3, 5, image::Rgba([255, 0, 0, 255]));
        let decoded = TextureSource::Image(image.clone()).decode().unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn sizes_query() {
        let sizes: TextureSizes = [(0, Dimension::new(400, 200))].into_iter().collect();
        assert_eq!(sizes.query(0), Some(Dimension::new(400, 200)));
        assert_eq!(sizes.query(1), None);
    }
}
