//! "Texture" is the OpenGL term for an image passed to the graphics pipeline. In the fragment
//! shader a texture can be sampled and its pixel data applied to the fragments being drawn.
//!
//! Decoding is left to the `image` crate. Whatever the file holds, it's normalized to tightly
//! packed 8-bit RGB, which is the only format [`Texture::upload`] sends to the GPU.

use std::path::{Path, PathBuf};

use log::debug;

use crate::device::{Device, Handle};
use crate::error::TextureError;

/// Decoded pixels waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureImage {
    pub const CHANNELS: usize = 3;

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(source) => TextureError::Io { path: PathBuf::from(path), source },
            source => TextureError::Decode { path: PathBuf::from(path), source }
        })?;

        let rgb = decoded.into_rgb8();
        let (width, height) = rgb.dimensions();
        debug!("Decoded {} ({}x{})", path.display(), width, height);

        Ok(Self { width, height, pixels: rgb.into_raw() })
    }

    /// Wraps pixels that are already RGB, row by row.
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * Self::CHANNELS;
        if pixels.len() != expected {
            return Err(TextureError::Dimensions { width, height, len: pixels.len() });
        }

        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 { self.width }

    pub fn height(&self) -> u32 { self.height }

    pub fn channels(&self) -> usize { Self::CHANNELS }

    pub fn pixels(&self) -> &[u8] { &self.pixels }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    Repeat,
    MirroredRepeat,
    ClampToEdge
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear
}

impl TextureFilter {
    pub fn uses_mipmaps(self) -> bool {
        match self {
            TextureFilter::Nearest | TextureFilter::Linear => false,
            _ => true
        }
    }
}

/// How a texture is sampled. The default repeats on both axes, blends between mipmap levels
/// when shrinking and filters linearly when stretching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureParams {
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            wrap_s: TextureWrap::Repeat,
            wrap_t: TextureWrap::Repeat,
            min_filter: TextureFilter::LinearMipmapLinear,
            mag_filter: TextureFilter::Linear
        }
    }
}

#[derive(Debug)]
pub struct Texture {
    id: Handle,
    width: u32,
    height: u32,
    params: TextureParams,
}

impl Texture {
    /// Creates a 2D texture from `image`. The CPU copy of the pixels is dropped once it's on the
    /// GPU.
    pub fn upload<D: Device>(device: &mut D, image: TextureImage, params: TextureParams) -> Self {
        let id = device.create_texture();
        device.bind_texture(Some(id));
        device.texture_parameters(&params);
        device.texture_image_rgb(image.width, image.height, &image.pixels);

        if params.min_filter.uses_mipmaps() {
            device.generate_mipmap();
        }

        Self {
            id,
            width: image.width,
            height: image.height,
            params
        }
    }

    pub fn id(&self) -> Handle { self.id }

    pub fn size(&self) -> (u32, u32) { (self.width, self.height) }

    pub fn params(&self) -> TextureParams { self.params }

    pub fn bind<D: Device>(&self, device: &mut D) {
        device.bind_texture(Some(self.id));
    }

    pub fn delete<D: Device>(self, device: &mut D) {
        device.delete_texture(self.id);
    }
}
