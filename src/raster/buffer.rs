use image::{RgbaImage, imageops::FilterType};

use crate::foundation::error::{TeamColorError, TeamColorResult};
use crate::geometry::mapping::{CoordinateMapper, CoordinateMapping};

/// Resampling quality used when normalizing buffer sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resample {
    Nearest,
    /// Simple bilinear resize; used to align gradient-control and mask textures.
    #[default]
    Bilinear,
    /// High-quality Lanczos (a=3); used for glow masks, badges and previews.
    Lanczos,
}

impl Resample {
    fn filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
            Self::Lanczos => FilterType::Lanczos3,
        }
    }
}

/// Owned, fully populated grid of straight (non-premultiplied) RGBA8 samples.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl PixelBuffer {
    /// Fully transparent buffer of the given size.
    pub fn new(width: u32, height: u32) -> TeamColorResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> TeamColorResult<Self> {
        let len = byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..(len / 4) {
            data.extend_from_slice(&rgba);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap row-major RGBA8 bytes. The length must be exactly `width*height*4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> TeamColorResult<Self> {
        let len = byte_len(width, height)?;
        if data.len() != len {
            return Err(TeamColorError::validation(format!(
                "rgba8 buffer for {width}x{height} must be {len} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_image(img: RgbaImage) -> TeamColorResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_rgba8(width, height, img.into_raw())
    }

    pub fn to_image(&self) -> RgbaImage {
        // Dimensions and length are validated at construction.
        RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Sample at `(x, y)`; `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Write a sample; out-of-range coordinates are ignored.
    pub fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Resample to exactly `width x height`. Returns a clone when sizes already match.
    pub fn resized(&self, width: u32, height: u32, filter: Resample) -> TeamColorResult<Self> {
        byte_len(width, height)?;
        if self.dimensions() == (width, height) {
            return Ok(self.clone());
        }
        let out = image::imageops::resize(&self.to_image(), width, height, filter.filter());
        Self::from_image(out)
    }

    /// Preview-sized copy for a `container_w x container_h` area, with the
    /// mapping that relates it back to this buffer.
    pub fn fit_thumbnail(
        &self,
        container_w: f64,
        container_h: f64,
    ) -> TeamColorResult<(CoordinateMapping, Self)> {
        let mapping = CoordinateMapper::fit(self.width, self.height, container_w, container_h);
        let thumb = self.resized(mapping.display_w, mapping.display_h, Resample::Lanczos)?;
        Ok((mapping, thumb))
    }

    /// Borrow `self` when it already matches `(width, height)`, otherwise resample.
    pub(crate) fn aligned_to(
        &self,
        width: u32,
        height: u32,
        filter: Resample,
    ) -> TeamColorResult<std::borrow::Cow<'_, Self>> {
        if self.dimensions() == (width, height) {
            return Ok(std::borrow::Cow::Borrowed(self));
        }
        tracing::debug!(
            from_w = self.width,
            from_h = self.height,
            to_w = width,
            to_h = height,
            ?filter,
            "resampling auxiliary buffer"
        );
        Ok(std::borrow::Cow::Owned(self.resized(width, height, filter)?))
    }

    /// Multiply every alpha sample by `opacity/255`, truncating.
    pub fn scale_alpha(&mut self, opacity: u8) {
        if opacity == u8::MAX {
            return;
        }
        let factor = f64::from(opacity) / 255.0;
        for px in self.data.chunks_exact_mut(4) {
            px[3] = (f64::from(px[3]) * factor) as u8;
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

fn byte_len(width: u32, height: u32) -> TeamColorResult<usize> {
    if width == 0 || height == 0 {
        return Err(TeamColorError::validation(format!(
            "pixel buffer dimensions must be positive, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| TeamColorError::validation("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
