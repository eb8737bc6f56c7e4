use crate::foundation::error::TeamColorResult;
use crate::raster::buffer::{PixelBuffer, Resample};

/// Glow-control green values above this mark emissive pixels.
pub const GLOW_THRESHOLD: u8 = 128;

/// Derive the emissive mask from a recolored output.
///
/// Pixels whose glow-control green channel exceeds [`GLOW_THRESHOLD`] copy the
/// primary output's RGB with full opacity; every other pixel is `(0,0,0,0)`.
/// The glow-control texture is Lanczos-resampled to the output size first.
#[tracing::instrument(skip(glow_control, primary), fields(w = primary.width(), h = primary.height()))]
pub fn extract_glow(glow_control: &PixelBuffer, primary: &PixelBuffer) -> TeamColorResult<PixelBuffer> {
    let (width, height) = primary.dimensions();
    let glow_control = glow_control.aligned_to(width, height, Resample::Lanczos)?;

    let mut out = PixelBuffer::new(width, height)?;
    for ((dst, g), p) in out
        .as_bytes_mut()
        .chunks_exact_mut(4)
        .zip(glow_control.as_bytes().chunks_exact(4))
        .zip(primary.as_bytes().chunks_exact(4))
    {
        if g[1] > GLOW_THRESHOLD {
            dst.copy_from_slice(&[p[0], p[1], p[2], u8::MAX]);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/glow.rs"]
mod tests;
