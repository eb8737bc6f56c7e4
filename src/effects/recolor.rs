use crate::foundation::core::{Mode, Rgb8};
use crate::foundation::error::TeamColorResult;
use crate::foundation::math::{for_each_row, lerp_trunc, to_u8_trunc};
use crate::raster::buffer::{PixelBuffer, Resample};

/// Gradient-control samples brighter than this in red and green, and darker
/// than [`YELLOW_KEY_MAX_BLUE`] in blue, are excluded from recoloring in
/// [`Mode::Alternate`].
pub const YELLOW_KEY_MIN_RED_GREEN: u8 = 240;
/// Blue ceiling of the yellow key color.
pub const YELLOW_KEY_MAX_BLUE: u8 = 20;

/// Weight of the base channel in the per-channel modulation.
const MODULATE_WEIGHT: f64 = 0.75;
/// Floor kept by the modulation so dark base pixels still show the team color.
const MODULATE_FLOOR: f64 = 0.25;

/// Parameters for [`recolor`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecolorParams {
    /// Color selected where the gradient-control red channel is 0.
    pub endpoint_a: Rgb8,
    /// Color selected where the gradient-control red channel is 255.
    pub endpoint_b: Rgb8,
    pub mode: Mode,
    /// Split rows across the rayon pool. Output is identical either way.
    pub parallel: bool,
}

impl Default for RecolorParams {
    fn default() -> Self {
        Self {
            endpoint_a: Rgb8::new(220, 38, 127),
            endpoint_b: Rgb8::new(33, 150, 243),
            mode: Mode::Standard,
            parallel: false,
        }
    }
}

/// Whether a gradient-control sample is the yellow exclusion key.
pub fn is_yellow_key(rgba: [u8; 4]) -> bool {
    rgba[0] > YELLOW_KEY_MIN_RED_GREEN
        && rgba[1] > YELLOW_KEY_MIN_RED_GREEN
        && rgba[2] < YELLOW_KEY_MAX_BLUE
}

/// Recolor `base` with the team gradient.
///
/// `gradient` and `mask` are resampled to the base size when they differ.
/// Inputs are never modified; the returned buffer always has the base
/// dimensions and the base alpha channel.
#[tracing::instrument(skip(base, gradient, mask), fields(w = base.width(), h = base.height(), masked = mask.is_some()))]
pub fn recolor(
    base: &PixelBuffer,
    gradient: &PixelBuffer,
    mask: Option<&PixelBuffer>,
    params: &RecolorParams,
) -> TeamColorResult<PixelBuffer> {
    let (width, height) = base.dimensions();
    let gradient = gradient.aligned_to(width, height, Resample::Bilinear)?;
    let mask = mask
        .map(|m| m.aligned_to(width, height, Resample::Bilinear))
        .transpose()?;

    let stride = (width as usize) * 4;
    let base_bytes = base.as_bytes();
    let gradient_bytes = gradient.as_bytes();
    let mask_bytes = mask.as_deref().map(PixelBuffer::as_bytes);
    let params = *params;

    let mut out = PixelBuffer::new(width, height)?;
    for_each_row(out.as_bytes_mut(), width, params.parallel, |y, row| {
        let start = (y as usize) * stride;
        let base_row = &base_bytes[start..start + stride];
        let gradient_row = &gradient_bytes[start..start + stride];
        let mask_row = mask_bytes.map(|m| &m[start..start + stride]);

        for (i, dst) in row.chunks_exact_mut(4).enumerate() {
            let px = i * 4;
            let b = [
                base_row[px],
                base_row[px + 1],
                base_row[px + 2],
                base_row[px + 3],
            ];
            let g = [
                gradient_row[px],
                gradient_row[px + 1],
                gradient_row[px + 2],
                gradient_row[px + 3],
            ];
            let factor = mask_row.map_or(1.0, |m| f64::from(m[px + 3]) / 255.0);
            dst.copy_from_slice(&recolor_pixel(b, g, factor, &params));
        }
    });
    Ok(out)
}

/// Per-pixel recolor kernel.
///
/// `factor` is the mask strength in `[0, 1]`; the yellow key overrides it in
/// alternate mode.
pub fn recolor_pixel(base: [u8; 4], gradient: [u8; 4], factor: f64, params: &RecolorParams) -> [u8; 4] {
    let factor = if params.mode.is_alternate() && is_yellow_key(gradient) {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    };

    let t = f64::from(gradient[0]) / 255.0;
    let a = params.endpoint_a.channels();
    let b = params.endpoint_b.channels();

    let mut out = [0u8, 0, 0, base[3]];
    for c in 0..3 {
        let team = lerp_trunc(a[c], b[c], t);
        let modulation = f64::from(base[c]) / 255.0 * MODULATE_WEIGHT + MODULATE_FLOOR;
        let colored = to_u8_trunc(f64::from(team) * modulation);
        out[c] = to_u8_trunc(f64::from(base[c]) * (1.0 - factor) + f64::from(colored) * factor);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/recolor.rs"]
mod tests;
