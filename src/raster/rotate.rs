//! Rotation about the buffer centre with the canvas size preserved.

use crate::foundation::core::{Affine, Point, Vec2};
use crate::raster::buffer::PixelBuffer;

/// Rotate `src` counter-clockwise (as seen on screen) by `degrees`.
///
/// Nearest-neighbour sampling; pixels that map outside the source become
/// transparent and corners that leave the canvas are clipped.
pub fn rotate_about_center(src: &PixelBuffer, degrees: f64) -> PixelBuffer {
    let degrees = degrees.rem_euclid(360.0);
    if degrees == 0.0 {
        return src.clone();
    }

    let (w, h) = src.dimensions();
    let center = Vec2::new(f64::from(w) * 0.5, f64::from(h) * 0.5);
    // y points down, so a visual counter-clockwise turn is a negative angle.
    let forward = Affine::translate(center)
        * Affine::rotate(-degrees.to_radians())
        * Affine::translate(-center);
    let inverse = forward.inverse();

    let mut out = src.clone();
    for y in 0..h {
        for x in 0..w {
            let p = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let sx = p.x.floor();
            let sy = p.y.floor();
            let sample = if sx >= 0.0 && sy >= 0.0 {
                src.get(sx as u32, sy as u32)
            } else {
                None
            };
            out.put(x, y, sample.unwrap_or([0, 0, 0, 0]));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/rotate.rs"]
mod tests;
