use crate::foundation::error::TeamColorResult;
use crate::geometry::mapping::{CoordinateMapping, SourceRect};
use crate::placement::state::BadgePlacement;
use crate::raster::buffer::{PixelBuffer, Resample};
use crate::raster::rotate::rotate_about_center;

/// Mapped badges narrower or shorter than this many source pixels are not applied.
pub const MIN_COMMIT_PIXELS: i64 = 10;

/// What [`commit_badge`] did to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The badge was composited over this source rectangle (before clipping).
    Applied(SourceRect),
    /// The mapped rectangle was below [`MIN_COMMIT_PIXELS`]; the target is untouched.
    Skipped(SourceRect),
}

/// Straight-alpha source-over of one RGBA8 sample.
pub fn over_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == u8::MAX {
        return src;
    }

    let sa = f32::from(src[3]) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (f32::from(src[i]) * sa + f32::from(dst[i]) * da * (1.0 - sa)) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

/// Composite `badge` onto `target` at the source-space position of `placement`.
///
/// This mutates `target` in place; callers sharing the buffer must hold it
/// exclusively for the duration of the call. Degenerate mapped sizes are a
/// silent [`CommitOutcome::Skipped`].
#[tracing::instrument(skip(placement, badge, mapping, target), fields(rotation = placement.rotation(), opacity = placement.opacity()))]
pub fn commit_badge(
    placement: &BadgePlacement,
    badge: &PixelBuffer,
    mapping: &CoordinateMapping,
    target: &mut PixelBuffer,
) -> TeamColorResult<CommitOutcome> {
    let r = placement.rect();
    let src_rect = mapping.display_rect_to_source(r.x, r.y, r.width, r.height);
    if src_rect.width < MIN_COMMIT_PIXELS || src_rect.height < MIN_COMMIT_PIXELS {
        tracing::debug!(?src_rect, "badge too small in source space; skipping commit");
        return Ok(CommitOutcome::Skipped(src_rect));
    }

    let mut prepared = rotate_about_center(badge, placement.rotation()).resized(
        src_rect.width as u32,
        src_rect.height as u32,
        Resample::Lanczos,
    )?;
    prepared.scale_alpha(placement.opacity());

    paste_over(target, &prepared, src_rect.x, src_rect.y);
    tracing::debug!(?src_rect, "badge committed");
    Ok(CommitOutcome::Applied(src_rect))
}

/// Source-over `src` onto `dst` with its top-left at `(x, y)`, clipped to `dst`.
pub fn paste_over(dst: &mut PixelBuffer, src: &PixelBuffer, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for ty in y0..y1 {
        for tx in x0..x1 {
            let (tx_u, ty_u) = (tx as u32, ty as u32);
            let (Some(s), Some(d)) = (src.get((tx - x) as u32, (ty - y) as u32), dst.get(tx_u, ty_u))
            else {
                continue;
            };
            dst.put(tx_u, ty_u, over_straight(d, s));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/badge.rs"]
mod tests;
