use rayon::prelude::*;

/// Linear blend `a*(1-t) + b*t`, truncated toward zero like an integer cast.
pub(crate) fn lerp_trunc(a: u8, b: u8, t: f64) -> u8 {
    to_u8_trunc(f64::from(a) * (1.0 - t) + f64::from(b) * t)
}

pub(crate) fn to_u8_trunc(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Visit every row of an RGBA8 destination as `(y, row_bytes)`.
///
/// Rows are independent, so `parallel` only changes scheduling, never output.
pub(crate) fn for_each_row<F>(dst: &mut [u8], width: u32, parallel: bool, f: F)
where
    F: Fn(u32, &mut [u8]) + Send + Sync,
{
    let stride = (width as usize) * 4;
    if stride == 0 {
        return;
    }
    if parallel {
        dst.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y as u32, row));
    } else {
        dst.chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y as u32, row));
    }
}
