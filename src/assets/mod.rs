//! Shell-side asset handling: image file IO and color presets.

pub mod io;
pub mod presets;
