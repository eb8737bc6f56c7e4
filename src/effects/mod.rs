//! Pixel passes: team-color recolor, glow extraction and badge compositing.

pub mod badge;
pub mod glow;
pub mod recolor;
