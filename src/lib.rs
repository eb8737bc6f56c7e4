//! Teamcolor recolors game textures with a two-color team gradient, derives
//! an emissive glow layer, and composites user-placed badges onto the result.
//!
//! # Pipeline overview
//!
//! 1. **Load**: the shell decodes assets into straight RGBA8 [`PixelBuffer`]s
//!    ([`load_image`]) and stores them in a [`Session`] under an [`AssetCategory`].
//! 2. **Recolor**: base + gradient-control (+ optional mask) + two endpoint
//!    colors → primary output ([`recolor`]).
//! 3. **Glow** (alternate mode only): glow-control + primary output → emissive
//!    mask ([`extract_glow`]).
//! 4. **Badge**: a [`BadgePlacement`] is moved and resized in display space and
//!    committed into the primary output through a [`CoordinateMapping`]
//!    ([`commit_badge`]).
//!
//! All compositing is synchronous, CPU-only and deterministic. Inputs are never
//! modified, except that a badge commit writes into the primary output in place.
#![forbid(unsafe_code)]

mod assets;
mod effects;
mod foundation;
mod geometry;
mod placement;
mod raster;
mod session;

pub use assets::io::{decode_image, glow_output_path, load_image, save_image};
pub use assets::presets::{DEFAULT_PRESET_FILES, PresetBook, PresetPair, normalize_hex};
pub use effects::badge::{CommitOutcome, MIN_COMMIT_PIXELS, commit_badge, over_straight, paste_over};
pub use effects::glow::{GLOW_THRESHOLD, extract_glow};
pub use effects::recolor::{
    RecolorParams, YELLOW_KEY_MAX_BLUE, YELLOW_KEY_MIN_RED_GREEN, is_yellow_key, recolor,
    recolor_pixel,
};
pub use foundation::core::{Affine, AssetCategory, Mode, Point, Rgb8, TeamSlot, Vec2};
pub use foundation::error::{TeamColorError, TeamColorResult};
pub use geometry::mapping::{CoordinateMapper, CoordinateMapping, FALLBACK_CONTAINER, SourceRect};
pub use placement::state::{
    BadgePlacement, Corner, HANDLE_TOLERANCE, INITIAL_BADGE_FRACTION, Interaction, MIN_BADGE_SIZE,
    PlacementRect, PointerButton,
};
pub use raster::buffer::{PixelBuffer, Resample};
pub use raster::rotate::rotate_about_center;
pub use session::Session;
