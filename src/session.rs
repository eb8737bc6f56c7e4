//! Explicit owner of the loaded assets, colors, outputs and badge placement.
//!
//! A [`Session`] is what a shell drives: it loads assets into named slots,
//! runs the recolor (and, in alternate mode, glow) pass, and hosts a single
//! badge placement between `begin_badge_placement` and `commit_badge` /
//! `cancel_badge`.

use std::collections::HashMap;

use crate::assets::presets::PresetBook;
use crate::effects::badge::{self, CommitOutcome};
use crate::effects::glow::extract_glow;
use crate::effects::recolor::{RecolorParams, recolor};
use crate::foundation::core::{AssetCategory, Mode, Point, Rgb8, TeamSlot};
use crate::foundation::error::{TeamColorError, TeamColorResult};
use crate::geometry::mapping::{CoordinateMapper, CoordinateMapping};
use crate::placement::state::BadgePlacement;
use crate::raster::buffer::PixelBuffer;

#[derive(Debug)]
struct ActivePlacement {
    placement: BadgePlacement,
    mapping: CoordinateMapping,
}

/// Session state; see the module docs.
#[derive(Debug)]
pub struct Session {
    assets: HashMap<AssetCategory, PixelBuffer>,
    mode: Mode,
    endpoint_a: Rgb8,
    endpoint_b: Rgb8,
    /// Eyedropper picks, kept for display.
    primary_team: Rgb8,
    secondary_team: Rgb8,
    parallel: bool,
    output: Option<PixelBuffer>,
    glow_output: Option<PixelBuffer>,
    placement: Option<ActivePlacement>,
}

impl Default for Session {
    fn default() -> Self {
        let defaults = RecolorParams::default();
        Self {
            assets: HashMap::new(),
            mode: Mode::default(),
            endpoint_a: defaults.endpoint_a,
            endpoint_b: defaults.endpoint_b,
            primary_team: Rgb8::new(255, 0, 0),
            secondary_team: Rgb8::new(0, 0, 255),
            parallel: defaults.parallel,
            output: None,
            glow_output: None,
            placement: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `buf` under `category`, replacing any earlier asset.
    ///
    /// Replacing the badge closes an open placement, which was sized for the
    /// previous badge.
    pub fn load(&mut self, category: AssetCategory, buf: PixelBuffer) {
        tracing::debug!(asset = category.label(), w = buf.width(), h = buf.height(), "asset set");
        self.drop_placement_for(category);
        self.assets.insert(category, buf);
    }

    /// Remove an asset. Removing the badge closes an open placement.
    pub fn unload(&mut self, category: AssetCategory) -> Option<PixelBuffer> {
        self.drop_placement_for(category);
        self.assets.remove(&category)
    }

    pub fn asset(&self, category: AssetCategory) -> Option<&PixelBuffer> {
        self.assets.get(&category)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn endpoints(&self) -> (Rgb8, Rgb8) {
        (self.endpoint_a, self.endpoint_b)
    }

    pub fn set_endpoints(&mut self, a: Rgb8, b: Rgb8) {
        self.endpoint_a = a;
        self.endpoint_b = b;
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Team colors picked from the gradient-control texture. Display-only:
    /// no compositing pass reads them.
    pub fn team_colors(&self) -> (Rgb8, Rgb8) {
        (self.primary_team, self.secondary_team)
    }

    /// Set the endpoint colors from a named preset.
    pub fn apply_preset(&mut self, book: &PresetBook, name: &str) -> TeamColorResult<()> {
        let pair = book
            .resolve(name)
            .ok_or_else(|| TeamColorError::validation(format!("preset '{name}' not found")))?;
        self.set_endpoints(pair.primary, pair.secondary);
        Ok(())
    }

    /// Eyedropper on a preview of the gradient-control texture.
    ///
    /// `mapping` must describe how that texture is displayed. Returns the
    /// picked color, or `None` when the point is off the image or no
    /// gradient-control texture is loaded.
    pub fn pick_team_color(
        &mut self,
        slot: TeamSlot,
        at: Point,
        mapping: &CoordinateMapping,
    ) -> Option<Rgb8> {
        let gradient = self.assets.get(&AssetCategory::GradientControl)?;
        let (x, y) = mapping.display_to_source_pixel(at)?;
        let [r, g, b, _] = gradient.get(
            x.min(gradient.width() - 1),
            y.min(gradient.height() - 1),
        )?;
        let color = Rgb8::new(r, g, b);
        match slot {
            TeamSlot::Primary => self.primary_team = color,
            TeamSlot::Secondary => self.secondary_team = color,
        }
        Some(color)
    }

    pub fn recolor_params(&self) -> RecolorParams {
        RecolorParams {
            endpoint_a: self.endpoint_a,
            endpoint_b: self.endpoint_b,
            mode: self.mode,
            parallel: self.parallel,
        }
    }

    /// Run the recolor pass and, in alternate mode with a glow-control
    /// texture loaded, the glow pass.
    ///
    /// Replaces any previous outputs and drops an in-progress placement.
    #[tracing::instrument(skip(self), fields(mode = ?self.mode))]
    pub fn apply_team_color(&mut self) -> TeamColorResult<&PixelBuffer> {
        let base = self.require(AssetCategory::Base)?;
        let gradient = self.require(AssetCategory::GradientControl)?;
        let mask = self.assets.get(&AssetCategory::Mask);

        let output = recolor(base, gradient, mask, &self.recolor_params())?;
        let glow = match (self.mode, self.assets.get(&AssetCategory::GlowControl)) {
            (Mode::Alternate, Some(control)) => Some(extract_glow(control, &output)?),
            _ => None,
        };

        self.glow_output = glow;
        self.placement = None;
        Ok(self.output.insert(output))
    }

    pub fn output(&self) -> Option<&PixelBuffer> {
        self.output.as_ref()
    }

    pub fn glow_output(&self) -> Option<&PixelBuffer> {
        self.glow_output.as_ref()
    }

    /// Open a badge placement over the output displayed in a
    /// `container_w x container_h` area.
    pub fn begin_badge_placement(
        &mut self,
        container_w: f64,
        container_h: f64,
    ) -> TeamColorResult<&mut BadgePlacement> {
        let badge = self.require(AssetCategory::Badge)?;
        let output = self
            .output
            .as_ref()
            .ok_or_else(|| TeamColorError::input_missing("recolored output"))?;

        let mapping = CoordinateMapper::fit(output.width(), output.height(), container_w, container_h);
        let placement = BadgePlacement::new(&mapping, badge.width(), badge.height())?;
        let active = self.placement.insert(ActivePlacement { placement, mapping });
        Ok(&mut active.placement)
    }

    pub fn placement(&self) -> Option<&BadgePlacement> {
        self.placement.as_ref().map(|a| &a.placement)
    }

    pub fn placement_mut(&mut self) -> Option<&mut BadgePlacement> {
        self.placement.as_mut().map(|a| &mut a.placement)
    }

    /// Mapping used by the open placement.
    pub fn placement_mapping(&self) -> Option<&CoordinateMapping> {
        self.placement.as_ref().map(|a| &a.mapping)
    }

    /// Composite the open placement into the output and close it.
    ///
    /// The output is modified in place. A degenerate mapped size closes the
    /// placement without touching the output. On error the placement stays open.
    pub fn commit_badge(&mut self) -> TeamColorResult<CommitOutcome> {
        let active = self
            .placement
            .as_ref()
            .ok_or_else(|| TeamColorError::input_missing("badge placement"))?;
        let badge = self
            .assets
            .get(&AssetCategory::Badge)
            .ok_or_else(|| TeamColorError::input_missing(AssetCategory::Badge.label()))?;
        let output = self
            .output
            .as_mut()
            .ok_or_else(|| TeamColorError::input_missing("recolored output"))?;
        let outcome = badge::commit_badge(&active.placement, badge, &active.mapping, output)?;
        self.placement = None;
        Ok(outcome)
    }

    /// Discard the open placement, if any.
    pub fn cancel_badge(&mut self) {
        self.placement = None;
    }

    fn drop_placement_for(&mut self, category: AssetCategory) {
        if category == AssetCategory::Badge && self.placement.take().is_some() {
            tracing::debug!("badge asset changed; placement closed");
        }
    }

    fn require(&self, category: AssetCategory) -> TeamColorResult<&PixelBuffer> {
        self.assets
            .get(&category)
            .ok_or_else(|| TeamColorError::input_missing(category.label()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
