//! Badge placement in display space.
//!
//! [`BadgePlacement`] owns the overlay rectangle, rotation and opacity, and a
//! small pointer-driven state machine:
//!
//! - a primary press inside the rectangle starts a drag,
//! - a secondary press near a corner starts an aspect-locked resize anchored
//!   at the opposite corner,
//! - a release ends either interaction.
//!
//! After every mutation the rectangle lies within the canvas and is at least
//! [`MIN_BADGE_SIZE`] units on both sides. Canvases too small for that are
//! rejected up front by [`BadgePlacement::new`].

use crate::foundation::core::Point;
use crate::foundation::error::{TeamColorError, TeamColorResult};
use crate::geometry::mapping::CoordinateMapping;
use crate::raster::buffer::{PixelBuffer, Resample};
use crate::raster::rotate::rotate_about_center;

/// Smallest badge side length, in display units.
pub const MIN_BADGE_SIZE: f64 = 50.0;
/// Distance from a corner within which a secondary press grabs its handle.
pub const HANDLE_TOLERANCE: f64 = 8.0;
/// Initial badge width as a fraction of the displayed image width.
pub const INITIAL_BADGE_FRACTION: f64 = 0.2;

/// Axis-aligned rectangle in display units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacementRect {
    pub fn contains(&self, p: Point) -> bool {
        self.x <= p.x && p.x <= self.x + self.width && self.y <= p.y && p.y <= self.y + self.height
    }

    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => Point::new(self.x, self.y),
            Corner::TopRight => Point::new(self.x + self.width, self.y),
            Corner::BottomLeft => Point::new(self.x, self.y + self.height),
            Corner::BottomRight => Point::new(self.x + self.width, self.y + self.height),
        }
    }
}

/// Resize handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }
}

/// Pointer button that started an interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Moves the badge.
    Primary,
    /// Resizes the badge from a corner handle.
    Secondary,
}

/// Current interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    Idle,
    Dragging,
    Resizing(Corner),
}

/// Overlay geometry, rotation and opacity plus the interaction state.
#[derive(Clone, Debug, PartialEq)]
pub struct BadgePlacement {
    rect: PlacementRect,
    rotation_deg: f64,
    opacity: u8,
    canvas_w: f64,
    canvas_h: f64,
    /// Badge width / height.
    aspect: f64,
    interaction: Interaction,
    last_pointer: Point,
}

impl BadgePlacement {
    /// Start a placement centred on the displayed image described by `mapping`.
    ///
    /// The canvas is the whole container of `mapping`; `badge_w`/`badge_h` fix
    /// the aspect ratio kept by every resize.
    ///
    /// Fails with a validation error when the canvas cannot hold the badge at
    /// [`MIN_BADGE_SIZE`] on both sides.
    pub fn new(mapping: &CoordinateMapping, badge_w: u32, badge_h: u32) -> TeamColorResult<Self> {
        if badge_w == 0 || badge_h == 0 {
            return Err(TeamColorError::validation(format!(
                "badge dimensions must be positive, got {badge_w}x{badge_h}"
            )));
        }
        let aspect = f64::from(badge_w) / f64::from(badge_h);
        let min_w = MIN_BADGE_SIZE.max(MIN_BADGE_SIZE * aspect);
        let min_h = min_w / aspect;
        if min_w > mapping.container_w || min_h > mapping.container_h {
            return Err(TeamColorError::validation(format!(
                "a {badge_w}x{badge_h} badge needs at least {min_w}x{min_h} display units, canvas is {}x{}",
                mapping.container_w, mapping.container_h
            )));
        }
        let display_w = f64::from(mapping.display_w);
        let display_h = f64::from(mapping.display_h);

        let max_w = mapping.container_w.min(mapping.container_h * aspect);
        let width = (display_w * INITIAL_BADGE_FRACTION).clamp(min_w, max_w);
        let height = width / aspect;
        let mut placement = Self {
            rect: PlacementRect {
                x: mapping.offset_x + (display_w - width) / 2.0,
                y: mapping.offset_y + (display_h - height) / 2.0,
                width,
                height,
            },
            rotation_deg: 0.0,
            opacity: u8::MAX,
            canvas_w: mapping.container_w,
            canvas_h: mapping.container_h,
            aspect,
            interaction: Interaction::Idle,
            last_pointer: Point::ZERO,
        };
        placement.clamp_position();
        Ok(placement)
    }

    pub fn rect(&self) -> PlacementRect {
        self.rect
    }

    pub fn rotation(&self) -> f64 {
        self.rotation_deg
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_w, self.canvas_h)
    }

    /// Rotation in degrees, wrapped into `[0, 360)`.
    pub fn set_rotation(&mut self, degrees: f64) {
        let wrapped = degrees.rem_euclid(360.0);
        self.rotation_deg = if wrapped.is_finite() { wrapped } else { 0.0 };
    }

    pub fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity;
    }

    /// Place the badge directly, e.g. from saved or typed-in values.
    ///
    /// `width` is clamped to what the canvas can hold (and to the minimum
    /// size), the height follows the badge aspect ratio, then the position is
    /// clamped like a drag.
    pub fn set_geometry(&mut self, x: f64, y: f64, width: f64) {
        let min_w = MIN_BADGE_SIZE.max(MIN_BADGE_SIZE * self.aspect);
        let max_w = self.canvas_w.min(self.canvas_h * self.aspect);
        let width = if width.is_finite() { width } else { min_w };
        self.rect.width = width.clamp(min_w, max_w);
        self.rect.height = self.rect.width / self.aspect;
        self.rect.x = if x.is_finite() { x } else { 0.0 };
        self.rect.y = if y.is_finite() { y } else { 0.0 };
        self.clamp_position();
    }

    /// Handle a press. Returns the interaction that is now active.
    ///
    /// Presses that hit nothing leave the placement idle.
    pub fn press(&mut self, button: PointerButton, at: Point) -> Interaction {
        self.interaction = match button {
            PointerButton::Primary if self.rect.contains(at) => Interaction::Dragging,
            PointerButton::Primary => Interaction::Idle,
            PointerButton::Secondary => self
                .corner_at(at)
                .map_or(Interaction::Idle, Interaction::Resizing),
        };
        self.last_pointer = at;
        self.interaction
    }

    /// Handle a pointer move. Returns `true` when the rectangle changed.
    pub fn move_to(&mut self, at: Point) -> bool {
        let dx = at.x - self.last_pointer.x;
        let dy = at.y - self.last_pointer.y;
        self.last_pointer = at;
        let before = self.rect;
        match self.interaction {
            Interaction::Idle => return false,
            Interaction::Dragging => {
                self.rect.x += dx;
                self.rect.y += dy;
                self.clamp_position();
            }
            Interaction::Resizing(corner) => self.resize_from(corner, dx),
        }
        self.rect != before
    }

    /// End the current interaction.
    pub fn release(&mut self) {
        self.interaction = Interaction::Idle;
    }

    /// Corner whose handle lies within [`HANDLE_TOLERANCE`] of `p`.
    pub fn corner_at(&self, p: Point) -> Option<Corner> {
        Corner::ALL.into_iter().find(|&c| {
            let cp = self.rect.corner(c);
            (p.x - cp.x).abs() < HANDLE_TOLERANCE && (p.y - cp.y).abs() < HANDLE_TOLERANCE
        })
    }

    /// Handle squares centred on each corner, as `(corner, rect)`.
    pub fn handle_rects(&self) -> [(Corner, PlacementRect); 4] {
        let half = HANDLE_TOLERANCE / 2.0;
        Corner::ALL.map(|c| {
            let p = self.rect.corner(c);
            (
                c,
                PlacementRect {
                    x: p.x - half,
                    y: p.y - half,
                    width: HANDLE_TOLERANCE,
                    height: HANDLE_TOLERANCE,
                },
            )
        })
    }

    /// Rotated, display-sized, opacity-scaled badge as drawn by a preview.
    pub fn preview_badge(&self, badge: &PixelBuffer) -> TeamColorResult<PixelBuffer> {
        let w = (self.rect.width as u32).max(1);
        let h = (self.rect.height as u32).max(1);
        let mut out = rotate_about_center(badge, self.rotation_deg).resized(w, h, Resample::Lanczos)?;
        out.scale_alpha(self.opacity);
        Ok(out)
    }

    fn resize_from(&mut self, corner: Corner, dx: f64) {
        let PlacementRect {
            x,
            y,
            width,
            height,
        } = self.rect;
        let proposed = if corner.is_left() { width - dx } else { width + dx };

        // Room on the growing sides, expressed as a width limit.
        let max_w_horizontal = if corner.is_left() {
            x + width
        } else {
            self.canvas_w - x
        };
        let max_h = if corner.is_top() {
            y + height
        } else {
            self.canvas_h - y
        };
        let max_w = max_w_horizontal.min(max_h * self.aspect);
        let min_w = MIN_BADGE_SIZE.max(MIN_BADGE_SIZE * self.aspect);
        if max_w < min_w {
            return;
        }

        let new_w = proposed.clamp(min_w, max_w);
        let new_h = new_w / self.aspect;
        if corner.is_left() {
            self.rect.x = x + width - new_w;
        }
        if corner.is_top() {
            self.rect.y = y + height - new_h;
        }
        self.rect.width = new_w;
        self.rect.height = new_h;
    }

    fn clamp_position(&mut self) {
        let max_x = (self.canvas_w - self.rect.width).max(0.0);
        let max_y = (self.canvas_h - self.rect.height).max(0.0);
        self.rect.x = self.rect.x.clamp(0.0, max_x);
        self.rect.y = self.rect.y.clamp(0.0, max_y);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/state.rs"]
mod tests;
