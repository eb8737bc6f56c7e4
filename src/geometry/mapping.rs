//! Conversion between an image's pixel space and an on-screen display space.
//!
//! A [`CoordinateMapping`] describes where an image sits when it is fitted,
//! aspect-preserved and centred, inside a container. Previews, eyedropper
//! picks and badge placement all go through it.

use crate::foundation::core::Point;

/// Container size used before the real display area has been measured.
pub const FALLBACK_CONTAINER: (f64, f64) = (200.0, 150.0);

/// Result of fitting an image into a container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoordinateMapping {
    /// Container the image was fitted into (after fallback substitution).
    pub container_w: f64,
    pub container_h: f64,
    /// Displayed image size, in whole display units.
    pub display_w: u32,
    pub display_h: u32,
    /// Display-space origin of the image inside the container.
    pub offset_x: f64,
    pub offset_y: f64,
    /// Source pixels per display unit.
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Integer rectangle in source pixel space. `x`/`y` may be negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Stateless fitter; see [`CoordinateMapper::fit`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CoordinateMapper;

impl CoordinateMapper {
    /// Fit an `image_w x image_h` image into a container, preserving aspect ratio.
    ///
    /// A container side of one unit or less is treated as unmeasured and
    /// replaced by [`FALLBACK_CONTAINER`].
    pub fn fit(image_w: u32, image_h: u32, container_w: f64, container_h: f64) -> CoordinateMapping {
        let container_w = if container_w.is_finite() && container_w > 1.0 {
            container_w
        } else {
            FALLBACK_CONTAINER.0
        };
        let container_h = if container_h.is_finite() && container_h > 1.0 {
            container_h
        } else {
            FALLBACK_CONTAINER.1
        };

        let image_w_f = f64::from(image_w.max(1));
        let image_h_f = f64::from(image_h.max(1));
        let image_aspect = image_w_f / image_h_f;
        let container_aspect = container_w / container_h;

        let (display_w, display_h) = if image_aspect > container_aspect {
            (container_w, container_w / image_aspect)
        } else {
            (container_h * image_aspect, container_h)
        };
        let display_w = (display_w as u32).max(1);
        let display_h = (display_h as u32).max(1);

        CoordinateMapping {
            container_w,
            container_h,
            display_w,
            display_h,
            offset_x: ((container_w - f64::from(display_w)) / 2.0).floor(),
            offset_y: ((container_h - f64::from(display_h)) / 2.0).floor(),
            scale_x: image_w_f / f64::from(display_w),
            scale_y: image_h_f / f64::from(display_h),
        }
    }
}

impl CoordinateMapping {
    pub fn display_to_source(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset_x) * self.scale_x,
            (p.y - self.offset_y) * self.scale_y,
        )
    }

    pub fn source_to_display(&self, p: Point) -> Point {
        Point::new(
            p.x / self.scale_x + self.offset_x,
            p.y / self.scale_y + self.offset_y,
        )
    }

    /// Whether a display point falls on the displayed image.
    pub fn contains_display(&self, p: Point) -> bool {
        let x = p.x - self.offset_x;
        let y = p.y - self.offset_y;
        x >= 0.0 && y >= 0.0 && x < f64::from(self.display_w) && y < f64::from(self.display_h)
    }

    /// Source pixel under a display point, or `None` when the point is off the image.
    pub fn display_to_source_pixel(&self, p: Point) -> Option<(u32, u32)> {
        if !self.contains_display(p) {
            return None;
        }
        let s = self.display_to_source(p);
        Some((s.x.max(0.0) as u32, s.y.max(0.0) as u32))
    }

    /// Map a display rectangle to integer source pixels, truncating toward zero.
    pub fn display_rect_to_source(&self, x: f64, y: f64, width: f64, height: f64) -> SourceRect {
        let origin = self.display_to_source(Point::new(x, y));
        SourceRect {
            x: origin.x.trunc() as i64,
            y: origin.y.trunc() as i64,
            width: (width * self.scale_x).trunc() as i64,
            height: (height * self.scale_y).trunc() as i64,
        }
    }

    /// Map a source rectangle into display units (`x, y, width, height`).
    pub fn source_rect_to_display(&self, r: SourceRect) -> (f64, f64, f64, f64) {
        let origin = self.source_to_display(Point::new(r.x as f64, r.y as f64));
        (
            origin.x,
            origin.y,
            r.width as f64 / self.scale_x,
            r.height as f64 / self.scale_y,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mapping.rs"]
mod tests;
