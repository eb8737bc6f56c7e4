use crate::foundation::error::{TeamColorError, TeamColorResult};

pub use kurbo::{Affine, Point, Vec2};

/// Straight 8-bit RGB color, no alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse `#rrggbb`, `rrggbb` or the short `#rgb` form.
    pub fn from_hex(s: &str) -> TeamColorResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> TeamColorResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| TeamColorError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        match s.len() {
            6 if s.is_ascii() => Ok(Self::new(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            3 if s.is_ascii() => {
                let expanded: String = s.chars().flat_map(|c| [c, c]).collect();
                Self::from_hex(&expanded)
            }
            _ => Err(TeamColorError::validation(
                "hex color must be #RRGGBB or #RGB (case-insensitive)",
            )),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Rgb8 {
    type Err = TeamColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Which art pipeline the textures come from.
///
/// `Alternate` enables the yellow-key exclusion during recoloring, the glow
/// channel, and the two team-color eyedropper workflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Mode {
    #[default]
    Standard,
    Alternate,
}

impl Mode {
    pub fn is_alternate(self) -> bool {
        matches!(self, Self::Alternate)
    }
}

/// Slot a loaded asset is stored under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AssetCategory {
    Base,
    GradientControl,
    Mask,
    GlowControl,
    Badge,
}

impl AssetCategory {
    pub const ALL: [Self; 5] = [
        Self::Base,
        Self::GradientControl,
        Self::Mask,
        Self::GlowControl,
        Self::Badge,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Base => "base texture",
            Self::GradientControl => "gradient-control texture",
            Self::Mask => "mask texture",
            Self::GlowControl => "glow-control texture",
            Self::Badge => "badge image",
        }
    }
}

/// Target of an eyedropper pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeamSlot {
    Primary,
    Secondary,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
