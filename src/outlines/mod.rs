//! Icon outline geometry
//!
//! Outlines come out of the SVG parser in image coordinates (y-down,
//! origin at the top left) and leave this module in font coordinates
//! (y-up, baseline at zero), normalized into a fixed em box so every
//! icon renders at the same optical size.

pub mod svg;

use kurbo::{Affine, BezPath};

/// Em size of the generated font; icons are scaled to fill it.
pub const UNITS_PER_EM: u16 = 512;
/// Ascent in font units; the full em sits above the baseline.
pub const ASCENT: i16 = 512;
/// Descent in font units.
pub const DESCENT: i16 = 0;
/// Fixed advance width shared by every glyph.
pub const ADVANCE_WIDTH: u16 = 512;

/// A parsed icon: merged outline plus the source image size
#[derive(Debug, Clone)]
pub struct IconOutline {
    pub path: BezPath,
    pub width: f64,
    pub height: f64,
}

/// An icon ready for the sheet builder and the font compiler
#[derive(Debug, Clone)]
pub struct GlyphEntry {
    pub name: String,
    pub codepoint: String,
    /// Outline in font units, already normalized into the em box
    pub path: BezPath,
}

/// Map an icon outline into the em box.
///
/// Scales so the icon's height fills the em, mirrors Y (images are
/// y-down, fonts are y-up), then centers horizontally within the fixed
/// advance and vertically between descent and ascent. Icons wider than
/// tall keep their aspect ratio and may overhang the advance on both
/// sides.
pub fn normalize_to_em(outline: &IconOutline) -> BezPath {
    let scale = f64::from(UNITS_PER_EM) / outline.height;
    let scaled_width = outline.width * scale;
    let scaled_height = outline.height * scale;
    let x_offset = (f64::from(ADVANCE_WIDTH) - scaled_width) / 2.0;
    let y_offset = f64::from(DESCENT) + (f64::from(ASCENT - DESCENT) - scaled_height) / 2.0;

    let mut path = outline.path.clone();
    path.apply_affine(
        Affine::translate((x_offset, y_offset))
            * Affine::scale(scale)
            * Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, outline.height]),
    );
    path
}
