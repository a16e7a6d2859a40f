//! Merged SVG font sheet
//!
//! Writes the legacy SVG font format: one `<font>` element with a
//! `<glyph>` per icon. The sheet is a debugging artifact more than a
//! shipping one (browsers dropped SVG font support years ago), but it
//! makes every outline and codepoint inspectable with a text editor.

use std::fmt::Write;

use anyhow::Result;

use crate::outlines::{GlyphEntry, ADVANCE_WIDTH, ASCENT, DESCENT, UNITS_PER_EM};

/// Render the full sheet document for a set of glyph entries.
///
/// Entries are emitted in the order given; outlines are expected to be
/// in font units already. The SVG font format shares the font's y-up
/// coordinate system, so no further flipping happens here.
pub fn build_svg_font(entries: &[GlyphEntry], family: &str) -> Result<String> {
    let mut doc = String::new();

    writeln!(doc, r#"<?xml version="1.0" standalone="no"?>"#)?;
    writeln!(
        doc,
        r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">"#
    )?;
    writeln!(doc, r#"<svg xmlns="http://www.w3.org/2000/svg">"#)?;
    writeln!(doc, "<defs>")?;
    writeln!(
        doc,
        r#"  <font id="{family}" horiz-adv-x="{ADVANCE_WIDTH}">"#
    )?;
    writeln!(
        doc,
        r#"    <font-face font-family="{family}" units-per-em="{UNITS_PER_EM}" ascent="{ASCENT}" descent="{DESCENT}"/>"#
    )?;
    writeln!(doc, r#"    <missing-glyph horiz-adv-x="{ADVANCE_WIDTH}"/>"#)?;

    for entry in entries {
        writeln!(
            doc,
            r#"    <glyph glyph-name="{}" unicode="&#x{};" horiz-adv-x="{ADVANCE_WIDTH}" d="{}"/>"#,
            entry.name,
            entry.codepoint,
            entry.path.to_svg(),
        )?;
    }

    writeln!(doc, "  </font>")?;
    writeln!(doc, "</defs>")?;
    writeln!(doc, "</svg>")?;

    Ok(doc)
}
