//! Static TTF assembly
//!
//! Builds the full table set for an icon font: glyf/loca outlines,
//! cmap from the private-use codepoints, hmtx with the fixed advance,
//! post v2 carrying the icon names, plus head, hhea, maxp, OS/2 and
//! name. Everything is computed from the glyph entries in one pass.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use kurbo::{BezPath, CubicBez, PathEl, Point};
use write_fonts::{
    tables::{
        cmap::Cmap,
        glyf::{Bbox, GlyfLocaBuilder, Glyph, SimpleGlyph},
        head::{Flags, Head},
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        loca::LocaFormat,
        maxp::Maxp,
        name::{Name, NameRecord},
        os2::{Os2, SelectionFlags},
        post::Post,
    },
    types::{FWord, Fixed, GlyphId, LongDateTime, NameId, UfWord},
    FontBuilder,
};

use crate::codepoints;
use crate::outlines::{GlyphEntry, ADVANCE_WIDTH, ASCENT, DESCENT, UNITS_PER_EM};

/// Accuracy of cubic-to-quadratic conversion, in font units.
const QUAD_TOLERANCE: f64 = 0.25;

/// Seconds between the TrueType epoch (1904-01-01) and the Unix epoch.
const EPOCH_1904_TO_1970: i64 = 2_082_844_800;

const WINDOWS_PLATFORM: u16 = 3;
const UNICODE_BMP_ENCODING: u16 = 1;
const EN_US_LANGUAGE: u16 = 0x409;

/// Compile a TTF from normalized glyph entries.
///
/// Glyph 0 is the empty `.notdef`; each entry becomes one simple glyph,
/// in the order given, so glyph ids follow enumeration order. Entries
/// repeating one name and code point map the last glyph and leave the
/// earlier copies unmapped; one code point under distinct names fails
/// the character map build.
pub fn compile_ttf(entries: &[GlyphEntry], family: &str) -> Result<Vec<u8>> {
    // Glyph ids are 16 bits and id 0 is reserved for .notdef.
    if entries.len() >= usize::from(u16::MAX) {
        return Err(anyhow!(
            "too many icons for one font: {} (limit {})",
            entries.len(),
            u16::MAX - 1
        ));
    }

    let mut builder = GlyfLocaBuilder::new();
    builder
        .add_glyph(&Glyph::Empty)
        .context("failed to add .notdef glyph")?;

    let mut mappings: Vec<(char, &str, GlyphId)> = Vec::with_capacity(entries.len());
    let mut glyph_names = Vec::with_capacity(entries.len() + 1);
    glyph_names.push(".notdef".to_string());
    let mut h_metrics = vec![LongMetric {
        advance: ADVANCE_WIDTH,
        side_bearing: 0,
    }];
    let mut bbox: Option<Bbox> = None;
    let mut char_range: Option<(u32, u32)> = None;
    let mut max_points = 0u16;
    let mut max_contours = 0u16;

    for (index, entry) in entries.iter().enumerate() {
        let quadratic = to_quadratic(&entry.path);
        let glyph = SimpleGlyph::from_bezpath(&quadratic)
            .map_err(|e| anyhow!("glyph '{}' has no usable outline: {e:?}", entry.name))?;

        let points: usize = glyph.contours.iter().map(|c| c.len()).sum();
        let points = u16::try_from(points)
            .map_err(|_| anyhow!("glyph '{}' has too many points for glyf", entry.name))?;
        let contours = u16::try_from(glyph.contours.len())
            .map_err(|_| anyhow!("glyph '{}' has too many contours for glyf", entry.name))?;
        max_points = max_points.max(points);
        max_contours = max_contours.max(contours);
        h_metrics.push(LongMetric {
            advance: ADVANCE_WIDTH,
            side_bearing: glyph.bbox.x_min,
        });
        bbox = Some(match bbox {
            Some(whole) => whole.union(glyph.bbox),
            None => glyph.bbox,
        });

        builder
            .add_glyph(&glyph)
            .with_context(|| format!("failed to compile glyph '{}'", entry.name))?;

        let ch = codepoints::codepoint_to_char(&entry.codepoint)
            .with_context(|| format!("glyph '{}'", entry.name))?;
        let cp = u32::from(ch);
        char_range = Some(match char_range {
            Some((lo, hi)) => (lo.min(cp), hi.max(cp)),
            None => (cp, cp),
        });
        let glyph_id = GlyphId::new(index as u32 + 1);
        // Entries repeating one name and code point collapse to the last
        // glyph; earlier copies stay in the font unmapped. One code point
        // under different names is left for the character map to refuse.
        match mappings
            .iter_mut()
            .find(|(code, name, _)| *code == ch && *name == entry.name)
        {
            Some(slot) => slot.2 = glyph_id,
            None => mappings.push((ch, entry.name.as_str(), glyph_id)),
        }
        glyph_names.push(entry.name.clone());
    }

    let (glyf, loca, loca_format) = builder.build();
    let bbox = bbox.unwrap_or_default();
    let num_glyphs = entries.len() as u16 + 1;
    let (first_char, last_char) = char_range.unwrap_or((0xFFFF, 0));

    let cmap = Cmap::from_mappings(mappings.into_iter().map(|(ch, _, id)| (ch, id)))
        .context("failed to build character map")?;

    let hmtx = Hmtx {
        h_metrics,
        left_side_bearings: vec![],
    };

    let hhea = Hhea {
        ascender: FWord::new(ASCENT),
        descender: FWord::new(DESCENT),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(ADVANCE_WIDTH),
        min_left_side_bearing: FWord::new(bbox.x_min),
        min_right_side_bearing: FWord::new(ADVANCE_WIDTH as i16 - bbox.x_max),
        x_max_extent: FWord::new(bbox.x_max),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: num_glyphs,
    };

    let maxp = Maxp {
        num_glyphs,
        max_points: Some(max_points),
        max_contours: Some(max_contours),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(2),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    };

    let now = font_timestamp();
    let head = Head {
        font_revision: Fixed::from_f64(1.0),
        flags: Flags::BASELINE_AT_Y_0 | Flags::LSB_AT_X_0,
        units_per_em: UNITS_PER_EM,
        created: now,
        modified: now,
        x_min: bbox.x_min,
        y_min: bbox.y_min,
        x_max: bbox.x_max,
        y_max: bbox.y_max,
        lowest_rec_ppem: 8,
        index_to_loc_format: match loca_format {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        },
        ..Default::default()
    };

    let os2 = Os2 {
        x_avg_char_width: ADVANCE_WIDTH as i16,
        us_weight_class: 400,
        us_width_class: 5,
        fs_type: 0,
        fs_selection: SelectionFlags::REGULAR,
        us_first_char_index: first_char.min(0xFFFF) as u16,
        us_last_char_index: last_char.min(0xFFFF) as u16,
        s_typo_ascender: ASCENT,
        s_typo_descender: DESCENT,
        s_typo_line_gap: 0,
        us_win_ascent: ASCENT as u16,
        us_win_descent: 0,
        ..Default::default()
    };

    let name = name_table(family);
    let post = Post::new_v2(glyph_names.iter().map(String::as_str));

    let mut font = FontBuilder::new();
    font.add_table(&head)?;
    font.add_table(&hhea)?;
    font.add_table(&maxp)?;
    font.add_table(&hmtx)?;
    font.add_table(&cmap)?;
    font.add_table(&glyf)?;
    font.add_table(&loca)?;
    font.add_table(&name)?;
    font.add_table(&os2)?;
    font.add_table(&post)?;

    Ok(font.build())
}

/// Replace every cubic segment with quadratic approximations.
///
/// The glyf format only stores quadratic curves; lines, quadratics and
/// moves pass through untouched.
fn to_quadratic(path: &BezPath) -> BezPath {
    let mut out = BezPath::new();
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => {
                out.move_to(p);
                start = p;
                last = p;
            }
            PathEl::LineTo(p) => {
                out.line_to(p);
                last = p;
            }
            PathEl::QuadTo(p1, p2) => {
                out.quad_to(p1, p2);
                last = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                for (_, _, quad) in CubicBez::new(last, p1, p2, p3).to_quads(QUAD_TOLERANCE) {
                    out.quad_to(quad.p1, quad.p2);
                }
                last = p3;
            }
            PathEl::ClosePath => {
                out.close_path();
                last = start;
            }
        }
    }
    out
}

/// Windows/Unicode name records, in name id order as the table requires.
fn name_table(family: &str) -> Name {
    let records = [
        (NameId::FAMILY_NAME, family.to_string()),
        (NameId::SUBFAMILY_NAME, "Regular".to_string()),
        (NameId::UNIQUE_ID, format!("{family} 1.0")),
        (NameId::FULL_NAME, family.to_string()),
        (NameId::VERSION_STRING, "Version 1.0".to_string()),
        (NameId::POSTSCRIPT_NAME, family.replace(' ', "")),
    ];
    Name::new(
        records
            .into_iter()
            .map(|(id, value)| {
                NameRecord::new(
                    WINDOWS_PLATFORM,
                    UNICODE_BMP_ENCODING,
                    EN_US_LANGUAGE,
                    id,
                    value.into(),
                )
            })
            .collect(),
    )
}

/// Seconds since the 1904 TrueType epoch, for head.created/modified.
fn font_timestamp() -> LongDateTime {
    LongDateTime::new(Utc::now().timestamp() + EPOCH_1904_TO_1970)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skrifa::{
        instance::{LocationRef, Size},
        outline::DrawSettings,
        raw::TableProvider,
        string::StringId,
        FontRef, GlyphNames, MetadataProvider,
    };

    fn square_entry(name: &str, codepoint: &str) -> GlyphEntry {
        let mut path = BezPath::new();
        path.move_to((64.0, 64.0));
        path.line_to((448.0, 64.0));
        path.line_to((448.0, 448.0));
        path.line_to((64.0, 448.0));
        path.close_path();
        GlyphEntry {
            name: name.to_string(),
            codepoint: codepoint.to_string(),
            path,
        }
    }

    fn curvy_entry(name: &str, codepoint: &str) -> GlyphEntry {
        let mut path = BezPath::new();
        path.move_to((64.0, 256.0));
        path.curve_to((64.0, 448.0), (448.0, 448.0), (448.0, 256.0));
        path.curve_to((448.0, 64.0), (64.0, 64.0), (64.0, 256.0));
        path.close_path();
        GlyphEntry {
            name: name.to_string(),
            codepoint: codepoint.to_string(),
            path,
        }
    }

    struct BoundsPen {
        bounds: Option<kurbo::Rect>,
        curves: usize,
        quads: usize,
    }

    impl BoundsPen {
        fn new() -> Self {
            Self {
                bounds: None,
                curves: 0,
                quads: 0,
            }
        }

        fn grow(&mut self, x: f32, y: f32) {
            let pt = kurbo::Point::new(f64::from(x), f64::from(y));
            self.bounds = Some(match self.bounds {
                Some(b) => b.union_pt(pt),
                None => kurbo::Rect::from_points(pt, pt),
            });
        }
    }

    impl skrifa::outline::OutlinePen for BoundsPen {
        fn move_to(&mut self, x: f32, y: f32) {
            self.grow(x, y);
        }

        fn line_to(&mut self, x: f32, y: f32) {
            self.grow(x, y);
        }

        fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
            self.quads += 1;
            self.grow(cx0, cy0);
            self.grow(x, y);
        }

        fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
            self.curves += 1;
            self.grow(cx0, cy0);
            self.grow(cx1, cy1);
            self.grow(x, y);
        }

        fn close(&mut self) {}
    }

    #[test]
    fn codepoints_map_to_glyphs_in_entry_order() {
        let entries = vec![square_entry("home", "E001"), square_entry("search", "E002")];
        let bytes = compile_ttf(&entries, "MyIcons").unwrap();
        let font = FontRef::new(&bytes).unwrap();

        let charmap = font.charmap();
        assert_eq!(charmap.map('\u{E001}'), Some(skrifa::GlyphId::new(1)));
        assert_eq!(charmap.map('\u{E002}'), Some(skrifa::GlyphId::new(2)));
        assert_eq!(charmap.map('\u{E003}'), None);
        assert_eq!(font.maxp().unwrap().num_glyphs(), 3);
    }

    #[test]
    fn metrics_follow_the_em_box() {
        let bytes = compile_ttf(&[square_entry("home", "E001")], "MyIcons").unwrap();
        let font = FontRef::new(&bytes).unwrap();

        assert_eq!(font.head().unwrap().units_per_em(), 512);
        assert_eq!(font.hhea().unwrap().ascender().to_i16(), 512);
        assert_eq!(font.hhea().unwrap().descender().to_i16(), 0);
        assert_eq!(
            font.hmtx().unwrap().advance(skrifa::GlyphId::new(1)),
            Some(512)
        );
    }

    #[test]
    fn outlines_stay_inside_the_em() {
        let bytes = compile_ttf(&[square_entry("home", "E001")], "MyIcons").unwrap();
        let font = FontRef::new(&bytes).unwrap();

        let glyph = font
            .outline_glyphs()
            .get(skrifa::GlyphId::new(1))
            .expect("glyph 1 should have an outline");
        let mut pen = BoundsPen::new();
        glyph
            .draw(
                DrawSettings::unhinted(Size::unscaled(), LocationRef::default()),
                &mut pen,
            )
            .unwrap();

        let bounds = pen.bounds.expect("outline should produce points");
        assert!(bounds.x0 >= 0.0 && bounds.x1 <= 512.0, "bounds were {bounds:?}");
        assert!(bounds.y0 >= 0.0 && bounds.y1 <= 512.0, "bounds were {bounds:?}");
    }

    #[test]
    fn cubic_sources_become_quadratic_outlines() {
        let bytes = compile_ttf(&[curvy_entry("blob", "E001")], "MyIcons").unwrap();
        let font = FontRef::new(&bytes).unwrap();

        let glyph = font.outline_glyphs().get(skrifa::GlyphId::new(1)).unwrap();
        let mut pen = BoundsPen::new();
        glyph
            .draw(
                DrawSettings::unhinted(Size::unscaled(), LocationRef::default()),
                &mut pen,
            )
            .unwrap();

        assert_eq!(pen.curves, 0, "glyf outlines must not contain cubics");
        assert!(pen.quads > 0, "curved source should yield quadratic segments");
    }

    #[test]
    fn names_carry_family_and_glyph_names() {
        let entries = vec![square_entry("home", "E001")];
        let bytes = compile_ttf(&entries, "MyIcons").unwrap();
        let font = FontRef::new(&bytes).unwrap();

        let family = font
            .localized_strings(StringId::FAMILY_NAME)
            .english_or_first()
            .map(|s| s.to_string());
        assert_eq!(family.as_deref(), Some("MyIcons"));

        let names = GlyphNames::new(&font);
        assert_eq!(
            names.get(skrifa::GlyphId::new(1)).map(|n| n.to_string()),
            Some("home".to_string())
        );
        assert_eq!(
            names.get(skrifa::GlyphId::new(0)).map(|n| n.to_string()),
            Some(".notdef".to_string())
        );
    }

    #[test]
    fn empty_icon_set_still_compiles() {
        let bytes = compile_ttf(&[], "MyIcons").unwrap();
        let font = FontRef::new(&bytes).unwrap();
        assert_eq!(font.maxp().unwrap().num_glyphs(), 1);
    }

    #[test]
    fn repeated_names_keep_the_last_outline_mapped() {
        let entries = vec![square_entry("star", "E002"), curvy_entry("star", "E002")];
        let bytes = compile_ttf(&entries, "MyIcons").unwrap();
        let font = FontRef::new(&bytes).unwrap();

        assert_eq!(
            font.charmap().map('\u{E002}'),
            Some(skrifa::GlyphId::new(2)),
            "The later entry should own the cmap slot"
        );
        assert_eq!(
            font.maxp().unwrap().num_glyphs(),
            3,
            "The shadowed copy stays in the font as an unmapped glyph"
        );
    }

    #[test]
    fn one_code_point_under_two_names_is_refused() {
        let entries = vec![square_entry("settings", "E002"), square_entry("star", "E002")];

        let result = compile_ttf(&entries, "MyIcons");

        assert!(
            result.is_err(),
            "Two names must not silently share one code point"
        );
    }

    #[test]
    fn glyph_id_space_caps_the_icon_count() {
        let entries: Vec<GlyphEntry> = (0..usize::from(u16::MAX))
            .map(|i| square_entry(&format!("icon{i}"), "E001"))
            .collect();

        let err = compile_ttf(&entries, "MyIcons").unwrap_err();

        assert!(
            err.to_string().contains("too many icons"),
            "Oversized sets should be refused up front: {err}"
        );
    }
}
