//! SVG icon parsing
//!
//! Wraps usvg, which resolves the messy parts of the format up front
//! (shapes become paths, `use` references are expanded, text is turned
//! into outlines). We walk the resulting tree and merge every path
//! into a single [`BezPath`] in image coordinates.

use anyhow::{Context, Result};
use kurbo::{Affine, BezPath};
use usvg::tiny_skia_path::PathSegment;

use crate::outlines::IconOutline;

/// Parse one icon's SVG source into a merged outline.
///
/// The reported size comes from the document's width/height or its
/// viewBox, whichever usvg resolves; that size is what the em-box
/// normalization scales against.
pub fn parse_icon(data: &[u8]) -> Result<IconOutline> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &options).context("failed to parse SVG")?;

    let mut path = BezPath::new();
    collect_paths(tree.root(), &mut path);

    Ok(IconOutline {
        path,
        width: f64::from(tree.size().width()),
        height: f64::from(tree.size().height()),
    })
}

/// Walk a group recursively, appending every path to `out`.
fn collect_paths(group: &usvg::Group, out: &mut BezPath) {
    for node in group.children() {
        match node {
            usvg::Node::Group(group) => collect_paths(group, out),
            usvg::Node::Path(path) => append_path(path, out),
            // Text has already been converted to outlines by usvg
            usvg::Node::Text(text) => collect_paths(text.flattened(), out),
            // Raster content cannot become glyph outlines
            usvg::Node::Image(_) => {}
        }
    }
}

/// Convert one usvg path into Bezier elements in image coordinates.
///
/// Segment points are local to the node, so the node's absolute
/// transform is applied before the elements join the merged outline.
fn append_path(path: &usvg::Path, out: &mut BezPath) {
    let mut local = BezPath::new();
    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => local.move_to(to_point(p)),
            PathSegment::LineTo(p) => local.line_to(to_point(p)),
            PathSegment::QuadTo(p1, p2) => local.quad_to(to_point(p1), to_point(p2)),
            PathSegment::CubicTo(p1, p2, p3) => {
                local.curve_to(to_point(p1), to_point(p2), to_point(p3))
            }
            PathSegment::Close => local.close_path(),
        }
    }

    let t = path.abs_transform();
    local.apply_affine(Affine::new([
        f64::from(t.sx),
        f64::from(t.ky),
        f64::from(t.kx),
        f64::from(t.sy),
        f64::from(t.tx),
        f64::from(t.ty),
    ]));

    for element in local.elements() {
        out.push(*element);
    }
}

fn to_point(p: usvg::tiny_skia_path::Point) -> kurbo::Point {
    kurbo::Point::new(f64::from(p.x), f64::from(p.y))
}
