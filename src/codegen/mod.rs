//! Dart class generation
//!
//! Renders the `IconData` constants class from an embedded Handlebars
//! template. The template context mirrors what the class needs: the
//! class name (which doubles as the font family), the package the font
//! ships in, and the name → code point mapping.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::json;

const CLASS_TEMPLATE: &str = include_str!("templates/class.dart.hbs");

/// Render the Dart icon class for a name → code point mapping.
///
/// An empty `package_name` produces a null `fontPackage`, which is what
/// Flutter expects for fonts declared by the application itself.
pub fn render_dart_class(
    icons: &BTreeMap<String, String>,
    class_name: &str,
    package_name: &str,
) -> Result<String> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string("class", CLASS_TEMPLATE)
        .context("failed to parse Dart class template")?;

    registry
        .render(
            "class",
            &json!({
                "className": class_name,
                "packageName": package_name,
                "icons": icons,
            }),
        )
        .context("failed to render Dart class")
}
