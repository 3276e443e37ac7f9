//! Reference Resolver: `Category.Name` placeholders → document anchors.
//!
//! Anchor strings are matched verbatim against the ids the renderer emits, so
//! only two shapes are ever produced: `#operation-<name>-<Category>` and
//! `#definition-<name>`. Operation names are lowercased, type names are not.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

pub fn resolve(placeholder: &str) -> Result<String> {
    let unsupported = || Error::UnsupportedInterpolation(placeholder.to_owned());
    let (category, name) = placeholder.split_once('.').ok_or_else(unsupported)?;
    if name.is_empty() {
        return Err(unsupported());
    }
    match category {
        "Queries" | "Mutations" => Ok(format!("#operation-{}-{category}", name.to_lowercase())),
        "Types" => Ok(format!("#definition-{name}")),
        _ => Err(unsupported()),
    }
}

/// Anchor for a raw `$ref` path such as `#/definitions/Widget`.
///
/// Only the trailing path segment is used. It is lowercased and reduced to
/// `[a-z0-9_-]`, other runs collapsing to a single `-`. A segment that slugs
/// to nothing is rejected like any other broken reference.
pub fn definition_anchor(ref_path: &str) -> Result<String> {
    let segment = ref_path.rsplit('/').next().unwrap_or(ref_path);
    let slug = slug(segment);
    if slug.is_empty() {
        return Err(Error::UnsupportedInterpolation(ref_path.to_owned()));
    }
    Ok(format!("#definition-{slug}"))
}

fn slug(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut pending_dash = false;
    for ch in segment.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*\.[A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
        .expect("placeholder pattern is valid")
});

/// Replace every `{{ Category.Name }}` in prose with its anchor.
/// The first unresolvable placeholder aborts the whole rewrite.
pub fn interpolate(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always matches");
        out.push_str(&text[last..whole.start()]);
        out.push_str(&resolve(&caps[1])?);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}
