//! Vertical extent heuristics.
//!
//! Extents are derived from declared positional attributes only. Paths,
//! curves, clipping and nested transforms are not evaluated, so the result
//! approximates the drawn bottom edge rather than measuring it.

use crate::model::Element;

use super::number::{parse_number, translate_y};

/// Positional attributes in priority order.
pub const POSITION_ATTRS: [&str; 4] = ["y", "y1", "y2", "cy"];

/// Result of measuring a subtree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extent {
    /// Largest `y + extra` over all measured elements (0.0 if none)
    pub max_y: f64,

    /// Number of elements that had a usable position
    pub contributors: usize,

    /// Tag and id of the element that set `max_y`, if any raised it above 0.0
    pub bottom_element: Option<String>,
}

/// First usable position of an element, in attribute priority order.
///
/// Empty or unparseable attributes are skipped in favour of the next one.
pub fn position_y(element: &Element) -> Option<f64> {
    POSITION_ATTRS
        .iter()
        .filter_map(|name| element.attr(name))
        .find_map(|value| parse_number(&value))
}

/// Bottom edge estimate of a single element.
///
/// `height` covers box-like shapes and `font-size` covers text; the larger
/// of the two is added, never their sum.
pub fn extent_contribution(element: &Element) -> Option<f64> {
    let y = position_y(element)?;
    let height = numeric_attr(element, "height").unwrap_or(0.0);
    let font_size = numeric_attr(element, "font-size").unwrap_or(0.0);
    Some(y + height.max(font_size))
}

/// Measure every element below `root`.
///
/// The root itself is skipped: its `height` is the value being recomputed.
pub fn measure(root: &Element) -> Extent {
    let mut extent = Extent::default();

    for element in root.descendants() {
        let Some(bottom) = extent_contribution(element) else {
            continue;
        };
        extent.contributors += 1;
        if bottom > extent.max_y {
            extent.max_y = bottom;
            extent.bottom_element = Some(describe(element));
        }
    }

    log::debug!(
        "Measured {} positioned element(s), max y {:.2}",
        extent.contributors,
        extent.max_y
    );
    extent
}

/// Largest vertical extent of the retained content.
pub fn content_max_y(root: &Element) -> f64 {
    measure(root).max_y
}

/// Smallest vertical position within an element's subtree (element included).
///
/// Besides the positional attributes, the y component of a
/// `translate(x, y)` transform is also a candidate. Returns `None` when
/// nothing in the subtree carries a usable position.
pub fn footer_min_y(element: &Element) -> Option<f64> {
    std::iter::once(element)
        .chain(element.descendants())
        .flat_map(|el| {
            let positions = POSITION_ATTRS
                .iter()
                .filter_map(|name| el.attr(name))
                .filter_map(|value| parse_number(&value));
            let translate = el.attr("transform").and_then(|t| translate_y(&t));
            positions.chain(translate).collect::<Vec<_>>()
        })
        .reduce(f64::min)
}

fn numeric_attr(element: &Element, name: &str) -> Option<f64> {
    element.attr(name).and_then(|value| parse_number(&value))
}

fn describe(element: &Element) -> String {
    match element.id() {
        Some(id) => format!("<{} id=\"{}\">", element.name, id),
        None => format!("<{}>", element.name),
    }
}
