//! Height and viewBox rewrite on the root element.

use crate::model::Element;

use super::options::HeightPolicy;

/// A `viewBox` made of exactly four numeric tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewBox {
    tokens: [String; 4],
}

impl ViewBox {
    /// Parse a whitespace-separated viewBox.
    ///
    /// Returns `None` unless there are exactly four tokens and each one is a
    /// number.
    pub fn parse(value: &str) -> Option<Self> {
        let parts: Vec<&str> = value.split_whitespace().collect();
        let [min_x, min_y, width, height] = parts.as_slice() else {
            return None;
        };

        let tokens = [min_x, min_y, width, height].map(|t| t.to_string());
        let numeric = tokens
            .iter()
            .all(|t| t.parse::<f64>().is_ok_and(f64::is_finite));
        numeric.then_some(Self { tokens })
    }

    /// Render with a replacement height token, keeping the other three as written.
    pub fn with_height(&self, height: &str) -> String {
        format!(
            "{} {} {} {}",
            self.tokens[0], self.tokens[1], self.tokens[2], height
        )
    }
}

/// Outcome of rewriting the root's vertical framing.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightRewrite {
    /// `height` attribute before the rewrite
    pub old_height: Option<String>,

    /// New height after the policy's rounding
    pub new_height: f64,

    /// New height exactly as written to the attributes
    pub new_height_text: String,

    /// Whether the viewBox height token was replaced
    pub viewbox_updated: bool,
}

/// Compute the new height for a given content extent.
pub fn target_height(content_max_y: f64, padding: f64, policy: HeightPolicy) -> (f64, String) {
    let raw = content_max_y + padding;
    (policy.apply(raw), policy.render(raw))
}

/// Set the root's `height` and the viewBox's fourth token.
///
/// `width` and the first three viewBox tokens are left alone. A missing or
/// malformed viewBox is not touched.
pub fn rewrite_height(
    root: &mut Element,
    content_max_y: f64,
    padding: f64,
    policy: HeightPolicy,
) -> HeightRewrite {
    let (new_height, new_height_text) = target_height(content_max_y, padding, policy);
    let old_height = root.attr("height").map(|h| h.into_owned());
    root.set_attr("height", &new_height_text);

    let updated_view_box = root
        .attr("viewBox")
        .and_then(|value| ViewBox::parse(&value))
        .map(|vb| vb.with_height(&new_height_text));
    let viewbox_updated = match updated_view_box {
        Some(view_box) => {
            root.set_attr("viewBox", &view_box);
            true
        }
        None => {
            if root.has_attr("viewBox") {
                log::warn!("viewBox is not four numbers; leaving it unchanged");
            }
            false
        }
    };

    HeightRewrite {
        old_height,
        new_height,
        new_height_text,
        viewbox_updated,
    }
}
