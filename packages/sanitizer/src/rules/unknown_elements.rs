use super::{ElementVerdict, SanitizeRule};
use poster_parser::ast::Element;

/// Elements kept as-is. Anything else not forbidden is unwrapped.
pub const ALLOWED_ELEMENTS: &[&str] = &[
    "a", "abbr", "address", "article", "aside", "audio", "b", "bdi", "bdo", "blockquote", "br",
    "button", "caption", "center", "cite", "code", "col", "colgroup", "dd", "del", "details", "dfn",
    "div", "dl", "dt", "em", "figcaption", "figure", "font", "footer", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "i", "img", "ins", "kbd", "label", "li", "main", "mark", "nav", "ol", "p",
    "picture", "pre", "q", "s", "samp", "section", "small", "source", "span", "strike", "strong",
    "style", "sub", "summary", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "time", "tr",
    "track", "u", "ul", "var", "video", "wbr",
];

/// Unwraps elements outside the allow-list, keeping their children
pub struct UnknownElementsRule;

impl SanitizeRule for UnknownElementsRule {
    fn name(&self) -> &'static str {
        "unknown-elements"
    }

    fn description(&self) -> &'static str {
        "Unwrap elements that are not on the allow-list"
    }

    fn check_element(&self, element: &Element) -> ElementVerdict {
        if ALLOWED_ELEMENTS.contains(&element.tag.as_str()) {
            ElementVerdict::Keep
        } else {
            ElementVerdict::Unwrap(format!("<{}> is not a known element", element.tag))
        }
    }
}
