use super::{AttributeVerdict, ElementVerdict, SanitizeRule};
use poster_parser::ast::{Attribute, Element};

/// CSS constructs that can run script in some browsers
const UNSAFE_CSS: &[&str] = &[
    "expression(",
    "javascript:",
    "vbscript:",
    "behavior:",
    "-moz-binding",
];

/// Removes `style` attributes and `<style>` elements carrying script in CSS
pub struct UnsafeStyleRule;

impl SanitizeRule for UnsafeStyleRule {
    fn name(&self) -> &'static str {
        "unsafe-style"
    }

    fn description(&self) -> &'static str {
        "Remove CSS that can execute script"
    }

    fn check_element(&self, element: &Element) -> ElementVerdict {
        if element.tag == "style" && is_unsafe_css(&element.text_content()) {
            ElementVerdict::Drop("<style> contains script-executing CSS".to_string())
        } else {
            ElementVerdict::Keep
        }
    }

    fn check_attribute(&self, _tag: &str, attr: &Attribute) -> AttributeVerdict {
        if attr.name == "style" && is_unsafe_css(&attr.value) {
            AttributeVerdict::Remove("style attribute contains script-executing CSS".to_string())
        } else {
            AttributeVerdict::Keep
        }
    }
}

/// Checks CSS after removing comments, escapes and whitespace, which
/// browsers ignore when matching these constructs
pub fn is_unsafe_css(css: &str) -> bool {
    let mut normalized = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        normalized.push_str(&rest[..start]);
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            None => "",
        };
    }
    normalized.push_str(rest);

    let normalized: String = normalized
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\\')
        .collect::<String>()
        .to_ascii_lowercase();

    UNSAFE_CSS.iter().any(|pattern| normalized.contains(pattern))
}
