use super::{ElementVerdict, SanitizeRule};
use poster_parser::ast::Element;

/// Elements that execute script, embed foreign documents or submit data.
/// They are removed together with their content.
pub const FORBIDDEN_ELEMENTS: &[&str] = &[
    "applet", "base", "datalist", "embed", "form", "frame", "frameset", "iframe", "input", "keygen",
    "link", "math", "meta", "noembed", "noframes", "noscript", "object", "optgroup", "option",
    "param", "plaintext", "script", "select", "svg", "template", "textarea", "title", "xmp",
];

/// Removes script-executing and embedding elements with their content
pub struct ForbiddenElementsRule;

impl SanitizeRule for ForbiddenElementsRule {
    fn name(&self) -> &'static str {
        "forbidden-elements"
    }

    fn description(&self) -> &'static str {
        "Remove script-executing, embedding and form-submitting elements"
    }

    fn check_element(&self, element: &Element) -> ElementVerdict {
        if FORBIDDEN_ELEMENTS.contains(&element.tag.as_str()) {
            ElementVerdict::Drop(format!("<{}> is not allowed in posters", element.tag))
        } else {
            ElementVerdict::Keep
        }
    }
}
