use super::{AttributeVerdict, SanitizeRule};
use poster_parser::ast::Attribute;

/// Attributes kept on any allowed element
pub const ALLOWED_ATTRIBUTES: &[&str] = &[
    "abbr", "align", "alt", "autoplay", "bgcolor", "border", "cellpadding", "cellspacing", "cite",
    "class", "color", "colspan", "contenteditable", "controls", "datetime", "default", "dir",
    "disabled", "download", "draggable", "face", "for", "headers", "height", "hidden", "href",
    "hreflang", "id", "kind", "label", "lang", "loading", "loop", "media", "muted", "name", "open",
    "playsinline", "poster", "preload", "rel", "reversed", "role", "rowspan", "scope", "size", "span",
    "spellcheck", "src", "srclang", "start", "style", "summary", "tabindex", "target", "title",
    "translate", "type", "valign", "value", "width",
];

/// Removes attributes outside the allow-list. `data-*` (including the
/// editor's `data-id`) and `aria-*` are always kept.
pub struct AllowedAttributesRule;

impl SanitizeRule for AllowedAttributesRule {
    fn name(&self) -> &'static str {
        "allowed-attributes"
    }

    fn description(&self) -> &'static str {
        "Remove attributes that are not on the allow-list"
    }

    fn check_attribute(&self, _tag: &str, attr: &Attribute) -> AttributeVerdict {
        let name = attr.name.as_str();
        let allowed = ALLOWED_ATTRIBUTES.contains(&name)
            || is_prefixed(name, "data-")
            || is_prefixed(name, "aria-");

        if allowed {
            AttributeVerdict::Keep
        } else {
            AttributeVerdict::Remove(format!("attribute '{}' is not allowed", name))
        }
    }
}

fn is_prefixed(name: &str, prefix: &str) -> bool {
    name.len() > prefix.len()
        && name.starts_with(prefix)
        && name[prefix.len()..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}
