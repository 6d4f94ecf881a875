use super::{AttributeVerdict, SanitizeRule};
use poster_parser::ast::Attribute;

/// Attributes whose value is loaded or navigated to as a URL
pub const URL_ATTRIBUTES: &[&str] = &[
    "action",
    "background",
    "cite",
    "formaction",
    "href",
    "poster",
    "src",
    "xlink:href",
];

const SCRIPT_SCHEMES: &[&str] = &["javascript:", "vbscript:", "livescript:"];

const IMAGE_DATA_PREFIXES: &[&str] = &[
    "data:image/png",
    "data:image/jpeg",
    "data:image/jpg",
    "data:image/gif",
    "data:image/webp",
];

/// Removes URL attributes with script schemes, and `data:` URLs other than
/// raster images on `<img>`/`<source>`
pub struct UnsafeUrlsRule;

impl SanitizeRule for UnsafeUrlsRule {
    fn name(&self) -> &'static str {
        "unsafe-urls"
    }

    fn description(&self) -> &'static str {
        "Remove javascript:, vbscript: and non-image data: URLs"
    }

    fn check_attribute(&self, tag: &str, attr: &Attribute) -> AttributeVerdict {
        if !URL_ATTRIBUTES.contains(&attr.name.as_str()) {
            return AttributeVerdict::Keep;
        }

        let url = normalize_url(&attr.value);

        if let Some(scheme) = SCRIPT_SCHEMES.iter().find(|s| url.starts_with(*s)) {
            return AttributeVerdict::Remove(format!(
                "'{}' uses the {} scheme",
                attr.name, scheme
            ));
        }

        if url.starts_with("data:") {
            let image_src = attr.name == "src" && matches!(tag, "img" | "source");
            if !(image_src && IMAGE_DATA_PREFIXES.iter().any(|p| url.starts_with(p))) {
                return AttributeVerdict::Remove(format!(
                    "'{}' uses a data: URL that is not an image",
                    attr.name
                ));
            }
        }

        AttributeVerdict::Keep
    }
}

/// Lowercased URL with whitespace and control characters removed, the way
/// browsers read the scheme
fn normalize_url(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase()
}
