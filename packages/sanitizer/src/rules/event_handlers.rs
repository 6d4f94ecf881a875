use super::{AttributeVerdict, SanitizeRule};
use poster_parser::ast::Attribute;

/// Removes inline event handler attributes (`onclick`, `onload`, ...)
pub struct EventHandlersRule;

impl SanitizeRule for EventHandlersRule {
    fn name(&self) -> &'static str {
        "event-handlers"
    }

    fn description(&self) -> &'static str {
        "Remove inline event handler attributes"
    }

    fn check_attribute(&self, _tag: &str, attr: &Attribute) -> AttributeVerdict {
        if attr.name.starts_with("on") {
            AttributeVerdict::Remove(format!("event handler '{}' removed", attr.name))
        } else {
            AttributeVerdict::Keep
        }
    }
}
