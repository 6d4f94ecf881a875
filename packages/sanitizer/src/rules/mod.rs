mod allowed_attributes;
mod event_handlers;
mod forbidden_elements;
mod unknown_elements;
mod unsafe_style;
mod unsafe_urls;

pub use allowed_attributes::AllowedAttributesRule;
pub use event_handlers::EventHandlersRule;
pub use forbidden_elements::ForbiddenElementsRule;
pub use unknown_elements::UnknownElementsRule;
pub use unsafe_style::UnsafeStyleRule;
pub use unsafe_urls::UnsafeUrlsRule;

use poster_parser::ast::{Attribute, Element};

/// What to do with an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementVerdict {
    Keep,
    /// Remove the element but keep its (cleaned) children in place
    Unwrap(String),
    /// Remove the element together with everything inside it
    Drop(String),
}

/// What to do with an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeVerdict {
    Keep,
    Remove(String),
}

/// Trait for implementing sanitize rules
pub trait SanitizeRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check an element before its children are visited
    fn check_element(&self, _element: &Element) -> ElementVerdict {
        ElementVerdict::Keep
    }

    /// Check one attribute of a kept element
    fn check_attribute(&self, _tag: &str, _attr: &Attribute) -> AttributeVerdict {
        AttributeVerdict::Keep
    }
}

/// Registry of sanitize rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn SanitizeRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(ForbiddenElementsRule),
                Box::new(UnknownElementsRule),
                Box::new(EventHandlersRule),
                Box::new(UnsafeUrlsRule),
                Box::new(UnsafeStyleRule),
                Box::new(AllowedAttributesRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn SanitizeRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn SanitizeRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
