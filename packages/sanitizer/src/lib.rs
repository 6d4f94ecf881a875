//! HTML sanitizer for imported and pasted poster markup
//!
//! Markup is parsed into an element tree, cleaned by a registry of rules
//! and serialized again. Output never contains script-executing elements
//! or attributes, and sanitizing twice gives the same result as once.

mod removal;
mod rules;
mod sanitizer;

pub use removal::Removal;
pub use rules::{AttributeVerdict, ElementVerdict, RuleRegistry, SanitizeRule};
pub use sanitizer::{sanitize, sanitize_with_report, Sanitized, Sanitizer};
