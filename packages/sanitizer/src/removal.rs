use serde::{Deserialize, Serialize};

/// Something the sanitizer removed from the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    /// The rule that removed it
    pub rule: String,

    /// Human-readable message
    pub message: String,

    /// Tag of the affected element
    pub tag: String,

    /// Removed attribute, if the removal was an attribute
    pub attribute: Option<String>,
}

impl Removal {
    pub fn element(rule: impl Into<String>, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            tag: tag.into(),
            attribute: None,
        }
    }

    pub fn attribute(
        rule: impl Into<String>,
        tag: impl Into<String>,
        attribute: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            tag: tag.into(),
            attribute: Some(attribute.into()),
        }
    }
}
