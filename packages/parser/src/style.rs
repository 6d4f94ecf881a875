//! Inline `style` attribute declarations
//!
//! Keeps declaration order so that editing one property leaves the rest of
//! the attribute untouched.

use std::fmt;

/// Ordered `property: value` pairs of an inline style attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclarations {
    declarations: Vec<(String, String)>,
}

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a: b; c: d`. Semicolons inside quotes or parentheses do not
    /// split declarations. Entries without a colon are dropped.
    pub fn parse(source: &str) -> Self {
        let mut declarations: Vec<(String, String)> = Vec::new();

        for chunk in split_declarations(source) {
            let Some((prop, value)) = chunk.split_once(':') else {
                continue;
            };
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim();
            if prop.is_empty() || value.is_empty() {
                continue;
            }
            match declarations.iter_mut().find(|(p, _)| *p == prop) {
                Some(existing) => existing.1 = value.to_string(),
                None => declarations.push((prop, value.to_string())),
            }
        }

        Self { declarations }
    }

    pub fn get(&self, prop: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property, replacing an existing value in place
    pub fn set(&mut self, prop: &str, value: impl Into<String>) {
        let value = value.into();
        match self.declarations.iter_mut().find(|(p, _)| p == prop) {
            Some(existing) => existing.1 = value,
            None => self.declarations.push((prop.to_string(), value)),
        }
    }

    pub fn remove(&mut self, prop: &str) -> Option<String> {
        let index = self.declarations.iter().position(|(p, _)| p == prop)?;
        Some(self.declarations.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }
}

impl fmt::Display for StyleDeclarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (prop, value)) in self.declarations.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", prop, value)?;
        }
        Ok(())
    }
}

fn split_declarations(source: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (index, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                chunks.push(&source[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    chunks.push(&source[start..]);
    chunks
}

/// Leading numeric part of a CSS length (`"40px"` is 40, `"-3.5em"` is -3.5,
/// `"1e3px"` is 1000).
/// Values without a leading number yield `None`.
pub fn parse_css_number(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction = end + 1;
        let mut cursor = fraction;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > fraction {
            end = cursor;
        }
    }
    if end == digits_start {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exponent = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exponent {
            end = cursor;
        }
    }

    value[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let style = StyleDeclarations::parse("position:absolute; top: 80px;left:40px ;; bogus");

        assert_eq!(style.get("top"), Some("80px"));
        assert_eq!(
            style.to_string(),
            "position: absolute; top: 80px; left: 40px;"
        );
    }

    #[test]
    fn test_separators_inside_values() {
        let style = StyleDeclarations::parse(
            "background: url(\"a;b.png\"); font-family: 'A;B', serif; outline: 3px solid rgba(59,130,246,0.6)",
        );

        assert_eq!(style.get("background"), Some("url(\"a;b.png\")"));
        assert_eq!(style.get("font-family"), Some("'A;B', serif"));
        assert_eq!(style.get("outline"), Some("3px solid rgba(59,130,246,0.6)"));
    }

    #[test]
    fn test_set_keeps_order() {
        let mut style = StyleDeclarations::parse("top: 1px; left: 2px");
        style.set("top", "5px");
        style.set("width", "10px");
        style.remove("left");

        assert_eq!(style.to_string(), "top: 5px; width: 10px;");
    }

    #[test]
    fn test_parse_css_number() {
        assert_eq!(parse_css_number("40px"), Some(40.0));
        assert_eq!(parse_css_number(" -3.5em"), Some(-3.5));
        assert_eq!(parse_css_number("12.px"), Some(12.0));
        assert_eq!(parse_css_number(".5"), Some(0.5));
        assert_eq!(parse_css_number("1e3px"), Some(1000.0));
        assert_eq!(parse_css_number("2.5E-1"), Some(0.25));
        assert_eq!(parse_css_number("4em"), Some(4.0));
        assert_eq!(parse_css_number("7e+px"), Some(7.0));
        assert_eq!(parse_css_number("auto"), None);
        assert_eq!(parse_css_number(""), None);
    }
}
