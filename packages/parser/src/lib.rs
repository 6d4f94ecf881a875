//! HTML model for poster documents
//!
//! A small, tolerant HTML tokenizer and tree builder, an owned element tree
//! addressed by child-index paths, and a canonical serializer. Parsing never
//! fails and serializing a parsed tree then parsing it again is stable.

pub mod ast;
pub mod entities;
pub mod parser;
pub mod serializer;
pub mod style;
pub mod tokenizer;

pub use ast::{Attribute, Document, Element, Node, NodePath};
pub use parser::{parse_document, parse_fragment, Parser};
pub use serializer::{inner_html, serialize_document, serialize_element, serialize_fragment, Serializer};
pub use style::{parse_css_number, StyleDeclarations};
pub use tokenizer::{tokenize, Token};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_basic() {
        let tokens = tokenize("<h1>Summer Sale</h1>");
        assert_eq!(tokens.len(), 3);
    }
}
