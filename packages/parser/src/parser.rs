//! Tolerant HTML tree builder
//!
//! Builds an element tree from the token stream without ever failing.
//! The rules are deliberately small so that serializing a parsed tree and
//! parsing it again yields the same tree:
//!
//! - end tags close up to the nearest open element with the same name
//! - end tags with no matching open element are ignored
//! - void elements and `/>` tags never take children
//! - everything still open at end of input is closed

use crate::ast::*;
use crate::tokenizer::{tokenize, Token};
use std::ops::Range;

/// Start tags nested deeper than this are dropped along with their end tags,
/// keeping the recursive serializer and sanitizer within stack limits
pub const MAX_DEPTH: usize = 512;

/// Elements routed to `<head>` while no body content has been seen
const HEAD_ELEMENTS: &[&str] = &["base", "link", "meta", "noscript", "script", "style", "title"];

/// Stack of open elements for one insertion target
struct TreeBuilder {
    stack: Vec<Element>,
    /// Names of start tags dropped past `MAX_DEPTH`
    overflow: Vec<String>,
}

impl TreeBuilder {
    fn new(root: Element) -> Self {
        Self {
            stack: vec![root],
            overflow: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut Element {
        // The root is never popped
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn append(&mut self, node: Node) {
        self.current().children.push(node);
    }

    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let current = self.current();
        match current.children.last_mut() {
            Some(Node::Text { content }) => content.push_str(text),
            _ => current.children.push(Node::text(text)),
        }
    }

    fn open(&mut self, element: Element, self_closing: bool) {
        if element.is_void() {
            self.append(Node::Element(element));
        } else if self.stack.len() > MAX_DEPTH {
            if !self_closing {
                self.overflow.push(element.tag);
            }
        } else if self_closing {
            self.append(Node::Element(element));
        } else {
            self.stack.push(element);
        }
    }

    fn close(&mut self, name: &str) {
        if let Some(index) = self.overflow.iter().rposition(|tag| tag == name) {
            self.overflow.truncate(index);
            return;
        }
        self.overflow.clear();

        let Some(index) = self.stack.iter().rposition(|el| el.tag == name) else {
            return;
        };
        if index == 0 {
            return;
        }
        while self.stack.len() > index {
            self.pop();
        }
    }

    fn pop(&mut self) {
        if self.stack.len() > 1 {
            if let Some(element) = self.stack.pop() {
                self.append(Node::Element(element));
            }
        }
    }

    fn finish(mut self) -> Element {
        while self.stack.len() > 1 {
            self.pop();
        }
        self.stack.pop().unwrap_or_else(|| Element::new("body"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertionMode {
    BeforeBody,
    InHead,
    InBody,
}

/// Parser for HTML documents and fragments
pub struct Parser<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            tokens: tokenize(source),
        }
    }

    /// Parse body content. `<html>`, `<head>`, `<body>` and doctype
    /// markers are dropped; their content is kept in place.
    pub fn parse_fragment(self) -> Vec<Node> {
        let mut builder = TreeBuilder::new(Element::new("body"));
        // Between a doctype/<html>/<head> and <body>, whitespace is layout
        let mut preamble = false;

        for (token, _) in self.tokens {
            match token {
                Token::Doctype(_) => preamble = true,
                Token::Comment(content) => builder.append(Node::Comment {
                    content: content.to_string(),
                }),
                Token::StartTag { name, .. } if is_document_structure(&name) => {
                    preamble = name != "body";
                }
                Token::EndTag { name } if is_document_structure(&name) => {}
                Token::StartTag {
                    name,
                    attributes,
                    self_closing,
                } => {
                    if !HEAD_ELEMENTS.contains(&name.as_str()) {
                        preamble = false;
                    }
                    builder.open(
                        Element {
                            tag: name,
                            attributes,
                            children: Vec::new(),
                        },
                        self_closing,
                    )
                }
                Token::EndTag { name } => builder.close(&name),
                Token::Text(text) if preamble && text.trim().is_empty() => {}
                Token::Text(text) => {
                    preamble = false;
                    builder.append_text(&text);
                }
                Token::RawText(text) => builder.append_text(text),
            }
        }

        builder.finish().children
    }

    /// Parse a complete document, routing head content and body content
    pub fn parse_document(self) -> Document {
        let mut doc = Document::new();
        let mut head = TreeBuilder::new(Element::new("head"));
        let mut body = TreeBuilder::new(Element::new("body"));
        let mut mode = InsertionMode::BeforeBody;

        for (token, _) in self.tokens {
            match token {
                Token::Doctype(raw) => {
                    if doc.doctype.is_none() && raw.to_ascii_lowercase().starts_with("<!doctype") {
                        doc.doctype = Some(raw.to_string());
                    }
                }
                Token::Comment(content) => {
                    if mode == InsertionMode::InBody {
                        body.append(Node::Comment {
                            content: content.to_string(),
                        });
                    }
                }
                Token::StartTag {
                    name, attributes, ..
                } if name == "html" => merge_attributes(&mut doc.html_attributes, attributes),
                Token::StartTag { name, .. } if name == "head" => {
                    if mode == InsertionMode::BeforeBody {
                        mode = InsertionMode::InHead;
                    }
                }
                Token::StartTag {
                    name, attributes, ..
                } if name == "body" => {
                    merge_attributes(&mut doc.body.attributes, attributes);
                    mode = InsertionMode::InBody;
                }
                Token::EndTag { name } if name == "head" => {
                    if mode == InsertionMode::InHead {
                        mode = InsertionMode::BeforeBody;
                    }
                }
                Token::EndTag { name } if is_document_structure(&name) => {}
                Token::StartTag {
                    name,
                    attributes,
                    self_closing,
                } => {
                    if mode != InsertionMode::InBody && !HEAD_ELEMENTS.contains(&name.as_str()) {
                        mode = InsertionMode::InBody;
                    }
                    let element = Element {
                        tag: name,
                        attributes,
                        children: Vec::new(),
                    };
                    match mode {
                        InsertionMode::InBody => body.open(element, self_closing),
                        _ => head.open(element, self_closing),
                    }
                }
                Token::EndTag { name } => match mode {
                    InsertionMode::InBody => body.close(&name),
                    _ => head.close(&name),
                },
                Token::Text(text) => {
                    if mode != InsertionMode::InBody && head.stack.len() == 1 {
                        if text.trim().is_empty() {
                            continue;
                        }
                        mode = InsertionMode::InBody;
                    }
                    match mode {
                        InsertionMode::InBody => body.append_text(&text),
                        _ => head.append_text(&text),
                    }
                }
                Token::RawText(text) => match mode {
                    InsertionMode::InBody => body.append_text(text),
                    _ => head.append_text(text),
                },
            }
        }

        doc.head.children = head.finish().children;
        doc.body.children = body.finish().children;
        doc
    }
}

fn is_document_structure(name: &str) -> bool {
    matches!(name, "html" | "head" | "body")
}

fn merge_attributes(target: &mut Vec<Attribute>, attributes: Vec<Attribute>) {
    for attr in attributes {
        if !target.iter().any(|existing| existing.name == attr.name) {
            target.push(attr);
        }
    }
}

/// Parse an HTML fragment (body content)
pub fn parse_fragment(source: &str) -> Vec<Node> {
    Parser::new(source).parse_fragment()
}

/// Parse a complete HTML document
pub fn parse_document(source: &str) -> Document {
    Parser::new(source).parse_document()
}
