use crate::ast::*;
use crate::entities::{escape_attribute, escape_text};
use std::borrow::Cow;

/// Serializer converts the element tree back to HTML markup
///
/// Output is canonical rather than source-preserving:
/// - attribute values are always double-quoted
/// - void elements have no end tag, every other element has one
/// - raw-text element content (`<style>`, `<script>`) is written verbatim,
///   except that a closing `</tag` inside it is written as `<\/tag`
///
/// Parsing the output again yields the same tree.
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Serialize a complete document, doctype first when present
    pub fn serialize_document(mut self, doc: &Document) -> String {
        if let Some(doctype) = &doc.doctype {
            self.output.push_str(doctype);
            self.output.push('\n');
        }
        self.write_html(doc);
        self.output
    }

    /// Serialize the `<html>` element only
    pub fn serialize_html(mut self, doc: &Document) -> String {
        self.write_html(doc);
        self.output
    }

    pub fn serialize_nodes(mut self, nodes: &[Node]) -> String {
        for node in nodes {
            self.write_node(node, None);
        }
        self.output
    }

    pub fn serialize_element(mut self, element: &Element) -> String {
        self.write_element(element);
        self.output
    }

    fn write_html(&mut self, doc: &Document) {
        self.output.push_str("<html");
        self.write_attributes(&doc.html_attributes);
        self.output.push('>');
        self.write_element(&doc.head);
        self.write_element(&doc.body);
        self.output.push_str("</html>");
    }

    /// `raw` names the enclosing raw-text element, if any
    fn write_node(&mut self, node: &Node, raw: Option<&str>) {
        match (node, raw) {
            (Node::Element(element), _) => self.write_element(element),
            (Node::Text { content }, Some(tag)) => {
                self.output.push_str(&escape_raw_text(content, tag))
            }
            (Node::Text { content }, None) => self.output.push_str(&escape_text(content)),
            (Node::Comment { content }, _) => {
                self.output.push_str("<!--");
                self.output.push_str(content);
                self.output.push_str("-->");
            }
        }
    }

    fn write_element(&mut self, element: &Element) {
        self.output.push('<');
        self.output.push_str(&element.tag);
        self.write_attributes(&element.attributes);
        self.output.push('>');

        if element.is_void() {
            return;
        }

        let raw = is_raw_text_element(&element.tag).then_some(element.tag.as_str());
        for child in &element.children {
            self.write_node(child, raw);
        }

        self.output.push_str("</");
        self.output.push_str(&element.tag);
        self.output.push('>');
    }

    fn write_attributes(&mut self, attributes: &[Attribute]) {
        for attr in attributes {
            self.output.push(' ');
            self.output.push_str(&attr.name);
            self.output.push_str("=\"");
            self.output.push_str(&escape_attribute(&attr.value));
            self.output.push('"');
        }
    }
}

/// Break up every `</tag` (any case) so raw text cannot close its element
fn escape_raw_text<'a>(content: &'a str, tag: &str) -> Cow<'a, str> {
    let needle = format!("</{}", tag.to_ascii_lowercase());
    let lowered = content.to_ascii_lowercase();
    if !lowered.contains(&needle) {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len() + 8);
    let mut last = 0;
    for (index, _) in lowered.match_indices(&needle) {
        out.push_str(&content[last..index + 1]);
        out.push('\\');
        last = index + 1;
    }
    out.push_str(&content[last..]);
    Cow::Owned(out)
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a document, including its doctype
pub fn serialize_document(doc: &Document) -> String {
    Serializer::new().serialize_document(doc)
}

/// Serialize a list of sibling nodes
pub fn serialize_fragment(nodes: &[Node]) -> String {
    Serializer::new().serialize_nodes(nodes)
}

/// Outer HTML of an element
pub fn serialize_element(element: &Element) -> String {
    Serializer::new().serialize_element(element)
}

/// Inner HTML of an element
pub fn inner_html(element: &Element) -> String {
    if is_raw_text_element(&element.tag) {
        return element.text_content();
    }
    serialize_fragment(&element.children)
}
