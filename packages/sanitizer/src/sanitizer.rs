use crate::removal::Removal;
use crate::rules::{AttributeVerdict, ElementVerdict, RuleRegistry};
use poster_parser::ast::{Attribute, Element, Node};
use poster_parser::{parse_fragment, serialize_fragment};

/// Sanitized markup together with what was removed
#[derive(Debug, Clone)]
pub struct Sanitized {
    pub html: String,
    pub removals: Vec<Removal>,
}

/// Cleans element trees with a rule registry
#[derive(Debug, Default)]
pub struct Sanitizer {
    registry: RuleRegistry,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn sanitize(&self, raw: &str) -> String {
        self.sanitize_with_report(raw).html
    }

    pub fn sanitize_with_report(&self, raw: &str) -> Sanitized {
        let mut removals = Vec::new();
        let nodes = self.clean_nodes(parse_fragment(raw), &mut removals);
        Sanitized {
            html: serialize_fragment(&nodes),
            removals,
        }
    }

    /// Clean a list of sibling nodes. Comments are dropped and adjacent
    /// text nodes are merged.
    pub fn clean_nodes(&self, nodes: Vec<Node>, removals: &mut Vec<Removal>) -> Vec<Node> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.clean_node(node, &mut out, removals);
        }
        out
    }

    /// Check whether `attr` would survive cleaning on a `tag` element
    pub fn allows_attribute(&self, tag: &str, attr: &Attribute) -> bool {
        self.registry
            .rules()
            .iter()
            .all(|rule| rule.check_attribute(tag, attr) == AttributeVerdict::Keep)
    }

    fn clean_node(&self, node: Node, out: &mut Vec<Node>, removals: &mut Vec<Removal>) {
        match node {
            Node::Text { content } => push_text(out, content),
            Node::Comment { .. } => {}
            Node::Element(element) => match self.element_verdict(&element) {
                (ElementVerdict::Keep, _) => out.push(Node::Element(self.clean_element(element, removals))),
                (ElementVerdict::Unwrap(message), rule) => {
                    tracing::debug!(rule, tag = %element.tag, "unwrapping element");
                    removals.push(Removal::element(rule, &element.tag, message));
                    for child in element.children {
                        self.clean_node(child, out, removals);
                    }
                }
                (ElementVerdict::Drop(message), rule) => {
                    tracing::debug!(rule, tag = %element.tag, "dropping element");
                    removals.push(Removal::element(rule, &element.tag, message));
                }
            },
        }
    }

    /// The strongest verdict across all rules: drop beats unwrap beats keep
    fn element_verdict(&self, element: &Element) -> (ElementVerdict, &'static str) {
        let mut verdict = (ElementVerdict::Keep, "");
        for rule in self.registry.rules() {
            match rule.check_element(element) {
                ElementVerdict::Keep => {}
                dropped @ ElementVerdict::Drop(_) => return (dropped, rule.name()),
                unwrapped @ ElementVerdict::Unwrap(_) => {
                    if verdict.0 == ElementVerdict::Keep {
                        verdict = (unwrapped, rule.name());
                    }
                }
            }
        }
        verdict
    }

    fn clean_element(&self, mut element: Element, removals: &mut Vec<Removal>) -> Element {
        let tag = element.tag.clone();
        element.attributes.retain(|attr| {
            for rule in self.registry.rules() {
                if let AttributeVerdict::Remove(message) = rule.check_attribute(&tag, attr) {
                    tracing::debug!(rule = rule.name(), tag = %tag, attribute = %attr.name, "removing attribute");
                    removals.push(Removal::attribute(rule.name(), &tag, &attr.name, message));
                    return false;
                }
            }
            true
        });

        let children = std::mem::take(&mut element.children);
        element.children = self.clean_nodes(children, removals);
        element
    }
}

fn push_text(out: &mut Vec<Node>, content: String) {
    if content.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(Node::Text { content: previous }) => previous.push_str(&content),
        _ => out.push(Node::Text { content }),
    }
}

/// Sanitize markup with the built-in rules
pub fn sanitize(raw: &str) -> String {
    Sanitizer::new().sanitize(raw)
}

/// Sanitize markup with the built-in rules and report removals
pub fn sanitize_with_report(raw: &str) -> Sanitized {
    Sanitizer::new().sanitize_with_report(raw)
}
