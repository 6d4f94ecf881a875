use serde::{Deserialize, Serialize};

/// Elements that never have children or an end tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is emitted verbatim
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose content is text only, but entity-decoded
pub const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// A single attribute. Names are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Node in the element tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Element(Element),
    Text { content: String },
    Comment { content: String },
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// HTML element with ordered, unique attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(mut self, content: impl Into<String>) -> Self {
        self.children.push(Node::text(content));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
    }

    /// Set an attribute, replacing its value in place if it already exists
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|attr| attr.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    pub fn is_void(&self) -> bool {
        is_void_element(&self.tag)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn node_at(&self, path: &NodePath) -> Option<&Node> {
        let (last, parents) = path.0.split_last()?;
        let mut current = self;
        for index in parents {
            current = current.children.get(*index)?.as_element()?;
        }
        current.children.get(*last)
    }

    /// Resolve a path to an element. The empty path is `self`.
    pub fn element_at(&self, path: &NodePath) -> Option<&Element> {
        if path.is_root() {
            return Some(self);
        }
        self.node_at(path)?.as_element()
    }

    pub fn element_at_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        let mut current = self;
        for index in &path.0 {
            current = current.children.get_mut(*index)?.as_element_mut()?;
        }
        Some(current)
    }

    /// Detach the node at `path`. The root itself cannot be removed.
    pub fn remove_at(&mut self, path: &NodePath) -> Option<Node> {
        let parent_path = path.parent()?;
        let index = *path.0.last()?;
        let parent = self.element_at_mut(&parent_path)?;
        if index < parent.children.len() {
            Some(parent.children.remove(index))
        } else {
            None
        }
    }

    /// Path of the first element (pre-order, `self` included) matching `predicate`
    pub fn find_path(&self, predicate: impl Fn(&Element) -> bool) -> Option<NodePath> {
        fn walk(
            element: &Element,
            path: &mut Vec<usize>,
            predicate: &dyn Fn(&Element) -> bool,
        ) -> bool {
            if predicate(element) {
                return true;
            }
            for (index, child) in element.children.iter().enumerate() {
                if let Node::Element(child) = child {
                    path.push(index);
                    if walk(child, path, predicate) {
                        return true;
                    }
                    path.pop();
                }
            }
            false
        }

        let mut path = Vec::new();
        walk(self, &mut path, &predicate).then(|| NodePath(path))
    }

    /// Pre-order visit of `self` and every descendant element
    pub fn walk(&self, visit: &mut impl FnMut(&Element)) {
        visit(self);
        for child in self.child_elements() {
            child.walk(visit);
        }
    }

    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        visit(self);
        for child in &mut self.children {
            if let Node::Element(child) = child {
                child.walk_mut(visit);
            }
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text { content } => out.push_str(content),
            Node::Element(element) => collect_text(&element.children, out),
            Node::Comment { .. } => {}
        }
    }
}

/// Child-index path from a root element to a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn parent(&self) -> Option<NodePath> {
        let (_, parent) = self.0.split_last()?;
        Some(NodePath(parent.to_vec()))
    }

    pub fn child(&self, index: usize) -> NodePath {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    /// This path followed by each ancestor up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = NodePath> + '_ {
        (0..=self.0.len())
            .rev()
            .map(move |len| NodePath(self.0[..len].to_vec()))
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// Complete HTML document. `head` and `body` always exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub doctype: Option<String>,
    pub html_attributes: Vec<Attribute>,
    pub head: Element,
    pub body: Element,
}

impl Document {
    pub fn new() -> Self {
        Self {
            doctype: None,
            html_attributes: Vec::new(),
            head: Element::new("head"),
            body: Element::new("body"),
        }
    }

    /// Empty document whose body holds `children`
    pub fn with_body(children: Vec<Node>) -> Self {
        let mut doc = Self::new();
        doc.body.children = children;
        doc
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("body")
            .with_child(
                Element::new("div")
                    .with_attr("data-id", "el-1")
                    .with_text("Hello ")
                    .with_child(Element::new("strong").with_text("world")),
            )
            .with_child(Element::new("img").with_attr("src", "a.png"))
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut el = Element::new("DIV").with_attr("class", "a").with_attr("style", "x");
        el.set_attr("class", "b");

        assert_eq!(el.tag, "div");
        assert_eq!(el.attributes[0], Attribute::new("class", "b"));
        assert_eq!(el.attributes.len(), 2);
    }

    #[test]
    fn test_path_resolution() {
        let body = sample();

        let strong = body.element_at(&NodePath(vec![0, 1])).unwrap();
        assert_eq!(strong.tag, "strong");

        // Text nodes are not elements
        assert!(body.element_at(&NodePath(vec![0, 0])).is_none());
        assert!(body.node_at(&NodePath(vec![0, 0])).is_some());

        assert_eq!(body.element_at(&NodePath::root()).unwrap().tag, "body");
        assert!(body.element_at(&NodePath(vec![7])).is_none());
    }

    #[test]
    fn test_ancestors_include_self_and_root() {
        let path = NodePath(vec![2, 0, 1]);
        let chain: Vec<_> = path.ancestors().collect();

        assert_eq!(
            chain,
            vec![
                NodePath(vec![2, 0, 1]),
                NodePath(vec![2, 0]),
                NodePath(vec![2]),
                NodePath::root(),
            ]
        );
    }

    #[test]
    fn test_find_path_and_remove() {
        let mut body = sample();
        let path = body.find_path(|el| el.attr("data-id") == Some("el-1")).unwrap();
        assert_eq!(path, NodePath(vec![0]));

        let removed = body.remove_at(&path).unwrap();
        assert_eq!(removed.as_element().unwrap().text_content(), "Hello world");
        assert_eq!(body.children.len(), 1);

        assert!(body.remove_at(&NodePath::root()).is_none());
    }

    #[test]
    fn test_walk_is_pre_order() {
        let body = sample();
        let mut tags = Vec::new();
        body.walk(&mut |el| tags.push(el.tag.clone()));

        assert_eq!(tags, vec!["body", "div", "strong", "img"]);
    }
}
