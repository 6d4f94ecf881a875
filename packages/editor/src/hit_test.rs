//! Click hit-testing and the selection outline

use crate::identity::IDENTITY_ATTR;
use poster_parser::ast::{Element, Node, NodePath};
use poster_parser::StyleDeclarations;

/// Path of the element an event target stands for: the node itself, or its
/// parent when the target is a text or comment node
pub fn target_element(root: &Element, target: &NodePath) -> Option<NodePath> {
    match root.node_at(target) {
        Some(Node::Element(_)) => Some(target.clone()),
        Some(_) => target.parent(),
        None if target.is_root() => Some(NodePath::root()),
        None => None,
    }
}

/// Nearest element at or above `target` that carries an identity
pub fn nearest_identified(root: &Element, target: &NodePath) -> Option<(NodePath, String)> {
    let start = target_element(root, target)?;
    let found = start.ancestors().find_map(|path| {
        let id = root.element_at(&path)?.attr(IDENTITY_ATTR)?;
        Some((path, id.to_string()))
    });
    found
}

/// Clear the outline of every identified element, then outline the element
/// with identity `selected`
pub fn apply_outline(root: &mut Element, selected: Option<&str>, outline: &str) {
    root.walk_mut(&mut |el| {
        let Some(id) = el.attr(IDENTITY_ATTR) else {
            return;
        };
        let is_selected = selected == Some(id);

        let mut style = StyleDeclarations::parse(el.attr("style").unwrap_or_default());
        if is_selected {
            style.set("outline", outline);
        } else if style.remove("outline").is_none() {
            return;
        }
        write_style(el, &style);
    });
}

/// Write declarations back to the `style` attribute, dropping it when empty
pub fn write_style(element: &mut Element, style: &StyleDeclarations) {
    if style.is_empty() {
        element.remove_attr("style");
    } else {
        element.set_attr("style", style.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poster_parser::parse_fragment;

    fn body(html: &str) -> Element {
        let mut body = Element::new("body");
        body.children = parse_fragment(html);
        body
    }

    #[test]
    fn test_text_target_resolves_to_parent() {
        let root = body(r#"<p data-id="el-1">Up to <strong>50%</strong></p>"#);

        let hit = nearest_identified(&root, &NodePath(vec![0, 0])).unwrap();
        assert_eq!(hit, (NodePath(vec![0]), "el-1".to_string()));
    }

    #[test]
    fn test_ascends_to_identified_ancestor() {
        let root = body(r#"<div data-id="el-1"><p>Up to <strong>50%</strong></p></div>"#);

        let hit = nearest_identified(&root, &NodePath(vec![0, 0, 1, 0])).unwrap();
        assert_eq!(hit.1, "el-1");
    }

    #[test]
    fn test_no_identified_ancestor() {
        let root = body("<div><p>x</p></div>");

        assert!(nearest_identified(&root, &NodePath(vec![0, 0])).is_none());
        assert!(nearest_identified(&root, &NodePath(vec![9])).is_none());
    }

    #[test]
    fn test_outline_moves_between_elements() {
        let mut root = body(
            r#"<h1 data-id="a" style="top: 1px; outline: 1px solid red">x</h1><p data-id="b">y</p>"#,
        );

        apply_outline(&mut root, Some("b"), "3px solid blue");

        let h1 = root.element_at(&NodePath(vec![0])).unwrap();
        let p = root.element_at(&NodePath(vec![1])).unwrap();
        assert_eq!(h1.attr("style"), Some("top: 1px;"));
        assert_eq!(p.attr("style"), Some("outline: 3px solid blue;"));

        apply_outline(&mut root, None, "3px solid blue");
        let p = root.element_at(&NodePath(vec![1])).unwrap();
        assert_eq!(p.attr("style"), None);
    }
}
