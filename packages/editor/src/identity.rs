//! Element identity assignment
//!
//! Every element in the editable tree carries a `data-id` attribute. Other
//! subsystems address elements only through it.

use poster_parser::ast::Element;
use std::collections::HashSet;

/// Attribute holding an element's identity
pub const IDENTITY_ATTR: &str = "data-id";

const PREFIX: &str = "el-";

/// Hands out `el-N` identities, skipping values already in use
pub struct IdGenerator {
    counter: usize,
    used: HashSet<String>,
}

impl IdGenerator {
    /// Start at `el-0`, avoiding every identity already present under `root`
    pub fn for_tree(root: &Element) -> Self {
        let mut used = HashSet::new();
        root.walk(&mut |el| {
            if let Some(id) = el.attr(IDENTITY_ATTR) {
                used.insert(id.to_string());
            }
        });
        Self { counter: 0, used }
    }

    pub fn next_id(&mut self) -> String {
        loop {
            let candidate = format!("{}{}", PREFIX, self.counter);
            self.counter += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// Assign identities in pre-order to `root` and every descendant element
/// lacking one. Existing identities are kept; a repeated identity keeps its
/// first (pre-order) holder and the later holders get fresh ones.
///
/// Returns the number of identities assigned.
pub fn assign_identities(root: &mut Element) -> usize {
    let mut generator = IdGenerator::for_tree(root);
    let mut seen = HashSet::new();
    let mut assigned = 0;

    root.walk_mut(&mut |el| {
        let keep = match el.attr(IDENTITY_ATTR) {
            Some(id) if !id.is_empty() => seen.insert(id.to_string()),
            _ => false,
        };
        if !keep {
            let id = generator.next_id();
            seen.insert(id.clone());
            el.set_attr(IDENTITY_ATTR, id);
            assigned += 1;
        }
    });

    if assigned > 0 {
        tracing::debug!(assigned, "assigned element identities");
    }
    assigned
}

/// Next identity not used anywhere under `root`
pub fn next_free_id(root: &Element) -> String {
    IdGenerator::for_tree(root).next_id()
}
