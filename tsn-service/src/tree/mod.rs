/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! In-memory configuration document.
//!
//! [`ConfigTree`] is an arena of [`ConfigNode`]s addressed by [`NodeId`].
//! Children are owned by the arena; the `parent` link is a plain index used
//! only for upward lookups (closest namespace, key values of enclosing list
//! entries).
//!
//! ```text
//! data
//! └── interfaces {urn:ietf:params:xml:ns:yang:ietf-interfaces}
//!     └── interface
//!         ├── name = "sw0p1"                 ← key leaf
//!         └── bridge-port {urn:ieee:std:802.1Q:yang:ieee802-dot1q-bridge}
//!             └── pvid = "1"
//! ```
//!
//! List entries store their keys as leaf children, the way they appear in the
//! document itself.  The reserved key `"namespace"` is stored on the node.
//!
//! The tree is never mutated directly by table code: all writes go through a
//! [`Cursor`], which extends the matching [`Path`] in the same call.

pub mod cursor;
pub mod path;

pub use cursor::Cursor;
pub use path::{Path, PathSegment, NAMESPACE_KEY};

use thiserror::Error;

/// Name given to the document root.
pub const ROOT_NAME: &str = "data";

// ── Errors ────────────────────────────────────────────────────────────────────

/// Structural violations of the configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("configuration node names must not be empty")]
    EmptyName,

    /// A child was about to be added below a node that already holds a value.
    #[error("'{leaf}' holds the value '{value}' and cannot have the child '{child}'")]
    LeafHasValue {
        leaf: String,
        value: String,
        child: String,
    },

    /// A value was about to be written to a node that has children.
    #[error("'{node}' has children and cannot hold a value")]
    NotALeaf { node: String },
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// Index of a node inside its [`ConfigTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One node of the configuration document.
#[derive(Debug, Clone)]
pub struct ConfigNode {
    name: String,
    namespace: Option<String>,
    value: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl ConfigNode {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            namespace: None,
            value: None,
            children: Vec::new(),
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Children in first-write order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// ── Selector ──────────────────────────────────────────────────────────────────

/// How a child is identified among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// First child with this name.
    Name(&'a str),

    /// First child with this name *and* this namespace.
    Namespace { name: &'a str, namespace: &'a str },

    /// First list entry with this name whose key leaves match every pair.
    Keys {
        entry: &'a str,
        keys: &'a [(&'a str, &'a str)],
    },
}

impl Selector<'_> {
    fn name(&self) -> &str {
        match self {
            Selector::Name(name) => name,
            Selector::Namespace { name, .. } => name,
            Selector::Keys { entry, .. } => entry,
        }
    }
}

// ── ConfigTree ────────────────────────────────────────────────────────────────

/// Arena-backed configuration document, created fresh per request.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    nodes: Vec<ConfigNode>,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    /// Creates a tree holding only the [`ROOT_NAME`] node.
    pub fn new() -> Self {
        Self {
            nodes: vec![ConfigNode::new(ROOT_NAME, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included, so never below 1.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    /// Panics if `id` was issued by a different tree and is out of bounds.
    pub fn node(&self, id: NodeId) -> &ConfigNode {
        &self.nodes[id.0]
    }

    /// Starts a descent at the root.  Updates produced through the cursor
    /// are addressed to `target` (the device address).
    pub fn cursor(&mut self, target: impl Into<String>) -> Cursor<'_> {
        let root = self.root();
        Cursor::new(self, root, target.into())
    }

    // ── Read-only lookups ─────────────────────────────────────────────────────

    /// Finds the first child of `parent` matching `selector`.
    pub fn find(&self, parent: NodeId, selector: Selector<'_>) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&child| self.matches(child, selector))
    }

    /// Finds a list entry, optionally inside the table container `table`.
    ///
    /// An empty `table` searches the children of `parent` directly.
    pub fn find_entry(
        &self,
        parent: NodeId,
        table: &str,
        entry: &str,
        keys: &[(&str, &str)],
    ) -> Option<NodeId> {
        let container = if table.is_empty() {
            parent
        } else {
            self.find(parent, Selector::Name(table))?
        };
        self.find(container, Selector::Keys { entry, keys })
    }

    /// Follows a chain of selectors from `start`; `None` on the first miss.
    pub fn lookup(&self, start: NodeId, selectors: &[Selector<'_>]) -> Option<NodeId> {
        selectors
            .iter()
            .try_fold(start, |node, &selector| self.find(node, selector))
    }

    /// All children of `parent` named `name`, in document order.
    pub fn all_instances(&self, parent: NodeId, name: &str) -> Vec<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .filter(|&child| self.node(child).name == name)
            .collect()
    }

    /// The value of key leaf `key` for every `entry` below `parent`.
    pub fn key_values(&self, parent: NodeId, entry: &str, key: &str) -> Vec<&str> {
        self.all_instances(parent, entry)
            .into_iter()
            .filter_map(|e| self.leaf_value(e, key))
            .collect()
    }

    /// `true` if `parent` has a child named `name`.
    pub fn has_child(&self, parent: NodeId, name: &str) -> bool {
        self.find(parent, Selector::Name(name)).is_some()
    }

    /// Namespace of `id` or of its closest namespaced ancestor.
    pub fn closest_namespace(&self, id: NodeId) -> Option<&str> {
        self.ancestors(id)
            .find_map(|node| self.node(node).namespace.as_deref())
    }

    /// Value of the key leaf `key` on `id` or its closest ancestor that has
    /// one.  Used to recover list keys (e.g. the interface name) from deep
    /// inside an entry.
    pub fn key_value_in_ancestors(&self, id: NodeId, key: &str) -> Option<&str> {
        self.ancestors(id).find_map(|node| self.leaf_value(node, key))
    }

    /// `id` followed by its parents up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&node| self.node(node).parent)
    }

    fn leaf_value(&self, parent: NodeId, name: &str) -> Option<&str> {
        self.node(parent)
            .children
            .iter()
            .map(|&child| self.node(child))
            .find(|child| child.name == name && child.children.is_empty())
            .and_then(|child| child.value.as_deref())
    }

    fn matches(&self, id: NodeId, selector: Selector<'_>) -> bool {
        let node = self.node(id);
        match selector {
            Selector::Name(name) => node.name == name,
            Selector::Namespace { name, namespace } => {
                node.name == name && node.namespace.as_deref() == Some(namespace)
            }
            Selector::Keys { entry, keys } => {
                node.name == entry
                    && keys.iter().all(|&(key, value)| {
                        if key == NAMESPACE_KEY {
                            node.namespace.as_deref() == Some(value)
                        } else {
                            self.leaf_value(id, key) == Some(value)
                        }
                    })
            }
        }
    }

    // ── Mutation (crate-internal, driven by Cursor) ───────────────────────────

    /// Returns the child matching `selector`, creating it (with its key
    /// leaves) if no sibling matches.
    pub(crate) fn find_or_insert(
        &mut self,
        parent: NodeId,
        selector: Selector<'_>,
    ) -> Result<NodeId, TreeError> {
        if let Some(existing) = self.find(parent, selector) {
            return Ok(existing);
        }

        let child = self.insert_child(parent, selector.name())?;
        match selector {
            Selector::Name(_) => {}
            Selector::Namespace { namespace, .. } => {
                self.nodes[child.0].namespace = Some(namespace.to_string());
            }
            Selector::Keys { keys, .. } => {
                for &(key, value) in keys {
                    if key == NAMESPACE_KEY {
                        self.nodes[child.0].namespace = Some(value.to_string());
                    } else {
                        let leaf = self.insert_child(child, key)?;
                        self.nodes[leaf.0].value = Some(value.to_string());
                    }
                }
            }
        }
        Ok(child)
    }

    /// Writes a scalar to `id`, enforcing leaf exclusivity.
    pub(crate) fn set_value(&mut self, id: NodeId, value: String) -> Result<(), TreeError> {
        let node = &mut self.nodes[id.0];
        if !node.children.is_empty() {
            return Err(TreeError::NotALeaf {
                node: node.name.clone(),
            });
        }
        node.value = Some(value);
        Ok(())
    }

    fn insert_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        if name.is_empty() {
            return Err(TreeError::EmptyName);
        }
        let parent_node = &self.nodes[parent.0];
        if let Some(value) = &parent_node.value {
            return Err(TreeError::LeafHasValue {
                leaf: parent_node.name.clone(),
                value: value.clone(),
                child: name.to_string(),
            });
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(ConfigNode::new(name, Some(parent)));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const IF_NS: &str = "urn:ietf:params:xml:ns:yang:ietf-interfaces";

    fn interface(tree: &mut ConfigTree, port: &str) -> NodeId {
        let root = tree.root();
        let ifs = tree
            .find_or_insert(
                root,
                Selector::Namespace {
                    name: "interfaces",
                    namespace: IF_NS,
                },
            )
            .unwrap();
        tree.find_or_insert(
            ifs,
            Selector::Keys {
                entry: "interface",
                keys: &[("name", port)],
            },
        )
        .unwrap()
    }

    // ── Insertion ─────────────────────────────────────────────────────────────

    #[test]
    fn new_tree_has_only_the_root() {
        let tree = ConfigTree::new();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.node(tree.root()).name(), ROOT_NAME);
        assert!(tree.node(tree.root()).parent().is_none());
    }

    #[test]
    fn find_or_insert_is_idempotent() {
        let mut tree = ConfigTree::new();
        let a = interface(&mut tree, "p1");
        let b = interface(&mut tree, "p1");
        assert_eq!(a, b);

        let ifs = tree.node(a).parent().unwrap();
        assert_eq!(tree.all_instances(ifs, "interface").len(), 1);
    }

    #[test]
    fn key_leaves_are_stored_as_children() {
        let mut tree = ConfigTree::new();
        let entry = interface(&mut tree, "p1");
        let key_leaf = tree.find(entry, Selector::Name("name")).unwrap();
        assert_eq!(tree.node(key_leaf).value(), Some("p1"));
    }

    #[test]
    fn namespace_selector_requires_equal_namespace() {
        let mut tree = ConfigTree::new();
        interface(&mut tree, "p1");
        let root = tree.root();
        assert!(tree
            .find(
                root,
                Selector::Namespace {
                    name: "interfaces",
                    namespace: "urn:other"
                }
            )
            .is_none());
        assert!(tree.find(root, Selector::Name("interfaces")).is_some());
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let err = tree.find_or_insert(root, Selector::Name("")).unwrap_err();
        assert_eq!(err, TreeError::EmptyName);
    }

    // ── Leaf exclusivity ──────────────────────────────────────────────────────

    #[test]
    fn value_cannot_be_written_to_a_node_with_children() {
        let mut tree = ConfigTree::new();
        let entry = interface(&mut tree, "p1");
        let err = tree.set_value(entry, "x".into()).unwrap_err();
        assert!(matches!(err, TreeError::NotALeaf { .. }));
    }

    #[test]
    fn child_cannot_be_added_below_a_valued_leaf() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let leaf = tree.find_or_insert(root, Selector::Name("pvid")).unwrap();
        tree.set_value(leaf, "1".into()).unwrap();

        let err = tree
            .find_or_insert(leaf, Selector::Name("nested"))
            .unwrap_err();
        assert!(matches!(err, TreeError::LeafHasValue { .. }));
    }

    // ── Lookups ───────────────────────────────────────────────────────────────

    #[test]
    fn find_entry_requires_all_keys_to_match() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        tree.find_or_insert(
            root,
            Selector::Keys {
                entry: "priority-map",
                keys: &[("priority", "1"), ("dei", "false")],
            },
        )
        .unwrap();

        assert!(tree
            .find_entry(root, "", "priority-map", &[("priority", "1"), ("dei", "false")])
            .is_some());
        assert!(tree
            .find_entry(root, "", "priority-map", &[("priority", "1"), ("dei", "true")])
            .is_none());
    }

    #[test]
    fn lookup_misses_are_none_not_placeholder_nodes() {
        let mut tree = ConfigTree::new();
        interface(&mut tree, "p1");
        let root = tree.root();
        let before = tree.node_count();

        let miss = tree.lookup(
            root,
            &[
                Selector::Name("interfaces"),
                Selector::Keys {
                    entry: "interface",
                    keys: &[("name", "p9")],
                },
            ],
        );
        assert!(miss.is_none());
        assert_eq!(tree.node_count(), before, "read-only lookups must not insert");
    }

    #[test]
    fn key_values_lists_every_entry() {
        let mut tree = ConfigTree::new();
        interface(&mut tree, "p1");
        interface(&mut tree, "p2");
        let ifs = tree.find(tree.root(), Selector::Name("interfaces")).unwrap();
        assert_eq!(tree.key_values(ifs, "interface", "name"), vec!["p1", "p2"]);
    }

    #[test]
    fn upward_lookups_walk_the_parent_chain() {
        let mut tree = ConfigTree::new();
        let entry = interface(&mut tree, "p1");
        let deep = tree
            .find_or_insert(entry, Selector::Name("bridge-port"))
            .unwrap();

        assert_eq!(tree.closest_namespace(deep), Some(IF_NS));
        assert_eq!(tree.key_value_in_ancestors(deep, "name"), Some("p1"));
        assert_eq!(tree.key_value_in_ancestors(deep, "vid"), None);
        assert!(tree.closest_namespace(tree.root()).is_none());
    }
}
