/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Descent primitives: the only way configuration state is written.
//!
//! A [`Cursor`] owns a position in a [`ConfigTree`] together with the
//! [`Path`] that leads to it.  Every descent advances both in one call, so
//! the tree and the path cannot drift apart no matter how many independent
//! call sites compose configuration into the same tree.
//!
//! ```rust,ignore
//! let update = tree
//!     .cursor("192.168.0.2")
//!     .by_namespace("interfaces", IETF_INTERFACES_NS)?
//!     .by_1_key("", "interface", "name", "sw0p1")?
//!     .by_namespace("bridge-port", DOT1Q_BRIDGE_NS)?
//!     .by_name("pvid")?
//!     .set(TypedValue::Uint(1))?;
//! ```
//!
//! Descents are get-or-create: repeating the same descent returns the node
//! that already exists, and only a new (name, keys) combination adds a
//! sibling.

use crate::update::{TypedValue, Update};

use super::{ConfigTree, NodeId, Path, PathSegment, Selector, TreeError, NAMESPACE_KEY};

/// A position in a [`ConfigTree`] plus the path that reaches it.
///
/// Descent methods consume the cursor and return the advanced one, so a
/// chain reads top-down.  Use [`fork`](Self::fork) to write several leaves
/// below a shared anchor.
#[derive(Debug)]
pub struct Cursor<'t> {
    tree: &'t mut ConfigTree,
    node: NodeId,
    path: Path,
    target: String,
}

impl<'t> Cursor<'t> {
    pub(crate) fn new(tree: &'t mut ConfigTree, node: NodeId, target: String) -> Self {
        Self {
            tree,
            node,
            path: Path::new(),
            target,
        }
    }

    // ── Descents ──────────────────────────────────────────────────────────────

    /// Child `name`; appends `name`.
    pub fn by_name(self, name: &str) -> Result<Self, TreeError> {
        self.descend(Selector::Name(name), PathSegment::new(name))
    }

    /// Child `name` in `namespace`; appends `name[namespace=…]`.
    pub fn by_namespace(self, name: &str, namespace: &str) -> Result<Self, TreeError> {
        self.descend(
            Selector::Namespace { name, namespace },
            PathSegment::new(name).with_key(NAMESPACE_KEY, namespace),
        )
    }

    /// List entry with one key.  See [`by_keys`](Self::by_keys).
    pub fn by_1_key(self, table: &str, entry: &str, k1: &str, v1: &str) -> Result<Self, TreeError> {
        self.by_keys(table, entry, &[(k1, v1)])
    }

    /// List entry with two keys.  See [`by_keys`](Self::by_keys).
    pub fn by_2_keys(
        self,
        table: &str,
        entry: &str,
        k1: &str,
        v1: &str,
        k2: &str,
        v2: &str,
    ) -> Result<Self, TreeError> {
        self.by_keys(table, entry, &[(k1, v1), (k2, v2)])
    }

    /// List entry with three keys.  See [`by_keys`](Self::by_keys).
    #[allow(clippy::too_many_arguments)]
    pub fn by_3_keys(
        self,
        table: &str,
        entry: &str,
        k1: &str,
        v1: &str,
        k2: &str,
        v2: &str,
        k3: &str,
        v3: &str,
    ) -> Result<Self, TreeError> {
        self.by_keys(table, entry, &[(k1, v1), (k2, v2), (k3, v3)])
    }

    /// List entry `entry` whose key leaves match every pair in `keys`.
    ///
    /// With a non-empty `table` the entry lives inside the container `table`
    /// and the appended segment is `table[k=v]…`; with an empty `table` the
    /// entry is a direct child and the segment is `entry[k=v]…`.  Either way
    /// exactly one segment is appended.
    pub fn by_keys(mut self, table: &str, entry: &str, keys: &[(&str, &str)]) -> Result<Self, TreeError> {
        let container = if table.is_empty() {
            self.node
        } else {
            self.tree.find_or_insert(self.node, Selector::Name(table))?
        };
        self.node = self
            .tree
            .find_or_insert(container, Selector::Keys { entry, keys })?;

        let segment_name = if table.is_empty() { entry } else { table };
        let segment = keys
            .iter()
            .fold(PathSegment::new(segment_name), |seg, &(k, v)| seg.with_key(k, v));
        self.path.push(segment);
        Ok(self)
    }

    fn descend(mut self, selector: Selector<'_>, segment: PathSegment) -> Result<Self, TreeError> {
        self.node = self.tree.find_or_insert(self.node, selector)?;
        self.path.push(segment);
        Ok(self)
    }

    // ── Branching ─────────────────────────────────────────────────────────────

    /// A second cursor at the same position, borrowing this one.
    pub fn fork(&mut self) -> Cursor<'_> {
        Cursor {
            tree: &mut *self.tree,
            node: self.node,
            path: self.path.clone(),
            target: self.target.clone(),
        }
    }

    // ── Leaf write ────────────────────────────────────────────────────────────

    /// Writes `value` to the current node and returns the matching update.
    pub fn set(self, value: TypedValue) -> Result<Update, TreeError> {
        self.tree.set_value(self.node, value.render())?;
        Ok(Update::new(self.path, self.target, value))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Read access to the underlying tree.
    pub fn tree(&self) -> &ConfigTree {
        &*self.tree
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
