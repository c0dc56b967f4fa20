//! Attribute tree
//!
//! Maps hierarchical paths to dense quarks. Node 0 is the root (the empty
//! path); every other node is created the first time a child name is
//! requested under its parent.
//!
//! # Performance
//!
//! - child lookup: O(1) via FxHashMap per node
//! - path reconstruction: O(depth)

use rustc_hash::FxHashMap;
use tracestate_core::{AttributePath, Quark, StoreError, StoreResult};

#[derive(Debug)]
struct Node {
    name: String,
    parent: Option<Quark>,
    children: FxHashMap<String, Quark>,
}

impl Node {
    fn new(name: String, parent: Option<Quark>) -> Self {
        Self {
            name,
            parent,
            children: FxHashMap::default(),
        }
    }
}

/// Path → quark allocator
#[derive(Debug)]
pub struct AttributeTree {
    nodes: Vec<Node>,
}

impl AttributeTree {
    /// Create a tree holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(String::new(), None)],
        }
    }

    /// Number of quarks allocated, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is allocated on construction
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if `quark` was allocated by this tree
    pub fn contains(&self, quark: Quark) -> bool {
        quark.index() < self.nodes.len()
    }

    /// Get or create the child `name` under `parent`
    pub fn child(&mut self, parent: Quark, name: &str) -> StoreResult<Quark> {
        let node = self
            .nodes
            .get(parent.index())
            .ok_or(StoreError::UnknownQuark(parent))?;
        if let Some(&quark) = node.children.get(name) {
            return Ok(quark);
        }

        let allocated = self.nodes.len();
        let quark = Quark::from_index(allocated)
            .ok_or(StoreError::QuarkSpaceExhausted { allocated })?;
        self.nodes.push(Node::new(name.to_string(), Some(parent)));
        self.nodes[parent.index()]
            .children
            .insert(name.to_string(), quark);
        Ok(quark)
    }

    /// Look up a child without creating it
    pub fn find_child(&self, parent: Quark, name: &str) -> Option<Quark> {
        self.nodes
            .get(parent.index())
            .and_then(|node| node.children.get(name).copied())
    }

    /// Look up a full path without creating anything
    pub fn find(&self, path: &AttributePath) -> Option<Quark> {
        path.segments()
            .iter()
            .try_fold(Quark::ROOT, |parent, segment| {
                self.find_child(parent, segment)
            })
    }

    /// Parent of `quark`, `None` for the root or unknown quarks
    pub fn parent(&self, quark: Quark) -> Option<Quark> {
        self.nodes.get(quark.index()).and_then(|node| node.parent)
    }

    /// Children of `quark`, sorted by name
    pub fn children(&self, quark: Quark) -> Vec<(String, Quark)> {
        let mut children: Vec<(String, Quark)> = self
            .nodes
            .get(quark.index())
            .map(|node| {
                node.children
                    .iter()
                    .map(|(name, q)| (name.clone(), *q))
                    .collect()
            })
            .unwrap_or_default();
        children.sort();
        children
    }

    /// Rebuild the full path of `quark`
    pub fn path_of(&self, quark: Quark) -> Option<AttributePath> {
        if !self.contains(quark) {
            return None;
        }
        let mut names = Vec::new();
        let mut cursor = quark;
        while let Some(parent) = self.nodes[cursor.index()].parent {
            names.push(self.nodes[cursor.index()].name.as_str());
            cursor = parent;
        }
        Some(names.into_iter().rev().collect())
    }
}

impl Default for AttributeTree {
    fn default() -> Self {
        Self::new()
    }
}
