//! Handles the core keeps for engine objects it built.

use std::collections::BTreeMap;

/// One built entity: its engine object plus the nodes built for its components.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<H> {
    /// Entity key for roots, component name (or a positional label) below.
    pub label: String,
    /// The object that represents the whole entity: a container when the entity
    /// has components or no primitive, the primitive itself otherwise.
    pub handle: H,
    /// Shape or text object, when the entity draws one.
    pub primitive: Option<H>,
    pub children: Vec<Node<H>>,
}

impl<H: Copy + Eq> Node<H> {
    /// Every handle in this subtree, outermost first.
    pub fn handles(&self) -> Vec<H> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect(&self, out: &mut Vec<H>) {
        out.push(self.handle);
        if let Some(p) = self.primitive.filter(|p| *p != self.handle) {
            out.push(p);
        }
        for child in &self.children {
            child.collect(out);
        }
    }
}

/// Root entity name → built node.
///
/// Only root entities are registered here; their components live inside the
/// root node and are never addressed on their own.
#[derive(Debug, Clone)]
pub struct SceneGraph<H> {
    roots: BTreeMap<String, Node<H>>,
}

impl<H> Default for SceneGraph<H> {
    fn default() -> Self {
        Self { roots: BTreeMap::new() }
    }
}

impl<H: Copy> SceneGraph<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `node` under its label, returning any node it displaced.
    pub fn insert(&mut self, node: Node<H>) -> Option<Node<H>> {
        self.roots.insert(node.label.clone(), node)
    }

    pub fn get(&self, name: &str) -> Option<&Node<H>> {
        self.roots.get(name)
    }

    /// Top-level handle for the root entity `name`.
    pub fn handle(&self, name: &str) -> Option<H> {
        self.roots.get(name).map(|n| n.handle)
    }

    pub fn remove(&mut self, name: &str) -> Option<Node<H>> {
        self.roots.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.roots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node<H>)> {
        self.roots.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Empties the graph, yielding every node.
    pub fn drain(&mut self) -> impl Iterator<Item = Node<H>> {
        std::mem::take(&mut self.roots).into_values()
    }
}
