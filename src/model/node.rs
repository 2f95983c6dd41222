//! Node module for the array tree representation.

use crate::model::tree::{NodeId, NodeIndex};

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// A node stored in an [ArrayTree](crate::model::ArrayTree) arena.
///
/// A node is either:
/// - **Leaf**: no children, `id` is the 0-based leaf id (textual label − 1)
/// - **Internal**: at least one child, `id` is in `[num_leaves, size)`
///
/// # Invariants
/// - `children` hold arena indices (not ids), in left-to-right textual order
/// - Leaves have no children, internal nodes have at least one
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Node {
    /// Semantic id of this node
    id: NodeId,
    /// Arena indices of the children, left to right
    children: Vec<NodeIndex>,
}

impl Node {
    /// Creates a new node without children.
    ///
    /// This is a leaf, or an internal node of a preorder arena that receives
    /// its children via [`set_children`](Self::set_children) once its group closes.
    ///
    /// # Arguments
    /// * `id` - The semantic id
    pub(crate) fn new(id: NodeId) -> Self {
        Node {
            id,
            children: Vec::new(),
        }
    }

    /// Creates a new internal node.
    ///
    /// # Arguments
    /// * `id` - The internal id, at least the number of leaves of the tree
    /// * `children` - Arena indices of the children, left to right
    pub(crate) fn new_internal(id: NodeId, children: Vec<NodeIndex>) -> Self {
        debug_assert!(!children.is_empty());
        Node { id, children }
    }

    /// Attaches the children of an internal node whose id was set earlier.
    pub(crate) fn set_children(&mut self, children: Vec<NodeIndex>) {
        self.children = children;
    }

    /// Returns the semantic id of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the 1-based textual label if this is a leaf.
    pub fn label(&self) -> Option<usize> {
        self.is_leaf().then(|| self.id + 1)
    }

    /// Returns the arena indices of the children (left to right).
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns the number of children.
    pub fn degree(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_internal(&self) -> bool {
        !self.children.is_empty()
    }
}
