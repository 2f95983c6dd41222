//! Provides the array-based tree representation.
//!
//! Core data structures for representing rooted trees in a fixed arena:
//! * [ArrayTree] - arena of [Node]s stored in [Layout] order
//! * [NodeIndex] - position of a node in the arena (structural identity)
//! * [NodeId] - semantic id of a node (leaf id or internal id)

use crate::model::layout::Layout;
use crate::model::node::Node;
use crate::newick;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

/// Semantic id of a node.
///
/// Leaves use `[0, num_leaves)`, internal nodes `[num_leaves, size)`.
pub type NodeId = usize;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted tree stored as a fixed-size arena of [Node]s.
///
/// Nodes reference their children by [NodeIndex]. The order of the arena
/// is given by the tree's [Layout]:
/// - [Layout::Preorder]: root at index 0 and the subtree of a node `p`
///   occupies the contiguous range starting at `p`.
/// - [Layout::Postorder]: root at the last index and the subtree of a node
///   `p` occupies the contiguous range ending at `p`.
///
/// # Construction
/// Trees are built by [NewickParser](crate::newick::NewickParser) in a
/// single pass once the number of nodes is known; the arena never grows
/// and no node is mutated afterwards. Test validity with
/// [`ArrayTree::is_valid()`].
///
/// # Example
/// ```
/// use nwkarray::model::Layout;
/// use nwkarray::parse_str;
///
/// let tree = parse_str("(1,2,(3,4));", Layout::Preorder).unwrap();
/// assert_eq!(tree.num_nodes(), 6);
/// assert_eq!(tree.root().id(), 4);
/// assert_eq!(tree.to_newick(), "(1,2,(3,4));");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayTree {
    /// Order of the nodes in the arena
    layout: Layout,

    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Number of leaf nodes in the tree
    num_leaves: usize,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl ArrayTree {
    /// Wraps a fully populated arena.
    pub(crate) fn from_parts(layout: Layout, nodes: Vec<Node>, num_leaves: usize) -> Self {
        debug_assert!(!nodes.is_empty());
        ArrayTree {
            layout,
            nodes,
            num_leaves,
        }
    }

    /// Returns the layout of the arena.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the number of nodes in this tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Returns the number of internal nodes in this tree.
    pub fn num_internal(&self) -> usize {
        self.nodes.len() - self.num_leaves
    }

    /// Returns the index of the root, 0 or `num_nodes() - 1` depending on layout.
    pub fn root_index(&self) -> NodeIndex {
        self.layout.root_index(self.nodes.len())
    }

    /// Returns a reference to the root node.
    pub fn root(&self) -> &Node {
        &self[self.root_index()]
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self[index]
    }

    /// Returns the whole arena in layout order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Convenience method to convert this tree to a Newick string
    pub fn to_newick(&self) -> String {
        newick::to_newick(self)
    }

    /// Returns the maximal nesting depth, i.e. the number of edges on a
    /// longest root-to-leaf path. A single leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root_index(), 0)];
        while let Some((index, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(self[index].children().iter().map(|&child| (child, depth + 1)));
        }
        max_depth
    }

    /// Returns for each arena index the index of its parent
    /// (`None` for the root).
    pub fn parent_indices(&self) -> Vec<Option<NodeIndex>> {
        let mut parents = vec![None; self.nodes.len()];
        for (index, node) in self.nodes.iter().enumerate() {
            for &child in node.children() {
                parents[child] = Some(index);
            }
        }
        parents
    }

    /// Checks whether `other` has the same ordered parent/child structure
    /// and the same leaf ids, ignoring arena order and internal ids.
    ///
    /// This is the relation between the preorder and the postorder
    /// reading of the same Newick string.
    pub fn is_isomorphic_to(&self, other: &ArrayTree) -> bool {
        self.num_nodes() == other.num_nodes()
            && self.num_leaves == other.num_leaves
            && self
                .pre_order_iter()
                .zip(other.pre_order_iter())
                .all(|((_, a), (_, b))| a.degree() == b.degree() && (a.is_internal() || a.id() == b.id()))
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl ArrayTree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - At least one node and one leaf
    /// - Leaf ids are exactly `[0, num_leaves)`, internal ids exactly `[num_leaves, size)`
    /// - Every child index is in bounds and placed after (preorder) or
    ///   before (postorder) its parent
    /// - Every node except the root has exactly one parent
    /// - Every subtree occupies a contiguous index range as the layout requires
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let size = self.nodes.len();
        if size == 0 || self.num_leaves == 0 || self.num_leaves > size {
            return false;
        }

        // Ids: leaves below num_leaves, internal nodes above, no duplicates
        let mut id_seen = vec![false; size];
        let mut leaf_count = 0;
        for node in &self.nodes {
            let id = node.id();
            let in_range = if node.is_leaf() {
                leaf_count += 1;
                id < self.num_leaves
            } else {
                (self.num_leaves..size).contains(&id)
            };
            if !in_range || id_seen[id] {
                return false;
            }
            id_seen[id] = true;
        }
        if leaf_count != self.num_leaves {
            return false;
        }

        // Children: in bounds, on the right side of their parent, one parent each
        let mut parents: Vec<Option<NodeIndex>> = vec![None; size];
        for (index, node) in self.nodes.iter().enumerate() {
            for &child in node.children() {
                let ordered = match self.layout {
                    Layout::Preorder => child > index,
                    Layout::Postorder => child < index,
                };
                if child >= size || !ordered || parents[child].is_some() {
                    return false;
                }
                parents[child] = Some(index);
            }
        }

        let root_index = self.root_index();
        let only_root_orphaned = parents
            .iter()
            .enumerate()
            .all(|(index, parent)| parent.is_none() == (index == root_index));
        if !only_root_orphaned {
            return false;
        }

        self.has_contiguous_subtrees()
    }

    /// Checks that children are packed directly next to each other and to
    /// their parent, which makes every subtree a contiguous index range.
    fn has_contiguous_subtrees(&self) -> bool {
        let size = self.nodes.len();
        let mut subtree_sizes = vec![1usize; size];

        match self.layout {
            Layout::Preorder => {
                for index in (0..size).rev() {
                    let node = &self.nodes[index];
                    let mut expected = index + 1;
                    for &child in node.children() {
                        if child != expected {
                            return false;
                        }
                        expected += subtree_sizes[child];
                    }
                    subtree_sizes[index] = expected - index;
                }
            }
            Layout::Postorder => {
                for index in 0..size {
                    let node = &self.nodes[index];
                    let mut expected = index.checked_sub(1);
                    let mut total = 1;
                    for &child in node.children().iter().rev() {
                        if expected != Some(child) {
                            return false;
                        }
                        total += subtree_sizes[child];
                        expected = (child + 1)
                            .checked_sub(subtree_sizes[child])
                            .and_then(|start| start.checked_sub(1));
                    }
                    subtree_sizes[index] = total;
                }
            }
        }

        subtree_sizes[self.root_index()] == size
    }
}

impl std::ops::Index<NodeIndex> for ArrayTree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl ArrayTree {
    /// Returns an iterator over the tree in pre-order (parents before children,
    /// children left to right), independent of the arena layout.
    ///
    /// Yields pairs of arena index and node.
    ///
    /// # Example
    /// ```
    /// use nwkarray::model::Layout;
    /// use nwkarray::parse_str;
    ///
    /// let tree = parse_str("((1,2),3);", Layout::Postorder).unwrap();
    /// let labels: Vec<_> = tree.pre_order_iter().filter_map(|(_, n)| n.label()).collect();
    /// assert_eq!(labels, vec![1, 2, 3]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a ArrayTree,
    stack: Vec<NodeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a ArrayTree) -> Self {
        PreOrderIter {
            tree,
            stack: vec![tree.root_index()],
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (NodeIndex, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree[index];

        // Push children onto stack (rightmost first, so leftmost is processed first)
        self.stack.extend(node.children().iter().rev());

        Some((index, node))
    }
}
