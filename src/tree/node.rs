use crate::record::FileRecord;

/// Index of a node in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Intermediate segment; children are kept in insertion order
    Folder { children: Vec<NodeId> },
    /// Terminal segment carrying the file it was built from
    Leaf(FileRecord),
}

/// A single path segment in the tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Segment name (e.g., "lib.rs"), "/" for the root
    pub segment: String,
    /// Normalized path from the root, empty for the root
    pub path: String,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn record(&self) -> Option<&FileRecord> {
        match &self.kind {
            NodeKind::Leaf(record) => Some(record),
            NodeKind::Folder { .. } => None,
        }
    }

    /// Child ids in insertion order; empty for leaves
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::Leaf(_) => &[],
        }
    }
}
