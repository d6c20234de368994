mod error;
mod node;

pub use error::TreeError;
pub use node::{NodeId, NodeKind, TreeNode};

#[cfg(test)]
mod tests;

use crate::path::PathSegments;
use crate::record::FileRecord;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Segment name of the root node
pub const ROOT_SEGMENT: &str = "/";

const ROOT_ID: NodeId = NodeId(0);

/// What to do when two records end at the same path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the build with `TreeError::DuplicatePath`
    #[default]
    Reject,
    /// Replace the earlier record
    LastWins,
    /// Ignore the later record
    KeepFirst,
}

/// Immutable path tree with arena-backed node storage
#[derive(Debug, Clone)]
pub struct PathTree {
    /// All nodes, root first, in creation order
    nodes: Vec<TreeNode>,
    /// Folder paths to arena slots, root included
    folders: HashMap<String, NodeId>,
    /// File paths to arena slots; a file may share its path with a folder
    files: HashMap<String, NodeId>,
}

/// Mutable builder for constructing a path tree
pub struct PathTreeBuilder {
    nodes: Vec<TreeNode>,
    folders: HashMap<String, NodeId>,
    files: HashMap<String, NodeId>,
    duplicate_policy: DuplicatePolicy,
}

impl PathTreeBuilder {
    /// Create a builder holding only the root node
    pub fn new() -> Self {
        let root = TreeNode {
            segment: ROOT_SEGMENT.to_string(),
            path: String::new(),
            parent: None,
            kind: NodeKind::Folder {
                children: Vec::new(),
            },
        };

        let mut folders = HashMap::new();
        folders.insert(String::new(), ROOT_ID);

        Self {
            nodes: vec![root],
            folders,
            files: HashMap::new(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Place a record at the node its path leads to, creating folders on the way
    pub fn add_record(&mut self, record: FileRecord) -> Result<(), TreeError> {
        // Normalize the path into segments
        let segments: Vec<String> = PathSegments::split(&record.path)?
            .into_iter()
            .map(str::to_owned)
            .collect();

        let Some((file_segment, folder_segments)) = segments.split_last() else {
            return Err(TreeError::InvalidPath(record.path.clone()));
        };

        // Walk or create the folders above the file
        let mut parent = ROOT_ID;
        let mut key = String::new();
        for segment in folder_segments {
            push_segment(&mut key, segment);
            parent = self.folder(parent, segment, &key);
        }
        push_segment(&mut key, file_segment);

        // A folder at the same path is a different node (file replaced by a directory)
        let Some(existing) = self.files.get(&key).copied() else {
            debug!("tree: adding file {}", key);
            self.push_node(parent, file_segment, key, NodeKind::Leaf(record));
            return Ok(());
        };

        // Same file twice: apply the duplicate policy
        match self.duplicate_policy {
            DuplicatePolicy::Reject => Err(TreeError::DuplicatePath(key)),
            DuplicatePolicy::LastWins => {
                warn!("tree: duplicate path {}, keeping the last record", key);
                self.nodes[existing.0].kind = NodeKind::Leaf(record);
                Ok(())
            }
            DuplicatePolicy::KeepFirst => {
                warn!("tree: duplicate path {}, keeping the first record", key);
                Ok(())
            }
        }
    }

    /// Add records in order, stopping at the first failure
    pub fn add_records(
        &mut self,
        records: impl IntoIterator<Item = FileRecord>,
    ) -> Result<(), TreeError> {
        for record in records {
            self.add_record(record)?;
        }
        Ok(())
    }

    /// Build the immutable tree
    pub fn build(self) -> PathTree {
        PathTree {
            nodes: self.nodes,
            folders: self.folders,
            files: self.files,
        }
    }

    /// Existing folder at `key`, or a new one under `parent`
    fn folder(&mut self, parent: NodeId, segment: &str, key: &str) -> NodeId {
        if let Some(&id) = self.folders.get(key) {
            return id;
        }

        self.push_node(
            parent,
            segment,
            key.to_string(),
            NodeKind::Folder {
                children: Vec::new(),
            },
        )
    }

    fn push_node(&mut self, parent: NodeId, segment: &str, path: String, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            segment: segment.to_string(),
            path: path.clone(),
            parent: Some(parent),
            kind,
        });

        if let NodeKind::Folder { children } = &mut self.nodes[parent.0].kind {
            children.push(id);
        }
        // Index by kind so a file and a folder can share a path
        if self.nodes[id.0].is_leaf() {
            self.files.insert(path, id);
        } else {
            self.folders.insert(path, id);
        }

        id
    }
}

impl Default for PathTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn push_segment(key: &mut String, segment: &str) {
    if !key.is_empty() {
        key.push('/');
    }
    key.push_str(segment);
}

impl PathTree {
    /// Build a tree from records in one go
    pub fn from_records(
        records: impl IntoIterator<Item = FileRecord>,
        policy: DuplicatePolicy,
    ) -> Result<Self, TreeError> {
        let mut builder = PathTreeBuilder::new().duplicate_policy(policy);
        builder.add_records(records)?;
        Ok(builder.build())
    }

    pub fn root_id(&self) -> NodeId {
        ROOT_ID
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[ROOT_ID.0]
    }

    /// Get a node by id; `None` for ids from another tree
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Children of a node with their ids, in insertion order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        self.get(id)
            .map(TreeNode::children)
            .unwrap_or_default()
            .iter()
            .map(|&child| (child, &self.nodes[child.0]))
    }

    /// Find the node a path leads to, preferring a file over a folder of
    /// the same name; "" and "/" resolve to the root
    pub fn lookup(&self, path: &str) -> Option<&TreeNode> {
        self.lookup_file(path).or_else(|| self.lookup_folder(path))
    }

    /// Find the file at a path
    pub fn lookup_file(&self, path: &str) -> Option<&TreeNode> {
        let key = PathSegments::normalize(path).ok()?;
        self.files.get(&key).map(|id| &self.nodes[id.0])
    }

    /// Find the folder at a path; "" and "/" resolve to the root
    pub fn lookup_folder(&self, path: &str) -> Option<&TreeNode> {
        if path.trim_matches('/').is_empty() {
            return Some(self.root());
        }
        let key = PathSegments::normalize(path).ok()?;
        self.folders.get(&key).map(|id| &self.nodes[id.0])
    }

    /// Records at the leaves, in the order their paths were first seen
    pub fn leaves(&self) -> impl Iterator<Item = &FileRecord> {
        self.nodes.iter().filter_map(TreeNode::record)
    }

    /// Number of files in the tree
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Number of folders, not counting the root
    pub fn folder_count(&self) -> usize {
        self.nodes.len() - self.leaf_count() - 1
    }

    /// Total number of nodes including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
