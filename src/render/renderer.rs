use super::view::{ElementId, EntryKind, Heading, LeafStyle, SidebarView};
use crate::tree::{NodeId, NodeKind, PathTree, TreeNode};
use log::info;
use std::cmp::Ordering;

pub const DEFAULT_HEADING_LABEL: &str = "File List";

/// Turns a path tree into the sidebar's sorted entry tree
#[derive(Debug, Clone)]
pub struct TreeRenderer {
    heading_label: String,
}

impl TreeRenderer {
    pub fn new() -> Self {
        Self {
            heading_label: DEFAULT_HEADING_LABEL.to_string(),
        }
    }

    pub fn heading_label(mut self, label: impl Into<String>) -> Self {
        self.heading_label = label.into();
        self
    }

    /// Render the root's children as the top-level list.
    ///
    /// Every folder starts expanded.
    pub fn render(&self, tree: &PathTree) -> SidebarView {
        let mut view = SidebarView::new(Heading {
            label: self.heading_label.clone(),
            count: tree.leaf_count(),
        });

        let top_level = render_children(tree, tree.root_id(), None, &mut view);
        view.set_top_level(top_level);

        info!(
            "sidebar: rendered {} files in {} folders",
            tree.leaf_count(),
            tree.folder_count()
        );
        view
    }
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Folders before files, then case-insensitive by segment name
pub fn compare_nodes(a: &TreeNode, b: &TreeNode) -> Ordering {
    match (a.is_leaf(), b.is_leaf()) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => a.segment.to_lowercase().cmp(&b.segment.to_lowercase()),
    }
}

fn render_children(
    tree: &PathTree,
    folder: NodeId,
    parent: Option<ElementId>,
    view: &mut SidebarView,
) -> Vec<ElementId> {
    let mut children: Vec<(NodeId, &TreeNode)> = tree.children(folder).collect();
    // Stable: equal names keep their original order
    children.sort_by(|(_, a), (_, b)| compare_nodes(a, b));

    children
        .into_iter()
        .map(|(id, node)| render_node(tree, id, node, parent, view))
        .collect()
}

fn render_node(
    tree: &PathTree,
    id: NodeId,
    node: &TreeNode,
    parent: Option<ElementId>,
    view: &mut SidebarView,
) -> ElementId {
    match &node.kind {
        NodeKind::Leaf(record) => view.push(
            parent,
            &node.segment,
            &node.path,
            EntryKind::File {
                href: record.href.clone(),
                section: record.section,
                style: LeafStyle::for_record(record),
            },
        ),
        NodeKind::Folder { .. } => {
            let folder = view.push(
                parent,
                &node.segment,
                &node.path,
                EntryKind::Folder {
                    collapsed: false,
                    children: Vec::new(),
                },
            );
            let children = render_children(tree, id, Some(folder), view);
            view.set_children(folder, children);
            folder
        }
    }
}
