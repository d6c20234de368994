// Public API exports
pub mod adapter;
pub mod config;
pub mod path;
pub mod poll;
pub mod record;
pub mod render;
pub mod sidebar;
pub mod tree;

// Re-export main types for convenience
pub use record::{FileRecord, SectionRef};

pub use tree::{DuplicatePolicy, NodeId, NodeKind, PathTree, PathTreeBuilder, TreeError, TreeNode};

pub use adapter::{AdapterError, DiffPageAdapter, DiffSection, RecordListAdapter, UnifiedDiffAdapter};

pub use render::{
    ClickOutcome, Entry, EntryKind, LeafStyle, SidebarView, TreeRenderer, render_fragment,
    render_page, render_text,
};

pub use config::{ConfigError, SidebarConfig};
pub use poll::{PollHandle, PollOutcome, ReadinessPoll};
pub use sidebar::{SidebarError, build_sidebar};
