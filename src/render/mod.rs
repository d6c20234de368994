mod html;
mod renderer;
mod style;
mod text;
mod view;

pub use html::{escape, render_fragment, render_page};
pub use renderer::{DEFAULT_HEADING_LABEL, TreeRenderer, compare_nodes};
pub use style::{expand_script, stylesheet};
pub use text::render_text;
pub use view::{
    ClickOutcome, ElementId, Entry, EntryKind, FILE_ICON, FolderIcon, Heading, LeafStyle,
    SidebarView,
};
