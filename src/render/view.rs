use crate::adapter::DiffPageAdapter;
use crate::record::{FileRecord, SectionRef};
use log::debug;
use serde::Serialize;

/// Index of an entry in the sidebar arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderIcon {
    Open,
    Closed,
}

impl FolderIcon {
    /// Font Awesome icon name
    pub fn name(self) -> &'static str {
        match self {
            FolderIcon::Open => "folder-open",
            FolderIcon::Closed => "folder",
        }
    }
}

pub const FILE_ICON: &str = "file-text-o";

/// Visual state of a file link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafStyle {
    Normal,
    New,
    Deleted,
}

impl LeafStyle {
    /// Deleted takes precedence over new
    pub fn for_record(record: &FileRecord) -> Self {
        if record.is_deleted {
            LeafStyle::Deleted
        } else if record.is_new {
            LeafStyle::New
        } else {
            LeafStyle::Normal
        }
    }
}

/// Summary line above the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub label: String,
    /// Number of files in the tree
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    Folder {
        collapsed: bool,
        children: Vec<ElementId>,
    },
    File {
        href: String,
        section: SectionRef,
        style: LeafStyle,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: ElementId,
    pub parent: Option<ElementId>,
    /// Segment name shown in the sidebar
    pub name: String,
    /// Full path of the folder or file
    pub path: String,
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder { .. })
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self.kind, EntryKind::Folder { collapsed: true, .. })
    }

    /// Icon name for the entry's current state
    pub fn icon(&self) -> &'static str {
        match self.kind {
            EntryKind::Folder { collapsed: true, .. } => FolderIcon::Closed.name(),
            EntryKind::Folder { collapsed: false, .. } => FolderIcon::Open.name(),
            EntryKind::File { .. } => FILE_ICON,
        }
    }

    pub fn style(&self) -> Option<LeafStyle> {
        match self.kind {
            EntryKind::File { style, .. } => Some(style),
            EntryKind::Folder { .. } => None,
        }
    }
}

/// What a click on an entry did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A folder's child list was shown or hidden
    Toggled { folder: ElementId, collapsed: bool },
    /// The caller should jump to `href`
    Navigate { href: String, section: SectionRef },
}

/// Rendered sidebar: heading plus the sorted, collapsible entry tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarView {
    heading: Heading,
    /// All entries, parents before their children
    entries: Vec<Entry>,
    top_level: Vec<ElementId>,
}

impl SidebarView {
    pub(crate) fn new(heading: Heading) -> Self {
        Self {
            heading,
            entries: Vec::new(),
            top_level: Vec::new(),
        }
    }

    pub(crate) fn push(
        &mut self,
        parent: Option<ElementId>,
        name: &str,
        path: &str,
        kind: EntryKind,
    ) -> ElementId {
        let id = ElementId(self.entries.len());
        self.entries.push(Entry {
            id,
            parent,
            name: name.to_string(),
            path: path.to_string(),
            kind,
        });
        id
    }

    pub(crate) fn set_children(&mut self, folder: ElementId, ids: Vec<ElementId>) {
        if let Some(Entry {
            kind: EntryKind::Folder { children, .. },
            ..
        }) = self.entries.get_mut(folder.0)
        {
            *children = ids;
        }
    }

    pub(crate) fn set_top_level(&mut self, ids: Vec<ElementId>) {
        self.top_level = ids;
    }

    pub fn heading(&self) -> &Heading {
        &self.heading
    }

    pub fn entry(&self, id: ElementId) -> Option<&Entry> {
        self.entries.get(id.0)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries of the outermost list, in display order
    pub fn top_level(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.top_level.iter().map(|id| &self.entries[id.0])
    }

    /// Children of a folder in display order; empty for files
    pub fn children(&self, id: ElementId) -> impl Iterator<Item = &Entry> + '_ {
        let ids: &[ElementId] = match self.entry(id).map(|e| &e.kind) {
            Some(EntryKind::Folder { children, .. }) => children.as_slice(),
            _ => &[],
        };
        ids.iter().map(|child| &self.entries[child.0])
    }

    /// Entry for a full folder or file path; the folder when both exist
    pub fn find(&self, path: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Whether no ancestor folder of the entry is collapsed
    pub fn is_visible(&self, id: ElementId) -> bool {
        let mut parent = self.entry(id).and_then(|e| e.parent);
        while let Some(folder) = parent {
            let Some(entry) = self.entry(folder) else {
                return false;
            };
            if entry.is_collapsed() {
                return false;
            }
            parent = entry.parent;
        }
        self.entry(id).is_some()
    }

    /// Flip a folder's child list; returns the new collapsed state
    pub fn toggle_folder(&mut self, id: ElementId) -> Option<bool> {
        match self.entries.get_mut(id.0).map(|e| &mut e.kind) {
            Some(EntryKind::Folder { collapsed, .. }) => {
                *collapsed = !*collapsed;
                Some(*collapsed)
            }
            _ => None,
        }
    }

    /// Handle a click on an entry.
    ///
    /// The entry's own handler is the only one that runs: toggling a nested
    /// folder never reaches its ancestors. A file click asks the adapter to
    /// expand the file's section first so the anchor jump lands on visible
    /// content.
    pub fn click(
        &mut self,
        id: ElementId,
        adapter: &mut dyn DiffPageAdapter,
    ) -> Option<ClickOutcome> {
        let entry = self.entry(id)?;
        if let EntryKind::File { href, section, .. } = &entry.kind {
            let outcome = ClickOutcome::Navigate {
                href: href.clone(),
                section: *section,
            };
            adapter.expand_if_collapsed(*section);
            return Some(outcome);
        }

        let collapsed = self.toggle_folder(id)?;
        debug!("sidebar: folder toggled, collapsed={}", collapsed);
        Some(ClickOutcome::Toggled {
            folder: id,
            collapsed,
        })
    }
}
