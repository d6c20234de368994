use serde::{Deserialize, Serialize};

/// Opaque handle to the diff section a record was taken from.
///
/// Only the adapter that issued the handle knows what it points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionRef(usize);

impl SectionRef {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// One changed file as listed on the diff page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Slash-delimited path (e.g., "src/lib.rs")
    pub path: String,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_deleted: bool,
    /// Anchor of the diff section (e.g., "#diff-3f2a...")
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub section: SectionRef,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, href: impl Into<String>, section: SectionRef) -> Self {
        Self {
            path: path.into(),
            is_new: false,
            is_deleted: false,
            href: href.into(),
            section,
        }
    }

    pub fn with_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    pub fn with_deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }
}
