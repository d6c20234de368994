mod anchor;
mod error;
mod records;
mod unified;

pub use anchor::{ANCHOR_PREFIX, anchor_for};
pub use error::AdapterError;
pub use records::RecordListAdapter;
pub use unified::{DEFAULT_COLLAPSE_THRESHOLD, DiffSection, UnifiedDiffAdapter};


use crate::record::{FileRecord, SectionRef};

/// The only place that knows how the host page lays out its diff sections
pub trait DiffPageAdapter {
    /// One record per diff section, in page order
    fn list_diff_entries(&self) -> Result<Vec<FileRecord>, AdapterError>;

    /// Expand the section if the host currently shows it collapsed
    ///
    /// Called right before navigating to the section's anchor so the jump
    /// lands on visible content. Sections that are already expanded are
    /// left alone.
    fn expand_if_collapsed(&mut self, section: SectionRef);
}
