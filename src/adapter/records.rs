use super::{AdapterError, DiffPageAdapter, anchor_for};
use crate::record::{FileRecord, SectionRef};
use log::debug;

/// Adapter over records supplied directly instead of scraped from a page
///
/// Each record's section handle is its position in the list. Records
/// without an `href` get the same anchor a diff section for that path would.
#[derive(Debug, Clone, Default)]
pub struct RecordListAdapter {
    records: Vec<FileRecord>,
    expand_requests: Vec<SectionRef>,
}

impl RecordListAdapter {
    pub fn new(records: Vec<FileRecord>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(i, mut record)| {
                record.section = SectionRef::new(i);
                if record.href.is_empty() {
                    record.href = format!("#{}", anchor_for(&record.path));
                }
                record
            })
            .collect();

        Self {
            records,
            expand_requests: Vec::new(),
        }
    }

    /// Decode a JSON array of records
    pub fn from_json(text: &str) -> Result<Self, AdapterError> {
        let records: Vec<FileRecord> = serde_json::from_str(text)?;
        Ok(Self::new(records))
    }

    /// Sections that were asked to expand, oldest first
    pub fn expand_requests(&self) -> &[SectionRef] {
        &self.expand_requests
    }
}

impl DiffPageAdapter for RecordListAdapter {
    fn list_diff_entries(&self) -> Result<Vec<FileRecord>, AdapterError> {
        Ok(self.records.clone())
    }

    fn expand_if_collapsed(&mut self, section: SectionRef) {
        // No host page to expand; remember the request
        debug!("records: expand requested for section {}", section.index());
        self.expand_requests.push(section);
    }
}
