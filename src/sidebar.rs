use crate::adapter::{AdapterError, DiffPageAdapter};
use crate::config::SidebarConfig;
use crate::render::{SidebarView, TreeRenderer};
use crate::tree::{PathTree, TreeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SidebarError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// One render pass: list the page's diff entries, build the path tree
/// and render it. Any failure aborts the pass.
pub fn build_sidebar(
    adapter: &dyn DiffPageAdapter,
    config: &SidebarConfig,
) -> Result<SidebarView, SidebarError> {
    let records = adapter.list_diff_entries()?;
    let tree = PathTree::from_records(records, config.duplicate_policy)?;
    Ok(TreeRenderer::new()
        .heading_label(config.heading_label.as_str())
        .render(&tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::RecordListAdapter;
    use crate::record::{FileRecord, SectionRef};

    fn adapter(paths: &[&str]) -> RecordListAdapter {
        RecordListAdapter::new(
            paths
                .iter()
                .map(|p| FileRecord::new(*p, "", SectionRef::default()))
                .collect(),
        )
    }

    #[test]
    fn test_build_sidebar() {
        let config = SidebarConfig {
            heading_label: "Changes".to_string(),
            ..SidebarConfig::default()
        };
        let view = build_sidebar(&adapter(&["a/b.txt", "z.txt"]), &config).unwrap();

        assert_eq!(view.heading().label, "Changes");
        assert_eq!(view.heading().count, 2);
    }

    #[test]
    fn test_duplicate_aborts_pass() {
        let result = build_sidebar(&adapter(&["a.txt", "a.txt"]), &SidebarConfig::default());
        assert!(matches!(result, Err(SidebarError::Tree(TreeError::DuplicatePath(_)))));
    }
}
