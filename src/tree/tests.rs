use super::*;
use crate::record::SectionRef;

fn record(path: &str, section: usize) -> FileRecord {
    FileRecord::new(path, format!("#section-{}", section), SectionRef::new(section))
}

fn records(paths: &[&str]) -> Vec<FileRecord> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| record(path, i))
        .collect()
}

// ========================================================================
// Builder Tests
// ========================================================================

#[test]
fn test_builder_new_has_only_root() {
    let tree = PathTreeBuilder::new().build();
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.root().segment, ROOT_SEGMENT);
    assert!(tree.root().children().is_empty());
    assert!(!tree.root().is_leaf());
}

#[test]
fn test_add_single_file() {
    let mut builder = PathTreeBuilder::new();
    let result = builder.add_record(record("README.md", 0));
    assert!(result.is_ok());

    let tree = builder.build();
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(tree.folder_count(), 0);

    let node = tree.lookup("README.md").unwrap();
    assert_eq!(node.segment, "README.md");
    assert_eq!(node.parent, Some(tree.root_id()));
}

#[test]
fn test_every_record_reachable_by_its_path() {
    let paths = [
        "src/lib.rs",
        "src/tree/mod.rs",
        "src/tree/node.rs",
        "Cargo.toml",
        "docs/guide/intro.md",
    ];
    let tree = PathTree::from_records(records(&paths), DuplicatePolicy::Reject).unwrap();

    assert_eq!(tree.leaf_count(), paths.len());
    for (i, path) in paths.iter().enumerate() {
        let node = tree.lookup(path).unwrap();
        let leaf = node.record().expect("terminal node carries its record");
        assert_eq!(leaf.path, *path);
        assert_eq!(leaf.section, SectionRef::new(i));
    }
}

#[test]
fn test_shared_prefix_creates_one_folder() {
    let tree = PathTree::from_records(
        records(&["a/b.txt", "a/c.txt", "a/d/e.txt"]),
        DuplicatePolicy::Reject,
    )
    .unwrap();

    // "a" and "a/d"
    assert_eq!(tree.folder_count(), 2);
    assert_eq!(tree.root().children().len(), 1);

    let folder = tree.lookup("a").unwrap();
    assert!(!folder.is_leaf());
    assert!(folder.record().is_none());
    assert_eq!(folder.children().len(), 3);
}

#[test]
fn test_children_keep_insertion_order() {
    let tree = PathTree::from_records(records(&["z.txt", "a.txt", "M.txt"]), DuplicatePolicy::Reject)
        .unwrap();

    let names: Vec<&str> = tree
        .children(tree.root_id())
        .map(|(_, node)| node.segment.as_str())
        .collect();
    assert_eq!(names, vec!["z.txt", "a.txt", "M.txt"]);
}

#[test]
fn test_lookup_normalizes_path() {
    let tree = PathTree::from_records(records(&["src/lib.rs"]), DuplicatePolicy::Reject).unwrap();

    assert!(tree.lookup("/src//lib.rs").is_some());
    assert!(tree.lookup("./src/lib.rs").is_some());
    assert_eq!(tree.lookup("/").unwrap().segment, ROOT_SEGMENT);
    assert!(tree.lookup("src/main.rs").is_none());
    assert!(tree.lookup("../src").is_none());
}

#[test]
fn test_leaves_in_insertion_order() {
    let tree = PathTree::from_records(
        records(&["b/two.rs", "a/one.rs", "three.rs"]),
        DuplicatePolicy::Reject,
    )
    .unwrap();

    let paths: Vec<&str> = tree.leaves().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["b/two.rs", "a/one.rs", "three.rs"]);
}

#[test]
fn test_get_unknown_id() {
    let tree = PathTreeBuilder::new().build();
    assert!(tree.get(NodeId(42)).is_none());
    assert_eq!(tree.children(NodeId(42)).count(), 0);
}

// ========================================================================
// Error Tests
// ========================================================================

#[test]
fn test_invalid_path_rejected() {
    let mut builder = PathTreeBuilder::new();
    let result = builder.add_record(record("", 0));
    assert!(matches!(result, Err(TreeError::InvalidPath(_))));

    let result = builder.add_record(record("a/../b", 1));
    assert!(matches!(result, Err(TreeError::InvalidPath(_))));
}

#[test]
fn test_duplicate_rejected_by_default() {
    let result = PathTree::from_records(
        vec![record("src/lib.rs", 0), record("src/lib.rs", 1)],
        DuplicatePolicy::default(),
    );
    assert_eq!(
        result.unwrap_err(),
        TreeError::DuplicatePath("src/lib.rs".to_string())
    );
}

#[test]
fn test_duplicate_after_normalization_rejected() {
    let result = PathTree::from_records(
        vec![record("src/lib.rs", 0), record("./src//lib.rs", 1)],
        DuplicatePolicy::Reject,
    );
    assert!(matches!(result, Err(TreeError::DuplicatePath(_))));
}

#[test]
fn test_duplicate_last_wins() {
    let tree = PathTree::from_records(
        vec![
            record("src/lib.rs", 0),
            record("src/lib.rs", 1).with_deleted(true),
        ],
        DuplicatePolicy::LastWins,
    )
    .unwrap();

    assert_eq!(tree.leaf_count(), 1);
    let leaf = tree.lookup("src/lib.rs").unwrap().record().unwrap();
    assert_eq!(leaf.section, SectionRef::new(1));
    assert!(leaf.is_deleted);
}

#[test]
fn test_duplicate_keep_first() {
    let tree = PathTree::from_records(
        vec![record("src/lib.rs", 0), record("src/lib.rs", 1)],
        DuplicatePolicy::KeepFirst,
    )
    .unwrap();

    assert_eq!(tree.leaf_count(), 1);
    let leaf = tree.lookup("src/lib.rs").unwrap().record().unwrap();
    assert_eq!(leaf.section, SectionRef::new(0));
}

#[test]
fn test_file_replaced_by_directory() {
    let deleted = record("docs", 0).with_deleted(true);
    let added = record("docs/readme.md", 1).with_new(true);

    let tree = PathTree::from_records(vec![deleted, added], DuplicatePolicy::Reject).unwrap();

    // Both sit under the root: the deleted file and the new folder
    let top: Vec<(&str, bool)> = tree
        .children(tree.root_id())
        .map(|(_, node)| (node.segment.as_str(), node.is_leaf()))
        .collect();
    assert_eq!(top, vec![("docs", true), ("docs", false)]);

    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.folder_count(), 1);
    assert!(tree.lookup_file("docs").unwrap().record().unwrap().is_deleted);
    assert_eq!(tree.lookup_folder("docs").unwrap().children().len(), 1);
    assert!(tree.lookup("docs/readme.md").unwrap().is_leaf());
}

#[test]
fn test_directory_replaced_by_file() {
    let tree = PathTree::from_records(records(&["a/b.txt", "a"]), DuplicatePolicy::Reject).unwrap();

    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.children(tree.root_id()).count(), 2);
    // Plain lookup prefers the file
    assert!(tree.lookup("a").unwrap().is_leaf());
    assert!(!tree.lookup_folder("a").unwrap().is_leaf());
}

#[test]
fn test_file_and_folder_share_path_duplicates_still_apply() {
    let result = PathTree::from_records(records(&["a", "a/b.txt", "a"]), DuplicatePolicy::Reject);
    assert_eq!(result.unwrap_err(), TreeError::DuplicatePath("a".to_string()));
}

#[test]
fn test_lookup_file_misses_folder_and_root() {
    let tree = PathTree::from_records(records(&["src/lib.rs"]), DuplicatePolicy::Reject).unwrap();
    assert!(tree.lookup_file("src").is_none());
    assert!(tree.lookup_file("").is_none());
    assert!(tree.lookup_folder("src/lib.rs").is_none());
}

#[test]
fn test_policy_deserializes_snake_case() {
    let policy: DuplicatePolicy = serde_json::from_str("\"last_wins\"").unwrap();
    assert_eq!(policy, DuplicatePolicy::LastWins);
}
