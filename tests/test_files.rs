use nwkarray::model::Layout;
use nwkarray::newick::{NewickParser, write_newick};
use nwkarray::{NewickErrorKind, read, write};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

// --- TESTS READING FILES ---
#[test]
fn test_reading_tree_pair() {
    let first = read(fixture("first.nwk"), Layout::Preorder).unwrap();
    let second = read(fixture("second.nwk"), Layout::Postorder).unwrap();

    assert_eq!(first.num_leaves(), 9);
    assert_eq!(second.num_leaves(), 9);
    assert_eq!(first.root_index(), 0);
    assert_eq!(second.root_index(), second.num_nodes() - 1);
    assert!(first.is_valid());
    assert!(second.is_valid());
}

#[test]
fn test_reading_padded_file() {
    let tree = NewickParser::postorder().parse_file(fixture("padded.nwk")).unwrap();
    assert_eq!(tree.to_newick(), "(1,(2,3));");
}

#[test]
fn test_reading_unsupported_file() {
    let err = read(fixture("internal_label.nwk"), Layout::Preorder).unwrap_err();
    assert!(matches!(err.kind(), NewickErrorKind::UnsupportedFeature(_)));
    assert_eq!(err.position(), Some(5));
}

#[test]
fn test_reading_missing_file() {
    let err = read(fixture("does_not_exist.nwk"), Layout::Preorder).unwrap_err();
    assert!(matches!(err.kind(), NewickErrorKind::IoFailure(_)));
    assert_eq!(err.position(), None);
    assert!(err.to_string().starts_with("IO error"));
}

// --- TESTS WRITING FILES ---
#[test]
fn test_file_round_trip_adds_newline() {
    let dir = TempDir::new().unwrap();

    for (name, layout) in [("first.nwk", Layout::Preorder), ("second.nwk", Layout::Postorder)] {
        let original = fs::read_to_string(fixture(name)).unwrap();
        let tree = read(fixture(name), layout).unwrap();

        let out = dir.path().join(name);
        write(&tree, &out).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written, original);
        assert!(written.ends_with(";\n"));

        // And the written file reads back into the same tree
        let reread = read(&out, layout).unwrap();
        assert_eq!(reread, tree);
    }
}

#[test]
fn test_write_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("tree.nwk");
    fs::write(&out, "some much longer content that must disappear entirely").unwrap();

    let tree = nwkarray::parse_str("(2,1);", Layout::Postorder).unwrap();
    write(&tree, &out).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "(2,1);\n");
}

#[test]
fn test_write_into_missing_directory() {
    let dir = TempDir::new().unwrap();
    let tree = nwkarray::parse_str("1;", Layout::Preorder).unwrap();
    let err = write(&tree, dir.path().join("missing").join("tree.nwk")).unwrap_err();
    assert!(matches!(err.kind(), NewickErrorKind::IoFailure(_)));
}

#[test]
fn test_write_to_buffer() {
    let tree = nwkarray::parse_str("((1,2),3);", Layout::Preorder).unwrap();
    let mut out = Vec::new();
    write_newick(&tree, &mut out).unwrap();
    assert_eq!(out, b"((1,2),3);\n");
}
