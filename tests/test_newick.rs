use nwkarray::model::Layout;
use nwkarray::newick::{NewickParser, parse_str, to_newick};
use nwkarray::{NewickErrorKind, parse_str as quick_parse_str};

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_balanced_preorder_tree() {
    let tree = parse_str("(1,2,(3,4));", Layout::Preorder).unwrap();

    // Test counts
    assert_eq!(tree.num_nodes(), 6);
    assert_eq!(tree.num_leaves(), 4);
    assert_eq!(tree.num_internal(), 2);

    // Root first, id assigned at its '('
    assert_eq!(tree.root_index(), 0);
    let root = tree.root();
    assert_eq!(root.id(), 4);
    assert_eq!(root.children(), &[1, 2, 3]);

    // Leaves 1 and 2
    assert_eq!(tree[1].id(), 0);
    assert_eq!(tree[2].id(), 1);
    assert!(tree[1].is_leaf());

    // Nested internal node with leaves 3 and 4
    let nested = &tree[3];
    assert!(nested.is_internal());
    assert_eq!(nested.id(), 5);
    assert_eq!(nested.children(), &[4, 5]);
    assert_eq!(tree[4].id(), 2);
    assert_eq!(tree[5].id(), 3);

    assert!(tree.is_valid());
}

#[test]
fn test_balanced_postorder_tree() {
    let tree = parse_str("(1,2,(3,4));", Layout::Postorder).unwrap();

    assert_eq!(tree.num_nodes(), 6);
    assert_eq!(tree.num_leaves(), 4);

    // Leaves in textual order, internal nodes at their ')'
    let ids: Vec<_> = tree.nodes().iter().map(|node| node.id()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);

    assert_eq!(tree.root_index(), 5);
    assert_eq!(tree.root().id(), 5);
    assert_eq!(tree.root().children(), &[0, 1, 4]);
    assert_eq!(tree[4].children(), &[2, 3]);

    assert!(tree.is_valid());
}

#[test]
fn test_single_leaf_tree() {
    for layout in [Layout::Preorder, Layout::Postorder] {
        let tree = parse_str("1;", layout).unwrap();
        assert_eq!(tree.num_nodes(), 1);
        assert_eq!(tree.num_leaves(), 1);
        assert_eq!(tree.num_internal(), 0);
        assert_eq!(tree.root_index(), 0);
        assert_eq!(tree.root().label(), Some(1));
        assert!(tree.is_valid());
        assert_eq!(to_newick(&tree), "1;");
    }
}

#[test]
fn test_multi_digit_labels() {
    let newick = "((10,2),(3,(4,5,6,7,8,9)),(11,1,12));";
    for layout in [Layout::Preorder, Layout::Postorder] {
        let tree = parse_str(newick, layout).unwrap();
        assert_eq!(tree.num_leaves(), 12);
        assert!(tree.is_valid());
        assert_eq!(to_newick(&tree), newick);
    }
}

#[test]
fn test_unary_groups() {
    let newick = "((1),((2,3)));";
    for layout in [Layout::Preorder, Layout::Postorder] {
        let tree = parse_str(newick, layout).unwrap();
        assert_eq!(tree.num_nodes(), 7);
        assert_eq!(tree.num_leaves(), 3);
        assert!(tree.is_valid());
        assert_eq!(to_newick(&tree), newick);
    }
}

#[test]
fn test_surrounding_whitespace_is_skipped() {
    let tree = parse_str(" \n\t((1,2),3);\r\n", Layout::Preorder).unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(to_newick(&tree), "((1,2),3);");
}

#[test]
fn test_internal_ids_follow_finalization_order() {
    // Preorder: ids at '(' -> outer group first
    let pre = parse_str("((1,2),3);", Layout::Preorder).unwrap();
    assert_eq!(pre.root().id(), 3);
    assert_eq!(pre[1].id(), 4);

    // Postorder: ids at ')' -> inner group first
    let post = parse_str("((1,2),3);", Layout::Postorder).unwrap();
    assert_eq!(post[2].id(), 3);
    assert_eq!(post.root().id(), 4);
}

#[test]
fn test_layouts_are_isomorphic() {
    let newick = "(((1,5),(2,(7,3))),(6,4,8));";
    let pre = parse_str(newick, Layout::Preorder).unwrap();
    let post = parse_str(newick, Layout::Postorder).unwrap();
    assert!(pre.is_isomorphic_to(&post));
    assert!(post.is_isomorphic_to(&pre));
    assert_ne!(pre, post);
}

#[test]
fn test_configured_parser() {
    let parser = NewickParser::preorder().with_layout(Layout::Postorder);
    assert_eq!(parser.layout(), Layout::Postorder);
    let tree = parser.parse_str("(2,1);").unwrap();
    assert_eq!(tree.layout(), Layout::Postorder);
    assert_eq!(tree.root_index(), 2);

    let tree = quick_parse_str("(2,1);", Layout::Preorder).unwrap();
    assert_eq!(tree.layout(), Layout::Preorder);
}

#[test]
fn test_parse_bytes() {
    let tree = NewickParser::default().parse_bytes(b"((3,1),2);\n").unwrap();
    assert_eq!(tree.layout(), Layout::Preorder);
    assert_eq!(tree.to_newick(), "((3,1),2);");
}

// --- TESTS DEALING WITH CORRUPT NEWICK STRINGS ---
fn error_kind(newick: &str) -> NewickErrorKind {
    let pre = parse_str(newick, Layout::Preorder).unwrap_err();
    let post = parse_str(newick, Layout::Postorder).unwrap_err();
    assert_eq!(pre.kind(), post.kind());
    pre.kind().clone()
}

#[test]
fn test_unbalanced_parentheses() {
    for newick in ["(1,2;", "((1,2),3;", "(1,2));", ")1;", "(1,(2,3);"] {
        assert!(
            matches!(error_kind(newick), NewickErrorKind::MalformedSyntax(_)),
            "{newick}"
        );
    }
}

#[test]
fn test_error_position_and_message() {
    let err = parse_str("(1,2;", Layout::Preorder).unwrap_err();
    assert_eq!(err.position(), Some(4));
    assert_eq!(err.context(), ";");

    let message = err.to_string();
    assert!(message.contains("Malformed Newick string"));
    assert!(message.contains("at position 4"));
}

#[test]
fn test_empty_input() {
    assert!(matches!(error_kind(""), NewickErrorKind::MalformedSyntax(_)));
    assert!(matches!(error_kind(" \n "), NewickErrorKind::MalformedSyntax(_)));
}

#[test]
fn test_missing_semicolon() {
    assert!(matches!(error_kind("((1,2),3)"), NewickErrorKind::MalformedSyntax(_)));
    assert!(matches!(error_kind("1"), NewickErrorKind::MalformedSyntax(_)));
}

#[test]
fn test_misplaced_commas_and_groups() {
    for newick in ["(1,,2);", "(,1);", "(1,);", "();", "(1,2)(3);", "1,2;", ";", "(1(2));"] {
        assert!(
            matches!(error_kind(newick), NewickErrorKind::MalformedSyntax(_)),
            "{newick}"
        );
    }
}

#[test]
fn test_trailing_content() {
    assert!(matches!(error_kind("(1,2);x"), NewickErrorKind::MalformedSyntax(_)));
    assert!(matches!(error_kind("(1,2); (1,2);"), NewickErrorKind::MalformedSyntax(_)));
}

#[test]
fn test_whitespace_inside_tree() {
    assert!(matches!(error_kind("(1, 2);"), NewickErrorKind::MalformedSyntax(_)));
    assert!(matches!(error_kind("(1,2)\n;"), NewickErrorKind::MalformedSyntax(_)));
}

#[test]
fn test_internal_node_label() {
    assert!(matches!(error_kind("((1,2)4,3);"), NewickErrorKind::UnsupportedFeature(_)));
    assert!(matches!(error_kind("(1,2)3;"), NewickErrorKind::UnsupportedFeature(_)));
}

#[test]
fn test_branch_length_and_comment() {
    assert!(matches!(error_kind("(1:0.5,2);"), NewickErrorKind::UnsupportedFeature(_)));
    assert!(matches!(error_kind("(1,[note]2);"), NewickErrorKind::UnsupportedFeature(_)));
    assert!(matches!(error_kind("(A,B);"), NewickErrorKind::UnsupportedFeature(_)));
    assert!(matches!(error_kind("('1',2);"), NewickErrorKind::UnsupportedFeature(_)));
}

#[test]
fn test_invalid_labels() {
    for newick in ["(0,1);", "(1,3);", "(1,1);", "((2,3),3);", "(01,2);"] {
        assert!(
            matches!(error_kind(newick), NewickErrorKind::InvalidLabel(_)),
            "{newick}"
        );
    }
}

#[test]
fn test_label_overflow() {
    // More digits than supported
    assert!(matches!(
        error_kind("(123456789012345678901,1);"),
        NewickErrorKind::LabelOverflow(_)
    ));
    // Does not fit into a 64 bit id
    assert!(matches!(
        error_kind("(99999999999999999999,1);"),
        NewickErrorKind::LabelOverflow(_)
    ));

    let err = NewickParser::postorder()
        .with_max_label_digits(2)
        .parse_str("(1,123);")
        .unwrap_err();
    assert!(matches!(err.kind(), NewickErrorKind::LabelOverflow(_)));
    assert_eq!(err.position(), Some(3));
}
