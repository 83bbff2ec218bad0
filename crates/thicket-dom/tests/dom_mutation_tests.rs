//! Tests for tree construction and mutation: append, `insert_before`, `remove_child`.

use thicket_dom::{DomTree, ElementData, NodeId};

/// Helper to append an element with the given tag to `parent`.
fn element(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    tree.append_element(parent, ElementData::new(tag))
}

// ========== append ==========

#[test]
fn test_append_links_siblings() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "a");
    let text = tree.append_text(parent, "hello");
    let b = element(&mut tree, parent, "b");

    assert_eq!(tree.children(parent), &[a, text, b]);
    assert_eq!(tree.parent(text), Some(parent));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(text));
    assert_eq!(tree.prev_sibling(b), Some(text));
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_len_counts_document_and_detached_nodes() {
    let mut tree = DomTree::new();
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());

    let parent = element(&mut tree, NodeId::ROOT, "div");
    let child = element(&mut tree, parent, "p");
    tree.remove_child(parent, child);
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_document_element_skips_comments() {
    let mut tree = DomTree::new();
    let _ = tree.append_comment(NodeId::ROOT, "preamble");
    let html = element(&mut tree, NodeId::ROOT, "html");

    assert_eq!(tree.document_element(), Some(html));
}

#[test]
fn test_text_content_is_tree_order() {
    let mut tree = DomTree::new();
    let p = element(&mut tree, NodeId::ROOT, "p");
    let _ = tree.append_text(p, "one ");
    let b = element(&mut tree, p, "b");
    let _ = tree.append_text(b, "two");
    let _ = tree.append_comment(p, "skipped");
    let _ = tree.append_text(p, " three");

    assert_eq!(tree.text_content(p), "one two three");
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let child = element(&mut tree, parent, "p");

    assert_eq!(tree.children(parent).len(), 1);

    tree.remove_child(parent, child);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_first_of_three() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "a");
    let b = element(&mut tree, parent, "b");
    let c = element(&mut tree, parent, "c");

    tree.remove_child(parent, a);

    assert_eq!(tree.children(parent), &[b, c]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "a");
    let b = element(&mut tree, parent, "b");
    let c = element(&mut tree, parent, "c");

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_last_of_three() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "a");
    let b = element(&mut tree, parent, "b");
    let c = element(&mut tree, parent, "c");

    tree.remove_child(parent, c);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_remove_child_of_other_parent_is_noop() {
    let mut tree = DomTree::new();
    let left = element(&mut tree, NodeId::ROOT, "div");
    let right = element(&mut tree, NodeId::ROOT, "div");
    let child = element(&mut tree, left, "p");

    tree.remove_child(right, child);

    assert_eq!(tree.children(left), &[child]);
    assert_eq!(tree.parent(child), Some(left));
}

#[test]
fn test_removed_node_can_be_appended_again() {
    let mut tree = DomTree::new();
    let from = element(&mut tree, NodeId::ROOT, "div");
    let to = element(&mut tree, NodeId::ROOT, "span");
    let existing = element(&mut tree, to, "x");
    let moved = element(&mut tree, from, "y");

    tree.remove_child(from, moved);
    tree.append_child(to, moved);

    assert_eq!(tree.children(from).len(), 0);
    assert_eq!(tree.children(to), &[existing, moved]);
    assert_eq!(tree.next_sibling(existing), Some(moved));
    assert_eq!(tree.prev_sibling(moved), Some(existing));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let existing = element(&mut tree, parent, "b");

    let new_child = tree.alloc(thicket_dom::NodeType::Element(ElementData::new("a")));
    tree.insert_before(parent, new_child, existing);

    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "a");
    let c = element(&mut tree, parent, "c");

    let b = tree.alloc(thicket_dom::NodeType::Element(ElementData::new("b")));
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_insert_before_unknown_reference_appends() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "a");
    let stranger = element(&mut tree, NodeId::ROOT, "p");

    let b = tree.alloc(thicket_dom::NodeType::Element(ElementData::new("b")));
    tree.insert_before(parent, b, stranger);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.prev_sibling(b), Some(a));
}
