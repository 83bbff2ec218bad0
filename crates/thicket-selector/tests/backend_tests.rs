//! One compiled query over two unrelated backends: an arena document and an
//! `Rc` tree of UI controls whose names are computed on demand.

mod common;

use common::{ControlKind, ControlRef, attach, control, disabled, el, labels, select_ids};
use thicket_dom::{DomTree, NodeId};
use thicket_selector::Query;

/// Window#main > [Pane#toolbar > [Button#save, Button#undo(disabled)], Pane#form > [Label, CheckBox#agree, Button#submit]]
fn window() -> ControlRef {
    let root = control(ControlKind::Window, Some("main"), "Editor");
    let toolbar = attach(&root, control(ControlKind::Pane, Some("toolbar"), ""));
    let _ = attach(&toolbar, control(ControlKind::Button, Some("save"), "Save"));
    let _ = attach(&toolbar, disabled(ControlKind::Button, Some("undo"), "Undo"));
    let form = attach(&root, control(ControlKind::Pane, Some("form"), ""));
    let _ = attach(&form, control(ControlKind::Label, None, "Terms"));
    let _ = attach(&form, control(ControlKind::CheckBox, Some("agree"), "I agree"));
    let _ = attach(&form, control(ControlKind::Button, Some("submit"), "Submit"));
    root
}

#[test]
fn test_same_query_runs_on_both_backends() {
    let query = Query::parse("Button:not(.disabled)").unwrap();

    let controls = window();
    assert_eq!(labels(query.select([controls])), ["save", "submit"]);

    let mut tree = DomTree::new();
    let _ = el(&mut tree, NodeId::ROOT, "Button", &[("id", "ok")]);
    let _ = el(&mut tree, NodeId::ROOT, "Button", &[("id", "no"), ("class", "disabled")]);
    let _ = el(&mut tree, NodeId::ROOT, "button", &[("id", "lower")]);
    assert_eq!(select_ids(&tree, "Button:not(.disabled)"), ["ok"]);
    assert_eq!(query.select([tree.document()]).count(), 1);
}

#[test]
fn test_computed_names_and_attributes() {
    let root = window();
    let query = Query::parse("Pane#form > CheckBox[text^='I ']").unwrap();
    assert_eq!(labels(query.select([root.clone()])), ["agree"]);

    let query = Query::parse("[enabled=false]").unwrap();
    assert_eq!(labels(query.select([root])), ["undo"]);
}

#[test]
fn test_sibling_and_structural_on_controls() {
    let root = window();
    assert_eq!(
        labels(Query::parse("Label + CheckBox ~ Button").unwrap().select([root.clone()])),
        ["submit"]
    );
    assert_eq!(
        labels(Query::parse("Pane:last-child > :first-child").unwrap().select([root.clone()])),
        ["?"]
    );
    assert_eq!(
        labels(Query::parse("Window > :nth-child(2) Button").unwrap().select([root])),
        ["submit"]
    );
}

#[test]
fn test_matches_on_controls() {
    let root = window();
    let query = Query::parse("#toolbar Button").unwrap();
    let buttons = Query::parse("Button").unwrap();

    let matched: Vec<bool> = buttons.select([root]).map(|b| query.matches(&b)).collect();
    assert_eq!(matched, [true, true, false]);
}
