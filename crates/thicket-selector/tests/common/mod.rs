//! Shared fixtures: a document builder over `thicket-dom`, and a UI-control
//! tree that implements `TreeNode` on its own, with computed names and
//! instrumented child access.

#![allow(dead_code)]

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use thicket_dom::{DomTree, ElementData, NodeId, NodeRef};
use thicket_selector::Query;
use thicket_tree::TreeNode;

// ========== documents ==========

/// Append `<tag attrs...>` to `parent`.
pub fn el(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let data = attrs
        .iter()
        .fold(ElementData::new(tag), |data, (name, value)| {
            data.with_attribute(*name, *value)
        });
    tree.append_element(parent, data)
}

/// Run `selector` from the document node and collect node ids.
pub fn select(tree: &DomTree, selector: &str) -> Vec<NodeId> {
    Query::parse(selector)
        .unwrap()
        .select([tree.document()])
        .map(NodeRef::node_id)
        .collect()
}

/// Run `selector` from the document node and collect `id` attributes.
pub fn select_ids(tree: &DomTree, selector: &str) -> Vec<String> {
    select(tree, selector)
        .into_iter()
        .map(|id| {
            tree.as_element(id)
                .and_then(ElementData::id)
                .unwrap_or("?")
                .to_string()
        })
        .collect()
}

// ========== UI controls ==========

/// Kind of a UI control. The selector name is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Window,
    Pane,
    Button,
    CheckBox,
    Label,
}

/// Backing storage for one control.
pub struct Control {
    /// What the control is.
    pub kind: ControlKind,
    /// Automation id, used as the selector id.
    pub automation_id: Option<String>,
    /// Displayed text, exposed as the `text` attribute.
    pub text: String,
    /// Exposed as the `disabled` class.
    pub enabled: bool,
    parent: RefCell<Weak<Control>>,
    children: RefCell<Vec<Rc<Control>>>,
    children_calls: Cell<usize>,
}

/// Handle into a control tree.
#[derive(Clone)]
pub struct ControlRef(pub Rc<Control>);

impl ControlRef {
    /// How many times `children()` was called on this control.
    pub fn children_calls(&self) -> usize {
        self.0.children_calls.get()
    }

    /// Automation id or `?`.
    pub fn label(&self) -> String {
        self.0.automation_id.clone().unwrap_or_else(|| "?".to_string())
    }
}

fn build(kind: ControlKind, automation_id: Option<&str>, text: &str, enabled: bool) -> ControlRef {
    ControlRef(Rc::new(Control {
        kind,
        automation_id: automation_id.map(str::to_string),
        text: text.to_string(),
        enabled,
        parent: RefCell::new(Weak::new()),
        children: RefCell::new(Vec::new()),
        children_calls: Cell::new(0),
    }))
}

/// A detached, enabled control.
pub fn control(kind: ControlKind, automation_id: Option<&str>, text: &str) -> ControlRef {
    build(kind, automation_id, text, true)
}

/// A detached, disabled control.
pub fn disabled(kind: ControlKind, automation_id: Option<&str>, text: &str) -> ControlRef {
    build(kind, automation_id, text, false)
}

/// Attach `child` under `parent` and return the child.
pub fn attach(parent: &ControlRef, child: ControlRef) -> ControlRef {
    *child.0.parent.borrow_mut() = Rc::downgrade(&parent.0);
    parent.0.children.borrow_mut().push(Rc::clone(&child.0));
    child
}

/// Labels of a control sequence.
pub fn labels<I: IntoIterator<Item = ControlRef>>(nodes: I) -> Vec<String> {
    nodes.into_iter().map(|n| n.label()).collect()
}

impl TreeNode for ControlRef {
    type Identity = usize;
    type Children = std::vec::IntoIter<ControlRef>;

    fn identity(&self) -> usize {
        Rc::as_ptr(&self.0).addr()
    }

    fn is_element(&self) -> bool {
        true
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        // computed, not stored
        Some(Cow::Owned(format!("{:?}", self.0.kind)))
    }

    fn id(&self) -> Option<Cow<'_, str>> {
        self.0.automation_id.as_deref().map(Cow::Borrowed)
    }

    fn classes(&self) -> Vec<Cow<'_, str>> {
        if self.0.enabled {
            Vec::new()
        } else {
            vec![Cow::Borrowed("disabled")]
        }
    }

    fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "text" => Some(Cow::Borrowed(self.0.text.as_str())),
            "enabled" => Some(Cow::Owned(self.0.enabled.to_string())),
            _ => None,
        }
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(ControlRef)
    }

    fn children(&self) -> Self::Children {
        self.0.children_calls.set(self.0.children_calls.get() + 1);
        self.0
            .children
            .borrow()
            .iter()
            .cloned()
            .map(ControlRef)
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn previous_sibling(&self) -> Option<Self> {
        let parent = self.0.parent.borrow().upgrade()?;
        let siblings = parent.children.borrow();
        let index = siblings.iter().position(|s| Rc::ptr_eq(s, &self.0))?;
        index
            .checked_sub(1)
            .map(|prev| ControlRef(Rc::clone(&siblings[prev])))
    }
}
