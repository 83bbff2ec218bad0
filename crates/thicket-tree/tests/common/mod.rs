//! A minimal `Rc`-backed tree used by the traversal and node-set tests.
//!
//! Every node counts how often its children were requested, so tests can
//! assert how lazy a walk is.

#![allow(dead_code)]

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use thicket_tree::TreeNode;

/// Backing storage for one node.
pub struct NodeData {
    /// Label used in assertions; doubles as the element name.
    pub name: String,
    /// Whether this node counts as an element.
    pub element: bool,
    parent: RefCell<Weak<NodeData>>,
    children: RefCell<Vec<Rc<NodeData>>>,
    children_calls: Cell<usize>,
}

/// Cheap handle into the test tree.
#[derive(Clone)]
pub struct TestNode(pub Rc<NodeData>);

impl TestNode {
    fn new(name: &str, element: bool) -> Self {
        Self(Rc::new(NodeData {
            name: name.to_string(),
            element,
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            children_calls: Cell::new(0),
        }))
    }

    /// How many times `children()` was called on this node.
    pub fn children_calls(&self) -> usize {
        self.0.children_calls.get()
    }

    /// The node's name, for readable assertions.
    pub fn label(&self) -> &str {
        &self.0.name
    }
}

/// Create a detached element node.
pub fn element(name: &str) -> TestNode {
    TestNode::new(name, true)
}

/// Create a detached non-element node.
pub fn text(name: &str) -> TestNode {
    TestNode::new(name, false)
}

/// Append `child` as the last child of `parent` and return the child.
pub fn append(parent: &TestNode, child: TestNode) -> TestNode {
    *child.0.parent.borrow_mut() = Rc::downgrade(&parent.0);
    parent.0.children.borrow_mut().push(Rc::clone(&child.0));
    child
}

/// Labels of a node sequence.
pub fn labels<I: IntoIterator<Item = TestNode>>(nodes: I) -> Vec<String> {
    nodes.into_iter().map(|n| n.label().to_string()).collect()
}

impl TreeNode for TestNode {
    type Identity = usize;
    type Children = std::vec::IntoIter<TestNode>;

    fn identity(&self) -> usize {
        Rc::as_ptr(&self.0).addr()
    }

    fn is_element(&self) -> bool {
        self.0.element
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.0.element.then(|| Cow::Borrowed(self.0.name.as_str()))
    }

    fn id(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn classes(&self) -> Vec<Cow<'_, str>> {
        Vec::new()
    }

    fn attribute(&self, _name: &str) -> Option<Cow<'_, str>> {
        None
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(TestNode)
    }

    fn children(&self) -> Self::Children {
        self.0.children_calls.set(self.0.children_calls.get() + 1);
        self.0
            .children
            .borrow()
            .iter()
            .cloned()
            .map(TestNode)
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn previous_sibling(&self) -> Option<Self> {
        let parent = self.0.parent.borrow().upgrade()?;
        let siblings = parent.children.borrow();
        let index = siblings.iter().position(|s| Rc::ptr_eq(s, &self.0))?;
        index
            .checked_sub(1)
            .map(|prev| TestNode(Rc::clone(&siblings[prev])))
    }
}
