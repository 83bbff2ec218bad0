use std::borrow::Cow;
use std::fmt;
use std::slice;

use thicket_tree::TreeNode;

use crate::{DomTree, ElementData, NodeId, NodeType};

/// A node of a [`DomTree`], borrowed for querying.
///
/// Copying is free. Two handles are the same node when they point into the
/// same tree at the same [`NodeId`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) const fn new(tree: &'a DomTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The arena index of this node.
    #[must_use]
    pub const fn node_id(self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to.
    #[must_use]
    pub const fn tree(self) -> &'a DomTree {
        self.tree
    }

    /// The element data, if this is an element.
    #[must_use]
    pub fn element(self) -> Option<&'a ElementData> {
        self.tree.as_element(self.id)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tree.get(self.id).map(|node| &node.node_type) {
            Some(NodeType::Element(data)) => write!(f, "<{}>#{}", data.tag_name, self.id.0),
            Some(NodeType::Text(_)) => write!(f, "#text#{}", self.id.0),
            Some(NodeType::Comment(_)) => write!(f, "#comment#{}", self.id.0),
            Some(NodeType::Document) => f.write_str("#document"),
            None => write!(f, "#invalid#{}", self.id.0),
        }
    }
}

/// Children of a [`NodeRef`], in document order.
pub struct Children<'a> {
    tree: &'a DomTree,
    ids: slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| NodeRef::new(self.tree, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<'a> TreeNode for NodeRef<'a> {
    /// Tree address plus arena index.
    type Identity = (usize, NodeId);
    type Children = Children<'a>;

    fn identity(&self) -> Self::Identity {
        (std::ptr::from_ref(self.tree).addr(), self.id)
    }

    fn is_element(&self) -> bool {
        self.element().is_some()
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.element().map(|e| Cow::Borrowed(e.tag_name.as_str()))
    }

    fn id(&self) -> Option<Cow<'_, str>> {
        self.element().and_then(ElementData::id).map(Cow::Borrowed)
    }

    fn classes(&self) -> Vec<Cow<'_, str>> {
        self.element()
            .map(|e| e.classes().map(Cow::Borrowed).collect())
            .unwrap_or_default()
    }

    fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        self.element()
            .and_then(|e| e.attrs.get(name))
            .map(|value| Cow::Borrowed(value.as_str()))
    }

    fn parent(&self) -> Option<Self> {
        self.tree.parent(self.id).map(|id| Self::new(self.tree, id))
    }

    fn children(&self) -> Self::Children {
        Children {
            tree: self.tree,
            ids: self.tree.children(self.id).iter(),
        }
    }

    fn previous_sibling(&self) -> Option<Self> {
        self.tree
            .prev_sibling(self.id)
            .map(|id| Self::new(self.tree, id))
    }
}
