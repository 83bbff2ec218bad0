//! JSON document input.
//!
//! A document is one node or an array of nodes, placed under the document
//! node in order. Node shapes:
//! ```text
//! {"tag": "ul", "attrs": {"id": "menu"}, "children": [...]}   element
//! {"text": "hello"} or "hello"                                text
//! {"comment": "note"}                                         comment
//! ```

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;
use thicket_dom::{DomTree, ElementData, NodeId};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentNode {
    Element {
        tag: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    Text {
        text: String,
    },
    Comment {
        comment: String,
    },
    Bare(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Input {
    Many(Vec<DocumentNode>),
    One(DocumentNode),
}

/// Parse JSON text into a [`DomTree`].
///
/// # Errors
///
/// If the text is not JSON or not a document in one of the shapes above.
pub fn load(json: &str) -> Result<DomTree> {
    let input: Input = serde_json::from_str(json).context(
        "document must be a node or an array of nodes \
         ({\"tag\", \"attrs\", \"children\"}, {\"text\"}, {\"comment\"} or a string)",
    )?;

    let mut tree = DomTree::new();
    match input {
        Input::Many(nodes) => {
            for node in nodes {
                append(&mut tree, NodeId::ROOT, node);
            }
        }
        Input::One(node) => append(&mut tree, NodeId::ROOT, node),
    }

    debug!(nodes = tree.len(), "loaded document");
    Ok(tree)
}

fn append(tree: &mut DomTree, parent: NodeId, node: DocumentNode) {
    match node {
        DocumentNode::Element {
            tag,
            attrs,
            children,
        } => {
            let data = ElementData {
                tag_name: tag,
                attrs: attrs.into_iter().collect(),
            };
            let id = tree.append_element(parent, data);
            for child in children {
                append(tree, id, child);
            }
        }
        DocumentNode::Text { text } | DocumentNode::Bare(text) => {
            let _ = tree.append_text(parent, text);
        }
        DocumentNode::Comment { comment } => {
            let _ = tree.append_comment(parent, comment);
        }
    }
}
