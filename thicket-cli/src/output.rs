//! Rendering matched nodes.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Serialize;
use thicket_dom::{ElementData, NodeRef};

/// Longest text preview shown after a match, in characters.
const PREVIEW_CHARS: usize = 60;

/// How matches are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One opening tag per line, with a text preview.
    Text,
    /// A JSON array of `{id, tag, attrs, text}` objects.
    Json,
}

/// Terminal colors for the text format, or none.
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn tag(&self, text: &str) -> String {
        if self.enabled {
            text.cyan().to_string()
        } else {
            text.to_owned()
        }
    }

    fn name(&self, text: &str) -> String {
        if self.enabled {
            text.yellow().to_string()
        } else {
            text.to_owned()
        }
    }

    fn value(&self, text: &str) -> String {
        if self.enabled {
            text.green().to_string()
        } else {
            text.to_owned()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_owned()
        }
    }
}

#[derive(Serialize)]
struct MatchRecord<'a> {
    id: usize,
    tag: &'a str,
    attrs: BTreeMap<&'a str, &'a str>,
    text: String,
}

/// Write `matches` to `out` in `format`.
///
/// # Errors
///
/// If writing to `out` fails.
pub fn write_matches<W: Write>(
    out: &mut W,
    matches: &[NodeRef<'_>],
    format: Format,
    palette: &Palette,
) -> Result<()> {
    match format {
        Format::Text => {
            for node in matches {
                let Some(data) = node.element() else { continue };
                write!(out, "{}", opening_tag(data, palette))?;
                if let Some(text) = preview(&node.tree().text_content(node.node_id())) {
                    write!(out, "  {}", palette.dim(&text))?;
                }
                writeln!(out)?;
            }
        }
        Format::Json => {
            let records: Vec<MatchRecord<'_>> = matches
                .iter()
                .filter_map(|node| {
                    let data = node.element()?;
                    Some(MatchRecord {
                        id: node.node_id().0,
                        tag: &data.tag_name,
                        attrs: data
                            .attrs
                            .iter()
                            .map(|(k, v)| (k.as_str(), v.as_str()))
                            .collect(),
                        text: node.tree().text_content(node.node_id()),
                    })
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// `<tag name="value" ...>` with attributes sorted by name.
fn opening_tag(data: &ElementData, palette: &Palette) -> String {
    let mut attrs: Vec<(&String, &String)> = data.attrs.iter().collect();
    attrs.sort();

    let mut tag = format!("<{}", palette.tag(&data.tag_name));
    for (name, value) in attrs {
        if value.is_empty() {
            tag.push(' ');
            tag.push_str(&palette.name(name));
        } else {
            let quoted = format!("\"{value}\"");
            tag.push_str(&format!(" {}={}", palette.name(name), palette.value(&quoted)));
        }
    }
    tag.push('>');
    tag
}

/// Whitespace-collapsed text, cut to [`PREVIEW_CHARS`]. `None` if blank.
fn preview(text: &str) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    if collapsed.chars().count() <= PREVIEW_CHARS {
        return Some(collapsed);
    }
    let mut cut: String = collapsed.chars().take(PREVIEW_CHARS - 1).collect();
    cut.push('…');
    Some(cut)
}
