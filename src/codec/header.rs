//! Header Block Parser
//!
//! A small line-oriented reader for the metadata header at the top of an
//! item document. It understands only the subset the catalog writes (and
//! wrote historically), not general YAML.
//!
//! Grammar, one rule per line kind:
//!
//! ```text
//! document    = [BOM] fence NL { header-line } fence [NL body]
//! fence       = "---" { SP }
//! header-line = pair | list-entry | ignored
//! pair        = key ":" [ SP ] value          ; key = text before the first ':',
//!                                             ; trimmed, non-empty, not starting with "-"
//! list-entry  = { SP } "-" [ SP value ]
//! tags-block  = "tags:" [ SP inline-list ] NL { list-entry | ignored }
//! inline-list = "[" value { "," value } "]" | value { "," value }
//! ```
//!
//! Tag list terminator: after a `tags:` pair with an empty value, every
//! `list-entry` belongs to the tag list; the list ends at the first line
//! that is a `pair`, or at the closing fence. Lines that are neither
//! (blank or stray text) are skipped without ending the list.
//! List entries outside a tags-block are ignored. When a key repeats, the
//! last value wins.

use std::collections::HashMap;

/// Opening and closing line of the header block
pub const FENCE: &str = "---";

/// Parsed header: scalar fields plus the tag list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    fields: HashMap<String, String>,
    tags: Vec<String>,
}

impl Header {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value of the first candidate key present, in priority order
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Like [`Header::first_of`], treating empty values as absent
    pub fn first_non_empty(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().filter_map(|key| self.get(key)).find(|v| !v.is_empty())
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Split a document into its header block and body.
///
/// Returns `None` when the document does not open with a fence line or the
/// header is never closed. Expects `\n` line endings.
pub fn split_document(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let (first, rest) = text.split_once('\n')?;
    if first.trim_end() != FENCE {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((header.strip_suffix('\n').unwrap_or(header), body));
        }
        offset += line.len();
    }
    None
}

/// Parse the lines between the fences
pub fn parse_header(block: &str) -> Header {
    let mut header = Header::default();
    let mut in_tags = false;

    for line in block.lines() {
        let trimmed = line.trim();

        if in_tags {
            if let Some(entry) = list_entry(trimmed) {
                push_tag(&mut header.tags, entry);
                continue;
            }
            if split_pair(trimmed).is_none() {
                continue;
            }
            in_tags = false;
        }

        if list_entry(trimmed).is_some() {
            continue;
        }

        let Some((key, value)) = split_pair(trimmed) else {
            continue;
        };

        if key == "tags" {
            header.tags.clear();
            if value.is_empty() {
                in_tags = true;
            } else {
                for tag in parse_inline_list(value) {
                    push_tag(&mut header.tags, tag);
                }
            }
            continue;
        }

        header.fields.insert(key.to_string(), unquote(value).to_string());
    }

    header
}

fn list_entry(trimmed: &str) -> Option<&str> {
    if trimmed == "-" {
        return Some("");
    }
    trimmed.strip_prefix("- ").map(str::trim)
}

fn split_pair(trimmed: &str) -> Option<(&str, &str)> {
    let (key, value) = trimmed.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || key.starts_with('-') {
        return None;
    }
    Some((key, value.trim()))
}

fn push_tag(tags: &mut Vec<String>, raw: &str) {
    let tag = unquote(raw.trim()).trim();
    let tag = tag.strip_prefix('#').unwrap_or(tag);
    if !tag.is_empty() {
        tags.push(tag.to_string());
    }
}

fn parse_inline_list(value: &str) -> impl Iterator<Item = &str> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    inner.split(',').map(str::trim)
}

/// Strip one leading and one trailing double quote, or a matching pair of
/// single quotes
pub fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return &value[1..value.len() - 1];
    }
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}
