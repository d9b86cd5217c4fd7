//! Item Documents
//!
//! Encodes an [`Item`] as a markdown document (header block plus a readable
//! body) and decodes documents back, accepting every historical header
//! schema. The encoder always writes current-generation key names.

use crate::domain::{now_timestamp, vault_path, Item};

use super::header::{parse_header, split_document, Header, FENCE};

/// Candidate key names per semantic field, current generation first
mod keys {
    pub const ID: &[&str] = &["id"];
    pub const TITLE: &[&str] = &["title"];
    pub const LINK: &[&str] = &["source", "link"];
    pub const CREATED: &[&str] = &["created", "createdAt"];
    pub const UPDATED: &[&str] = &["lastupdate", "updatedAt"];
    pub const FOLDER: &[&str] = &["collectionPath", "folder"];
    pub const DESCRIPTION: &[&str] = &["description"];
    pub const COLLECTION_ID: &[&str] = &["collectionId"];
    pub const COLLECTION_TITLE: &[&str] = &["collectionTitle"];
    pub const COLLECTION_PARENT_ID: &[&str] = &["collectionParentId"];
    pub const BANNER: &[&str] = &["banner"];
    pub const TYPE: &[&str] = &["type"];
    pub const ICON: &[&str] = &["icon"];
}

const DESCRIPTION_HEADING: &str = "\n## Description\n";
const DETAILS_MARKER: &str = "\n\n---\n## Details";

/// Render `item` as a complete document
pub fn encode(item: &Item) -> String {
    let mut lines: Vec<String> = vec![
        FENCE.to_string(),
        format!("id: {}", item.id),
        format!("title: \"{}\"", item.title),
        format!("source: {}", item.link),
        format!("created: {}", item.created_at),
        format!("lastupdate: {}", item.updated_at),
        format!("collectionId: {}", item.collection_id),
        format!("collectionTitle: \"{}\"", item.collection_title),
        format!("collectionPath: \"{}\"", item.folder),
    ];

    let optional = [
        ("collectionParentId", &item.collection_parent_id),
        ("banner", &item.banner),
        ("type", &item.item_type),
        ("icon", &item.icon),
    ];
    for (key, value) in optional {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("{}: {}", key, value));
        }
    }

    lines.push("tags:".to_string());
    lines.extend(item.tags.iter().map(|tag| format!("  - {}", tag)));
    lines.push(FENCE.to_string());

    lines.push(String::new());
    lines.push(format!("# {}", item.title));
    lines.push(String::new());
    if let Some(banner) = item.banner.as_deref().filter(|b| !b.is_empty()) {
        lines.push(format!("![Banner]({})", banner));
        lines.push(String::new());
    }
    lines.push("## Description".to_string());
    lines.push(item.description.clone());
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push("## Details".to_string());
    lines.push(format!("- **Link**: [Source]({})", item.link));
    lines.push(format!("- **Type**: {}", item.kind()));
    lines.push(format!(
        "- **Collection**: {} ({})",
        item.collection_title, item.folder
    ));
    lines.push(format!(
        "- **Tags**: {}",
        item.tags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    lines.push(format!("- **Created**: {}", display_date(&item.created_at)));
    lines.push(format!("- **Updated**: {}", display_date(&item.updated_at)));
    lines.push(String::new());

    lines.join("\n")
}

/// Parse a document into an item.
///
/// `source_path` is the document's vault path, used for defaults. Returns
/// `None` when the text has no header block or lacks `id` or `title`; such
/// documents are simply not catalog items.
pub fn decode(text: &str, source_path: &str) -> Option<Item> {
    let text = text.replace("\r\n", "\n");
    let (block, body) = split_document(&text)?;
    let header = parse_header(block);

    let id = header.first_non_empty(keys::ID)?.to_string();
    let title = header.first_non_empty(keys::TITLE)?.to_string();

    let folder = match header.first_of(keys::FOLDER) {
        Some(folder) => vault_path::normalize(folder),
        None => vault_path::parent(source_path).to_string(),
    };
    let collection_title = header
        .first_of(keys::COLLECTION_TITLE)
        .map(str::to_string)
        .unwrap_or_else(|| vault_path::last_segment(&folder).to_string());

    Some(Item {
        id,
        title,
        description: description_of(body, &header),
        link: header.first_of(keys::LINK).unwrap_or_default().to_string(),
        banner: optional(&header, keys::BANNER),
        item_type: optional(&header, keys::TYPE),
        icon: optional(&header, keys::ICON),
        tags: header.tags().to_vec(),
        collection_id: header.first_of(keys::COLLECTION_ID).unwrap_or_default().to_string(),
        collection_title,
        collection_path: folder.clone(),
        collection_parent_id: optional(&header, keys::COLLECTION_PARENT_ID),
        folder,
        created_at: timestamp(&header, keys::CREATED),
        updated_at: timestamp(&header, keys::UPDATED),
    })
}

fn optional(header: &Header, keys: &[&str]) -> Option<String> {
    header.first_non_empty(keys).map(str::to_string)
}

fn timestamp(header: &Header, keys: &[&str]) -> String {
    header
        .first_non_empty(keys)
        .map(str::to_string)
        .unwrap_or_else(now_timestamp)
}

/// Text between the description heading and the details section, falling
/// back to a legacy header key
fn description_of(body: &str, header: &Header) -> String {
    let body = format!("\n{}", body);
    if let Some(heading) = body.find(DESCRIPTION_HEADING) {
        let start = heading + DESCRIPTION_HEADING.len();
        if let Some(end) = body.rfind(DETAILS_MARKER).filter(|end| *end >= start) {
            return body[start..end].to_string();
        }
    }
    header.first_of(keys::DESCRIPTION).unwrap_or_default().to_string()
}

fn display_date(timestamp: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(timestamp) {
        Ok(date) => date
            .with_timezone(&chrono::Local)
            .format("%-m/%-d/%Y")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}
