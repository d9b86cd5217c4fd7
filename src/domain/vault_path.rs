//! Vault Paths
//!
//! Folder and document paths are `/`-separated and relative to the vault
//! root. The root folder is the empty path.

/// Characters that cannot appear in a document file name
const ILLEGAL_FILE_NAME_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replacement for illegal file name characters
pub const FILE_NAME_PLACEHOLDER: char = '-';

/// Document extension for catalog items
pub const DOCUMENT_EXTENSION: &str = "md";

/// Normalize a vault path: backslashes become `/`, empty and `.` segments
/// are dropped, so there are no leading, trailing or doubled slashes.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Path one level up, or `""` for top-level entries
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Last segment of a path
pub fn last_segment(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Join a folder and a child name
pub fn join(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

/// Every ancestor folder of `path`, nearest first, excluding the root
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    let mut current = path;
    std::iter::from_fn(move || {
        current = parent(current);
        if current.is_empty() {
            None
        } else {
            Some(current)
        }
    })
}

/// Whether the path names a markdown document
pub fn is_document(path: &str) -> bool {
    path.rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
        .unwrap_or(false)
}

/// Make a title usable as a file name
pub fn sanitize_file_name(title: &str) -> String {
    title
        .chars()
        .map(|c| if ILLEGAL_FILE_NAME_CHARS.contains(&c) { FILE_NAME_PLACEHOLDER } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// `<folder>/<sanitized title>.md`
pub fn item_file_path(folder: &str, title: &str) -> String {
    let file_name = format!("{}.{}", sanitize_file_name(title), DOCUMENT_EXTENSION);
    normalize(&join(&normalize(folder), &file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/Items//Books/"), "Items/Books");
        assert_eq!(normalize("Items\\Books"), "Items/Books");
        assert_eq!(normalize("./Items"), "Items");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_parent_and_segment() {
        assert_eq!(parent("A/B/C"), "A/B");
        assert_eq!(parent("A"), "");
        assert_eq!(last_segment("A/B/C"), "C");
        assert_eq!(last_segment("A"), "A");
    }

    #[test]
    fn test_ancestors() {
        let all: Vec<&str> = ancestors("A/B/C/item.md").collect();
        assert_eq!(all, vec!["A/B/C", "A/B", "A"]);
        assert_eq!(ancestors("item.md").count(), 0);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("A/B: C"), "A-B- C");
        assert_eq!(sanitize_file_name("  what? <now>  "), "what- -now-");
        assert_eq!(sanitize_file_name("plain"), "plain");
    }

    #[test]
    fn test_item_file_path() {
        assert_eq!(item_file_path("Items", "My Note"), "Items/My Note.md");
        assert_eq!(item_file_path("Items/", "A/B: C"), "Items/A-B- C.md");
        assert_eq!(item_file_path("", "Root"), "Root.md");
    }

    #[test]
    fn test_is_document() {
        assert!(is_document("Items/a.md"));
        assert!(is_document("Items/a.MD"));
        assert!(!is_document("Items/a.png"));
        assert!(!is_document("Items/readme"));
    }
}
