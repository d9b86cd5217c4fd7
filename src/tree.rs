//! Tree Builder
//!
//! Rebuilds the folder/item index from the flat item list and the store's
//! folder set. The index is derived on every read and never persisted.

use std::collections::HashMap;

use pinyin::ToPinyin;

use crate::domain::{vault_path, FolderNode, ItemEntry, ItemNode, TreeNode};

enum Child {
    Folder(usize),
    Item(usize),
}

struct FolderSlot {
    path: String,
    children: Vec<Child>,
}

/// Path-keyed folder arena, local to one build
#[derive(Default)]
struct FolderArena {
    slots: Vec<FolderSlot>,
    index: HashMap<String, usize>,
    roots: Vec<Child>,
}

impl FolderArena {
    /// Index of the folder at `path`, creating it and any missing ancestors
    fn get_or_create(&mut self, path: &str) -> usize {
        if let Some(&idx) = self.index.get(path) {
            return idx;
        }

        let mut missing = vec![path];
        let mut parent = None;
        for ancestor in vault_path::ancestors(path) {
            if let Some(&idx) = self.index.get(ancestor) {
                parent = Some(idx);
                break;
            }
            missing.push(ancestor);
        }

        let mut created = 0;
        for folder in missing.into_iter().rev() {
            created = self.slots.len();
            self.slots.push(FolderSlot {
                path: folder.to_string(),
                children: Vec::new(),
            });
            self.index.insert(folder.to_string(), created);
            match parent {
                Some(p) => self.slots[p].children.push(Child::Folder(created)),
                None => self.roots.push(Child::Folder(created)),
            }
            parent = Some(created);
        }
        created
    }

    fn attach_item(&mut self, folder: &str, entry: usize) {
        if folder.is_empty() {
            self.roots.push(Child::Item(entry));
        } else {
            let idx = self.get_or_create(folder);
            self.slots[idx].children.push(Child::Item(entry));
        }
    }

    fn materialize(
        &self,
        child: &Child,
        entries: &[ItemEntry],
        folder_icons: &HashMap<String, String>,
    ) -> TreeNode {
        match child {
            Child::Folder(idx) => {
                let slot = &self.slots[*idx];
                TreeNode::Folder(FolderNode {
                    name: vault_path::last_segment(&slot.path).to_string(),
                    path: slot.path.clone(),
                    icon: folder_icons.get(&slot.path).cloned(),
                    children: slot
                        .children
                        .iter()
                        .map(|c| self.materialize(c, entries, folder_icons))
                        .collect(),
                    item_count: 0,
                })
            }
            Child::Item(idx) => {
                let entry = &entries[*idx];
                TreeNode::Item(ItemNode {
                    name: entry.item.title.clone(),
                    path: entry.path.clone(),
                    icon: entry.item.icon.clone(),
                    item: entry.item.clone(),
                })
            }
        }
    }
}

/// Build the index.
///
/// Every folder in `known_folders` and every folder an item references gets
/// a node, with ancestors synthesized on demand. Items in the root folder
/// become root nodes. Children are ordered folders first, then by name;
/// `item_count` is filled in last. Never fails.
pub fn build(
    entries: &[ItemEntry],
    known_folders: &[String],
    folder_icons: &HashMap<String, String>,
) -> Vec<TreeNode> {
    let mut arena = FolderArena::default();

    for folder in known_folders {
        let folder = vault_path::normalize(folder);
        if !folder.is_empty() {
            arena.get_or_create(&folder);
        }
    }

    for (idx, entry) in entries.iter().enumerate() {
        arena.attach_item(&vault_path::normalize(&entry.item.folder), idx);
    }

    let mut forest: Vec<TreeNode> = arena
        .roots
        .iter()
        .map(|root| arena.materialize(root, entries, folder_icons))
        .collect();

    sort_nodes(&mut forest);
    compute_item_counts(&mut forest);
    forest
}

/// Locale-aware comparison key: Chinese characters by pinyin, everything
/// else case-folded
pub fn sort_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.chars() {
        match c.to_pinyin() {
            Some(p) => key.push_str(p.plain()),
            None => key.extend(c.to_lowercase()),
        }
    }
    key
}

/// Folders before items, then ascending by name; ties keep input order
fn sort_nodes(nodes: &mut [TreeNode]) {
    nodes.sort_by_cached_key(|node| (!node.is_folder(), sort_key(node.name())));
    for node in nodes.iter_mut() {
        if let TreeNode::Folder(folder) = node {
            sort_nodes(&mut folder.children);
        }
    }
}

/// Post-order pass setting each folder's recursive item count
fn compute_item_counts(nodes: &mut [TreeNode]) -> usize {
    let mut total = 0;
    for node in nodes.iter_mut() {
        total += match node {
            TreeNode::Folder(folder) => {
                folder.item_count = compute_item_counts(&mut folder.children);
                folder.item_count
            }
            TreeNode::Item(_) => 1,
        };
    }
    total
}

/// Nodes in display order paired with their depth
pub fn flatten(forest: &[TreeNode]) -> Vec<(&TreeNode, usize)> {
    fn collect<'a>(nodes: &'a [TreeNode], depth: usize, result: &mut Vec<(&'a TreeNode, usize)>) {
        for node in nodes {
            result.push((node, depth));
            collect(node.children(), depth + 1, result);
        }
    }

    let mut result = Vec::new();
    collect(forest, 0, &mut result);
    result
}
