//! Tree Nodes
//!
//! The derived folder/item index used for navigation. Never persisted.

use serde::{Deserialize, Serialize};

use super::item::Item;

/// A folder in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    pub name: String,
    pub path: String,
    pub icon: Option<String>,
    pub children: Vec<TreeNode>,
    /// Recursive count of item descendants
    pub item_count: usize,
}

/// An item leaf in the index; `path` is the backing document path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemNode {
    pub name: String,
    pub path: String,
    pub icon: Option<String>,
    pub item: Item,
}

/// One entry of the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Folder(FolderNode),
    Item(ItemNode),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder(f) => &f.name,
            TreeNode::Item(i) => &i.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::Folder(f) => &f.path,
            TreeNode::Item(i) => &i.path,
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            TreeNode::Folder(f) => f.icon.as_deref(),
            TreeNode::Item(i) => i.icon.as_deref(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder(_))
    }

    /// Items below this node; an item counts itself
    pub fn item_count(&self) -> usize {
        match self {
            TreeNode::Folder(f) => f.item_count,
            TreeNode::Item(_) => 1,
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Folder(f) => &f.children,
            TreeNode::Item(_) => &[],
        }
    }

    /// Depth-first search for the node at `path`
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        if self.path() == path {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(path))
    }
}

/// Search a forest for the node at `path`
pub fn find_node<'a>(forest: &'a [TreeNode], path: &str) -> Option<&'a TreeNode> {
    forest.iter().find_map(|node| node.find(path))
}
