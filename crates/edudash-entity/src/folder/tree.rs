//! Nested folder structure returned by tree queries.

use serde::{Deserialize, Serialize};

use super::model::Folder;
use crate::document::Document;

/// A folder together with its documents and sub-folders.
///
/// Serializes as the folder's own fields plus `documents` and `subFolders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    /// The folder itself.
    #[serde(flatten)]
    pub folder: Folder,
    /// Documents directly inside this folder, in sibling order.
    pub documents: Vec<Document>,
    /// Child folders, in sibling order.
    pub sub_folders: Vec<FolderNode>,
}

impl FolderNode {
    /// Number of folder levels below and including this node.
    pub fn height(&self) -> usize {
        1 + self
            .sub_folders
            .iter()
            .map(FolderNode::height)
            .max()
            .unwrap_or(0)
    }
}
