//! Nested folder tree assembly.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use edudash_core::error::AppError;
use edudash_database::store::{DocumentStore, FolderStore};
use edudash_entity::document::{Document, DocumentType};
use edudash_entity::folder::{Folder, FolderNode};

/// Builds the folder tree shown to teachers and administrators.
///
/// The walk is breadth-first with one folder query and one document query
/// per level. Folders below `max_depth` levels are not loaded.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Document store.
    documents: Arc<dyn DocumentStore>,
    /// Number of folder levels to include, counting the roots as one.
    max_depth: usize,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        documents: Arc<dyn DocumentStore>,
        max_depth: usize,
    ) -> Self {
        Self {
            folders,
            documents,
            max_depth,
        }
    }

    /// The full tree with documents of every type.
    pub async fn folder_tree(&self) -> Result<Vec<FolderNode>, AppError> {
        self.fetch_tree(None).await
    }

    /// The full tree with only training documents attached.
    pub async fn training_tree(&self) -> Result<Vec<FolderNode>, AppError> {
        self.fetch_tree(Some(DocumentType::Training)).await
    }

    /// Loads root folders and their descendants, attaching documents that
    /// match `doc_type` (all documents when `None`).
    pub async fn fetch_tree(
        &self,
        doc_type: Option<DocumentType>,
    ) -> Result<Vec<FolderNode>, AppError> {
        let mut levels: Vec<Vec<Folder>> = Vec::new();
        let mut documents: Vec<Document> = Vec::new();
        let mut current = self.folders.find_siblings(None).await?;

        while !current.is_empty() && levels.len() < self.max_depth {
            let ids: Vec<Uuid> = current.iter().map(|f| f.id).collect();
            documents.extend(self.documents.find_in_folders(&ids, doc_type).await?);

            let next = if levels.len() + 1 < self.max_depth {
                self.folders.find_children_of(&ids).await?
            } else {
                Vec::new()
            };
            levels.push(std::mem::replace(&mut current, next));
        }

        debug!(
            levels = levels.len(),
            documents = documents.len(),
            filter = ?doc_type,
            "Folder tree loaded"
        );

        Ok(assemble(levels, documents))
    }
}

/// Nest each level under the one above it, deepest first.
///
/// Every level and the document list arrive in sibling order; grouping by
/// parent keeps that order within each group.
fn assemble(levels: Vec<Vec<Folder>>, documents: Vec<Document>) -> Vec<FolderNode> {
    let mut docs_by_folder: HashMap<Uuid, Vec<Document>> = HashMap::new();
    for document in documents {
        if let Some(folder_id) = document.folder_id {
            docs_by_folder.entry(folder_id).or_default().push(document);
        }
    }

    let mut children_by_parent: HashMap<Uuid, Vec<FolderNode>> = HashMap::new();
    let mut roots = Vec::new();

    for level in levels.into_iter().rev() {
        let mut grouped: HashMap<Uuid, Vec<FolderNode>> = HashMap::new();
        for folder in level {
            let node = FolderNode {
                documents: docs_by_folder.remove(&folder.id).unwrap_or_default(),
                sub_folders: children_by_parent.remove(&folder.id).unwrap_or_default(),
                folder,
            };
            match node.folder.parent_id {
                Some(parent_id) => grouped.entry(parent_id).or_default().push(node),
                None => roots.push(node),
            }
        }
        children_by_parent = grouped;
    }

    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use edudash_database::MemoryStore;
    use edudash_entity::document::CreateDocument;
    use edudash_entity::folder::CreateFolder;
    use edudash_entity::ordering::OrdUpdate;

    async fn folder(store: &MemoryStore, name: &str, parent_id: Option<Uuid>) -> Folder {
        FolderStore::create(
            store,
            &CreateFolder {
                name: name.to_string(),
                description: None,
                parent_id,
            },
        )
        .await
        .unwrap()
    }

    async fn document(store: &MemoryStore, title: &str, folder_id: Uuid, doc_type: DocumentType) {
        DocumentStore::create(
            store,
            &CreateDocument {
                title: title.to_string(),
                file_url: format!("/uploads/{title}.pdf"),
                file_size: 100,
                doc_type,
                skill_level: 1,
                requirements: None,
                folder_id: Some(folder_id),
                user_id: Uuid::new_v4(),
            },
        )
        .await
        .unwrap();
    }

    fn tree_service(store: &MemoryStore, max_depth: usize) -> TreeService {
        TreeService::new(Arc::new(store.clone()), Arc::new(store.clone()), max_depth)
    }

    fn names(nodes: &[FolderNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.folder.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_empty_library() {
        let store = MemoryStore::new();
        assert!(tree_service(&store, 4).folder_tree().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_nesting_and_sibling_order() {
        let store = MemoryStore::new();
        let first = folder(&store, "First", None).await;
        let second = folder(&store, "Second", None).await;
        let child_a = folder(&store, "Child A", Some(first.id)).await;
        let child_b = folder(&store, "Child B", Some(first.id)).await;
        FolderStore::set_ords(
            &store,
            &[
                OrdUpdate::new(first.id, 2),
                OrdUpdate::new(second.id, 1),
                OrdUpdate::new(child_a.id, 5),
                OrdUpdate::new(child_b.id, 3),
            ],
        )
        .await
        .unwrap();

        let tree = tree_service(&store, 4).folder_tree().await.unwrap();

        assert_eq!(names(&tree), vec!["Second", "First"]);
        assert_eq!(names(&tree[1].sub_folders), vec!["Child B", "Child A"]);
        assert!(tree[0].sub_folders.is_empty());
    }

    #[tokio::test]
    async fn test_depth_limit_omits_deeper_levels() {
        let store = MemoryStore::new();
        let l1 = folder(&store, "L1", None).await;
        let l2 = folder(&store, "L2", Some(l1.id)).await;
        let l3 = folder(&store, "L3", Some(l2.id)).await;
        document(&store, "deep", l3.id, DocumentType::Training).await;

        let tree = tree_service(&store, 2).folder_tree().await.unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].height(), 2);
        assert!(tree[0].sub_folders[0].sub_folders.is_empty());
    }

    #[tokio::test]
    async fn test_training_filter_applies_at_every_level() {
        let store = MemoryStore::new();
        let root = folder(&store, "Root", None).await;
        let child = folder(&store, "Child", Some(root.id)).await;
        document(&store, "root-guide", root.id, DocumentType::Training).await;
        document(&store, "root-notes", root.id, DocumentType::Personal).await;
        document(&store, "child-guide", child.id, DocumentType::Training).await;
        document(&store, "child-share", child.id, DocumentType::SharedAdmin).await;

        let svc = tree_service(&store, 4);
        let all = svc.folder_tree().await.unwrap();
        let training = svc.training_tree().await.unwrap();

        assert_eq!(all[0].documents.len(), 2);
        assert_eq!(all[0].sub_folders[0].documents.len(), 2);
        assert_eq!(training[0].documents.len(), 1);
        assert_eq!(training[0].documents[0].title, "root-guide");
        assert_eq!(training[0].sub_folders[0].documents.len(), 1);
        assert_eq!(training[0].sub_folders[0].documents[0].title, "child-guide");
    }

    #[tokio::test]
    async fn test_serialized_shape() {
        let store = MemoryStore::new();
        let root = folder(&store, "Root", None).await;
        document(&store, "guide", root.id, DocumentType::Training).await;

        let tree = tree_service(&store, 4).folder_tree().await.unwrap();
        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(json[0]["name"], "Root");
        assert!(json[0]["subFolders"].as_array().unwrap().is_empty());
        assert_eq!(json[0]["documents"][0]["type"], "TRAINING");
        assert!(json[0]["parentId"].is_null());
    }
}
