//! In-memory implementation of both store traits.
//!
//! Mirrors the PostgreSQL behavior that callers depend on: foreign keys
//! are checked on insert and reparent, deleting a folder cascades to its
//! subtree, and batch updates are all-or-nothing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use edudash_core::error::AppError;
use edudash_core::result::AppResult;
use edudash_entity::document::{CreateDocument, Document, DocumentType};
use edudash_entity::folder::{CreateFolder, Folder};
use edudash_entity::ordering::{OrdUpdate, sort_siblings};

use crate::store::{DocumentStore, FolderStore, descendant_move_error};

#[derive(Debug, Default)]
struct MemoryState {
    folders: HashMap<Uuid, Folder>,
    documents: HashMap<Uuid, Document>,
    /// Last timestamp handed out, kept strictly increasing.
    clock: Option<DateTime<Utc>>,
}

impl MemoryState {
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.clock {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.clock = Some(next);
        next
    }

    fn folder_exists(&self, id: Option<Uuid>) -> bool {
        id.is_none_or(|id| self.folders.contains_key(&id))
    }

    /// Whether the upward walk from `start` (inclusive) meets any of `ids`.
    ///
    /// The walk ends at a root, at a missing parent, or at a folder already
    /// visited, so it terminates even on corrupt cyclic data.
    fn ancestry_meets(&self, start: Uuid, ids: &[Uuid]) -> bool {
        let mut visited = HashSet::new();
        let mut current = Some(start);
        while let Some(id) = current {
            if ids.contains(&id) {
                return true;
            }
            if !visited.insert(id) {
                break;
            }
            current = self.folders.get(&id).and_then(|f| f.parent_id);
        }
        false
    }

    fn ensure_acyclic(&self, parent_id: Option<Uuid>, moving: &[Uuid]) -> AppResult<()> {
        match parent_id {
            Some(target) if self.ancestry_meets(target, moving) => Err(descendant_move_error()),
            _ => Ok(()),
        }
    }

    /// The folder and every folder below it.
    fn subtree(&self, root: Uuid) -> HashSet<Uuid> {
        let mut found = HashSet::from([root]);
        let mut frontier = vec![root];
        while let Some(current) = frontier.pop() {
            for folder in self.folders.values() {
                if folder.parent_id == Some(current) && found.insert(folder.id) {
                    frontier.push(folder.id);
                }
            }
        }
        found
    }
}

/// Folder and document store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.state.read().await.folders.get(&id).cloned())
    }

    async fn find_siblings(&self, parent_id: Option<Uuid>) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        let mut siblings: Vec<Folder> = state
            .folders
            .values()
            .filter(|f| f.parent_id == parent_id)
            .cloned()
            .collect();
        sort_siblings(&mut siblings);
        Ok(siblings)
    }

    async fn find_children_of(&self, parent_ids: &[Uuid]) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        let mut children: Vec<Folder> = state
            .folders
            .values()
            .filter(|f| f.parent_id.is_some_and(|p| parent_ids.contains(&p)))
            .cloned()
            .collect();
        sort_siblings(&mut children);
        Ok(children)
    }

    async fn max_ord(&self, parent_id: Option<Uuid>) -> AppResult<Option<i32>> {
        let state = self.state.read().await;
        Ok(state
            .folders
            .values()
            .filter(|f| f.parent_id == parent_id)
            .map(|f| f.ord)
            .max())
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut state = self.state.write().await;
        if !state.folder_exists(data.parent_id) {
            return Err(AppError::not_found("Parent folder not found"));
        }
        let now = state.tick();
        let folder = Folder {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            parent_id: data.parent_id,
            ord: 0,
            created_at: now,
            updated_at: now,
        };
        state.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn update_details(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Folder> {
        let mut state = self.state.write().await;
        let now = state.tick();
        let folder = state
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.name = name.to_string();
        folder.description = description.map(str::to_string);
        folder.updated_at = now;
        Ok(folder.clone())
    }

    async fn set_ords(&self, updates: &[OrdUpdate]) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(missing) = updates.iter().find(|u| !state.folders.contains_key(&u.id)) {
            return Err(AppError::not_found(format!("Folder {} not found", missing.id)));
        }
        let now = state.tick();
        for update in updates {
            if let Some(folder) = state.folders.get_mut(&update.id) {
                folder.ord = update.ord;
                folder.updated_at = now;
            }
        }
        Ok(())
    }

    async fn reassign(&self, parent_id: Option<Uuid>, ordered_ids: &[Uuid]) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.folder_exists(parent_id) {
            return Err(AppError::not_found("Parent folder not found"));
        }
        if let Some(missing) = ordered_ids.iter().find(|id| !state.folders.contains_key(id)) {
            return Err(AppError::not_found(format!("Folder {missing} not found")));
        }
        state.ensure_acyclic(parent_id, ordered_ids)?;
        let now = state.tick();
        for (position, id) in ordered_ids.iter().enumerate() {
            if let Some(folder) = state.folders.get_mut(id) {
                folder.parent_id = parent_id;
                folder.ord = position as i32;
                folder.updated_at = now;
            }
        }
        Ok(())
    }

    async fn move_to(&self, id: Uuid, parent_id: Option<Uuid>, ord: Option<i32>) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.folder_exists(parent_id) {
            return Err(AppError::not_found("Target folder not found"));
        }
        if !state.folders.contains_key(&id) {
            return Err(AppError::not_found(format!("Folder {id} not found")));
        }
        state.ensure_acyclic(parent_id, &[id])?;
        let now = state.tick();
        let folder = state
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.parent_id = parent_id;
        if let Some(ord) = ord {
            folder.ord = ord;
        }
        folder.updated_at = now;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state.folders.contains_key(&id) {
            return Ok(false);
        }
        let doomed = state.subtree(id);
        state.folders.retain(|fid, _| !doomed.contains(fid));
        state
            .documents
            .retain(|_, d| d.folder_id.is_none_or(|fid| !doomed.contains(&fid)));
        debug!(folder_id = %id, removed_folders = doomed.len(), "Cascade delete");
        Ok(true)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        Ok(self.state.read().await.documents.get(&id).cloned())
    }

    async fn find_in_folder(&self, folder_id: Uuid) -> AppResult<Vec<Document>> {
        let state = self.state.read().await;
        let mut documents: Vec<Document> = state
            .documents
            .values()
            .filter(|d| d.folder_id == Some(folder_id))
            .cloned()
            .collect();
        sort_siblings(&mut documents);
        Ok(documents)
    }

    async fn find_in_folders(
        &self,
        folder_ids: &[Uuid],
        doc_type: Option<DocumentType>,
    ) -> AppResult<Vec<Document>> {
        let state = self.state.read().await;
        let mut documents: Vec<Document> = state
            .documents
            .values()
            .filter(|d| d.folder_id.is_some_and(|f| folder_ids.contains(&f)))
            .filter(|d| doc_type.is_none_or(|t| d.doc_type == t))
            .cloned()
            .collect();
        sort_siblings(&mut documents);
        Ok(documents)
    }

    async fn find_by_type(&self, doc_type: DocumentType) -> AppResult<Vec<Document>> {
        let state = self.state.read().await;
        let mut documents: Vec<Document> = state
            .documents
            .values()
            .filter(|d| d.doc_type == doc_type)
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        Ok(documents)
    }

    async fn max_ord(&self, folder_id: Uuid) -> AppResult<Option<i32>> {
        let state = self.state.read().await;
        Ok(state
            .documents
            .values()
            .filter(|d| d.folder_id == Some(folder_id))
            .map(|d| d.ord)
            .max())
    }

    async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        let mut state = self.state.write().await;
        if !state.folder_exists(data.folder_id) {
            return Err(AppError::not_found("Folder not found"));
        }
        let now = state.tick();
        let document = Document {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            file_url: data.file_url.clone(),
            file_size: data.file_size,
            doc_type: data.doc_type,
            skill_level: data.skill_level,
            requirements: data.requirements.clone(),
            folder_id: data.folder_id,
            ord: 0,
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
        };
        state.documents.insert(document.id, document.clone());
        Ok(document)
    }

    async fn set_ords(&self, updates: &[OrdUpdate]) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(missing) = updates.iter().find(|u| !state.documents.contains_key(&u.id)) {
            return Err(AppError::not_found(format!(
                "Document {} not found",
                missing.id
            )));
        }
        let now = state.tick();
        for update in updates {
            if let Some(document) = state.documents.get_mut(&update.id) {
                document.ord = update.ord;
                document.updated_at = now;
            }
        }
        Ok(())
    }

    async fn reassign(&self, folder_id: Uuid, ordered_ids: &[Uuid]) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.folders.contains_key(&folder_id) {
            return Err(AppError::not_found("Folder not found"));
        }
        if let Some(missing) = ordered_ids
            .iter()
            .find(|id| !state.documents.contains_key(id))
        {
            return Err(AppError::not_found(format!("Document {missing} not found")));
        }
        let now = state.tick();
        for (position, id) in ordered_ids.iter().enumerate() {
            if let Some(document) = state.documents.get_mut(id) {
                document.folder_id = Some(folder_id);
                document.ord = position as i32;
                document.updated_at = now;
            }
        }
        Ok(())
    }

    async fn move_to(&self, id: Uuid, folder_id: Uuid, ord: i32) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.folders.contains_key(&folder_id) {
            return Err(AppError::not_found("Folder not found"));
        }
        let now = state.tick();
        let document = state
            .documents
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))?;
        document.folder_id = Some(folder_id);
        document.ord = ord;
        document.updated_at = now;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.state.write().await.documents.remove(&id).is_some())
    }
}
