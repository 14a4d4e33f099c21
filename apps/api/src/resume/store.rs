//! Resume Store — process-lifetime map of uploaded résumés.
//!
//! Nothing is persisted and nothing expires: the map grows until an entry is
//! deleted explicitly or the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::resume::{ResumeData, ResumeRecord};

/// Cheap to clone; all clones share the same map.
#[derive(Clone, Default)]
pub struct ResumeStore {
    records: Arc<RwLock<HashMap<Uuid, ResumeRecord>>>,
}

impl ResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new record under a freshly generated id and returns it.
    pub async fn insert(
        &self,
        filename: String,
        content: String,
        parsed_data: ResumeData,
    ) -> ResumeRecord {
        let mut records = self.records.write().await;

        let mut id = Uuid::new_v4();
        while records.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let record = ResumeRecord {
            id,
            filename,
            content,
            parsed_data,
            uploaded_at: Utc::now(),
        };
        records.insert(id, record.clone());
        record
    }

    /// All records, oldest upload first.
    pub async fn list(&self) -> Vec<ResumeRecord> {
        let mut records: Vec<_> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at).then(a.id.cmp(&b.id)));
        records
    }

    /// Returns the removed record, or `None` if the id was unknown.
    pub async fn remove(&self, id: Uuid) -> Option<ResumeRecord> {
        self.records.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[tokio::test]
    async fn test_insert_then_list() {
        let store = ResumeStore::new();
        let record = store
            .insert("cv.txt".to_string(), "hello".to_string(), ResumeData::default())
            .await;

        let listed = store.list().await;
        assert_eq!(listed.len(), 1);
        let fetched = &listed[0];
        assert_eq!(fetched.id, record.id);
        assert_eq!(fetched.filename, "cv.txt");
        assert_eq!(fetched.content, "hello");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = ResumeStore::new();
        let record = store
            .insert("cv.txt".to_string(), "hello".to_string(), ResumeData::default())
            .await;

        assert!(store.remove(record.id).await.is_some());
        assert!(store.remove(record.id).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_upload_time() {
        let store = ResumeStore::new();
        let first = store
            .insert("a.txt".to_string(), "a".to_string(), ResumeData::default())
            .await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store
            .insert("b.txt".to_string(), "b".to_string(), ResumeData::default())
            .await;

        let ids: Vec<_> = store.list().await.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_unique_ids() {
        let store = ResumeStore::new();
        let mut tasks = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .insert(format!("{i}.txt"), i.to_string(), ResumeData::default())
                    .await
                    .id
            }));
        }

        let mut ids = HashSet::new();
        for task in tasks {
            ids.insert(task.await.unwrap());
        }
        assert_eq!(ids.len(), 32);
        assert_eq!(store.len().await, 32);
    }
}
