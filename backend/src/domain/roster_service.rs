use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::errors::DomainResult;
use crate::domain::models::Child;
use crate::storage::RecordStore;

/// Service owning the children-per-parent roster
#[derive(Clone)]
pub struct RosterService {
    children: Arc<dyn RecordStore<Child>>,
}

impl RosterService {
    pub fn new(children: Arc<dyn RecordStore<Child>>) -> Self {
        Self { children }
    }

    pub async fn initialize(&self) -> DomainResult<()> {
        self.children.initialize().await?;
        Ok(())
    }

    /// Children registered under `parent_id`, in registration order
    pub async fn children_of(&self, parent_id: &str) -> DomainResult<Vec<Child>> {
        let children: Vec<Child> = self
            .children
            .read_all()
            .await?
            .into_iter()
            .filter(|child| child.parent_id == parent_id)
            .collect();

        debug!("Parent {} has {} known children", parent_id, children.len());
        Ok(children)
    }

    /// Append (parent_id, name) unless it is already on the roster.
    /// Returns true when a row was written.
    pub async fn add_if_new(&self, parent_id: &str, name: &str, gender: &str) -> DomainResult<bool> {
        // Always re-read: the roster may have grown earlier in the same request
        let exists = self
            .children
            .read_all()
            .await?
            .iter()
            .any(|child| child.parent_id == parent_id && child.name == name);

        if exists {
            return Ok(false);
        }

        let child = Child {
            parent_id: parent_id.to_string(),
            name: name.to_string(),
            gender: gender.to_string(),
        };
        self.children.append(&child).await?;

        info!("Added child {} for parent {}", name, parent_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryRecordStore;

    fn setup_test() -> (RosterService, MemoryRecordStore<Child>) {
        let store = MemoryRecordStore::new();
        let service = RosterService::new(Arc::new(store.clone()));
        (service, store)
    }

    #[tokio::test]
    async fn test_add_if_new_is_idempotent() {
        let (service, store) = setup_test();

        assert!(service.add_if_new("parent", "Amy", "F").await.unwrap());
        assert!(!service.add_if_new("parent", "Amy", "F").await.unwrap());

        let amys = store
            .snapshot()
            .into_iter()
            .filter(|c| c.parent_id == "parent" && c.name == "Amy")
            .count();
        assert_eq!(amys, 1);
    }

    #[tokio::test]
    async fn test_existing_child_keeps_original_gender() {
        let (service, store) = setup_test();

        service.add_if_new("parent", "Sam", "F").await.unwrap();
        service.add_if_new("parent", "Sam", "M").await.unwrap();

        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(store.snapshot()[0].gender, "F");
    }

    #[tokio::test]
    async fn test_same_name_under_different_parents() {
        let (service, store) = setup_test();

        assert!(service.add_if_new("p1", "Amy", "F").await.unwrap());
        assert!(service.add_if_new("p2", "Amy", "F").await.unwrap());

        assert_eq!(store.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_children_of_filters_and_keeps_order() {
        let (service, _store) = setup_test();

        service.add_if_new("p1", "Ben", "M").await.unwrap();
        service.add_if_new("p2", "Zoe", "F").await.unwrap();
        service.add_if_new("p1", "Amy", "F").await.unwrap();

        let names: Vec<String> = service
            .children_of("p1")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Ben", "Amy"]);

        assert!(service.children_of("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_if_new_sees_rows_written_elsewhere() {
        let (service, store) = setup_test();

        store
            .append(&Child {
                parent_id: "p1".to_string(),
                name: "Amy".to_string(),
                gender: "F".to_string(),
            })
            .await
            .unwrap();

        assert!(!service.add_if_new("p1", "Amy", "F").await.unwrap());
        assert_eq!(store.snapshot().len(), 1);
    }
}
