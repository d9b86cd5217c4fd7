//! Repository Integration Tests
//!
//! Tests for ItemRepository against the in-memory and filesystem stores.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::codec;
    use crate::config::Settings;
    use crate::domain::{DomainError, Item, TreeNode};
    use crate::repository::{
        DocumentStore, EntryKind, FsDocumentStore, ItemRepository, MemoryDocumentStore,
    };

    fn setup_memory() -> (Arc<MemoryDocumentStore>, ItemRepository) {
        let store = Arc::new(MemoryDocumentStore::new());
        let repo = ItemRepository::new(store.clone());
        (store, repo)
    }

    fn tagged(title: &str, folder: &str, tags: &[&str]) -> Item {
        let mut item = Item::new(title, folder);
        item.tags = tags.iter().map(|t| t.to_string()).collect();
        item
    }

    #[tokio::test]
    async fn test_create_item_path() {
        let (store, repo) = setup_memory();

        let created = repo.create(&Item::new("My Note", "Items")).await.expect("Failed to create");
        assert_eq!(created.path, "Items/My Note.md");
        assert_eq!(store.entry_kind("Items").await.unwrap(), Some(EntryKind::Folder));
        assert_eq!(
            store.entry_kind("Items/My Note.md").await.unwrap(),
            Some(EntryKind::Document)
        );
    }

    #[tokio::test]
    async fn test_create_sanitizes_title() {
        let (_, repo) = setup_memory();

        let created = repo.create(&Item::new("A/B: C", "Items")).await.unwrap();
        assert_eq!(created.path, "Items/A-B- C.md");
        assert_eq!(created.item.title, "A/B: C");
    }

    #[tokio::test]
    async fn test_create_collision() {
        let (_, repo) = setup_memory();

        repo.create(&Item::new("Twice", "Items")).await.unwrap();
        let err = repo.create(&Item::new("Twice", "Items")).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_create_validates_before_writing() {
        let (store, repo) = setup_memory();

        let bad = tagged("Bad tags", "Items", &["has space"]);
        let err = repo.create(&bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = repo.create(&Item::new("No folder", "")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        assert_eq!(store.document_count().await, 0);
        assert_eq!(store.entry_kind("Items").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_by_path_round_trip() {
        let (_, repo) = setup_memory();

        let mut item = tagged("Rust Book", "Items/Books", &["rust", "reading"]);
        item.link = "https://doc.rust-lang.org/book/".into();
        item.description = "Read it twice.".into();
        let created = repo.create(&item).await.unwrap();

        let found = repo.get_by_path(&created.path).await.unwrap().expect("item missing");
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_get_by_path_missing_or_not_item() {
        let (store, repo) = setup_memory();
        store.insert("Notes/plain.md", "# just a note").await;

        assert!(repo.get_by_path("Notes/nothing.md").await.unwrap().is_none());
        assert!(repo.get_by_path("Notes/plain.md").await.unwrap().is_none());
        assert!(repo.get_by_path("Notes").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_in_place_keeps_created_at() {
        let (_, repo) = setup_memory();

        let mut item = Item::new("Stay", "Items");
        item.created_at = "2020-01-01T00:00:00.000Z".into();
        let created = repo.create(&item).await.unwrap();

        let mut edited = created.item.clone();
        edited.description = "changed".into();
        edited.created_at = "2099-01-01T00:00:00.000Z".into();
        let updated = repo.update(&created.path, &edited).await.unwrap();

        assert_eq!(updated.path, created.path);
        assert_eq!(updated.item.created_at, "2020-01-01T00:00:00.000Z");
        assert_eq!(updated.item.description, "changed");

        let stored = repo.get_by_path(&created.path).await.unwrap().unwrap();
        assert_eq!(stored.item.description, "changed");
        assert_eq!(stored.item.created_at, "2020-01-01T00:00:00.000Z");
    }

    #[tokio::test]
    async fn test_update_moves_on_title_and_folder_change() {
        let (store, repo) = setup_memory();

        let created = repo.create(&Item::new("Old", "Items")).await.unwrap();
        let mut edited = created.item.clone();
        edited.title = "New".into();
        edited.folder = "Archive/2024".into();

        let updated = repo.update(&created.path, &edited).await.unwrap();
        assert_eq!(updated.path, "Archive/2024/New.md");
        assert_eq!(updated.item.collection_path, "Archive/2024");
        assert_eq!(store.entry_kind("Items/Old.md").await.unwrap(), None);

        let moved = repo.get_by_path("Archive/2024/New.md").await.unwrap().unwrap();
        assert_eq!(moved.item.id, created.item.id);
        assert_eq!(moved.item.folder, "Archive/2024");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_, repo) = setup_memory();

        let err = repo.update("Items/Ghost.md", &Item::new("Ghost", "Items")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_onto_existing_document_fails_untouched() {
        let (_, repo) = setup_memory();

        let first = repo.create(&Item::new("First", "Items")).await.unwrap();
        repo.create(&Item::new("Second", "Items")).await.unwrap();

        let mut edited = first.item.clone();
        edited.title = "Second".into();
        edited.description = "should not be written".into();
        let err = repo.update(&first.path, &edited).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExists(_)));

        let stored = repo.get_by_path(&first.path).await.unwrap().unwrap();
        assert_eq!(stored.item.description, "");
    }

    #[tokio::test]
    async fn test_delete_item() {
        let (store, repo) = setup_memory();

        let created = repo.create(&Item::new("To delete", "Items")).await.unwrap();
        repo.delete(&created.path).await.expect("Delete failed");
        assert!(repo.get_by_path(&created.path).await.unwrap().is_none());

        // Already gone, or a folder: no-op
        repo.delete(&created.path).await.unwrap();
        repo.delete("Items").await.unwrap();
        assert_eq!(store.entry_kind("Items").await.unwrap(), Some(EntryKind::Folder));
    }

    #[tokio::test]
    async fn test_list_all_skips_non_items_and_filters() {
        let (store, repo) = setup_memory();

        repo.create(&Item::new("One", "Items")).await.unwrap();
        repo.create(&Item::new("Two", "Items/Sub")).await.unwrap();
        repo.create(&Item::new("Three", "Other")).await.unwrap();
        store.insert("Items/journal.md", "no header here").await;
        store.insert("Items/half.md", "---\ntitle: no id\n---\n").await;
        store.insert("Items/image.png", "binary").await;

        let all = repo.list_all(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let mut under_items: Vec<String> = repo
            .list_all(Some("Items"))
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.item.title)
            .collect();
        under_items.sort();
        assert_eq!(under_items, vec!["One".to_string(), "Two".to_string()]);
    }

    #[tokio::test]
    async fn test_list_known_folders() {
        let (store, repo) = setup_memory();

        store.create_folder("Empty/Nested").await.unwrap();
        store.insert("Loose/doc.md", "text").await;
        repo.create(&Item::new("One", "Items")).await.unwrap();

        let folders = repo.list_known_folders().await.unwrap();
        assert_eq!(folders, vec!["Empty", "Empty/Nested", "Items", "Loose"]);
    }

    #[tokio::test]
    async fn test_list_all_tags() {
        let (_, repo) = setup_memory();

        repo.create(&tagged("a", "Items", &["rust", "web"])).await.unwrap();
        repo.create(&tagged("b", "Items", &["async", "rust"])).await.unwrap();

        let tags = repo.list_all_tags().await.unwrap();
        assert_eq!(tags, vec!["async", "rust", "web"]);
    }

    #[tokio::test]
    async fn test_tree_from_repository() {
        let (store, repo) = setup_memory();

        store.create_folder("Empty").await.unwrap();
        repo.create(&Item::new("One", "A")).await.unwrap();
        repo.create(&Item::new("Two", "A/B")).await.unwrap();
        repo.create(&Item::new("Three", "C")).await.unwrap();

        let icons = HashMap::from([("C".to_string(), "icons/c.svg".to_string())]);
        let forest = repo.tree(&icons).await.unwrap();
        let roots: Vec<(&str, usize)> = forest.iter().map(|n| (n.path(), n.item_count())).collect();
        assert_eq!(roots, vec![("A", 2), ("C", 1), ("Empty", 0)]);
        assert_eq!(forest[1].icon(), Some("icons/c.svg"));
        assert!(matches!(&forest[0].children()[0], TreeNode::Folder(f) if f.path == "A/B"));
    }

    #[tokio::test]
    async fn test_ensure_default_folder() {
        let (store, repo) = setup_memory();

        repo.ensure_default_folder(&Settings::default()).await.unwrap();
        assert_eq!(store.entry_kind("Items").await.unwrap(), Some(EntryKind::Folder));
    }

    #[tokio::test]
    async fn test_fs_store_crud() {
        let dir = TempDir::new().unwrap();
        let repo = ItemRepository::new(Arc::new(FsDocumentStore::new(dir.path())));

        let created = repo.create(&tagged("On Disk", "Items/Sub", &["fs"])).await.unwrap();
        assert!(dir.path().join("Items/Sub/On Disk.md").is_file());

        let on_disk = std::fs::read_to_string(dir.path().join("Items/Sub/On Disk.md")).unwrap();
        assert_eq!(codec::decode(&on_disk, &created.path).unwrap(), created.item);

        let mut edited = created.item.clone();
        edited.title = "Renamed".into();
        let updated = repo.update(&created.path, &edited).await.unwrap();
        assert_eq!(updated.path, "Items/Sub/Renamed.md");
        assert!(!dir.path().join("Items/Sub/On Disk.md").exists());

        let listed = repo.list_all(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].path, "Items/Sub/Renamed.md");

        repo.delete(&updated.path).await.unwrap();
        assert!(repo.list_all(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fs_store_ignores_hidden_and_rejects_escape() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".config")).unwrap();
        std::fs::write(dir.path().join(".config/hidden.md"), "---\nid: x\ntitle: y\n---\n").unwrap();
        std::fs::create_dir_all(dir.path().join("Visible")).unwrap();

        let store = FsDocumentStore::new(dir.path());
        assert!(store.list_documents().await.unwrap().is_empty());
        assert_eq!(store.list_folders().await.unwrap(), vec!["Visible".to_string()]);

        let err = store.read("../outside.md").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_fs_store_create_collision() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path());

        store.create("a.md", "one").await.unwrap();
        let err = store.create("a.md", "two").await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExists(_)));
        assert_eq!(store.read("a.md").await.unwrap(), "one");
    }
    #[tokio::test]
    async fn test_update_non_item_document_is_not_found() {
        let (store, repo) = setup_memory();
        store.insert("Items/journal.md", "plain note").await;

        let err = repo
            .update("Items/journal.md", &Item::new("Journal", "Items"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(store.read("Items/journal.md").await.unwrap(), "plain note");
    }

    #[tokio::test]
    async fn test_case_only_rename_onto_other_document_fails() {
        let (_, repo) = setup_memory();

        let lower = repo.create(&Item::new("note", "Items")).await.unwrap();
        let mut upper = Item::new("Note", "Items");
        upper.description = "keep me".into();
        repo.create(&upper).await.unwrap();

        let mut edited = lower.item.clone();
        edited.title = "Note".into();
        let err = repo.update(&lower.path, &edited).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExists(_)));

        let kept = repo.get_by_path("Items/Note.md").await.unwrap().unwrap();
        assert_eq!(kept.item.description, "keep me");
        assert_eq!(repo.list_all(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fs_case_only_rename_keeps_other_document() {
        let dir = TempDir::new().unwrap();
        let repo = ItemRepository::new(Arc::new(FsDocumentStore::new(dir.path())));

        let lower = repo.create(&Item::new("note", "Items")).await.unwrap();
        let mut upper = Item::new("Note", "Items");
        upper.description = "precious".into();
        if let Err(DomainError::AlreadyExists(_)) = repo.create(&upper).await {
            // Case-insensitive filesystem: both titles are one file
            return;
        }

        let mut edited = lower.item.clone();
        edited.title = "Note".into();
        let err = repo.update(&lower.path, &edited).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExists(_)));

        let kept = repo.get_by_path("Items/Note.md").await.unwrap().unwrap();
        assert_eq!(kept.item.description, "precious");
        assert_eq!(repo.list_all(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fs_case_only_rename_without_collision() {
        let dir = TempDir::new().unwrap();
        let repo = ItemRepository::new(Arc::new(FsDocumentStore::new(dir.path())));

        let created = repo.create(&Item::new("note", "Items")).await.unwrap();
        let mut edited = created.item.clone();
        edited.title = "Note".into();

        let updated = repo.update(&created.path, &edited).await.unwrap();
        assert_eq!(updated.path, "Items/Note.md");
        let listed = repo.list_all(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].path, "Items/Note.md");
    }

    #[tokio::test]
    async fn test_fs_store_rename_refuses_existing_target() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path());
        store.create("a.md", "one").await.unwrap();
        store.create("b.md", "two").await.unwrap();

        let err = store.rename("a.md", "b.md").await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExists(_)));
        assert_eq!(store.read("b.md").await.unwrap(), "two");
        assert!(store.same_document("a.md", "a.md").await.unwrap());
        assert!(!store.same_document("a.md", "b.md").await.unwrap());
    }
}
