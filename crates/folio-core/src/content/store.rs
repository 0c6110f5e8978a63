use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::edit_mode::{EditKey, EditModes};
use super::{ContentDocument, ListSection, ScalarSection, Section};
use crate::patch::Patch;
use crate::storage::{keys, KeyValueStore};

/// File name used for content exports
pub const EXPORT_FILE_NAME: &str = "portfolio-data.json";

/// The content document backed by a key-value store
///
/// Every mutation is applied to a copy first and only replaces the current
/// document once the copy has been persisted.
pub struct ContentStore<S: KeyValueStore> {
    storage: S,
    document: ContentDocument,
    edit_modes: EditModes,
}

impl<S: KeyValueStore> ContentStore<S> {
    /// Load the persisted document, or the bundled dataset if there is none
    pub fn open(storage: S) -> Result<Self> {
        let document = match storage.get(keys::CONTENT).context("Failed to read content")? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Stored content is unreadable, using bundled data: {}", e);
                ContentDocument::bundled()
            }),
            None => ContentDocument::bundled(),
        };

        Ok(Self {
            storage,
            document,
            edit_modes: EditModes::new(),
        })
    }

    pub fn document(&self) -> &ContentDocument {
        &self.document
    }

    pub fn edit_modes(&self) -> &EditModes {
        &self.edit_modes
    }

    pub fn toggle_edit_mode(&mut self, key: EditKey) -> bool {
        self.edit_modes.toggle(key)
    }

    /// Replace the whole document
    pub fn update_data(&mut self, document: ContentDocument) -> Result<()> {
        self.persist(&document)?;
        self.document = document;
        Ok(())
    }

    /// Save a section or a single item and close its edit mode
    pub fn save(&mut self, section: Section, id: Option<u64>, patch: &Patch) -> Result<()> {
        let mut document = self.document.clone();
        document.save(section, id, patch)?;
        self.persist(&document)?;

        let key = EditKey::for_save(section, id);
        info!(%key, "Saved content");
        self.document = document;
        self.edit_modes.toggle(key);
        Ok(())
    }

    pub fn save_section(&mut self, section: ScalarSection, patch: &Patch) -> Result<()> {
        self.save(Section::Scalar(section), None, patch)
    }

    pub fn save_item(&mut self, section: ListSection, id: u64, patch: &Patch) -> Result<()> {
        self.save(Section::Keyed(section), Some(id), patch)
    }

    /// Append a new item and open it for editing
    pub fn add_item(&mut self, section: ListSection, fields: &Patch) -> Result<u64> {
        let mut document = self.document.clone();
        let id = document.add_item(section, fields)?;
        self.persist(&document)?;

        info!(%section, id, "Added item");
        self.document = document;
        self.edit_modes.toggle(EditKey::Item(section, id));
        Ok(id)
    }

    pub fn delete_item(&mut self, section: ListSection, id: u64) -> Result<()> {
        let mut document = self.document.clone();
        document.delete_item(section, id)?;
        self.persist(&document)?;

        info!(%section, id, "Deleted item");
        self.document = document;
        Ok(())
    }

    /// The document as indented JSON
    pub fn export_data(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.document).context("Failed to serialize content")
    }

    /// Write the export to `portfolio-data.json` inside `dir`
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(EXPORT_FILE_NAME);
        let json = self.export_data()?;

        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
        fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;

        info!(path = %path.display(), "Exported content");
        Ok(path)
    }

    /// Replace the document with an imported one
    ///
    /// On failure the current document is left as it was.
    pub fn import_data(&mut self, json: &str) -> Result<()> {
        let document = ContentDocument::from_import(json)?;
        self.update_data(document)?;
        info!("Imported content");
        Ok(())
    }

    fn persist(&mut self, document: &ContentDocument) -> Result<()> {
        self.storage
            .set_json(keys::CONTENT, document)
            .context("Failed to save content")?;
        debug!("Persisted content");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentError, PostStatus};
    use crate::patch::into_object;
    use crate::storage::{FileStore, MemoryStore};
    use serde_json::json;
    use tempfile::TempDir;

    fn open(storage: &MemoryStore) -> ContentStore<MemoryStore> {
        ContentStore::open(storage.clone()).unwrap()
    }

    #[test]
    fn test_open_uses_bundled_data() {
        let storage = MemoryStore::new();
        let store = open(&storage);
        assert_eq!(store.document(), &ContentDocument::bundled());
        assert!(!storage.contains(keys::CONTENT).unwrap());
    }

    #[test]
    fn test_corrupt_content_falls_back() {
        let mut storage = MemoryStore::new();
        storage.set(keys::CONTENT, "{{{").unwrap();

        let store = open(&storage);
        assert_eq!(store.document(), &ContentDocument::bundled());
    }

    #[test]
    fn test_save_section_persists_and_toggles() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);

        store
            .save_section(
                ScalarSection::Personal,
                &into_object(json!({ "name": "Sam Lee" })),
            )
            .unwrap();
        assert!(store
            .edit_modes()
            .is_editing(EditKey::from(ScalarSection::Personal)));

        let reloaded = open(&storage);
        assert_eq!(reloaded.document().personal.name, "Sam Lee");
        assert!(reloaded.edit_modes().editing().is_empty());
    }

    #[test]
    fn test_save_item_toggles_row_key() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);

        let key = EditKey::Item(ListSection::Projects, 2);
        assert!(store.toggle_edit_mode(key));

        store
            .save_item(ListSection::Projects, 2, &into_object(json!({ "title": "Quarry 2" })))
            .unwrap();
        assert!(!store.edit_modes().is_editing(key));
        assert_eq!(store.document().projects[1].title, "Quarry 2");
    }

    #[test]
    fn test_save_missing_item_changes_nothing() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);

        let err = store
            .save_item(ListSection::Blog, 99, &into_object(json!({ "title": "x" })))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::ItemNotFound { id: 99, .. })
        ));
        assert!(!storage.contains(keys::CONTENT).unwrap());
        assert!(store.edit_modes().editing().is_empty());
    }

    #[test]
    fn test_add_delete_add_never_reuses_ids() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store.update_data(ContentDocument::default()).unwrap();

        let first = store.add_item(ListSection::Projects, &Patch::new()).unwrap();
        let second = store.add_item(ListSection::Projects, &Patch::new()).unwrap();
        assert_eq!((first, second), (1, 2));
        assert!(store
            .edit_modes()
            .is_editing(EditKey::Item(ListSection::Projects, second)));

        store.delete_item(ListSection::Projects, first).unwrap();

        // The counter survives a reload
        let mut store = open(&storage);
        let third = store.add_item(ListSection::Projects, &Patch::new()).unwrap();
        assert_ne!(third, first);
        assert_ne!(third, second);
        assert_eq!(
            store.document().ids(ListSection::Projects),
            vec![second, third]
        );
    }

    #[test]
    fn test_delete_missing_item() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        assert!(store.delete_item(ListSection::Education, 5).is_err());
        assert_eq!(store.document().education.len(), 1);
    }

    #[test]
    fn test_invalid_import_leaves_state_alone() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store
            .save_section(ScalarSection::Social, &into_object(json!({ "github": "gh" })))
            .unwrap();
        let before = store.document().clone();

        assert!(store.import_data("{ nope").is_err());
        assert_eq!(store.document(), &before);
        assert_eq!(open(&storage).document(), &before);
    }

    #[test]
    fn test_import_accepts_dashboard_form_values() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);

        store
            .import_data(
                r#"{
                    "personal": { "name": "Sam Lee", "age": "25", "phone": null },
                    "education": [{ "id": 1, "institution": "State U", "gpa": null }],
                    "testimonials": [{ "id": 1, "name": "Ada", "rating": "4" }],
                    "projects": [{ "id": 7, "featured": "true", "tags": "Rust, CLI" }],
                    "blog": [{ "id": 3, "publishedAt": "", "status": null }]
                }"#,
            )
            .unwrap();

        let doc = store.document();
        assert_eq!(doc.personal.age, Some(25));
        assert!(doc.personal.phone.is_empty());
        assert!(doc.education[0].gpa.is_empty());
        assert_eq!(doc.testimonials[0].rating, 4);
        assert!(doc.projects[0].featured);
        assert_eq!(doc.projects[0].tags, vec!["Rust", "CLI"]);
        assert_eq!(doc.blog[0].published_at, None);
        assert_eq!(doc.blog[0].status, PostStatus::Draft);
        assert_eq!(open(&storage).document(), doc);
    }

    #[test]
    fn test_open_keeps_dashboard_shaped_record() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                keys::CONTENT,
                r#"{"testimonials":[{"id":1,"rating":"5","message":"Great"}]}"#,
            )
            .unwrap();

        let store = open(&storage);
        assert_eq!(store.document().testimonials.len(), 1);
        assert_eq!(store.document().testimonials[0].rating, 5);
        assert!(store.document().projects.is_empty());
    }

    #[test]
    fn test_export_import_round_trip() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store
            .add_item(ListSection::Blog, &into_object(json!({ "title": "Hello" })))
            .unwrap();
        let exported = store.export_data().unwrap();

        let mut fresh = open(&MemoryStore::new());
        fresh.import_data(&exported).unwrap();
        assert_eq!(fresh.document(), store.document());
        assert_eq!(fresh.document().id_counters["blog"], 3);
    }

    #[test]
    fn test_export_to_dir_with_file_store() {
        let data = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let storage = FileStore::open(data.path()).unwrap();
        let mut store = ContentStore::open(storage).unwrap();
        store
            .save_section(ScalarSection::Resume, &into_object(json!({ "available": false })))
            .unwrap();

        let path = store.export_to_dir(out.path()).unwrap();
        assert!(path.ends_with(EXPORT_FILE_NAME));

        let text = fs::read_to_string(path).unwrap();
        let exported: ContentDocument = serde_json::from_str(&text).unwrap();
        assert!(!exported.resume.available);

        let reopened = ContentStore::open(FileStore::open(data.path()).unwrap()).unwrap();
        assert!(!reopened.document().resume.available);
    }
}
