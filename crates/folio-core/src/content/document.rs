//! The content document and its section-level operations
//!
//! All operations here are pure edits of an in-memory document; persistence
//! is handled by [`ContentStore`](super::ContentStore).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::models::{
    BlogPost, Education, Experience, Item, Personal, Project, Resume, Skills, Social,
    Testimonial,
};
use super::{lenient, ContentError, ListSection, ScalarSection, Section};
use crate::patch::{self, Patch};

const BUNDLED: &str = include_str!("../../data/portfolio.json");

/// Everything displayed on the site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentDocument {
    #[serde(deserialize_with = "lenient::nullable")]
    pub personal: Personal,
    #[serde(deserialize_with = "lenient::nullable")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub skills: Skills,
    #[serde(deserialize_with = "lenient::nullable")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub testimonials: Vec<Testimonial>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub blog: Vec<BlogPost>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub social: Social,
    #[serde(deserialize_with = "lenient::nullable")]
    pub resume: Resume,

    /// Last id handed out per list section
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub id_counters: BTreeMap<String, u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentDocument {
    /// The dataset shipped with the crate
    pub fn bundled() -> Self {
        serde_json::from_str(BUNDLED).unwrap_or_else(|e| {
            warn!("Bundled content is unreadable: {}", e);
            ContentDocument::default()
        })
    }

    /// Parse an imported document, merging its top-level sections onto the
    /// bundled dataset
    pub fn from_import(text: &str) -> Result<Self, ContentError> {
        let imported = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(ContentError::InvalidImport("expected a JSON object".into())),
            Err(e) => return Err(ContentError::InvalidImport(e.to_string())),
        };

        patch::merge(&Self::bundled(), &imported)
            .map_err(|e| ContentError::InvalidImport(e.to_string()))
    }

    /// One section as JSON
    pub fn section_value(&self, section: Section) -> Value {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => map.remove(section.as_str()).unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Ids of a list section, in display order
    pub fn ids(&self, section: ListSection) -> Vec<u64> {
        self.list(section).ids()
    }

    /// A single list item as JSON
    pub fn item(&self, section: ListSection, id: u64) -> Option<Value> {
        self.list(section).item_value(id)
    }

    /// Id the next `add_item` on `section` will use
    ///
    /// Always above both the stored counter and every id in the list, so ids
    /// of deleted items are never handed out again.
    pub fn next_id(&self, section: ListSection) -> Result<u64, ContentError> {
        let counter = self
            .id_counters
            .get(section.as_str())
            .copied()
            .unwrap_or(0);
        let highest = self.ids(section).into_iter().max().unwrap_or(0);
        counter
            .max(highest)
            .checked_add(1)
            .ok_or(ContentError::IdExhausted { section })
    }

    /// Shallow-merge `patch` into a scalar section
    pub fn save_section(
        &mut self,
        section: ScalarSection,
        patch: &Patch,
    ) -> Result<(), ContentError> {
        let invalid = |source| ContentError::InvalidFields {
            section: section.to_string(),
            source,
        };

        match section {
            ScalarSection::Personal => {
                self.personal = patch::merge(&self.personal, patch).map_err(invalid)?
            }
            ScalarSection::Skills => {
                self.skills = patch::merge(&self.skills, patch).map_err(invalid)?
            }
            ScalarSection::Social => {
                self.social = patch::merge(&self.social, patch).map_err(invalid)?
            }
            ScalarSection::Resume => {
                self.resume = patch::merge(&self.resume, patch).map_err(invalid)?
            }
        }
        Ok(())
    }

    /// Shallow-merge `patch` into the item with the given id
    ///
    /// The item keeps its id even if the patch carries a different one.
    pub fn update_item(
        &mut self,
        section: ListSection,
        id: u64,
        patch: &Patch,
    ) -> Result<(), ContentError> {
        let mut fields = patch.clone();
        fields.insert("id".to_string(), Value::from(id));

        let found = self
            .list_mut(section)
            .update(id, &fields)
            .map_err(|source| ContentError::InvalidFields {
                section: section.to_string(),
                source,
            })?;

        if found {
            Ok(())
        } else {
            Err(ContentError::ItemNotFound { section, id })
        }
    }

    /// Save either kind of section
    ///
    /// List sections need an id, scalar sections must not get one.
    pub fn save(
        &mut self,
        section: Section,
        id: Option<u64>,
        patch: &Patch,
    ) -> Result<(), ContentError> {
        match (section, id) {
            (Section::Scalar(s), None) => self.save_section(s, patch),
            (Section::Scalar(s), Some(_)) => Err(ContentError::UnexpectedId {
                section: s.to_string(),
            }),
            (Section::Keyed(s), Some(id)) => self.update_item(s, id, patch),
            (Section::Keyed(s), None) => Err(ContentError::IdRequired { section: s }),
        }
    }

    /// Append a new item built from `fields` and return its id
    pub fn add_item(&mut self, section: ListSection, fields: &Patch) -> Result<u64, ContentError> {
        let id = self.next_id(section)?;

        let mut fields = fields.clone();
        fields.insert("id".to_string(), Value::from(id));

        self.list_mut(section)
            .append(&fields)
            .map_err(|source| ContentError::InvalidFields {
                section: section.to_string(),
                source,
            })?;
        self.id_counters.insert(section.as_str().to_string(), id);
        Ok(id)
    }

    pub fn delete_item(&mut self, section: ListSection, id: u64) -> Result<(), ContentError> {
        if self.list_mut(section).remove(id) {
            Ok(())
        } else {
            Err(ContentError::ItemNotFound { section, id })
        }
    }

    fn list(&self, section: ListSection) -> &dyn ItemList {
        match section {
            ListSection::Experience => &self.experience,
            ListSection::Education => &self.education,
            ListSection::Projects => &self.projects,
            ListSection::Testimonials => &self.testimonials,
            ListSection::Blog => &self.blog,
        }
    }

    fn list_mut(&mut self, section: ListSection) -> &mut dyn ItemList {
        match section {
            ListSection::Experience => &mut self.experience,
            ListSection::Education => &mut self.education,
            ListSection::Projects => &mut self.projects,
            ListSection::Testimonials => &mut self.testimonials,
            ListSection::Blog => &mut self.blog,
        }
    }
}

/// Type-erased access to a list section
trait ItemList {
    fn ids(&self) -> Vec<u64>;
    fn item_value(&self, id: u64) -> Option<Value>;
    fn update(&mut self, id: u64, patch: &Patch) -> Result<bool, serde_json::Error>;
    fn append(&mut self, fields: &Patch) -> Result<(), serde_json::Error>;
    fn remove(&mut self, id: u64) -> bool;
}

impl<T: Item> ItemList for Vec<T> {
    fn ids(&self) -> Vec<u64> {
        self.iter().map(Item::id).collect()
    }

    fn item_value(&self, id: u64) -> Option<Value> {
        self.iter()
            .find(|item| item.id() == id)
            .and_then(|item| serde_json::to_value(item).ok())
    }

    fn update(&mut self, id: u64, patch: &Patch) -> Result<bool, serde_json::Error> {
        let Some(item) = self.iter_mut().find(|item| item.id() == id) else {
            return Ok(false);
        };
        let merged = patch::merge(&*item, patch)?;
        *item = merged;
        Ok(true)
    }

    fn append(&mut self, fields: &Patch) -> Result<(), serde_json::Error> {
        let item = patch::merge(&T::default(), fields)?;
        self.push(item);
        Ok(())
    }

    /// Removes the first item with `id` only
    fn remove(&mut self, id: u64) -> bool {
        match self.iter().position(|item| item.id() == id) {
            Some(index) => {
                Vec::remove(self, index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::ProjectStatus;
    use crate::patch::into_object;
    use serde_json::json;

    fn empty() -> ContentDocument {
        ContentDocument::default()
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let doc = ContentDocument::bundled();
        assert!(!doc.personal.name.is_empty());
        assert_eq!(doc.ids(ListSection::Projects), vec![1, 2, 3]);
        assert_eq!(doc.projects[1].status, ProjectStatus::InProgress);
        assert!(!doc.skills.technical.is_empty());
        assert!(doc.id_counters.is_empty());
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let mut doc = empty();
        let first = doc.add_item(ListSection::Projects, &Patch::new()).unwrap();
        let second = doc.add_item(ListSection::Projects, &Patch::new()).unwrap();
        assert_eq!((first, second), (1, 2));
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let mut doc = empty();
        let first = doc.add_item(ListSection::Projects, &Patch::new()).unwrap();
        let second = doc.add_item(ListSection::Projects, &Patch::new()).unwrap();
        doc.delete_item(ListSection::Projects, first).unwrap();

        let third = doc.add_item(ListSection::Projects, &Patch::new()).unwrap();
        assert_ne!(third, first);
        assert_ne!(third, second);
        assert_eq!(doc.ids(ListSection::Projects), vec![second, third]);

        // Deleting the newest item must not hand its id out again either
        doc.delete_item(ListSection::Projects, third).unwrap();
        let fourth = doc.add_item(ListSection::Projects, &Patch::new()).unwrap();
        assert_eq!(fourth, 4);
    }

    #[test]
    fn test_next_id_respects_existing_items() {
        let mut doc = ContentDocument::bundled();
        assert_eq!(doc.next_id(ListSection::Projects).unwrap(), 4);

        let id = doc
            .add_item(ListSection::Projects, &into_object(json!({ "title": "New" })))
            .unwrap();
        assert_eq!(id, 4);
        assert_eq!(doc.id_counters["projects"], 4);
        assert_eq!(doc.next_id(ListSection::Blog).unwrap(), 3);
    }

    #[test]
    fn test_ids_run_out_without_panicking() {
        let mut doc =
            ContentDocument::from_import(r#"{"blog":[{"id":18446744073709551615}]}"#).unwrap();

        let err = doc.add_item(ListSection::Blog, &Patch::new()).unwrap_err();
        assert!(matches!(
            err,
            ContentError::IdExhausted {
                section: ListSection::Blog
            }
        ));
        assert_eq!(doc.ids(ListSection::Blog), vec![u64::MAX]);
        assert!(!doc.id_counters.contains_key("blog"));
    }

    #[test]
    fn test_delete_removes_first_match_only() {
        let mut doc = ContentDocument::from_import(
            r#"{"blog":[{"id":2,"title":"First"},{"id":2,"title":"Second"},{"id":5}]}"#,
        )
        .unwrap();

        doc.delete_item(ListSection::Blog, 2).unwrap();
        assert_eq!(doc.ids(ListSection::Blog), vec![2, 5]);
        assert_eq!(doc.blog[0].title, "Second");

        doc.delete_item(ListSection::Blog, 2).unwrap();
        assert_eq!(doc.ids(ListSection::Blog), vec![5]);
    }

    #[test]
    fn test_counters_are_per_section() {
        let mut doc = empty();
        doc.add_item(ListSection::Blog, &Patch::new()).unwrap();
        doc.add_item(ListSection::Blog, &Patch::new()).unwrap();

        let id = doc.add_item(ListSection::Education, &Patch::new()).unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn test_update_item() {
        let mut doc = ContentDocument::bundled();
        let patch = into_object(json!({ "title": "Renamed", "id": 99, "featured": false }));
        doc.update_item(ListSection::Projects, 1, &patch).unwrap();

        let project = &doc.projects[0];
        assert_eq!(project.id, 1);
        assert_eq!(project.title, "Renamed");
        assert!(!project.featured);
        assert_eq!(project.tags, vec!["React", "CRDT", "WebSockets"]);
    }

    #[test]
    fn test_update_missing_item() {
        let mut doc = ContentDocument::bundled();
        let before = doc.clone();

        let err = doc
            .update_item(ListSection::Projects, 42, &into_object(json!({ "title": "x" })))
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::ItemNotFound {
                section: ListSection::Projects,
                id: 42
            }
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_missing_item() {
        let mut doc = empty();
        assert!(matches!(
            doc.delete_item(ListSection::Blog, 1),
            Err(ContentError::ItemNotFound { .. })
        ));
    }

    #[test]
    fn test_save_scalar_section() {
        let mut doc = ContentDocument::bundled();
        let email = doc.personal.email.clone();

        let patch = into_object(json!({ "name": "Sam Lee", "pronouns": "they/them" }));
        doc.save_section(ScalarSection::Personal, &patch).unwrap();

        assert_eq!(doc.personal.name, "Sam Lee");
        assert_eq!(doc.personal.email, email);
        assert_eq!(doc.personal.extra["pronouns"], json!("they/them"));
    }

    #[test]
    fn test_save_rejects_wrong_types() {
        let mut doc = empty();
        let patch = into_object(json!({ "available": "sometimes" }));
        assert!(matches!(
            doc.save_section(ScalarSection::Resume, &patch),
            Err(ContentError::InvalidFields { .. })
        ));
    }

    #[test]
    fn test_save_dispatch() {
        let mut doc = ContentDocument::bundled();
        let patch = into_object(json!({ "github": "https://github.com/sam" }));

        doc.save(Section::Scalar(ScalarSection::Social), None, &patch)
            .unwrap();
        assert_eq!(doc.social.github, "https://github.com/sam");

        assert!(matches!(
            doc.save(Section::Keyed(ListSection::Blog), None, &patch),
            Err(ContentError::IdRequired { .. })
        ));
        assert!(matches!(
            doc.save(Section::Scalar(ScalarSection::Social), Some(1), &patch),
            Err(ContentError::UnexpectedId { .. })
        ));
    }

    #[test]
    fn test_import_merges_onto_bundled() {
        let doc = ContentDocument::from_import(r#"{"personal":{"name":"Only Name"}}"#).unwrap();
        assert_eq!(doc.personal.name, "Only Name");
        assert!(doc.personal.email.is_empty());
        assert_eq!(doc.projects, ContentDocument::bundled().projects);
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(
            ContentDocument::from_import("not json"),
            Err(ContentError::InvalidImport(_))
        ));
        assert!(matches!(
            ContentDocument::from_import("[1, 2]"),
            Err(ContentError::InvalidImport(_))
        ));
        assert!(matches!(
            ContentDocument::from_import(r#"{"projects": "many"}"#),
            Err(ContentError::InvalidImport(_))
        ));
    }

    #[test]
    fn test_section_value() {
        let doc = ContentDocument::bundled();
        let social = doc.section_value(Section::Scalar(ScalarSection::Social));
        assert_eq!(social["github"], json!(doc.social.github));

        let blog = doc.section_value(Section::Keyed(ListSection::Blog));
        assert_eq!(blog.as_array().map(Vec::len), Some(2));
        assert_eq!(doc.item(ListSection::Blog, 2).unwrap()["status"], json!("draft"));
        assert!(doc.item(ListSection::Blog, 7).is_none());
    }
}
