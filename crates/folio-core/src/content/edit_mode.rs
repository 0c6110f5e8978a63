//! Which sections and rows are open for editing
//!
//! Purely transient: nothing here is persisted.

use std::collections::HashMap;
use std::fmt;

use super::{ListSection, ScalarSection, Section};

/// A section, or a single row of a list section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKey {
    Section(Section),
    Item(ListSection, u64),
}

impl EditKey {
    pub fn for_save(section: Section, id: Option<u64>) -> Self {
        match (section, id) {
            (Section::Keyed(list), Some(id)) => EditKey::Item(list, id),
            _ => EditKey::Section(section),
        }
    }
}

impl From<ScalarSection> for EditKey {
    fn from(section: ScalarSection) -> Self {
        EditKey::Section(Section::Scalar(section))
    }
}

impl fmt::Display for EditKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditKey::Section(section) => write!(f, "{}", section),
            EditKey::Item(section, id) => write!(f, "{}_{}", section, id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditModes {
    modes: HashMap<EditKey, bool>,
}

impl EditModes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one key and return its new state
    pub fn toggle(&mut self, key: EditKey) -> bool {
        let mode = self.modes.entry(key).or_insert(false);
        *mode = !*mode;
        *mode
    }

    pub fn is_editing(&self, key: EditKey) -> bool {
        self.modes.get(&key).copied().unwrap_or(false)
    }

    /// Keys currently being edited, sorted by name
    pub fn editing(&self) -> Vec<EditKey> {
        let mut keys: Vec<EditKey> = self
            .modes
            .iter()
            .filter(|(_, editing)| **editing)
            .map(|(key, _)| *key)
            .collect();
        keys.sort_by_key(|key| key.to_string());
        keys
    }

    pub fn clear(&mut self) {
        self.modes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_only_affects_one_key() {
        let mut modes = EditModes::new();
        let personal = EditKey::from(ScalarSection::Personal);
        let project = EditKey::Item(ListSection::Projects, 3);

        assert!(modes.toggle(project));
        assert!(modes.is_editing(project));
        assert!(!modes.is_editing(personal));
        assert!(!modes.is_editing(EditKey::Item(ListSection::Projects, 4)));

        assert!(!modes.toggle(project));
        assert!(!modes.is_editing(project));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(EditKey::from(ScalarSection::Skills).to_string(), "skills");
        assert_eq!(EditKey::Item(ListSection::Blog, 12).to_string(), "blog_12");
        assert_eq!(
            EditKey::for_save(Section::Keyed(ListSection::Education), Some(2)).to_string(),
            "education_2"
        );
    }

    #[test]
    fn test_editing_lists_open_keys() {
        let mut modes = EditModes::new();
        modes.toggle(EditKey::Item(ListSection::Projects, 1));
        modes.toggle(EditKey::from(ScalarSection::Personal));
        modes.toggle(EditKey::from(ScalarSection::Social));
        modes.toggle(EditKey::from(ScalarSection::Social));

        let names: Vec<String> = modes.editing().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["personal", "projects_1"]);

        modes.clear();
        assert!(modes.editing().is_empty());
    }
}
