//! Section names
//!
//! The document has two kinds of sections: scalar sections hold a single
//! record edited in place, list sections hold records addressed by id.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarSection {
    Personal,
    Skills,
    Social,
    Resume,
}

impl ScalarSection {
    pub const ALL: [ScalarSection; 4] = [
        ScalarSection::Personal,
        ScalarSection::Skills,
        ScalarSection::Social,
        ScalarSection::Resume,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScalarSection::Personal => "personal",
            ScalarSection::Skills => "skills",
            ScalarSection::Social => "social",
            ScalarSection::Resume => "resume",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSection {
    Experience,
    Education,
    Projects,
    Testimonials,
    Blog,
}

impl ListSection {
    pub const ALL: [ListSection; 5] = [
        ListSection::Experience,
        ListSection::Education,
        ListSection::Projects,
        ListSection::Testimonials,
        ListSection::Blog,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ListSection::Experience => "experience",
            ListSection::Education => "education",
            ListSection::Projects => "projects",
            ListSection::Testimonials => "testimonials",
            ListSection::Blog => "blog",
        }
    }
}

/// Any section of the content document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Scalar(ScalarSection),
    Keyed(ListSection),
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Scalar(s) => s.as_str(),
            Section::Keyed(s) => s.as_str(),
        }
    }

    /// Every section, scalar sections first
    pub fn all() -> impl Iterator<Item = Section> {
        ScalarSection::ALL
            .into_iter()
            .map(Section::Scalar)
            .chain(ListSection::ALL.into_iter().map(Section::Keyed))
    }
}

impl fmt::Display for ScalarSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ListSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Section::all()
            .find(|section| section.as_str() == name)
            .ok_or_else(|| ContentError::UnknownSection(s.to_string()))
    }
}

impl From<ScalarSection> for Section {
    fn from(section: ScalarSection) -> Self {
        Section::Scalar(section)
    }
}

impl From<ListSection> for Section {
    fn from(section: ListSection) -> Self {
        Section::Keyed(section)
    }
}
