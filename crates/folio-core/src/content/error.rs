use thiserror::Error;

use super::ListSection;

/// Errors from content document operations
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    #[error("No {section} item with id {id}")]
    ItemNotFound { section: ListSection, id: u64 },

    #[error("No ids left for {section}")]
    IdExhausted { section: ListSection },

    #[error("Section '{section}' is a list; an item id is required")]
    IdRequired { section: ListSection },

    #[error("Section '{section}' has no items; drop the id")]
    UnexpectedId { section: String },

    #[error("Invalid fields for {section}: {source}")]
    InvalidFields {
        section: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid content import: {0}")]
    InvalidImport(String),
}
