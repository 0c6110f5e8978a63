//! Site content
//!
//! All displayed content lives in a single document split into sections.
//! Scalar sections (`personal`, `skills`, `social`, `resume`) hold one
//! record; list sections (`experience`, `education`, `projects`,
//! `testimonials`, `blog`) hold records with a unique integer id.
//!
//! ```text
//! let mut store = ContentStore::open(FileStore::open(&data_dir)?)?;
//! let id = store.add_item(ListSection::Projects, &fields)?;
//! store.save_item(ListSection::Projects, id, &patch)?;
//! ```

pub mod document;
pub mod edit_mode;
pub mod error;
mod lenient;
pub mod models;
pub mod normalize;
pub mod section;
pub mod store;

pub use document::ContentDocument;
pub use edit_mode::{EditKey, EditModes};
pub use error::ContentError;
pub use models::{
    BlogPost, Education, Experience, Item, Personal, PostStatus, Project, ProjectStatus, Resume,
    Skills, Social, TechnicalSkill, Testimonial,
};
pub use section::{ListSection, ScalarSection, Section};
pub use store::ContentStore;
