//! Records making up the content document

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// A record stored in a list section
pub trait Item: Serialize + DeserializeOwned + Default + Clone {
    fn id(&self) -> u64;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Personal {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub bio: String,
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::text")]
    pub website: String,
    #[serde(deserialize_with = "lenient::text")]
    pub profile_image: String,
    #[serde(deserialize_with = "lenient::text")]
    pub availability: String,
    #[serde(
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<u32>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub languages: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub id: u64,
    #[serde(deserialize_with = "lenient::text")]
    pub company: String,
    #[serde(deserialize_with = "lenient::text")]
    pub position: String,
    #[serde(deserialize_with = "lenient::text")]
    pub period: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub technologies: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub id: u64,
    #[serde(deserialize_with = "lenient::text")]
    pub institution: String,
    #[serde(deserialize_with = "lenient::text")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::text")]
    pub period: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub gpa: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalSkill {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    /// Proficiency, 0 to 100
    #[serde(deserialize_with = "lenient::number")]
    pub level: u8,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    #[serde(deserialize_with = "lenient::nullable")]
    pub technical: Vec<TechnicalSkill>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub soft: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Completed,
    InProgress,
    Planned,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub image: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub demo_url: String,
    #[serde(deserialize_with = "lenient::text")]
    pub github_url: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub featured: bool,
    #[serde(deserialize_with = "lenient::nullable")]
    pub status: ProjectStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Testimonial {
    pub id: u64,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub position: String,
    #[serde(deserialize_with = "lenient::text")]
    pub company: String,
    #[serde(deserialize_with = "lenient::text")]
    pub message: String,
    #[serde(deserialize_with = "lenient::text")]
    pub avatar: String,
    #[serde(deserialize_with = "lenient::number")]
    pub rating: u8,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    #[default]
    Draft,
    Archived,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u64,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub excerpt: String,
    #[serde(deserialize_with = "lenient::text")]
    pub content: String,
    #[serde(deserialize_with = "lenient::text")]
    pub image: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub tags: Vec<String>,
    #[serde(
        deserialize_with = "lenient::date",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::text")]
    pub read_time: String,
    #[serde(deserialize_with = "lenient::nullable")]
    pub status: PostStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    #[serde(deserialize_with = "lenient::text")]
    pub github: String,
    #[serde(deserialize_with = "lenient::text")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient::text")]
    pub twitter: String,
    #[serde(deserialize_with = "lenient::text")]
    pub instagram: String,
    #[serde(deserialize_with = "lenient::text")]
    pub facebook: String,
    #[serde(deserialize_with = "lenient::text")]
    pub youtube: String,
    #[serde(deserialize_with = "lenient::text")]
    pub other: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resume {
    #[serde(deserialize_with = "lenient::text")]
    pub resume_url: String,
    #[serde(deserialize_with = "lenient::text")]
    pub cv_url: String,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::text")]
    pub experience: String,
    #[serde(deserialize_with = "lenient::text")]
    pub current_position: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::text")]
    pub key_skills: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub available: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item for Experience {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Item for Education {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Item for Project {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Item for Testimonial {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Item for BlogPost {
    fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_status_names() {
        let project: Project =
            serde_json::from_value(json!({ "id": 4, "status": "in-progress" })).unwrap();
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.id(), 4);
        assert!(project.tags.is_empty());
    }

    #[test]
    fn test_blog_date() {
        let post: BlogPost =
            serde_json::from_value(json!({ "id": 1, "publishedAt": "2024-03-12" })).unwrap();
        assert_eq!(post.published_at, NaiveDate::from_ymd_opt(2024, 3, 12));
        assert_eq!(post.status, PostStatus::Draft);

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["publishedAt"], json!("2024-03-12"));
    }

    #[test]
    fn test_unknown_fields_survive() {
        let skills: Skills = serde_json::from_value(json!({
            "technical": [{ "name": "Rust", "level": 80, "id": 1700000000000u64 }],
            "soft": ["Patience"],
            "certifications": ["AWS"]
        }))
        .unwrap();

        assert_eq!(skills.technical[0].level, 80);
        let value = serde_json::to_value(&skills).unwrap();
        assert_eq!(value["certifications"], json!(["AWS"]));
        assert_eq!(value["technical"][0]["id"], json!(1700000000000u64));
    }
}
