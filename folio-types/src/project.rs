use serde::{Deserialize, Serialize};
use time::Date;

use crate::{ProjectInput, Slug};

/// A portfolio project as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: Slug,
    pub title: String,
    pub place: String,
    pub client: String,
    /// Rich-text HTML body.
    pub content: String,
    pub summary: String,
    pub date: Date,
    /// Public URL of the externally hosted thumbnail.
    pub thumbnail: String,
}

/// The editable fields of a project after they passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub title: String,
    pub place: String,
    pub client: String,
    pub content: String,
    pub summary: String,
    pub date: Date,
}

impl Project {
    /// Builds the full record written by an update: the validated fields,
    /// the record's existing slug and the thumbnail to store.
    pub fn from_fields(slug: Slug, fields: ProjectFields, thumbnail: impl Into<String>) -> Self {
        Self {
            slug,
            title: fields.title,
            place: fields.place,
            client: fields.client,
            content: fields.content,
            summary: fields.summary,
            date: fields.date,
            thumbnail: thumbnail.into(),
        }
    }

    /// The form values this record defaults an edit form to.
    pub fn to_input(&self) -> ProjectInput {
        ProjectInput {
            title: self.title.clone(),
            place: self.place.clone(),
            client: self.client.clone(),
            content: self.content.clone(),
            summary: self.summary.clone(),
            date: Some(self.date),
            unparsed_date: None,
        }
    }
}
