use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::{macros::date, Date, OffsetDateTime};

use crate::ProjectFields;

/// Earliest completion date a project may carry.
pub const EARLIEST_PROJECT_DATE: Date = date!(1900 - 01 - 01);

/// An editable field of a project form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProjectField {
    Title,
    Place,
    Client,
    Date,
    Summary,
    Content,
}

impl ProjectField {
    /// Human-readable label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Place => "Place",
            Self::Client => "Client",
            Self::Date => "Date",
            Self::Summary => "Summary",
            Self::Content => "Content",
        }
    }
}

/// Raw form values for a project, as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: String,
    pub place: String,
    pub client: String,
    pub content: String,
    pub summary: String,
    pub date: Option<Date>,
    /// Date text that could not be parsed, kept so it can be reported.
    #[serde(skip)]
    pub unparsed_date: Option<String>,
}

/// Field-indexed validation messages. At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<ProjectField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`, keeping the first one already present.
    pub fn add(&mut self, field: ProjectField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: ProjectField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn remove(&mut self, field: ProjectField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn contains(&self, field: ProjectField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = ProjectField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProjectField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ProjectInput {
    /// Validates against the current UTC date.
    pub fn validate(&self) -> Result<ProjectFields, ValidationErrors> {
        self.validate_on(OffsetDateTime::now_utc().date())
    }

    /// Validates the form values, treating `today` as the latest allowed date.
    ///
    /// Text fields other than `content` are trimmed; `content` is HTML and is
    /// kept verbatim once it is known not to be blank.
    pub fn validate_on(&self, today: Date) -> Result<ProjectFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required_text(&mut errors, ProjectField::Title, &self.title);
        let place = required_text(&mut errors, ProjectField::Place, &self.place);
        let client = required_text(&mut errors, ProjectField::Client, &self.client);
        let summary = required_text(&mut errors, ProjectField::Summary, &self.summary);

        if self.content.trim().is_empty() {
            errors.add(ProjectField::Content, "Content is required");
        }

        match (self.date, &self.unparsed_date) {
            (None, Some(text)) => errors.add(
                ProjectField::Date,
                format!("Date '{text}' is invalid, expected YYYY-MM-DD"),
            ),
            (None, None) => errors.add(ProjectField::Date, "Date is required"),
            (Some(date), _) if date < EARLIEST_PROJECT_DATE => errors.add(
                ProjectField::Date,
                format!("Date must be on or after {EARLIEST_PROJECT_DATE}"),
            ),
            (Some(date), _) if date > today => {
                errors.add(ProjectField::Date, "Date cannot be in the future")
            }
            (Some(_), _) => {}
        }

        match (errors.is_empty(), self.date) {
            (true, Some(date)) => Ok(ProjectFields {
                title,
                place,
                client,
                content: self.content.clone(),
                summary,
                date,
            }),
            _ => Err(errors),
        }
    }

    pub fn set(&mut self, field: ProjectField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProjectField::Title => self.title = value,
            ProjectField::Place => self.place = value,
            ProjectField::Client => self.client = value,
            ProjectField::Summary => self.summary = value,
            ProjectField::Content => self.content = value,
            ProjectField::Date => {
                let text = value.trim();
                self.date = Date::parse(
                    text,
                    time::macros::format_description!("[year]-[month]-[day]"),
                )
                .ok();
                self.unparsed_date = match self.date {
                    None if !text.is_empty() => Some(text.to_string()),
                    _ => None,
                };
            }
        }
    }

    pub fn set_date(&mut self, date: Date) {
        self.date = Some(date);
        self.unparsed_date = None;
    }
}

fn required_text(errors: &mut ValidationErrors, field: ProjectField, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, format!("{} is required", field.label()));
    }
    trimmed.to_string()
}
