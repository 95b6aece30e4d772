use folio_types::Project;
use time::macros::format_description;

use crate::domain::{ports::inbound::ProjectService, ProjectError};

/// Title and description the page template exposes as metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

/// Display values of a project; all empty for the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectView {
    pub title: String,
    pub place: String,
    pub client: String,
    pub summary: String,
    pub content: String,
    pub thumbnail: String,
    /// `YYYY-MM-DD`, for the `datetime` attribute.
    pub date: String,
    /// e.g. "May 17, 2023".
    pub display_date: String,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        let display_date = project
            .date
            .format(format_description!(
                "[month repr:long] [day padding:none], [year]"
            ))
            .unwrap_or_else(|_| project.date.to_string());

        Self {
            title: project.title.clone(),
            place: project.place.clone(),
            client: project.client.clone(),
            summary: project.summary.clone(),
            content: project.content.clone(),
            thumbnail: project.thumbnail.clone(),
            date: project.date.to_string(),
            display_date,
        }
    }
}

/// The public page of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPage {
    pub view: ProjectView,
    pub metadata: PageMetadata,
    /// Whether the slug matched a stored project.
    pub found: bool,
}

impl ProjectPage {
    /// Fetches the project and prepares its page.
    ///
    /// An unknown slug yields the placeholder page; storage failures are
    /// returned as errors.
    pub async fn load(
        service: &dyn ProjectService,
        slug: &str,
        site_name: &str,
    ) -> Result<Self, ProjectError> {
        let project = service.get_project_by_slug(slug).await?;
        if project.is_none() {
            tracing::debug!("no project '{}', rendering placeholder", slug);
        }

        Ok(Self::new(project.as_ref(), site_name))
    }

    pub fn new(project: Option<&Project>, site_name: &str) -> Self {
        Self {
            view: project.map(ProjectView::from).unwrap_or_default(),
            metadata: metadata_for(project, site_name),
            found: project.is_some(),
        }
    }

    pub fn render(&self) -> String {
        let view = &self.view;
        let text = ammonia::clean_text;

        let thumbnail = if view.thumbnail.is_empty() {
            String::new()
        } else {
            format!(
                r#"<img class="project-thumbnail" src="{}" alt="{}">"#,
                escape_attr(&view.thumbnail),
                escape_attr(&view.title)
            )
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<meta name="description" content="{description}">
</head>
<body>
<article class="project">
<header>
<h1>{heading}</h1>
<p class="project-meta"><span class="project-client">{client}</span> <span class="project-place">{place}</span> <time datetime="{date}">{display_date}</time></p>
</header>
{thumbnail}
<p class="project-summary">{summary}</p>
<section class="project-content">{content}</section>
</article>
</body>
</html>
"#,
            title = text(&self.metadata.title),
            description = escape_attr(&self.metadata.description),
            heading = text(&view.title),
            client = text(&view.client),
            place = text(&view.place),
            date = escape_attr(&view.date),
            display_date = text(&view.display_date),
            thumbnail = thumbnail,
            summary = text(&view.summary),
            content = ammonia::clean(&view.content),
        )
    }
}

/// Escapes a value for a double-quoted attribute.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `"<title> - <site>"` and the summary; the bare site name without a project.
pub fn metadata_for(project: Option<&Project>, site_name: &str) -> PageMetadata {
    match project {
        Some(project) => PageMetadata {
            title: format!("{} - {}", project.title, site_name),
            description: project.summary.clone(),
        },
        None => PageMetadata {
            title: site_name.to_string(),
            description: String::new(),
        },
    }
}
