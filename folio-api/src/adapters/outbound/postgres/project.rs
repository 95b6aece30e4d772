use async_trait::async_trait;
use folio_types::{Project, Slug};
use sqlx::PgPool;
use time::Date;

use crate::domain::{ports::outbound::ProjectRepository, ProjectError};

pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    slug: String,
    title: String,
    place: String,
    client: String,
    content: String,
    summary: String,
    thumbnail: String,
    date: Date,
}

impl TryFrom<ProjectRow> for Project {
    type Error = ProjectError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let slug = Slug::try_from(row.slug.as_str())
            .map_err(|err| ProjectError::storage(format!("stored slug is invalid: {err}")))?;

        Ok(Project {
            slug,
            title: row.title,
            place: row.place,
            client: row.client,
            content: row.content,
            summary: row.summary,
            date: row.date,
            thumbnail: row.thumbnail,
        })
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Project>, ProjectError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT slug, title, place, client, content, summary, thumbnail, date
            FROM projects
            WHERE slug = $1
            "#,
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Project::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Project>, ProjectError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT slug, title, place, client, content, summary, thumbnail, date
            FROM projects
            ORDER BY date DESC, slug
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Project::try_from).collect()
    }

    async fn replace(&self, project: &Project) -> Result<Option<Project>, ProjectError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
            SET title = $2,
                place = $3,
                client = $4,
                content = $5,
                summary = $6,
                thumbnail = $7,
                date = $8,
                updated_at = now()
            WHERE slug = $1
            RETURNING slug, title, place, client, content, summary, thumbnail, date
            "#,
        )
        .bind(project.slug.as_str())
        .bind(&project.title)
        .bind(&project.place)
        .bind(&project.client)
        .bind(&project.content)
        .bind(&project.summary)
        .bind(&project.thumbnail)
        .bind(project.date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Project::try_from).transpose()
    }
}
