//! SQLite implementation of [`TemplateRepository`].

use chrono::{DateTime, Utc};
use futures::stream::{BoxStream, StreamExt};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::lifecycle::{self, Stamp};
use super::validate::{self, NAME_MAX, SHORT_LABEL_MAX};
use super::{begin_write, ensure_exists, parse_id, StoreError, StoreResult, TemplateRepository};
use crate::domain::{CreateTemplateRequest, Template, TemplateFilter, UpdateTemplateRequest};

const SELECT_TEMPLATE: &str = r#"
    SELECT id, name, company_id, content, category, is_active, created_at, updated_at
    FROM templates
    WHERE id = ?1
"#;

const LIST_TEMPLATES: &str = r#"
    SELECT id, name, company_id, content, category, is_active, created_at, updated_at
    FROM templates
    WHERE (?1 IS NULL OR company_id = ?1)
      AND (?2 IS NULL OR category = ?2)
      AND (?3 IS NULL OR is_active = ?3)
    ORDER BY rowid
"#;

const INSERT_TEMPLATE: &str = r#"
    INSERT INTO templates (id, name, company_id, content, category, is_active, created_at,
                           updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

const UPDATE_TEMPLATE: &str = r#"
    UPDATE templates
    SET name = ?2, content = ?3, category = ?4, is_active = ?5, updated_at = ?6
    WHERE id = ?1
"#;

/// Database row for template
#[derive(Debug, sqlx::FromRow)]
struct TemplateRow {
    id: String,
    name: String,
    company_id: String,
    content: String,
    category: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TemplateRow> for Template {
    type Error = StoreError;

    fn try_from(row: TemplateRow) -> StoreResult<Self> {
        Ok(Self {
            id: parse_id("id", &row.id)?,
            name: row.name,
            company_id: parse_id("company_id", &row.company_id)?,
            content: row.content,
            category: row.category,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn validate_template(template: &Template) -> StoreResult<()> {
    validate::required("name", &template.name, NAME_MAX)?;
    if template.content.is_empty() {
        return Err(StoreError::validation("content is required"));
    }
    validate::optional("category", template.category.as_deref(), SHORT_LABEL_MAX)?;
    Ok(())
}

/// SQLite implementation of the Template repository.
#[derive(Clone)]
pub struct SqliteTemplateRepository {
    db: SqlitePool,
}

impl SqliteTemplateRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

impl TemplateRepository for SqliteTemplateRepository {
    async fn create(&self, input: CreateTemplateRequest) -> StoreResult<Template> {
        let stamp = Stamp::new();
        let template = Template {
            id: stamp.id,
            name: input.name,
            company_id: input.company_id,
            content: input.content,
            category: input.category,
            is_active: true,
            created_at: stamp.at,
            updated_at: stamp.at,
        };
        validate_template(&template)?;

        let mut tx = begin_write(&self.db, "templates").await?;
        ensure_exists(&mut tx, "companies", "company", template.company_id).await?;

        sqlx::query(INSERT_TEMPLATE)
            .bind(template.id.to_string())
            .bind(&template.name)
            .bind(template.company_id.to_string())
            .bind(&template.content)
            .bind(&template.category)
            .bind(template.is_active)
            .bind(template.created_at)
            .bind(template.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            template_id = %template.id,
            company_id = %template.company_id,
            "Template created"
        );
        Ok(template)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Template> {
        let row = sqlx::query_as::<_, TemplateRow>(SELECT_TEMPLATE)
            .bind(id.to_string())
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("template", id))?;

        row.try_into()
    }

    async fn update(&self, id: Uuid, input: UpdateTemplateRequest) -> StoreResult<Template> {
        let mut tx = begin_write(&self.db, "templates").await?;

        let row = sqlx::query_as::<_, TemplateRow>(SELECT_TEMPLATE)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::not_found("template", id))?;

        let mut template = Template::try_from(row)?;
        template.apply(input);
        template.updated_at = lifecycle::touch(template.updated_at);
        validate_template(&template)?;

        sqlx::query(UPDATE_TEMPLATE)
            .bind(template.id.to_string())
            .bind(&template.name)
            .bind(&template.content)
            .bind(&template.category)
            .bind(template.is_active)
            .bind(template.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            template_id = %template.id,
            is_active = template.is_active,
            "Template updated"
        );
        Ok(template)
    }

    async fn deactivate(&self, id: Uuid) -> StoreResult<Template> {
        self.update(
            id,
            UpdateTemplateRequest {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
    }

    fn list(&self, filter: TemplateFilter) -> BoxStream<'_, StoreResult<Template>> {
        sqlx::query_as::<_, TemplateRow>(LIST_TEMPLATES)
            .bind(filter.company_id.map(|id| id.to_string()))
            .bind(filter.category)
            .bind(filter.is_active)
            .fetch(&self.db)
            .map(|row| row.map_err(StoreError::from).and_then(Template::try_from))
            .boxed()
    }
}
