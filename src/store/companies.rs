//! SQLite implementation of [`CompanyRepository`].

use chrono::{DateTime, Utc};
use futures::stream::{BoxStream, StreamExt};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::lifecycle::{self, Stamp};
use super::validate::{self, EMAIL_MAX, NAME_MAX, PHONE_MAX, REGISTRATION_NUMBER_MAX};
use super::validate::{SHORT_LABEL_MAX, URL_MAX, WEBSITE_MAX};
use super::{begin_write, parse_id, CompanyRepository, StoreError, StoreResult};
use crate::domain::{Company, CompanyFilter, CreateCompanyRequest, UpdateCompanyRequest};

const SELECT_COMPANY: &str = r#"
    SELECT id, name, registration_number, logo_url, website, email, phone, address,
           bee_status, created_at, updated_at
    FROM companies
    WHERE id = ?1
"#;

const LIST_COMPANIES: &str = r#"
    SELECT id, name, registration_number, logo_url, website, email, phone, address,
           bee_status, created_at, updated_at
    FROM companies
    WHERE (?1 IS NULL OR bee_status = ?1)
    ORDER BY rowid
"#;

const INSERT_COMPANY: &str = r#"
    INSERT INTO companies (id, name, registration_number, logo_url, website, email, phone,
                           address, bee_status, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
"#;

const UPDATE_COMPANY: &str = r#"
    UPDATE companies
    SET name = ?2, registration_number = ?3, logo_url = ?4, website = ?5, email = ?6,
        phone = ?7, address = ?8, bee_status = ?9, updated_at = ?10
    WHERE id = ?1
"#;

/// Database row for company
#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
    id: String,
    name: String,
    registration_number: Option<String>,
    logo_url: Option<String>,
    website: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    bee_status: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CompanyRow> for Company {
    type Error = StoreError;

    fn try_from(row: CompanyRow) -> StoreResult<Self> {
        Ok(Self {
            id: parse_id("id", &row.id)?,
            name: row.name,
            registration_number: row.registration_number,
            logo_url: row.logo_url,
            website: row.website,
            email: row.email,
            phone: row.phone,
            address: row.address,
            bee_status: row.bee_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn validate_company(company: &Company) -> StoreResult<()> {
    validate::required("name", &company.name, NAME_MAX)?;
    validate::optional(
        "registration_number",
        company.registration_number.as_deref(),
        REGISTRATION_NUMBER_MAX,
    )?;
    validate::optional("logo_url", company.logo_url.as_deref(), URL_MAX)?;
    validate::optional("website", company.website.as_deref(), WEBSITE_MAX)?;
    validate::optional("email", company.email.as_deref(), EMAIL_MAX)?;
    validate::optional("phone", company.phone.as_deref(), PHONE_MAX)?;
    validate::optional("bee_status", company.bee_status.as_deref(), SHORT_LABEL_MAX)?;
    Ok(())
}

/// SQLite implementation of the Company repository.
#[derive(Clone)]
pub struct SqliteCompanyRepository {
    db: SqlitePool,
}

impl SqliteCompanyRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

impl CompanyRepository for SqliteCompanyRepository {
    async fn create(&self, input: CreateCompanyRequest) -> StoreResult<Company> {
        let stamp = Stamp::new();
        let company = Company {
            id: stamp.id,
            name: input.name,
            registration_number: input.registration_number,
            logo_url: input.logo_url,
            website: input.website,
            email: input.email,
            phone: input.phone,
            address: input.address,
            bee_status: input.bee_status,
            created_at: stamp.at,
            updated_at: stamp.at,
        };
        validate_company(&company)?;

        sqlx::query(INSERT_COMPANY)
            .bind(company.id.to_string())
            .bind(&company.name)
            .bind(&company.registration_number)
            .bind(&company.logo_url)
            .bind(&company.website)
            .bind(&company.email)
            .bind(&company.phone)
            .bind(&company.address)
            .bind(&company.bee_status)
            .bind(company.created_at)
            .bind(company.updated_at)
            .execute(&self.db)
            .await?;

        tracing::debug!(company_id = %company.id, name = %company.name, "Company created");
        Ok(company)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Company> {
        let row = sqlx::query_as::<_, CompanyRow>(SELECT_COMPANY)
            .bind(id.to_string())
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("company", id))?;

        row.try_into()
    }

    async fn update(&self, id: Uuid, input: UpdateCompanyRequest) -> StoreResult<Company> {
        let mut tx = begin_write(&self.db, "companies").await?;

        let row = sqlx::query_as::<_, CompanyRow>(SELECT_COMPANY)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::not_found("company", id))?;

        let mut company = Company::try_from(row)?;
        company.apply(input);
        company.updated_at = lifecycle::touch(company.updated_at);
        validate_company(&company)?;

        sqlx::query(UPDATE_COMPANY)
            .bind(company.id.to_string())
            .bind(&company.name)
            .bind(&company.registration_number)
            .bind(&company.logo_url)
            .bind(&company.website)
            .bind(&company.email)
            .bind(&company.phone)
            .bind(&company.address)
            .bind(&company.bee_status)
            .bind(company.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(company_id = %company.id, "Company updated");
        Ok(company)
    }

    fn list(&self, filter: CompanyFilter) -> BoxStream<'_, StoreResult<Company>> {
        sqlx::query_as::<_, CompanyRow>(LIST_COMPANIES)
            .bind(filter.bee_status)
            .fetch(&self.db)
            .map(|row| row.map_err(StoreError::from).and_then(Company::try_from))
            .boxed()
    }
}
