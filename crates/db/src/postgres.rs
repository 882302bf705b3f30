//! Postgres-backed submission store.

use async_trait::async_trait;
use jualputus_core::submission::Submission;
use jualputus_core::types::Timestamp;
use sqlx::{FromRow, PgPool};

use crate::error::StoreError;
use crate::repository::SubmissionRepo;

/// Column list for `submissions` queries.
const COLUMNS: &str = "\
    id, ticket_number, category, brand, model, year_released, \
    physical_condition, functional_features, accessories, full_name, \
    whatsapp, email, full_address, location_lat, location_lng, status, \
    created_at, updated_at";

/// A row from the `submissions` table.
#[derive(Debug, Clone, FromRow)]
struct SubmissionRow {
    id: String,
    ticket_number: String,
    category: String,
    brand: String,
    model: String,
    year_released: i32,
    physical_condition: String,
    functional_features: Vec<String>,
    accessories: Vec<String>,
    full_name: String,
    whatsapp: String,
    email: Option<String>,
    full_address: String,
    location_lat: Option<f64>,
    location_lng: Option<f64>,
    status: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        Submission {
            id: row.id,
            ticket_number: row.ticket_number,
            category: row.category,
            brand: row.brand,
            model: row.model,
            year_released: row.year_released,
            physical_condition: row.physical_condition,
            functional_features: row.functional_features,
            accessories: row.accessories,
            full_name: row.full_name,
            whatsapp: row.whatsapp,
            email: row.email,
            full_address: row.full_address,
            location_lat: row.location_lat,
            location_lng: row.location_lng,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Provides the submission repository over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

async fn upsert<'e, E>(executor: E, s: &Submission) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO submissions \
            (id, ticket_number, category, brand, model, year_released, \
             physical_condition, functional_features, accessories, full_name, \
             whatsapp, email, full_address, location_lat, location_lng, status, \
             created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) \
         ON CONFLICT (id) DO UPDATE SET \
            ticket_number = EXCLUDED.ticket_number, \
            category = EXCLUDED.category, \
            brand = EXCLUDED.brand, \
            model = EXCLUDED.model, \
            year_released = EXCLUDED.year_released, \
            physical_condition = EXCLUDED.physical_condition, \
            functional_features = EXCLUDED.functional_features, \
            accessories = EXCLUDED.accessories, \
            full_name = EXCLUDED.full_name, \
            whatsapp = EXCLUDED.whatsapp, \
            email = EXCLUDED.email, \
            full_address = EXCLUDED.full_address, \
            location_lat = EXCLUDED.location_lat, \
            location_lng = EXCLUDED.location_lng, \
            status = EXCLUDED.status, \
            updated_at = EXCLUDED.updated_at",
    )
    .bind(&s.id)
    .bind(&s.ticket_number)
    .bind(&s.category)
    .bind(&s.brand)
    .bind(&s.model)
    .bind(s.year_released)
    .bind(&s.physical_condition)
    .bind(&s.functional_features)
    .bind(&s.accessories)
    .bind(&s.full_name)
    .bind(&s.whatsapp)
    .bind(&s.email)
    .bind(&s.full_address)
    .bind(s.location_lat)
    .bind(s.location_lng)
    .bind(&s.status)
    .bind(s.created_at)
    .bind(s.updated_at)
    .execute(executor)
    .await?;
    Ok(())
}

#[async_trait]
impl SubmissionRepo for PgSubmissionStore {
    async fn save(&self, submission: &Submission) -> Result<(), StoreError> {
        upsert(&self.pool, submission).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Submission>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1");
        let row = sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn find_by_ticket(&self, ticket_number: &str) -> Result<Option<Submission>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM submissions WHERE ticket_number = $1 \
             ORDER BY created_at DESC LIMIT 1"
        );
        let row = sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(ticket_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM submissions ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, SubmissionRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Option<Submission>, StoreError> {
        let query = format!(
            "UPDATE submissions SET status = $1, updated_at = now() \
             WHERE id = $2 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn replace_all(&self, submissions: Vec<Submission>) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM submissions").execute(&mut *tx).await?;
        for s in &submissions {
            upsert(&mut *tx, s).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
