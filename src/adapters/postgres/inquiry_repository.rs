//! PostgreSQL implementation of InquiryRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::membership::{
    MembershipInquiry, NewMembershipInquiry, PlanType, INQUIRY_PENDING,
};
use crate::ports::InquiryRepository;

/// PostgreSQL implementation of the InquiryRepository port.
pub struct PostgresInquiryRepository {
    pool: PgPool,
}

impl PostgresInquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InquiryRow {
    id: i32,
    crm_task_id: Option<String>,
    name: String,
    email: String,
    phone: String,
    plan_type: String,
    message: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<InquiryRow> for MembershipInquiry {
    type Error = DomainError;

    fn try_from(row: InquiryRow) -> Result<Self, Self::Error> {
        let plan_type = PlanType::parse(&row.plan_type).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid plan_type value: {}", row.plan_type),
            )
        })?;

        Ok(MembershipInquiry {
            id: row.id,
            crm_task_id: row.crm_task_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            plan_type,
            message: row.message,
            status: row.status,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl InquiryRepository for PostgresInquiryRepository {
    async fn create(
        &self,
        inquiry: NewMembershipInquiry,
        crm_task_id: Option<String>,
    ) -> Result<MembershipInquiry, DomainError> {
        let row: InquiryRow = sqlx::query_as(
            r#"
            INSERT INTO membership_inquiries (
                crm_task_id, name, email, phone, plan_type, message, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, crm_task_id, name, email, phone, plan_type, message, status, created_at
            "#,
        )
        .bind(&crm_task_id)
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(inquiry.plan_type.as_str())
        .bind(&inquiry.message)
        .bind(INQUIRY_PENDING)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save inquiry: {}", e)))?;

        MembershipInquiry::try_from(row)
    }

    async fn list_all(&self) -> Result<Vec<MembershipInquiry>, DomainError> {
        let rows: Vec<InquiryRow> = sqlx::query_as(
            r#"
            SELECT id, crm_task_id, name, email, phone, plan_type, message, status, created_at
            FROM membership_inquiries
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list inquiries: {}", e)))?;

        rows.into_iter().map(MembershipInquiry::try_from).collect()
    }
}
