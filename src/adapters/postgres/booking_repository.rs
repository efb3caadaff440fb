//! PostgreSQL implementation of BookingRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::booking::phone::same_number;
use crate::domain::booking::{generate_booking_number, Booking, BookingStatus, NewBooking};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::BookingRepository;

const BOOKING_NUMBER_CONSTRAINT: &str = "bookings_booking_number_key";

const BOOKING_COLUMNS: &str = r#"
    id, booking_number, crm_task_id, name, phone, vehicle_make, vehicle_model,
    vehicle_color, pickup_location, dropoff_location, service_type, notes, status,
    agent_name, agent_phone, created_at, updated_at
"#;

/// PostgreSQL implementation of the BookingRepository port.
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a booking.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: i32,
    booking_number: String,
    crm_task_id: Option<String>,
    name: String,
    phone: String,
    vehicle_make: String,
    vehicle_model: String,
    vehicle_color: String,
    pickup_location: String,
    dropoff_location: Option<String>,
    service_type: String,
    notes: Option<String>,
    status: String,
    agent_name: Option<String>,
    agent_phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;

        Ok(Booking {
            id: row.id,
            booking_number: row.booking_number,
            crm_task_id: row.crm_task_id,
            name: row.name,
            phone: row.phone,
            vehicle_make: row.vehicle_make,
            vehicle_model: row.vehicle_model,
            vehicle_color: row.vehicle_color,
            pickup_location: row.pickup_location,
            dropoff_location: row.dropoff_location,
            service_type: row.service_type,
            notes: row.notes,
            status,
            agent_name: row.agent_name,
            agent_phone: row.agent_phone,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<BookingStatus, DomainError> {
    BookingStatus::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )
    })
}

fn map_insert_error(e: sqlx::Error, booking_number: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(BOOKING_NUMBER_CONSTRAINT) {
            return DomainError::new(
                ErrorCode::DuplicateBookingNumber,
                "Booking number already exists",
            )
            .with_detail("booking_number", booking_number);
        }
    }
    DomainError::database(format!("Failed to create booking: {}", e))
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn create(&self, booking: NewBooking) -> Result<Booking, DomainError> {
        let booking_number = generate_booking_number();

        let row: BookingRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO bookings (
                booking_number, crm_task_id, name, phone, vehicle_make, vehicle_model,
                vehicle_color, pickup_location, dropoff_location, service_type, notes, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(&booking_number)
        .bind(&booking.crm_task_id)
        .bind(&booking.name)
        .bind(&booking.phone)
        .bind(&booking.vehicle.make)
        .bind(&booking.vehicle.model)
        .bind(&booking.vehicle.color)
        .bind(&booking.pickup_location)
        .bind(&booking.dropoff_location)
        .bind(&booking.service_type)
        .bind(&booking.notes)
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &booking_number))?;

        Booking::try_from(row)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, DomainError> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list bookings: {}", e)))?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find booking: {}", e)))?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Booking>, DomainError> {
        // Stored numbers keep the customer's formatting, so compare digits in Rust.
        let bookings = self.list_all().await?;
        Ok(bookings.into_iter().find(|b| same_number(&b.phone, phone)))
    }

    async fn update_status(
        &self,
        id: i32,
        status: BookingStatus,
    ) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            r#"
            UPDATE bookings SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update booking: {}", e)))?;

        row.map(Booking::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> BookingRow {
        let at = Utc::now();
        BookingRow {
            id: 7,
            booking_number: "BK-0042".to_string(),
            crm_task_id: Some("task-abc-123".to_string()),
            name: "Kimo Kealoha".to_string(),
            phone: "808-555-0123".to_string(),
            vehicle_make: "Toyota".to_string(),
            vehicle_model: "Tacoma".to_string(),
            vehicle_color: "White".to_string(),
            pickup_location: "Ala Moana Center".to_string(),
            dropoff_location: None,
            service_type: "towing".to_string(),
            notes: None,
            status: status.to_string(),
            agent_name: None,
            agent_phone: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn row_converts_to_booking() {
        let booking = Booking::try_from(row("en_route")).unwrap();
        assert_eq!(booking.id, 7);
        assert_eq!(booking.status, BookingStatus::EnRoute);
        assert_eq!(booking.vehicle().compose(), "Toyota Tacoma (White)");
    }

    #[test]
    fn unknown_status_in_row_is_a_database_error() {
        let err = Booking::try_from(row("teleported")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn non_constraint_insert_errors_are_database_errors() {
        let err = map_insert_error(sqlx::Error::RowNotFound, "BK-0001");
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
