//! Postgres implementation of [`MarketplaceStore`].
//!
//! Bookings do not store a provider column; the owning provider is always
//! read through the booked service, so ownership follows `services.provider_id`.
//!
//! Booking creation takes a transaction-scoped advisory lock keyed on the
//! provider before checking the slot, which serializes competing creations
//! for one provider without blocking anyone else. Status transitions are a
//! single conditional `UPDATE ... WHERE status = $expected`.

use std::str::FromStr;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use handyhub_auth::Role;
use handyhub_config::DatabaseConfig;
use handyhub_models::{
    Booking, BookingId, BookingScope, BookingStatus, NewBooking, NewService, NewUser, Service,
    ServiceId, StatusChange, User, UserCredentials, UserId,
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::store::{MarketplaceStore, SLOT_TAKEN, StoreError, StoreResult, lost_race};

const BOOKING_COLUMNS: &str = r#"
    b.id, b.user_id, b.service_id, s.provider_id, b.date, b.time, b.address,
    b.special_instructions, b.price_cents, b.status, b.created_at, b.updated_at
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct DbUser {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    role: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct DbService {
    id: Uuid,
    provider_id: Uuid,
    name: String,
    description: Option<String>,
    price_cents: i64,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct DbBooking {
    id: Uuid,
    user_id: Uuid,
    service_id: Uuid,
    provider_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
    address: String,
    special_instructions: Option<String>,
    price_cents: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects using `config.url` and applies `migrations/` when
    /// `config.run_migrations` is set.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| StoreError::Unexpected(anyhow!("DATABASE_URL is not set")))?;

        // Never log the URL; it carries credentials.
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(PgConnectOptions::from_str(url)?)
            .await?;

        let store = Self::new(pool);
        if config.run_migrations {
            store.migrate().await?;
        }
        Ok(store)
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_booking(&self, id: Uuid) -> StoreResult<Option<Booking>> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings b JOIN services s ON s.id = b.service_id WHERE b.id = $1"
        );
        sqlx::query_as::<_, DbBooking>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(booking_from_db)
            .transpose()
    }
}

#[async_trait]
impl MarketplaceStore for PgStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let inserted = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, first_name, last_name, email, role, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(credentials_from_db(row)?.user),
            Err(err) if is_unique_violation(&err) => {
                Err(StoreError::Conflict("Email already registered".into()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_credentials_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>> {
        sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, first_name, last_name, email, role, password_hash, created_at
            FROM users WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .map(credentials_from_db)
        .transpose()
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        let row = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, first_name, last_name, email, role, password_hash, created_at
            FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound("User".into()))?;

        Ok(credentials_from_db(row)?.user)
    }

    async fn create_service(&self, service: NewService) -> StoreResult<Service> {
        let inserted = sqlx::query_as::<_, DbService>(
            r#"
            INSERT INTO services (id, provider_id, name, description, price_cents)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, provider_id, name, description, price_cents, is_available,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(service.provider_id)
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price_cents)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(service_from_db(row)),
            Err(err) if is_foreign_key_violation(&err) => {
                Err(StoreError::NotFound("Provider".into()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_service(&self, id: ServiceId) -> StoreResult<Service> {
        sqlx::query_as::<_, DbService>(
            r#"
            SELECT id, provider_id, name, description, price_cents, is_available,
                   created_at, updated_at
            FROM services WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(service_from_db)
        .ok_or_else(|| StoreError::NotFound("Service".into()))
    }

    async fn list_services(&self, only_available: bool) -> StoreResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, DbService>(
            r#"
            SELECT id, provider_id, name, description, price_cents, is_available,
                   created_at, updated_at
            FROM services
            WHERE ($1 = FALSE OR is_available)
            ORDER BY created_at, name
            "#,
        )
        .bind(only_available)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(service_from_db).collect())
    }

    async fn set_service_availability(
        &self,
        id: ServiceId,
        is_available: bool,
    ) -> StoreResult<Service> {
        sqlx::query_as::<_, DbService>(
            r#"
            UPDATE services SET is_available = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, provider_id, name, description, price_cents, is_available,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_available)
        .fetch_optional(&self.pool)
        .await?
        .map(service_from_db)
        .ok_or_else(|| StoreError::NotFound("Service".into()))
    }

    async fn create_booking(&self, booking: NewBooking) -> StoreResult<Booking> {
        let mut tx = self.pool.begin().await?;

        // Released at commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(booking.provider_id.to_string())
            .execute(&mut *tx)
            .await?;

        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings b JOIN services s ON s.id = b.service_id
                WHERE s.provider_id = $1 AND b.date = $2 AND b.time = $3
                  AND b.status = 'upcoming'
            )
            "#,
        )
        .bind(booking.provider_id)
        .bind(booking.date)
        .bind(booking.time)
        .fetch_one(&mut *tx)
        .await?;

        if taken {
            return Err(StoreError::Conflict(SLOT_TAKEN.into()));
        }

        let id = Uuid::new_v4();
        let inserted = sqlx::query(
            r#"
            INSERT INTO bookings
                (id, user_id, service_id, date, time, address, special_instructions,
                 price_cents, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'upcoming')
            "#,
        )
        .bind(id)
        .bind(booking.user_id)
        .bind(booking.service_id)
        .bind(booking.date)
        .bind(booking.time)
        .bind(&booking.address)
        .bind(&booking.special_instructions)
        .bind(booking.price_cents)
        .execute(&mut *tx)
        .await;

        if let Err(err) = inserted {
            if is_foreign_key_violation(&err) {
                return Err(StoreError::NotFound("Service".into()));
            }
            return Err(err.into());
        }

        tx.commit().await?;

        self.fetch_booking(id)
            .await?
            .ok_or_else(|| StoreError::NotFound("Booking".into()))
    }

    async fn get_booking(&self, id: BookingId) -> StoreResult<Booking> {
        self.fetch_booking(id.into_inner())
            .await?
            .ok_or_else(|| StoreError::NotFound("Booking".into()))
    }

    async fn list_bookings(&self, scope: BookingScope) -> StoreResult<Vec<Booking>> {
        let (filter, owner) = match scope {
            BookingScope::All => ("TRUE", None),
            BookingScope::Customer(id) => ("b.user_id = $1", Some(id)),
            BookingScope::Provider(id) => ("s.provider_id = $1", Some(id)),
        };
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings b JOIN services s ON s.id = b.service_id \
             WHERE {filter} ORDER BY b.date, b.time, b.created_at"
        );

        let mut query = sqlx::query_as::<_, DbBooking>(&sql);
        if let Some(owner) = owner {
            query = query.bind(owner);
        }

        query
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(booking_from_db)
            .collect()
    }

    async fn transition_status(&self, change: StatusChange) -> StoreResult<Booking> {
        let updated = sqlx::query(
            r#"
            UPDATE bookings SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(change.booking_id)
        .bind(change.from.as_str())
        .bind(change.to.as_str())
        .execute(&self.pool)
        .await?;

        let current = self.fetch_booking(change.booking_id.into_inner()).await?;
        match current {
            None => Err(StoreError::NotFound("Booking".into())),
            Some(_) if updated.rows_affected() == 0 => Err(lost_race(change.booking_id)),
            Some(booking) => Ok(booking),
        }
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503"))
}

fn credentials_from_db(row: DbUser) -> StoreResult<UserCredentials> {
    let role = Role::from_str(&row.role).map_err(anyhow::Error::from)?;
    Ok(UserCredentials {
        user: User {
            id: row.id.into(),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            role,
            created_at: row.created_at,
        },
        password_hash: row.password_hash,
    })
}

fn service_from_db(row: DbService) -> Service {
    Service {
        id: row.id.into(),
        provider_id: row.provider_id.into(),
        name: row.name,
        description: row.description,
        price_cents: row.price_cents,
        is_available: row.is_available,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn booking_from_db(row: DbBooking) -> StoreResult<Booking> {
    let status = BookingStatus::from_str(&row.status).map_err(anyhow::Error::from)?;
    Ok(Booking {
        id: row.id.into(),
        user_id: row.user_id.into(),
        service_id: row.service_id.into(),
        provider_id: row.provider_id.into(),
        date: row.date,
        time: row.time,
        address: row.address,
        special_instructions: row.special_instructions,
        price_cents: row.price_cents,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
