//! SQLite persistence for the `class_schedule` table.
//!
//! Queries use the runtime-checked `sqlx::query` form so no database is needed
//! at compile time. Migrations under `migrations/` are embedded and applied on
//! connect.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{ClassDraft, ClassSchedule, ClassType, DayOfWeek};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("class {0} not found")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("invalid row: {0}")]
    InvalidRow(String),
}

// Active rows first by weekday, appointment-only rows (NULL day) last.
const ORDER_BY: &str = "ORDER BY day_of_week IS NULL, day_of_week ASC, start_time ASC";

const SELECT_COLUMNS: &str = "SELECT id, class_type, title_en, title_ru, desc_en, desc_ru, \
     day_of_week, start_time, duration, capacity, is_active, created_at, updated_at \
     FROM class_schedule";

#[derive(Debug, FromRow)]
struct ClassRow {
    id: String,
    class_type: String,
    title_en: String,
    title_ru: String,
    desc_en: Option<String>,
    desc_ru: Option<String>,
    day_of_week: Option<i64>,
    start_time: String,
    duration: i64,
    capacity: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClassRow> for ClassSchedule {
    type Error = StoreError;

    fn try_from(row: ClassRow) -> Result<Self, Self::Error> {
        let class_type = row
            .class_type
            .parse::<ClassType>()
            .map_err(StoreError::InvalidRow)?;
        let day_of_week = match row.day_of_week {
            Some(index) => Some(DayOfWeek::from_index(index).ok_or_else(|| {
                StoreError::InvalidRow(format!("day_of_week {index} out of range"))
            })?),
            None => None,
        };
        let start_time = NaiveTime::parse_from_str(&row.start_time, "%H:%M").map_err(|_| {
            StoreError::InvalidRow(format!("start_time '{}' is not HH:MM", row.start_time))
        })?;
        let duration = u32::try_from(row.duration)
            .map_err(|_| StoreError::InvalidRow(format!("duration {}", row.duration)))?;
        let capacity = u32::try_from(row.capacity)
            .map_err(|_| StoreError::InvalidRow(format!("capacity {}", row.capacity)))?;

        Ok(ClassSchedule {
            id: row.id,
            class_type,
            title_en: row.title_en,
            title_ru: row.title_ru,
            desc_en: row.desc_en,
            desc_ru: row.desc_ru,
            day_of_week,
            start_time,
            duration,
            capacity,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_classes(rows: Vec<ClassRow>) -> Result<Vec<ClassSchedule>, StoreError> {
    rows.into_iter().map(ClassSchedule::try_from).collect()
}

fn start_time_text(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[derive(Clone, Debug)]
pub struct ClassStore {
    pool: SqlitePool,
}

impl ClassStore {
    /// Opens (or creates) the database at `url` and applies pending migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;
        Self::migrate(pool).await
    }

    /// Private in-memory database. A single connection that never expires
    /// keeps the data alive for the lifetime of the store.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn list_active(&self) -> Result<Vec<ClassSchedule>, StoreError> {
        let rows: Vec<ClassRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE is_active = 1 {ORDER_BY}"))
                .fetch_all(&self.pool)
                .await?;
        into_classes(rows)
    }

    pub async fn list_all(&self) -> Result<Vec<ClassSchedule>, StoreError> {
        let rows: Vec<ClassRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} {ORDER_BY}"))
            .fetch_all(&self.pool)
            .await?;
        into_classes(rows)
    }

    pub async fn get(&self, id: &str) -> Result<ClassSchedule, StoreError> {
        let row: Option<ClassRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| StoreError::NotFound(id.to_string()))?
            .try_into()
    }

    pub async fn create(&self, draft: &ClassDraft) -> Result<ClassSchedule, StoreError> {
        let id = Uuid::new_v4().to_string();
        let mut conn = self.pool.acquire().await?;
        insert(&mut *conn, &id, draft, Utc::now()).await?;
        drop(conn);
        info!(id = %id, title = %draft.title_en, "class created");
        self.get(&id).await
    }

    pub async fn update(&self, id: &str, draft: &ClassDraft) -> Result<ClassSchedule, StoreError> {
        let result = sqlx::query(
            "UPDATE class_schedule SET class_type = ?1, title_en = ?2, title_ru = ?3, \
             desc_en = ?4, desc_ru = ?5, day_of_week = ?6, start_time = ?7, duration = ?8, \
             capacity = ?9, is_active = COALESCE(?10, is_active), updated_at = ?11 \
             WHERE id = ?12",
        )
        .bind(draft.class_type.as_str())
        .bind(&draft.title_en)
        .bind(&draft.title_ru)
        .bind(&draft.desc_en)
        .bind(&draft.desc_ru)
        .bind(draft.day_of_week.map(|d| i64::from(d.index())))
        .bind(start_time_text(draft.start_time))
        .bind(i64::from(draft.duration))
        .bind(i64::from(draft.capacity))
        .bind(draft.is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        info!(id = %id, "class updated");
        self.get(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM class_schedule WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        info!(id = %id, "class deleted");
        Ok(())
    }

    /// Clears the table and inserts `drafts` atomically. Returns the number of rows written.
    pub async fn replace_all(&self, drafts: &[ClassDraft]) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM class_schedule")
            .execute(&mut *tx)
            .await?;
        let now = Utc::now();
        for draft in drafts {
            insert(&mut *tx, &Uuid::new_v4().to_string(), draft, now).await?;
        }
        tx.commit().await?;
        Ok(drafts.len())
    }
}

async fn insert(
    conn: &mut sqlx::SqliteConnection,
    id: &str,
    draft: &ClassDraft,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO class_schedule (id, class_type, title_en, title_ru, desc_en, desc_ru, \
         day_of_week, start_time, duration, capacity, is_active, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
    )
    .bind(id)
    .bind(draft.class_type.as_str())
    .bind(&draft.title_en)
    .bind(&draft.title_ru)
    .bind(&draft.desc_en)
    .bind(&draft.desc_ru)
    .bind(draft.day_of_week.map(|d| i64::from(d.index())))
    .bind(start_time_text(draft.start_time))
    .bind(i64::from(draft.duration))
    .bind(i64::from(draft.capacity))
    .bind(true)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}
