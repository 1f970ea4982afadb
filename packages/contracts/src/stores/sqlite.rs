//! SQLite storage implementation.
//!
//! The production store: a single file-based database written by one
//! sequential importer. The schema is created by an idempotent migration
//! on connect; `tax_id` carries a UNIQUE constraint backstopping the
//! importer's check-then-insert client resolution.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use crate::error::{StoreError, StoreResult};
use crate::traits::ContractStore;
use crate::types::{Client, ClientCategory, NewClient, NewEvent};

/// SQLite-backed contract store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect and migrate.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - in-memory database (tests)
    /// - `sqlite:events.db?mode=rwc` - file database, created if missing
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(Box::new(e)))?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    ///
    /// Capped at one connection: every pooled connection would otherwise
    /// open its own empty in-memory database.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| StoreError::Connection(Box::new(e)))?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                legal_name TEXT NOT NULL,
                person_type TEXT,
                tax_id TEXT NOT NULL UNIQUE,
                responsible_name TEXT,
                category TEXT NOT NULL,
                postal_code TEXT,
                street TEXT,
                number TEXT,
                complement TEXT,
                district TEXT,
                city TEXT,
                state_code TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_clients_tax_id ON clients(tax_id);
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(Box::new(e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                client_id INTEGER NOT NULL REFERENCES clients(id),
                event_name TEXT,
                event_dates TEXT NOT NULL,
                day_count INTEGER NOT NULL,
                gross_value REAL NOT NULL,
                net_value REAL NOT NULL,
                status TEXT NOT NULL,
                validity_date TEXT,
                process_number TEXT,
                term_number TEXT,
                venue TEXT,
                sei_reference TEXT,
                start_time TEXT,
                end_time TEXT,
                discount_kind TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_events_client_id ON events(client_id);
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(Box::new(e)))?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct ClientRow {
    id: i64,
    legal_name: String,
    person_type: Option<String>,
    tax_id: String,
    responsible_name: Option<String>,
    category: String,
    postal_code: Option<String>,
    street: Option<String>,
    number: Option<String>,
    complement: Option<String>,
    district: Option<String>,
    city: Option<String>,
    state_code: Option<String>,
    created_at: String,
}

impl ClientRow {
    fn into_client(self) -> StoreResult<Client> {
        let category = ClientCategory::parse(&self.category).ok_or_else(|| {
            StoreError::Query(format!("unknown category '{}'", self.category).into())
        })?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StoreError::Query(format!("invalid created_at: {e}").into()))?
            .with_timezone(&Utc);

        Ok(Client {
            id: self.id,
            legal_name: self.legal_name,
            person_type: self.person_type,
            tax_id: self.tax_id,
            responsible_name: self.responsible_name,
            category,
            postal_code: self.postal_code,
            street: self.street,
            number: self.number,
            complement: self.complement,
            district: self.district,
            city: self.city,
            state_code: self.state_code,
            created_at,
        })
    }
}

#[async_trait]
impl ContractStore for SqliteStore {
    async fn find_client_by_tax_id(&self, tax_id: &str) -> StoreResult<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(
            "SELECT id, legal_name, person_type, tax_id, responsible_name, category, \
             postal_code, street, number, complement, district, city, state_code, created_at \
             FROM clients WHERE tax_id = ?",
        )
        .bind(tax_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Query(Box::new(e)))?;

        match row {
            Some(r) => Ok(Some(r.into_client()?)),
            None => Ok(None),
        }
    }

    async fn insert_client(&self, client: &NewClient) -> StoreResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO clients (
                legal_name, person_type, tax_id, responsible_name, category,
                postal_code, street, number, complement, district, city, state_code,
                created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&client.legal_name)
        .bind(&client.person_type)
        .bind(&client.tax_id)
        .bind(&client.responsible_name)
        .bind(client.category.as_str())
        .bind(&client.postal_code)
        .bind(&client.street)
        .bind(&client.number)
        .bind(&client.complement)
        .bind(&client.district)
        .bind(&client.city)
        .bind(&client.state_code)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(Box::new(e)))?;

        Ok(result.last_insert_rowid())
    }

    async fn insert_event(&self, event: &NewEvent) -> StoreResult<i64> {
        let event_dates = serde_json::to_string(&event.event_dates)
            .map_err(|e| StoreError::Query(Box::new(e)))?;

        let result = sqlx::query(
            r#"
            INSERT INTO events (
                client_id, event_name, event_dates, day_count, gross_value, net_value,
                status, validity_date, process_number, term_number, venue, sei_reference,
                start_time, end_time, discount_kind, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.client_id)
        .bind(&event.event_name)
        .bind(&event_dates)
        .bind(event.day_count() as i64)
        .bind(event.gross_value)
        .bind(event.net_value)
        .bind(&event.status)
        .bind(&event.validity_date)
        .bind(&event.process_number)
        .bind(&event.term_number)
        .bind(&event.venue)
        .bind(&event.sei_reference)
        .bind(&event.start_time)
        .bind(&event.end_time)
        .bind(&event.discount_kind)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(Box::new(e)))?;

        Ok(result.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EVENT_STATUS_PENDING;

    fn sample_client(tax_id: &str) -> NewClient {
        NewClient {
            legal_name: "ACME PRODUCOES LTDA".to_string(),
            person_type: Some("PJ".to_string()),
            tax_id: tax_id.to_string(),
            responsible_name: Some("MARIA SOUZA".to_string()),
            category: ClientCategory::General,
            postal_code: Some("57000-000".to_string()),
            street: None,
            number: None,
            complement: None,
            district: None,
            city: Some("MACEIO".to_string()),
            state_code: Some("AL".to_string()),
        }
    }

    #[tokio::test]
    async fn test_client_insert_and_lookup() {
        let store = SqliteStore::in_memory().await.unwrap();

        let id = store
            .insert_client(&sample_client("12345678000195"))
            .await
            .unwrap();

        let found = store
            .find_client_by_tax_id("12345678000195")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.legal_name, "ACME PRODUCOES LTDA");
        assert_eq!(found.category, ClientCategory::General);

        let missing = store.find_client_by_tax_id("00000000000000").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_tax_id_is_rejected() {
        let store = SqliteStore::in_memory().await.unwrap();

        store
            .insert_client(&sample_client("12345678000195"))
            .await
            .unwrap();
        let err = store
            .insert_client(&sample_client("12345678000195"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[tokio::test]
    async fn test_event_insert_persists_derived_columns() {
        let store = SqliteStore::in_memory().await.unwrap();
        let client_id = store
            .insert_client(&sample_client("12345678000195"))
            .await
            .unwrap();

        let event = NewEvent {
            client_id,
            event_name: Some("Feira de Inovacao".to_string()),
            event_dates: vec!["2025-03-01".to_string(), "2025-03-02".to_string()],
            gross_value: 125.0,
            net_value: 100.0,
            status: EVENT_STATUS_PENDING.to_string(),
            validity_date: None,
            process_number: Some("PROC-1".to_string()),
            term_number: Some("42/2025".to_string()),
            venue: Some("Auditorio".to_string()),
            sei_reference: None,
            start_time: Some("08:00".to_string()),
            end_time: Some("18:00".to_string()),
            discount_kind: "Government".to_string(),
        };

        store.insert_event(&event).await.unwrap();

        let (day_count, dates, status): (i64, String, String) = sqlx::query_as(
            "SELECT day_count, event_dates, status FROM events WHERE client_id = ?",
        )
        .bind(client_id)
        .fetch_one(store.pool())
        .await
        .unwrap();

        assert_eq!(day_count, 2);
        assert_eq!(dates, r#"["2025-03-01","2025-03-02"]"#);
        assert_eq!(status, "Pending");
    }
}
