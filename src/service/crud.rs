//! Generic CRUD execution against SQLite.

use crate::error::AppError;
use crate::schema::{ColumnInfo, Record, ScalarKind};
use crate::sql::{self, BindValue, QueryBuf};
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::SqlitePool;

/// Typed CRUD over any [`Record`]. One table per record type, one round trip per call,
/// no retries. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        RecordStore { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Registers a record type: CREATE TABLE IF NOT EXISTS. Safe to call repeatedly.
    pub async fn create_table<T: Record>(&self) -> Result<(), AppError> {
        let ddl = sql::create_table(&T::DESCRIPTOR)?;
        tracing::debug!(sql = %ddl, "create table");
        sqlx::query(&ddl).execute(&self.pool).await?;
        tracing::info!(table = %T::DESCRIPTOR.table_name(), "table ready");
        Ok(())
    }

    /// Inserts the record and writes the database-assigned key back into it.
    pub async fn insert<T: Record>(&self, record: &mut T) -> Result<(), AppError> {
        let pk = T::require_primary_key()?;
        let q = sql::insert(record);
        let result = self.execute(&q).await?;
        record.set(pk.field, BindValue::Integer(result.last_insert_rowid()))?;
        Ok(())
    }

    /// Updates every non-key column of the row with the record's key.
    /// Matching no row is not an error.
    pub async fn update<T: Record>(&self, record: &T) -> Result<(), AppError> {
        let q = sql::update(record)?;
        let result = self.execute(&q).await?;
        if result.rows_affected() == 0 {
            tracing::debug!(table = %T::DESCRIPTOR.table_name(), "update matched no row");
        }
        Ok(())
    }

    /// Every row of the record's table.
    pub async fn load_all<T: Record>(&self) -> Result<Vec<T>, AppError> {
        let q = sql::select_all(&T::DESCRIPTOR);
        let rows = self.query_many(&q).await?;
        rows.iter().map(row_to_record::<T>).collect()
    }

    /// Number of stored rows. Fails if the table is missing or the pool is closed.
    pub async fn count<T: Record>(&self) -> Result<i64, AppError> {
        let q = sql::count(&T::DESCRIPTOR);
        tracing::debug!(sql = %q.sql, "query");
        let n = sqlx::query_scalar::<_, i64>(&q.sql)
            .persistent(false)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    /// The row with the given key, or `None`.
    pub async fn load_by_primary_key<T: Record>(
        &self,
        value: impl Into<BindValue>,
    ) -> Result<Option<T>, AppError> {
        let pk = T::require_primary_key()?;
        let q = sql::select_by_pk(&T::DESCRIPTOR, &pk, value.into());
        let row = self.query_optional(&q).await?;
        row.as_ref().map(row_to_record::<T>).transpose()
    }

    /// Like [`Self::load_by_primary_key`], but absence is the zero-valued record.
    /// Check the result with [`Record::is_empty`]; a stored row whose fields are all
    /// zero is indistinguishable from a missing one.
    pub async fn load_by_primary_key_or_empty<T: Record>(
        &self,
        value: impl Into<BindValue>,
    ) -> Result<T, AppError> {
        Ok(self.load_by_primary_key(value).await?.unwrap_or_default())
    }

    /// Deletes the row carrying the record's key. No-op when nothing matches.
    pub async fn delete<T: Record>(&self, record: &T) -> Result<(), AppError> {
        self.delete_by_primary_key::<T>(record.primary_key_value()?).await
    }

    pub async fn delete_by_primary_key<T: Record>(
        &self,
        value: impl Into<BindValue>,
    ) -> Result<(), AppError> {
        let pk = T::require_primary_key()?;
        let q = sql::delete(&T::DESCRIPTOR, &pk, value.into());
        let result = self.execute(&q).await?;
        if result.rows_affected() == 0 {
            tracing::debug!(table = %T::DESCRIPTOR.table_name(), "delete matched no row");
        }
        Ok(())
    }

    async fn execute(&self, q: &QueryBuf) -> Result<SqliteQueryResult, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql).persistent(false);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.execute(&self.pool).await?)
    }

    async fn query_many(&self, q: &QueryBuf) -> Result<Vec<SqliteRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql).persistent(false);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn query_optional(&self, q: &QueryBuf) -> Result<Option<SqliteRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql).persistent(false);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }
}

/// Builds a fresh record from a row, reading each persisted column by name.
fn row_to_record<T: Record>(row: &SqliteRow) -> Result<T, AppError> {
    let mut record = T::default();
    for col in T::DESCRIPTOR.columns() {
        let value = cell_to_value(row, &col)?;
        record.set(col.field, value)?;
    }
    Ok(record)
}

fn cell_to_value(row: &SqliteRow, col: &ColumnInfo) -> Result<BindValue, sqlx::Error> {
    use sqlx::Row;
    Ok(match col.kind {
        ScalarKind::Text => row
            .try_get::<Option<String>, _>(col.name)?
            .map_or(BindValue::Null, BindValue::Text),
        ScalarKind::Integer | ScalarKind::Boolean => row
            .try_get::<Option<i64>, _>(col.name)?
            .map_or(BindValue::Null, BindValue::Integer),
        ScalarKind::Real => row
            .try_get::<Option<f64>, _>(col.name)?
            .map_or(BindValue::Null, BindValue::Real),
    })
}
