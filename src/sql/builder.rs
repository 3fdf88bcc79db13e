//! Builds CREATE TABLE, INSERT, SELECT, UPDATE, DELETE from a record descriptor.

use crate::error::{AppError, ConfigError};
use crate::schema::{validate, ColumnInfo, Descriptor, Record};
use crate::sql::BindValue;

/// Quote identifier for SQLite (safe: only from descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// SELECT list: persisted columns by name, so rows are scanned by name rather than position.
fn select_column_list(desc: &Descriptor) -> String {
    desc.columns()
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn column_def(c: &ColumnInfo) -> Option<String> {
    let sql_type = c.kind.sql_type()?;
    let mut def = format!("{} {}", quoted(c.name), sql_type);
    if c.primary_key {
        def.push_str(" PRIMARY KEY AUTOINCREMENT");
    }
    Some(def)
}

/// CREATE TABLE IF NOT EXISTS for the descriptor. Validates first, so unsupported
/// column types fail here and never at query time.
pub fn create_table(desc: &Descriptor) -> Result<String, ConfigError> {
    validate(desc)?;
    let defs: Vec<String> = desc.columns().iter().filter_map(column_def).collect();
    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(&desc.table_name()),
        defs.join(", ")
    ))
}

/// INSERT over every non-key column; the key is assigned by the database.
pub fn insert<T: Record>(record: &T) -> QueryBuf {
    let desc = &T::DESCRIPTOR;
    let mut q = QueryBuf::new();
    let table = quoted(&desc.table_name());
    let cols = desc.non_key_columns();
    if cols.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES", table);
        return q;
    }
    let names: Vec<String> = cols.iter().map(|c| quoted(c.name)).collect();
    for c in &cols {
        q.params.push(record.get(c.field).unwrap_or(BindValue::Null));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        names.join(", "),
        placeholders(cols.len())
    );
    q
}

/// UPDATE by primary key: SET every non-key column, key value bound last.
pub fn update<T: Record>(record: &T) -> Result<QueryBuf, AppError> {
    let desc = &T::DESCRIPTOR;
    let pk = T::require_primary_key()?;
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in desc.non_key_columns() {
        sets.push(format!("{} = ?", quoted(c.name)));
        q.params.push(record.get(c.field).unwrap_or(BindValue::Null));
    }
    if sets.is_empty() {
        sets.push(format!("{0} = {0}", quoted(pk.name)));
    }
    q.params.push(record.primary_key_value()?);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(&desc.table_name()),
        sets.join(", "),
        quoted(pk.name)
    );
    Ok(q)
}

/// SELECT every row.
pub fn select_all(desc: &Descriptor) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {}",
        select_column_list(desc),
        quoted(&desc.table_name())
    );
    q
}

/// Row count of the record's table.
pub fn count(desc: &Descriptor) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", quoted(&desc.table_name()));
    q
}

/// SELECT by primary key. Caller supplies the key as the sole param.
pub fn select_by_pk(desc: &Descriptor, pk: &ColumnInfo, value: BindValue) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.params.push(value);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        select_column_list(desc),
        quoted(&desc.table_name()),
        quoted(pk.name)
    );
    q
}

/// DELETE by primary key.
pub fn delete(desc: &Descriptor, pk: &ColumnInfo, value: BindValue) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.params.push(value);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        quoted(&desc.table_name()),
        quoted(pk.name)
    );
    q
}
