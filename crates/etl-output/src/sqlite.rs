//! SQLite sink with replace-table-contents semantics.

use std::path::Path;

use rusqlite::Connection;
use rusqlite::types::Value as SqlValue;

use etl_model::{FieldType, RecordSet, Value};

use crate::error::{OutputError, Result};

/// Replace the contents of `table` with the record set.
///
/// The table is dropped and recreated on every write (not an upsert), with
/// column types derived from the schema. The connection is opened, used
/// inside one transaction, and closed within this call.
pub fn write_sqlite_table(set: &RecordSet, db_path: &Path, table: &str) -> Result<()> {
    validate_table_name(table)?;

    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut conn =
        Connection::open(db_path).map_err(|e| sqlite_error(table, "open database", &e))?;
    let tx = conn
        .transaction()
        .map_err(|e| sqlite_error(table, "begin transaction", &e))?;

    tx.execute_batch(&format!("DROP TABLE IF EXISTS \"{table}\""))
        .map_err(|e| sqlite_error(table, "drop table", &e))?;

    let columns: Vec<String> = set
        .schema()
        .fields()
        .iter()
        .map(|field| format!("\"{}\" {}", field.name, column_type(field.field_type)))
        .collect();
    tx.execute_batch(&format!(
        "CREATE TABLE \"{table}\" ({})",
        columns.join(", ")
    ))
    .map_err(|e| sqlite_error(table, "create table", &e))?;

    let placeholders: Vec<String> = (1..=set.schema().len()).map(|i| format!("?{i}")).collect();
    let insert = format!(
        "INSERT INTO \"{table}\" VALUES ({})",
        placeholders.join(", ")
    );
    {
        let mut stmt = tx
            .prepare(&insert)
            .map_err(|e| sqlite_error(table, "prepare insert", &e))?;
        for record in set.records() {
            let params = record.values().iter().map(sql_value);
            stmt.execute(rusqlite::params_from_iter(params))
                .map_err(|e| sqlite_error(table, "insert row", &e))?;
        }
    }

    tx.commit()
        .map_err(|e| sqlite_error(table, "commit", &e))?;

    tracing::debug!(db = %db_path.display(), table, rows = set.len(), "sqlite sink written");
    Ok(())
}

fn column_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Str => "TEXT",
        FieldType::Int => "INTEGER",
        FieldType::Float => "REAL",
    }
}

fn sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Str(v) => SqlValue::Text(v.clone()),
        Value::Int(v) => SqlValue::Integer(*v),
        Value::Float(v) => SqlValue::Real(*v),
        Value::Null => SqlValue::Null,
    }
}

/// Table names are interpolated into DDL; restrict them to identifiers.
fn validate_table_name(table: &str) -> Result<()> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(OutputError::Sqlite {
            table: table.to_string(),
            message: "table name must be alphanumeric/underscore".to_string(),
        })
    }
}

fn sqlite_error(table: &str, action: &str, error: &rusqlite::Error) -> OutputError {
    OutputError::Sqlite {
        table: table.to_string(),
        message: format!("{action}: {error}"),
    }
}
