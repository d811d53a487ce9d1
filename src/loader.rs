//! Parse-and-validate boundary between backend JSON and the typed [`Schema`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::raw::{RawColumn, RawDatabaseSchema, RawForeignKey, RawTable, RawTableMeta};
use crate::schema::{Column, ColumnRef, ForeignKey, Schema, Table, TableKind, TableMeta};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Schema JSON must be an object, found {0}")]
    NotAnObject(&'static str),
}

/// Parse backend schema JSON into a [`Schema`].
///
/// Only syntactically broken JSON or a non-object document is an error.
/// Records missing their identifying fields are skipped, duplicates keep the
/// first occurrence, and dangling foreign keys are kept as-is.
pub fn parse_schema(input: &str) -> Result<Schema, LoadError> {
    let value: Value = serde_json::from_str(input)?;
    schema_from_value(value)
}

pub fn schema_from_value(value: Value) -> Result<Schema, LoadError> {
    if !value.is_object() {
        return Err(LoadError::NotAnObject(json_kind(&value)));
    }
    let raw: RawDatabaseSchema = serde_json::from_value(value)?;
    Ok(from_raw(raw))
}

pub fn from_raw(raw: RawDatabaseSchema) -> Schema {
    let mut seen: HashSet<String> = HashSet::new();
    let mut tables = Vec::with_capacity(raw.tables.len());
    let mut foreign_keys = Vec::new();

    for (idx, raw_table) in raw.tables.into_iter().enumerate() {
        let Some(name) = non_empty(raw_table.name.as_deref()) else {
            warn!(index = idx, "skipping table without a name");
            continue;
        };
        if !seen.insert(name.to_string()) {
            warn!(table = name, "skipping duplicate table definition");
            continue;
        }
        let name = name.to_string();

        for raw_fk in &raw_table.foreign_keys {
            if let Some(fk) = convert_foreign_key(&name, raw_fk) {
                foreign_keys.push(fk);
            }
        }
        tables.push(convert_table(name, raw_table));
    }

    let namespaces = if raw.schemas.is_empty() {
        let mut namespaces: Vec<String> = Vec::new();
        for ns in tables.iter().filter_map(|t| t.namespace.as_ref()) {
            if !namespaces.contains(ns) {
                namespaces.push(ns.clone());
            }
        }
        namespaces
    } else {
        raw.schemas
    };

    debug!(
        tables = tables.len(),
        foreign_keys = foreign_keys.len(),
        "loaded schema"
    );

    Schema {
        dialect: raw.dialect,
        namespaces,
        tables,
        foreign_keys,
    }
}

fn convert_table(name: String, raw: RawTable) -> Table {
    let columns = raw
        .columns
        .iter()
        .filter_map(|c| {
            let column = convert_column(c);
            if column.is_none() {
                warn!(table = %name, "skipping column without a name");
            }
            column
        })
        .collect();

    Table {
        kind: raw
            .kind
            .as_deref()
            .map(TableKind::from_label)
            .unwrap_or_default(),
        namespace: raw.schema,
        meta: raw.meta.as_ref().map(convert_meta),
        columns,
        name,
    }
}

fn convert_column(raw: &RawColumn) -> Option<Column> {
    let name = non_empty(raw.name.as_deref())?;
    let nullable = match (raw.nullable, raw.not_null) {
        (Some(nullable), _) => nullable,
        (None, Some(not_null)) => !not_null,
        (None, None) => true,
    };

    Some(Column {
        name: name.to_string(),
        typ: raw.typ.clone().unwrap_or_default(),
        is_primary_key: raw.primary_key.unwrap_or(false),
        nullable,
        default_value: raw.default_value.clone().filter(|v| !v.is_null()),
        length: raw.length.as_ref().and_then(Value::as_u64),
        precision: raw.precision.as_ref().and_then(Value::as_u64),
        scale: raw.scale.as_ref().and_then(Value::as_i64),
    })
}

fn convert_foreign_key(table: &str, raw: &RawForeignKey) -> Option<ForeignKey> {
    let Some(to_table) = non_empty(raw.to_table.as_deref()) else {
        warn!(table, "skipping foreign key without a target table");
        return None;
    };

    Some(ForeignKey {
        from: ColumnRef::new(table, raw.from.clone().unwrap_or_default()),
        to: ColumnRef::new(to_table, raw.to.clone().unwrap_or_default()),
        ref_schema: raw.ref_schema.clone(),
        on_update: raw.on_update.clone(),
        on_delete: raw.on_delete.clone(),
    })
}

fn convert_meta(raw: &RawTableMeta) -> TableMeta {
    TableMeta {
        created_at: raw.created_at.as_ref().and_then(parse_timestamp),
        updated_at: raw.updated_at.as_ref().and_then(parse_timestamp),
        approx_row_count: raw.approx_row_count.as_ref().and_then(parse_row_count),
    }
}

/// Accepts RFC 3339, SQLite-style `YYYY-MM-DD HH:MM:SS[.fff]` (UTC), plain
/// dates, and epoch milliseconds. Anything else is `None`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_row_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
