use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// A validated relational schema.
///
/// Tables keep the order the backend reported them in; that order drives both
/// grid placement and every tie-break in the analytics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub dialect: Option<String>,
    pub namespaces: Vec<String>,
    pub tables: Vec<Table>,
    pub foreign_keys: Vec<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub name: String,
    pub kind: TableKind,
    pub namespace: Option<String>,
    pub columns: Vec<Column>,
    pub meta: Option<TableMeta>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    #[default]
    Table,
    View,
}

impl TableKind {
    /// Map a dialect-reported object type ("table", "BASE TABLE", "VIEW", ...).
    pub fn from_label(label: &str) -> Self {
        if label.to_ascii_lowercase().contains("view") {
            Self::View
        } else {
            Self::Table
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub is_primary_key: bool,
    pub nullable: bool,
    pub default_value: Option<Value>,
    pub length: Option<u64>,
    pub precision: Option<u64>,
    pub scale: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMeta {
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub approx_row_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// Directed reference: `from` is the referencing (child) side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    pub from: ColumnRef,
    pub to: ColumnRef,
    pub ref_schema: Option<String>,
    /// Referential actions as reported by the dialect, e.g. "CASCADE".
    pub on_update: Option<String>,
    pub on_delete: Option<String>,
}

impl ForeignKey {
    pub fn new(from: ColumnRef, to: ColumnRef) -> Self {
        Self {
            from,
            to,
            ref_schema: None,
            on_update: None,
            on_delete: None,
        }
    }

    pub fn is_self_reference(&self) -> bool {
        self.from.table == self.to.table
    }
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TableKind::Table,
            namespace: None,
            columns: Vec::new(),
            meta: None,
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_meta(mut self, meta: TableMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn has_primary_key(&self) -> bool {
        self.columns.iter().any(|c| c.is_primary_key)
    }
}

impl Column {
    pub fn new(name: impl Into<String>, typ: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
            is_primary_key: false,
            nullable: true,
            default_value: None,
            length: None,
            precision: None,
            scale: None,
        }
    }

    /// Shorthand for a non-nullable primary key column.
    pub fn pk(name: impl Into<String>, typ: impl Into<String>) -> Self {
        Self {
            is_primary_key: true,
            nullable: false,
            ..Self::new(name, typ)
        }
    }
}

impl Schema {
    pub fn new(tables: Vec<Table>, foreign_keys: Vec<ForeignKey>) -> Self {
        Self {
            dialect: None,
            namespaces: Vec::new(),
            tables,
            foreign_keys,
        }
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }
}
