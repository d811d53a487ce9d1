//! Wire shapes produced by the introspection backend.
//!
//! Everything here is lenient: missing, `null` or mistyped fields fall back to
//! their defaults so that partial introspection output still deserializes.
//! Validation into the typed [`Schema`](crate::schema::Schema) happens in
//! [`crate::loader`].

use serde::Deserialize;
use serde_json::Value;

use crate::lenient;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDatabaseSchema {
    #[serde(deserialize_with = "lenient::text")]
    pub dialect: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub schemas: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub tables: Vec<RawTable>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTable {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub schema: Option<String>,
    /// "table", "view", "BASE TABLE", ... as reported by the dialect.
    #[serde(
        rename = "type",
        alias = "type_",
        alias = "kind",
        deserialize_with = "lenient::text"
    )]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub columns: Vec<RawColumn>,
    #[serde(
        rename = "foreignKeys",
        alias = "foreign_keys",
        deserialize_with = "lenient::list"
    )]
    pub foreign_keys: Vec<RawForeignKey>,
    #[serde(deserialize_with = "lenient::record")]
    pub meta: Option<RawTableMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawColumn {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(
        rename = "type",
        alias = "data_type",
        alias = "dataType",
        deserialize_with = "lenient::text"
    )]
    pub typ: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub nullable: Option<bool>,
    #[serde(alias = "notNull", alias = "notnull", deserialize_with = "lenient::flag")]
    pub not_null: Option<bool>,
    #[serde(rename = "defaultValue", alias = "default")]
    pub default_value: Option<Value>,
    #[serde(
        rename = "primaryKey",
        alias = "is_pk",
        alias = "isPrimaryKey",
        alias = "pk",
        deserialize_with = "lenient::flag"
    )]
    pub primary_key: Option<bool>,
    pub length: Option<Value>,
    pub precision: Option<Value>,
    pub scale: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawForeignKey {
    #[serde(deserialize_with = "lenient::text")]
    pub from: Option<String>,
    #[serde(
        rename = "toTable",
        alias = "to_table",
        alias = "table",
        deserialize_with = "lenient::text"
    )]
    pub to_table: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub to: Option<String>,
    #[serde(
        rename = "refSchema",
        alias = "ref_schema",
        deserialize_with = "lenient::text"
    )]
    pub ref_schema: Option<String>,
    #[serde(
        rename = "onUpdate",
        alias = "on_update",
        deserialize_with = "lenient::text"
    )]
    pub on_update: Option<String>,
    #[serde(
        rename = "onDelete",
        alias = "on_delete",
        deserialize_with = "lenient::text"
    )]
    pub on_delete: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTableMeta {
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: Option<Value>,
    #[serde(rename = "updatedAt", alias = "updated_at")]
    pub updated_at: Option<Value>,
    #[serde(rename = "approxRowCount", alias = "approx_row_count", alias = "rowCount")]
    pub approx_row_count: Option<Value>,
}
