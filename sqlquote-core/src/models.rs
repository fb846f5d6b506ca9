//! Value types describing database schema objects.
//!
//! These models carry what a metadata source reports about tables and
//! columns. They are plain serializable values with no behavior beyond
//! convenience formatting.

use serde::{Deserialize, Serialize};

use crate::quoter::IdentifierQuoter;

/// Supported database engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseType {
    PostgreSql,
    MySql,
    Sqlite,
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseType::PostgreSql => write!(f, "PostgreSQL"),
            DatabaseType::MySql => write!(f, "MySQL"),
            DatabaseType::Sqlite => write!(f, "SQLite"),
        }
    }
}

/// A table or view as reported by a metadata source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Catalog holding the table, when the engine has catalogs
    pub catalog: Option<String>,
    /// Schema holding the table, when the engine has schemas
    pub schema: Option<String>,
    /// Table name as stored by the engine
    pub name: String,
    /// Typical values: "BASE TABLE", "VIEW", "SYSTEM TABLE", "LOCAL TEMPORARY"
    pub table_type: String,
    /// Explanatory comment on the table, when one is recorded
    pub remarks: Option<String>,
}

impl TableInfo {
    /// Schema-qualified name with each segment quoted for safe embedding
    /// in generated SQL text.
    ///
    /// # Example
    /// ```rust
    /// use sqlquote_core::{IdentifierQuoter, TableInfo};
    ///
    /// let table = TableInfo {
    ///     catalog: None,
    ///     schema: Some("sales".to_string()),
    ///     name: "order".to_string(),
    ///     table_type: "BASE TABLE".to_string(),
    ///     remarks: None,
    /// };
    /// let quoter = IdentifierQuoter::builder().keyword("ORDER").build();
    /// assert_eq!(table.qualified_name(&quoter), "sales.\"order\"");
    /// ```
    pub fn qualified_name(&self, quoter: &IdentifierQuoter) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", quoter.quote(schema), quoter.quote(&self.name)),
            None => quoter.quote(&self.name),
        }
    }
}

/// A column as reported by a metadata source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name as stored by the engine
    pub name: String,
    /// 1-based position of the column within its table
    pub ordinal_position: u32,
    /// Engine-specific type name (`integer`, `character varying`, ...)
    pub type_name: String,
    /// Whether the column accepts NULL
    pub is_nullable: bool,
    /// Default expression, verbatim, when one is declared
    pub default_value: Option<String>,
}
