//! The metadata capability consumed by the quoting engine.
//!
//! [`MetadataSource`] is the narrow contract a database connection must
//! expose for [`crate::IdentifierQuoter::from_metadata`] to derive a
//! quoting configuration, plus table/column introspection for callers
//! that generate SQL against the same connection. The trait is
//! object-safe so sources can be passed around as `Box<dyn
//! MetadataSource>`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ColumnInfo, DatabaseType, TableInfo};

/// Filter for table listing.
///
/// Patterns use SQL `LIKE` syntax (`%` matches any sequence, `_` any
/// single character) and must match names as the engine stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    /// Exact catalog name; `None` leaves the catalog unconstrained
    pub catalog: Option<String>,
    /// Schema name pattern; `None` leaves the schema unconstrained
    pub schema_pattern: Option<String>,
    /// Table name pattern; defaults to `%`
    pub table_name_pattern: String,
    /// Table types to include ("BASE TABLE", "VIEW", ...); `None` keeps all
    pub types: Option<Vec<String>>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            catalog: None,
            schema_pattern: None,
            table_name_pattern: "%".to_string(),
            types: None,
        }
    }
}

impl TableQuery {
    /// Query matching a table name pattern in any schema.
    pub fn named(pattern: impl Into<String>) -> Self {
        Self {
            table_name_pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Checks a reported table type against the requested type list.
    pub(crate) fn accepts_type(&self, table_type: &str) -> bool {
        match &self.types {
            Some(types) => types.iter().any(|t| t.eq_ignore_ascii_case(table_type)),
            None => true,
        }
    }
}

/// Quoting-relevant metadata and schema introspection for one database
/// connection.
///
/// The six probe methods mirror what database drivers commonly report
/// about identifier handling. Contracts:
/// - [`identifier_quote_string`](Self::identifier_quote_string) reports a
///   single space when the engine does not support quoting at all.
/// - [`sql_keywords`](Self::sql_keywords) reports a comma-separated list
///   of engine-specific keywords, excluding the SQL standard's own
///   reserved words.
/// - Probes contractually return `Some`, but real drivers are known to
///   break that contract; callers substitute an empty string and log
///   rather than fail.
///
/// # Object Safety
/// This trait is object-safe, allowing dynamic dispatch through
/// `Box<dyn MetadataSource>` or `Arc<dyn MetadataSource>`.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// The string used to bracket quoted identifiers.
    async fn identifier_quote_string(&self) -> Result<Option<String>>;

    /// Comma-separated list of engine-specific keywords.
    async fn sql_keywords(&self) -> Result<Option<String>>;

    /// Characters beyond letters, digits and `_` that may appear in
    /// unquoted identifiers.
    async fn extra_name_characters(&self) -> Result<Option<String>>;

    /// Whether the engine folds unquoted identifiers to upper case.
    async fn stores_upper_case_identifiers(&self) -> Result<bool>;

    /// Whether the engine folds unquoted identifiers to lower case.
    async fn stores_lower_case_identifiers(&self) -> Result<bool>;

    /// Whether the engine stores unquoted identifiers as typed.
    async fn stores_mixed_case_identifiers(&self) -> Result<bool>;

    /// Lists tables matching the query.
    ///
    /// # Errors
    /// Returns a metadata error if the underlying catalog query fails.
    async fn tables(&self, query: &TableQuery) -> Result<Vec<TableInfo>>;

    /// Lists the columns of a table in ordinal order.
    ///
    /// # Errors
    /// Returns a metadata error if the underlying catalog query fails.
    async fn columns(&self, schema: Option<&str>, table: &str) -> Result<Vec<ColumnInfo>>;

    /// The engine behind this source.
    fn database_type(&self) -> DatabaseType;
}

/// Substitutes an empty string for a probe result that contractually
/// should not have been `None`, logging the anomaly.
pub(crate) fn unexpected_null_to_empty(value: Option<String>, probe: &str) -> String {
    match value {
        Some(value) => value,
        None => {
            tracing::debug!(probe, "metadata probe returned null, substituting empty string");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_query_default_matches_everything() {
        let query = TableQuery::default();
        assert_eq!(query.table_name_pattern, "%");
        assert!(query.catalog.is_none());
        assert!(query.schema_pattern.is_none());
        assert!(query.accepts_type("BASE TABLE"));
        assert!(query.accepts_type("VIEW"));
    }

    #[test]
    fn test_table_query_type_filter_is_case_insensitive() {
        let query = TableQuery {
            types: Some(vec!["view".to_string()]),
            ..TableQuery::default()
        };
        assert!(query.accepts_type("VIEW"));
        assert!(!query.accepts_type("BASE TABLE"));
    }

    #[test]
    fn test_unexpected_null_to_empty() {
        assert_eq!(
            unexpected_null_to_empty(Some("value".to_string()), "probe"),
            "value"
        );
        assert_eq!(unexpected_null_to_empty(None, "probe"), "");
    }
}
