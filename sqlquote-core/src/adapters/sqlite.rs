//! SQLite metadata source.
//!
//! SQLite has no server to interrogate for identifier conventions: the
//! quote string, keyword list and case handling are properties of the
//! library itself, so the probes answer from built-in facts. Schema
//! listing goes through `sqlite_master` and `pragma_table_info`.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use super::ConnectionConfig;
use crate::error::{Result, SqlQuoteError};
use crate::metadata::{MetadataSource, TableQuery};
use crate::models::{ColumnInfo, DatabaseType, TableInfo};

/// Keywords compiled into the SQLite engine.
///
/// SQLite exposes its keyword list through the C API only, so the set is
/// mirrored here; it is stable across the 3.x series.
const SQLITE_KEYWORDS: &str = "ABORT,ACTION,ADD,AFTER,ALL,ALTER,ALWAYS,ANALYZE,AND,AS,ASC,\
ATTACH,AUTOINCREMENT,BEFORE,BEGIN,BETWEEN,BY,CASCADE,CASE,CAST,CHECK,COLLATE,COLUMN,COMMIT,\
CONFLICT,CONSTRAINT,CREATE,CROSS,CURRENT,CURRENT_DATE,CURRENT_TIME,CURRENT_TIMESTAMP,DATABASE,\
DEFAULT,DEFERRABLE,DEFERRED,DELETE,DESC,DETACH,DISTINCT,DO,DROP,EACH,ELSE,END,ESCAPE,EXCEPT,\
EXCLUDE,EXCLUSIVE,EXISTS,EXPLAIN,FAIL,FILTER,FIRST,FOLLOWING,FOR,FOREIGN,FROM,FULL,GENERATED,\
GLOB,GROUP,GROUPS,HAVING,IF,IGNORE,IMMEDIATE,IN,INDEX,INDEXED,INITIALLY,INNER,INSERT,INSTEAD,\
INTERSECT,INTO,IS,ISNULL,JOIN,KEY,LAST,LEFT,LIKE,LIMIT,MATCH,MATERIALIZED,NATURAL,NO,NOT,\
NOTHING,NOTNULL,NULL,NULLS,OF,OFFSET,ON,OR,ORDER,OTHERS,OUTER,OVER,PARTITION,PLAN,PRAGMA,\
PRECEDING,PRIMARY,QUERY,RAISE,RANGE,RECURSIVE,REFERENCES,REGEXP,REINDEX,RELEASE,RENAME,\
REPLACE,RESTRICT,RETURNING,RIGHT,ROLLBACK,ROW,ROWS,SAVEPOINT,SELECT,SET,TABLE,TEMP,TEMPORARY,\
THEN,TIES,TO,TRANSACTION,TRIGGER,UNBOUNDED,UNION,UNIQUE,UPDATE,USING,VACUUM,VALUES,VIEW,\
VIRTUAL,WHEN,WHERE,WINDOW,WITH,WITHOUT";

/// SQLite metadata source over a file-based or in-memory database.
pub struct SqliteMetadataSource {
    pool: SqlitePool,
    config: ConnectionConfig,
}

impl std::fmt::Debug for SqliteMetadataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteMetadataSource")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SqliteMetadataSource {
    /// Creates a new SQLite metadata source.
    ///
    /// # Errors
    /// Returns error if the connection string is not a recognizable
    /// SQLite path or URL, or the pool cannot be configured.
    pub async fn new(connection_string: &str) -> Result<Self> {
        validate_connection_string(connection_string)?;

        // A single connection is sufficient for metadata work.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_lazy(connection_string)
            .map_err(|e| {
                SqlQuoteError::connection_failed("failed to open SQLite database", e)
            })?;

        let config = ConnectionConfig {
            host: "localhost".to_string(),
            database: Some(connection_string.trim_start_matches("sqlite://").to_string()),
            max_connections: 1,
            ..ConnectionConfig::default()
        };

        Ok(Self { pool, config })
    }

    /// Gets the connection configuration.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Tests the database connection without reading any metadata.
    ///
    /// # Errors
    /// Returns a connection error if the round trip fails.
    pub async fn test_connection(&self) -> Result<()> {
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| SqlQuoteError::connection_failed("connectivity check failed", e))?;

        if one != 1 {
            return Err(SqlQuoteError::configuration(
                "connectivity check returned an unexpected result",
            ));
        }
        Ok(())
    }

    /// Closes the connection pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl MetadataSource for SqliteMetadataSource {
    async fn identifier_quote_string(&self) -> Result<Option<String>> {
        Ok(Some("\"".to_string()))
    }

    async fn sql_keywords(&self) -> Result<Option<String>> {
        Ok(Some(SQLITE_KEYWORDS.to_string()))
    }

    async fn extra_name_characters(&self) -> Result<Option<String>> {
        Ok(Some("$".to_string()))
    }

    async fn stores_upper_case_identifiers(&self) -> Result<bool> {
        Ok(false)
    }

    async fn stores_lower_case_identifiers(&self) -> Result<bool> {
        Ok(false)
    }

    async fn stores_mixed_case_identifiers(&self) -> Result<bool> {
        // SQLite preserves identifier case and compares case-insensitively.
        Ok(true)
    }

    async fn tables(&self, query: &TableQuery) -> Result<Vec<TableInfo>> {
        let rows = sqlx::query(
            r#"
            SELECT name, type
            FROM sqlite_master
            WHERE type IN ('table', 'view')
              AND name LIKE ?1
              AND name NOT LIKE 'sqlite_%'
            ORDER BY name
            "#,
        )
        .bind(&query.table_name_pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SqlQuoteError::metadata_failed("failed to query sqlite_master", e))?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in &rows {
            let kind: String = field(row, "type")?;
            let info = TableInfo {
                catalog: None,
                schema: None,
                name: field(row, "name")?,
                table_type: if kind == "view" { "VIEW" } else { "TABLE" }.to_string(),
                remarks: None,
            };
            if query.accepts_type(&info.table_type) {
                tables.push(info);
            }
        }

        tracing::debug!(count = tables.len(), "enumerated tables");
        Ok(tables)
    }

    async fn columns(&self, _schema: Option<&str>, table: &str) -> Result<Vec<ColumnInfo>> {
        // SQLite has a single schema per database file; the schema
        // argument is accepted for interface parity and ignored.
        let rows = sqlx::query(
            r#"
            SELECT name, type, "notnull", dflt_value, cid
            FROM pragma_table_info(?1)
            ORDER BY cid
            "#,
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            SqlQuoteError::metadata_failed(
                format!("failed to enumerate columns of '{}'", table),
                e,
            )
        })?;

        rows.iter()
            .map(|row| {
                let cid: i64 = field(row, "cid")?;
                let not_null: i64 = field(row, "notnull")?;
                Ok(ColumnInfo {
                    name: field(row, "name")?,
                    ordinal_position: u32::try_from(cid.saturating_add(1)).unwrap_or(0),
                    type_name: field(row, "type")?,
                    is_nullable: not_null == 0,
                    default_value: field(row, "dflt_value")?,
                })
            })
            .collect()
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::Sqlite
    }
}

/// Extracts a typed field from a row with proper error context.
fn field<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name).map_err(|e| {
        SqlQuoteError::metadata_failed(format!("failed to decode column '{}'", name), e)
    })
}

fn validate_connection_string(connection_string: &str) -> Result<()> {
    if connection_string.starts_with("sqlite:")
        || connection_string.ends_with(".db")
        || connection_string.ends_with(".sqlite")
    {
        Ok(())
    } else {
        Err(SqlQuoteError::configuration(
            "connection string must use the sqlite:// scheme or point at a .db/.sqlite file",
        ))
    }
}
