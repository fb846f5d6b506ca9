//! SQL identifier quoting driven by live database metadata.
//!
//! This crate decides whether table and column names need quoting before
//! they are embedded in generated SQL text, and escapes them correctly
//! when they do. The quoting rules — quote string, reserved keywords,
//! extra identifier characters, storage-case folding — differ per
//! database engine, so an [`IdentifierQuoter`] can be derived from a live
//! connection's metadata or assembled by hand.
//!
//! # Architecture
//! - [`quoter`]: the quoting engine itself, a pure immutable value
//! - [`keywords`]: reserved-word catalogs for the tracked SQL standards
//! - [`metadata`]: the [`MetadataSource`] capability an engine exposes
//! - [`adapters`]: feature-gated `sqlx`-backed sources (PostgreSQL,
//!   MySQL, SQLite) plus a connection-string factory
//! - [`models`]: serializable table/column descriptions
//!
//! # Example
//! ```rust
//! use sqlquote_core::IdentifierQuoter;
//!
//! let quoter = IdentifierQuoter::builder()
//!     .keyword("select")
//!     .build();
//!
//! assert_eq!(quoter.quote("customer"), "customer");
//! assert_eq!(quoter.quote("order date"), "\"order date\"");
//! assert_eq!(quoter.quote("select"), "\"select\"");
//! ```

pub mod adapters;
pub mod error;
pub mod keywords;
pub mod logging;
pub mod metadata;
pub mod models;
pub mod quoter;

// Re-export commonly used types
pub use adapters::connect;
pub use error::{Result, SqlQuoteError};
pub use keywords::KeywordCatalog;
pub use metadata::{MetadataSource, TableQuery};
pub use models::{ColumnInfo, DatabaseType, TableInfo};
pub use quoter::{
    parse_keyword_list, IdentifierQuoter, IdentifierQuoterBuilder, IdentifierStorageRule,
};
