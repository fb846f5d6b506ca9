//! Tests for deriving a quoter from a metadata source.
//!
//! Uses an in-memory mock source so the introspection path can be
//! exercised without a live database.

use async_trait::async_trait;
use sqlquote_core::{
    ColumnInfo, DatabaseType, IdentifierQuoter, IdentifierStorageRule, KeywordCatalog,
    MetadataSource, SqlQuoteError, TableInfo, TableQuery,
};

/// Configurable in-memory metadata source.
struct MockSource {
    quote_string: Option<String>,
    keywords: Option<String>,
    extra_name_characters: Option<String>,
    stores_upper: bool,
    stores_lower: bool,
    stores_mixed: bool,
    fail_keywords: bool,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            quote_string: Some("\"".to_string()),
            keywords: Some(String::new()),
            extra_name_characters: Some(String::new()),
            stores_upper: true,
            stores_lower: false,
            stores_mixed: false,
            fail_keywords: false,
        }
    }
}

#[async_trait]
impl MetadataSource for MockSource {
    async fn identifier_quote_string(&self) -> sqlquote_core::Result<Option<String>> {
        Ok(self.quote_string.clone())
    }

    async fn sql_keywords(&self) -> sqlquote_core::Result<Option<String>> {
        if self.fail_keywords {
            return Err(SqlQuoteError::metadata_failed(
                "keyword probe failed",
                std::io::Error::other("connection reset"),
            ));
        }
        Ok(self.keywords.clone())
    }

    async fn extra_name_characters(&self) -> sqlquote_core::Result<Option<String>> {
        Ok(self.extra_name_characters.clone())
    }

    async fn stores_upper_case_identifiers(&self) -> sqlquote_core::Result<bool> {
        Ok(self.stores_upper)
    }

    async fn stores_lower_case_identifiers(&self) -> sqlquote_core::Result<bool> {
        Ok(self.stores_lower)
    }

    async fn stores_mixed_case_identifiers(&self) -> sqlquote_core::Result<bool> {
        Ok(self.stores_mixed)
    }

    async fn tables(&self, _query: &TableQuery) -> sqlquote_core::Result<Vec<TableInfo>> {
        Ok(Vec::new())
    }

    async fn columns(
        &self,
        _schema: Option<&str>,
        _table: &str,
    ) -> sqlquote_core::Result<Vec<ColumnInfo>> {
        Ok(Vec::new())
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::Sqlite
    }
}

#[tokio::test]
async fn derives_defaults_from_a_plain_source() {
    let quoter = IdentifierQuoter::from_metadata(&MockSource::default())
        .await
        .unwrap();

    let expected = IdentifierQuoter::builder()
        .keywords(KeywordCatalog::LATEST_RESERVED.keywords().iter().copied())
        .build();

    assert_eq!(quoter, expected);
    assert_eq!(quoter.quote_string(), "\"");
    assert_eq!(quoter.unquoted_storage_rule(), IdentifierStorageRule::Upper);
    assert_eq!(quoter.extra_name_characters(), "");
}

#[tokio::test]
async fn space_sentinel_falls_back_to_default_quote_string() {
    let source = MockSource {
        quote_string: Some(" ".to_string()),
        ..MockSource::default()
    };

    let quoter = IdentifierQuoter::from_metadata(&source).await.unwrap();
    assert_eq!(quoter.quote_string(), "\"");
}

#[tokio::test]
async fn blank_quote_string_falls_back_to_default() {
    for reported in [None, Some(String::new()), Some("   ".to_string())] {
        let source = MockSource {
            quote_string: reported,
            ..MockSource::default()
        };

        let quoter = IdentifierQuoter::from_metadata(&source).await.unwrap();
        assert_eq!(quoter.quote_string(), "\"");
    }
}

#[tokio::test]
async fn engine_specific_quote_string_is_kept_verbatim() {
    let source = MockSource {
        quote_string: Some("`".to_string()),
        ..MockSource::default()
    };

    let quoter = IdentifierQuoter::from_metadata(&source).await.unwrap();
    assert_eq!(quoter.quote_string(), "`");
    assert_eq!(quoter.quote("a`b"), "`a``b`");
}

#[tokio::test]
async fn reported_keywords_are_unioned_with_the_catalog() {
    let source = MockSource {
        keywords: Some(" zorder , clustered ".to_string()),
        ..MockSource::default()
    };

    let quoter = IdentifierQuoter::from_metadata(&source).await.unwrap();

    assert!(quoter.keywords().contains("ZORDER"));
    assert!(quoter.keywords().contains("CLUSTERED"));
    assert!(quoter.keywords().contains("SELECT"));
    assert!(!quoter.keywords().contains(""));

    assert_eq!(quoter.quote("zorder"), "\"zorder\"");
    assert_eq!(quoter.quote("select"), "\"select\"");
}

#[tokio::test]
async fn null_extra_characters_become_empty() {
    let source = MockSource {
        extra_name_characters: None,
        ..MockSource::default()
    };

    let quoter = IdentifierQuoter::from_metadata(&source).await.unwrap();
    assert_eq!(quoter.extra_name_characters(), "");
}

#[tokio::test]
async fn storage_rule_probes_are_checked_in_priority_order() {
    let cases = [
        ((true, true, true), IdentifierStorageRule::Upper),
        ((false, true, true), IdentifierStorageRule::Lower),
        ((false, false, true), IdentifierStorageRule::Mixed),
        // some drivers answer false to all three probes
        ((false, false, false), IdentifierStorageRule::Upper),
    ];

    for ((upper, lower, mixed), expected) in cases {
        let source = MockSource {
            stores_upper: upper,
            stores_lower: lower,
            stores_mixed: mixed,
            ..MockSource::default()
        };

        let quoter = IdentifierQuoter::from_metadata(&source).await.unwrap();
        assert_eq!(
            quoter.unquoted_storage_rule(),
            expected,
            "wrong rule for probes ({}, {}, {})",
            upper,
            lower,
            mixed
        );
    }
}

#[tokio::test]
async fn probe_failures_propagate() {
    let source = MockSource {
        fail_keywords: true,
        ..MockSource::default()
    };

    let error = IdentifierQuoter::from_metadata(&source).await.unwrap_err();
    assert!(matches!(error, SqlQuoteError::Metadata { .. }));
}
