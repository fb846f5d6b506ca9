//! Reserved-word catalogs for the SQL standard revisions this crate
//! tracks.
//!
//! The word lists follow the standard-SQL reserved words summary
//! published by Mimer
//! (<https://developer.mimer.com/wp-content/uploads/standard-sql-reserved-words-summary.pdf>).
//! They are embedded at compile time and parsed once per process into
//! immutable sets.

use std::collections::HashSet;
use std::sync::OnceLock;

/// A bundled keyword list for one SQL standard revision.
///
/// [`KeywordCatalog::LATEST_RESERVED`] names the most recent reserved-word
/// revision and is the set unioned with driver-reported keywords during
/// introspective construction of an
/// [`IdentifierQuoter`](crate::IdentifierQuoter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCatalog {
    /// SQL-92 reserved words
    Sql92Reserved,
    /// SQL-92 non-reserved words
    Sql92NonReserved,
    /// SQL:1999 reserved words
    Sql99Reserved,
    /// SQL:2003 reserved words
    Sql2003Reserved,
    /// SQL:2008 reserved words
    Sql2008Reserved,
    /// SQL:2011 reserved words
    Sql2011Reserved,
    /// SQL:2016 reserved words
    Sql2016Reserved,
}

impl KeywordCatalog {
    /// The most recent reserved-word revision this crate tracks.
    pub const LATEST_RESERVED: Self = Self::Sql2016Reserved;

    /// The keyword set for this revision.
    ///
    /// Parsed lazily from the embedded resource on first access and
    /// shared read-only for the rest of the process lifetime.
    pub fn keywords(self) -> &'static HashSet<&'static str> {
        static SQL92_RESERVED: OnceLock<HashSet<&'static str>> = OnceLock::new();
        static SQL92_NON_RESERVED: OnceLock<HashSet<&'static str>> = OnceLock::new();
        static SQL99_RESERVED: OnceLock<HashSet<&'static str>> = OnceLock::new();
        static SQL2003_RESERVED: OnceLock<HashSet<&'static str>> = OnceLock::new();
        static SQL2008_RESERVED: OnceLock<HashSet<&'static str>> = OnceLock::new();
        static SQL2011_RESERVED: OnceLock<HashSet<&'static str>> = OnceLock::new();
        static SQL2016_RESERVED: OnceLock<HashSet<&'static str>> = OnceLock::new();

        match self {
            Self::Sql92Reserved => SQL92_RESERVED
                .get_or_init(|| parse_word_list(include_str!("keywords/sql92_reserved.txt"))),
            Self::Sql92NonReserved => SQL92_NON_RESERVED
                .get_or_init(|| parse_word_list(include_str!("keywords/sql92_nonreserved.txt"))),
            Self::Sql99Reserved => SQL99_RESERVED
                .get_or_init(|| parse_word_list(include_str!("keywords/sql99_reserved.txt"))),
            Self::Sql2003Reserved => SQL2003_RESERVED
                .get_or_init(|| parse_word_list(include_str!("keywords/sql2003_reserved.txt"))),
            Self::Sql2008Reserved => SQL2008_RESERVED
                .get_or_init(|| parse_word_list(include_str!("keywords/sql2008_reserved.txt"))),
            Self::Sql2011Reserved => SQL2011_RESERVED
                .get_or_init(|| parse_word_list(include_str!("keywords/sql2011_reserved.txt"))),
            Self::Sql2016Reserved => SQL2016_RESERVED
                .get_or_init(|| parse_word_list(include_str!("keywords/sql2016_reserved.txt"))),
        }
    }
}

fn parse_word_list(raw: &'static str) -> HashSet<&'static str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
