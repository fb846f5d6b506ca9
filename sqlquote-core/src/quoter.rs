//! SQL identifier quoting against a database's declared conventions.
//!
//! An [`IdentifierQuoter`] decides whether a table or column name needs
//! quoting before being embedded in generated SQL text, and escapes it
//! when it does. The decision is driven by the quote string, reserved
//! keywords and extra identifier characters a database reports about
//! itself, so a quoter is built once per connection (via
//! [`IdentifierQuoter::from_metadata`]) or assembled by hand (via
//! [`IdentifierQuoter::builder`]) and then reused for every identifier
//! sent over that connection.

use std::collections::HashSet;

use crate::error::Result;
use crate::keywords::KeywordCatalog;
use crate::metadata::{unexpected_null_to_empty, MetadataSource};

/// Quote string mandated by the SQL standard.
const DEFAULT_QUOTE_STRING: &str = "\"";

/// Sentinel some drivers report when identifier quoting is unsupported.
const QUOTING_NOT_SUPPORTED: &str = " ";

/// How a database folds the case of unquoted identifiers when persisting
/// schema metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierStorageRule {
    /// Unquoted identifiers are stored upper-cased
    Upper,
    /// Unquoted identifiers are stored lower-cased
    Lower,
    /// Unquoted identifiers are stored as typed
    Mixed,
}

impl IdentifierStorageRule {
    /// Checks whether an identifier survives unquoted storage without the
    /// engine altering its case.
    pub fn is_valid(self, identifier: &str) -> bool {
        match self {
            Self::Upper => identifier.to_uppercase() == identifier,
            Self::Lower => identifier.to_lowercase() == identifier,
            Self::Mixed => true,
        }
    }
}

/// Quotes identifiers for embedding in SQL text.
///
/// Immutable once built; safe to share across threads without
/// synchronization.
///
/// # Example
/// ```rust
/// use sqlquote_core::IdentifierQuoter;
///
/// let quoter = IdentifierQuoter::builder().keyword("select").build();
///
/// assert_eq!(quoter.quote("customer"), "customer");
/// assert_eq!(quoter.quote("select"), "\"select\"");
/// assert_eq!(quoter.quote("order date"), "\"order date\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierQuoter {
    quote_string: String,
    keywords: HashSet<String>,
    unquoted_storage_rule: IdentifierStorageRule,
    extra_name_characters: String,
}

impl Default for IdentifierQuoter {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl IdentifierQuoter {
    /// Starts a builder with the standard defaults: quote string `"`,
    /// empty keyword set, empty extra characters, upper-case storage
    /// rule.
    pub fn builder() -> IdentifierQuoterBuilder {
        IdentifierQuoterBuilder::new()
    }

    /// Derives a quoter from a live connection's metadata.
    ///
    /// This performs blocking metadata queries and is meant to run once
    /// per connection, not once per identifier.
    ///
    /// # Errors
    /// Propagates any probe failure as a metadata error; no partial
    /// configuration is ever returned.
    pub async fn from_metadata(source: &dyn MetadataSource) -> Result<Self> {
        Ok(Self {
            quote_string: load_quote_string(source).await?,
            keywords: load_keywords(source).await?,
            unquoted_storage_rule: load_storage_rule(source).await?,
            extra_name_characters: load_extra_name_characters(source).await?,
        })
    }

    /// The string used to bracket quoted identifiers.
    pub fn quote_string(&self) -> &str {
        &self.quote_string
    }

    /// Reserved words that force quoting, upper-cased.
    pub fn keywords(&self) -> &HashSet<String> {
        &self.keywords
    }

    /// The storage-case rule the connection declared for unquoted
    /// identifiers.
    pub fn unquoted_storage_rule(&self) -> IdentifierStorageRule {
        self.unquoted_storage_rule
    }

    /// Characters that force quoting when present in an identifier.
    pub fn extra_name_characters(&self) -> &str {
        &self.extra_name_characters
    }

    /// Quotes an identifier when needed.
    ///
    /// An identifier that is already properly quoted comes back
    /// unchanged, so the operation is idempotent.
    pub fn quote(&self, identifier: &str) -> String {
        self.quote_inner(identifier, false)
    }

    /// Quotes an identifier unconditionally (unless it is already
    /// properly quoted).
    pub fn force_quote(&self, identifier: &str) -> String {
        self.quote_inner(identifier, true)
    }

    fn quote_inner(&self, identifier: &str, force: bool) -> String {
        if self.is_properly_quoted(identifier) {
            return identifier.to_owned();
        }

        if force
            || self.is_keyword(identifier)
            || self.contains_extra_characters(identifier)
            || self.contains_quote_strings(identifier)
            || contains_spaces(identifier)
            || self.breaks_storage_rule(identifier)
        {
            return self.wrap(identifier);
        }

        identifier.to_owned()
    }

    /// Recognizes identifiers that are already bracketed by the quote
    /// string with every interior occurrence properly doubled.
    ///
    /// The interior scan walks occurrences of the quote string keeping a
    /// parity flag: an odd occurrence must be immediately followed by its
    /// partner, otherwise the identifier holds a stray delimiter and must
    /// be re-escaped from scratch.
    fn is_properly_quoted(&self, identifier: &str) -> bool {
        let quote = self.quote_string.as_str();
        let quote_len = quote.len();
        if !(identifier.starts_with(quote)
            && identifier.ends_with(quote)
            && identifier.len() >= quote_len * 2)
        {
            return false;
        }

        let end = identifier.len() - quote_len;
        let mut begin = quote_len;
        let mut even = true;
        while begin < end {
            let next = match identifier[begin..].find(quote) {
                Some(offset) => begin + offset,
                None => return even,
            };
            if next == end {
                return even;
            }
            if even {
                even = false;
            } else if next == begin {
                even = true;
            } else {
                // a lone delimiter with a gap before its partner
                return false;
            }
            begin = next + quote_len;
        }
        even
    }

    fn is_keyword(&self, identifier: &str) -> bool {
        self.keywords.contains(&normalize_keyword(identifier))
    }

    fn breaks_storage_rule(&self, _identifier: &str) -> bool {
        // Intentionally inert: the declared rule is retained for
        // diagnostics but does not force quoting. Letting it participate
        // would quote every identifier whose case differs from the
        // engine's folding, which is not what existing callers expect.
        false
    }

    fn contains_extra_characters(&self, identifier: &str) -> bool {
        identifier
            .chars()
            .any(|c| self.extra_name_characters.contains(c))
    }

    fn contains_quote_strings(&self, identifier: &str) -> bool {
        identifier.contains(self.quote_string.as_str())
    }

    fn wrap(&self, identifier: &str) -> String {
        let quote = self.quote_string.as_str();
        let doubled = format!("{quote}{quote}");
        format!("{quote}{}{quote}", identifier.replace(quote, &doubled))
    }
}

/// Builder for [`IdentifierQuoter`].
#[derive(Debug, Clone)]
pub struct IdentifierQuoterBuilder {
    quote_string: String,
    keywords: HashSet<String>,
    unquoted_storage_rule: IdentifierStorageRule,
    extra_name_characters: String,
}

impl IdentifierQuoterBuilder {
    fn new() -> Self {
        Self {
            quote_string: DEFAULT_QUOTE_STRING.to_owned(),
            keywords: HashSet::new(),
            unquoted_storage_rule: IdentifierStorageRule::Upper,
            extra_name_characters: String::new(),
        }
    }

    /// Sets the quote string. An empty value falls back to the standard
    /// `"` at build time.
    pub fn quote_string(mut self, quote_string: impl Into<String>) -> Self {
        self.quote_string = quote_string.into();
        self
    }

    /// Adds one keyword, upper-casing it for case-insensitive matching.
    pub fn keyword(mut self, keyword: impl AsRef<str>) -> Self {
        self.keywords.insert(normalize_keyword(keyword.as_ref()));
        self
    }

    /// Adds every keyword from an iterator.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            self.keywords.insert(normalize_keyword(keyword.as_ref()));
        }
        self
    }

    /// Empties the keyword set.
    pub fn clear_keywords(mut self) -> Self {
        self.keywords.clear();
        self
    }

    /// Sets the characters that force quoting when present in an
    /// identifier.
    pub fn extra_name_characters(mut self, extra_name_characters: impl Into<String>) -> Self {
        self.extra_name_characters = extra_name_characters.into();
        self
    }

    /// Sets the declared storage-case rule.
    pub fn unquoted_storage_rule(mut self, rule: IdentifierStorageRule) -> Self {
        self.unquoted_storage_rule = rule;
        self
    }

    /// Builds the immutable quoter.
    pub fn build(self) -> IdentifierQuoter {
        let quote_string = if self.quote_string.is_empty() {
            DEFAULT_QUOTE_STRING.to_owned()
        } else {
            self.quote_string
        };
        IdentifierQuoter {
            quote_string,
            keywords: self.keywords,
            unquoted_storage_rule: self.unquoted_storage_rule,
            extra_name_characters: self.extra_name_characters,
        }
    }
}

/// Splits a comma-separated keyword list into an upper-cased set.
///
/// Tokens are trimmed and empty tokens dropped, so ragged driver output
/// like `" hello , world , "` parses cleanly.
///
/// # Example
/// ```rust
/// use sqlquote_core::parse_keyword_list;
///
/// let keywords = parse_keyword_list(" hello , world ");
/// assert!(keywords.contains("HELLO"));
/// assert!(keywords.contains("WORLD"));
/// assert_eq!(keywords.len(), 2);
/// ```
pub fn parse_keyword_list(input: &str) -> HashSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(normalize_keyword)
        .collect()
}

/// Upper-cases a keyword with Rust's locale-independent Unicode mapping,
/// immune to locale-sensitive surprises such as the Turkish dotless i.
fn normalize_keyword(input: &str) -> String {
    input.to_uppercase()
}

fn contains_spaces(identifier: &str) -> bool {
    identifier.contains(' ')
}

async fn load_quote_string(source: &dyn MetadataSource) -> Result<String> {
    let reported = unexpected_null_to_empty(
        source.identifier_quote_string().await?,
        "identifier_quote_string",
    );

    if reported == QUOTING_NOT_SUPPORTED || reported.trim().is_empty() {
        return Ok(DEFAULT_QUOTE_STRING.to_owned());
    }

    Ok(reported)
}

async fn load_keywords(source: &dyn MetadataSource) -> Result<HashSet<String>> {
    let reported = unexpected_null_to_empty(source.sql_keywords().await?, "sql_keywords");

    let mut keywords = parse_keyword_list(&reported);
    keywords.extend(
        KeywordCatalog::LATEST_RESERVED
            .keywords()
            .iter()
            .map(|keyword| (*keyword).to_owned()),
    );
    Ok(keywords)
}

async fn load_extra_name_characters(source: &dyn MetadataSource) -> Result<String> {
    Ok(unexpected_null_to_empty(
        source.extra_name_characters().await?,
        "extra_name_characters",
    ))
}

async fn load_storage_rule(source: &dyn MetadataSource) -> Result<IdentifierStorageRule> {
    if source.stores_upper_case_identifiers().await? {
        return Ok(IdentifierStorageRule::Upper);
    }
    if source.stores_lower_case_identifiers().await? {
        return Ok(IdentifierStorageRule::Lower);
    }
    if source.stores_mixed_case_identifiers().await? {
        return Ok(IdentifierStorageRule::Mixed);
    }
    // Some drivers answer false to all three probes; assume the standard
    // upper-case folding.
    Ok(IdentifierStorageRule::Upper)
}
