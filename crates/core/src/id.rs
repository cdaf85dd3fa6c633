//! Strongly-typed identifiers used across the domain.
//!
//! Inventory snapshots identify everything by text keys. Each key gets its own
//! newtype so an `OmId` can never be passed where a `SiteId` is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Fixed width of a canonical article code.
pub const ARTICLE_LEN: usize = 12;

/// Pad character used when an article code is shorter than [`ARTICLE_LEN`].
pub const ARTICLE_PAD: char = '0';

/// Product identifier, always exactly [`ARTICLE_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Article(String);

impl Article {
    /// Canonicalize arbitrary text into a 12-character article code.
    ///
    /// Surrounding whitespace is trimmed first. Short codes are left-padded with
    /// `'0'`; long codes keep their trailing 12 characters. Returns the article and
    /// whether the length had to be corrected. Never fails.
    pub fn canonicalize(raw: &str) -> (Self, bool) {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();

        if len == ARTICLE_LEN {
            return (Self(trimmed.to_string()), false);
        }

        let code = if len < ARTICLE_LEN {
            let mut padded: String =
                core::iter::repeat_n(ARTICLE_PAD, ARTICLE_LEN - len).collect();
            padded.push_str(trimmed);
            padded
        } else {
            trimmed.chars().skip(len - ARTICLE_LEN).collect()
        };

        (Self(code), true)
    }

    /// Shorthand for [`Article::canonicalize`] when the correction flag is not needed.
    pub fn canonical(raw: &str) -> Self {
        Self::canonicalize(raw).0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Article {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Article {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.chars().count() != ARTICLE_LEN {
            return Err(DomainError::validation(format!(
                "Article: expected {ARTICLE_LEN} characters, got '{value}'"
            )));
        }
        Ok(Self(value))
    }
}

impl From<Article> for String {
    fn from(value: Article) -> Self {
        value.0
    }
}

macro_rules! impl_text_key {
    ($t:ident, $name:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $t(String);

        impl $t {
            /// Create a key from text; surrounding whitespace is trimmed and an
            /// empty result is rejected.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
                let trimmed = raw.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!($name, " cannot be empty")));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_text_key!(SiteId, "Site");
impl_text_key!(OmId, "OM");

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_article_is_left_padded() {
        let (article, corrected) = Article::canonicalize("123");
        assert_eq!(article.as_str(), "000000000123");
        assert!(corrected);
    }

    #[test]
    fn exact_article_is_kept_after_trim() {
        let (article, corrected) = Article::canonicalize("  000000000123 ");
        assert_eq!(article.as_str(), "000000000123");
        assert!(!corrected);
    }

    #[test]
    fn long_article_keeps_trailing_characters() {
        let (article, corrected) = Article::canonicalize("99000000000123");
        assert_eq!(article.as_str(), "000000000123");
        assert!(corrected);
    }

    #[test]
    fn empty_article_becomes_all_padding() {
        assert_eq!(Article::canonical("").as_str(), "000000000000");
    }

    #[test]
    fn article_deserialization_rejects_wrong_width() {
        let err = serde_json::from_str::<Article>("\"123\"").unwrap_err();
        assert!(err.to_string().contains("expected 12 characters"));

        let ok: Article = serde_json::from_str("\"000000000123\"").unwrap();
        assert_eq!(ok, Article::canonical("123"));
    }

    #[test]
    fn site_and_om_reject_blank_text() {
        assert!(SiteId::new("   ").is_err());
        assert!(OmId::from_str("").is_err());
        assert_eq!(SiteId::new(" S001 ").unwrap().as_str(), "S001");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: canonicalization always yields exactly 12 characters and is idempotent.
        #[test]
        fn canonical_article_has_fixed_width(raw in "[A-Za-z0-9-]{0,40}") {
            let article = Article::canonical(&raw);
            prop_assert_eq!(article.as_str().chars().count(), ARTICLE_LEN);

            let (again, corrected) = Article::canonicalize(article.as_str());
            prop_assert_eq!(&again, &article);
            prop_assert!(!corrected);
        }
    }
}
