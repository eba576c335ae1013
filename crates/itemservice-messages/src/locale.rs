//! Language/region identifiers used to pick catalog variants.

use std::fmt;
use std::str::FromStr;

use itemservice_core::error::ItemServiceError;

/// A language with an optional region, e.g. `ko` or `ko_KR`.
///
/// Language is stored lower-case and region upper-case, so `EN-us`, `en_US`
/// and `en-US` are the same locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Build a locale from already-valid parts.
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        }
    }

    /// Parse a tag separated by `-` or `_`. Returns `None` for empty input,
    /// script/variant subtags, or malformed parts.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let mut parts = value.split(['-', '_']);
        let language = parts.next()?;
        let region = parts.next();
        if parts.next().is_some() {
            return None;
        }
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return None;
        }
        if let Some(region) = region {
            let alpha = region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic());
            let numeric = region.len() == 3 && region.chars().all(|c| c.is_ascii_digit());
            if !alpha && !numeric {
                return None;
            }
        }
        Some(Self::new(language, region))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// BCP 47 style tag (`ko-KR`).
    pub fn tag(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{region}", self.language),
            None => self.language.clone(),
        }
    }

    /// Resource file suffix (`ko_KR`), as in `messages_ko_KR.properties`.
    pub fn suffix(&self) -> String {
        match &self.region {
            Some(region) => format!("{}_{region}", self.language),
            None => self.language.clone(),
        }
    }

    /// Language-only locale for a regional one.
    pub fn parent(&self) -> Option<Locale> {
        self.region.as_ref().map(|_| Locale {
            language: self.language.clone(),
            region: None,
        })
    }

    /// This locale followed by its parent, most specific first.
    pub fn candidates(&self) -> Vec<Locale> {
        let mut out = vec![self.clone()];
        out.extend(self.parent());
        out
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.suffix())
    }
}

impl FromStr for Locale {
    type Err = ItemServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ItemServiceError::Config(format!("invalid locale '{s}'")))
    }
}
