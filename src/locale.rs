//! Locale Representation and Negotiation
//!
//! Provides the [`Locale`] value type (BCP 47-ish tags), fallback-chain
//! derivation, and Accept-Language parsing/negotiation.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A locale: language plus optional script and region.
///
/// # Examples
///
/// ```
/// use phrasebook::Locale;
/// use std::str::FromStr;
///
/// let ar = Locale::ar();
/// let ar_sa = Locale::from_str("ar-SA").unwrap();
/// assert_eq!(ar_sa.tag(), "ar-SA");
/// assert_eq!(ar_sa.language, "ar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    /// Language code (ISO 639-1/2, e.g. "ar", "en")
    pub language: String,
    /// Optional script (e.g. "Latn", "Arab")
    pub script: Option<String>,
    /// Optional region code (ISO 3166-1, e.g. "SA", "US")
    pub region: Option<String>,
}

impl Locale {
    /// Create a locale from a language and optional region.
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            script: None,
            region: region.map(|r| r.into().to_uppercase()),
        }
    }

    /// Parse a BCP 47-ish tag. Accepts `-` or `_` separators and is
    /// case-insensitive (`ar_sa`, `AR-SA`, and `ar-SA` are the same locale).
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.split(['-', '_']);

        let language = match parts.next() {
            Some(lang)
                if (2..=3).contains(&lang.len())
                    && lang.chars().all(|c| c.is_ascii_alphabetic()) =>
            {
                lang.to_lowercase()
            }
            _ => return Err(I18nError::InvalidLocale(tag.to_string())),
        };

        let mut script = None;
        let mut region = None;
        for part in parts {
            match part.len() {
                // Script subtag, title-cased (e.g. "Arab", "Hans")
                4 if part.chars().all(|c| c.is_ascii_alphabetic()) => {
                    let mut chars = part.chars();
                    let first = chars.next().map(|c| c.to_ascii_uppercase());
                    script = first.map(|f| {
                        std::iter::once(f)
                            .chain(chars.map(|c| c.to_ascii_lowercase()))
                            .collect()
                    });
                }
                // Region subtag (e.g. "SA", "US")
                2 if part.chars().all(|c| c.is_ascii_alphabetic()) => {
                    region = Some(part.to_uppercase());
                }
                // UN M.49 numeric region
                3 if part.chars().all(|c| c.is_ascii_digit()) => {
                    region = Some(part.to_string());
                }
                _ => {}
            }
        }

        Ok(Self {
            language,
            script,
            region,
        })
    }

    /// The canonical tag (e.g. `"ar-SA"`, `"zh-Hans-CN"`).
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        if let Some(ref script) = self.script {
            tag.push('-');
            tag.push_str(script);
        }
        if let Some(ref region) = self.region {
            tag.push('-');
            tag.push_str(region);
        }
        tag
    }

    /// Language-only variant (strips script and region).
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            script: None,
            region: None,
        }
    }

    /// Progressive truncation chain, most specific first.
    ///
    /// `"zh-Hans-CN"` yields `["zh-Hans-CN", "zh-Hans", "zh"]`; a bare
    /// language yields just itself. Used when a translation table has no
    /// entry for the exact tag.
    pub fn fallback_chain(&self) -> Vec<Locale> {
        let mut chain = vec![self.clone()];
        if self.region.is_some() {
            chain.push(Self {
                language: self.language.clone(),
                script: self.script.clone(),
                region: None,
            });
        }
        if self.script.is_some() {
            chain.push(self.language_only());
        }
        chain
    }

    /// Score how well this locale serves a request (0 = unusable).
    ///
    /// Exact match beats region match beats script match beats bare
    /// language match.
    pub fn match_score(&self, requested: &Locale) -> u32 {
        if self.language != requested.language {
            return 0;
        }
        if self == requested {
            return 100;
        }
        let mut score = 10;
        if self.region.is_some() && self.region == requested.region {
            score += 40;
        }
        if self.script.is_some() && self.script == requested.script {
            score += 15;
        }
        score
    }

    // Common locales used throughout the crate and its tests.

    /// English (no region)
    pub fn en() -> Self {
        Self::new("en", None::<&str>)
    }

    /// English (US)
    pub fn en_us() -> Self {
        Self::new("en", Some("US"))
    }

    /// Arabic (no region)
    pub fn ar() -> Self {
        Self::new("ar", None::<&str>)
    }

    /// Arabic (Saudi Arabia)
    pub fn ar_sa() -> Self {
        Self::new("ar", Some("SA"))
    }

    /// French (no region)
    pub fn fr() -> Self {
        Self::new("fr", None::<&str>)
    }

    /// German (no region)
    pub fn de() -> Self {
        Self::new("de", None::<&str>)
    }

    /// Russian (no region)
    pub fn ru() -> Self {
        Self::new("ru", None::<&str>)
    }

    /// Japanese (no region)
    pub fn ja() -> Self {
        Self::new("ja", None::<&str>)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en()
    }
}

// ============================================================================
// Accept-Language Parsing
// ============================================================================

#[derive(Debug, Clone)]
struct WeightedLocale {
    locale: Locale,
    quality: f32,
}

impl PartialEq for WeightedLocale {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale && (self.quality - other.quality).abs() < f32::EPSILON
    }
}

impl Eq for WeightedLocale {}

impl PartialOrd for WeightedLocale {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightedLocale {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher quality first
        other
            .quality
            .partial_cmp(&self.quality)
            .unwrap_or(Ordering::Equal)
    }
}

/// Parse an `Accept-Language` header into locales sorted by quality
/// (highest first). Wildcards and malformed entries are dropped.
///
/// # Example
///
/// ```
/// use phrasebook::parse_accept_language;
///
/// let locales = parse_accept_language("ar-SA,ar;q=0.9,en;q=0.8,*;q=0.1");
/// assert_eq!(locales[0].tag(), "ar-SA");
/// assert_eq!(locales[1].tag(), "ar");
/// assert_eq!(locales[2].tag(), "en");
/// ```
pub fn parse_accept_language(header: &str) -> Vec<Locale> {
    let mut entries: Vec<WeightedLocale> = header
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }

            let mut split = part.splitn(2, ';');
            let tag = split.next()?.trim();
            if tag == "*" {
                return None;
            }

            let quality = split
                .next()
                .and_then(|q| q.trim().strip_prefix("q="))
                .and_then(|q| q.parse().ok())
                .unwrap_or(1.0);

            let locale = Locale::parse(tag).ok()?;
            Some(WeightedLocale { locale, quality })
        })
        .collect();

    entries.sort();
    entries.into_iter().map(|e| e.locale).collect()
}

/// Pick the best available locale for a requested preference list.
///
/// Tries exact matches first, then scored language matches, and returns
/// `default` when nothing fits.
pub fn negotiate_locale<'a>(
    requested: &[Locale],
    available: &'a [Locale],
    default: &'a Locale,
) -> &'a Locale {
    for req in requested {
        if let Some(exact) = available.iter().find(|a| *a == req) {
            return exact;
        }
        let best = available
            .iter()
            .map(|a| (a, a.match_score(req)))
            .filter(|&(_, score)| score > 0)
            .max_by_key(|&(_, score)| score);
        if let Some((locale, _)) = best {
            return locale;
        }
    }
    default
}
