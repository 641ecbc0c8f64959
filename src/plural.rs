//! Pluralization Rules
//!
//! CLDR plural categories and per-language selection rules. English gets by
//! with two forms (one/other); Russian needs four and Arabic uses all six.

use crate::{I18nError, Locale, Result};
use std::collections::HashMap;

/// CLDR plural categories. Not every language uses every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    /// Zero items (Arabic)
    Zero,
    /// One item (most languages)
    One,
    /// Two items (Arabic, Welsh)
    Two,
    /// Small quantities (Slavic; Arabic 3-10)
    Few,
    /// Large quantities (Slavic; Arabic 11-99)
    Many,
    /// Everything else
    Other,
}

impl PluralCategory {
    /// Parse a category name as it appears in translation tables.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "zero" => Ok(Self::Zero),
            "one" => Ok(Self::One),
            "two" => Ok(Self::Two),
            "few" => Ok(Self::Few),
            "many" => Ok(Self::Many),
            "other" => Ok(Self::Other),
            _ => Err(I18nError::InvalidPluralCategory(s.to_string())),
        }
    }

    /// The category name as used in translation tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Plural selection rule for a language family.
///
/// Rules are looked up on every pluralized translation, so this is a plain
/// `Copy` enum rather than a trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluralRule {
    /// English-like: 1 = one, everything else = other.
    #[default]
    English,
    /// No plural distinction (Chinese, Japanese, Korean, ...).
    None,
    /// 0 and 1 = one (French, Portuguese-BR).
    French,
    /// Russian/Ukrainian/Belarusian one/few/many by mod-10/mod-100.
    EastSlavic,
    /// Polish: like East Slavic but 1 is the only "one".
    Polish,
    /// Czech/Slovak: 1 = one, 2-4 = few, fractions = many.
    Czech,
    /// Welsh: distinct forms for 0, 1, 2, 3 and 6.
    Welsh,
    /// Arabic: all six categories.
    Arabic,
}

impl PluralRule {
    /// The rule for a locale's language.
    pub fn for_locale(locale: &Locale) -> Self {
        Self::for_language(&locale.language)
    }

    /// The rule for a bare language code.
    pub fn for_language(language: &str) -> Self {
        match language {
            "ja" | "ko" | "zh" | "vi" | "th" | "id" | "ms" => Self::None,
            "fr" => Self::French,
            "ru" | "uk" | "be" => Self::EastSlavic,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::Czech,
            "cy" => Self::Welsh,
            "ar" => Self::Arabic,
            _ => Self::English,
        }
    }

    /// Select the category for a count.
    pub fn categorize(&self, n: f64) -> PluralCategory {
        use PluralCategory::*;

        let fractional = n.fract() != 0.0;
        let i = n.abs() as i64;
        let mod10 = i % 10;
        let mod100 = i % 100;

        match self {
            Self::None => Other,
            Self::English => {
                if i == 1 && !fractional {
                    One
                } else {
                    Other
                }
            }
            Self::French => {
                if (i == 0 || i == 1) && !fractional {
                    One
                } else {
                    Other
                }
            }
            Self::EastSlavic => {
                if fractional {
                    Other
                } else if mod10 == 1 && mod100 != 11 {
                    One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    Few
                } else {
                    Many
                }
            }
            Self::Polish => {
                if fractional {
                    Other
                } else if i == 1 {
                    One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    Few
                } else {
                    Many
                }
            }
            Self::Czech => {
                if fractional {
                    Many
                } else {
                    match i {
                        1 => One,
                        2..=4 => Few,
                        _ => Other,
                    }
                }
            }
            Self::Welsh => {
                if fractional {
                    Other
                } else {
                    match i {
                        0 => Zero,
                        1 => One,
                        2 => Two,
                        3 => Few,
                        6 => Many,
                        _ => Other,
                    }
                }
            }
            Self::Arabic => {
                if fractional {
                    Other
                } else {
                    match i {
                        0 => Zero,
                        1 => One,
                        2 => Two,
                        _ if (3..=10).contains(&mod100) => Few,
                        _ if (11..=99).contains(&mod100) => Many,
                        _ => Other,
                    }
                }
            }
        }
    }

    /// The categories this rule can produce.
    pub fn categories(&self) -> &'static [PluralCategory] {
        use PluralCategory::*;
        match self {
            Self::None => &[Other],
            Self::English | Self::French => &[One, Other],
            Self::EastSlavic | Self::Polish => &[One, Few, Many, Other],
            Self::Czech => &[One, Few, Many, Other],
            Self::Welsh | Self::Arabic => &[Zero, One, Two, Few, Many, Other],
        }
    }
}

/// Category-to-template map for one pluralized message.
///
/// Selection falls back to [`PluralCategory::Other`] when the computed
/// category has no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluralForms {
    forms: HashMap<PluralCategory, String>,
}

impl PluralForms {
    /// Create an empty set of forms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template for a category.
    pub fn set(&mut self, category: PluralCategory, template: impl Into<String>) {
        self.forms.insert(category, template.into());
    }

    /// The template for a category, falling back to `other`.
    pub fn select(&self, category: PluralCategory) -> Option<&str> {
        self.forms
            .get(&category)
            .or_else(|| self.forms.get(&PluralCategory::Other))
            .map(String::as_str)
    }

    /// The template for exactly this category, no fallback.
    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        self.forms.get(&category).map(String::as_str)
    }

    /// Whether no forms are present.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Iterate over (category, template) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PluralCategory, &str)> {
        self.forms.iter().map(|(c, t)| (*c, t.as_str()))
    }
}

impl FromIterator<(PluralCategory, String)> for PluralForms {
    fn from_iter<T: IntoIterator<Item = (PluralCategory, String)>>(iter: T) -> Self {
        Self {
            forms: iter.into_iter().collect(),
        }
    }
}
