//! Translation Lookup Runtime
//!
//! Resolves dotted keys against nested translation tables with locale
//! fallback chains, CLDR pluralization, and placeholder interpolation:
//!
//! - **Dotted-key lookup**: `"user.messages.title"` walks a nested tree
//!   loaded from JSON; missing keys render a bracketed diagnostic instead
//!   of failing.
//! - **Locale fallback**: requested locale → caller default → configured
//!   fallbacks → default locale → `"en"`.
//! - **Pluralization**: plural sub-maps (`zero`/`one`/`two`/`few`/`many`/
//!   `other`) selected per-language, including the full six-category
//!   Arabic rule.
//! - **Interpolation**: `%{name}` and `{{name}}` placeholders with stable
//!   missing-value markers.
//! - **Locale glue**: number/percent/currency formatting, calendar names,
//!   relative-time phrasing, and (with the `timezones` feature) IANA zone
//!   resolution via `chrono-tz`.
//!
//! # Quick Start
//!
//! ```
//! use phrasebook::{Catalog, I18n, Locale};
//!
//! let mut catalog = Catalog::builtin();
//! catalog
//!     .add_locale_json(
//!         "ar",
//!         r#"{"user": {"inbox": {
//!             "zero": "لا رسائل",
//!             "one": "رسالة واحدة",
//!             "two": "رسالتان",
//!             "few": "%{count} رسائل",
//!             "many": "%{count} رسالة",
//!             "other": "%{count} رسالة"
//!         }}}"#,
//!     )
//!     .unwrap();
//!
//! let i18n = I18n::with_catalog(catalog).with_locale(Locale::ar());
//!
//! assert_eq!(i18n.t_count("user.inbox", 0), "لا رسائل");
//! assert_eq!(i18n.t_count("user.inbox", 7), "7 رسائل");
//!
//! // Missing keys never fail; they render a diagnostic.
//! assert_eq!(i18n.t("user.signature"), "[ar.user.signature]");
//! ```
//!
//! # Loading translations
//!
//! ```rust,ignore
//! let i18n = I18n::new()
//!     .with_locale(Locale::ar_sa())
//!     .with_default_locale(Locale::en())
//!     .load_from_dir("locales/")?;
//! ```

mod datetime;
mod error;
mod format;
mod interpolate;
mod locale;
mod plural;
#[cfg(feature = "timezones")]
mod timezone;
mod translate;
mod tree;

pub use datetime::{
    CalendarNames, DateStyle, TimeStyle, format_date, format_datetime, format_time,
};
pub use error::I18nError;
pub use format::{NumberFormatter, format_currency, format_number, format_percent};
pub use interpolate::interpolate;
pub use locale::{Locale, negotiate_locale, parse_accept_language};
pub use plural::{PluralCategory, PluralForms, PluralRule};
#[cfg(feature = "timezones")]
pub use timezone::{format_in_zone, to_zone, utc_offset_seconds, zone};
pub use translate::{ArgValue, I18n, TranslateOptions};
pub use tree::{Catalog, CoverageReport, LocaleCoverage, Node, TranslationTree};

/// Result type for load-time operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Catalog, I18n, I18nError, Locale, PluralCategory, PluralRule, Result, TranslateOptions,
        format_currency, format_date, format_number, format_percent, format_time,
        negotiate_locale, parse_accept_language,
    };
}
