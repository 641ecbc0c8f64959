//! Translation Front-End
//!
//! [`I18n`] owns the loaded [`Catalog`] behind an `Arc<RwLock<_>>` and
//! resolves dotted keys through the full fallback chain:
//!
//! requested locale (tree, then extras) → caller `default_value` →
//! configured fallback locales → default locale → `"en"`.
//!
//! Lookup never fails: an unresolvable key renders a bracketed
//! `[locale.key]` diagnostic and logs a warning. This is a display-layer
//! policy: a missing string must never take the UI down with it.

use crate::format::format_number;
use crate::interpolate::interpolate;
use crate::locale::Locale;
use crate::plural::{PluralCategory, PluralRule};
use crate::tree::{Catalog, CoverageReport, Node, TranslationTree};
use crate::Result;
use log::warn;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// An interpolation argument: text or a number.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Inserted verbatim.
    Text(String),
    /// Inserted via `Display` (counts additionally get locale formatting;
    /// see [`TranslateOptions::count`]).
    Number(f64),
}

impl std::fmt::Display for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgValue::Text(s) => write!(f, "{s}"),
            ArgValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Text(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Text(s)
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        ArgValue::Number(n)
    }
}

impl From<i32> for ArgValue {
    fn from(n: i32) -> Self {
        ArgValue::Number(n as f64)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Number(n as f64)
    }
}

impl From<usize> for ArgValue {
    fn from(n: usize) -> Self {
        ArgValue::Number(n as f64)
    }
}

/// Options bag for a single translation call.
///
/// Mirrors the recognized configuration keys of the lookup contract:
/// `locale`, `scope`, `default_value`, `count`, plus free-form
/// interpolation values.
///
/// # Example
///
/// ```
/// use phrasebook::{I18n, TranslateOptions};
///
/// let i18n = I18n::new();
/// let opts = TranslateOptions::new()
///     .scope("user")
///     .default_value("Hello %{name}")
///     .arg("name", "Huda");
/// assert_eq!(i18n.translate("greeting", opts), "Hello Huda");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    locale: Option<Locale>,
    scope: Option<String>,
    default_value: Option<String>,
    count: Option<f64>,
    args: HashMap<String, ArgValue>,
}

impl TranslateOptions {
    /// Create an empty options bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the locale for this call.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Dotted prefix prepended to the key (`scope("user")` turns
    /// `"greeting"` into `"user.greeting"`).
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Template to render when the requested locale has no entry.
    /// Takes precedence over every other locale's translation.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Count for plural selection. Also bound to `%{count}`,
    /// locale-formatted.
    pub fn count(mut self, count: impl Into<f64>) -> Self {
        self.count = Some(count.into());
        self
    }

    /// Bind an interpolation value.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }
}

/// Thread-safe translation lookup with locale fallback.
///
/// Cloning is cheap and shares the underlying catalog.
///
/// # Example
///
/// ```
/// use phrasebook::{Catalog, I18n, Locale, TranslateOptions};
///
/// let mut catalog = Catalog::new();
/// catalog
///     .add_locale_json("en", r#"{"inbox": {"one": "%{count} message", "other": "%{count} messages"}}"#)
///     .unwrap();
///
/// let i18n = I18n::with_catalog(catalog);
/// assert_eq!(i18n.t_count("inbox", 3), "3 messages");
/// assert_eq!(i18n.t("absent.key"), "[en.absent.key]");
/// ```
#[derive(Debug, Clone)]
pub struct I18n {
    catalog: Arc<RwLock<Catalog>>,
    locale: Locale,
    default_locale: Locale,
    fallbacks: Vec<Locale>,
}

impl I18n {
    /// An instance backed by the embedded locale glue (`en`, `ar`).
    pub fn new() -> Self {
        Self::with_catalog(Catalog::builtin())
    }

    /// An instance backed by a caller-built catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            locale: Locale::en(),
            default_locale: Locale::en(),
            fallbacks: Vec::new(),
        }
    }

    /// Set the current locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the site default locale (consulted after explicit fallbacks).
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Append an explicit fallback locale, tried in insertion order.
    pub fn with_fallback(mut self, locale: Locale) -> Self {
        self.fallbacks.push(locale);
        self
    }

    /// Load `<tag>.json` files from a directory into the catalog.
    pub fn load_from_dir(self, dir: impl AsRef<Path>) -> Result<Self> {
        self.catalog.write().load_from_dir(dir)?;
        Ok(self)
    }

    /// The current locale.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The site default locale.
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Merge a translation tree into a locale's main table.
    pub fn add_translations(&self, tag: impl Into<String>, tree: TranslationTree) {
        self.catalog.write().add_locale(tag, tree);
    }

    /// Merge JSON translations into a locale's main table.
    pub fn add_translations_json(&self, tag: impl Into<String>, json: &str) -> Result<()> {
        self.catalog.write().add_locale_json(tag, json)
    }

    /// Merge a translation tree into a locale's extras overlay.
    pub fn add_extras(&self, tag: impl Into<String>, tree: TranslationTree) {
        self.catalog.write().add_extras(tag, tree);
    }

    /// Tags of all loaded locales, sorted.
    pub fn available_locales(&self) -> Vec<String> {
        self.catalog
            .read()
            .locales()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Whether the current locale (or its truncations) resolves a key.
    pub fn has(&self, key: &str) -> bool {
        let catalog = self.catalog.read();
        self.locale
            .fallback_chain()
            .iter()
            .any(|loc| catalog.resolve(&loc.tag(), key).is_some())
    }

    /// Per-locale key coverage for the loaded catalog.
    pub fn coverage_report(&self) -> CoverageReport {
        self.catalog.read().coverage_report()
    }

    /// Translate a key with default options.
    pub fn t(&self, key: &str) -> String {
        self.translate(key, TranslateOptions::new())
    }

    /// Translate a pluralized key for a count.
    pub fn t_count(&self, key: &str, count: impl Into<f64>) -> String {
        self.translate(key, TranslateOptions::new().count(count))
    }

    /// Translate a dotted key through the full fallback chain.
    ///
    /// Resolution order: requested locale and its truncations (main tree,
    /// then extras) → `options.default_value` → configured fallback
    /// locales → default locale → `"en"`. An unresolvable key renders
    /// `[locale.key]`; this method never fails.
    pub fn translate(&self, key: &str, options: TranslateOptions) -> String {
        let locale = options.locale.clone().unwrap_or_else(|| self.locale.clone());
        let full_key = match options.scope.as_deref() {
            Some(scope) if !scope.is_empty() => format!("{scope}.{key}"),
            _ => key.to_string(),
        };

        let catalog = self.catalog.read();
        let mut tried = HashSet::new();

        for candidate in locale.fallback_chain() {
            let tag = candidate.tag();
            if let Some(node) = catalog.resolve(&tag, &full_key) {
                if let Some(message) = self.render(node, &options, &candidate, &locale) {
                    return message;
                }
            }
            tried.insert(tag);
        }

        // The caller's default beats other locales' translations.
        if let Some(default) = options.default_value.as_deref() {
            return self.render_template(default, &options, &locale);
        }

        let mut rest: Vec<Locale> = Vec::new();
        for fallback in &self.fallbacks {
            rest.extend(fallback.fallback_chain());
        }
        rest.extend(self.default_locale.fallback_chain());
        rest.push(Locale::en());

        for candidate in rest {
            let tag = candidate.tag();
            if !tried.insert(tag.clone()) {
                continue;
            }
            if let Some(node) = catalog.resolve(&tag, &full_key) {
                if let Some(message) = self.render(node, &options, &candidate, &locale) {
                    return message;
                }
            }
        }

        warn!("missing translation: {}.{}", locale.tag(), full_key);
        format!("[{}.{}]", locale.tag(), full_key)
    }

    /// Render a resolved node. Plural selection uses the rule of the
    /// locale that supplied the node (its forms follow that language's
    /// grammar); count display formatting follows the requested locale.
    fn render(
        &self,
        node: &Node,
        options: &TranslateOptions,
        supplier: &Locale,
        display: &Locale,
    ) -> Option<String> {
        match node {
            Node::Leaf(template) => Some(self.render_template(template, options, display)),
            Node::Plural(forms) => {
                let template = match options.count {
                    Some(count) => {
                        forms.select(PluralRule::for_locale(supplier).categorize(count))?
                    }
                    None => forms.get(PluralCategory::Other)?,
                };
                Some(self.render_template(template, options, display))
            }
            Node::Branch(_) => None,
        }
    }

    fn render_template(
        &self,
        template: &str,
        options: &TranslateOptions,
        display: &Locale,
    ) -> String {
        let mut args: HashMap<String, String> =
            HashMap::with_capacity(options.args.len() + 1);
        if let Some(count) = options.count {
            args.insert("count".to_string(), format_number(count, display));
        }
        for (name, value) in &options.args {
            args.insert(name.clone(), value.to_string());
        }
        interpolate(template, &args)
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_i18n() -> I18n {
        let mut catalog = Catalog::new();
        catalog
            .add_locale_json(
                "en",
                r#"{
                    "user": {
                        "greeting": "Hello %{name}",
                        "title": "Member"
                    },
                    "inbox": {
                        "one": "%{count} message",
                        "other": "%{count} messages"
                    },
                    "site": "Forum"
                }"#,
            )
            .unwrap();
        catalog
            .add_locale_json(
                "ar",
                r#"{
                    "user": {
                        "greeting": "مرحبًا %{name}"
                    },
                    "inbox": {
                        "zero": "لا رسائل",
                        "one": "رسالة واحدة",
                        "two": "رسالتان",
                        "few": "%{count} رسائل",
                        "many": "%{count} رسالة",
                        "other": "%{count} رسالة"
                    }
                }"#,
            )
            .unwrap();
        I18n::with_catalog(catalog)
            .with_locale(Locale::ar())
            .with_default_locale(Locale::en())
    }

    #[test]
    fn existing_key_returns_literal() {
        let i18n = test_i18n();
        assert_eq!(
            i18n.translate("user.greeting", TranslateOptions::new().arg("name", "سارة")),
            "مرحبًا سارة"
        );
    }

    #[test]
    fn missing_key_renders_bracketed_diagnostic() {
        let i18n = test_i18n();
        assert_eq!(i18n.t("user.unknown"), "[ar.user.unknown]");
        assert_eq!(
            i18n.translate("x", TranslateOptions::new().locale(Locale::en())),
            "[en.x]"
        );
    }

    #[test]
    fn arabic_plural_boundaries_end_to_end() {
        let i18n = test_i18n();
        assert_eq!(i18n.t_count("inbox", 0), "لا رسائل");
        assert_eq!(i18n.t_count("inbox", 1), "رسالة واحدة");
        assert_eq!(i18n.t_count("inbox", 2), "رسالتان");
        assert_eq!(i18n.t_count("inbox", 3), "3 رسائل");
        assert_eq!(i18n.t_count("inbox", 11), "11 رسالة");
        assert_eq!(i18n.t_count("inbox", 100), "100 رسالة");
    }

    #[test]
    fn missing_interpolation_value_is_stable() {
        let i18n = test_i18n();
        let first = i18n.t("user.greeting");
        let second = i18n.t("user.greeting");
        assert_eq!(first, "مرحبًا [missing %{name} value]");
        assert_eq!(first, second);
    }

    #[test]
    fn unresolved_key_falls_back_to_default_locale() {
        let i18n = test_i18n();
        // "user.title" exists only in en.
        assert_eq!(i18n.t("user.title"), "Member");
    }

    #[test]
    fn extras_beat_caller_default() {
        let i18n = test_i18n();
        let mut extras = TranslationTree::new();
        extras.set_message("plugin.badge", "شارة");
        i18n.add_extras("ar", extras);

        assert_eq!(
            i18n.translate(
                "plugin.badge",
                TranslateOptions::new().default_value("Badge")
            ),
            "شارة"
        );
    }

    #[test]
    fn caller_default_beats_other_locales() {
        let i18n = test_i18n();
        // "user.title" resolves in en, but the caller default wins first.
        assert_eq!(
            i18n.translate(
                "user.title",
                TranslateOptions::new().default_value("عضو")
            ),
            "عضو"
        );
    }

    #[test]
    fn explicit_fallback_beats_default_locale() {
        let mut catalog = Catalog::new();
        catalog.add_locale_json("fr", r#"{"site": "Forum FR"}"#).unwrap();
        catalog.add_locale_json("en", r#"{"site": "Forum EN"}"#).unwrap();

        let i18n = I18n::with_catalog(catalog)
            .with_locale(Locale::ar())
            .with_fallback(Locale::fr())
            .with_default_locale(Locale::en());
        assert_eq!(i18n.t("site"), "Forum FR");
    }

    #[test]
    fn english_is_the_last_resort() {
        let mut catalog = Catalog::new();
        catalog.add_locale_json("en", r#"{"site": "Forum EN"}"#).unwrap();

        let i18n = I18n::with_catalog(catalog)
            .with_locale(Locale::ar())
            .with_default_locale(Locale::de());
        assert_eq!(i18n.t("site"), "Forum EN");
    }

    #[test]
    fn regional_locale_truncates_before_falling_back() {
        let i18n = test_i18n();
        let message = i18n.translate(
            "user.greeting",
            TranslateOptions::new()
                .locale(Locale::ar_sa())
                .arg("name", "نور"),
        );
        assert_eq!(message, "مرحبًا نور");
    }

    #[test]
    fn scope_prefixes_the_key() {
        let i18n = test_i18n();
        assert_eq!(
            i18n.translate(
                "greeting",
                TranslateOptions::new().scope("user").arg("name", "ليلى")
            ),
            "مرحبًا ليلى"
        );
    }

    #[test]
    fn count_is_locale_formatted() {
        let mut catalog = Catalog::new();
        catalog
            .add_locale_json(
                "en",
                r#"{"visits": {"one": "%{count} visit", "other": "%{count} visits"}}"#,
            )
            .unwrap();
        let i18n = I18n::with_catalog(catalog);
        assert_eq!(i18n.t_count("visits", 1234567), "1,234,567 visits");
    }

    #[test]
    fn plural_fallback_uses_supplier_forms() {
        let i18n = test_i18n();
        // "inbox" count=2 via en fallback locale has no "two" form; the
        // English rule selects "other".
        let message = i18n.translate(
            "inbox",
            TranslateOptions::new().locale(Locale::de()).count(2),
        );
        assert_eq!(message, "2 messages");
    }

    #[test]
    fn plural_node_without_count_renders_other() {
        let i18n = test_i18n();
        assert_eq!(
            i18n.translate("inbox", TranslateOptions::new().locale(Locale::en())),
            "%{count} messages"
        );
    }

    #[test]
    fn branch_node_is_not_a_message() {
        let i18n = test_i18n();
        assert_eq!(i18n.t("user"), "[ar.user]");
    }

    #[test]
    fn has_respects_current_locale_chain() {
        let i18n = test_i18n();
        assert!(i18n.has("user.greeting"));
        assert!(!i18n.has("user.title")); // en-only, ar chain misses it
    }

    #[test]
    fn clones_share_the_catalog() {
        let i18n = test_i18n();
        let clone = i18n.clone();
        let mut extras = TranslationTree::new();
        extras.set_message("shared.key", "قيمة");
        clone.add_extras("ar", extras);
        assert_eq!(i18n.t("shared.key"), "قيمة");
    }

    #[test]
    fn available_locales_sorted() {
        let i18n = test_i18n();
        assert_eq!(i18n.available_locales(), vec!["ar", "en"]);
    }
}
