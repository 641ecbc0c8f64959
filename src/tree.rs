//! Translation Tables
//!
//! Nested translation trees keyed by locale tag, with dotted-path
//! resolution and a per-locale extras overlay. Tables are loaded once
//! (embedded data, JSON strings, or a directory of `<tag>.json` files)
//! and never mutated by lookup code.

use crate::plural::{PluralCategory, PluralForms};
use crate::{I18nError, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::Path;

/// Embedded locale glue (calendar names, relative-time strings,
/// timezone display names) for the locales the crate ships with.
pub(crate) const EN_DATA: &str = include_str!("../locales/en.json");
pub(crate) const AR_DATA: &str = include_str!("../locales/ar.json");

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let mut catalog = Catalog::new();
    for (tag, source) in [("en", EN_DATA), ("ar", AR_DATA)] {
        match TranslationTree::from_json_str(source) {
            Ok(tree) => catalog.add_locale(tag, tree),
            Err(e) => warn!("failed to parse embedded '{tag}' locale data: {e}"),
        }
    }
    catalog
});

/// One node of a translation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal message.
    Leaf(String),
    /// A pluralization sub-map (`zero`/`one`/`two`/`few`/`many`/`other`).
    Plural(PluralForms),
    /// Named children.
    Branch(HashMap<String, Node>),
}

impl Node {
    /// Decode a JSON value into a node.
    ///
    /// Strings, numbers, and booleans become leaves. An object whose keys
    /// are all plural categories with string values becomes a plural
    /// sub-map; any other object becomes a branch. Arrays and nulls carry
    /// no translatable message and yield `None`.
    fn from_json(value: &Value) -> Option<Node> {
        match value {
            Value::String(s) => Some(Node::Leaf(s.clone())),
            Value::Number(n) => Some(Node::Leaf(n.to_string())),
            Value::Bool(b) => Some(Node::Leaf(b.to_string())),
            Value::Object(map) if !map.is_empty() => {
                let plural = map.iter().all(|(key, val)| {
                    PluralCategory::parse(key).is_ok() && val.is_string()
                });
                if plural {
                    let forms = map
                        .iter()
                        .filter_map(|(key, val)| {
                            let category = PluralCategory::parse(key).ok()?;
                            Some((category, val.as_str()?.to_string()))
                        })
                        .collect();
                    Some(Node::Plural(forms))
                } else {
                    let children: HashMap<String, Node> = map
                        .iter()
                        .filter_map(|(key, val)| {
                            Node::from_json(val).map(|node| (key.clone(), node))
                        })
                        .collect();
                    Some(Node::Branch(children))
                }
            }
            _ => None,
        }
    }
}

/// A single locale's translation tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationTree {
    root: HashMap<String, Node>,
}

impl TranslationTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a tree from a parsed JSON document (must be an object).
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| I18nError::ParseError("translation table must be a JSON object".into()))?;

        let root = map
            .iter()
            .filter_map(|(key, val)| Node::from_json(val).map(|node| (key.clone(), node)))
            .collect();
        Ok(Self { root })
    }

    /// Decode a tree from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    /// Resolve a dotted path to a node.
    ///
    /// Returns `None` when a segment is absent or a message is reached
    /// before the path is exhausted.
    pub fn resolve(&self, path: &str) -> Option<&Node> {
        let mut segments = path.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            match node {
                Node::Branch(children) => node = children.get(segment)?,
                _ => return None,
            }
        }
        Some(node)
    }

    /// Insert a node at a dotted path, creating intermediate branches.
    ///
    /// A leaf in the middle of the path is replaced by a branch.
    pub fn set(&mut self, path: &str, node: Node) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let last = match segments.pop() {
            Some(last) if !last.is_empty() => last,
            _ => return,
        };

        let mut current = &mut self.root;
        for segment in segments {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Node::Branch(HashMap::new()));
            if !matches!(entry, Node::Branch(_)) {
                *entry = Node::Branch(HashMap::new());
            }
            match entry {
                Node::Branch(children) => current = children,
                _ => unreachable!(),
            }
        }
        current.insert(last.to_string(), node);
    }

    /// Insert a literal message at a dotted path.
    pub fn set_message(&mut self, path: &str, message: impl Into<String>) {
        self.set(path, Node::Leaf(message.into()));
    }

    /// Merge another tree into this one. Branches merge recursively;
    /// anything else in `other` overwrites.
    pub fn merge(&mut self, other: TranslationTree) {
        merge_maps(&mut self.root, other.root);
    }

    /// All dotted message keys (leaves and plural sub-maps), unsorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.root, "", &mut keys);
        keys
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

fn merge_maps(into: &mut HashMap<String, Node>, from: HashMap<String, Node>) {
    for (key, node) in from {
        match into.entry(key) {
            Entry::Occupied(mut slot) => match (slot.get_mut(), node) {
                (Node::Branch(dst), Node::Branch(src)) => merge_maps(dst, src),
                (existing, node) => *existing = node,
            },
            Entry::Vacant(slot) => {
                slot.insert(node);
            }
        }
    }
}

fn collect_keys(map: &HashMap<String, Node>, prefix: &str, out: &mut Vec<String>) {
    for (key, node) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match node {
            Node::Branch(children) => collect_keys(children, &path, out),
            _ => out.push(path),
        }
    }
}

/// Translation trees for all loaded locales, plus per-locale extras.
///
/// The extras overlay holds runtime-supplied additions (site overrides,
/// plugin strings) consulted when the main tree misses a key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locales: HashMap<String, TranslationTree>,
    extras: HashMap<String, TranslationTree>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog pre-loaded with the embedded `en` and `ar` locale glue.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Add (or merge into) a locale's main tree.
    pub fn add_locale(&mut self, tag: impl Into<String>, tree: TranslationTree) {
        self.locales.entry(tag.into()).or_default().merge(tree);
    }

    /// Add a locale's main tree from JSON text.
    pub fn add_locale_json(&mut self, tag: impl Into<String>, json: &str) -> Result<()> {
        let tree = TranslationTree::from_json_str(json)?;
        self.add_locale(tag, tree);
        Ok(())
    }

    /// Add (or merge into) a locale's extras overlay.
    pub fn add_extras(&mut self, tag: impl Into<String>, tree: TranslationTree) {
        self.extras.entry(tag.into()).or_default().merge(tree);
    }

    /// Resolve a dotted path for an exact locale tag: main tree first,
    /// then the extras overlay. Locale fallback happens at the caller
    /// level (see [`crate::I18n::translate`]).
    pub fn resolve(&self, tag: &str, path: &str) -> Option<&Node> {
        if let Some(node) = self.locales.get(tag).and_then(|tree| tree.resolve(path)) {
            return Some(node);
        }
        self.extras.get(tag).and_then(|tree| tree.resolve(path))
    }

    /// Whether a locale has a main tree.
    pub fn has_locale(&self, tag: &str) -> bool {
        self.locales.contains_key(tag)
    }

    /// All loaded locale tags, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Load one `<tag>.json` per locale from a directory.
    ///
    /// File stems must be valid locale tags; other files are skipped.
    pub fn load_from_dir(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(I18nError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("locale directory not found: {}", dir.display()),
            )));
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let tag = crate::Locale::parse(stem)?.tag();
            let content = fs::read_to_string(&path)?;
            let tree = TranslationTree::from_json_str(&content)?;
            debug!("loaded locale '{tag}' from {}", path.display());
            self.add_locale(tag, tree);
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Key extraction & coverage
    // -----------------------------------------------------------------

    /// All unique dotted keys across every locale (main trees and extras),
    /// sorted for deterministic output.
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .locales
            .values()
            .chain(self.extras.values())
            .flat_map(TranslationTree::keys)
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Keys from `reference_keys` that the given locale cannot resolve
    /// (extras included, locale fallback not), sorted.
    pub fn missing_keys(&self, tag: &str, reference_keys: &[&str]) -> Vec<String> {
        let mut missing: Vec<String> = reference_keys
            .iter()
            .copied()
            .filter(|key| self.resolve(tag, key).is_none())
            .map(String::from)
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Per-locale key coverage against the full key set.
    pub fn coverage_report(&self) -> CoverageReport {
        let all = self.all_keys();
        let reference: Vec<&str> = all.iter().map(String::as_str).collect();
        let total = reference.len();

        let locales = self
            .locales()
            .into_iter()
            .map(|tag| {
                let missing = self.missing_keys(tag, &reference);
                let present = total.saturating_sub(missing.len());
                let coverage_percent = if total == 0 {
                    100.0
                } else {
                    (present as f32 / total as f32) * 100.0
                };
                LocaleCoverage {
                    locale: tag.to_string(),
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys: total,
            locales,
        }
    }
}

/// Coverage of the full key set, per locale.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Total number of unique keys across all locales.
    pub total_keys: usize,
    /// Per-locale coverage, sorted by locale tag.
    pub locales: Vec<LocaleCoverage>,
}

/// Key coverage for one locale.
#[derive(Debug, Clone)]
pub struct LocaleCoverage {
    /// Locale tag.
    pub locale: String,
    /// Number of reference keys the locale resolves.
    pub present: usize,
    /// Reference keys the locale cannot resolve, sorted.
    pub missing: Vec<String>,
    /// Coverage percentage (0.0 - 100.0).
    pub coverage_percent: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_tree() -> TranslationTree {
        TranslationTree::from_json_str(
            r#"{
                "user": {
                    "greeting": "Hello %{name}",
                    "messages": {
                        "one": "%{count} message",
                        "other": "%{count} messages"
                    }
                },
                "ok": "OK",
                "retries": 3
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn resolves_nested_leaf() {
        let tree = sample_tree();
        assert_eq!(
            tree.resolve("user.greeting"),
            Some(&Node::Leaf("Hello %{name}".into()))
        );
        assert_eq!(tree.resolve("ok"), Some(&Node::Leaf("OK".into())));
    }

    #[test]
    fn number_values_become_leaves() {
        let tree = sample_tree();
        assert_eq!(tree.resolve("retries"), Some(&Node::Leaf("3".into())));
    }

    #[test]
    fn plural_submap_is_detected() {
        let tree = sample_tree();
        match tree.resolve("user.messages") {
            Some(Node::Plural(forms)) => {
                assert_eq!(forms.get(PluralCategory::One), Some("%{count} message"));
                assert_eq!(forms.get(PluralCategory::Other), Some("%{count} messages"));
            }
            other => panic!("expected plural sub-map, got {other:?}"),
        }
    }

    #[test]
    fn object_with_non_plural_keys_is_branch() {
        let tree = TranslationTree::from_json_str(
            r#"{"zero": {"tolerance": "none"}, "mixed": {"one": "x", "extra": "y"}}"#,
        )
        .unwrap();
        assert!(matches!(tree.resolve("zero"), Some(Node::Branch(_))));
        assert_eq!(
            tree.resolve("zero.tolerance"),
            Some(&Node::Leaf("none".into()))
        );
        // "extra" is not a plural category, so the map is a branch.
        assert_eq!(tree.resolve("mixed.one"), Some(&Node::Leaf("x".into())));
    }

    #[test]
    fn missing_paths_resolve_to_none() {
        let tree = sample_tree();
        assert_eq!(tree.resolve("user.unknown"), None);
        assert_eq!(tree.resolve("user.greeting.deeper"), None);
        assert_eq!(tree.resolve("absent"), None);
        assert_eq!(tree.resolve(""), None);
    }

    #[test]
    fn top_level_non_object_is_rejected() {
        assert!(TranslationTree::from_json_str(r#"["a"]"#).is_err());
        assert!(TranslationTree::from_json_str("not json").is_err());
    }

    #[test]
    fn set_creates_intermediate_branches() {
        let mut tree = TranslationTree::new();
        tree.set_message("a.b.c", "deep");
        assert_eq!(tree.resolve("a.b.c"), Some(&Node::Leaf("deep".into())));

        // A leaf in the middle of the path is replaced by a branch.
        tree.set_message("a.b.c.d", "deeper");
        assert_eq!(tree.resolve("a.b.c.d"), Some(&Node::Leaf("deeper".into())));
    }

    #[test]
    fn merge_is_recursive() {
        let mut base = TranslationTree::new();
        base.set_message("nav.home", "Home");
        base.set_message("nav.back", "Back");

        let mut patch = TranslationTree::new();
        patch.set_message("nav.back", "Return");
        patch.set_message("nav.forward", "Forward");
        base.merge(patch);

        assert_eq!(base.resolve("nav.home"), Some(&Node::Leaf("Home".into())));
        assert_eq!(base.resolve("nav.back"), Some(&Node::Leaf("Return".into())));
        assert_eq!(
            base.resolve("nav.forward"),
            Some(&Node::Leaf("Forward".into()))
        );
    }

    #[test]
    fn catalog_resolve_consults_extras() {
        let mut catalog = Catalog::new();
        catalog.add_locale("en", sample_tree());

        let mut extras = TranslationTree::new();
        extras.set_message("plugin.badge", "Badge");
        catalog.add_extras("en", extras);

        assert!(catalog.resolve("en", "user.greeting").is_some());
        assert_eq!(
            catalog.resolve("en", "plugin.badge"),
            Some(&Node::Leaf("Badge".into()))
        );
        assert_eq!(catalog.resolve("ar", "plugin.badge"), None);
    }

    #[test]
    fn main_tree_shadows_extras() {
        let mut catalog = Catalog::new();
        let mut main = TranslationTree::new();
        main.set_message("title", "Main");
        catalog.add_locale("en", main);

        let mut extras = TranslationTree::new();
        extras.set_message("title", "Extra");
        catalog.add_extras("en", extras);

        assert_eq!(
            catalog.resolve("en", "title"),
            Some(&Node::Leaf("Main".into()))
        );
    }

    #[test]
    fn builtin_catalog_carries_locale_glue() {
        let catalog = Catalog::builtin();
        assert!(catalog.has_locale("en"));
        assert!(catalog.has_locale("ar"));
        assert!(matches!(
            catalog.resolve("ar", "datetime.distance.minutes"),
            Some(Node::Plural(_))
        ));
        assert!(matches!(
            catalog.resolve("en", "datetime.distance.past"),
            Some(Node::Leaf(_))
        ));
    }

    #[test]
    fn load_from_dir_reads_tagged_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("fr.json")).unwrap();
        write!(file, r#"{{"greeting": "Bonjour"}}"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut catalog = Catalog::new();
        catalog.load_from_dir(dir.path()).unwrap();

        assert!(catalog.has_locale("fr"));
        assert_eq!(
            catalog.resolve("fr", "greeting"),
            Some(&Node::Leaf("Bonjour".into()))
        );
    }

    #[test]
    fn load_from_missing_dir_errors() {
        let mut catalog = Catalog::new();
        assert!(catalog.load_from_dir("/nonexistent/locales").is_err());
    }

    #[test]
    fn all_keys_sorted_and_deduped() {
        let mut catalog = Catalog::new();
        let mut en = TranslationTree::new();
        en.set_message("b", "B");
        en.set_message("a", "A");
        catalog.add_locale("en", en);

        let mut fr = TranslationTree::new();
        fr.set_message("a", "A-fr");
        fr.set_message("c", "C-fr");
        catalog.add_locale("fr", fr);

        assert_eq!(catalog.all_keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn coverage_report_counts_missing() {
        let mut catalog = Catalog::new();
        let mut en = TranslationTree::new();
        en.set_message("a", "A");
        en.set_message("b", "B");
        en.set_message("c", "C");
        catalog.add_locale("en", en);

        let mut fr = TranslationTree::new();
        fr.set_message("a", "A-fr");
        catalog.add_locale("fr", fr);

        let report = catalog.coverage_report();
        assert_eq!(report.total_keys, 3);

        let fr_cov = report.locales.iter().find(|l| l.locale == "fr").unwrap();
        assert_eq!(fr_cov.present, 1);
        assert_eq!(fr_cov.missing, vec!["b", "c"]);

        let en_cov = report.locales.iter().find(|l| l.locale == "en").unwrap();
        assert!(en_cov.missing.is_empty());
        assert!((en_cov.coverage_percent - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_catalog_coverage() {
        let report = Catalog::new().coverage_report();
        assert_eq!(report.total_keys, 0);
        assert!(report.locales.is_empty());
    }
}
