//! Immutable message catalog built once at startup.

use std::collections::{BTreeSet, HashMap};

use itemservice_core::config::Encoding;
use itemservice_core::error::ItemServiceError;
use tracing::{debug, info, warn};

use crate::locale::Locale;
use crate::properties;
use crate::source::ResourceSource;

/// All templates loaded for one basename (e.g. `messages` or `errors`).
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    basename: String,
    base: HashMap<String, String>,
    localized: HashMap<Locale, HashMap<String, String>>,
}

impl Bundle {
    pub fn new(basename: &str) -> Self {
        Self {
            basename: basename.to_string(),
            ..Default::default()
        }
    }

    /// Add base (unsuffixed) entries. Later entries override earlier ones.
    pub fn with_base<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.base
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add entries for one locale. Later entries override earlier ones.
    pub fn with_locale<K, V>(
        mut self,
        locale: Locale,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.localized
            .entry(locale)
            .or_default()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Template for `key` in the given locale's table, or the base table when
    /// `locale` is `None`. Does not fall back between tables.
    pub fn get(&self, locale: Option<&Locale>, key: &str) -> Option<&str> {
        let table = match locale {
            Some(locale) => self.localized.get(locale)?,
            None => &self.base,
        };
        table.get(key).map(String::as_str)
    }

    pub fn base_keys(&self) -> impl Iterator<Item = &str> {
        self.base.keys().map(String::as_str)
    }

    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.localized.keys()
    }

    /// Whether a table was loaded for exactly this locale.
    pub fn has_locale(&self, locale: &Locale) -> bool {
        self.localized.contains_key(locale)
    }

    fn is_empty(&self) -> bool {
        self.base.is_empty() && self.localized.is_empty()
    }
}

/// Every bundle, in basename search order. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    bundles: Vec<Bundle>,
}

impl Catalog {
    pub fn from_bundles(bundles: Vec<Bundle>) -> Self {
        Self { bundles }
    }

    /// Load `{basename}.properties` plus `{basename}_{suffix}.properties` for
    /// every configured locale and its language-only parent.
    ///
    /// Missing files are skipped. Fails if no file was found at all, or if a
    /// file cannot be read, decoded or parsed.
    pub fn load(
        source: &dyn ResourceSource,
        basenames: &[String],
        locales: &[Locale],
        encoding: Encoding,
    ) -> Result<Self, ItemServiceError> {
        let mut bundles = Vec::with_capacity(basenames.len());
        let mut files = 0usize;

        for basename in basenames {
            let mut bundle = Bundle::new(basename);
            let mut found = 0usize;

            let base_name = format!("{basename}.properties");
            if let Some(table) = read_table(source, &base_name, encoding)? {
                bundle.base = table;
                found += 1;
            }

            for locale in locales {
                for candidate in locale.candidates() {
                    if bundle.localized.contains_key(&candidate) {
                        continue;
                    }
                    let file_name = format!("{basename}_{}.properties", candidate.suffix());
                    if let Some(table) = read_table(source, &file_name, encoding)? {
                        bundle.localized.insert(candidate, table);
                        found += 1;
                    }
                }
            }

            if found == 0 {
                warn!(
                    "no resource files for message basename '{basename}' in {}",
                    source.describe()
                );
            }
            files += found;
            bundles.push(bundle);
        }

        if files == 0 {
            return Err(ItemServiceError::Catalog(format!(
                "no message resources found in {}",
                source.describe()
            )));
        }

        let catalog = Self { bundles };
        info!(
            "loaded {files} message files ({} base keys) from {}",
            catalog.base_keys().len(),
            source.describe()
        );
        Ok(catalog)
    }

    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.iter().all(Bundle::is_empty)
    }

    /// Union of base keys across bundles, sorted.
    pub fn base_keys(&self) -> BTreeSet<&str> {
        self.bundles.iter().flat_map(Bundle::base_keys).collect()
    }

    /// Every locale that has its own table in some bundle.
    pub fn locales(&self) -> BTreeSet<&Locale> {
        self.bundles.iter().flat_map(Bundle::locales).collect()
    }

    /// Localized keys with no base entry in the same bundle, as
    /// `(basename, locale, key)` sorted. Such keys cannot be resolved for
    /// locales that lack their own file.
    pub fn orphaned_keys(&self) -> Vec<(&str, &Locale, &str)> {
        let mut out: Vec<_> = self
            .bundles
            .iter()
            .flat_map(|bundle| {
                bundle.localized.iter().flat_map(move |(locale, table)| {
                    table
                        .keys()
                        .filter(move |key| !bundle.base.contains_key(*key))
                        .map(move |key| (bundle.basename(), locale, key.as_str()))
                })
            })
            .collect();
        out.sort();
        out
    }
}

fn read_table(
    source: &dyn ResourceSource,
    file_name: &str,
    encoding: Encoding,
) -> Result<Option<HashMap<String, String>>, ItemServiceError> {
    let Some(bytes) = source.read(file_name)? else {
        return Ok(None);
    };

    let text = decode(bytes, encoding)
        .map_err(|e| ItemServiceError::Catalog(format!("{file_name}: {e}")))?;
    let entries = properties::parse(&text)
        .map_err(|e| ItemServiceError::Catalog(format!("{file_name}: {e}")))?;

    let mut table = HashMap::with_capacity(entries.len());
    for (key, value) in entries {
        if table.contains_key(&key) {
            warn!("{file_name}: duplicate message key '{key}', later value wins");
        }
        table.insert(key, value);
    }
    debug!("loaded {} messages from {file_name}", table.len());
    Ok(Some(table))
}

fn decode(bytes: Vec<u8>, encoding: Encoding) -> Result<String, String> {
    match encoding {
        Encoding::Utf8 => String::from_utf8(bytes)
            .map_err(|e| format!("not valid {}: {e}", encoding.label())),
        Encoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BundledSource;

    struct MapSource(HashMap<&'static str, Vec<u8>>);

    impl ResourceSource for MapSource {
        fn describe(&self) -> String {
            "test map".into()
        }

        fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>, ItemServiceError> {
            Ok(self.0.get(file_name).cloned())
        }
    }

    fn map_source(files: &[(&'static str, &[u8])]) -> MapSource {
        MapSource(files.iter().map(|(n, c)| (*n, c.to_vec())).collect())
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn locale(tag: &str) -> Locale {
        tag.parse().unwrap()
    }

    #[test]
    fn test_load_bundled_resources() {
        let catalog = Catalog::load(
            &BundledSource::default(),
            &names(&["messages", "errors"]),
            &[locale("en")],
            Encoding::Utf8,
        )
        .unwrap();

        assert_eq!(catalog.bundles().len(), 2);
        let messages = &catalog.bundles()[0];
        assert_eq!(messages.basename(), "messages");
        assert_eq!(messages.get(None, "hello"), Some("안녕"));
        assert_eq!(messages.get(Some(&locale("en")), "hello"), Some("hello"));
        assert!(catalog.base_keys().contains("required.item.itemName"));
        assert_eq!(catalog.locales().into_iter().collect::<Vec<_>>(), vec![&locale("en")]);
        assert!(catalog.orphaned_keys().is_empty());
    }

    #[test]
    fn test_load_regional_locale_reads_parent_file() {
        let source = map_source(&[
            ("messages.properties", "hello=안녕\n".as_bytes()),
            ("messages_en.properties", b"hello=hello\ncolor=colour\n"),
            ("messages_en_US.properties", b"color=color\n"),
        ]);
        let catalog = Catalog::load(
            &source,
            &names(&["messages"]),
            &[locale("en-US")],
            Encoding::Utf8,
        )
        .unwrap();

        let bundle = &catalog.bundles()[0];
        assert_eq!(bundle.get(Some(&locale("en_US")), "color"), Some("color"));
        assert_eq!(bundle.get(Some(&locale("en")), "color"), Some("colour"));
        // Tables do not fall back on their own.
        assert_eq!(bundle.get(Some(&locale("en_US")), "hello"), None);
        assert_eq!(
            catalog.orphaned_keys(),
            vec![
                ("messages", &locale("en"), "color"),
                ("messages", &locale("en_US"), "color"),
            ]
        );
    }

    #[test]
    fn test_load_without_any_file_fails() {
        let source = map_source(&[]);
        let err = Catalog::load(&source, &names(&["messages"]), &[], Encoding::Utf8).unwrap_err();
        assert!(matches!(err, ItemServiceError::Catalog(_)));
        assert!(err.to_string().contains("test map"));
    }

    #[test]
    fn test_load_missing_basename_is_tolerated() {
        let source = map_source(&[("messages.properties", b"a=1\n")]);
        let catalog =
            Catalog::load(&source, &names(&["messages", "errors"]), &[], Encoding::Utf8).unwrap();
        assert_eq!(catalog.bundles().len(), 2);
        assert_eq!(catalog.bundles()[1].basename(), "errors");
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let source = map_source(&[("messages.properties", b"a=\xff\xfe\n")]);
        let err = Catalog::load(&source, &names(&["messages"]), &[], Encoding::Utf8).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("messages.properties"), "{msg}");
        assert!(msg.contains("utf-8"), "{msg}");
    }

    #[test]
    fn test_load_latin1_with_unicode_escapes() {
        let source = map_source(&[(
            "messages.properties",
            b"cafe=caf\xe9\nhello=\\uC548\\uB155\n",
        )]);
        let catalog =
            Catalog::load(&source, &names(&["messages"]), &[], Encoding::Latin1).unwrap();
        let bundle = &catalog.bundles()[0];
        assert_eq!(bundle.get(None, "cafe"), Some("café"));
        assert_eq!(bundle.get(None, "hello"), Some("안녕"));
    }

    #[test]
    fn test_load_reports_parse_error_with_file() {
        let source = map_source(&[("errors_en.properties", b"bad=\\uZZZZ\n")]);
        let err = Catalog::load(&source, &names(&["errors"]), &[locale("en")], Encoding::Utf8)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("errors_en.properties"), "{msg}");
        assert!(msg.contains("line 1"), "{msg}");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let source = map_source(&[("messages.properties", b"k=first\nk=second\n")]);
        let catalog = Catalog::load(&source, &names(&["messages"]), &[], Encoding::Utf8).unwrap();
        assert_eq!(catalog.bundles()[0].get(None, "k"), Some("second"));
    }

    #[test]
    fn test_bundle_builder() {
        let bundle = Bundle::new("messages")
            .with_base([("hello", "안녕")])
            .with_locale(locale("en"), [("hello", "hello")]);
        let catalog = Catalog::from_bundles(vec![bundle]);
        assert_eq!(catalog.base_keys().into_iter().collect::<Vec<_>>(), vec!["hello"]);
        assert_eq!(catalog.bundles()[0].get(Some(&locale("en")), "hello"), Some("hello"));
        assert_eq!(catalog.bundles()[0].get(Some(&locale("fr")), "hello"), None);
    }
}
