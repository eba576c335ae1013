//! Key + locale + arguments -> display text.
//!
//! Lookup order for a requested locale `ll_RR`:
//! 1. `ll_RR`, then `ll`
//! 2. the default locale and its language (when `fallback_to_default_locale`)
//! 3. the base catalog
//!
//! Basenames are searched in configured order, each with the full chain above.


use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use itemservice_core::config::MessagesConfig;
use itemservice_core::error::ItemServiceError;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::MessageNotFound;
use crate::format::format_message;
use crate::locale::Locale;
use crate::source::{BundledSource, DirectorySource};

/// Resolution behaviour that is not part of the catalog itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Locale used when a call does not name one.
    pub default_locale: Locale,
    pub fallback_to_default_locale: bool,
    pub use_code_as_default_message: bool,
    pub always_use_message_format: bool,
}

impl ResolverOptions {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            fallback_to_default_locale: true,
            use_code_as_default_message: false,
            always_use_message_format: false,
        }
    }

    pub fn from_config(cfg: &MessagesConfig) -> Result<Self, ItemServiceError> {
        Ok(Self {
            default_locale: cfg.default_locale.parse()?,
            fallback_to_default_locale: cfg.fallback_to_default_locale,
            use_code_as_default_message: cfg.use_code_as_default_message,
            always_use_message_format: cfg.always_use_message_format,
        })
    }
}

/// Resolves message keys against an immutable [`Catalog`].
///
/// Cheap to clone; clones share the catalog. Safe to use from many threads.
#[derive(Debug, Clone)]
pub struct MessageResolver {
    catalog: Arc<Catalog>,
    options: ResolverOptions,
}

impl MessageResolver {
    pub fn new(catalog: Catalog, options: ResolverOptions) -> Self {
        Self {
            catalog: Arc::new(catalog),
            options,
        }
    }

    /// Build the catalog described by `cfg`.
    ///
    /// Reads from `cfg.dir` when it is a directory, otherwise from the
    /// resources bundled into the binary.
    pub fn from_config(cfg: &MessagesConfig) -> Result<Self, ItemServiceError> {
        cfg.validate()?;
        let options = ResolverOptions::from_config(cfg)?;

        let mut locales = cfg
            .locales
            .iter()
            .map(|tag| tag.parse::<Locale>())
            .collect::<Result<Vec<_>, _>>()?;
        if !locales.contains(&options.default_locale) {
            locales.push(options.default_locale.clone());
        }

        let dir = Path::new(&cfg.dir);
        let catalog = if dir.is_dir() {
            Catalog::load(&DirectorySource::new(dir), &cfg.basenames, &locales, cfg.encoding)?
        } else {
            info!(
                "message directory {} not found, using bundled resources",
                dir.display()
            );
            Catalog::load(
                &BundledSource::default(),
                &cfg.basenames,
                &locales,
                cfg.encoding,
            )?
        };

        Ok(Self::new(catalog, options))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn default_locale(&self) -> &Locale {
        &self.options.default_locale
    }

    /// Resolve `key` for `locale` (default locale when `None`).
    ///
    /// When no template exists, `default_message` is returned as-is, without
    /// placeholder substitution.
    pub fn resolve(
        &self,
        key: &str,
        args: &[&dyn Display],
        locale: Option<&Locale>,
        default_message: Option<&str>,
    ) -> Result<String, MessageNotFound> {
        self.resolve_any(&[key], args, locale, default_message)
    }

    /// [`resolve`](Self::resolve) without a default message.
    pub fn message(
        &self,
        key: &str,
        args: &[&dyn Display],
        locale: Option<&Locale>,
    ) -> Result<String, MessageNotFound> {
        self.resolve_any(&[key], args, locale, None)
    }

    /// Try `codes` in order and format the first one that has a template.
    ///
    /// With `use_code_as_default_message` the first code stands in for a
    /// missing message; the error names the last code tried.
    pub fn resolve_any(
        &self,
        codes: &[&str],
        args: &[&dyn Display],
        locale: Option<&Locale>,
        default_message: Option<&str>,
    ) -> Result<String, MessageNotFound> {
        let locale = locale.unwrap_or(&self.options.default_locale);
        let chain = self.search_chain(locale);

        for code in codes.iter().filter(|c| !c.is_empty()) {
            if let Some(template) = self.find_template(code, &chain) {
                return Ok(self.render(template, args));
            }
        }

        if let Some(default_message) = default_message {
            return Ok(default_message.to_string());
        }
        if self.options.use_code_as_default_message {
            if let Some(first) = codes.iter().find(|c| !c.is_empty()) {
                return Ok(first.to_string());
            }
        }

        Err(MessageNotFound {
            key: codes.last().copied().unwrap_or_default().to_string(),
            locale: locale.clone(),
        })
    }

    /// Check that the default locale's own translations are complete.
    ///
    /// For every bundle that loaded a table for the default locale or its
    /// language, each base key must appear in one of those tables; otherwise
    /// callers using the default locale would silently get base text for that
    /// key. Bundles without such a table serve the base text directly and
    /// pass. Returns the number of base keys checked.
    pub fn verify_default_locale(&self) -> Result<usize, MessageNotFound> {
        let default = &self.options.default_locale;
        let own = default.candidates();
        let mut checked = 0;

        for bundle in self.catalog.bundles() {
            let tables: Vec<&Locale> = own.iter().filter(|l| bundle.has_locale(l)).collect();
            let mut keys: Vec<&str> = bundle.base_keys().collect();
            keys.sort_unstable();

            for key in keys {
                checked += 1;
                if tables.is_empty() {
                    continue;
                }
                if !tables.iter().any(|l| bundle.get(Some(*l), key).is_some()) {
                    return Err(MessageNotFound {
                        key: key.to_string(),
                        locale: default.clone(),
                    });
                }
            }
        }

        Ok(checked)
    }

    /// Catalog tables to consult for `locale`, most specific first. `None` is
    /// the base table.
    fn search_chain(&self, locale: &Locale) -> Vec<Option<Locale>> {
        let mut chain: Vec<Option<Locale>> = Vec::with_capacity(5);
        let mut push = |entry: Option<Locale>| {
            if !chain.contains(&entry) {
                chain.push(entry);
            }
        };

        for candidate in locale.candidates() {
            push(Some(candidate));
        }
        if self.options.fallback_to_default_locale {
            for candidate in self.options.default_locale.candidates() {
                push(Some(candidate));
            }
        }
        push(None);

        chain
    }

    fn find_template(&self, key: &str, chain: &[Option<Locale>]) -> Option<&str> {
        self.catalog.bundles().iter().find_map(|bundle| {
            chain
                .iter()
                .find_map(|locale| bundle.get(locale.as_ref(), key))
        })
    }

    fn render(&self, template: &str, args: &[&dyn Display]) -> String {
        if args.is_empty() && !self.options.always_use_message_format {
            return template.to_string();
        }
        format_message(template, args)
    }
}
