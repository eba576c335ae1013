//! CLI command handlers. Each returns the text to print.


use std::collections::BTreeMap;
use std::fmt::Display;

use itemservice_messages::{Locale, MessageNotFound, MessageResolver};

/// Resolve one key with optional arguments, locale and default message.
pub fn handle_resolve(
    resolver: &MessageResolver,
    key: &str,
    args: &[String],
    locale: Option<&Locale>,
    default_message: Option<&str>,
) -> Result<String, MessageNotFound> {
    let args: Vec<&dyn Display> = args.iter().map(|a| a as &dyn Display).collect();
    resolver.resolve(key, &args, locale, default_message)
}

/// Every base key with its unformatted text for `locale`.
pub fn handle_keys(
    resolver: &MessageResolver,
    locale: Option<&Locale>,
    json: bool,
) -> anyhow::Result<String> {
    let mut entries = BTreeMap::new();
    for key in resolver.catalog().base_keys() {
        entries.insert(key, resolver.message(key, &[], locale)?);
    }

    if json {
        return Ok(serde_json::to_string_pretty(&entries)?);
    }
    Ok(entries
        .iter()
        .map(|(key, text)| format!("{key} = {text}"))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Catalog summary: default locale coverage, loaded locales, orphaned keys.
pub fn handle_check(resolver: &MessageResolver) -> Result<String, MessageNotFound> {
    let checked = resolver.verify_default_locale()?;
    let catalog = resolver.catalog();

    let basenames = catalog
        .bundles()
        .iter()
        .map(|b| b.basename())
        .collect::<Vec<_>>()
        .join(", ");
    let locales = catalog
        .locales()
        .into_iter()
        .map(Locale::tag)
        .collect::<Vec<_>>();
    let locales = if locales.is_empty() {
        "none".to_string()
    } else {
        locales.join(", ")
    };

    let mut out = format!(
        "Basenames: {basenames}\n\
         Locales: {locales}\n\
         Default locale {}: {checked} keys resolve",
        resolver.default_locale().tag()
    );

    let orphans = catalog.orphaned_keys();
    if !orphans.is_empty() {
        out.push_str(&format!("\nKeys without a base message: {}", orphans.len()));
        for (basename, locale, key) in orphans {
            out.push_str(&format!("\n  {basename}_{locale}: {key}"));
        }
    }
    Ok(out)
}
