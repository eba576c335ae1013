//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "item-service".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_messages_dir() -> String {
    "messages".to_string()
}

pub fn default_basenames() -> Vec<String> {
    vec!["messages".to_string(), "errors".to_string()]
}

pub fn default_locale() -> String {
    "ko-KR".to_string()
}

pub fn default_locales() -> Vec<String> {
    vec!["en".to_string()]
}
