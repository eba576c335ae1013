use super::*;

#[test]
fn test_messages_config_default() {
    let cfg = MessagesConfig::default();
    assert_eq!(cfg.dir, "messages");
    assert_eq!(cfg.basenames, vec!["messages", "errors"]);
    assert_eq!(cfg.encoding, Encoding::Utf8);
    assert_eq!(cfg.default_locale, "ko-KR");
    assert_eq!(cfg.locales, vec!["en"]);
    assert!(cfg.fallback_to_default_locale);
    assert!(!cfg.use_code_as_default_message);
    assert!(!cfg.always_use_message_format);
}

#[test]
fn test_messages_config_from_toml() {
    let toml_str = r#"
        [service]
        name = "items"

        [messages]
        basenames = ["messages"]
        encoding = "iso-8859-1"
        default_locale = "en-US"
        locales = ["en", "ja"]
        use_code_as_default_message = true
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.service.name, "items");
    assert_eq!(cfg.service.log_level, "info");
    assert_eq!(cfg.messages.basenames, vec!["messages"]);
    assert_eq!(cfg.messages.encoding, Encoding::Latin1);
    assert_eq!(cfg.messages.default_locale, "en-US");
    assert_eq!(cfg.messages.locales, vec!["en", "ja"]);
    assert!(cfg.messages.use_code_as_default_message);
    // Untouched fields keep their defaults.
    assert_eq!(cfg.messages.dir, "messages");
    assert!(cfg.messages.fallback_to_default_locale);
}

#[test]
fn test_encoding_aliases() {
    #[derive(Deserialize)]
    struct Wrapper {
        encoding: Encoding,
    }
    for (raw, expected) in [
        ("utf-8", Encoding::Utf8),
        ("UTF-8", Encoding::Utf8),
        ("utf8", Encoding::Utf8),
        ("ISO-8859-1", Encoding::Latin1),
        ("latin1", Encoding::Latin1),
    ] {
        let w: Wrapper = toml::from_str(&format!("encoding = \"{raw}\"")).unwrap();
        assert_eq!(w.encoding, expected, "alias {raw}");
    }
    assert!(toml::from_str::<Wrapper>("encoding = \"utf-16\"").is_err());
}

#[test]
fn test_encoding_label_is_static() {
    let label: &'static str = Encoding::default().label();
    assert_eq!(label, "utf-8");
    assert_eq!(Encoding::Latin1.label(), "iso-8859-1");
}

#[test]
fn test_validate_rejects_empty_basenames() {
    let cfg = MessagesConfig {
        basenames: vec![],
        ..Default::default()
    };
    assert!(matches!(cfg.validate(), Err(ItemServiceError::Config(_))));
}

#[test]
fn test_validate_rejects_path_in_basename() {
    let cfg = MessagesConfig {
        basenames: vec!["../secrets".into()],
        ..Default::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("../secrets"));
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let (cfg, source) = load("/nonexistent/__itemservice_config__.toml").unwrap();
    assert_eq!(source, ConfigSource::Defaults);
    assert_eq!(cfg.service.name, "item-service");
    assert_eq!(cfg.messages.default_locale, "ko-KR");
}

#[test]
fn test_load_reads_file() {
    let tmp = std::env::temp_dir().join("__itemservice_test_config_load__");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("config.toml");
    std::fs::write(
        &path,
        "[service]\nlog_level = \"debug\"\n\n[messages]\ndir = \"/srv/messages\"\n",
    )
    .unwrap();

    let (cfg, source) = load(path.to_str().unwrap()).unwrap();
    assert_eq!(source, ConfigSource::File);
    assert_eq!(cfg.service.log_level, "debug");
    assert_eq!(cfg.messages.dir, "/srv/messages");

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn test_load_rejects_invalid_toml() {
    let tmp = std::env::temp_dir().join("__itemservice_test_config_invalid__");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("config.toml");
    std::fs::write(&path, "[messages\nbroken").unwrap();

    let err = load(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));

    let _ = std::fs::remove_dir_all(&tmp);
}
