use retain_theme_core::AppConfig;

#[tokio::test]
async fn test_missing_config_is_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = AppConfig::load_from(&path).await.unwrap();

    assert_eq!(config, AppConfig::default());
    assert!(path.exists());
}

#[tokio::test]
async fn test_saved_config_is_loaded_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.request.suppress_logs = true;
    config.text.base_font_size = 20.0;
    config.save_to(&path).await.unwrap();

    let loaded = AppConfig::load_from(&path).await.unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_blocking_with_tokio_test() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "version = 2\n").unwrap();

    let config = tokio_test::block_on(AppConfig::load_from(&path)).unwrap();
    assert_eq!(config.version, 2);
    assert_eq!(config.request, Default::default());
}
