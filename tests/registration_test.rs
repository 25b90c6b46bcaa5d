//! Integration tests for manager registration and options binding.

use docstore_manager::{DocumentStoreBuilder, ManagerOptions, StoreError};
use std::io::Write;

#[tokio::test]
async fn builder_composes_a_working_manager() {
    let manager = DocumentStoreBuilder::new()
        .entry("primary=mongodb://localhost:27017/app")
        .unwrap()
        .entry("metrics=mongodb://localhost:27018/events?app_name=svc")
        .unwrap()
        .default_server("primary")
        .build()
        .unwrap();

    assert_eq!(
        manager.server_names().await.unwrap(),
        vec!["metrics", "primary"]
    );

    let store = manager.get_store(None).await.unwrap();
    assert_eq!(store.name(), "primary");
    assert_eq!(store.config().database, Some("app".to_string()));

    let metrics = manager.get_config("metrics").await.unwrap();
    assert_eq!(metrics.conventions.app_name, Some("svc".to_string()));
    assert!(!metrics.url.contains("app_name"));
}

#[tokio::test]
async fn builder_bare_url_derives_name_from_database() {
    let manager = DocumentStoreBuilder::new()
        .entry("mongodb://localhost:27017/inventory")
        .unwrap()
        .default_server("inventory")
        .build()
        .unwrap();

    let db = manager.get_database(None, None).await.unwrap();
    assert_eq!(db.name(), "inventory");
}

#[tokio::test]
async fn builder_rejects_default_without_matching_server() {
    let result = DocumentStoreBuilder::new()
        .entry("primary=mongodb://localhost:27017/app")
        .unwrap()
        .default_server("absent")
        .build();
    assert!(matches!(result, Err(StoreError::InvalidInput { .. })));
}

#[tokio::test]
async fn options_load_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "default_server": "primary",
            "servers": {{
                "primary": {{ "url": "mongodb://localhost:27017", "database": "app" }},
                "archive": {{
                    "url": "mongodb://localhost:27019",
                    "database": "history",
                    "certificate_path": "/etc/certs/client.pem",
                    "conventions": {{ "max_pool_size": 5 }}
                }}
            }}
        }}"#
    )
    .unwrap();

    let manager = DocumentStoreBuilder::from_json_file(file.path())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(manager.default_server(), Some("primary"));
    let archive = manager.get_config("archive").await.unwrap();
    assert_eq!(archive.database, Some("history".to_string()));
    assert_eq!(archive.conventions.max_pool_size, Some(5));
    assert!(archive.certificate_path.is_some());
}

#[tokio::test]
async fn missing_options_file_is_a_configuration_error() {
    let result = ManagerOptions::from_json_file("/nonexistent/options.json");
    assert!(matches!(result, Err(StoreError::Configuration { .. })));
}

#[tokio::test]
async fn malformed_options_file_is_a_configuration_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let result = ManagerOptions::from_json_file(file.path());
    assert!(matches!(result, Err(StoreError::Configuration { .. })));
}
